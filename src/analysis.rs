use crate::errors::Result;
use crate::grid::{Grid, GridPoint};
use crate::io::FileFormat;
use crate::progress::Bar;
use log::debug;
use std::path::Path;

/// How many grid points to sum between progress bar updates.
const CHUNK_SIZE: usize = 1 << 16;

/// The integrated Electron Density Shift of a single cube file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdsStatistics {
    /// Integral over every point with a positive density.
    pub total_positive: f64,
    /// Integral over every point with a negative density.
    pub total_negative: f64,
    /// Signed integral over every point.
    pub total: f64,
    /// The net integral as a percentage of the total shifted density.
    pub error: f64,
    /// Integral over every point above the cutoff.
    pub cutoff_positive: f64,
    /// Integral over every point below the cutoff.
    pub cutoff_negative: f64,
}

/// Running sums of each partition of the density, before scaling by the cell
/// volume. Every sum starts from 0 so an empty partition integrates to 0.
#[derive(Clone, Copy, Debug)]
struct Partition {
    cutoff: f64,
    positive: f64,
    negative: f64,
    total: f64,
    cutoff_positive: f64,
    cutoff_negative: f64,
}

impl Partition {
    fn new(cutoff: f64) -> Self {
        Self { cutoff,
               positive: 0.,
               negative: 0.,
               total: 0.,
               cutoff_positive: 0.,
               cutoff_negative: 0. }
    }

    fn add(&mut self, rho: f64) {
        if rho > 0. {
            self.positive += rho;
        } else if rho < 0. {
            self.negative += rho;
        }
        self.total += rho;
        // the same cutoff bounds both tails
        if rho > self.cutoff {
            self.cutoff_positive += rho;
        }
        if rho < self.cutoff {
            self.cutoff_negative += rho;
        }
    }

    fn integrate(self, cell_volume: f64) -> EdsStatistics {
        let total_positive = self.positive * cell_volume;
        let total_negative = self.negative * cell_volume;
        let total = self.total * cell_volume;
        EdsStatistics { total_positive,
                        total_negative,
                        total,
                        error: error_metric(total, total_positive, total_negative),
                        cutoff_positive: self.cutoff_positive * cell_volume,
                        cutoff_negative: self.cutoff_negative * cell_volume }
    }
}

/// The net integral as a percentage of the total shifted density.
///
/// Returns NaN when the positive and negative integrals are equal, which only
/// happens when both are zero.
pub fn error_metric(total: f64, total_positive: f64, total_negative: f64) -> f64 {
    (total / (total_positive - total_negative)).abs() * 100.
}

/// Integrates the whole grid, returning the positive, negative and net
/// integrals and the error metric.
pub fn eds_total(points: &[GridPoint], cell_volume: f64) -> (f64, f64, f64, f64) {
    let stats = integrate(points, cell_volume, 0.);
    (stats.total_positive, stats.total_negative, stats.total, stats.error)
}

/// Integrates the points either side of `cutoff`, returning the positive and
/// negative integrals.
pub fn eds_cutoff(points: &[GridPoint], cell_volume: f64, cutoff: f64) -> (f64, f64) {
    let stats = integrate(points, cell_volume, cutoff);
    (stats.cutoff_positive, stats.cutoff_negative)
}

/// Integrates a materialised set of grid points.
pub fn integrate(points: &[GridPoint], cell_volume: f64, cutoff: f64) -> EdsStatistics {
    points.iter()
          .fold(Partition::new(cutoff), |mut partition, point| {
              partition.add(point.rho);
              partition
          })
          .integrate(cell_volume)
}

/// Integrates a density laid over `grid` in a single pass, without building
/// the grid points.
///
/// * `grid`: The lattice the density is sampled on.
/// * `rho`: The flattened density, z varying fastest.
/// * `cutoff`: The threshold for the cutoff integrals.
/// * `progress_bar`: Ticked once per grid point.
pub fn integrate_density(grid: &Grid,
                         rho: &[f64],
                         cutoff: f64,
                         progress_bar: &Bar)
                         -> Result<EdsStatistics> {
    grid.check_shape(rho)?;
    let mut partition = Partition::new(cutoff);
    for chunk in rho.chunks(CHUNK_SIZE) {
        chunk.iter().for_each(|rho| partition.add(*rho));
        progress_bar.tick_by(chunk.len() as u64);
    }
    let stats = partition.integrate(grid.cell_volume);
    debug!("Integrated {} grid points: {:?}", grid.size.total, stats);
    Ok(stats)
}

/// Reads a density file, rebuilds its lattice and integrates it.
///
/// The progress bar is resized to the number of grid points once the file has
/// been read.
pub fn quantify(file_type: &dyn FileFormat,
                path: &Path,
                cutoff: f64,
                progress_bar: &Bar)
                -> Result<EdsStatistics> {
    let density = file_type.read(path)?;
    let grid = Grid::new(&density.header)?;
    progress_bar.set_length(grid.size.total as u64);
    integrate_density(&grid, &density.rho, cutoff, progress_bar)
}
