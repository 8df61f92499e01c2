use crate::errors::{Error, Result};
use itertools::iproduct;
use log::debug;

/// The lattice geometry as stored in the header of a cube file.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    /// The cartesian position of the first grid point.
    pub origin: [f64; 3],
    /// The step vectors between neighbouring grid points along each axis.
    pub axes: [[f64; 3]; 3],
    /// The number of grid points along each axis.
    pub size: [usize; 3],
}

impl Header {
    pub fn new(origin: [f64; 3], axes: [[f64; 3]; 3], size: [usize; 3]) -> Self {
        Self { origin, axes, size }
    }

    /// The step along each axis, taken from the diagonal of the axis vectors.
    ///
    /// Only orthorhombic grids are supported so the off-diagonal components
    /// are never read.
    pub fn steps(&self) -> [f64; 3] {
        [self.axes[0][0], self.axes[1][1], self.axes[2][2]]
    }

    /// Whether every off-diagonal component of the axis vectors is zero.
    pub fn is_orthogonal(&self) -> bool {
        self.axes.iter().enumerate().all(|(i, axis)| {
            axis.iter()
                .enumerate()
                .all(|(j, component)| i == j || *component == 0.)
        })
    }
}

/// The dimensions of the reconstructed lattice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    /// Number of grid points in the x-direction.
    pub x: usize,
    /// Number of grid points in the y-direction.
    pub y: usize,
    /// Number of grid points in the z-direction.
    pub z: usize,
    /// Total number of grid points.
    pub total: usize,
}

impl Size {
    /// The length of the flattened array for the density data in 3d
    fn new(x: usize, y: usize, z: usize) -> Option<Self> {
        let total = x.checked_mul(y)?.checked_mul(z)?;
        Some(Self { x, y, z, total })
    }
}

/// A single node of the lattice and the density sampled there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub rho: f64,
}

/// The cartesian lattice rebuilt from a [`Header`].
pub struct Grid {
    /// The 3d size of the lattice, counted from the generated coordinates.
    pub size: Size,
    /// The coordinates along the x, y and z axes.
    pub coordinates: [Vec<f64>; 3],
    /// The volume of a single cell of the lattice.
    pub cell_volume: f64,
}

impl Grid {
    /// Rebuilds the coordinates along each axis and the cell volume.
    pub fn new(header: &Header) -> Result<Self> {
        let [xstep, ystep, zstep] = header.steps();
        let cell_volume = xstep * ystep * zstep;
        let coordinates = [axis_coordinates(header.origin[0], xstep, header.size[0]),
                           axis_coordinates(header.origin[1], ystep, header.size[1]),
                           axis_coordinates(header.origin[2], zstep, header.size[2])];
        let [x, y, z] = [coordinates[0].len(),
                         coordinates[1].len(),
                         coordinates[2].len()];
        let size = Size::new(x, y, z).ok_or(Error::GridTooLarge([x, y, z]))?;
        if cell_volume == 0. {
            debug!("Degenerate lattice, every integral will be zero.");
        }
        Ok(Self { size,
                  coordinates,
                  cell_volume })
    }

    /// Converts a 1D index of the array into a 3D index
    pub fn to_3d(&self, p: usize) -> [usize; 3] {
        let x = p / (self.size.y * self.size.z);
        let y = (p / self.size.z) % self.size.y;
        let z = p % self.size.z;
        [x, y, z]
    }

    /// Converts a point in the array to cartesian.
    pub fn to_cartesian(&self, p: usize) -> [f64; 3] {
        let [x, y, z] = self.to_3d(p);
        [self.coordinates[0][x],
         self.coordinates[1][y],
         self.coordinates[2][z]]
    }

    /// Iterates over the cartesian position of every node, z varying fastest.
    pub fn lattice(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        let [x, y, z] = &self.coordinates;
        let product = iproduct!(x.iter().copied(), y.iter().copied(), z.iter().copied());
        product.map(|(x, y, z)| [x, y, z])
    }

    /// Checks that a flattened density can be laid over the lattice.
    pub fn check_shape(&self, rho: &[f64]) -> Result<()> {
        if rho.len() != self.size.total {
            return Err(Error::ShapeMismatch { expected: self.size.total,
                                              found: rho.len() });
        }
        Ok(())
    }

    /// Pairs every node of the lattice with its density, in array order.
    pub fn points(&self, rho: &[f64]) -> Result<Vec<GridPoint>> {
        self.check_shape(rho)?;
        Ok(self.lattice()
               .zip(rho)
               .map(|([x, y, z], rho)| GridPoint { x, y, z, rho: *rho })
               .collect())
    }
}

/// Number of samples in the half-open range [origin, origin + step * count).
fn samples(origin: f64, step: f64, count: usize) -> usize {
    let stop = origin + step * count as f64;
    let n = ((stop - origin) / step).ceil();
    if n.is_finite() && n > 0. {
        n as usize
    } else {
        0
    }
}

/// Generates `count` coordinates along an axis starting from `origin`.
///
/// Stepping through the half-open range can produce one sample too many when
/// `step * count` rounds up, the extra sample is dropped from the end. A zero
/// step repeats the origin `count` times.
pub fn axis_coordinates(origin: f64, step: f64, count: usize) -> Vec<f64> {
    if step == 0. {
        return vec![origin; count];
    }
    let mut coordinates = (0..samples(origin, step, count)).map(|i| origin + i as f64 * step)
                                                           .collect::<Vec<f64>>();
    coordinates.truncate(count);
    coordinates
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn header(origin: [f64; 3], steps: [f64; 3], size: [usize; 3]) -> Header {
        Header::new(origin,
                    [[steps[0], 0., 0.], [0., steps[1], 0.], [0., 0., steps[2]]],
                    size)
    }

    #[test]
    fn grid_samples_overshoot() {
        assert_eq!(samples(1.0, 0.1, 3), 4);
        assert_eq!(samples(0.0, 0.1, 3), 4);
        assert_eq!(samples(-5.0, 0.2, 7), 8);
    }

    #[rstest]
    #[case(0.0, 0.1, 10)]
    #[case(1.0, 0.1, 3)]
    #[case(0.0, 0.1, 3)]
    #[case(-5.0, 0.2, 7)]
    #[case(-10.3, 0.283459, 80)]
    #[case(2.5, -0.5, 6)]
    #[case(0.0, 1.0, 1)]
    fn grid_axis_coordinates_count(#[case] origin: f64,
                                   #[case] step: f64,
                                   #[case] count: usize) {
        let coords = axis_coordinates(origin, step, count);
        assert_eq!(coords.len(), count);
        assert_eq!(coords[0], origin);
    }

    #[test]
    fn grid_axis_coordinates_truncates_end() {
        let coords = axis_coordinates(1.0, 0.1, 3);
        assert_eq!(coords, vec![1.0, 1.1, 1.2]);
    }

    #[test]
    fn grid_axis_coordinates_zero_step() {
        assert_eq!(axis_coordinates(0.5, 0., 4), vec![0.5; 4]);
    }

    #[test]
    fn grid_axis_coordinates_empty() {
        assert!(axis_coordinates(0.5, 0.2, 0).is_empty());
    }

    #[test]
    fn grid_header_steps() {
        let h = Header::new([0.; 3],
                            [[0.2, 0.1, 0.], [0., 0.3, 0.], [0.05, 0., 0.4]],
                            [2, 2, 2]);
        assert_eq!(h.steps(), [0.2, 0.3, 0.4]);
        assert!(!h.is_orthogonal());
        assert!(header([0.; 3], [1.; 3], [1; 3]).is_orthogonal());
    }

    #[test]
    fn grid_new() {
        let grid = Grid::new(&header([0.; 3], [0.5, 0.2, 2.], [3, 4, 5])).unwrap();
        assert_eq!(grid.size, Size { x: 3, y: 4, z: 5, total: 60 });
        assert!((grid.cell_volume - 0.2).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case([0.0, 1.0, -5.0], [0.1, 0.1, 0.2], [10, 3, 7])]
    #[case([-10.3, -10.3, -10.3], [0.283459, 0.283459, 0.283459], [80, 80, 80])]
    #[case([0.0, 0.0, 0.0], [0.1, 0.1, 0.1], [3, 3, 3])]
    fn grid_size_round_trip(#[case] origin: [f64; 3],
                            #[case] steps: [f64; 3],
                            #[case] size: [usize; 3]) {
        let h = header(origin, steps, size);
        let grid = Grid::new(&h).unwrap();
        assert_eq!([grid.size.x, grid.size.y, grid.size.z], h.size);
        assert_eq!(grid.lattice().count(), size[0] * size[1] * size[2]);
    }

    #[test]
    fn grid_lattice_order() {
        let grid = Grid::new(&header([0.; 3], [1.; 3], [2, 2, 2])).unwrap();
        let lattice = grid.lattice().collect::<Vec<[f64; 3]>>();
        assert_eq!(lattice,
                   vec![[0., 0., 0.],
                        [0., 0., 1.],
                        [0., 1., 0.],
                        [0., 1., 1.],
                        [1., 0., 0.],
                        [1., 0., 1.],
                        [1., 1., 0.],
                        [1., 1., 1.]]);
    }

    #[test]
    fn grid_to_cartesian() {
        let grid = Grid::new(&header([1., 2., 3.], [0.5, 1., 2.], [3, 4, 5])).unwrap();
        // ((2 * 4) + 1) * 5 + 3
        assert_eq!(grid.to_3d(48), [2, 1, 3]);
        assert_eq!(grid.to_cartesian(48), [2., 3., 9.]);
        let lattice = grid.lattice().collect::<Vec<[f64; 3]>>();
        assert_eq!(lattice[48], grid.to_cartesian(48));
    }

    #[test]
    fn grid_points() {
        let grid = Grid::new(&header([0.; 3], [1.; 3], [2, 2, 2])).unwrap();
        let rho = [1., -1., 2., -2., 3., -3., 4., -4.];
        let points = grid.points(&rho).unwrap();
        assert_eq!(points.len(), 8);
        assert_eq!(points[5],
                   GridPoint { x: 1.,
                               y: 0.,
                               z: 1.,
                               rho: -3. });
    }

    #[test]
    fn grid_points_shape_mismatch() {
        let grid = Grid::new(&header([0.; 3], [1.; 3], [2, 2, 2])).unwrap();
        match grid.points(&[0.; 7]) {
            Err(Error::ShapeMismatch { expected, found }) => {
                assert_eq!((expected, found), (8, 7))
            }
            _ => panic!("Mismatched density length was accepted"),
        }
    }

    #[test]
    fn grid_zero_step() {
        let grid = Grid::new(&header([0.; 3], [1., 0., 1.], [2, 3, 2])).unwrap();
        assert_eq!(grid.size.total, 12);
        assert_eq!(grid.cell_volume, 0.);
        assert_eq!(grid.coordinates[1], vec![0.; 3]);
    }
}
