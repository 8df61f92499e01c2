//! Quantifies the Electron Density Shift (EDS) stored in [cube] files. The
//! density shift is the difference in electron density between two states of
//! a molecule, sampled on a regular grid. Integrating it gives the charge
//! gained and lost, and the net charge which should vanish for a converged
//! calculation.
//!
//! ## Installing the binary
//! ### From Source
//! ```sh
//! $ cargo build --verbose --release
//! $ mv ./target/release/eds ~/bin
//! ```
//!
//! ## Usage
//! Quantify a single file:
//! ```sh
//! $ eds -f water_final.cub -c 0.001
//! ```
//! Or every `<name>_final.cub` in the working directory, writing the results
//! to EDS_data.csv:
//! ```sh
//! $ eds -a
//! ```
//! For a detailed list of usage options run
//! ```sh
//! $ eds --help
//! ```
//! ## Output
//! For each file the positive, negative and net integrals are reported along
//! with the net integral as a percentage of the shifted charge. The cutoff
//! integrals only include points above (positive) or below (negative) the
//! cutoff. Integrals are in the units of the cube file.
//!
//! Only orthorhombic grids are supported, the off-diagonal components of the
//! grid vectors are ignored.
//! ## License
//! MIT
//!
//! [cube]: <https://gaussian.com/cubegen/>

/// Integrates the density over the grid into the [EdsStatistics](analysis::EdsStatistics).
pub mod analysis;
/// For parsing command-line arguments.
pub mod arguments;
/// Discovers the cube files of a batch and quantifies them in turn.
pub mod batch;
/// Provides custom errors types.
pub mod errors;
/// Contains [Grid](grid::Grid) for rebuilding the cartesian lattice from the
/// header of a density file.
pub mod grid;
/// Handles the File I/O for both the density file and result files.
/// Provides a [FileFormat](io::FileFormat) trait to be implemented by modules designed to
/// cover a specific file format of a density file.
pub mod io;
/// Provides a hideable [Bar](progress::Bar) for tracking the calculation.
pub mod progress;
