use crate::errors::Result;
use crate::grid::Header;
use std::path::Path;

pub mod cube;
pub mod output;
pub mod reader;

/// An atom listed in the header of a density file.
#[derive(Clone, Debug, PartialEq)]
pub struct Atom {
    /// The atomic number.
    pub number: i32,
    /// The nuclear charge column of the file.
    pub charge: f64,
    /// The cartesian position of the atom.
    pub position: [f64; 3],
}

/// Everything read from a density file.
pub struct Density {
    /// The lattice geometry.
    pub header: Header,
    /// The atoms of the structure.
    pub atoms: Vec<Atom>,
    /// The flattened density, z varying fastest.
    pub rho: Vec<f64>,
}

/// Trait for reading a density file format into a [`Density`].
pub trait FileFormat {
    /// Reads the file at `path`, failing with [`crate::errors::Error::FileFormat`]
    /// if it is malformed.
    fn read(&self, path: &Path) -> Result<Density>;
}
