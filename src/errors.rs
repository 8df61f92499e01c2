use std::path::PathBuf;

/// Type alias for Result<T, eds::errors::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the library.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Invalid or contradictory command-line arguments.
    #[error("usage error: {0}")]
    Usage(String),

    /// The file given for single-file mode does not exist.
    #[error("the file \"{}\" does not exist", .0.display())]
    FileNotFound(PathBuf),

    /// The cube file could not be understood.
    #[error("cannot read \"{}\" as a cube file: {reason}", .path.display())]
    FileFormat { path: PathBuf, reason: String },

    /// The reconstructed lattice and the density array disagree in length.
    #[error("inconsistent number of grid points (expected {expected:?}, found {found:?})")]
    ShapeMismatch { expected: usize, found: usize },

    /// The number of grid points overflows the address space.
    #[error("grid of size {0:?} is too large")]
    GridTooLarge([usize; 3]),

    /// A file in a batch failed, aborting the batch.
    #[error("failed to quantify \"{}\"", .path.display())]
    Batch {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("failed input/output stream")]
    Io(#[from] std::io::Error),

    #[error("failed to write the summary table")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Shorthand for building a [`Error::FileFormat`].
    pub fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FileFormat { path: path.into(),
                           reason: reason.into() }
    }
}
