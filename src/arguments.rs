use crate::errors::{Error, Result};
use clap::{crate_authors, crate_version, Arg, ArgGroup, ArgMatches, Command};
use std::path::PathBuf;

/// The default threshold for the cutoff integrals.
pub const DEFAULT_CUTOFF: f64 = 0.001;
/// Where the batch summary is written unless told otherwise.
pub const DEFAULT_OUTPUT: &str = "EDS_data.csv";

/// Indicates whether to quantify one file or every file in a directory
#[derive(Clone, Debug, PartialEq)]
pub enum Mode {
    Single(PathBuf),
    Batch,
}

/// Create a container for dealing with clap and being able to test arg parsing
pub struct ClapApp {}

impl ClapApp {
    /// Create and return the clap::Command
    pub fn get() -> Command<'static> {
        Command::new("Electron Density Shift Quantification")
            .author(crate_authors!())
            .version(crate_version!())
            .arg(Arg::new("filename")
                .short('f')
                .long("filename")
                .takes_value(true)
                .value_name("FILE")
                .help("The cube file containing the density shift."))
            .arg(Arg::new("all")
                .short('a')
                .long("all")
                .takes_value(false)
                .help("Quantify every <name>_final.cub file in the directory.")
                .long_help(
"Quantify every cube file named <name>_final.cub in the working directory, or
the directory given with --directory. The results are written as a table to
the file given with --output."))
            .group(ArgGroup::new("mode")
                .args(&["filename", "all"])
                .required(true))
            .arg(Arg::new("cutoff")
                .short('c')
                .long("cutoff")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0.001")
                .help("Cutoff for the density shift.")
                .long_help(
"Values of the density shift above the cutoff are summed into the cutoff
positive integral and values below it into the cutoff negative integral. A
single value bounds both integrals."))
            .arg(Arg::new("output")
                .short('o')
                .long("output")
                .takes_value(true)
                .default_value(DEFAULT_OUTPUT)
                .help("File to write the batch summary to."))
            .arg(Arg::new("directory")
                .short('d')
                .long("directory")
                .takes_value(true)
                .requires("all")
                .help("Directory to search in batch mode [default: .]"))
            .arg(Arg::new("verbose")
                .short('v')
                .long("verbose")
                .multiple_occurrences(true)
                .help("Increase the logging output, can be repeated."))
            .arg(Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Silence logging and progress bars."))
    }
}

/// Holds the arguments passed to the program from the command-line
pub struct Args {
    pub mode: Mode,
    pub cutoff: f64,
    pub output: PathBuf,
    pub directory: PathBuf,
    pub verbosity: usize,
    pub quiet: bool,
}

impl Args {
    /// Initialises the structure from the command-line arguments.
    pub fn new(arguments: ArgMatches) -> Result<Self> {
        let mode = match (arguments.value_of("filename"), arguments.is_present("all")) {
            (Some(_), true) => {
                return Err(Error::Usage(String::from(
                    "a filename cannot be given with the --all option")))
            }
            (None, false) => {
                return Err(Error::Usage(String::from(
                    "either a filename or the --all option is required")))
            }
            (Some(f), false) => {
                let path = PathBuf::from(f);
                if !path.exists() {
                    return Err(Error::FileNotFound(path));
                }
                Mode::Single(path)
            }
            (None, true) => Mode::Batch,
        };
        let cutoff = match arguments.value_of("cutoff") {
            Some(s) => s.parse::<f64>().map_err(|_| {
                           Error::Usage(format!("couldn't parse cutoff \"{}\" into float", s))
                       })?,
            None => DEFAULT_CUTOFF,
        };
        let output = PathBuf::from(arguments.value_of("output").unwrap_or(DEFAULT_OUTPUT));
        let directory = PathBuf::from(arguments.value_of("directory").unwrap_or("."));
        let verbosity = arguments.occurrences_of("verbose") as usize;
        let quiet = arguments.is_present("quiet");
        Ok(Self { mode,
                  cutoff,
                  output,
                  directory,
                  verbosity,
                  quiet })
    }
}
