use crate::errors::{Error, Result};
use crate::grid::Header;
use crate::io::reader::BufReader;
use crate::io::{Atom, Density, FileFormat};
use log::{debug, info, warn};
use std::io;
use std::path::Path;
use std::str::FromStr;

/// The Gaussian cube file format.
pub struct Cube {}

impl FileFormat for Cube {
    fn read(&self, path: &Path) -> Result<Density> {
        read(path)
    }
}

/// Bytes that are not UTF-8 make the file malformed, not unreadable.
fn read_error(path: &Path, error: io::Error) -> Error {
    match error.kind() {
        io::ErrorKind::InvalidData => Error::format(path, "file is not valid text"),
        _ => Error::Io(error),
    }
}

/// Reads the next line, treating the end of the file as malformed input.
fn next_line<'buf>(reader: &mut BufReader,
                   buffer: &'buf mut String,
                   path: &Path)
                   -> Result<&'buf str> {
    match reader.read_line(buffer) {
        Some(line) => {
            let (text, _) = line.map_err(|e| read_error(path, e))?;
            Ok(text.trim())
        }
        None => Err(Error::format(path,
                                  format!("unexpected end of file at line {}",
                                          reader.line_number()))),
    }
}

/// Parses every whitespace separated value of a header line.
fn parse_line<T: FromStr>(text: &str,
                          minimum: usize,
                          line: usize,
                          path: &Path)
                          -> Result<Vec<T>> {
    let values = text.split_whitespace()
                     .map(|x| x.parse::<T>())
                     .collect::<std::result::Result<Vec<T>, _>>()
                     .map_err(|_| {
                         Error::format(path,
                                       format!("unparsable value on line {}", line))
                     })?;
    if values.len() < minimum {
        return Err(Error::format(path,
                                 format!("expected {} values on line {}, found {}",
                                         minimum,
                                         line,
                                         values.len())));
    }
    Ok(values)
}

/// Reads a line holding an integer count followed by floats.
fn count_line(reader: &mut BufReader,
              buffer: &mut String,
              path: &Path,
              floats: usize)
              -> Result<(isize, Vec<f64>)> {
    let text = next_line(reader, buffer, path)?;
    let line = reader.line_number();
    let mut split = text.splitn(2, char::is_whitespace);
    let count = split.next()
                     .unwrap_or_default()
                     .parse::<isize>()
                     .map_err(|_| {
                         Error::format(path,
                                       format!("unparsable count on line {}", line))
                     })?;
    let values = parse_line::<f64>(split.next().unwrap_or_default(),
                                   floats,
                                   line,
                                   path)?;
    Ok((count, values))
}

/// Read a cube formatted density into its [`Header`], atoms and flattened
/// density. Values are kept in the units of the file.
pub fn read(path: &Path) -> Result<Density> {
    info!("Reading {} as cube format.", path.display());
    let mut reader = BufReader::open(path)?;
    let mut buffer = String::new();
    // first two lines are comments
    for _ in 0..2 {
        let _ = next_line(&mut reader, &mut buffer, path)?;
    }
    let (natoms, values) = count_line(&mut reader, &mut buffer, path, 3)?;
    if values.len() > 3 && values[3] != 1. {
        return Err(Error::format(path, "multiple values per voxel are not supported"));
    }
    let origin = [values[0], values[1], values[2]];
    let mut size = [0usize; 3];
    let mut axes = [[0f64; 3]; 3];
    for (n, axis) in size.iter_mut().zip(axes.iter_mut()) {
        let (count, vector) = count_line(&mut reader, &mut buffer, path, 3)?;
        if count == 0 {
            return Err(Error::format(path,
                                     format!("zero grid points on line {}",
                                             reader.line_number())));
        }
        // a negative count marks a header in Angstrom
        if count < 0 {
            debug!("{} has its grid in Angstrom.", path.display());
        }
        *n = count.unsigned_abs();
        *axis = [vector[0], vector[1], vector[2]];
    }
    let header = Header::new(origin, axes, size);
    if !header.is_orthogonal() {
        warn!("{} has a non-orthogonal grid, only the diagonal steps are used.",
              path.display());
    }
    // the atom count is untrusted so the list grows as lines are read
    let mut atoms = Vec::new();
    for _ in 0..natoms.unsigned_abs() {
        let (number, values) = count_line(&mut reader, &mut buffer, path, 4)?;
        let number = i32::try_from(number).map_err(|_| {
                         Error::format(path,
                                       format!("atomic number out of range on line {}",
                                               reader.line_number()))
                     })?;
        atoms.push(Atom { number,
                          charge: values[0],
                          position: [values[1], values[2], values[3]] });
    }
    // orbital cubes list the orbitals stored after the atoms
    if natoms < 0 {
        let text = next_line(&mut reader, &mut buffer, path)?;
        let orbitals = parse_line::<isize>(text, 1, reader.line_number(), path)?;
        if orbitals[0] != 1 {
            return Err(Error::format(path, "multiple values per voxel are not supported"));
        }
    }
    let expected = size[0].checked_mul(size[1])
                          .and_then(|xy| xy.checked_mul(size[2]))
                          .ok_or(Error::GridTooLarge(size))?;
    let _ = reader.read_to_end(&mut buffer)
                  .map_err(|e| read_error(path, e))?;
    // a value and its separator take two bytes, bounding the header's claim
    let mut rho = Vec::with_capacity(expected.min(buffer.len() / 2));
    for value in buffer.split_whitespace() {
        let v = value.parse::<f64>()
                     .map_err(|_| {
                         Error::format(path,
                                       format!("unparsable density value \"{}\"", value))
                     })?;
        rho.push(v);
    }
    if rho.len() != expected {
        return Err(Error::format(path,
                                 format!("expected {} density values, found {}",
                                         expected,
                                         rho.len())));
    }
    info!("Read {} atoms on a {}x{}x{} grid.",
          atoms.len(),
          size[0],
          size[1],
          size[2]);
    Ok(Density { header, atoms, rho })
}
