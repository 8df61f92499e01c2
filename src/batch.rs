use crate::analysis::{quantify, EdsStatistics};
use crate::errors::{Error, Result};
use crate::io::FileFormat;
use crate::progress::Bar;
use log::{debug, info};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// File names picked up in batch mode, `<name>_final.cub`.
pub const FINAL_CUBE: &str = r"^.+_final\.cub$";

/// One row of the batch summary table.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryRow {
    /// The file name up to its first `.`.
    pub name: String,
    pub stats: EdsStatistics,
}

/// Finds every `<name>_final.cub` file in `directory`, sorted by file name.
pub fn find_files(directory: &Path) -> Result<Vec<PathBuf>> {
    // safe to unwrap as the pattern is a valid constant
    let pattern = Regex::new(FINAL_CUBE).unwrap();
    let mut files = Vec::new();
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matched = path.file_name()
                          .and_then(|name| name.to_str())
                          .map_or(false, |name| pattern.is_match(name));
        if matched {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    info!("Found {} cube files in {}.", files.len(), directory.display());
    Ok(files)
}

/// The name of a file as it appears in the summary table.
pub fn row_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default()
        .split('.')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Quantifies each file in turn, stopping at the first failure.
///
/// * `file_type`: The reader for the files.
/// * `files`: The files to quantify, in the order of the table.
/// * `cutoff`: The threshold for the cutoff integrals.
/// * `progress_bar`: Ticked once per file.
pub fn run(file_type: &dyn FileFormat,
           files: &[PathBuf],
           cutoff: f64,
           progress_bar: &Bar)
           -> Result<Vec<SummaryRow>> {
    let mut rows = Vec::with_capacity(files.len());
    for path in files {
        let grid_bar = Bar::new(0, String::new());
        let stats = quantify(file_type, path, cutoff, &grid_bar).map_err(|e| {
                        Error::Batch { path: path.clone(),
                                       source: Box::new(e) }
                    })?;
        let name = row_name(path);
        debug!("{}: {:?}", name, stats);
        rows.push(SummaryRow { name, stats });
        progress_bar.tick();
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Header;
    use crate::io::cube::Cube;
    use crate::io::Density;
    use std::cell::RefCell;

    /// Hands out uniform densities without touching the disk.
    struct Uniform {
        read: RefCell<Vec<PathBuf>>,
    }

    impl FileFormat for Uniform {
        fn read(&self, path: &Path) -> Result<Density> {
            self.read.borrow_mut().push(path.to_path_buf());
            if path.ends_with("broken_final.cub") {
                return Err(Error::format(path, "unexpected end of file at line 3"));
            }
            Ok(Density { header: Header::new([0.; 3],
                                             [[1., 0., 0.], [0., 1., 0.], [0., 0., 1.]],
                                             [2, 2, 2]),
                         atoms: vec![],
                         rho: vec![0.5; 8] })
        }
    }

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("eds-batch-{}-{}",
                                                    name,
                                                    std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn batch_row_name() {
        assert_eq!(row_name(Path::new("./h2o_final.cub")), "h2o_final");
        assert_eq!(row_name(Path::new("dir/a.b_final.cub")), "a");
    }

    #[test]
    fn batch_find_files() {
        let files = find_files(Path::new("tests/batch")).unwrap();
        let names = files.iter()
                         .map(|f| f.file_name().unwrap().to_str().unwrap())
                         .collect::<Vec<&str>>();
        assert_eq!(names, vec!["acetone_final.cub", "benzene_final.cub"]);
    }

    #[test]
    fn batch_find_files_empty() {
        let dir = scratch("empty");
        fs::write(dir.join("water.cub"), "").unwrap();
        fs::write(dir.join("water_final.cube"), "").unwrap();
        fs::create_dir(dir.join("dir_final.cub")).unwrap();
        assert!(find_files(&dir).unwrap().is_empty());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn batch_run_order() {
        let reader = Uniform { read: RefCell::new(vec![]) };
        let files = vec![PathBuf::from("a_final.cub"), PathBuf::from("b_final.cub")];
        let bar = Bar::new(2, String::new());
        let rows = run(&reader, &files, 1E-3, &bar).unwrap();
        assert_eq!(rows.iter().map(|r| r.name.as_str()).collect::<Vec<&str>>(),
                   vec!["a_final", "b_final"]);
        assert_eq!(rows[0].stats.total_positive, 4.);
        assert_eq!(rows[0].stats.error, 100.);
        assert_eq!(bar.position(), 2);
    }

    #[test]
    fn batch_run_aborts() {
        let reader = Uniform { read: RefCell::new(vec![]) };
        let files = vec![PathBuf::from("a_final.cub"),
                         PathBuf::from("broken_final.cub"),
                         PathBuf::from("c_final.cub")];
        let bar = Bar::new(3, String::new());
        match run(&reader, &files, 1E-3, &bar) {
            Err(Error::Batch { path, .. }) => {
                assert_eq!(path, PathBuf::from("broken_final.cub"))
            }
            _ => panic!("Broken file did not abort the batch"),
        }
        assert_eq!(reader.read.borrow().len(), 2);
    }

    #[test]
    fn batch_run_empty() {
        let bar = Bar::new(0, String::new());
        assert!(run(&Cube {}, &[], 1E-3, &bar).unwrap().is_empty());
    }
}
