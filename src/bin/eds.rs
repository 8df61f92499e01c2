use anyhow::{Context, Result};
use eds::analysis::quantify;
use eds::arguments::{Args, ClapApp, Mode};
use eds::batch;
use eds::io::{self, FileFormat};
use eds::progress::Bar;

fn main() -> Result<()> {
    // argument parsing
    let app = ClapApp::get();
    let args = Args::new(app.get_matches()).context("Invalid arguments")?;
    // warnings are shown by default, each -v adds a level
    stderrlog::new().module(module_path!())
                    .quiet(args.quiet)
                    .verbosity(args.verbosity + 1)
                    .init()
                    .context("Failed to start the logger")?;
    let file_type: Box<dyn FileFormat> = Box::new(io::cube::Cube {});
    match args.mode {
        Mode::Single(path) => {
            let pbar = Bar::maybe_visible(!args.quiet,
                                          0,
                                          String::from("Integrating: "));
            let stats = quantify(file_type.as_ref(), &path, args.cutoff, &pbar)
                .with_context(|| format!("Failed to quantify {}", path.display()))?;
            drop(pbar);
            print!("{}", io::output::single_file(&stats));
        }
        Mode::Batch => {
            let files = batch::find_files(&args.directory).with_context(|| {
                            format!("Failed to search {}", args.directory.display())
                        })?;
            let pbar = Bar::maybe_visible(!args.quiet,
                                          files.len() as u64,
                                          String::from("Quantifying: "));
            let rows = batch::run(file_type.as_ref(), &files, args.cutoff, &pbar)?;
            drop(pbar);
            io::output::write_summary(&rows, &args.output).with_context(|| {
                format!("Failed to write {}", args.output.display())
            })?;
            if !rows.is_empty() {
                println!("{}", io::output::summary_table(&rows));
            }
            println!("Summary of {} files written to {}.",
                     rows.len(),
                     args.output.display());
        }
    }
    Ok(())
}
