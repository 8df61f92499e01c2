use crate::analysis::EdsStatistics;
use crate::batch::SummaryRow;
use crate::errors::Result;
use prettytable::{format, row, Row, Table};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// The header of the batch summary table.
pub const COLUMNS: [&str; 7] = ["File_name",
                                "EDS_total_positive",
                                "EDS_total_negative",
                                "EDS_total",
                                "EDS_error",
                                "EDS_cutoff_positive",
                                "EDS_cutoff_negative"];

/// Formats the statistics of a single file for the console.
pub fn single_file(stats: &EdsStatistics) -> String {
    format!("EDS total positive: {:.6}\n\
             EDS total negative: {:.6}\n\
             EDS total: {}\n\
             EDS total error: {:.2}%\n\
             EDS cutoff positive: {:.6}\n\
             EDS cutoff negative: {:.6}\n",
            stats.total_positive,
            stats.total_negative,
            stats.total,
            stats.error,
            stats.cutoff_positive,
            stats.cutoff_negative)
}

/// Writes the batch summary as comma separated values, header first.
///
/// * `rows`: One row per file, in the order they will be written.
/// * `writer`: Where to write the table.
pub fn summary_csv<W: Write>(rows: &[SummaryRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(COLUMNS)?;
    for row in rows {
        let stats = &row.stats;
        csv_writer.write_record(&[row.name.clone(),
                                  stats.total_positive.to_string(),
                                  stats.total_negative.to_string(),
                                  stats.total.to_string(),
                                  stats.error.to_string(),
                                  stats.cutoff_positive.to_string(),
                                  stats.cutoff_negative.to_string()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the batch summary to `filename`.
pub fn write_summary(rows: &[SummaryRow], filename: &Path) -> Result<()> {
    let file = File::create(filename)?;
    summary_csv(rows, file)
}

/// Creates a format for the console summary table.
pub fn table_format() -> format::TableFormat {
    let line_position =
        &[format::LinePosition::Title, format::LinePosition::Bottom];
    let line_separator = format::LineSeparator::new('-', '+', '+', '+');
    format::FormatBuilder::new().column_separator('|')
                                .separators(line_position, line_separator)
                                .padding(1, 1)
                                .build()
}

/// The titles of the console summary table.
fn titles() -> Row {
    row![c => "File", "Positive", "Negative", "Total", "Error (%)", "Cutoff Pos.", "Cutoff Neg."]
}

/// Builds the batch summary as a table for printing to the console.
pub fn summary_table(rows: &[SummaryRow]) -> Table {
    let mut table = Table::new();
    table.set_format(table_format());
    table.set_titles(titles());
    for summary in rows {
        let stats = &summary.stats;
        table.add_row(row![r => summary.name,
                           format!("{:.6}", stats.total_positive),
                           format!("{:.6}", stats.total_negative),
                           format!("{:.6}", stats.total),
                           format!("{:.2}", stats.error),
                           format!("{:.6}", stats.cutoff_positive),
                           format!("{:.6}", stats.cutoff_negative)]);
    }
    table
}
