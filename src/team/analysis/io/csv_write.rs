use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{info, instrument};

use crate::team::analysis::error::Result;
use crate::team::analysis::model::TeamAggregate;

/// Header row of the results file.
pub const RESULT_COLUMNS: [&str; 5] = [
    "team",
    "total_points_scored",
    "total_points_allowed",
    "total_wins",
    "total_losses",
];

/// Writes the aggregate table as CSV to `path`.
///
/// Rows go to a temporary file next to `path` which replaces the destination
/// only once everything is flushed; on failure the temporary file is removed
/// and `path` is left untouched.
#[instrument(level = "info", skip_all, fields(output = %path.display()))]
pub fn write_results(path: &Path, teams: &[TeamAggregate]) -> Result<()> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staging = NamedTempFile::new_in(directory)?;

    write_csv(&mut staging, teams)?;
    staging.as_file().sync_all()?;
    staging.persist(path).map_err(|error| error.error)?;

    info!(team_count = teams.len(), "results written");
    Ok(())
}

/// Serializes the header and one record per team into `writer`.
pub fn write_csv<W: Write>(writer: W, teams: &[TeamAggregate]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(RESULT_COLUMNS)?;
    for team in teams {
        csv_writer.serialize(team)?;
    }
    csv_writer.flush()?;
    Ok(())
}
