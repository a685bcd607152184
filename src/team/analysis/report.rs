use std::io::Write;
use std::path::Path;

use crate::team::analysis::error::Result;
use crate::team::analysis::io::csv_write::RESULT_COLUMNS;
use crate::team::analysis::model::{TeamAggregate, format_points};

/// Title printed above the results table.
pub const RESULTS_TITLE: &str = "=== Team Analysis Results ===";

/// Prints the header labels exactly as they were read from the workbook.
pub fn print_columns<W: Write>(out: &mut W, columns: &[String]) -> Result<()> {
    writeln!(out, "Available Columns in Dataset:")?;
    let quoted: Vec<String> = columns.iter().map(|c| format!("{c:?}")).collect();
    writeln!(out, "[{}]", quoted.join(", "))?;
    Ok(())
}

/// Prints the titled results table.
pub fn print_results<W: Write>(out: &mut W, teams: &[TeamAggregate]) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{RESULTS_TITLE}")?;
    write!(out, "{}", render_table(teams))?;
    Ok(())
}

/// Prints the confirmation line naming the results file.
pub fn print_saved<W: Write>(out: &mut W, path: &Path) -> Result<()> {
    writeln!(out, "Results saved to {}.", path.display())?;
    Ok(())
}

/// Lays the aggregate table out in aligned columns. The team column is
/// left-aligned, the numeric columns right-aligned.
pub fn render_table(teams: &[TeamAggregate]) -> String {
    let rows: Vec<[String; 5]> = teams
        .iter()
        .map(|team| {
            [
                team.team.clone(),
                format_points(team.total_points_scored),
                format_points(team.total_points_allowed),
                team.total_wins.to_string(),
                team.total_losses.to_string(),
            ]
        })
        .collect();

    let mut widths = RESULT_COLUMNS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut rendered = String::new();
    let header = RESULT_COLUMNS.map(str::to_string);
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(index, (cell, width))| {
                if index == 0 {
                    format!("{cell:<width$}")
                } else {
                    format!("{cell:>width$}")
                }
            })
            .collect();
        rendered.push_str(line.join("  ").trim_end());
        rendered.push('\n');
    }
    rendered
}
