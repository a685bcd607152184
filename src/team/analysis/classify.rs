use tracing::{debug, warn};

use crate::team::analysis::error::{AnalysisError, Result};
use crate::team::analysis::model::{Cell, ClassifiedGame, Outcome, TierFlag};
use crate::team::analysis::schema::NormalizedTable;

/// Maps a tier-indicator cell onto the closed flag variant.
///
/// Text is matched case-insensitively against `yes`/`no`; booleans are used
/// as-is; numbers are flagged when non-zero. Blank cells and any other text
/// yield [`TierFlag::Unknown`].
pub fn coerce_tier_flag(cell: &Cell) -> TierFlag {
    match cell {
        Cell::Text(value) => match value.trim().to_lowercase().as_str() {
            "yes" => TierFlag::Flagged,
            "no" => TierFlag::NotFlagged,
            _ => TierFlag::Unknown,
        },
        Cell::Bool(true) => TierFlag::Flagged,
        Cell::Bool(false) => TierFlag::NotFlagged,
        Cell::Number(value) if value.is_nan() => TierFlag::Unknown,
        Cell::Number(value) if *value != 0.0 => TierFlag::Flagged,
        Cell::Number(_) => TierFlag::NotFlagged,
        Cell::Empty => TierFlag::Unknown,
    }
}

/// Text that spreadsheet exports use for a missing number.
const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Reads a score cell. Blank cells and the usual missing-value markers are
/// missing values; numeric text is accepted. Non-finite values are rejected.
pub fn parse_score(cell: &Cell, row: usize, column: &str) -> Result<Option<f64>> {
    let invalid = || AnalysisError::InvalidScore {
        row,
        column: column.to_string(),
        value: cell.to_string(),
    };
    match cell {
        Cell::Number(value) if value.is_nan() => Ok(None),
        Cell::Number(value) if value.is_finite() => Ok(Some(*value)),
        Cell::Empty => Ok(None),
        Cell::Text(value) if value.trim().is_empty() => Ok(None),
        Cell::Text(value) if MISSING_MARKERS.contains(&value.trim()) => Ok(None),
        Cell::Text(value) => match value.trim().parse::<f64>() {
            Ok(score) if score.is_finite() => Ok(Some(score)),
            _ => Err(invalid()),
        },
        Cell::Number(_) | Cell::Bool(_) => Err(invalid()),
    }
}

/// Derives the tier flag and outcome of every non-blank row.
pub fn classify(table: &NormalizedTable) -> Result<Vec<ClassifiedGame>> {
    let mut games = Vec::with_capacity(table.rows.len());
    let mut unknown = 0usize;

    for (index, cells) in table.rows.iter().enumerate() {
        if cells.iter().all(Cell::is_blank) {
            continue;
        }
        let row = table.header_row + index + 1;

        let team_score = parse_score(
            table.cell(cells, table.team_score),
            row,
            &table.columns[table.team_score],
        )?;
        let opponent_team_score = parse_score(
            table.cell(cells, table.opponent_team_score),
            row,
            &table.columns[table.opponent_team_score],
        )?;

        let tier_cell = table.cell(cells, table.tier);
        let tier_flag = coerce_tier_flag(tier_cell);
        if tier_flag == TierFlag::Unknown {
            unknown += 1;
            debug!(row, value = %tier_cell, "unrecognised tier indicator");
        }

        games.push(ClassifiedGame {
            row,
            team: table.cell(cells, table.team).to_string(),
            team_score,
            opponent_team_score,
            tier_flag,
            outcome: Outcome::from_scores(team_score, opponent_team_score),
        });
    }

    if unknown > 0 {
        warn!(
            unknown,
            column = table.tier_column(),
            "tier indicator values neither yes nor no"
        );
    }
    Ok(games)
}
