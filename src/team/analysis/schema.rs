//! Column label normalization and tier-indicator discovery.
//!
//! Labels are compared after trimming and lower-casing, so `" Team "`,
//! `"TEAM"` and `"team"` all name the same column. When a label appears more
//! than once after normalization the leftmost column is used.

use tracing::debug;

use crate::team::analysis::error::SchemaError;
use crate::team::analysis::model::{Cell, RawTable};

pub const TEAM_COLUMN: &str = "team";
pub const TEAM_SCORE_COLUMN: &str = "team_score";
pub const OPPONENT_SCORE_COLUMN: &str = "opponent_team_score";

/// Columns that must be present, checked in this order.
pub const REQUIRED_COLUMNS: [&str; 3] = [TEAM_COLUMN, TEAM_SCORE_COLUMN, OPPONENT_SCORE_COLUMN];

/// Substrings that mark a label as the tier indicator.
pub const TIER_KEYWORDS: [&str; 3] = ["d1", "division", "tier"];

/// A table whose labels are canonical and whose key columns are resolved to
/// positions.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// 1-based worksheet row of the header, carried over from the raw table.
    pub header_row: usize,
    pub team: usize,
    pub team_score: usize,
    pub opponent_team_score: usize,
    pub tier: usize,
}

impl NormalizedTable {
    /// Normalized label of the chosen tier-indicator column.
    pub fn tier_column(&self) -> &str {
        &self.columns[self.tier]
    }

    /// Cell of `row` in `column`. Short rows read as blank past their end.
    pub fn cell<'a>(&self, row: &'a [Cell], column: usize) -> &'a Cell {
        static BLANK: Cell = Cell::Empty;
        row.get(column).unwrap_or(&BLANK)
    }
}

/// Canonical form of a column label.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Returns the first normalized label containing a tier keyword.
pub fn find_tier_column(columns: &[String]) -> Option<usize> {
    columns
        .iter()
        .position(|column| TIER_KEYWORDS.iter().any(|keyword| column.contains(keyword)))
}

/// Normalizes the labels of `table`, checks the required columns and picks
/// the tier-indicator column. `tier_override` replaces the keyword search.
pub fn normalize(
    table: RawTable,
    tier_override: Option<&str>,
) -> Result<NormalizedTable, SchemaError> {
    let columns: Vec<String> = table.columns.iter().map(|c| normalize_label(c)).collect();

    let position = |name: &str| columns.iter().position(|column| column == name);
    let mut required = [0usize; 3];
    for (slot, name) in required.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = position(name).ok_or_else(|| SchemaError::MissingColumn(name.to_string()))?;
    }

    let tier = match tier_override {
        Some(name) => {
            let name = normalize_label(name);
            position(&name).ok_or(SchemaError::TierColumnNotFound(name))?
        }
        None => find_tier_column(&columns).ok_or(SchemaError::NoTierColumn)?,
    };
    debug!(tier_column = %columns[tier], "resolved tier indicator column");

    let [team, team_score, opponent_team_score] = required;
    Ok(NormalizedTable {
        columns,
        rows: table.rows,
        header_row: table.header_row,
        team,
        team_score,
        opponent_team_score,
        tier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str]) -> RawTable {
        RawTable::new(columns.iter().map(|c| c.to_string()).collect(), Vec::new())
    }

    #[test]
    fn labels_are_trimmed_and_lowercased() {
        let normalized = normalize(
            table(&[" Team ", "TEAM_SCORE", "Opponent_Team_Score ", " Division"]),
            None,
        )
        .unwrap();
        assert_eq!(
            normalized.columns,
            vec!["team", "team_score", "opponent_team_score", "division"]
        );
        assert_eq!(normalized.team, 0);
        assert_eq!(normalized.tier_column(), "division");
    }

    #[test]
    fn reports_first_missing_required_column() {
        let error = normalize(table(&["team", "opponent_team_score", "tier"]), None).unwrap_err();
        assert_eq!(error, SchemaError::MissingColumn("team_score".into()));
        assert!(error.to_string().contains("team_score"));
    }

    #[test]
    fn missing_tier_column_is_rejected() {
        let error = normalize(
            table(&["team", "team_score", "opponent_team_score", "opponent"]),
            None,
        )
        .unwrap_err();
        assert_eq!(error, SchemaError::NoTierColumn);
    }

    #[test]
    fn first_matching_tier_column_wins() {
        let columns: Vec<String> = ["team", "opp_tier", "is_d1", "division"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(find_tier_column(&columns), Some(1));
    }

    #[test]
    fn override_bypasses_keyword_search() {
        let normalized = normalize(
            table(&["team", "team_score", "opponent_team_score", "division", "Power Five"]),
            Some(" power five "),
        )
        .unwrap();
        assert_eq!(normalized.tier_column(), "power five");

        let error = normalize(
            table(&["team", "team_score", "opponent_team_score", "division"]),
            Some("conference"),
        )
        .unwrap_err();
        assert_eq!(error, SchemaError::TierColumnNotFound("conference".into()));
    }
}
