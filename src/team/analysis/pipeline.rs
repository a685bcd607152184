use std::io::Write;
use std::path::PathBuf;

use tracing::{info, instrument};

use crate::team::analysis::aggregate::{self, UnknownTierPolicy};
use crate::team::analysis::classify;
use crate::team::analysis::error::Result;
use crate::team::analysis::io::{csv_write, excel_read};
use crate::team::analysis::model::{RawTable, TeamAggregate};
use crate::team::analysis::report;
use crate::team::analysis::schema;

/// Workbook read when no input is given.
pub const DEFAULT_INPUT: &str = "games_2022.xlsx";
/// Results file written when no output is given.
pub const DEFAULT_OUTPUT: &str = "team_analysis_results.csv";

/// Settings for a single analysis run. The defaults reproduce the fixed file
/// names and the keyword-based tier detection.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Explicit tier-indicator column, bypassing keyword detection.
    pub tier_column: Option<String>,
    pub unknown_tier: UnknownTierPolicy,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            tier_column: None,
            unknown_tier: UnknownTierPolicy::default(),
        }
    }
}

/// Runs the whole analysis: load, normalize, classify, filter, aggregate,
/// report to `out` and write the results file.
///
/// Nothing is written to `options.output` unless every earlier stage
/// succeeded.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %options.input.display(), output = %options.output.display())
)]
pub fn run<W: Write>(options: &AnalysisOptions, out: &mut W) -> Result<Vec<TeamAggregate>> {
    let table = excel_read::read_table(&options.input)?;
    report::print_columns(out, &table.columns)?;

    let teams = analyze(table, options)?;

    report::print_results(out, &teams)?;
    csv_write::write_results(&options.output, &teams)?;
    report::print_saved(out, &options.output)?;
    Ok(teams)
}

/// The in-memory part of the pipeline, from loaded sheet to team totals.
pub fn analyze(table: RawTable, options: &AnalysisOptions) -> Result<Vec<TeamAggregate>> {
    let normalized = schema::normalize(table, options.tier_column.as_deref())?;
    let games = classify::classify(&normalized)?;
    info!(
        game_count = games.len(),
        tier_column = normalized.tier_column(),
        "classified games"
    );
    let kept = aggregate::retain_games(games, options.unknown_tier);
    Ok(aggregate::aggregate(&kept))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::analysis::error::{AnalysisError, SchemaError};
    use crate::team::analysis::model::Cell;

    fn text(value: &str) -> Cell {
        Cell::Text(value.to_string())
    }

    fn raw(columns: &[&str], rows: Vec<Vec<Cell>>) -> RawTable {
        RawTable::new(columns.iter().map(|c| c.to_string()).collect(), rows)
    }

    #[test]
    fn flagged_wins_are_excluded_from_totals() {
        let table = raw(
            &["Team", "Opponent", "Team_Score", "Opponent_Team_Score", "Division"],
            vec![
                vec![text("TeamX"), text("A"), Cell::Number(10.0), Cell::Number(7.0), text("yes")],
                vec![text("TeamX"), text("B"), Cell::Number(3.0), Cell::Number(20.0), text("yes")],
                vec![text("TeamY"), text("C"), Cell::Number(14.0), Cell::Number(10.0), text("no")],
            ],
        );
        let teams = analyze(table, &AnalysisOptions::default()).unwrap();

        assert_eq!(
            teams,
            vec![
                TeamAggregate {
                    team: "TeamX".into(),
                    total_points_scored: 3.0,
                    total_points_allowed: 20.0,
                    total_wins: 0,
                    total_losses: 1,
                },
                TeamAggregate {
                    team: "TeamY".into(),
                    total_points_scored: 14.0,
                    total_points_allowed: 10.0,
                    total_wins: 1,
                    total_losses: 0,
                },
            ]
        );
    }

    #[test]
    fn numeric_tier_values_behave_like_yes_and_no() {
        let table = raw(
            &["team", "team_score", "opponent_team_score", "is_d1"],
            vec![
                vec![text("TeamX"), Cell::Number(10.0), Cell::Number(7.0), Cell::Number(1.0)],
                vec![text("TeamX"), Cell::Number(9.0), Cell::Number(2.0), Cell::Number(0.0)],
            ],
        );
        let teams = analyze(table, &AnalysisOptions::default()).unwrap();

        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].total_points_scored, 9.0);
        assert_eq!((teams[0].total_wins, teams[0].total_losses), (1, 0));
    }

    #[test]
    fn hand_built_short_rows_do_not_panic() {
        let table = RawTable {
            columns: ["team", "team_score", "opponent_team_score", "division"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            rows: vec![vec![text("TeamX"), Cell::Number(3.0)]],
            header_row: 1,
        };
        let teams = analyze(table, &AnalysisOptions::default()).unwrap();

        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].total_points_scored, 3.0);
        assert_eq!(teams[0].total_points_allowed, 0.0);
        assert_eq!((teams[0].total_wins, teams[0].total_losses), (0, 1));
    }

    #[test]
    fn nan_text_scores_count_as_missing() {
        let table = raw(
            &["team", "team_score", "opponent_team_score", "division"],
            vec![
                vec![text("TeamX"), text("NaN"), Cell::Number(3.0), text("no")],
                vec![text("TeamX"), Cell::Number(10.0), text("nan"), text("no")],
            ],
        );
        let teams = analyze(table, &AnalysisOptions::default()).unwrap();

        assert!(teams[0].total_points_scored.is_finite());
        assert_eq!(teams[0].total_points_scored, 10.0);
        assert_eq!(teams[0].total_points_allowed, 3.0);
        assert_eq!((teams[0].total_wins, teams[0].total_losses), (0, 2));
    }

    #[test]
    fn schema_failures_surface_as_schema_errors() {
        let table = raw(&["team", "opponent_team_score", "tier"], Vec::new());
        let error = analyze(table, &AnalysisOptions::default()).unwrap_err();

        assert!(error.is_schema_error());
        assert!(matches!(
            error,
            AnalysisError::Schema(SchemaError::MissingColumn(ref name)) if name == "team_score"
        ));
    }
}
