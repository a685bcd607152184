use std::fmt;

use serde::{Serialize, Serializer};

/// A single cell of the loaded sheet, reduced to the shapes the analysis
/// cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Blank cell or a cell past the end of a short row.
    Empty,
    /// Plain text.
    Text(String),
    /// Any numeric cell. Integer cells are widened to `f64`.
    Number(f64),
    /// Native boolean cell.
    Bool(bool),
}

impl Cell {
    /// Returns `true` for blank cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(value) => value.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(value) => write!(f, "{value}"),
            Cell::Number(value) => write!(f, "{}", format_points(*value)),
            Cell::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// In-memory copy of the first worksheet. `columns` holds the header row as
/// it appears in the file; rows built through [`RawTable::new`] are padded to
/// the header width.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// 1-based worksheet row holding the header.
    pub header_row: usize,
}

impl RawTable {
    /// Builds a table, padding or truncating rows to the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();
        Self {
            columns,
            rows,
            header_row: 1,
        }
    }

    /// Records where the header sits when the sheet does not start at row 1.
    pub fn with_header_row(mut self, header_row: usize) -> Self {
        self.header_row = header_row;
        self
    }
}

impl Default for RawTable {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

/// Whether a game was played against an opponent from the flagged tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierFlag {
    Flagged,
    NotFlagged,
    /// The indicator cell was blank or held unrecognised text.
    Unknown,
}

/// Result of a single game from the point of view of `team`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    /// A game is a win only when the team strictly outscored the opponent.
    /// Ties and missing scores are losses.
    pub fn from_scores(team_score: Option<f64>, opponent_team_score: Option<f64>) -> Self {
        match (team_score, opponent_team_score) {
            (Some(scored), Some(allowed)) if scored > allowed => Outcome::Win,
            _ => Outcome::Loss,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::Loss => write!(f, "loss"),
        }
    }
}

/// One input row after classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedGame {
    /// 1-based worksheet row, header included.
    pub row: usize,
    pub team: String,
    /// `None` when the score cell was blank.
    pub team_score: Option<f64>,
    pub opponent_team_score: Option<f64>,
    pub tier_flag: TierFlag,
    pub outcome: Outcome,
}

impl ClassifiedGame {
    /// Wins against a flagged opponent are excluded from the totals.
    pub fn is_flagged_win(&self) -> bool {
        self.tier_flag == TierFlag::Flagged && self.outcome == Outcome::Win
    }
}

/// Per-team totals written to the results file. Field order matches the CSV
/// header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAggregate {
    pub team: String,
    #[serde(serialize_with = "serialize_points")]
    pub total_points_scored: f64,
    #[serde(serialize_with = "serialize_points")]
    pub total_points_allowed: f64,
    pub total_wins: usize,
    pub total_losses: usize,
}

impl TeamAggregate {
    /// Creates an empty aggregate for `team`.
    pub fn new(team: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            total_points_scored: 0.0,
            total_points_allowed: 0.0,
            total_wins: 0,
            total_losses: 0,
        }
    }

    /// Folds one retained game into the totals.
    pub fn record(&mut self, game: &ClassifiedGame) {
        self.total_points_scored += game.team_score.unwrap_or(0.0);
        self.total_points_allowed += game.opponent_team_score.unwrap_or(0.0);
        match game.outcome {
            Outcome::Win => self.total_wins += 1,
            Outcome::Loss => self.total_losses += 1,
        }
    }

    /// Number of games that contributed to this aggregate.
    pub fn games(&self) -> usize {
        self.total_wins + self.total_losses
    }
}

/// Renders a point total without a fractional part when it is whole.
pub fn format_points(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn serialize_points<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_points(*value))
}
