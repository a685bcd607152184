use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error type covering the different failure cases that can occur while the
/// tool loads, classifies, or writes game data.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Raised when the input workbook does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Error reading the Excel file: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when the workbook opens but holds no worksheet to read.
    #[error("Error reading the Excel file: no worksheet found in {0}")]
    EmptyWorkbook(PathBuf),

    /// Raised when the header row does not follow the expected conventions.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Raised when a score cell holds something other than a number.
    #[error("invalid score '{value}' in column {column} at row {row}")]
    InvalidScore {
        row: usize,
        column: String,
        value: String,
    },

    /// Wrapper for IO failures such as writing the results file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the CSV writer.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl AnalysisError {
    /// Returns `true` when the input workbook could not be loaded.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::MissingInput(_)
                | AnalysisError::ExcelRead(_)
                | AnalysisError::EmptyWorkbook(_)
        )
    }

    /// Returns `true` when the header row was rejected.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, AnalysisError::Schema(_))
    }
}

/// Problems with the column layout of the loaded sheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A required column is absent after label normalization.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// No label contains any of the tier keywords.
    #[error("No clear D1 indicator column found. Please manually check the dataset.")]
    NoTierColumn,

    /// The explicitly requested tier column does not exist.
    #[error("tier indicator column '{0}' not found")]
    TierColumnNotFound(String),
}
