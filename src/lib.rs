//! Core library for the team-analysis command line application.
//!
//! The pipeline is split into stages that each take the previous stage's
//! output: the workbook loader under [`team::analysis::io`], label
//! normalization and tier-column discovery in [`team::analysis::schema`],
//! per-game classification in [`team::analysis::classify`], and filtering
//! plus per-team totals in [`team::analysis::aggregate`]. The
//! [`team::analysis::pipeline`] module chains them and writes the results.

pub mod team;

pub use team::analysis::{
    AnalysisError, Result, SchemaError, aggregate, classify, error, io, model, pipeline, report,
    schema,
};
