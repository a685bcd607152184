pub mod aggregate;
pub mod classify;
pub mod error;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod schema;

pub use error::{AnalysisError, Result, SchemaError};
