//! Error types for the ifs-diagnostics crate.
use crate::grid::Axis;
use thiserror::Error;

/// Error type for the crate.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum AnalysisError {
    /// A coordinate axis that is required for this analysis is missing.
    #[error("Missing axis required for the analysis: {0}")]
    MissingAxis(Axis),
    /// A variable that is required for this analysis is missing from the dataset.
    #[error("Missing variable required for the analysis: {0}")]
    MissingVariable(String),
    /// The data array does not match the lengths of its coordinates.
    #[error("Data shape does not match the coordinates.")]
    ShapeMismatch,
    /// Two fields combined elementwise are not on the same grid.
    #[error("Fields are not defined on the same axes.")]
    AxisMismatch,
    /// Bad or invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),
    /// A diagnostic token did not map to any known diagnostic.
    #[error("Unknown diagnostic: {0}")]
    UnknownDiagnostic(String),
    /// The configuration could not be parsed or is inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Shorthand for results.
pub type Result<T> = ::std::result::Result<T, AnalysisError>;

impl From<toml::de::Error> for AnalysisError {
    fn from(err: toml::de::Error) -> Self {
        AnalysisError::InvalidConfig(err.to_string())
    }
}
