use thiserror::Error;

/// Unified error type for the studyforge codebase.
/// All fallible operations return Result<T, PlanError> instead of String errors.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Malformed input to pool normalization (missing required candidate fields).
    #[error("validation failed: {0}")]
    Validation(String),

    /// After filtering, the candidate set is empty. The caller decides whether
    /// to retry with relaxed filters; no partial plan is produced.
    #[error("no suitable problems: {0}")]
    NoCandidates(String),

    /// An unknown plan id, session id, or problem index was addressed.
    #[error("not found: {0}")]
    NotFound(String),

    /// Underlying persistence read/write failure.
    #[error("storage failure: {0}")]
    Storage(String),

    /// An import payload matched neither the single-plan nor the bulk shape.
    #[error("unrecognized import format: {0}")]
    ImportFormat(String),
}

impl From<std::io::Error> for PlanError {
    fn from(err: std::io::Error) -> Self {
        PlanError::Storage(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for PlanError {
    fn from(err: serde_json::Error) -> Self {
        PlanError::Storage(format!("JSON error: {}", err))
    }
}
