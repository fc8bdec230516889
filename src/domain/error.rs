//! Domain error types.

/// Top-level error type for finboard.
#[derive(Debug, thiserror::Error)]
pub enum FinboardError {
    #[error("invalid argument {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("daily target already completed; no further trades accepted")]
    TargetCompleted,

    #[error("invalid strategy transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FinboardError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        FinboardError::InvalidArgument {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Reject negative or non-finite monetary inputs.
pub fn ensure_non_negative(field: &str, value: f64) -> Result<(), FinboardError> {
    if !value.is_finite() {
        return Err(FinboardError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(FinboardError::invalid(field, "must be non-negative"));
    }
    Ok(())
}

/// Reject zero, negative or non-finite monetary inputs.
pub fn ensure_positive(field: &str, value: f64) -> Result<(), FinboardError> {
    if !value.is_finite() {
        return Err(FinboardError::invalid(field, "must be a finite number"));
    }
    if value <= 0.0 {
        return Err(FinboardError::invalid(field, "must be positive"));
    }
    Ok(())
}

impl From<&FinboardError> for std::process::ExitCode {
    fn from(err: &FinboardError) -> Self {
        let code: u8 = match err {
            FinboardError::Io(_) => 1,
            FinboardError::ConfigParse { .. }
            | FinboardError::ConfigMissing { .. }
            | FinboardError::ConfigInvalid { .. } => 2,
            FinboardError::Data { .. } => 3,
            FinboardError::InvalidArgument { .. }
            | FinboardError::TargetCompleted
            | FinboardError::InvalidTransition { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
