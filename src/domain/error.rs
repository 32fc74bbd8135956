//! Domain error types.

/// Top-level error type for avocado-analytics.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("cannot read {path}: {reason}")]
    ResourceNotFound { path: String, reason: String },

    #[error("missing required column '{column}'")]
    Schema { column: String },

    #[error("malformed {column} value '{value}' on line {line}: {reason}")]
    MalformedInput {
        line: u64,
        column: String,
        value: String,
        reason: String,
    },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&DashboardError> for std::process::ExitCode {
    fn from(err: &DashboardError) -> Self {
        let code: u8 = match err {
            DashboardError::Io(_) => 1,
            DashboardError::ConfigParse { .. } | DashboardError::ConfigInvalid { .. } => 2,
            DashboardError::ResourceNotFound { .. } => 3,
            DashboardError::Schema { .. } | DashboardError::MalformedInput { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
