use thiserror::Error;

/// Why an inbound sale document was refused. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("malformed sale: {detail}")]
    Malformed { detail: String },
    #[error("invalid {field}: {detail}")]
    SemanticViolation { field: String, detail: String },
}

impl ValidationError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        ValidationError::Malformed {
            detail: detail.into(),
        }
    }

    pub fn violation(field: impl Into<String>, detail: impl Into<String>) -> Self {
        ValidationError::SemanticViolation {
            field: field.into(),
            detail: detail.into(),
        }
    }

    /// Machine-readable reason, as reported to clients.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::Malformed { .. } => "Malformed",
            ValidationError::SemanticViolation { .. } => "SemanticViolation",
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::Malformed { .. } => None,
            ValidationError::SemanticViolation { field, .. } => Some(field),
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            ValidationError::Malformed { detail } => detail,
            ValidationError::SemanticViolation { detail, .. } => detail,
        }
    }
}

/// Why a validated sale could not be appended to the queue.
///
/// `StoreUnavailable` leaves the append outcome unknown (zero or one entry);
/// the whole request may be retried. `StoreRejected` needs an operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnqueueError {
    #[error("queue store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("queue store rejected the append: {0}")]
    StoreRejected(String),
}

impl EnqueueError {
    pub fn kind(&self) -> &'static str {
        match self {
            EnqueueError::StoreUnavailable(_) => "StoreUnavailable",
            EnqueueError::StoreRejected(_) => "StoreRejected",
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            EnqueueError::StoreUnavailable(detail) | EnqueueError::StoreRejected(detail) => detail,
        }
    }
}
