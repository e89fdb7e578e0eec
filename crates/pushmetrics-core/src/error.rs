//! Shared error type across pushmetrics crates.

use thiserror::Error;

use crate::identity::GroupResource;

/// Caller-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed push body or invalid input.
    BadRequest,
    /// Metric identity could not be resolved against the resource mapper.
    ResolutionFailed,
    /// Unknown metric, or no value recorded for the object.
    MetricNotFound,
    /// Malformed label selector.
    InvalidSelector,
    /// An object listing / description collaborator failed.
    CollaboratorFailed,
    /// Internal server error.
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::ResolutionFailed => "RESOLUTION_FAILED",
            ErrorCode::MetricNotFound => "METRIC_NOT_FOUND",
            ErrorCode::InvalidSelector => "INVALID_SELECTOR",
            ErrorCode::CollaboratorFailed => "COLLABORATOR_FAILED",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// HTTP status code for this error class.
    pub fn http_status(self) -> u16 {
        match self {
            ErrorCode::BadRequest => 400,
            ErrorCode::ResolutionFailed => 404,
            ErrorCode::MetricNotFound => 404,
            ErrorCode::InvalidSelector => 400,
            ErrorCode::CollaboratorFailed => 502,
            ErrorCode::Internal => 500,
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core and adapter.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unable to resolve metric identity: {0}")]
    Resolution(String),
    #[error("the server could not find the metric {metric} for {resource} {object}")]
    MetricNotFound {
        resource: GroupResource,
        metric: String,
        object: String,
    },
    #[error("invalid selector: {0}")]
    SelectorParse(String),
    #[error("{0}")]
    Collaborator(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricsError {
    /// Construct the not-found error for a metric on a given object.
    pub fn metric_not_found(
        resource: &GroupResource,
        metric: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        MetricsError::MetricNotFound {
            resource: resource.clone(),
            metric: metric.into(),
            object: object.into(),
        }
    }

    /// Map internal error to a stable caller-facing code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MetricsError::BadRequest(_) => ErrorCode::BadRequest,
            MetricsError::Resolution(_) => ErrorCode::ResolutionFailed,
            MetricsError::MetricNotFound { .. } => ErrorCode::MetricNotFound,
            MetricsError::SelectorParse(_) => ErrorCode::InvalidSelector,
            MetricsError::Collaborator(_) => ErrorCode::CollaboratorFailed,
            MetricsError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// True only for the "metric not found" kind; selector fan-out skips these.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MetricsError::MetricNotFound { .. })
    }
}
