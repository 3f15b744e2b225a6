use thiserror::Error;

use super::ValidationError;
use crate::traits::HttpError;

/// Failure of a single backend operation.
///
/// `context` is the static per-endpoint message ("Failed to fetch problems")
/// that screens show when they have nothing better.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("{context}: {reason}")]
    Network {
        context: &'static str,
        reason: String,
    },

    /// Non-2xx response. `detail` carries the backend's `error` field if present.
    #[error("{context} (HTTP {status})")]
    Status {
        context: &'static str,
        status: u16,
        detail: Option<String>,
    },

    /// 2xx response whose body did not match the expected shape.
    #[error("{context}: invalid response: {reason}")]
    Decode {
        context: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    pub(crate) fn from_transport(context: &'static str, err: HttpError) -> Self {
        match err {
            HttpError::Cancelled => ApiError::Cancelled,
            other => ApiError::Network {
                context,
                reason: other.to_string(),
            },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text for the transient notification shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network { context, .. } => format!("{}. Check your connection.", context),
            ApiError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::Status { context, .. } | ApiError::Decode { context, .. } => {
                context.to_string()
            }
            ApiError::Validation(v) => v.to_string(),
            ApiError::Cancelled => "Request cancelled".to_string(),
        }
    }

    /// The stored tokens were rejected and could not be refreshed.
    pub fn requires_reauth(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    /// Worth offering a retry: transport failures and 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network { .. } => true,
            ApiError::Status { status, .. } => (500..600).contains(status),
            _ => false,
        }
    }
}
