//! Access/refresh token pair.

use serde::{Deserialize, Serialize};

/// Tokens issued by the backend at login/signup.
///
/// Field names follow the backend's `tokens` object (`{"refresh", "access"}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokens {
    pub access: Option<String>,
    pub refresh: Option<String>,
}

impl Tokens {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: Some(access.into()),
            refresh: Some(refresh.into()),
        }
    }

    pub fn has_access(&self) -> bool {
        self.access.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Body of a successful `POST /accounts/token/refresh/`.
///
/// Rotation is optional: the backend only returns `refresh` when it rotates.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_from_backend_shape() {
        let tokens: Tokens =
            serde_json::from_str(r#"{"refresh":"r-1","access":"a-1"}"#).unwrap();
        assert_eq!(tokens, Tokens::new("a-1", "r-1"));
        assert!(tokens.has_access());
    }

    #[test]
    fn test_empty_access_is_not_a_token() {
        let tokens = Tokens {
            access: Some(String::new()),
            refresh: None,
        };
        assert!(!tokens.has_access());
        assert!(!Tokens::default().has_access());
    }

    #[test]
    fn test_refresh_response_without_rotation() {
        let parsed: RefreshResponse = serde_json::from_str(r#"{"access":"new"}"#).unwrap();
        assert_eq!(parsed.access, "new");
        assert!(parsed.refresh.is_none());
    }
}
