use serde::{Deserialize, Serialize};

use crate::auth::Tokens;

/// The signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub is_staff: bool,
}

/// `username` may also hold an email address; the backend tries both.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of a successful login or signup.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    pub tokens: Tokens,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_shape() {
        let body = r#"{
            "success": true,
            "tokens": {"refresh": "r", "access": "a"},
            "user": {"id": 7, "username": "ada", "email": "ada@example.com", "is_staff": true}
        }"#;
        let parsed: AuthResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.tokens, Tokens::new("a", "r"));
        assert!(parsed.user.is_staff);
    }

    #[test]
    fn test_user_without_staff_flag() {
        let user: User =
            serde_json::from_str(r#"{"id":1,"username":"u","email":"u@x.io"}"#).unwrap();
        assert!(!user.is_staff);
    }
}
