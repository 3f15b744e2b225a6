//! Token storage abstraction.
//!
//! The authenticated wrapper reads and rewrites the access/refresh pair on
//! every request, so storage is synchronous and infallible. Production uses
//! process-lifetime memory; nothing is written to disk.

use crate::auth::Tokens;

pub trait SessionStorage: Send + Sync {
    /// Current access token, if any.
    fn access_token(&self) -> Option<String>;

    /// Current refresh token, if any.
    fn refresh_token(&self) -> Option<String>;

    /// Replace both tokens.
    fn store(&self, tokens: &Tokens);

    /// Replace only the access token, keeping the refresh token.
    fn set_access_token(&self, token: &str);

    /// Forget both tokens.
    fn clear(&self);

    fn has_access_token(&self) -> bool {
        self.access_token().is_some()
    }
}
