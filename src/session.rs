//! Who is signed in.
//!
//! [`SessionManager`] is an explicit object with a fixed lifecycle instead of
//! ambient global state:
//!
//! ```text
//! Uninitialized -> Loading -> Authenticated(user)
//!                          \-> Anonymous
//! ```
//!
//! After resolution only [`SessionManager::login`] and
//! [`SessionManager::logout`] change it. Each `App` (and each test) owns one.

use std::sync::Arc;

use crate::api::JudgeApi;
use crate::error::ApiError;
use crate::models::User;
use crate::traits::SessionStorage;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Loading,
    Authenticated(User),
    Anonymous,
}

pub struct SessionManager {
    state: SessionState,
    storage: Arc<dyn SessionStorage>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state)
            .finish()
    }
}

impl SessionManager {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            state: SessionState::Uninitialized,
            storage,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    /// Not yet resolved.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.state,
            SessionState::Uninitialized | SessionState::Loading
        )
    }

    pub fn is_staff(&self) -> bool {
        self.user().is_some_and(|u| u.is_staff)
    }

    /// `Uninitialized -> Loading`. Returns false if already started.
    pub fn begin_loading(&mut self) -> bool {
        if self.state == SessionState::Uninitialized {
            self.state = SessionState::Loading;
            true
        } else {
            false
        }
    }

    /// Settle a `Loading` session with the profile-fetch outcome.
    ///
    /// Ignored in any other state, so a late profile response cannot undo an
    /// explicit login or logout.
    pub fn resolve(&mut self, profile: Result<User, ApiError>) {
        if self.state != SessionState::Loading {
            tracing::debug!("Ignoring profile result, session already resolved");
            return;
        }
        self.state = match profile {
            Ok(user) => {
                tracing::info!("Session restored for {}", user.username);
                SessionState::Authenticated(user)
            }
            Err(e) => {
                tracing::debug!("No session: {}", e);
                SessionState::Anonymous
            }
        };
    }

    /// Start resolution. Without a stored token the session resolves to
    /// `Anonymous` on the spot. Returns true when a profile fetch must follow
    /// (then feed its result to [`resolve`](Self::resolve)).
    pub fn start(&mut self) -> bool {
        if !self.begin_loading() {
            return false;
        }
        if !self.storage.has_access_token() {
            self.state = SessionState::Anonymous;
            return false;
        }
        true
    }

    /// Run the whole startup lifecycle. Without a stored token no request is made.
    pub async fn initialize(&mut self, api: &JudgeApi) {
        if self.start() {
            let profile = api.profile().await;
            self.resolve(profile);
        }
    }

    /// Record a successful login or signup. Tokens are stored by the API layer.
    pub fn login(&mut self, user: User) {
        self.state = SessionState::Authenticated(user);
    }

    pub fn logout(&mut self) {
        self.storage.clear();
        self.state = SessionState::Anonymous;
    }

    /// Drop to anonymous if the wrapper cleared the tokens after a failed
    /// refresh. Returns true when the session was lost.
    pub fn revalidate(&mut self) -> bool {
        if self.is_authenticated() && !self.storage.has_access_token() {
            tracing::info!("Stored credentials were cleared, ending session");
            self.state = SessionState::Anonymous;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MemorySessionStorage, MockHttpClient, MockResponse};
    use crate::auth::Tokens;
    use serde_json::json;

    fn user(staff: bool) -> User {
        User {
            id: 1,
            username: "alice".into(),
            email: "alice@example.com".into(),
            is_staff: staff,
        }
    }

    fn setup(tokens: Tokens) -> (SessionManager, JudgeApi, MockHttpClient, MemorySessionStorage) {
        let http = MockHttpClient::new();
        let storage = MemorySessionStorage::with_tokens(tokens);
        let api = JudgeApi::with_parts(
            Arc::new(http.clone()),
            Arc::new(storage.clone()),
            "http://judge.test/api",
        );
        (SessionManager::new(Arc::new(storage.clone())), api, http, storage)
    }

    #[tokio::test]
    async fn test_initialize_with_token_resolves_user() {
        let (mut session, api, http, _) = setup(Tokens::new("A", "R"));
        http.on_get(
            "http://judge.test/api/accounts/profile/",
            MockResponse::json(200, json!({"user": {"id": 1, "username": "alice", "email": "alice@example.com", "is_staff": true}})),
        );

        assert_eq!(session.state(), &SessionState::Uninitialized);
        session.initialize(&api).await;
        assert!(session.is_authenticated());
        assert!(session.is_staff());
    }

    #[tokio::test]
    async fn test_initialize_without_token_is_anonymous_and_silent() {
        let (mut session, api, http, _) = setup(Tokens::default());
        session.initialize(&api).await;
        assert_eq!(session.state(), &SessionState::Anonymous);
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_runs_once() {
        let (mut session, api, http, _) = setup(Tokens::default());
        session.initialize(&api).await;
        session.login(user(false));
        session.initialize(&api).await;
        assert!(session.is_authenticated());
        assert!(http.requests().is_empty());
    }

    #[test]
    fn test_late_profile_result_cannot_override_login() {
        let (mut session, _, _, _) = setup(Tokens::default());
        assert!(session.begin_loading());
        session.login(user(false));
        session.resolve(Err(ApiError::Cancelled));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_logout_clears_storage() {
        let (mut session, _, _, storage) = setup(Tokens::new("A", "R"));
        session.login(user(false));
        session.logout();
        assert_eq!(session.state(), &SessionState::Anonymous);
        assert!(!storage.has_access_token());
    }

    #[test]
    fn test_revalidate_after_tokens_cleared() {
        let (mut session, _, _, storage) = setup(Tokens::new("A", "R"));
        session.login(user(false));
        assert!(!session.revalidate());
        storage.clear();
        assert!(session.revalidate());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_independent_managers_do_not_share_state() {
        let (mut first, _, _, _) = setup(Tokens::default());
        let (second, _, _, _) = setup(Tokens::default());
        first.login(user(true));
        assert!(first.is_authenticated());
        assert!(second.is_loading());
    }
}
