//! Process-lifetime token storage.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::auth::Tokens;
use crate::traits::SessionStorage;

/// Tokens held in memory for the life of the process.
///
/// Cloning shares the same slot, so the API client and the session manager
/// observe each other's writes.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStorage {
    tokens: Arc<RwLock<Tokens>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: Tokens) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(tokens)),
        }
    }

    /// Copy of the current pair.
    pub fn snapshot(&self) -> Tokens {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tokens> {
        self.tokens.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tokens> {
        self.tokens.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStorage for MemorySessionStorage {
    fn access_token(&self) -> Option<String> {
        self.read().access.clone().filter(|t| !t.is_empty())
    }

    fn refresh_token(&self) -> Option<String> {
        self.read().refresh.clone().filter(|t| !t.is_empty())
    }

    fn store(&self, tokens: &Tokens) {
        *self.write() = tokens.clone();
    }

    fn set_access_token(&self, token: &str) {
        self.write().access = Some(token.to_string());
    }

    fn clear(&self) {
        *self.write() = Tokens::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let storage = MemorySessionStorage::new();
        assert!(storage.access_token().is_none());
        assert!(storage.refresh_token().is_none());
        assert!(!storage.has_access_token());
    }

    #[test]
    fn test_set_access_keeps_refresh() {
        let storage = MemorySessionStorage::with_tokens(Tokens::new("a", "r"));
        storage.set_access_token("a2");
        assert_eq!(storage.access_token().as_deref(), Some("a2"));
        assert_eq!(storage.refresh_token().as_deref(), Some("r"));
    }

    #[test]
    fn test_clones_share_state() {
        let storage = MemorySessionStorage::new();
        let other = storage.clone();
        storage.store(&Tokens::new("a", "r"));
        assert_eq!(other.access_token().as_deref(), Some("a"));
        other.clear();
        assert_eq!(storage.snapshot(), Tokens::default());
    }
}
