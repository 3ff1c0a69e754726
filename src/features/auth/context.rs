use std::sync::Arc;

use tokio::sync::RwLock;

use crate::core::error::Result;
use crate::features::auth::token_store::{MemoryTokenStore, TokenStore};

/// Holds the bearer token the API client attaches to outgoing requests.
///
/// The token is set on login and cleared on logout; the client only reads it.
/// Every change is written through to the backing [`TokenStore`].
pub struct AuthContext {
    token: RwLock<Option<String>>,
    store: Arc<dyn TokenStore>,
}

impl AuthContext {
    /// Create a context seeded with whatever token the store already holds
    pub fn load(store: Arc<dyn TokenStore>) -> Result<Self> {
        let token = store.load()?;
        if token.is_some() {
            tracing::debug!("Restored auth token from store");
        }
        Ok(Self {
            token: RwLock::new(token),
            store,
        })
    }

    /// Context without persistence and without a token
    pub fn anonymous() -> Self {
        Self {
            token: RwLock::new(None),
            store: Arc::new(MemoryTokenStore::default()),
        }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: RwLock::new(Some(token.clone())),
            store: Arc::new(MemoryTokenStore::with_token(token)),
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    pub async fn set_token(&self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        self.store.save(&token)?;
        *self.token.write().await = Some(token);
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.clear()?;
        *self.token.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_clear_write_through_to_store() {
        let store = Arc::new(MemoryTokenStore::default());
        let ctx = AuthContext::load(store.clone()).unwrap();
        assert!(!ctx.is_authenticated().await);

        ctx.set_token("token-1").await.unwrap();
        assert_eq!(ctx.token().await.as_deref(), Some("token-1"));
        assert_eq!(store.load().unwrap().as_deref(), Some("token-1"));

        ctx.clear().await.unwrap();
        assert_eq!(ctx.token().await, None);
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_load_restores_persisted_token() {
        let store = Arc::new(MemoryTokenStore::with_token("persisted"));
        let ctx = AuthContext::load(store).unwrap();
        assert_eq!(ctx.token().await.as_deref(), Some("persisted"));
    }
}
