//! Session store trait
//!
//! The `SessionStore` trait abstracts where the single active session lives,
//! so controllers receive it by injection instead of reading ambient state.
//!
//! Implementations:
//! - `MemorySessionStore`: process lifetime only
//! - `FileSessionStore` (oxcatalog-storage): survives process restart

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Result, Session};

/// Holder of the one active session
///
/// # Example
/// ```no_run
/// # use oxcatalog_core::{Session, SessionStore};
/// # async fn example(store: &dyn SessionStore) -> oxcatalog_core::Result<()> {
/// store.set(Session::new("token", "toko")?).await?;
/// assert!(store.get().await?.is_some());
///
/// store.clear().await?;
/// assert!(store.get().await?.is_none());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Get the current session, if any
    async fn get(&self) -> Result<Option<Session>>;

    /// Replace the current session unconditionally
    async fn set(&self, session: Session) -> Result<()>;

    /// Remove the current session
    ///
    /// Idempotent: clearing an empty store succeeds.
    async fn clear(&self) -> Result<()>;

    /// Whether a session is present
    async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.get().await?.is_some())
    }
}

/// In-memory session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a session
    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self) -> Result<Option<Session>> {
        Ok(self.session.read().await.clone())
    }

    async fn set(&self, session: Session) -> Result<()> {
        *self.session.write().await = Some(session);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.session.write().await = None;
        Ok(())
    }
}
