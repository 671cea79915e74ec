//! File-backed session store
//!
//! Persists exactly two entries, `token` and `tenant`, as a flat JSON object.
//! The session counts as present only when both are there and non-empty.

use crate::atomic_writer::write_atomic;
use crate::{StorageError, StorageResult};
use async_trait::async_trait;
use oxcatalog_core::{Session, SessionStore};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

const TOKEN_KEY: &str = "token";
const TENANT_KEY: &str = "tenant";

/// Session store persisted to a JSON file
pub struct FileSessionStore {
    path: PathBuf,
    session: RwLock<Option<Session>>,
}

impl FileSessionStore {
    /// Open the store, loading a previously persisted session if present
    pub async fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        let session = load(&path)?;

        if session.is_some() {
            info!("Restored session from {}", path.display());
        }

        Ok(Self {
            path,
            session: RwLock::new(session),
        })
    }

    fn persist(&self, session: &Session) -> StorageResult<()> {
        let mut entries = BTreeMap::new();
        entries.insert(TOKEN_KEY, session.token());
        entries.insert(TENANT_KEY, session.tenant());

        let content = serde_json::to_vec_pretty(&entries)
            .map_err(|e| StorageError::Serialization(format!("Failed to encode session: {}", e)))?;
        write_atomic(&self.path, &content)
    }

    fn remove(&self) -> StorageResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn load(path: &Path) -> StorageResult<Option<Session>> {
    if !path.exists() {
        debug!("No persisted session at {}", path.display());
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let entries: BTreeMap<String, String> = serde_json::from_str(&content).map_err(|e| {
        StorageError::Serialization(format!(
            "Failed to parse session file {}: {}",
            path.display(),
            e
        ))
    })?;

    let token = entries.get(TOKEN_KEY).map(String::as_str).unwrap_or_default();
    let tenant = entries.get(TENANT_KEY).map(String::as_str).unwrap_or_default();

    match Session::new(token, tenant) {
        Ok(session) => Ok(Some(session)),
        Err(_) => {
            warn!(
                "Ignoring incomplete session in {} (token and tenant are both required)",
                path.display()
            );
            Ok(None)
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self) -> oxcatalog_core::Result<Option<Session>> {
        Ok(self.session.read().await.clone())
    }

    async fn set(&self, session: Session) -> oxcatalog_core::Result<()> {
        let mut current = self.session.write().await;
        self.persist(&session)?;
        debug!(tenant = %session.tenant(), "Persisted session");
        *current = Some(session);
        Ok(())
    }

    async fn clear(&self) -> oxcatalog_core::Result<()> {
        let mut current = self.session.write().await;
        self.remove()?;
        *current = None;
        Ok(())
    }
}
