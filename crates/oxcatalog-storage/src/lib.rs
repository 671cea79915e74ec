//! OxCatalog Storage Layer
//!
//! Persisted client state:
//! - Atomic file writes
//! - File-backed session store surviving process restart

pub mod atomic_writer;
pub mod error;
pub mod session_file;

pub use error::{StorageError, StorageResult};
pub use session_file::FileSessionStore;
