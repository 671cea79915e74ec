//! OxCatalog Core Types and Traits
//!
//! This crate provides the fundamental types used throughout OxCatalog:
//! - Session and the session store abstraction
//! - Catalog item and page types
//! - In-memory search ranking
//! - Core error types

pub mod catalog;
pub mod error;
pub mod search;
pub mod session;
pub mod session_store;

pub use catalog::{CatalogItem, Page};
pub use error::{Error, Result};
pub use search::{SearchField, SearchIndex, rank, rank_by};
pub use session::Session;
pub use session_store::{MemorySessionStore, SessionStore};
