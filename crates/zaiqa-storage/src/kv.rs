//! # Key-Value Storage Trait
//!
//! The backend seam: everything above this trait works the same whether
//! values land on disk or in a test HashMap.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       KvStorage Contract                                │
//! │                                                                         │
//! │  get(key)     ──► Ok(Some(value))  if the key exists                   │
//! │               ──► Ok(None)         if it does not (NOT an error)       │
//! │                                                                         │
//! │  set(key, v)  ──► value fully replaces any previous value              │
//! │                                                                         │
//! │  remove(key)  ──► idempotent: removing an absent key is Ok(())        │
//! │                                                                         │
//! │  Values are opaque strings. Callers own serialization.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;

use crate::error::StorageResult;

/// Async key-value storage backend.
///
/// Implementations must be safe to share across tasks; the store keeps
/// one backend behind an `Arc` for its whole lifetime.
#[async_trait]
pub trait KvStorage: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// An absent key is `Ok(None)`, never an error: first launch has no
    /// stored document and that is a normal state.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes the value stored under `key`, if any.
    async fn remove(&self, key: &str) -> StorageResult<()>;
}
