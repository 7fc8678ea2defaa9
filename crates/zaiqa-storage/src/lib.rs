//! # zaiqa-storage: Local Persistence for Zaiqa
//!
//! Key-value persistence behind a small async trait. The store crate
//! serializes its whole state document to a JSON string and hands it to
//! this crate under a fixed key; this crate neither knows nor cares what
//! the document contains.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Zaiqa Persistence Layer                            │
//! │                                                                         │
//! │  zaiqa-store                                                           │
//! │       │  set("restaurant-storage", "{...json...}")                     │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 KvStorage trait (kv.rs)                         │   │
//! │  │        get / set / remove raw strings by key                    │   │
//! │  └───────────────┬────────────────────────────┬────────────────────┘   │
//! │                  │                            │                        │
//! │                  ▼                            ▼                        │
//! │  ┌───────────────────────────┐  ┌───────────────────────────────────┐  │
//! │  │   FileStorage (file.rs)   │  │   MemoryStorage (memory.rs)       │  │
//! │  │   one <key>.json per key  │  │   HashMap, for tests              │  │
//! │  │   tmp + rename writes     │  │                                   │  │
//! │  └───────────────────────────┘  └───────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`kv`] - The `KvStorage` backend trait
//! - [`file`] - JSON-file backend with atomic writes
//! - [`memory`] - In-memory backend for tests
//! - [`error`] - Storage error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod file;
pub mod kv;
pub mod memory;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{StorageError, StorageResult};
pub use file::FileStorage;
pub use kv::KvStorage;
pub use memory::MemoryStorage;
