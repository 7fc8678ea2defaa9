//! # Persisted State Document
//!
//! The whole store state serializes as one JSON document under a fixed
//! storage key. Loaded once at startup, written back after every
//! mutation; in memory it is the single source of truth.
//!
//! ## Document Layout
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ restaurant-storage.json                      │
//! │                                              │
//! │ { "schemaVersion": 1,                        │
//! │   "profile":  { "name": ..., ... },          │
//! │   "settings": { "darkMode": ..., ... },      │
//! │   "menu":     [ MenuItem, ... ],             │
//! │   "cart":     { "items": [ ... ] },          │
//! │   "orders":   [ newest, ..., oldest ]        │
//! │ }                                            │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Versioning
//! `schemaVersion` is bumped whenever the layout changes in a way old
//! builds cannot read. A document with a NEWER version than this build
//! supports is rejected with a typed error instead of being misread; an
//! absent document yields defaults. Missing fields also fall back to
//! defaults, so partial or hand-edited documents still load.

use serde::{Deserialize, Serialize};

use zaiqa_core::{Cart, MenuItem, Order, Profile, Settings};
use zaiqa_storage::{StorageError, StorageResult};

// =============================================================================
// Constants
// =============================================================================

/// Storage key the state document lives under.
///
/// Existing installs keep their data under this key; do not rename.
pub const STORAGE_KEY: &str = "restaurant-storage";

/// Schema version written into every persisted document.
pub const SCHEMA_VERSION: u32 = 1;

// =============================================================================
// State Document
// =============================================================================

/// The complete persisted store state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    /// Document layout version, see [`SCHEMA_VERSION`].
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Customer profile used to address orders.
    #[serde(default)]
    pub profile: Profile,

    /// App settings toggles.
    #[serde(default)]
    pub settings: Settings,

    /// Menu catalog. Replaced wholesale by menu loads, never edited.
    #[serde(default = "crate::menu_data::default_menu")]
    pub menu: Vec<MenuItem>,

    /// The current cart.
    #[serde(default)]
    pub cart: Cart,

    /// All orders, newest first. Orders are never deleted.
    #[serde(default)]
    pub orders: Vec<Order>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl Default for StoreState {
    fn default() -> Self {
        StoreState {
            schema_version: SCHEMA_VERSION,
            profile: Profile::default(),
            settings: Settings::default(),
            menu: crate::menu_data::default_menu(),
            cart: Cart::new(),
            orders: Vec::new(),
        }
    }
}

impl StoreState {
    /// Serializes the document for storage.
    pub fn to_json(&self) -> StorageResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a stored document, rejecting schema versions this build
    /// cannot read.
    pub fn from_json(json: &str) -> StorageResult<Self> {
        let state: StoreState = serde_json::from_str(json)?;
        if state.schema_version > SCHEMA_VERSION {
            return Err(StorageError::UnsupportedSchemaVersion {
                found: state.schema_version,
                supported: SCHEMA_VERSION,
            });
        }
        Ok(state)
    }
}
