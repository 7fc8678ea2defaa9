//! # zaiqa-store: The Order Store Service
//!
//! The service layer of Zaiqa. It glues the pure business rules from
//! `zaiqa-core` to the persistence layer in `zaiqa-storage`, adds the
//! timer-driven order progression engine, and broadcasts change events
//! to anything that subscribes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        zaiqa-store (THIS CRATE)                         │
//! │                                                                         │
//! │   caller ──► OrderStore ─────────────────────────────────────────────┐  │
//! │              │                                                       │  │
//! │              │ owns            RwLock<StoreState>                    │  │
//! │              │                 (menu, cart, orders,                  │  │
//! │              │                  profile, settings)                   │  │
//! │              │                                                       │  │
//! │              ├── persist ────► KvStorage (one JSON doc, one key)     │  │
//! │              │                                                       │  │
//! │              ├── timers ─────► ProgressionTimers                     │  │
//! │              │                 (one delayed advance per order)       │  │
//! │              │                                                       │  │
//! │              └── events ─────► broadcast::Sender<StoreEvent>         │  │
//! │                                (CART_CHANGED, ORDER_PLACED, ...)     │  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - The [`OrderStore`] service itself
//! - [`state`] - The persisted state document and its wire format
//! - [`config`] - TOML + env configuration for timers and storage
//! - [`events`] - The [`StoreEvent`] feed
//! - [`menu_data`] - The bundled menu catalog
//! - [`error`] - Service-level error type
//!
//! ## Example
//!
//! ```rust,ignore
//! use zaiqa_core::PaymentType;
//! use zaiqa_store::{OrderStore, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = OrderStore::open_local(StoreConfig::load_or_default(None)).await?;
//!
//!     store.add_to_cart("beef-burger", 2).await?;
//!     let order = store.place_order(PaymentType::Cod).await?;
//!
//!     // Kitchen simulation: PLACED -> ACCEPTED -> ... -> COMPLETED
//!     store.start_order_progression(&order.order_id).await?;
//!     Ok(())
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod events;
pub mod menu_data;
pub mod state;
pub mod store;

mod progression;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::{StorageSettings, StoreConfig, TimerSettings};
pub use error::{StoreError, StoreResult};
pub use events::StoreEvent;
pub use state::{StoreState, SCHEMA_VERSION, STORAGE_KEY};
pub use store::OrderStore;

use tracing::Level;
use tracing_subscriber::EnvFilter;

// =============================================================================
// Logging Setup
// =============================================================================

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages everywhere
/// - `RUST_LOG=zaiqa_store=trace` - Show trace for the store only
/// - Default: INFO, with DEBUG for the zaiqa crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,zaiqa_core=debug,zaiqa_storage=debug,zaiqa_store=debug")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}
