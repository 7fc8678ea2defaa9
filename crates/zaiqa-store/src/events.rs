//! # Store Events
//!
//! Coarse change notifications broadcast to subscribers (UI screens,
//! widgets, loggers). Events say *what* changed; subscribers re-read the
//! state they care about.
//!
//! ## Fan-out Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Event Fan-out                                   │
//! │                                                                         │
//! │  store op ──► EventBus::emit ──► broadcast channel (capacity 256)      │
//! │                                       │                                 │
//! │                                       ├──► subscriber (orders screen)  │
//! │                                       ├──► subscriber (cart badge)     │
//! │                                       └──► subscriber (logs)           │
//! │                                                                         │
//! │  • No subscribers: the event is dropped, never an error                │
//! │  • Slow subscriber: observes RecvError::Lagged and skips ahead         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use zaiqa_core::OrderStatus;

/// Capacity of the event channel. Subscribers further behind than this
/// lag: they lose the oldest events and catch up from there.
const EVENT_CHANNEL_CAPACITY: usize = 256;

// =============================================================================
// Store Event
// =============================================================================

/// A change notification from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum StoreEvent {
    /// The cart changed (add, update, remove, clear, checkout).
    CartChanged,

    /// The menu was (re)loaded.
    MenuLoaded { item_count: usize },

    /// A new order was placed.
    OrderPlaced { order_id: String },

    /// An order moved to a new lifecycle status.
    OrderStatusChanged {
        order_id: String,
        status: OrderStatus,
    },

    /// An order was cancelled.
    OrderCancelled { order_id: String },

    /// Feedback was attached to an order.
    FeedbackSubmitted { order_id: String },

    /// The customer profile was replaced.
    ProfileUpdated,

    /// Settings were updated.
    SettingsUpdated,
}

// =============================================================================
// Event Bus
// =============================================================================

/// Broadcast fan-out for store events.
#[derive(Debug)]
pub(crate) struct EventBus {
    tx: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    pub(crate) fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        EventBus { tx }
    }

    /// Subscribes to events from this point onward.
    pub(crate) fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Emits an event to all current subscribers.
    ///
    /// A send with no subscribers is not an error; the event is dropped.
    pub(crate) fn emit(&self, event: StoreEvent) {
        let _ = self.tx.send(event);
    }
}
