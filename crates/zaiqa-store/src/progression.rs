//! # Order Progression Engine
//!
//! Drives in-flight orders along the lifecycle sequence with one delayed
//! advance task per order.
//!
//! ## Chain Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Progression Chain                                 │
//! │                                                                         │
//! │  start_order_progression("o-1")                                        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  registry["o-1"] = ⟨generation, task⟩   (aborts + replaces any         │
//! │        │                                  existing task)                │
//! │        ▼  sleep(interval)                                               │
//! │  re-read status ── missing / terminal ──► deregister, stop             │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  advance one step ──► re-arm ──► ... ──► terminal ──► deregister        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one pending advance per order: `start` aborts and replaces
//!   the existing task.
//! - Status checks happen at fire time, not schedule time: cancelling an
//!   order mid-delay makes the next fire a clean stop.
//! - The generation counter keeps a replaced task's cleanup from
//!   evicting its replacement's registry entry.
//! - Tasks hold only a weak store reference, so dropping the last strong
//!   handle stops every chain at its next fire.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::store::OrderStore;

// =============================================================================
// Timer Registry
// =============================================================================

/// One live chain for one order id.
struct TimerEntry {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Process-scoped registry of pending advance tasks. Never serialized;
/// after a restart chains are re-derived from order status instead.
pub(crate) struct ProgressionTimers {
    entries: Mutex<HashMap<String, TimerEntry>>,
    next_generation: AtomicU64,
}

impl ProgressionTimers {
    pub(crate) fn new() -> Self {
        ProgressionTimers {
            entries: Mutex::new(HashMap::new()),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Number of currently registered chains.
    pub(crate) fn live_count(&self) -> usize {
        self.lock_entries().len()
    }

    /// Starts (or restarts) the chain for an order.
    ///
    /// An existing chain for the same order is aborted and replaced, so
    /// an order never has more than one pending advance.
    pub(crate) fn start(&self, store: Weak<OrderStore>, order_id: &str, interval: Duration) {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let handle = tokio::spawn(run_chain(
            store,
            order_id.to_string(),
            generation,
            interval,
        ));

        let mut entries = self.lock_entries();
        if let Some(old) = entries.insert(order_id.to_string(), TimerEntry { generation, handle }) {
            old.handle.abort();
            debug!(order_id = %order_id, "Replaced pending progression chain");
        }
    }

    /// Removes the registry entry for a finished chain.
    ///
    /// Generation-checked so a stale task cannot evict its replacement.
    fn finish(&self, order_id: &str, generation: u64) {
        let mut entries = self.lock_entries();
        if entries.get(order_id).map(|e| e.generation) == Some(generation) {
            entries.remove(order_id);
        }
    }

    /// Aborts every live chain.
    pub(crate) fn shutdown(&self) {
        let mut entries = self.lock_entries();
        let count = entries.len();
        for (_, entry) in entries.drain() {
            entry.handle.abort();
        }
        if count > 0 {
            info!(chains = count, "Aborted live progression chains");
        }
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, TimerEntry>> {
        self.entries.lock().expect("timer registry mutex poisoned")
    }
}

// =============================================================================
// Chain Task
// =============================================================================

/// Sleep-advance loop for one order.
///
/// The strong store reference is re-acquired per fire and released
/// before the next sleep, so the chain dies with the store.
async fn run_chain(store: Weak<OrderStore>, order_id: String, generation: u64, interval: Duration) {
    debug!(
        order_id = %order_id,
        interval_ms = interval.as_millis() as u64,
        "Progression chain armed"
    );

    loop {
        tokio::time::sleep(interval).await;

        let Some(store) = store.upgrade() else {
            debug!(order_id = %order_id, "Store dropped, chain stopping");
            return;
        };

        match store.advance_order(&order_id).await {
            Some(status) if status.is_terminal() => {
                store.timers().finish(&order_id, generation);
                debug!(order_id = %order_id, status = %status, "Chain reached terminal status");
                return;
            }
            Some(_) => {
                // Advanced one step; re-arm.
            }
            None => {
                store.timers().finish(&order_id, generation);
                debug!(order_id = %order_id, "Order no longer exists, chain stopping");
                return;
            }
        }
    }
}
