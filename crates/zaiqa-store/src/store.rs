//! The Order Store service.
//!
//! [`OrderStore`] owns the single [`StoreState`] document and is the only
//! writer to it. Every mutating operation follows the same discipline:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     Mutation Discipline                          │
//! │                                                                  │
//! │   write-lock state                                               │
//! │        │                                                         │
//! │        ▼                                                         │
//! │   domain guards (core errors propagate, nothing mutated yet)     │
//! │        │                                                         │
//! │        ▼                                                         │
//! │   mutate in place                                                │
//! │        │                                                         │
//! │        ▼                                                         │
//! │   persist whole document ──► KvStorage (one key, one JSON blob)  │
//! │        │                                                         │
//! │        ▼                                                         │
//! │   emit event (still under the lock, so feed order == op order)   │
//! │        │                                                         │
//! │        ▼                                                         │
//! │   unlock, log, return                                            │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Direct operations propagate persistence failures to the caller and the
//! in-memory mutation stands (next successful persist writes it through).
//! Timer-driven advances log persistence failures and keep going; see
//! [`OrderStore::advance_order`].

use std::fmt;
use std::sync::{Arc, Weak};

use tokio::sync::{broadcast, RwLock};
use tracing::{debug, error, info};
use uuid::Uuid;

use chrono::Utc;
use zaiqa_core::validation::{validate_feedback_comment, validate_profile, validate_rating};
use zaiqa_core::{
    Cart, CartTotals, CoreError, Feedback, MenuItem, Money, Order, OrderStatus, PaymentType,
    Profile, Settings, SettingsUpdate,
};
use zaiqa_storage::{FileStorage, KvStorage, MemoryStorage};

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::events::{EventBus, StoreEvent};
use crate::menu_data;
use crate::progression::ProgressionTimers;
use crate::state::StoreState;

// =============================================================================
// OrderStore
// =============================================================================

/// The restaurant order store: menu, cart, orders, profile, and settings
/// behind one async façade.
///
/// Cheap to share: constructors hand out an [`Arc`], and progression chains
/// hold only a [`Weak`] back-reference so dropping the last external `Arc`
/// tears the whole service down, timers included.
pub struct OrderStore {
    config: StoreConfig,
    storage: Arc<dyn KvStorage>,
    state: RwLock<StoreState>,
    events: EventBus,
    timers: ProgressionTimers,
    /// Weak self-handle passed to spawned progression chains.
    self_ref: Weak<OrderStore>,
}

// Manual impl: `storage` (dyn KvStorage) and `timers` carry no `Debug`.
impl fmt::Debug for OrderStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Construction
// =============================================================================

impl OrderStore {
    /// Opens the store against an existing storage backend.
    ///
    /// Loads the persisted document from the configured key, or starts from
    /// the built-in defaults (bundled menu, default profile) when the key is
    /// absent. When `timers.resume_on_load` is set, progression restarts for
    /// every order that is still in flight.
    pub async fn open(config: StoreConfig, storage: Arc<dyn KvStorage>) -> StoreResult<Arc<Self>> {
        let key = config.storage_key().to_string();
        let state = match storage.get(&key).await? {
            Some(json) => {
                let state = StoreState::from_json(&json)?;
                info!(
                    orders = state.orders.len(),
                    cart_lines = state.cart.item_count(),
                    menu_items = state.menu.len(),
                    "Loaded persisted state"
                );
                state
            }
            None => {
                info!(key = %key, "No persisted state found, starting fresh");
                StoreState::default()
            }
        };

        let store = Arc::new_cyclic(|weak| OrderStore {
            config,
            storage,
            state: RwLock::new(state),
            events: EventBus::new(),
            timers: ProgressionTimers::new(),
            self_ref: weak.clone(),
        });

        if store.config.timers.resume_on_load {
            store.resume_progression().await;
        }

        Ok(store)
    }

    /// Opens the store on local file storage.
    ///
    /// Uses `storage.data_dir` from the config when set, otherwise the
    /// platform data directory.
    pub async fn open_local(config: StoreConfig) -> StoreResult<Arc<Self>> {
        let storage = match &config.storage.data_dir {
            Some(dir) => FileStorage::open(dir.clone()).await?,
            None => FileStorage::open_default().await?,
        };
        Self::open(config, Arc::new(storage)).await
    }

    /// Opens the store on throwaway in-memory storage.
    pub async fn in_memory(config: StoreConfig) -> StoreResult<Arc<Self>> {
        Self::open(config, Arc::new(MemoryStorage::new())).await
    }

    /// The configuration this store was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

// =============================================================================
// Cart Operations
// =============================================================================

impl OrderStore {
    /// Adds a menu item to the cart, merging into an existing line.
    pub async fn add_to_cart(&self, item_id: &str, quantity: i64) -> StoreResult<()> {
        debug!(item_id = %item_id, quantity = quantity, "add_to_cart");
        let mut state = self.state.write().await;
        let item = state
            .menu
            .iter()
            .find(|m| m.id == item_id)
            .ok_or_else(|| CoreError::MenuItemNotFound(item_id.to_string()))?
            .clone();

        state.cart.add_item(&item, quantity)?;
        self.persist(&state).await?;
        self.events.emit(StoreEvent::CartChanged);
        drop(state);

        info!(item = %item.name, quantity = quantity, "Added to cart");
        Ok(())
    }

    /// Sets the quantity of a cart line. Zero or negative removes the line.
    pub async fn update_cart_quantity(&self, item_id: &str, quantity: i64) -> StoreResult<()> {
        debug!(item_id = %item_id, quantity = quantity, "update_cart_quantity");
        let mut state = self.state.write().await;
        state.cart.update_quantity(item_id, quantity)?;
        self.persist(&state).await?;
        self.events.emit(StoreEvent::CartChanged);
        drop(state);

        info!(item_id = %item_id, quantity = quantity, "Cart line updated");
        Ok(())
    }

    /// Removes a cart line entirely.
    pub async fn remove_from_cart(&self, item_id: &str) -> StoreResult<()> {
        debug!(item_id = %item_id, "remove_from_cart");
        let mut state = self.state.write().await;
        state.cart.remove_item(item_id)?;
        self.persist(&state).await?;
        self.events.emit(StoreEvent::CartChanged);
        drop(state);

        info!(item_id = %item_id, "Removed from cart");
        Ok(())
    }

    /// Empties the cart.
    pub async fn clear_cart(&self) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state.cart.clear();
        self.persist(&state).await?;
        self.events.emit(StoreEvent::CartChanged);
        drop(state);

        info!("Cart cleared");
        Ok(())
    }

    /// A snapshot of the current cart.
    pub async fn cart(&self) -> Cart {
        self.state.read().await.cart.clone()
    }

    /// The cart subtotal (item lines only; no delivery fee).
    pub async fn cart_total(&self) -> Money {
        self.state.read().await.cart.subtotal()
    }

    /// The full checkout preview: subtotal, delivery fee, and grand total.
    pub async fn cart_totals(&self) -> CartTotals {
        self.state.read().await.cart.totals()
    }
}

// =============================================================================
// Orders
// =============================================================================

impl OrderStore {
    /// Places an order from the current cart.
    ///
    /// The order freezes a copy of the cart lines and the delivery details
    /// from the profile; later cart or profile edits never touch it. The
    /// recorded total is the item subtotal (the delivery fee stays a
    /// checkout-screen figure). On success the cart is emptied.
    ///
    /// Placing does NOT start progression. Call
    /// [`start_order_progression`](Self::start_order_progression) when the
    /// kitchen simulation should begin.
    pub async fn place_order(&self, payment_type: PaymentType) -> StoreResult<Order> {
        debug!(payment_type = ?payment_type, "place_order");
        let mut state = self.state.write().await;
        if state.cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let now = Utc::now();
        let order = Order {
            order_id: Uuid::new_v4().to_string(),
            customer_name: state.profile.name.clone(),
            phone: state.profile.phone.clone(),
            address: state.profile.address.clone(),
            items: state.cart.items.clone(),
            total_price_paisa: state.cart.subtotal_paisa(),
            payment_type,
            status: OrderStatus::Placed,
            created_at: now,
            updated_at: now,
            feedback: None,
        };

        // Newest first, matching how the order screens list them.
        state.orders.insert(0, order.clone());
        state.cart.clear();

        self.persist(&state).await?;
        self.events.emit(StoreEvent::OrderPlaced {
            order_id: order.order_id.clone(),
        });
        self.events.emit(StoreEvent::CartChanged);
        drop(state);

        info!(
            order_id = %order.order_id,
            total = %order.total_price(),
            payment = ?payment_type,
            "Order placed"
        );
        Ok(order)
    }

    /// Moves an order to a new status, enforcing the lifecycle table.
    ///
    /// Forward moves along the canonical sequence (skips included) are
    /// allowed, as is cancelling any in-flight order. Backward moves and
    /// any move out of a terminal status are rejected.
    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> StoreResult<Order> {
        debug!(order_id = %order_id, status = %status, "update_order_status");
        let mut state = self.state.write().await;
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.order_id == order_id)
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;

        let from = order.status;
        if !from.can_transition_to(status) {
            return Err(CoreError::InvalidTransition { from, to: status }.into());
        }

        order.status = status;
        order.updated_at = Utc::now();
        let updated = order.clone();

        self.persist(&state).await?;
        let event = if status == OrderStatus::Cancelled {
            StoreEvent::OrderCancelled {
                order_id: updated.order_id.clone(),
            }
        } else {
            StoreEvent::OrderStatusChanged {
                order_id: updated.order_id.clone(),
                status,
            }
        };
        self.events.emit(event);
        drop(state);

        info!(order_id = %order_id, from = %from, to = %status, "Order status updated");
        Ok(updated)
    }

    /// Cancels an in-flight order.
    ///
    /// A progression chain already sleeping for this order is left alone;
    /// it re-reads the status at fire time, sees a terminal order, and
    /// exits without advancing anything.
    pub async fn cancel_order(&self, order_id: &str) -> StoreResult<Order> {
        self.update_order_status(order_id, OrderStatus::Cancelled).await
    }

    /// Attaches customer feedback to an order. First submission wins.
    pub async fn submit_order_feedback(
        &self,
        order_id: &str,
        rating: u8,
        comment: &str,
    ) -> StoreResult<Order> {
        debug!(order_id = %order_id, rating = rating, "submit_order_feedback");
        validate_rating(rating)?;
        validate_feedback_comment(comment)?;

        let mut state = self.state.write().await;
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.order_id == order_id)
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;

        order.attach_feedback(Feedback {
            rating,
            comment: comment.to_string(),
            submitted_at: Utc::now(),
        })?;
        let updated = order.clone();

        self.persist(&state).await?;
        self.events.emit(StoreEvent::FeedbackSubmitted {
            order_id: updated.order_id.clone(),
        });
        drop(state);

        info!(order_id = %order_id, rating = rating, "Feedback recorded");
        Ok(updated)
    }

    /// All orders, newest first.
    pub async fn orders(&self) -> Vec<Order> {
        self.state.read().await.orders.clone()
    }

    /// Looks up one order by id.
    pub async fn order(&self, order_id: &str) -> Option<Order> {
        self.state
            .read()
            .await
            .orders
            .iter()
            .find(|o| o.order_id == order_id)
            .cloned()
    }

    /// Orders still in flight, newest first.
    pub async fn active_orders(&self) -> Vec<Order> {
        self.state
            .read()
            .await
            .orders
            .iter()
            .filter(|o| o.is_active())
            .cloned()
            .collect()
    }

    /// Settled orders (completed or cancelled), newest first.
    pub async fn order_history(&self) -> Vec<Order> {
        self.state
            .read()
            .await
            .orders
            .iter()
            .filter(|o| !o.is_active())
            .cloned()
            .collect()
    }
}

// =============================================================================
// Progression
// =============================================================================

impl OrderStore {
    /// Starts the timed delivery simulation for an order.
    ///
    /// Every configured interval the order advances one step along the
    /// canonical sequence until it reaches COMPLETED. Starting again for
    /// the same order replaces the pending chain rather than stacking a
    /// second one. Starting for an already settled order is a no-op.
    pub async fn start_order_progression(&self, order_id: &str) -> StoreResult<()> {
        let status = {
            let state = self.state.read().await;
            state
                .orders
                .iter()
                .find(|o| o.order_id == order_id)
                .map(|o| o.status)
                .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?
        };

        if status.is_terminal() {
            debug!(order_id = %order_id, status = %status, "Progression not started for settled order");
            return Ok(());
        }

        self.timers
            .start(self.self_ref.clone(), order_id, self.config.progression_interval());
        info!(
            order_id = %order_id,
            interval_ms = self.config.timers.progression_interval_ms,
            "Progression started"
        );
        Ok(())
    }

    /// Restarts progression for every in-flight order.
    ///
    /// Called from [`open`](Self::open) when `timers.resume_on_load` is set,
    /// so orders interrupted by a shutdown keep moving after a restart.
    /// Returns how many chains were armed.
    pub async fn resume_progression(&self) -> usize {
        let in_flight: Vec<String> = {
            let state = self.state.read().await;
            state
                .orders
                .iter()
                .filter(|o| o.is_active())
                .map(|o| o.order_id.clone())
                .collect()
        };

        let interval = self.config.progression_interval();
        for order_id in &in_flight {
            self.timers.start(self.self_ref.clone(), order_id, interval);
        }

        if !in_flight.is_empty() {
            info!(orders = in_flight.len(), "Resumed progression for in-flight orders");
        }
        in_flight.len()
    }

    /// Aborts every live progression chain. Pending advances are dropped;
    /// order statuses stay wherever they were last persisted.
    pub fn shutdown(&self) {
        self.timers.shutdown();
    }

    /// One timer-driven step. Called only from progression chains.
    ///
    /// Re-reads the order's status under the write lock, so a cancel (or
    /// any manual move) that happened while the chain slept is seen here:
    /// a terminal or missing order advances nothing and returns `None`
    /// (missing) or the terminal status, telling the chain to stop.
    ///
    /// Persistence failures are logged and swallowed. The advance already
    /// happened in memory and the chain keeps its schedule; the next
    /// successful persist writes the whole document through.
    pub(crate) async fn advance_order(&self, order_id: &str) -> Option<OrderStatus> {
        let mut state = self.state.write().await;
        let order = state.orders.iter_mut().find(|o| o.order_id == order_id)?;

        let Some(next) = order.status.next_step() else {
            // Settled while the chain slept.
            return Some(order.status);
        };
        order.status = next;
        order.updated_at = Utc::now();

        if let Err(e) = self.persist(&state).await {
            error!(order_id = %order_id, error = %e, "Failed to persist progression step");
        }
        self.events.emit(StoreEvent::OrderStatusChanged {
            order_id: order_id.to_string(),
            status: next,
        });
        drop(state);

        info!(order_id = %order_id, status = %next, "Order progressed");
        Some(next)
    }

    pub(crate) fn timers(&self) -> &ProgressionTimers {
        &self.timers
    }
}

// =============================================================================
// Menu
// =============================================================================

impl OrderStore {
    /// The current menu.
    pub async fn menu(&self) -> Vec<MenuItem> {
        self.state.read().await.menu.clone()
    }

    /// Distinct menu categories in first-seen order.
    pub async fn menu_categories(&self) -> Vec<String> {
        let state = self.state.read().await;
        let mut categories: Vec<String> = Vec::new();
        for item in &state.menu {
            if !categories.iter().any(|c| c == &item.category) {
                categories.push(item.category.clone());
            }
        }
        categories
    }

    /// Replaces the menu with the bundled catalog.
    ///
    /// Existing cart lines and orders keep their own frozen copies, so a
    /// reload never rewrites anything already priced.
    pub async fn load_menu(&self) -> StoreResult<usize> {
        let menu = menu_data::default_menu();
        let count = menu.len();

        let mut state = self.state.write().await;
        state.menu = menu;
        self.persist(&state).await?;
        self.events.emit(StoreEvent::MenuLoaded { item_count: count });
        drop(state);

        info!(items = count, "Menu loaded");
        Ok(count)
    }
}

// =============================================================================
// Profile & Settings
// =============================================================================

impl OrderStore {
    /// The customer profile.
    pub async fn profile(&self) -> Profile {
        self.state.read().await.profile.clone()
    }

    /// Replaces the profile wholesale after validation.
    pub async fn update_profile(&self, profile: Profile) -> StoreResult<()> {
        validate_profile(&profile)?;

        let mut state = self.state.write().await;
        state.profile = profile;
        self.persist(&state).await?;
        self.events.emit(StoreEvent::ProfileUpdated);
        drop(state);

        info!("Profile updated");
        Ok(())
    }

    /// The app settings.
    pub async fn settings(&self) -> Settings {
        self.state.read().await.settings
    }

    /// Applies a partial settings update and returns the merged result.
    pub async fn update_settings(&self, update: SettingsUpdate) -> StoreResult<Settings> {
        let mut state = self.state.write().await;
        update.apply_to(&mut state.settings);
        let settings = state.settings;

        self.persist(&state).await?;
        self.events.emit(StoreEvent::SettingsUpdated);
        drop(state);

        info!("Settings updated");
        Ok(settings)
    }
}

// =============================================================================
// Events & Persistence
// =============================================================================

impl OrderStore {
    /// Subscribes to the store's event feed.
    ///
    /// Events are emitted after the corresponding state change persists,
    /// in operation order. Slow consumers see `RecvError::Lagged` rather
    /// than blocking the store.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Writes the whole document to storage under the configured key.
    async fn persist(&self, state: &StoreState) -> StoreResult<()> {
        let json = state.to_json()?;
        self.storage.set(self.config.storage_key(), &json).await?;
        debug!(bytes = json.len(), "State persisted");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::state::STORAGE_KEY;
    use std::time::Duration;
    use zaiqa_storage::StorageError;

    async fn test_store() -> Arc<OrderStore> {
        OrderStore::in_memory(StoreConfig::default())
            .await
            .expect("in-memory store opens")
    }

    async fn timed_store(interval_ms: u64) -> Arc<OrderStore> {
        let mut config = StoreConfig::default();
        config.timers.progression_interval_ms = interval_ms;
        OrderStore::in_memory(config)
            .await
            .expect("in-memory store opens")
    }

    async fn placed_order(store: &OrderStore) -> Order {
        store.add_to_cart("beef-burger", 1).await.unwrap();
        store.place_order(PaymentType::Cod).await.unwrap()
    }

    // -------------------------------------------------------------------------
    // Fresh state
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_fresh_store_has_default_profile_menu_and_no_orders() {
        let store = test_store().await;

        assert_eq!(store.profile().await.name, "ALI Ahmed");
        assert!(!store.menu().await.is_empty());
        assert!(store.orders().await.is_empty());
        assert!(store.cart().await.is_empty());
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_two_beef_burgers_total_one_thousand_rupees() {
        let store = test_store().await;
        store.add_to_cart("beef-burger", 2).await.unwrap();

        assert_eq!(store.cart_total().await, Money::from_rupees(1000));

        let totals = store.cart_totals().await;
        assert_eq!(totals.subtotal_paisa, Money::from_rupees(1000).paisa());
        assert_eq!(totals.delivery_fee_paisa, Money::from_rupees(50).paisa());
        assert_eq!(totals.total_paisa, Money::from_rupees(1050).paisa());
    }

    #[tokio::test]
    async fn test_adding_same_dish_again_merges_the_line() {
        let store = test_store().await;
        store.add_to_cart("beef-burger", 1).await.unwrap();
        store.add_to_cart("beef-burger", 2).await.unwrap();

        let cart = store.cart().await;
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_unknown_dish_cannot_be_added() {
        let store = test_store().await;
        let err = store.add_to_cart("pizza", 1).await.unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::MenuItemNotFound(_))));
        assert!(store.cart().await.is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_dish_cannot_be_added() {
        let store = test_store().await;
        let err = store.add_to_cart("mutton-karahi", 1).await.unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::ItemUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_update_quantity_to_zero_or_less_removes_the_line() {
        let store = test_store().await;

        store.add_to_cart("beef-burger", 2).await.unwrap();
        store.update_cart_quantity("beef-burger", 0).await.unwrap();
        assert!(store.cart().await.is_empty());

        store.add_to_cart("beef-burger", 2).await.unwrap();
        store.update_cart_quantity("beef-burger", -1).await.unwrap();
        assert!(store.cart().await.is_empty());
    }

    #[tokio::test]
    async fn test_updating_a_line_that_is_not_in_the_cart_fails() {
        let store = test_store().await;
        let err = store.update_cart_quantity("beef-burger", 3).await.unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::CartLineNotFound(_))));

        let err = store.remove_from_cart("beef-burger").await.unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::CartLineNotFound(_))));
    }

    #[tokio::test]
    async fn test_cart_total_tracks_an_op_sequence() {
        let store = test_store().await;
        store.add_to_cart("beef-burger", 2).await.unwrap();
        store.add_to_cart("mango-lassi", 3).await.unwrap();
        store.update_cart_quantity("mango-lassi", 1).await.unwrap();
        store.remove_from_cart("beef-burger").await.unwrap();

        assert_eq!(store.cart_total().await, Money::from_rupees(250));

        store.clear_cart().await.unwrap();
        assert_eq!(store.cart_total().await, Money::zero());
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_checkout_with_empty_cart_is_rejected() {
        let store = test_store().await;
        let err = store.place_order(PaymentType::Cod).await.unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::EmptyCart)));
    }

    #[tokio::test]
    async fn test_place_order_snapshots_cart_and_profile() {
        let store = test_store().await;
        store.add_to_cart("beef-burger", 2).await.unwrap();
        store.add_to_cart("mango-lassi", 1).await.unwrap();
        let pre_total = store.cart_total().await;

        let order = store.place_order(PaymentType::Cod).await.unwrap();

        assert_eq!(order.status, OrderStatus::Placed);
        assert_eq!(order.total_price(), pre_total);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.customer_name, "ALI Ahmed");
        assert_eq!(order.payment_type, PaymentType::Cod);
        assert!(order.feedback.is_none());

        // Cart resets; the newest order sits at the head of the list.
        assert!(store.cart().await.is_empty());
        assert_eq!(store.orders().await[0].order_id, order.order_id);
    }

    #[tokio::test]
    async fn test_order_snapshot_is_isolated_from_later_cart_activity() {
        let store = test_store().await;
        store.add_to_cart("beef-burger", 2).await.unwrap();
        let order = store.place_order(PaymentType::Cod).await.unwrap();

        store.add_to_cart("zinger-burger", 5).await.unwrap();
        store.clear_cart().await.unwrap();

        let reloaded = store.order(&order.order_id).await.unwrap();
        assert_eq!(reloaded.items.len(), 1);
        assert_eq!(reloaded.items[0].quantity, 2);
        assert_eq!(reloaded.total_price(), Money::from_rupees(1000));
    }

    #[tokio::test]
    async fn test_each_order_gets_a_distinct_id() {
        let store = test_store().await;
        let first = placed_order(&store).await;
        let second = placed_order(&store).await;
        assert_ne!(first.order_id, second.order_id);
    }

    // -------------------------------------------------------------------------
    // Status lifecycle
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_forward_transition_updates_status_and_timestamp() {
        let store = test_store().await;
        let order = placed_order(&store).await;

        let updated = store
            .update_order_status(&order.order_id, OrderStatus::Accepted)
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Accepted);
        assert!(updated.updated_at >= order.updated_at);
    }

    #[tokio::test]
    async fn test_backward_transition_is_rejected() {
        let store = test_store().await;
        let order = placed_order(&store).await;
        store
            .update_order_status(&order.order_id, OrderStatus::Preparing)
            .await
            .unwrap();

        let err = store
            .update_order_status(&order.order_id, OrderStatus::Placed)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::InvalidTransition { .. })));
    }

    #[tokio::test]
    async fn test_terminal_orders_are_frozen() {
        let store = test_store().await;
        let order = placed_order(&store).await;
        store.cancel_order(&order.order_id).await.unwrap();

        for target in [
            OrderStatus::Accepted,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            let err = store
                .update_order_status(&order.order_id, target)
                .await
                .unwrap_err();
            assert!(matches!(err, StoreError::Core(CoreError::InvalidTransition { .. })));
        }
        assert_eq!(
            store.order(&order.order_id).await.unwrap().status,
            OrderStatus::Cancelled
        );
    }

    #[tokio::test]
    async fn test_unknown_order_cannot_be_updated() {
        let store = test_store().await;
        let err = store
            .update_order_status("missing", OrderStatus::Accepted)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::OrderNotFound(_))));
    }

    #[tokio::test]
    async fn test_active_and_history_views_split_on_terminal_status() {
        let store = test_store().await;
        let first = placed_order(&store).await;
        let second = placed_order(&store).await;

        store.cancel_order(&first.order_id).await.unwrap();

        let active = store.active_orders().await;
        let history = store.order_history().await;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].order_id, second.order_id);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].order_id, first.order_id);
    }

    // -------------------------------------------------------------------------
    // Feedback
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_first_feedback_submission_wins() {
        let store = test_store().await;
        let order = placed_order(&store).await;

        store
            .submit_order_feedback(&order.order_id, 5, "Shandaar!")
            .await
            .unwrap();
        let err = store
            .submit_order_feedback(&order.order_id, 1, "changed my mind")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::FeedbackAlreadySubmitted { .. })
        ));

        let feedback = store.order(&order.order_id).await.unwrap().feedback.unwrap();
        assert_eq!(feedback.rating, 5);
        assert_eq!(feedback.comment, "Shandaar!");
    }

    #[tokio::test]
    async fn test_feedback_rating_must_be_one_to_five() {
        let store = test_store().await;
        let order = placed_order(&store).await;

        for bad in [0u8, 6] {
            let err = store
                .submit_order_feedback(&order.order_id, bad, "x")
                .await
                .unwrap_err();
            assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
        }
        assert!(store.order(&order.order_id).await.unwrap().feedback.is_none());

        store
            .submit_order_feedback(&order.order_id, 1, "")
            .await
            .unwrap();
    }

    // -------------------------------------------------------------------------
    // Menu
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_menu_categories_in_first_seen_order() {
        let store = test_store().await;
        let categories = store.menu_categories().await;
        let names: Vec<&str> = categories.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            vec!["Burgers", "Biryani", "Karahi", "BBQ", "Drinks", "Desserts"]
        );
    }

    #[tokio::test]
    async fn test_load_menu_replaces_catalog_and_notifies() {
        let store = test_store().await;
        let mut events = store.subscribe();

        let count = store.load_menu().await.unwrap();

        assert!(count > 0);
        assert_eq!(store.menu().await.len(), count);
        assert_eq!(
            events.recv().await.unwrap(),
            StoreEvent::MenuLoaded { item_count: count }
        );
    }

    // -------------------------------------------------------------------------
    // Profile & settings
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_profile_replacement_is_validated() {
        let store = test_store().await;

        let mut profile = store.profile().await;
        profile.name = "Sara Khan".to_string();
        store.update_profile(profile).await.unwrap();
        assert_eq!(store.profile().await.name, "Sara Khan");

        let mut blank = store.profile().await;
        blank.name = "   ".to_string();
        let err = store.update_profile(blank).await.unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
        assert_eq!(store.profile().await.name, "Sara Khan");
    }

    #[tokio::test]
    async fn test_settings_patch_merges_only_provided_fields() {
        let store = test_store().await;

        let patch = SettingsUpdate {
            dark_mode: Some(true),
            ..Default::default()
        };
        let updated = store.update_settings(patch).await.unwrap();

        assert!(updated.dark_mode);
        assert!(updated.notifications_enabled);
        assert_eq!(store.settings().await, updated);
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_event_feed_follows_operation_order() {
        let store = test_store().await;
        let mut events = store.subscribe();

        store.add_to_cart("beef-burger", 1).await.unwrap();
        let order = store.place_order(PaymentType::Cod).await.unwrap();

        assert_eq!(events.recv().await.unwrap(), StoreEvent::CartChanged);
        assert_eq!(
            events.recv().await.unwrap(),
            StoreEvent::OrderPlaced {
                order_id: order.order_id.clone()
            }
        );
        assert_eq!(events.recv().await.unwrap(), StoreEvent::CartChanged);
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_state_survives_reopen_on_the_same_storage() {
        let storage = Arc::new(MemoryStorage::new());

        {
            let mut config = StoreConfig::default();
            config.timers.resume_on_load = false;
            let store = OrderStore::open(config, storage.clone()).await.unwrap();
            store.add_to_cart("beef-burger", 2).await.unwrap();
            store.place_order(PaymentType::Easypaisa).await.unwrap();
            store.add_to_cart("mango-lassi", 1).await.unwrap();
        }

        let mut config = StoreConfig::default();
        config.timers.resume_on_load = false;
        let store = OrderStore::open(config, storage).await.unwrap();

        let orders = store.orders().await;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].payment_type, PaymentType::Easypaisa);

        let cart = store.cart().await;
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].id, "mango-lassi");
    }

    #[tokio::test]
    async fn test_open_rejects_a_newer_schema_version() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(STORAGE_KEY, r#"{"schemaVersion": 99}"#)
            .await
            .unwrap();

        let err = OrderStore::open(StoreConfig::default(), storage)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Storage(StorageError::UnsupportedSchemaVersion { found: 99, .. })
        ));
    }

    // -------------------------------------------------------------------------
    // Progression (paused clock)
    // -------------------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn test_progression_walks_the_canonical_sequence() {
        let store = timed_store(1000).await;
        let order = placed_order(&store).await;
        let mut events = store.subscribe();

        store.start_order_progression(&order.order_id).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5500)).await;

        let mut observed = Vec::new();
        while let Ok(event) = events.try_recv() {
            if let StoreEvent::OrderStatusChanged { status, .. } = event {
                observed.push(status);
            }
        }
        assert_eq!(
            observed,
            vec![
                OrderStatus::Accepted,
                OrderStatus::Preparing,
                OrderStatus::Ready,
                OrderStatus::OutForDelivery,
                OrderStatus::Completed,
            ]
        );

        let settled = store.order(&order.order_id).await.unwrap();
        assert_eq!(settled.status, OrderStatus::Completed);
        assert_eq!(store.timers().live_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_keeps_a_single_chain() {
        let store = timed_store(1000).await;
        let order = placed_order(&store).await;

        store.start_order_progression(&order.order_id).await.unwrap();
        store.start_order_progression(&order.order_id).await.unwrap();
        assert_eq!(store.timers().live_count(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        // One interval, one step.
        let reloaded = store.order(&order.order_id).await.unwrap();
        assert_eq!(reloaded.status, OrderStatus::Accepted);
    }

    #[tokio::test]
    async fn test_progression_for_an_unknown_order_is_rejected() {
        let store = test_store().await;
        let err = store.start_order_progression("missing").await.unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::OrderNotFound(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_mid_delay_stops_the_chain_cleanly() {
        let store = timed_store(1000).await;
        let order = placed_order(&store).await;

        store.start_order_progression(&order.order_id).await.unwrap();
        store.cancel_order(&order.order_id).await.unwrap();

        tokio::time::sleep(Duration::from_millis(2500)).await;

        let reloaded = store.order(&order.order_id).await.unwrap();
        assert_eq!(reloaded.status, OrderStatus::Cancelled);
        assert_eq!(store.timers().live_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_completion_freezes_the_order_under_a_live_chain() {
        let store = timed_store(1000).await;
        let order = placed_order(&store).await;

        store.start_order_progression(&order.order_id).await.unwrap();
        store
            .update_order_status(&order.order_id, OrderStatus::Completed)
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert_eq!(
            store.order(&order.order_id).await.unwrap().status,
            OrderStatus::Completed
        );
        assert_eq!(store.timers().live_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resume_on_load_restarts_only_in_flight_orders() {
        let storage = Arc::new(MemoryStorage::new());

        {
            let mut config = StoreConfig::default();
            config.timers.resume_on_load = false;
            let store = OrderStore::open(config, storage.clone()).await.unwrap();
            let done = placed_order(&store).await;
            store
                .update_order_status(&done.order_id, OrderStatus::Completed)
                .await
                .unwrap();
            placed_order(&store).await;
        }

        let mut config = StoreConfig::default();
        config.timers.progression_interval_ms = 1000;
        let store = OrderStore::open(config, storage).await.unwrap();
        assert_eq!(store.timers().live_count(), 1);

        tokio::time::sleep(Duration::from_millis(5500)).await;

        let orders = store.orders().await;
        assert!(orders.iter().all(|o| o.status == OrderStatus::Completed));
        assert_eq!(store.timers().live_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_aborts_live_chains() {
        let store = timed_store(1000).await;
        let order = placed_order(&store).await;

        store.start_order_progression(&order.order_id).await.unwrap();
        store.shutdown();
        assert_eq!(store.timers().live_count(), 0);

        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert_eq!(
            store.order(&order.order_id).await.unwrap().status,
            OrderStatus::Placed
        );
    }
}
