//! # Cart
//!
//! The shopping cart: pure data and pure operations, no locking and no
//! persistence (the store crate owns both).
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Operations                                  │
//! │                                                                         │
//! │  Frontend Action          Store Operation          Cart Change          │
//! │  ───────────────          ───────────────          ───────────          │
//! │                                                                         │
//! │  Tap "Add to Cart" ──────► add_to_cart() ────────► merge or push line  │
//! │                                                                         │
//! │  Change Quantity ────────► update_cart_quantity()► line.qty = n        │
//! │                            (n ≤ 0 removes the line)                     │
//! │                                                                         │
//! │  Tap Remove ─────────────► remove_from_cart() ───► line removed        │
//! │                                                                         │
//! │  Tap Clear ──────────────► clear_cart() ─────────► lines cleared       │
//! │                                                                         │
//! │  View Cart ──────────────► cart_total() ─────────► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by menu item id (adding the same item merges)
//! - Quantity is ≥ 1 while a line exists (0 means the line is gone)
//! - Line totals are derived, never stored: `line_total = price × quantity`
//!   holds by construction
//! - Maximum lines and per-line quantity are capped (see crate constants)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::MenuItem;
use crate::validation;
use crate::{DELIVERY_FEE, MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the shopping cart.
///
/// ## Design Notes
/// - `id` is aliased to the menu item id: at most one line per distinct
///   dish, and re-adding merges into the existing line. Variants/addons
///   would need a composite id; they are a future version concern.
/// - `menu_item` is a frozen clone taken at add time. If the menu is
///   reloaded or a price changes afterwards, the cart keeps displaying
///   (and charging) what the customer saw when they added the dish.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Line id (same as `menu_item.id`).
    pub id: String,

    /// Menu item at time of adding (frozen).
    pub menu_item: MenuItem,

    /// Quantity in cart, always ≥ 1.
    pub quantity: i64,

    /// When this line was first added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new cart line from a menu item and quantity.
    ///
    /// ## Price Freezing
    /// The menu item is cloned at this moment. Later menu changes never
    /// affect this line.
    pub fn from_menu_item(menu_item: &MenuItem, quantity: i64) -> Self {
        CartItem {
            id: menu_item.id.clone(),
            menu_item: menu_item.clone(),
            quantity,
            added_at: Utc::now(),
        }
    }

    /// The line total (unit price × quantity), derived on demand.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.menu_item.price().multiply_quantity(self.quantity)
    }

    /// The line total in paisa.
    #[inline]
    pub fn line_total_paisa(&self) -> i64 {
        self.line_total().paisa()
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, Default, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in the cart.
    pub items: Vec<CartItem>,

    /// When the cart was created/last cleared.
    #[ts(as = "Option<String>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Some(Utc::now()),
        }
    }

    /// Adds a menu item to the cart or merges into the existing line.
    ///
    /// ## Behavior
    /// - Item already in cart: quantity increases by `quantity`
    /// - Item not in cart: a new line is appended
    ///
    /// ## Errors
    /// - Quantity ≤ 0 is rejected (never a silent no-op)
    /// - Unavailable items are rejected
    /// - Line-count and per-line quantity caps are enforced
    pub fn add_item(&mut self, menu_item: &MenuItem, quantity: i64) -> CoreResult<()> {
        validation::validate_quantity(quantity)?;

        if !menu_item.available {
            return Err(CoreError::ItemUnavailable {
                name: menu_item.name.clone(),
            });
        }

        // Merge into an existing line for the same dish
        if let Some(line) = self.items.iter_mut().find(|l| l.id == menu_item.id) {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }
        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        self.items.push(CartItem::from_menu_item(menu_item, quantity));
        Ok(())
    }

    /// Overwrites the quantity of a line (not an increment).
    ///
    /// ## Behavior
    /// - Quantity ≤ 0: the line is removed (same as [`Cart::remove_item`])
    /// - Line not found: error, never a silent no-op
    pub fn update_quantity(&mut self, item_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return self.remove_item(item_id);
        }

        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        match self.items.iter_mut().find(|l| l.id == item_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::CartLineNotFound(item_id.to_string())),
        }
    }

    /// Removes a line from the cart by id.
    pub fn remove_item(&mut self, item_id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|l| l.id != item_id);

        if self.items.len() == initial_len {
            Err(CoreError::CartLineNotFound(item_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Some(Utc::now());
    }

    /// Returns the number of distinct lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// The cart subtotal: sum of line totals, no delivery fee.
    ///
    /// This is the amount recorded as the order total at checkout.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|l| l.line_total()).sum()
    }

    /// The cart subtotal in paisa.
    pub fn subtotal_paisa(&self) -> i64 {
        self.subtotal().paisa()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Totals summary for checkout screens.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for checkout display.
///
/// The delivery fee appears here and only here: the recorded order total
/// is the subtotal, matching what order history shows.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal_paisa: i64,
    pub delivery_fee_paisa: i64,
    pub total_paisa: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        let subtotal = cart.subtotal();
        let total = subtotal + DELIVERY_FEE;
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal_paisa: subtotal.paisa(),
            delivery_fee_paisa: DELIVERY_FEE.paisa(),
            total_paisa: total.paisa(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
