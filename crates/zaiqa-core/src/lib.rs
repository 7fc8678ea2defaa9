//! # zaiqa-core: Pure Business Logic for Zaiqa
//!
//! This crate is the **heart** of Zaiqa, a food-ordering app for Pakistani
//! restaurants. It contains all business logic as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Zaiqa Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React Native)                      │   │
//! │  │    Menu UI ──► Cart UI ──► Checkout UI ──► Order Tracking      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ store operations                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  zaiqa-store (Order Store)                      │   │
//! │  │    add_to_cart, place_order, start_order_progression, etc.     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ zaiqa-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  status   │  │   │
//! │  │   │ MenuItem  │  │   Money   │  │   Cart    │  │ lifecycle │  │   │
//! │  │   │   Order   │  │  (paisa)  │  │ CartItem  │  │  machine  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 zaiqa-storage (Persistence Layer)               │   │
//! │  │              JSON key-value files, atomic writes                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, Order, Profile, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart with merge-on-add and derived totals
//! - [`status`] - Order status lifecycle (the state machine)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, and timers are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paisa (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use zaiqa_core::money::Money;
//! use zaiqa_core::status::OrderStatus;
//!
//! // Create money from paisa (never from floats!)
//! let price = Money::from_rupees(500); // Rs 500 beef burger
//!
//! // Two burgers
//! let total: Money = price * 2;
//! assert_eq!(total.rupees(), 1000);
//!
//! // A freshly placed order advances to ACCEPTED next
//! assert_eq!(OrderStatus::Placed.next_step(), Some(OrderStatus::Accepted));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod status;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use zaiqa_core::Money` instead of
// `use zaiqa_core::money::Money`

pub use cart::{Cart, CartItem, CartTotals};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use status::OrderStatus;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable order sizes.
/// Can be made configurable per-restaurant in future versions.
pub const MAX_CART_LINES: usize = 50;

/// Maximum quantity of a single line in the cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 100 instead of 10).
/// Configurable per-restaurant in future versions.
pub const MAX_LINE_QUANTITY: i64 = 99;

/// Flat delivery fee charged at checkout (Rs 50)
///
/// ## Business Reason
/// A single city-wide rate for v0.1. Zone-based pricing is a future
/// version concern. The fee is presentation-level: it appears in
/// [`cart::CartTotals`] but is NOT part of the recorded order total.
pub const DELIVERY_FEE: Money = Money::from_rupees(50);

/// Maximum length of an order feedback comment
pub const MAX_FEEDBACK_COMMENT_LEN: usize = 500;
