//! # Error Types
//!
//! Domain-specific error types for zaiqa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  zaiqa-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  zaiqa-storage errors (separate crate)                                 │
//! │  └── StorageError     - Persistence operation failures                 │
//! │                                                                         │
//! │  zaiqa-store errors (service crate)                                    │
//! │  └── StoreError       - What callers of the store see                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → caller               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, order id, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::status::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Menu item cannot be found.
    ///
    /// ## When This Occurs
    /// - Item id doesn't exist in the loaded menu
    /// - Menu was replaced and the item id went away
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    /// Menu item exists but is marked unavailable.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart ("Chicken Karahi")
    ///      │
    ///      ▼
    /// Check availability: available=false
    ///      │
    ///      ▼
    /// ItemUnavailable { name: "Chicken Karahi" }
    ///      │
    ///      ▼
    /// UI shows: "Chicken Karahi is currently unavailable"
    /// ```
    #[error("{name} is currently unavailable")]
    ItemUnavailable { name: String },

    /// Cart line cannot be found.
    ///
    /// ## When This Occurs
    /// - update/remove called with an id that has no line in the cart
    /// - the line was already removed by an earlier call
    #[error("Cart line not found: {0}")]
    CartLineNotFound(String),

    /// Cart has exceeded maximum allowed distinct lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Order not found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Requested status change is not a legal lifecycle transition.
    ///
    /// ## When This Occurs
    /// - Moving backward (PREPARING → PLACED)
    /// - Leaving a terminal status (COMPLETED → anything)
    /// - Re-asserting the current status (PLACED → PLACED)
    #[error("Order status cannot change from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Feedback was already submitted for this order.
    ///
    /// Feedback is immutable once attached; a second submission is
    /// rejected rather than silently overwriting the first.
    #[error("Feedback already submitted for order {order_id}")]
    FeedbackAlreadySubmitted { order_id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
