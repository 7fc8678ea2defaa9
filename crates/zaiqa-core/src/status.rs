//! # Order Status Lifecycle
//!
//! The order state machine: a fixed forward sequence with two terminal
//! states.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Order Status Lifecycle                             │
//! │                                                                         │
//! │  PLACED ──► ACCEPTED ──► PREPARING ──► READY ──► OUT_FOR_DELIVERY      │
//! │    │            │            │           │              │               │
//! │    │            │            │           │              ▼               │
//! │    │            │            │           │          COMPLETED ◄── ⛔    │
//! │    │            │            │           │          (terminal)         │
//! │    ▼            ▼            ▼           ▼                              │
//! │  ──────────── CANCELLED (terminal, manual only) ──────────             │
//! │                                                                         │
//! │  Rules:                                                                │
//! │  • Forward moves only (skipping ahead is allowed for manual updates)   │
//! │  • CANCELLED reachable from any non-terminal status                    │
//! │  • Terminal statuses never change again                                │
//! │  • The progression timer advances exactly one step at a time           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Statuses serialize as SCREAMING_SNAKE_CASE strings (`"PLACED"`,
//! `"OUT_FOR_DELIVERY"`, ...) to match the persisted document and the
//! frontend's expectations.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Order Status
// =============================================================================

/// The status of a customer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order submitted by the customer.
    Placed,
    /// Restaurant has accepted the order.
    Accepted,
    /// Kitchen is preparing the food.
    Preparing,
    /// Food is ready and waiting for the rider.
    Ready,
    /// Rider is on the way to the customer.
    OutForDelivery,
    /// Order delivered. Terminal.
    Completed,
    /// Order cancelled before completion. Terminal, manual only.
    Cancelled,
}

/// The canonical progression sequence, in order.
///
/// The auto-progression timer walks this array one step per tick.
/// `CANCELLED` is deliberately absent: it is a manual escape hatch,
/// never a step the timer takes.
pub const STATUS_SEQUENCE: [OrderStatus; 6] = [
    OrderStatus::Placed,
    OrderStatus::Accepted,
    OrderStatus::Preparing,
    OrderStatus::Ready,
    OrderStatus::OutForDelivery,
    OrderStatus::Completed,
];

impl OrderStatus {
    /// Position of this status in [`STATUS_SEQUENCE`], if it has one.
    ///
    /// `CANCELLED` sits outside the sequence and returns `None`.
    #[inline]
    pub const fn sequence_position(&self) -> Option<usize> {
        match self {
            OrderStatus::Placed => Some(0),
            OrderStatus::Accepted => Some(1),
            OrderStatus::Preparing => Some(2),
            OrderStatus::Ready => Some(3),
            OrderStatus::OutForDelivery => Some(4),
            OrderStatus::Completed => Some(5),
            OrderStatus::Cancelled => None,
        }
    }

    /// Checks if this status is terminal (no further transitions, ever).
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Checks if the order is still in flight (not terminal).
    #[inline]
    pub const fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// The next status in the canonical sequence, if any.
    ///
    /// This is the single step the progression timer takes on each fire.
    /// Terminal statuses have no next step.
    ///
    /// ## Example
    /// ```rust
    /// use zaiqa_core::status::OrderStatus;
    ///
    /// assert_eq!(OrderStatus::Placed.next_step(), Some(OrderStatus::Accepted));
    /// assert_eq!(OrderStatus::Ready.next_step(), Some(OrderStatus::OutForDelivery));
    /// assert_eq!(OrderStatus::Completed.next_step(), None);
    /// assert_eq!(OrderStatus::Cancelled.next_step(), None);
    /// ```
    pub fn next_step(&self) -> Option<OrderStatus> {
        let pos = self.sequence_position()?;
        STATUS_SEQUENCE.get(pos + 1).copied()
    }

    /// Checks whether a transition from `self` to `to` is legal.
    ///
    /// ## Rules
    /// - Nothing leaves a terminal status.
    /// - `CANCELLED` is reachable from any non-terminal status.
    /// - Otherwise the move must be strictly forward along the canonical
    ///   sequence. Skipping ahead is legal (a manual update may jump
    ///   PLACED → READY); moving backward or re-asserting the current
    ///   status is not.
    ///
    /// ## Example
    /// ```rust
    /// use zaiqa_core::status::OrderStatus;
    ///
    /// assert!(OrderStatus::Placed.can_transition_to(OrderStatus::Accepted));
    /// assert!(OrderStatus::Placed.can_transition_to(OrderStatus::Ready));
    /// assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Cancelled));
    /// assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Placed));
    /// assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Cancelled));
    /// assert!(!OrderStatus::Placed.can_transition_to(OrderStatus::Placed));
    /// ```
    pub fn can_transition_to(&self, to: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        if to == OrderStatus::Cancelled {
            return true;
        }
        match (self.sequence_position(), to.sequence_position()) {
            (Some(from_pos), Some(to_pos)) => to_pos > from_pos,
            _ => false,
        }
    }

    /// Human-readable label for order tracking screens.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "Order placed",
            OrderStatus::Accepted => "Order accepted",
            OrderStatus::Preparing => "Preparing your order...",
            OrderStatus::Ready => "Order ready",
            OrderStatus::OutForDelivery => "Out for delivery",
            OrderStatus::Completed => "Order delivered",
            OrderStatus::Cancelled => "Order cancelled",
        }
    }

    /// Wire spelling of the status (`"OUT_FOR_DELIVERY"` etc).
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "PLACED",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::OutForDelivery => "OUT_FOR_DELIVERY",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

/// New orders start as PLACED.
impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Placed
    }
}

/// Display uses the wire spelling, matching logs to the persisted document.
impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
