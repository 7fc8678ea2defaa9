//! # Domain Types
//!
//! Core domain types used throughout Zaiqa.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    MenuItem     │   │     Order       │   │    Feedback     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  order_id       │   │  rating (1-5)   │       │
//! │  │  name           │   │  customer_name  │   │  comment        │       │
//! │  │  price_paisa    │   │  items (frozen) │   │  submitted_at   │       │
//! │  │  category       │   │  total (frozen) │   └─────────────────┘       │
//! │  │  available      │   │  status         │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Profile      │   │    Settings     │   │  PaymentType    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name, phone    │   │  dark_mode      │   │  COD            │       │
//! │  │  address, email │   │  notifications  │   │  Easypaisa      │       │
//! │  └─────────────────┘   │  promotions ... │   │  JazzCash ...   │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! An [`Order`] freezes everything it needs at checkout: customer details
//! are copied from the profile, cart lines are deep-copied, and the total
//! is recorded once. Later edits to the profile, menu, or cart never touch
//! a placed order.
//!
//! ## Wire Format
//! All types serialize with camelCase field names to match the persisted
//! state document and the frontend's expectations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::status::OrderStatus;

// =============================================================================
// Menu Item
// =============================================================================

/// A dish on the restaurant menu.
///
/// Menu items are catalog data: loaded wholesale from the bundled dataset
/// and never mutated by store operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Unique identifier within the menu.
    pub id: String,

    /// Display name shown on menu and order screens.
    pub name: String,

    /// Short description for the item card.
    pub description: String,

    /// Price in paisa (smallest currency unit).
    pub price_paisa: i64,

    /// Free-form category name ("Burgers", "Karahi", ...).
    pub category: String,

    /// Whether the item can currently be ordered.
    pub available: bool,

    /// Image reference for the item card.
    pub image: String,
}

impl MenuItem {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paisa(self.price_paisa)
    }
}

// =============================================================================
// Payment Type
// =============================================================================

/// How the customer chose to pay at checkout.
///
/// Wire spellings match the frontend's payment selector exactly, so the
/// persisted document round-trips without translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentType {
    /// Cash on delivery.
    #[serde(rename = "COD")]
    Cod,
    /// Easypaisa mobile wallet.
    Easypaisa,
    /// JazzCash mobile wallet.
    JazzCash,
    /// Direct bank transfer.
    BankTransfer,
    /// Generic digital payment (legacy orders).
    Digital,
}

impl Default for PaymentType {
    fn default() -> Self {
        PaymentType::Cod
    }
}

// =============================================================================
// Feedback
// =============================================================================

/// Customer feedback attached to a completed order.
///
/// Immutable once attached: resubmission is rejected, not merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// Star rating, 1 to 5.
    pub rating: u8,

    /// Free-text comment (may be empty).
    pub comment: String,

    /// When the feedback was submitted.
    #[ts(as = "String")]
    pub submitted_at: DateTime<Utc>,
}

// =============================================================================
// Order
// =============================================================================

/// A customer order.
///
/// Uses the snapshot pattern: everything here was frozen at checkout.
/// The only fields that change afterwards are `status`, `updated_at`,
/// and (once) `feedback`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub order_id: String,

    /// Customer name at time of checkout (frozen).
    pub customer_name: String,

    /// Customer phone at time of checkout (frozen).
    pub phone: String,

    /// Delivery address at time of checkout (frozen).
    pub address: String,

    /// Cart lines at time of checkout (deep copies, frozen).
    pub items: Vec<crate::cart::CartItem>,

    /// Order total in paisa at time of checkout (frozen, never recomputed).
    pub total_price_paisa: i64,

    /// How the customer chose to pay.
    pub payment_type: PaymentType,

    /// Current lifecycle status.
    pub status: OrderStatus,

    /// When the order was placed.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the order last changed (status, feedback).
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,

    /// Customer feedback, at most one per order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
}

impl Order {
    /// Returns the frozen order total as Money.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_paisa(self.total_price_paisa)
    }

    /// Checks if the order is still in flight (not terminal).
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Attaches feedback to the order.
    ///
    /// Fails with [`CoreError::FeedbackAlreadySubmitted`] if feedback is
    /// already present. The first submission always wins.
    ///
    /// [`CoreError::FeedbackAlreadySubmitted`]: crate::error::CoreError::FeedbackAlreadySubmitted
    pub fn attach_feedback(&mut self, feedback: Feedback) -> crate::error::CoreResult<()> {
        if self.feedback.is_some() {
            return Err(crate::error::CoreError::FeedbackAlreadySubmitted {
                order_id: self.order_id.clone(),
            });
        }
        self.feedback = Some(feedback);
        Ok(())
    }
}

// =============================================================================
// Profile
// =============================================================================

/// The customer profile used to address orders.
///
/// Updated by whole-object replacement; orders keep their own frozen copy
/// of the fields they need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub email: String,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            name: "ALI Ahmed".to_string(),
            phone: "+92 300 1234567".to_string(),
            address: "Abbottabad, Pakistan".to_string(),
            email: "ali.ahmed@gmail.com".to_string(),
        }
    }
}

// =============================================================================
// Settings
// =============================================================================

/// App settings toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub dark_mode: bool,
    pub notifications_enabled: bool,
    pub order_updates: bool,
    pub promotions: bool,
    pub biometric_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            dark_mode: false,
            notifications_enabled: true,
            order_updates: true,
            promotions: true,
            biometric_enabled: false,
        }
    }
}

/// A partial settings update: only the provided fields change.
///
/// ## Example
/// ```rust
/// use zaiqa_core::types::{Settings, SettingsUpdate};
///
/// let mut settings = Settings::default();
/// let patch = SettingsUpdate {
///     dark_mode: Some(true),
///     ..Default::default()
/// };
/// patch.apply_to(&mut settings);
///
/// assert!(settings.dark_mode);
/// assert!(settings.notifications_enabled); // untouched
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_updates: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biometric_enabled: Option<bool>,
}

impl SettingsUpdate {
    /// Merges the provided fields into `settings`, leaving the rest as-is.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(dark_mode) = self.dark_mode {
            settings.dark_mode = dark_mode;
        }
        if let Some(notifications_enabled) = self.notifications_enabled {
            settings.notifications_enabled = notifications_enabled;
        }
        if let Some(order_updates) = self.order_updates {
            settings.order_updates = order_updates;
        }
        if let Some(promotions) = self.promotions {
            settings.promotions = promotions;
        }
        if let Some(biometric_enabled) = self.biometric_enabled {
            settings.biometric_enabled = biometric_enabled;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_price() {
        let item = MenuItem {
            id: "burger-1".to_string(),
            name: "Beef Burger".to_string(),
            description: "Juicy grilled beef patty".to_string(),
            price_paisa: 50000,
            category: "Burgers".to_string(),
            available: true,
            image: "burger.png".to_string(),
        };
        assert_eq!(item.price().rupees(), 500);
    }

    #[test]
    fn test_payment_type_wire_format() {
        assert_eq!(serde_json::to_string(&PaymentType::Cod).unwrap(), "\"COD\"");
        assert_eq!(
            serde_json::to_string(&PaymentType::JazzCash).unwrap(),
            "\"JazzCash\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentType::Easypaisa).unwrap(),
            "\"Easypaisa\""
        );
        let parsed: PaymentType = serde_json::from_str("\"BankTransfer\"").unwrap();
        assert_eq!(parsed, PaymentType::BankTransfer);
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert!(!settings.dark_mode);
        assert!(settings.notifications_enabled);
        assert!(settings.order_updates);
        assert!(settings.promotions);
        assert!(!settings.biometric_enabled);
    }

    #[test]
    fn test_settings_partial_update() {
        let mut settings = Settings::default();
        let patch = SettingsUpdate {
            dark_mode: Some(true),
            promotions: Some(false),
            ..Default::default()
        };
        patch.apply_to(&mut settings);

        assert!(settings.dark_mode);
        assert!(!settings.promotions);
        // Everything else untouched
        assert!(settings.notifications_enabled);
        assert!(settings.order_updates);
        assert!(!settings.biometric_enabled);
    }

    #[test]
    fn test_settings_camel_case_wire_format() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("\"darkMode\""));
        assert!(json.contains("\"notificationsEnabled\""));
        assert!(json.contains("\"biometricEnabled\""));
    }

    #[test]
    fn test_profile_default_matches_seed_profile() {
        let profile = Profile::default();
        assert_eq!(profile.name, "ALI Ahmed");
        assert_eq!(profile.phone, "+92 300 1234567");
    }
}
