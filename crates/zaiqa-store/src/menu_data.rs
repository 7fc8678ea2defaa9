//! # Bundled Menu Dataset
//!
//! The default restaurant catalog, compiled into the binary via
//! `include_str!`. Prices are integer paisa, ids are stable slugs that
//! cart lines and orders reference.
//!
//! Editing `data/menu.json` is the supported way to change the catalog;
//! the dataset is read-only at runtime and replaced wholesale by
//! `OrderStore::load_menu`.

use zaiqa_core::MenuItem;

/// Raw bundled dataset.
const MENU_JSON: &str = include_str!("../data/menu.json");

/// Parses the bundled menu.
///
/// The dataset ships inside the binary, so a parse failure is a build
/// defect, not a runtime condition.
pub fn default_menu() -> Vec<MenuItem> {
    serde_json::from_str(MENU_JSON).expect("bundled menu.json must parse")
}
