//! # Order Flow Demo
//!
//! Walks one order through the full Zaiqa flow: browse the menu, build a
//! cart, check out, watch the kitchen simulation advance the order, leave
//! feedback.
//!
//! ## Usage
//! ```bash
//! # Default: in-memory storage, 1 second between status steps
//! cargo run -p zaiqa-store --bin demo
//!
//! # Slower kitchen
//! cargo run -p zaiqa-store --bin demo -- --interval-ms 3000
//!
//! # Persist to a directory (rerun to see orders survive a restart)
//! cargo run -p zaiqa-store --bin demo -- --data-dir ./zaiqa-data
//! ```

use std::env;
use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use zaiqa_core::{Money, PaymentType};
use zaiqa_storage::FileStorage;
use zaiqa_store::{OrderStore, StoreConfig, StoreEvent};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut interval_ms: u64 = 1000;
    let mut data_dir: Option<String> = None;
    let mut verbose = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--interval-ms" | "-i" => {
                if i + 1 < args.len() {
                    interval_ms = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "--data-dir" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => {
                println!("Zaiqa Order Flow Demo");
                println!();
                println!("Usage: demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -i, --interval-ms <MS>  Delay between status steps (default: 1000)");
                println!("  -d, --data-dir <PATH>   Persist state under PATH instead of in memory");
                println!("  -v, --verbose           Structured logs alongside the demo output");
                println!("  -h, --help              Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    if verbose {
        zaiqa_store::init_tracing();
    }

    let mut config = StoreConfig::default();
    config.timers.progression_interval_ms = interval_ms;
    // The demo drives progression itself.
    config.timers.resume_on_load = false;

    println!("🍛 Zaiqa Order Flow Demo");
    println!("========================");

    let store = match &data_dir {
        Some(dir) => {
            println!("Storage: {}", dir);
            let storage = FileStorage::open(dir.clone()).await?;
            OrderStore::open(config, Arc::new(storage)).await?
        }
        None => {
            println!("Storage: in-memory (nothing persists)");
            OrderStore::in_memory(config).await?
        }
    };
    println!();

    // Browse the menu
    let menu = store.menu().await;
    println!("Menu ({} items):", menu.len());
    for item in &menu {
        let marker = if item.available { ' ' } else { '✗' };
        println!("  {} {:<9} {:<16} {}", marker, item.category, item.name, item.price());
    }

    // Build the cart
    store.add_to_cart("beef-burger", 2).await?;
    store.add_to_cart("mango-lassi", 1).await?;

    let cart = store.cart().await;
    let totals = store.cart_totals().await;
    println!();
    println!("Cart:");
    for line in &cart.items {
        println!(
            "  {} x{} = {}",
            line.menu_item.name,
            line.quantity,
            line.line_total()
        );
    }
    println!("  Subtotal:     {}", Money::from_paisa(totals.subtotal_paisa));
    println!("  Delivery fee: {}", Money::from_paisa(totals.delivery_fee_paisa));
    println!("  Total:        {}", Money::from_paisa(totals.total_paisa));

    // Check out
    let order = store.place_order(PaymentType::Cod).await?;
    println!();
    println!("✓ Order placed: {}", order.order_id);
    println!("  Deliver to: {}, {}", order.customer_name, order.address);
    println!("  Payment: cash on delivery, {}", order.total_price());

    // Watch the kitchen simulation
    let mut events = store.subscribe();
    store.start_order_progression(&order.order_id).await?;

    println!();
    println!("Tracking order:");
    loop {
        match events.recv().await {
            Ok(StoreEvent::OrderStatusChanged { status, .. }) => {
                println!("  ✓ {}", status.label());
                if status.is_terminal() {
                    break;
                }
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                eprintln!("  ⚠ Dropped {} events", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }

    // Leave feedback
    store
        .submit_order_feedback(&order.order_id, 5, "Mazay daar! Burger was excellent.")
        .await?;
    println!();
    println!("✓ Feedback submitted (5 stars)");

    let history = store.order_history().await;
    println!("✓ Orders in history: {}", history.len());

    store.shutdown();
    println!();
    println!("✓ Demo complete!");

    Ok(())
}
