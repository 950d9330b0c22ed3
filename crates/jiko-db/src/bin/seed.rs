//! # Seed Data Generator
//!
//! Populates a database with a sample Nairobi kitchen for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./jiko_dev.db
//! cargo run -p jiko-db --bin seed
//!
//! # Specify database path
//! cargo run -p jiko-db --bin seed -- --db ./data/jiko.db
//! ```
//!
//! ## Generated Data
//! - Menu items, the mains carrying a required starch (rice or ugali)
//! - Kitchen stock with reorder thresholds and a few expiry dates
//! - Expense categories with monthly budgets

use std::env;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use jiko_core::money::Money;
use jiko_core::types::{
    Accompaniment, Ingredient, NewExpenseCategory, NewInventoryItem, NewMenuItem,
};
use jiko_db::{Database, DbConfig, InventoryRepository, LocalStore, Persistence, Repository};

/// (name, price, category, takes a starch)
const MENU: &[(&str, i64, &str, bool)] = &[
    ("Beef Stew", 450, "Mains", true),
    ("Chicken Curry", 520, "Mains", true),
    ("Sukuma & Beef Fry", 400, "Mains", true),
    ("Tilapia Fry", 750, "Mains", true),
    ("Githeri", 250, "Mains", false),
    ("Pilau", 350, "Mains", false),
    ("Chapati", 30, "Sides", false),
    ("Kachumbari", 80, "Sides", false),
    ("Chips", 200, "Sides", false),
    ("Chai", 60, "Drinks", false),
    ("Soda 500ml", 80, "Drinks", false),
    ("Passion Juice", 120, "Drinks", false),
];

/// (name, quantity, unit, min stock, cost, expires in days)
const STOCK: &[(&str, i64, &str, i64, i64, Option<i64>)] = &[
    ("Rice", 40, "kg", 10, 160, None),
    ("Maize Flour", 35, "kg", 10, 120, None),
    ("Beef", 12, "kg", 5, 650, Some(4)),
    ("Chicken", 8, "kg", 5, 550, Some(3)),
    ("Tilapia", 6, "pcs", 8, 300, Some(2)),
    ("Sukuma Wiki", 3, "kg", 4, 60, Some(2)),
    ("Tomatoes", 10, "kg", 4, 100, Some(5)),
    ("Onions", 15, "kg", 5, 90, None),
    ("Cooking Oil", 20, "l", 5, 280, None),
    ("Milk", 12, "l", 6, 65, Some(3)),
];

/// (name, monthly budget, color)
const CATEGORIES: &[(&str, i64, &str)] = &[
    ("Ingredients", 150_000, "#16a34a"),
    ("Utilities", 25_000, "#2563eb"),
    ("Rent", 60_000, "#9333ea"),
    ("Wages", 120_000, "#ea580c"),
    ("Maintenance", 10_000, "#64748b"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let mut db_path = env::var("JIKO_DB_PATH").unwrap_or_else(|_| String::from("./jiko_dev.db"));

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Jiko POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./jiko_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Jiko POS Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let store = LocalStore::sqlite(db);

    let existing = store.menu_items().get_all().await?.len();
    if existing > 0 {
        println!("⚠ Database already has {} menu items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    for (name, price, category, with_starch) in MENU {
        let mut item = NewMenuItem::new(*name, Money::from_major(*price), *category);
        if *with_starch {
            item = item
                .with_accompaniment(Accompaniment::new("Rice", Money::zero(), true))
                .with_accompaniment(Accompaniment::new("Ugali", Money::zero(), true))
                .with_ingredient(Ingredient::new("Rice", Decimal::new(2, 1), "kg"));
        }
        if *category == "Mains" {
            item = item
                .with_accompaniment(Accompaniment::new("Kachumbari", Money::from_major(50), false))
                .with_accompaniment(Accompaniment::new("Extra Chapati", Money::from_major(30), false));
        }
        store.menu_items().create(item).await?;
    }
    println!("✓ Created {} menu items", MENU.len());

    let today = Utc::now().date_naive();
    for (name, quantity, unit, min_stock, cost, expires_in) in STOCK {
        store
            .inventory()
            .create(NewInventoryItem {
                name: name.to_string(),
                quantity: Decimal::from(*quantity),
                unit: unit.to_string(),
                min_stock: Decimal::from(*min_stock),
                cost: Money::from_major(*cost),
                expiry_date: expires_in.map(|days| today + Duration::days(days)),
            })
            .await?;
    }
    println!("✓ Created {} inventory items", STOCK.len());

    for (name, budget, color) in CATEGORIES {
        store
            .expense_categories()
            .create(NewExpenseCategory {
                name: name.to_string(),
                budget: Money::from_major(*budget),
                color: color.to_string(),
            })
            .await?;
    }
    println!("✓ Created {} expense categories", CATEGORIES.len());

    let low = store.inventory().low_stock().await?;
    println!();
    println!("Low stock after seeding: {}", low.len());
    for item in &low {
        println!("  {} ({} {})", item.name, item.quantity, item.unit);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
