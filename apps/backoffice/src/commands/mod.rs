//! # Commands Module
//!
//! Every operation the back-office panels call.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs          ◄─── You are here (exports)
//! ├── auth.rs         ◄─── Sign in / out through the auth backend
//! ├── navigation.rs   ◄─── Panel access for the signed-in role
//! ├── menu.rs         ◄─── Dishes, sides, availability
//! ├── order.rs        ◄─── Till: picker, order lines, complete sale
//! ├── sales.rs        ◄─── Sales history
//! ├── inventory.rs    ◄─── Stock, restock, consumption
//! ├── expenses.rs     ◄─── Expense log and review
//! ├── categories.rs   ◄─── Expense categories and budgets
//! ├── reports.rs      ◄─── Sales, expense and stock aggregates
//! └── config.rs       ◄─── Store settings
//! ```
//!
//! ## State Injection
//! Each command takes only the state it touches:
//! ```rust,ignore
//! // Only needs persistence
//! menu::list_menu_items(app.db()).await?;
//!
//! // Only needs the till
//! order::adjust_line_quantity(app.order(), &line_id, -1)?;
//!
//! // Needs both
//! order::complete_sale(app.db(), app.order(), PaymentMethod::Mpesa, 600.0).await?;
//! ```
//!
//! Every command returns `Result<T, ApiError>` (or a plain value when it
//! cannot fail). Errors are logged where they are converted and never retried.

pub mod auth;
pub mod categories;
pub mod config;
pub mod expenses;
pub mod inventory;
pub mod menu;
pub mod navigation;
pub mod order;
pub mod reports;
pub mod sales;
