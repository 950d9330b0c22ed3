//! # jiko-core: Pure Business Logic for Jiko POS
//!
//! This crate holds the restaurant rules of Jiko POS as pure functions and
//! plain data, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Jiko POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboard panels                             │   │
//! │  │    Sales ──► Menu ──► Inventory ──► Expenses ──► Reports       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/backoffice commands                     │   │
//! │  │    add_to_order, complete_sale, create_expense, open_panel     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ jiko-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌───────────────┐        │   │
//! │  │   │  types  │ │  money  │ │  order  │ │ accompaniment │        │   │
//! │  │   │ pricing │ │ VatRate │ │ SaleItem│ │   selection   │        │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └───────────────┘        │   │
//! │  │   ┌────────────┐ ┌─────────┐ ┌─────────┐                       │   │
//! │  │   │ validation │ │ access  │ │ reports │                       │   │
//! │  │   └────────────┘ └─────────┘ └─────────┘                       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    jiko-db (Persistence)                        │   │
//! │  │         Repositories over a key-value store (SQLite / memory)  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, Sale, InventoryItem, Expense, ...)
//! - [`money`] - Exact decimal money with whole-shilling rounding
//! - [`pricing`] - VAT, totals and change
//! - [`order`] - The in-progress order and checkout
//! - [`accompaniment`] - Required/optional side selection
//! - [`validation`] - Boundary validators
//! - [`access`] - Role to panel policy
//! - [`reports`] - Sales, expense and stock aggregates
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use jiko_core::money::Money;
//! use jiko_core::pricing::{calculate_change, calculate_total_price};
//! use jiko_core::types::VatRate;
//!
//! let total = calculate_total_price(Money::from_major(450), VatRate::default());
//! assert_eq!(total, Money::from_major(522));
//!
//! let change = calculate_change(Money::from_major(600), total);
//! assert_eq!(change, Money::from_major(78));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod access;
pub mod accompaniment;
pub mod error;
pub mod money;
pub mod order;
pub mod pricing;
pub mod reports;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use access::{Panel, Role, User};
pub use accompaniment::{AccompanimentSelection, Toggle};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::Order;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines in a single order.
///
/// Keeps a mistyped order (or a stuck key) from growing without bound.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity on one order line.
pub const MAX_LINE_QUANTITY: u32 = 999;
