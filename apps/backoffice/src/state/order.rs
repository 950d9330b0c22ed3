//! # Order State
//!
//! The order being composed at the till, plus the dish currently being
//! configured in the accompaniment picker.
//!
//! ## Order Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order State Operations                               │
//! │                                                                         │
//! │  Panel Action            Command                   State Change         │
//! │  ────────────            ───────                   ────────────         │
//! │                                                                         │
//! │  Tap dish (no sides) ──► select_menu_item() ─────► order.add_item()    │
//! │                                                                         │
//! │  Tap dish (sides) ─────► select_menu_item() ─────► pending = Some(..)  │
//! │                                                                         │
//! │  Tap side ─────────────► toggle_accompaniment() ─► pending.toggle()    │
//! │                                                                         │
//! │  Confirm ──────────────► confirm_selection() ────► pending → order     │
//! │                                                                         │
//! │  +/- ──────────────────► adjust_line_quantity() ─► line qty ± 1        │
//! │                                                                         │
//! │  Pay ──────────────────► complete_sale() ────────► order.settle()      │
//! │                                                                         │
//! │  NOTE: the lock is never held across an await.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use ts_rs::TS;

use jiko_core::money::Money;
use jiko_core::types::{Accompaniment, MenuItem, SaleItem};
use jiko_core::{AccompanimentSelection, Order, Toggle};

/// A dish waiting in the accompaniment picker.
#[derive(Debug, Clone)]
pub struct PendingItem {
    pub menu_item: MenuItem,
    pub selection: AccompanimentSelection,
}

impl PendingItem {
    pub fn open(menu_item: MenuItem) -> Self {
        let selection = AccompanimentSelection::open(&menu_item);
        PendingItem {
            menu_item,
            selection,
        }
    }
}

/// Everything guarded by one lock.
#[derive(Debug, Default)]
pub struct Till {
    pub order: Order,
    pub pending: Option<PendingItem>,
}

/// Shared order state.
///
/// `std::sync::Mutex` rather than tokio's: every access is a short,
/// synchronous closure.
#[derive(Debug, Clone, Default)]
pub struct OrderState {
    till: Arc<Mutex<Till>>,
}

impl OrderState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Till> {
        self.till.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Read access.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let view = order_state.with_till(|till| OrderView::from(&till.order));
    /// ```
    pub fn with_till<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Till) -> R,
    {
        let till = self.lock();
        f(&till)
    }

    /// Write access.
    pub fn with_till_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Till) -> R,
    {
        let mut till = self.lock();
        f(&mut till)
    }
}

// =============================================================================
// Views
// =============================================================================

/// Order lines and totals as the till panel shows them.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub lines: Vec<SaleItem>,
    pub unit_count: u32,
    #[ts(type = "number")]
    pub subtotal: Money,
    #[ts(type = "number")]
    pub vat_total: Money,
    #[ts(type = "number")]
    pub total: Money,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        OrderView {
            lines: order.lines().to_vec(),
            unit_count: order.unit_count(),
            subtotal: order.subtotal(),
            vat_total: order.vat_total(),
            total: order.total(),
        }
    }
}

/// One row of the accompaniment picker.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AccompanimentOption {
    pub accompaniment: Accompaniment,
    pub selected: bool,
}

/// The accompaniment picker.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SelectionView {
    pub menu_item_id: i64,
    pub item_name: String,
    pub options: Vec<AccompanimentOption>,
    /// Base price plus selected surcharges, before VAT.
    #[ts(type = "number")]
    pub line_price: Money,
    pub can_confirm: bool,
    /// Outcome of the toggle that produced this view, if any.
    #[ts(type = "string | null")]
    pub last_toggle: Option<Toggle>,
}

impl SelectionView {
    pub fn new(pending: &PendingItem, last_toggle: Option<Toggle>) -> Self {
        let selection = &pending.selection;
        let surcharge: Money = selection.selected().iter().map(|a| a.price).sum();

        SelectionView {
            menu_item_id: selection.menu_item_id(),
            item_name: pending.menu_item.name.clone(),
            options: selection
                .options()
                .iter()
                .map(|a| AccompanimentOption {
                    accompaniment: a.clone(),
                    selected: selection.is_selected(&a.id),
                })
                .collect(),
            line_price: pending.menu_item.base_price + surcharge,
            can_confirm: selection.is_valid(),
            last_toggle,
        }
    }
}
