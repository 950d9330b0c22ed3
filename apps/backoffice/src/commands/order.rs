//! # Order Commands
//!
//! Composing an order at the till and turning it into a sale.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Lifecycle                                      │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ Picking  │────►│ In Order │────►│   Sale   │       │
//! │  │  Order   │     │  Sides   │     │          │     │ Recorded │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       │          toggle_accompaniment    │         complete_sale        │
//! │       │          confirm_selection       │                              │
//! │       │          cancel_selection        │                              │
//! │       │                             adjust_line_quantity               │
//! │       │                             set_line_quantity                  │
//! │       │                             remove_line                        │
//! │       └── select_menu_item ────────────► (dish without sides)          │
//! │                                          │                              │
//! │                                     clear_order ──► (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed `complete_sale` leaves the order exactly as it was.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};
use ts_rs::TS;

use jiko_core::money::Money;
use jiko_core::types::{PaymentMethod, Sale};
use jiko_core::validation::{amount_from_f64, validate_quantity};
use jiko_core::{CoreError, Toggle};
use jiko_db::Repository;

use crate::error::ApiError;
use crate::state::{DbState, OrderState, OrderView, PendingItem, SelectionView, Till};

/// What tapping a dish did.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SelectOutcome {
    /// No sides on offer; the dish went straight into the order.
    Added { order: OrderView },
    /// The accompaniment picker is open.
    Picking { selection: SelectionView },
}

/// Receipt data for a completed sale.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleReceipt {
    pub sale: Sale,
    pub order: OrderView,
}

pub fn get_order(order: &OrderState) -> OrderView {
    debug!("get_order command");
    order.with_till(|till| OrderView::from(&till.order))
}

/// Starts adding a dish. Dishes with accompaniments open the picker with
/// every required side pre-selected; others are added at once.
pub async fn select_menu_item(
    db: &DbState,
    order: &OrderState,
    menu_item_id: i64,
) -> Result<SelectOutcome, ApiError> {
    debug!(menu_item_id, "select_menu_item command");
    let menu_item = db.inner().menu_items().get(&menu_item_id).await?;

    if !menu_item.available {
        return Err(CoreError::MenuItemUnavailable {
            name: menu_item.name,
        }
        .into());
    }

    if menu_item.accompaniments.is_empty() {
        return order.with_till_mut(|till| {
            till.order.add_item(&menu_item, Vec::new())?;
            Ok(SelectOutcome::Added {
                order: OrderView::from(&till.order),
            })
        });
    }

    Ok(order.with_till_mut(|till| {
        let pending = PendingItem::open(menu_item);
        let selection = SelectionView::new(&pending, None);
        if let Some(replaced) = till.pending.replace(pending) {
            debug!(menu_item_id = replaced.menu_item.id, "Discarded unconfirmed selection");
        }
        SelectOutcome::Picking { selection }
    }))
}

/// Flips one side in the open picker. A refused toggle is not an error: the
/// view comes back unchanged with `lastToggle: "rejected"`.
pub fn toggle_accompaniment(
    order: &OrderState,
    accompaniment_id: &str,
) -> Result<SelectionView, ApiError> {
    debug!(accompaniment_id, "toggle_accompaniment command");
    order.with_till_mut(|till| {
        let pending = pending_mut(till)?;
        let outcome = pending.selection.toggle(accompaniment_id);
        if outcome == Toggle::Unknown {
            return Err(CoreError::UnknownAccompaniment {
                item: pending.menu_item.name.clone(),
                id: accompaniment_id.to_string(),
            }
            .into());
        }
        Ok(SelectionView::new(pending, Some(outcome)))
    })
}

/// Closes the picker and appends the configured dish as a new line.
pub fn confirm_selection(order: &OrderState) -> Result<OrderView, ApiError> {
    debug!("confirm_selection command");
    order.with_till_mut(|till| {
        let pending = pending_mut(till)?.clone();
        let accompaniments = pending.selection.confirm()?;
        till.order.add_item(&pending.menu_item, accompaniments)?;
        till.pending = None;

        info!(item = %pending.menu_item.name, total = %till.order.total(), "Dish added to order");
        Ok(OrderView::from(&till.order))
    })
}

pub fn cancel_selection(order: &OrderState) -> OrderView {
    debug!("cancel_selection command");
    order.with_till_mut(|till| {
        if let Some(pending) = till.pending.take() {
            pending.selection.cancel();
        }
        OrderView::from(&till.order)
    })
}

/// `delta` is usually +1 or -1; a line reaching zero is removed.
pub fn adjust_line_quantity(
    order: &OrderState,
    line_id: &str,
    delta: i64,
) -> Result<OrderView, ApiError> {
    debug!(line_id, delta, "adjust_line_quantity command");
    order.with_till_mut(|till| {
        till.order.adjust_quantity(line_id, delta)?;
        Ok(OrderView::from(&till.order))
    })
}

/// Sets a line to a typed-in quantity (1..=999). Use `remove_line` to drop it.
pub fn set_line_quantity(
    order: &OrderState,
    line_id: &str,
    quantity: i64,
) -> Result<OrderView, ApiError> {
    debug!(line_id, quantity, "set_line_quantity command");
    validate_quantity(quantity)?;

    order.with_till_mut(|till| {
        let current = till
            .order
            .line(line_id)
            .map(|line| i64::from(line.quantity))
            .ok_or_else(|| CoreError::OrderLineNotFound(line_id.to_string()))?;
        till.order.adjust_quantity(line_id, quantity - current)?;
        Ok(OrderView::from(&till.order))
    })
}

pub fn remove_line(order: &OrderState, line_id: &str) -> Result<OrderView, ApiError> {
    debug!(line_id, "remove_line command");
    order.with_till_mut(|till| {
        till.order.remove_line(line_id)?;
        Ok(OrderView::from(&till.order))
    })
}

/// Empties the order and closes the picker.
pub fn clear_order(order: &OrderState) -> OrderView {
    debug!("clear_order command");
    order.with_till_mut(|till| {
        till.order.clear();
        till.pending = None;
        OrderView::from(&till.order)
    })
}

/// Change due for a tender, for the payment panel. Never negative.
pub fn preview_change(order: &OrderState, amount_paid: f64) -> Result<Money, ApiError> {
    let amount_paid = amount_from_f64("amountPaid", amount_paid)?;
    Ok(order.with_till(|till| till.order.change_for(amount_paid)))
}

/// Records the order as a sale and takes the sold lines off it.
///
/// ## Flow
/// ```text
/// 1. Validate the tender (finite, not negative)
/// 2. Order::checkout under the lock → NewSale (order untouched)
/// 3. sales().create(new_sale)       → Sale { id }
/// 4. Only now: Order::settle with the sold lines
/// ```
/// Any failure returns before step 4. The lock is not held while the sale is
/// saved, so lines added or raised in the meantime stay on the order.
pub async fn complete_sale(
    db: &DbState,
    order: &OrderState,
    payment_method: PaymentMethod,
    amount_paid: f64,
) -> Result<SaleReceipt, ApiError> {
    debug!(%payment_method, amount_paid, "complete_sale command");
    let amount_paid = amount_from_f64("amountPaid", amount_paid)?;

    let new_sale = order.with_till(|till| {
        till.order.checkout(payment_method, amount_paid, Utc::now())
    })?;

    let sale = match db.inner().sales().create(new_sale).await {
        Ok(sale) => sale,
        Err(e) => {
            warn!(error = %e, "Sale could not be saved, order kept");
            return Err(e.into());
        }
    };

    let view = order.with_till_mut(|till| {
        till.order.settle(&sale.items);
        OrderView::from(&till.order)
    });

    info!(
        sale_id = %sale.id,
        total = %sale.total,
        method = %sale.payment_method,
        change = %sale.change,
        "Sale completed"
    );

    Ok(SaleReceipt { sale, order: view })
}

fn pending_mut(till: &mut Till) -> Result<&mut PendingItem, ApiError> {
    till.pending
        .as_mut()
        .ok_or_else(|| ApiError::order("No dish is being configured"))
}
