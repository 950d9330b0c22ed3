//! # Order
//!
//! The in-progress sale being rung up at the till.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Pick dish ──► AccompanimentSelection ──► add_item() ──► new line     │
//! │                                                 │                       │
//! │                     adjust_quantity(+1 / -1) ◄──┤                       │
//! │                     (line removed at 0)         │                       │
//! │                                                 ▼                       │
//! │                                     checkout(method, paid)             │
//! │                                        │                │               │
//! │                                   Ok(NewSale)     Err(Underpayment,     │
//! │                                        │              EmptyOrder)       │
//! │                                        ▼                │               │
//! │                               persisted, then      order untouched,    │
//! │                               caller clears        user retries        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `add_item` appends a fresh line, even for a dish already in the
//! order: two plates of the same stew may carry different sides.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{
    calculate_change, calculate_sale_subtotal, calculate_sale_total, calculate_sale_vat_total,
    price_line,
};
use crate::types::{Accompaniment, MenuItem, NewSale, PaymentMethod, SaleItem};
use crate::{MAX_LINE_QUANTITY, MAX_ORDER_LINES};

/// An order under construction.
///
/// ## Invariants
/// - Every line has `1 <= quantity <= MAX_LINE_QUANTITY`
/// - At most `MAX_ORDER_LINES` lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    lines: Vec<SaleItem>,
}

impl Order {
    /// Creates an empty order.
    pub fn new() -> Self {
        Order::default()
    }

    /// Prices `menu_item` with the confirmed accompaniments and appends it as
    /// a new line with quantity 1. Returns the new line id.
    ///
    /// ## Errors
    /// - [`CoreError::MenuItemUnavailable`] if the dish is switched off
    /// - [`CoreError::UnknownAccompaniment`] if a selection is not offered by the dish
    /// - [`CoreError::RequiredAccompanimentMissing`] if the dish has required
    ///   sides and none is selected
    /// - [`CoreError::OrderTooLarge`] at `MAX_ORDER_LINES`
    pub fn add_item(
        &mut self,
        menu_item: &MenuItem,
        selected: Vec<Accompaniment>,
    ) -> CoreResult<String> {
        if !menu_item.available {
            return Err(CoreError::MenuItemUnavailable {
                name: menu_item.name.clone(),
            });
        }

        if let Some(stray) = selected
            .iter()
            .find(|a| menu_item.accompaniment(&a.id).is_none())
        {
            return Err(CoreError::UnknownAccompaniment {
                item: menu_item.name.clone(),
                id: stray.id.clone(),
            });
        }

        if menu_item.has_required_accompaniments() && !selected.iter().any(|a| a.required) {
            return Err(CoreError::RequiredAccompanimentMissing {
                item: menu_item.name.clone(),
            });
        }

        if self.lines.len() >= MAX_ORDER_LINES {
            return Err(CoreError::OrderTooLarge {
                max: MAX_ORDER_LINES,
            });
        }

        let line = price_line(menu_item, selected);
        let id = line.id.clone();
        self.lines.push(line);
        Ok(id)
    }

    /// Changes a line's quantity by a signed delta.
    ///
    /// The new quantity is `max(0, quantity + delta)`; a line that reaches 0
    /// is removed. Returns the remaining quantity (0 when removed).
    pub fn adjust_quantity(&mut self, line_id: &str, delta: i64) -> CoreResult<u32> {
        let index = self
            .lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| CoreError::OrderLineNotFound(line_id.to_string()))?;

        let requested = i64::from(self.lines[index].quantity)
            .saturating_add(delta)
            .max(0);
        if requested > i64::from(MAX_LINE_QUANTITY) {
            return Err(CoreError::QuantityTooLarge {
                requested,
                max: MAX_LINE_QUANTITY,
            });
        }

        if requested == 0 {
            self.lines.remove(index);
            return Ok(0);
        }

        // bounded by MAX_LINE_QUANTITY above
        let quantity = requested as u32;
        self.lines[index].quantity = quantity;
        Ok(quantity)
    }

    /// Removes a line regardless of quantity.
    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<SaleItem> {
        let index = self
            .lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| CoreError::OrderLineNotFound(line_id.to_string()))?;
        Ok(self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Takes the lines of a recorded sale off the order.
    ///
    /// Matches by line id. A line whose quantity grew after the sale was taken
    /// keeps the difference; lines added since are left alone.
    pub fn settle(&mut self, sold: &[SaleItem]) {
        for item in sold {
            let Some(index) = self.lines.iter().position(|l| l.id == item.id) else {
                continue;
            };
            let line = &mut self.lines[index];
            if line.quantity > item.quantity {
                line.quantity -= item.quantity;
            } else {
                self.lines.remove(index);
            }
        }
    }

    pub fn lines(&self) -> &[SaleItem] {
        &self.lines
    }

    pub fn line(&self, line_id: &str) -> Option<&SaleItem> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Units across all lines.
    pub fn unit_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn subtotal(&self) -> Money {
        calculate_sale_subtotal(&self.lines)
    }

    pub fn vat_total(&self) -> Money {
        calculate_sale_vat_total(&self.lines)
    }

    pub fn total(&self) -> Money {
        calculate_sale_total(self.subtotal(), self.vat_total())
    }

    /// Change due for a tendered amount, floored at zero.
    pub fn change_for(&self, amount_paid: Money) -> Money {
        calculate_change(amount_paid, self.total())
    }

    /// Turns the order into a sale payload.
    ///
    /// The order itself is left untouched; the caller clears it once the sale
    /// has been stored, so a failed save can simply be retried.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyOrder`] with no lines
    /// - [`CoreError::InvalidPaymentAmount`] for a negative tender
    /// - [`CoreError::Underpayment`] when `amount_paid < total`, for every
    ///   payment method
    pub fn checkout(
        &self,
        payment_method: PaymentMethod,
        amount_paid: Money,
        timestamp: DateTime<Utc>,
    ) -> CoreResult<NewSale> {
        if self.is_empty() {
            return Err(CoreError::EmptyOrder);
        }

        if amount_paid.is_negative() {
            return Err(CoreError::InvalidPaymentAmount {
                reason: "amount paid cannot be negative".to_string(),
            });
        }

        let subtotal = self.subtotal();
        let vat_total = self.vat_total();
        let total = calculate_sale_total(subtotal, vat_total);

        if amount_paid < total {
            return Err(CoreError::Underpayment {
                total,
                paid: amount_paid,
            });
        }

        Ok(NewSale {
            items: self.lines.clone(),
            subtotal,
            vat_total,
            total,
            payment_method,
            amount_paid,
            change: calculate_change(amount_paid, total),
            timestamp,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewMenuItem;
    use rust_decimal::Decimal;

    fn chips() -> MenuItem {
        MenuItem::from_new(1, NewMenuItem::new("Chips", Money::from_major(450), "Sides"))
    }

    fn stew() -> MenuItem {
        MenuItem::from_new(
            2,
            NewMenuItem::new("Beef Stew", Money::from_major(400), "Mains")
                .with_accompaniment(Accompaniment::new("Rice", Money::from_major(50), true))
                .with_accompaniment(Accompaniment::new("Ugali", Money::from_major(30), true)),
        )
    }

    #[test]
    fn test_add_item_appends_line() {
        let mut order = Order::new();
        let id = order.add_item(&chips(), vec![]).unwrap();

        assert_eq!(order.lines().len(), 1);
        assert_eq!(order.line(&id).unwrap().quantity, 1);
        assert_eq!(order.total(), Money::from_major(522));
    }

    #[test]
    fn test_same_dish_twice_gives_two_lines() {
        let mut order = Order::new();
        let item = stew();
        order.add_item(&item, vec![item.accompaniments[0].clone()]).unwrap();
        order.add_item(&item, vec![item.accompaniments[1].clone()]).unwrap();

        assert_eq!(order.lines().len(), 2);
        assert_eq!(order.subtotal(), Money::from_major(880));
    }

    #[test]
    fn test_unavailable_item_rejected() {
        let mut item = chips();
        item.available = false;

        let result = Order::new().add_item(&item, vec![]);
        assert!(matches!(result, Err(CoreError::MenuItemUnavailable { .. })));
    }

    #[test]
    fn test_required_side_enforced() {
        let mut order = Order::new();
        let result = order.add_item(&stew(), vec![]);

        assert!(matches!(
            result,
            Err(CoreError::RequiredAccompanimentMissing { .. })
        ));
        assert!(order.is_empty());
    }

    #[test]
    fn test_foreign_accompaniment_rejected() {
        let stray = Accompaniment::new("Chapati", Money::from_major(20), true);
        let result = Order::new().add_item(&stew(), vec![stray]);
        assert!(matches!(result, Err(CoreError::UnknownAccompaniment { .. })));
    }

    #[test]
    fn test_decrement_to_zero_removes_line() {
        let mut order = Order::new();
        let id = order.add_item(&chips(), vec![]).unwrap();

        assert_eq!(order.adjust_quantity(&id, -1).unwrap(), 0);
        assert!(order.line(&id).is_none());
        assert!(order.is_empty());
    }

    #[test]
    fn test_large_negative_delta_clamps_then_removes() {
        let mut order = Order::new();
        let id = order.add_item(&chips(), vec![]).unwrap();
        order.adjust_quantity(&id, 4).unwrap();

        assert_eq!(order.adjust_quantity(&id, -50).unwrap(), 0);
        assert!(order.lines().iter().all(|l| l.quantity >= 1));
        assert!(order.is_empty());
    }

    #[test]
    fn test_adjust_quantity_updates_totals() {
        let mut order = Order::new();
        let id = order.add_item(&chips(), vec![]).unwrap();

        assert_eq!(order.adjust_quantity(&id, 2).unwrap(), 3);
        assert_eq!(order.subtotal(), Money::from_major(1350));
        assert_eq!(order.vat_total(), Money::from_major(216));
        assert_eq!(order.total(), Money::from_major(1566));
        assert_eq!(order.unit_count(), 3);
    }

    #[test]
    fn test_quantity_ceiling() {
        let mut order = Order::new();
        let id = order.add_item(&chips(), vec![]).unwrap();

        let result = order.adjust_quantity(&id, i64::from(MAX_LINE_QUANTITY));
        assert!(matches!(result, Err(CoreError::QuantityTooLarge { .. })));
        assert_eq!(order.line(&id).unwrap().quantity, 1);
    }

    #[test]
    fn test_extreme_deltas_saturate() {
        let mut order = Order::new();
        let id = order.add_item(&chips(), vec![]).unwrap();

        let result = order.adjust_quantity(&id, i64::MAX);
        assert!(matches!(
            result,
            Err(CoreError::QuantityTooLarge { requested: i64::MAX, .. })
        ));
        assert_eq!(order.line(&id).unwrap().quantity, 1);

        assert_eq!(order.adjust_quantity(&id, i64::MIN).unwrap(), 0);
        assert!(order.is_empty());
    }

    #[test]
    fn test_settle_keeps_later_changes() {
        let mut order = Order::new();
        let chips_line = order.add_item(&chips(), vec![]).unwrap();
        let second_line = order.add_item(&chips(), vec![]).unwrap();
        let sale = order
            .checkout(PaymentMethod::Cash, Money::from_major(2000), Utc::now())
            .unwrap();

        order.adjust_quantity(&chips_line, 2).unwrap();
        order.remove_line(&second_line).unwrap();
        let late_line = order.add_item(&chips(), vec![]).unwrap();

        order.settle(&sale.items);
        assert_eq!(order.lines().len(), 2);
        assert_eq!(order.line(&chips_line).unwrap().quantity, 2);
        assert_eq!(order.line(&late_line).unwrap().quantity, 1);

        order.settle(&sale.items);
        assert_eq!(order.line(&chips_line).unwrap().quantity, 1);
    }

    #[test]
    fn test_unknown_line() {
        let mut order = Order::new();
        assert!(matches!(
            order.adjust_quantity("nope", 1),
            Err(CoreError::OrderLineNotFound(_))
        ));
        assert!(order.remove_line("nope").is_err());
    }

    #[test]
    fn test_order_line_limit() {
        let mut order = Order::new();
        let item = chips();
        for _ in 0..MAX_ORDER_LINES {
            order.add_item(&item, vec![]).unwrap();
        }
        let result = order.add_item(&item, vec![]);
        assert!(matches!(result, Err(CoreError::OrderTooLarge { .. })));
    }

    #[test]
    fn test_checkout_builds_sale() {
        let mut order = Order::new();
        order.add_item(&chips(), vec![]).unwrap();

        let now = Utc::now();
        let sale = order
            .checkout(PaymentMethod::Cash, Money::from_major(600), now)
            .unwrap();

        assert_eq!(sale.subtotal, Money::from_major(450));
        assert_eq!(sale.vat_total, Money::from_major(72));
        assert_eq!(sale.total, Money::from_major(522));
        assert_eq!(sale.change, Money::from_major(78));
        assert_eq!(sale.timestamp, now);
        assert_eq!(sale.items.len(), 1);
        // still there until the caller clears it
        assert!(!order.is_empty());
    }

    #[test]
    fn test_checkout_rejects_underpayment_for_every_method() {
        let mut order = Order::new();
        order.add_item(&chips(), vec![]).unwrap();

        for method in PaymentMethod::ALL {
            let result = order.checkout(method, Money::from_major(500), Utc::now());
            assert!(matches!(result, Err(CoreError::Underpayment { .. })));
        }
        assert_eq!(order.lines().len(), 1);
    }

    #[test]
    fn test_checkout_exact_tender_has_no_change() {
        let mut order = Order::new();
        let item = stew();
        order.add_item(&item, vec![item.accompaniments[0].clone()]).unwrap();

        // 450 + 72 = 522
        let sale = order
            .checkout(PaymentMethod::Mpesa, Money::from_major(522), Utc::now())
            .unwrap();
        assert!(sale.change.is_zero());
    }

    #[test]
    fn test_checkout_empty_or_negative() {
        let order = Order::new();
        assert!(matches!(
            order.checkout(PaymentMethod::Card, Money::zero(), Utc::now()),
            Err(CoreError::EmptyOrder)
        ));

        let mut order = Order::new();
        order.add_item(&chips(), vec![]).unwrap();
        let negative = Money::new(Decimal::from(-1));
        assert!(matches!(
            order.checkout(PaymentMethod::Card, negative, Utc::now()),
            Err(CoreError::InvalidPaymentAmount { .. })
        ));
    }
}
