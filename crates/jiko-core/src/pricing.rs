//! # Pricing
//!
//! Pure VAT and total arithmetic used by the menu editor, the order builder
//! and checkout.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base 455, VAT 16%                                                      │
//! │                                                                         │
//! │  calculate_vat          455 × 0.16          = 72.8    (kept exact)      │
//! │  calculate_total_price  round(455 × 1.16)   = 528     (whole shilling)  │
//! │                                                                         │
//! │  Order totals are sums of the exact per-line figures:                   │
//! │    subtotal  = Σ base_price × qty                                       │
//! │    vat_total = Σ vat_amount × qty                                       │
//! │    total     = subtotal + vat_total                                     │
//! │    change    = max(0, paid - total)                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use uuid::Uuid;

use crate::money::Money;
use crate::types::{Accompaniment, MenuItem, SaleItem, VatRate};

/// VAT on `base`. No rounding.
///
/// ## Example
/// ```rust
/// use jiko_core::money::Money;
/// use jiko_core::pricing::calculate_vat;
/// use jiko_core::types::VatRate;
///
/// let vat = calculate_vat(Money::from_major(450), VatRate::default());
/// assert_eq!(vat, Money::from_major(72));
/// ```
pub fn calculate_vat(base: Money, rate: VatRate) -> Money {
    base.calculate_vat(rate)
}

/// `round(base × (1 + rate))` to the nearest whole shilling.
///
/// ## Example
/// ```rust
/// use jiko_core::money::Money;
/// use jiko_core::pricing::calculate_total_price;
/// use jiko_core::types::VatRate;
///
/// let total = calculate_total_price(Money::from_major(450), VatRate::default());
/// assert_eq!(total, Money::from_major(522));
/// ```
pub fn calculate_total_price(base: Money, rate: VatRate) -> Money {
    base.with_vat(rate).round_whole()
}

/// Σ `base_price × quantity`. Accompaniment surcharges are already folded into
/// each line's base price.
pub fn calculate_sale_subtotal(items: &[SaleItem]) -> Money {
    items.iter().map(SaleItem::line_subtotal).sum()
}

/// Σ `vat_amount × quantity`.
pub fn calculate_sale_vat_total(items: &[SaleItem]) -> Money {
    items.iter().map(SaleItem::line_vat).sum()
}

pub fn calculate_sale_total(subtotal: Money, vat_total: Money) -> Money {
    subtotal + vat_total
}

/// `max(0, amount_paid - total)`.
///
/// Never negative. Rejecting an underpayment is checkout's job, see
/// [`crate::order::Order::checkout`].
pub fn calculate_change(amount_paid: Money, total: Money) -> Money {
    (amount_paid - total).max(Money::zero())
}

/// Prices one unit of `menu_item` with the chosen accompaniments.
///
/// The combined base is the dish base price plus every selected surcharge;
/// VAT and the rounded total come from that combined base at the dish's rate.
/// Name, prices and accompaniments are copied, so later menu edits do not
/// reach the returned line.
pub fn price_line(menu_item: &MenuItem, selected: Vec<Accompaniment>) -> SaleItem {
    let surcharge: Money = selected.iter().map(|a| a.price).sum();
    let base_price = menu_item.base_price + surcharge;

    SaleItem {
        id: Uuid::new_v4().to_string(),
        name: menu_item.name.clone(),
        base_price,
        vat_amount: calculate_vat(base_price, menu_item.vat_rate),
        total_price: calculate_total_price(base_price, menu_item.vat_rate),
        quantity: 1,
        accompaniments: selected,
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

    fn stew() -> MenuItem {
        MenuItem::from_new(
            1,
            NewMenuItem::new("Beef Stew", Money::from_major(400), "Mains")
                .with_accompaniment(Accompaniment::new("Rice", Money::from_major(50), true))
                .with_accompaniment(Accompaniment::new("Ugali", Money::from_major(30), true))
                .with_accompaniment(Accompaniment::new("Avocado", Money::from_major(5), false)),
        )
    }

    #[test]
    fn test_total_price_examples() {
        let rate = VatRate::default();
        assert_eq!(calculate_total_price(Money::from_major(450), rate), Money::from_major(522));
        assert_eq!(calculate_total_price(Money::from_major(455), rate), Money::from_major(528));
        assert_eq!(calculate_total_price(Money::zero(), rate), Money::zero());
        assert_eq!(
            calculate_total_price(Money::from_major(450), VatRate::zero()),
            Money::from_major(450)
        );
    }

    #[test]
    fn test_total_price_matches_rounded_gross() {
        for base in [1, 7, 99, 250, 333, 455, 1299] {
            for percent in [0, 8, 16, 25] {
                let base = Money::from_major(base);
                let rate = VatRate::from_percent(percent);
                assert_eq!(
                    calculate_total_price(base, rate),
                    base.with_vat(rate).round_whole()
                );
            }
        }
    }

    #[test]
    fn test_change_never_negative() {
        let total = Money::from_major(522);
        assert_eq!(calculate_change(Money::from_major(500), total), Money::zero());
        assert_eq!(calculate_change(Money::from_major(600), total), Money::from_major(78));
        assert_eq!(calculate_change(total, total), Money::zero());
    }

    #[test]
    fn test_price_line_folds_in_surcharges() {
        let item = stew();
        let rice = item.accompaniments[0].clone();
        let avocado = item.accompaniments[2].clone();

        let line = price_line(&item, vec![rice, avocado]);

        // 400 + 50 + 5 = 455
        assert_eq!(line.base_price, Money::from_major(455));
        assert_eq!(line.vat_amount, Money::new(Decimal::new(728, 1)));
        assert_eq!(line.total_price, Money::from_major(528));
        assert_eq!(line.quantity, 1);
        assert_eq!(line.name, "Beef Stew");
        assert_eq!(line.accompaniments.len(), 2);
    }

    #[test]
    fn test_line_is_a_snapshot() {
        let mut item = stew();
        let line = price_line(&item, vec![item.accompaniments[1].clone()]);

        item.name = "Goat Stew".to_string();
        item.base_price = Money::from_major(900);
        item.reprice();

        assert_eq!(line.name, "Beef Stew");
        assert_eq!(line.base_price, Money::from_major(430));
    }

    #[test]
    fn test_sale_aggregation() {
        let item = stew();
        let mut a = price_line(&item, vec![item.accompaniments[0].clone()]);
        a.quantity = 2;
        let b = price_line(&item, vec![item.accompaniments[1].clone()]);
        let items = vec![a, b];

        let subtotal = calculate_sale_subtotal(&items);
        let vat_total = calculate_sale_vat_total(&items);

        // 450 × 2 + 430
        assert_eq!(subtotal, Money::from_major(1330));
        // 72 × 2 + 68.8
        assert_eq!(vat_total, Money::new(Decimal::new(2128, 1)));
        assert_eq!(calculate_sale_total(subtotal, vat_total), subtotal + vat_total);
        assert_eq!(calculate_sale_subtotal(&[]), Money::zero());
    }
}
