//! # Reports
//!
//! Aggregates behind the dashboard cards and the reports panel. Everything
//! here works on records already loaded from persistence.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{ApprovalStatus, Expense, ExpenseCategory, InventoryItem, PaymentMethod, Sale};

// =============================================================================
// Sales
// =============================================================================

/// Revenue for one payment method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    pub payment_method: PaymentMethod,
    pub count: usize,
    #[ts(type = "number")]
    pub total: Money,
}

/// Totals over a set of sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub sale_count: usize,
    #[ts(type = "number")]
    pub subtotal: Money,
    #[ts(type = "number")]
    pub vat_total: Money,
    #[ts(type = "number")]
    pub revenue: Money,
    /// Revenue per sale, whole shillings. Zero with no sales.
    #[ts(type = "number")]
    pub average_ticket: Money,
    /// Only methods that were used, in [`PaymentMethod::ALL`] order.
    pub by_payment_method: Vec<PaymentBreakdown>,
}

impl SalesSummary {
    pub fn from_sales(sales: &[Sale]) -> Self {
        let subtotal: Money = sales.iter().map(|s| s.subtotal).sum();
        let vat_total: Money = sales.iter().map(|s| s.vat_total).sum();
        let revenue: Money = sales.iter().map(|s| s.total).sum();

        let average_ticket = if sales.is_empty() {
            Money::zero()
        } else {
            Money::new(revenue.amount() / rust_decimal::Decimal::from(sales.len())).round_whole()
        };

        let by_payment_method = PaymentMethod::ALL
            .into_iter()
            .filter_map(|method| {
                let matching: Vec<&Sale> =
                    sales.iter().filter(|s| s.payment_method == method).collect();
                if matching.is_empty() {
                    return None;
                }
                Some(PaymentBreakdown {
                    payment_method: method,
                    count: matching.len(),
                    total: matching.iter().map(|s| s.total).sum(),
                })
            })
            .collect();

        SalesSummary {
            sale_count: sales.len(),
            subtotal,
            vat_total,
            revenue,
            average_ticket,
            by_payment_method,
        }
    }
}

/// Units and revenue for one dish name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BestSeller {
    pub name: String,
    pub quantity: u32,
    #[ts(type = "number")]
    pub revenue: Money,
}

/// Dishes ranked by units sold, then by name. Lines are grouped by their
/// snapshotted name.
pub fn best_sellers(sales: &[Sale], limit: usize) -> Vec<BestSeller> {
    let mut by_name: HashMap<&str, BestSeller> = HashMap::new();

    for item in sales.iter().flat_map(|s| s.items.iter()) {
        let entry = by_name.entry(item.name.as_str()).or_insert_with(|| BestSeller {
            name: item.name.clone(),
            quantity: 0,
            revenue: Money::zero(),
        });
        entry.quantity += item.quantity;
        entry.revenue += item.line_total();
    }

    let mut ranked: Vec<BestSeller> = by_name.into_values().collect();
    ranked.sort_by(|a, b| b.quantity.cmp(&a.quantity).then_with(|| a.name.cmp(&b.name)));
    ranked.truncate(limit);
    ranked
}

// =============================================================================
// Expenses
// =============================================================================

/// Spend against one category budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub category: String,
    pub color: String,
    #[ts(type = "number")]
    pub budget: Money,
    #[ts(type = "number")]
    pub spent: Money,
    /// `budget - spent`; negative when over budget.
    #[ts(type = "number")]
    pub remaining: Money,
}

impl ExpenseSummary {
    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// One row per category, in category order. Rejected expenses do not count.
pub fn expense_summary(
    categories: &[ExpenseCategory],
    expenses: &[Expense],
) -> Vec<ExpenseSummary> {
    categories
        .iter()
        .map(|category| {
            let spent: Money = expenses
                .iter()
                .filter(|e| e.approval_status != ApprovalStatus::Rejected)
                .filter(|e| category.matches_name(&e.category))
                .map(|e| e.amount)
                .sum();

            ExpenseSummary {
                category: category.name.clone(),
                color: category.color.clone(),
                budget: category.budget,
                spent,
                remaining: category.budget - spent,
            }
        })
        .collect()
}

// =============================================================================
// Inventory
// =============================================================================

/// Items at or below their reorder threshold.
pub fn low_stock(items: &[InventoryItem]) -> Vec<&InventoryItem> {
    items.iter().filter(|i| i.is_low_stock()).collect()
}

/// Items with an expiry date on or before `today + days`, soonest first.
/// Already expired items are included. A horizon past the calendar's range
/// clamps to its first or last day.
pub fn expiring_within(items: &[InventoryItem], today: NaiveDate, days: i64) -> Vec<&InventoryItem> {
    let horizon = Duration::try_days(days)
        .and_then(|window| today.checked_add_signed(window))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX });
    let mut expiring: Vec<&InventoryItem> = items
        .iter()
        .filter(|i| i.expiry_date.is_some_and(|d| d <= horizon))
        .collect();
    expiring.sort_by_key(|i| i.expiry_date);
    expiring
}

/// Total value of stock on hand.
pub fn inventory_value(items: &[InventoryItem]) -> Money {
    items.iter().map(InventoryItem::stock_value).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Order;
    use crate::types::{MenuItem, NewInventoryItem, NewMenuItem, NewExpenseCategory};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn sale(method: PaymentMethod, dishes: &[(&str, i64, i64)]) -> Sale {
        let mut order = Order::new();
        for (i, (name, price, qty)) in dishes.iter().enumerate() {
            let item = MenuItem::from_new(i as i64, NewMenuItem::new(*name, Money::from_major(*price), "Mains"));
            let id = order.add_item(&item, vec![]).unwrap();
            order.adjust_quantity(&id, qty - 1).unwrap();
        }
        let paid = order.total();
        let new = order.checkout(method, paid, Utc::now()).unwrap();
        Sale::from_new("1".to_string(), new)
    }

    fn stock(name: &str, quantity: i64, min: i64, expiry: Option<NaiveDate>) -> InventoryItem {
        InventoryItem::from_new(
            name.to_string(),
            NewInventoryItem {
                name: name.to_string(),
                quantity: Decimal::from(quantity),
                unit: "kg".to_string(),
                min_stock: Decimal::from(min),
                cost: Money::from_major(100),
                expiry_date: expiry,
            },
        )
    }

    #[test]
    fn test_sales_summary() {
        let sales = vec![
            sale(PaymentMethod::Cash, &[("Chips", 450, 1)]),
            sale(PaymentMethod::Mpesa, &[("Chips", 450, 2), ("Chai", 50, 1)]),
        ];

        let summary = SalesSummary::from_sales(&sales);
        assert_eq!(summary.sale_count, 2);
        assert_eq!(summary.subtotal, Money::from_major(1400));
        assert_eq!(summary.vat_total, Money::from_major(224));
        assert_eq!(summary.revenue, Money::from_major(1624));
        assert_eq!(summary.average_ticket, Money::from_major(812));
        assert_eq!(summary.by_payment_method.len(), 2);
        assert_eq!(summary.by_payment_method[0].payment_method, PaymentMethod::Cash);
        assert_eq!(summary.by_payment_method[1].total, Money::from_major(1102));
    }

    #[test]
    fn test_empty_summary() {
        let summary = SalesSummary::from_sales(&[]);
        assert_eq!(summary.sale_count, 0);
        assert!(summary.average_ticket.is_zero());
        assert!(summary.by_payment_method.is_empty());
    }

    #[test]
    fn test_best_sellers() {
        let sales = vec![
            sale(PaymentMethod::Cash, &[("Chips", 450, 1), ("Chai", 50, 3)]),
            sale(PaymentMethod::Card, &[("Chips", 450, 2)]),
        ];

        let ranked = best_sellers(&sales, 5);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].quantity, 3);
        assert_eq!(ranked[1].quantity, 3);
        // tie broken by name
        assert_eq!(ranked[0].name, "Chai");
        assert_eq!(ranked[1].revenue, Money::from_major(1566));

        assert_eq!(best_sellers(&sales, 1).len(), 1);
    }

    #[test]
    fn test_expense_summary_skips_rejected() {
        let category = ExpenseCategory::from_new(
            "1".to_string(),
            NewExpenseCategory {
                name: "Fuel".to_string(),
                budget: Money::from_major(5000),
                color: "#f97316".to_string(),
            },
        );
        let expense = |amount: i64, status: ApprovalStatus| Expense {
            id: amount.to_string(),
            description: "Charcoal".to_string(),
            amount: Money::from_major(amount),
            category: "fuel".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 3).unwrap(),
            payment_method: PaymentMethod::Cash,
            receipt: None,
            added_by: "2".to_string(),
            approval_status: status,
        };
        let expenses = vec![
            expense(4000, ApprovalStatus::Approved),
            expense(2000, ApprovalStatus::Pending),
            expense(9000, ApprovalStatus::Rejected),
        ];

        let summary = expense_summary(&[category], &expenses);
        assert_eq!(summary[0].spent, Money::from_major(6000));
        assert_eq!(summary[0].remaining, Money::from_major(-1000));
        assert!(summary[0].is_over_budget());
    }

    #[test]
    fn test_low_stock_and_expiry() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let items = vec![
            stock("Milk", 2, 5, today.succ_opt()),
            stock("Rice", 40, 10, None),
            stock("Tomatoes", 8, 3, Some(today + Duration::days(10))),
            stock("Cream", 5, 5, today.pred_opt()),
        ];

        let low: Vec<&str> = low_stock(&items).iter().map(|i| i.name.as_str()).collect();
        assert_eq!(low, vec!["Milk", "Cream"]);

        let soon: Vec<&str> = expiring_within(&items, today, 3)
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(soon, vec!["Cream", "Milk"]);

        assert_eq!(inventory_value(&items), Money::from_major(5500));
    }

    #[test]
    fn test_expiry_horizon_clamps() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let items = vec![
            stock("Flour", 20, 5, Some(today + Duration::days(4000))),
            stock("Yeast", 1, 1, today.pred_opt()),
        ];

        assert_eq!(expiring_within(&items, today, 1_000_000_000).len(), 2);
        assert_eq!(expiring_within(&items, today, i64::MAX).len(), 2);
        assert!(expiring_within(&items, today, i64::MIN).is_empty());
    }
}
