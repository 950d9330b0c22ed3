//! # Report Commands
//!
//! Load the records, hand them to the pure aggregates in
//! `jiko_core::reports`. Rendering (charts, CSV, PDF) is the panel's job.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use jiko_core::money::Money;
use jiko_core::reports::{
    best_sellers, expense_summary, expiring_within, inventory_value, low_stock, BestSeller,
    ExpenseSummary, SalesSummary,
};
use jiko_core::types::InventoryItem;
use jiko_core::validation::validate_expiry_window;
use jiko_db::{Repository, SaleRepository};

use crate::commands::sales::day_bounds;
use crate::error::ApiError;
use crate::state::DbState;

/// Best sellers shown on the dashboard.
pub const BEST_SELLER_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub summary: SalesSummary,
    pub best_sellers: Vec<BestSeller>,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    pub low_stock: Vec<InventoryItem>,
    /// Expired or expiring within the window, soonest first.
    pub expiring: Vec<InventoryItem>,
    #[ts(type = "number")]
    pub stock_value: Money,
}

pub async fn sales_report(
    db: &DbState,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<SalesReport, ApiError> {
    debug!(%start, %end, "sales_report command");
    let sales = db.inner().sales().get_by_date_range(start, end).await?;

    Ok(SalesReport {
        summary: SalesSummary::from_sales(&sales),
        best_sellers: best_sellers(&sales, BEST_SELLER_LIMIT),
    })
}

/// Today's takings, UTC day.
pub async fn daily_sales_report(db: &DbState, day: NaiveDate) -> Result<SalesReport, ApiError> {
    let (start, end) = day_bounds(day, day)?;
    sales_report(db, start, end).await
}

/// Spend against budget, one row per category. Rejected expenses excluded.
pub async fn expense_report(db: &DbState) -> Result<Vec<ExpenseSummary>, ApiError> {
    debug!("expense_report command");
    let categories = db.inner().expense_categories().get_all().await?;
    let expenses = db.inner().expenses().get_all().await?;
    Ok(expense_summary(&categories, &expenses))
}

pub async fn inventory_report(
    db: &DbState,
    today: NaiveDate,
    expiry_window_days: i64,
) -> Result<InventoryReport, ApiError> {
    debug!(%today, expiry_window_days, "inventory_report command");
    validate_expiry_window(expiry_window_days)?;
    let items = db.inner().inventory().get_all().await?;

    Ok(InventoryReport {
        low_stock: low_stock(&items).into_iter().cloned().collect(),
        expiring: expiring_within(&items, today, expiry_window_days)
            .into_iter()
            .cloned()
            .collect(),
        stock_value: inventory_value(&items),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::expenses::{create_expense, set_expense_status};
    use crate::error::ErrorCode;
    use crate::testing;
    use chrono::{Duration, TimeZone};
    use jiko_core::types::{ApprovalStatus, NewExpense, NewInventoryItem, PaymentMethod};
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_daily_sales_report() {
        let db = testing::db();
        let day = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        testing::record_sale(&db, day).await;
        testing::record_sale(&db, day + Duration::hours(3)).await;
        testing::record_sale(&db, day + Duration::days(1)).await;

        let report = daily_sales_report(&db, day.date_naive()).await.unwrap();
        assert_eq!(report.summary.sale_count, 2);
        assert_eq!(report.summary.revenue, Money::from_major(1044));
        assert_eq!(report.best_sellers[0].name, "Chips");
        assert_eq!(report.best_sellers[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_expense_report_ignores_rejected() {
        let db = testing::db();
        testing::category(&db, "Utilities", 25_000).await;

        let mut ids = Vec::new();
        for amount in [3_000, 4_000] {
            let expense = create_expense(
                &db,
                NewExpense {
                    description: "Power".to_string(),
                    amount: Money::from_major(amount),
                    category: "Utilities".to_string(),
                    date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
                    payment_method: PaymentMethod::Bank,
                    receipt: None,
                    added_by: "otieno".to_string(),
                    approval_status: ApprovalStatus::Pending,
                },
            )
            .await
            .unwrap();
            ids.push(expense.id);
        }
        set_expense_status(&db, &ids[1], ApprovalStatus::Rejected)
            .await
            .unwrap();

        let report = expense_report(&db).await.unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].spent, Money::from_major(3_000));
        assert_eq!(report[0].remaining, Money::from_major(22_000));
    }

    #[tokio::test]
    async fn test_inventory_report() {
        let db = testing::db();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let items = [
            ("Milk", 2, 6, 65, Some(1)),
            ("Rice", 40, 10, 160, None),
            ("Beef", 12, 5, 650, Some(10)),
        ];
        for (name, quantity, min, cost, expires_in) in items {
            db.inner()
                .inventory()
                .create(NewInventoryItem {
                    name: name.to_string(),
                    quantity: Decimal::from(quantity),
                    unit: "kg".to_string(),
                    min_stock: Decimal::from(min),
                    cost: Money::from_major(cost),
                    expiry_date: expires_in.map(|d| today + Duration::days(d)),
                })
                .await
                .unwrap();
        }

        let report = inventory_report(&db, today, 3).await.unwrap();
        assert_eq!(report.low_stock.len(), 1);
        assert_eq!(report.low_stock[0].name, "Milk");
        assert_eq!(report.expiring.len(), 1);
        assert_eq!(report.stock_value, Money::from_major(2 * 65 + 40 * 160 + 12 * 650));
    }

    #[tokio::test]
    async fn test_expiry_window_out_of_range() {
        let db = testing::db();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        for days in [-1, 1_000_000_000, i64::MAX] {
            let err = inventory_report(&db, today, days).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
        }
        assert!(inventory_report(&db, today, 365).await.is_ok());
    }
}
