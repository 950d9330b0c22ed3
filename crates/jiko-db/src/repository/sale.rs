//! # Sale Repository
//!
//! Completed sales: append-only history.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  1. ORDER (in memory, jiko-core::order::Order)                         │
//! │     └── add_item / adjust_quantity                                     │
//! │                                                                         │
//! │  2. CHECKOUT                                                           │
//! │     └── Order::checkout() → NewSale                                    │
//! │                                                                         │
//! │  3. RECORD                                                             │
//! │     └── sales().create(new_sale) → Sale { id }                         │
//! │                                                                         │
//! │  4. NOTHING ELSE                                                       │
//! │     └── update / delete → DbError::Immutable                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use jiko_core::types::Sale;

use crate::error::DbResult;
use crate::repository::local::LocalRepository;
use crate::repository::Repository;

/// Sales history queries.
#[async_trait]
pub trait SaleRepository: Repository<Sale> {
    /// Sales with `start <= timestamp <= end`, in insertion order.
    async fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<Vec<Sale>>;
}

#[async_trait]
impl SaleRepository for LocalRepository<Sale> {
    async fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<Vec<Sale>> {
        let sales: Vec<Sale> = self
            .load()
            .await?
            .into_iter()
            .filter(|s| s.timestamp >= start && s.timestamp <= end)
            .collect();

        debug!(%start, %end, count = sales.len(), "Loaded sales in range");
        Ok(sales)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use jiko_core::money::Money;
    use jiko_core::order::Order;
    use jiko_core::types::{MenuItem, NewMenuItem, PaymentMethod};

    use crate::error::DbError;
    use crate::repository::{LocalStore, Persistence, Repository, SaleRepository};

    fn order() -> Order {
        let item = MenuItem::from_new(1, NewMenuItem::new("Chips", Money::from_major(450), "Sides"));
        let mut order = Order::new();
        order.add_item(&item, vec![]).unwrap();
        order
    }

    #[tokio::test]
    async fn test_date_range_is_inclusive() {
        let store = LocalStore::in_memory();
        let start = chrono::Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
        let end = chrono::Utc.with_ymd_and_hms(2026, 10, 31, 23, 59, 59).unwrap();

        let times = [
            start - Duration::seconds(1),
            start,
            start + Duration::days(10),
            end,
            end + Duration::seconds(1),
        ];
        for at in times {
            let sale = order()
                .checkout(PaymentMethod::Cash, Money::from_major(600), at)
                .unwrap();
            store.sales().create(sale).await.unwrap();
        }

        let in_range = store.sales().get_by_date_range(start, end).await.unwrap();
        let stamps: Vec<_> = in_range.iter().map(|s| s.timestamp).collect();
        assert_eq!(stamps, vec![start, start + Duration::days(10), end]);
    }

    #[tokio::test]
    async fn test_sales_are_immutable() {
        let store = LocalStore::in_memory();
        let new = order()
            .checkout(PaymentMethod::Mpesa, Money::from_major(522), chrono::Utc::now())
            .unwrap();
        let sale = store.sales().create(new.clone()).await.unwrap();

        assert_eq!(sale.items, new.items);
        assert_eq!(sale.change, Money::zero());

        let result = store.sales().delete(&sale.id).await;
        assert!(matches!(result, Err(DbError::Immutable { .. })));
        assert_eq!(store.sales().get_all().await.unwrap().len(), 1);
    }
}
