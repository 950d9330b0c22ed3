//! # Inventory Repository
//!
//! Stock items plus the two operations the till and the reorder screen need
//! beyond plain CRUD.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use jiko_core::types::InventoryItem;

use crate::error::{DbError, DbResult};
use crate::repository::local::LocalRepository;
use crate::repository::Repository;

#[async_trait]
pub trait InventoryRepository: Repository<InventoryItem> {
    /// Adds a signed delta to an item's quantity, clamping at zero.
    ///
    /// ## Example
    /// ```text
    /// quantity 2.5 kg, delta -4   →  0 kg
    /// quantity 0 kg,   delta +10  →  10 kg
    /// ```
    async fn adjust_quantity(&self, id: &str, delta: Decimal) -> DbResult<InventoryItem>;

    /// Items at or below their reorder threshold.
    async fn low_stock(&self) -> DbResult<Vec<InventoryItem>>;
}

#[async_trait]
impl InventoryRepository for LocalRepository<InventoryItem> {
    async fn adjust_quantity(&self, id: &str, delta: Decimal) -> DbResult<InventoryItem> {
        let item = self
            .modify(|items| {
                let item = items
                    .iter_mut()
                    .find(|i| i.id == id)
                    .ok_or_else(|| DbError::not_found("InventoryItem", id))?;
                item.adjust_quantity(delta);
                Ok(item.clone())
            })
            .await?;

        debug!(id, %delta, quantity = %item.quantity, "Adjusted stock");
        if item.is_low_stock() {
            warn!(id, name = %item.name, quantity = %item.quantity, "Stock at or below minimum");
        }
        Ok(item)
    }

    async fn low_stock(&self) -> DbResult<Vec<InventoryItem>> {
        Ok(self
            .load()
            .await?
            .into_iter()
            .filter(InventoryItem::is_low_stock)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{LocalStore, Persistence};
    use jiko_core::money::Money;
    use jiko_core::types::NewInventoryItem;

    fn item(name: &str, quantity: Decimal, min: i64) -> NewInventoryItem {
        NewInventoryItem {
            name: name.to_string(),
            quantity,
            unit: "kg".to_string(),
            min_stock: Decimal::from(min),
            cost: Money::from_major(90),
            expiry_date: None,
        }
    }

    #[tokio::test]
    async fn test_adjust_clamps_at_zero() {
        let store = LocalStore::in_memory();
        let rice = store
            .inventory()
            .create(item("Rice", Decimal::new(25, 1), 1))
            .await
            .unwrap();

        let drained = store
            .inventory()
            .adjust_quantity(&rice.id, Decimal::from(-4))
            .await
            .unwrap();
        assert_eq!(drained.quantity, Decimal::ZERO);

        let restocked = store
            .inventory()
            .adjust_quantity(&rice.id, Decimal::from(10))
            .await
            .unwrap();
        assert_eq!(restocked.quantity, Decimal::from(10));

        let stored = store.inventory().get(&rice.id).await.unwrap();
        assert_eq!(stored.quantity, Decimal::from(10));
    }

    #[tokio::test]
    async fn test_adjust_unknown_item() {
        let store = LocalStore::in_memory();
        let result = store.inventory().adjust_quantity("404", Decimal::ONE).await;
        assert!(matches!(result, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_low_stock() {
        let store = LocalStore::in_memory();
        store
            .inventory()
            .create(item("Onions", Decimal::from(3), 5))
            .await
            .unwrap();
        store
            .inventory()
            .create(item("Beef", Decimal::from(30), 10))
            .await
            .unwrap();

        let low = store.inventory().low_stock().await.unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "Onions");
    }
}
