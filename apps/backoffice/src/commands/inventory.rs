//! # Inventory Commands
//!
//! Stock list, restocking and consumption.
//!
//! Quantities arrive from numeric inputs as `f64` and are converted to
//! `Decimal` here; NaN and infinities never reach the repository.

use rust_decimal::Decimal;
use tracing::{debug, info};

use jiko_core::error::ValidationError;
use jiko_core::types::{InventoryItem, InventoryItemPatch, NewInventoryItem};
use jiko_core::validation::{
    validate_name, validate_new_inventory_item, validate_non_negative_amount,
    validate_stock_quantity, ValidationResult,
};
use jiko_db::{InventoryRepository, Repository};

use crate::error::ApiError;
use crate::state::DbState;

pub async fn list_inventory(db: &DbState) -> Result<Vec<InventoryItem>, ApiError> {
    debug!("list_inventory command");
    Ok(db.inner().inventory().get_all().await?)
}

pub async fn create_inventory_item(
    db: &DbState,
    item: NewInventoryItem,
) -> Result<InventoryItem, ApiError> {
    debug!(name = %item.name, "create_inventory_item command");
    validate_new_inventory_item(&item)?;

    let created = db.inner().inventory().create(item).await?;
    info!(id = %created.id, name = %created.name, quantity = %created.quantity, "Inventory item created");
    Ok(created)
}

pub async fn update_inventory_item(
    db: &DbState,
    id: &str,
    patch: InventoryItemPatch,
) -> Result<InventoryItem, ApiError> {
    debug!(id, "update_inventory_item command");
    validate_patch(&patch)?;
    Ok(db.inner().inventory().update(&id.to_string(), patch).await?)
}

pub async fn delete_inventory_item(db: &DbState, id: &str) -> Result<(), ApiError> {
    debug!(id, "delete_inventory_item command");
    db.inner().inventory().delete(&id.to_string()).await?;
    Ok(())
}

/// Adds a delivery to stock.
pub async fn restock(db: &DbState, id: &str, quantity: f64) -> Result<InventoryItem, ApiError> {
    debug!(id, quantity, "restock command");
    let quantity = positive_quantity(quantity)?;
    let item = db.inner().inventory().adjust_quantity(id, quantity).await?;
    info!(id, name = %item.name, quantity = %item.quantity, "Restocked");
    Ok(item)
}

/// Takes stock out (kitchen use, spoilage). Stock never goes below zero.
pub async fn consume(db: &DbState, id: &str, quantity: f64) -> Result<InventoryItem, ApiError> {
    debug!(id, quantity, "consume command");
    let quantity = positive_quantity(quantity)?;
    Ok(db.inner().inventory().adjust_quantity(id, -quantity).await?)
}

pub async fn list_low_stock(db: &DbState) -> Result<Vec<InventoryItem>, ApiError> {
    debug!("list_low_stock command");
    Ok(db.inner().inventory().low_stock().await?)
}

fn positive_quantity(value: f64) -> ValidationResult<Decimal> {
    let quantity = Decimal::try_from(value).map_err(|_| ValidationError::NotANumber {
        field: "quantity".to_string(),
    })?;

    if quantity <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(quantity)
}

fn validate_patch(patch: &InventoryItemPatch) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        validate_name("name", name)?;
    }
    if let Some(unit) = &patch.unit {
        validate_name("unit", unit)?;
    }
    if let Some(quantity) = patch.quantity {
        validate_stock_quantity("quantity", quantity)?;
    }
    if let Some(min_stock) = patch.min_stock {
        validate_stock_quantity("minStock", min_stock)?;
    }
    if let Some(cost) = patch.cost {
        validate_non_negative_amount("cost", cost)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::testing;
    use jiko_core::money::Money;

    fn onions(quantity: i64) -> NewInventoryItem {
        NewInventoryItem {
            name: "Onions".to_string(),
            quantity: Decimal::from(quantity),
            unit: "kg".to_string(),
            min_stock: Decimal::from(5),
            cost: Money::from_major(90),
            expiry_date: None,
        }
    }

    #[tokio::test]
    async fn test_restock_and_consume() {
        let db = testing::db();
        let item = create_inventory_item(&db, onions(3)).await.unwrap();

        let item = restock(&db, &item.id, 2.5).await.unwrap();
        assert_eq!(item.quantity, Decimal::new(55, 1));

        let item = consume(&db, &item.id, 10.0).await.unwrap();
        assert_eq!(item.quantity, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_rejects_bad_quantities() {
        let db = testing::db();
        let item = create_inventory_item(&db, onions(3)).await.unwrap();

        for bad in [f64::NAN, f64::INFINITY, 0.0, -1.0] {
            let err = restock(&db, &item.id, bad).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
        }
        assert_eq!(
            list_inventory(&db).await.unwrap()[0].quantity,
            Decimal::from(3)
        );
    }

    #[tokio::test]
    async fn test_create_rejects_negative_stock() {
        let db = testing::db();
        let err = create_inventory_item(&db, onions(-1)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_low_stock_list() {
        let db = testing::db();
        create_inventory_item(&db, onions(3)).await.unwrap();
        let plenty = create_inventory_item(&db, onions(30)).await.unwrap();

        assert_eq!(list_low_stock(&db).await.unwrap().len(), 1);

        let patch = InventoryItemPatch {
            quantity: Some(Decimal::from(1)),
            ..InventoryItemPatch::default()
        };
        update_inventory_item(&db, &plenty.id, patch).await.unwrap();
        assert_eq!(list_low_stock(&db).await.unwrap().len(), 2);

        delete_inventory_item(&db, &plenty.id).await.unwrap();
        assert_eq!(list_inventory(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_restock_unknown_item() {
        let db = testing::db();
        let err = restock(&db, "404", 1.0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
