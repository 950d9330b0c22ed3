//! # Menu Commands
//!
//! Menu management panel: dishes, their sides and recipe, availability.

use tracing::{debug, info};

use jiko_core::money::Money;
use jiko_core::types::{MenuItem, MenuItemPatch, NewMenuItem};
use jiko_core::validation::{
    validate_ingredient_quantity, validate_name, validate_new_menu_item,
    validate_non_negative_amount, validate_vat_rate, ValidationResult,
};
use jiko_db::Repository;

use crate::error::ApiError;
use crate::state::{AppConfig, DbState};

pub async fn list_menu_items(db: &DbState) -> Result<Vec<MenuItem>, ApiError> {
    debug!("list_menu_items command");
    Ok(db.inner().menu_items().get_all().await?)
}

pub async fn get_menu_item(db: &DbState, id: i64) -> Result<MenuItem, ApiError> {
    debug!(id, "get_menu_item command");
    Ok(db.inner().menu_items().get(&id).await?)
}

/// Distinct menu categories in first-seen order, for the category filter.
pub async fn list_menu_categories(db: &DbState) -> Result<Vec<String>, ApiError> {
    let mut categories: Vec<String> = Vec::new();
    for item in db.inner().menu_items().get_all().await? {
        if !categories.contains(&item.category) {
            categories.push(item.category);
        }
    }
    Ok(categories)
}

/// An empty "add dish" form, pre-filled with the store's default VAT rate.
pub fn blank_menu_item(config: &AppConfig) -> NewMenuItem {
    NewMenuItem {
        vat_rate: config.default_vat_rate,
        ..NewMenuItem::new("", Money::zero(), "")
    }
}

pub async fn create_menu_item(db: &DbState, item: NewMenuItem) -> Result<MenuItem, ApiError> {
    debug!(name = %item.name, "create_menu_item command");
    validate_new_menu_item(&item)?;

    let created = db.inner().menu_items().create(item).await?;
    info!(id = created.id, name = %created.name, total = %created.total_price, "Menu item created");
    Ok(created)
}

pub async fn update_menu_item(
    db: &DbState,
    id: i64,
    patch: MenuItemPatch,
) -> Result<MenuItem, ApiError> {
    debug!(id, "update_menu_item command");
    validate_patch(&patch)?;

    let updated = db.inner().menu_items().update(&id, patch).await?;
    info!(id, total = %updated.total_price, "Menu item updated");
    Ok(updated)
}

/// Switches a dish on or off without touching anything else.
pub async fn set_menu_item_availability(
    db: &DbState,
    id: i64,
    available: bool,
) -> Result<MenuItem, ApiError> {
    debug!(id, available, "set_menu_item_availability command");
    let patch = MenuItemPatch {
        available: Some(available),
        ..MenuItemPatch::default()
    };
    Ok(db.inner().menu_items().update(&id, patch).await?)
}

pub async fn delete_menu_item(db: &DbState, id: i64) -> Result<(), ApiError> {
    debug!(id, "delete_menu_item command");
    db.inner().menu_items().delete(&id).await?;
    info!(id, "Menu item deleted");
    Ok(())
}

fn validate_patch(patch: &MenuItemPatch) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        validate_name("name", name)?;
    }
    if let Some(category) = &patch.category {
        validate_name("category", category)?;
    }
    if let Some(base_price) = patch.base_price {
        validate_non_negative_amount("basePrice", base_price)?;
    }
    if let Some(vat_rate) = patch.vat_rate {
        validate_vat_rate(vat_rate)?;
    }
    for ingredient in patch.ingredients.iter().flatten() {
        validate_name("ingredient name", &ingredient.name)?;
        validate_ingredient_quantity(ingredient.quantity)?;
    }
    for accompaniment in patch.accompaniments.iter().flatten() {
        validate_name("accompaniment name", &accompaniment.name)?;
        validate_non_negative_amount("accompaniment price", accompaniment.price)?;
    }
    Ok(())
}
