//! # Expense Category Commands
//!
//! Names are unique ignoring case; the repository enforces it and a clash
//! comes back as `CONFLICT`.

use tracing::{debug, info};

use jiko_core::types::{ExpenseCategory, ExpenseCategoryPatch, NewExpenseCategory};
use jiko_core::validation::{
    validate_name, validate_new_expense_category, validate_non_negative_amount,
};
use jiko_db::Repository;

use crate::error::ApiError;
use crate::state::DbState;

pub async fn list_expense_categories(db: &DbState) -> Result<Vec<ExpenseCategory>, ApiError> {
    debug!("list_expense_categories command");
    Ok(db.inner().expense_categories().get_all().await?)
}

pub async fn create_expense_category(
    db: &DbState,
    mut category: NewExpenseCategory,
) -> Result<ExpenseCategory, ApiError> {
    debug!(name = %category.name, "create_expense_category command");
    validate_new_expense_category(&category)?;
    category.name = category.name.trim().to_string();

    let created = db.inner().expense_categories().create(category).await?;
    info!(id = %created.id, name = %created.name, budget = %created.budget, "Expense category created");
    Ok(created)
}

pub async fn update_expense_category(
    db: &DbState,
    id: &str,
    mut patch: ExpenseCategoryPatch,
) -> Result<ExpenseCategory, ApiError> {
    debug!(id, "update_expense_category command");
    if let Some(name) = patch.name.as_mut() {
        validate_name("name", name)?;
        *name = name.trim().to_string();
    }
    if let Some(budget) = patch.budget {
        validate_non_negative_amount("budget", budget)?;
    }

    Ok(db
        .inner()
        .expense_categories()
        .update(&id.to_string(), patch)
        .await?)
}

/// Expenses already filed under the category keep its name.
pub async fn delete_expense_category(db: &DbState, id: &str) -> Result<(), ApiError> {
    debug!(id, "delete_expense_category command");
    db.inner()
        .expense_categories()
        .delete(&id.to_string())
        .await?;
    Ok(())
}
