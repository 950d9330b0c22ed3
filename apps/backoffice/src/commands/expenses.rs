//! # Expense Commands
//!
//! Every expense must name a stored category. The name is matched
//! case-insensitively and saved with the category's own spelling, so the
//! budget report lines up.

use tracing::{debug, info};

use jiko_core::types::{ApprovalStatus, Expense, ExpensePatch, NewExpense};
use jiko_core::validation::{
    validate_expense_category, validate_name, validate_new_expense, validate_positive_amount,
};
use jiko_db::Repository;

use crate::error::ApiError;
use crate::state::DbState;

pub async fn list_expenses(db: &DbState) -> Result<Vec<Expense>, ApiError> {
    debug!("list_expenses command");
    Ok(db.inner().expenses().get_all().await?)
}

pub async fn create_expense(db: &DbState, mut expense: NewExpense) -> Result<Expense, ApiError> {
    debug!(description = %expense.description, "create_expense command");
    let categories = db.inner().expense_categories().get_all().await?;

    validate_new_expense(&expense, &categories)?;
    expense.category = validate_expense_category(&expense.category, &categories)?;

    let created = db.inner().expenses().create(expense).await?;
    info!(
        id = %created.id,
        category = %created.category,
        amount = %created.amount,
        "Expense recorded"
    );
    Ok(created)
}

pub async fn update_expense(
    db: &DbState,
    id: &str,
    mut patch: ExpensePatch,
) -> Result<Expense, ApiError> {
    debug!(id, "update_expense command");

    if let Some(description) = &patch.description {
        validate_name("description", description)?;
    }
    if let Some(amount) = patch.amount {
        validate_positive_amount("amount", amount)?;
    }
    if let Some(category) = patch.category.take() {
        let categories = db.inner().expense_categories().get_all().await?;
        patch.category = Some(validate_expense_category(&category, &categories)?);
    }

    Ok(db.inner().expenses().update(&id.to_string(), patch).await?)
}

/// Approve or reject a pending expense.
pub async fn set_expense_status(
    db: &DbState,
    id: &str,
    status: ApprovalStatus,
) -> Result<Expense, ApiError> {
    debug!(id, ?status, "set_expense_status command");
    let patch = ExpensePatch {
        approval_status: Some(status),
        ..ExpensePatch::default()
    };
    let expense = db.inner().expenses().update(&id.to_string(), patch).await?;
    info!(id, ?status, "Expense reviewed");
    Ok(expense)
}

pub async fn delete_expense(db: &DbState, id: &str) -> Result<(), ApiError> {
    debug!(id, "delete_expense command");
    db.inner().expenses().delete(&id.to_string()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::testing;
    use chrono::NaiveDate;
    use jiko_core::money::Money;
    use jiko_core::types::PaymentMethod;

    fn gas(category: &str) -> NewExpense {
        NewExpense {
            description: "Gas refill".to_string(),
            amount: Money::from_major(3_200),
            category: category.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(),
            payment_method: PaymentMethod::Mpesa,
            receipt: None,
            added_by: "wanjiru".to_string(),
            approval_status: ApprovalStatus::default(),
        }
    }

    #[tokio::test]
    async fn test_category_must_exist() {
        let db = testing::db();
        let err = create_expense(&db, gas("Utilities")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        testing::category(&db, "Utilities", 25_000).await;
        let expense = create_expense(&db, gas(" utilities ")).await.unwrap();
        assert_eq!(expense.category, "Utilities");
        assert_eq!(expense.approval_status, ApprovalStatus::Pending);
    }

    #[tokio::test]
    async fn test_amount_must_be_positive() {
        let db = testing::db();
        testing::category(&db, "Utilities", 25_000).await;

        let mut expense = gas("Utilities");
        expense.amount = Money::zero();
        let err = create_expense(&db, expense).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_update_and_review() {
        let db = testing::db();
        testing::category(&db, "Utilities", 25_000).await;
        testing::category(&db, "Maintenance", 10_000).await;
        let expense = create_expense(&db, gas("Utilities")).await.unwrap();

        let patch = ExpensePatch {
            category: Some("MAINTENANCE".to_string()),
            ..ExpensePatch::default()
        };
        let moved = update_expense(&db, &expense.id, patch).await.unwrap();
        assert_eq!(moved.category, "Maintenance");
        assert_eq!(moved.amount, expense.amount);

        let patch = ExpensePatch {
            category: Some("Rent".to_string()),
            ..ExpensePatch::default()
        };
        assert!(update_expense(&db, &expense.id, patch).await.is_err());

        let rejected = set_expense_status(&db, &expense.id, ApprovalStatus::Rejected)
            .await
            .unwrap();
        assert_eq!(rejected.approval_status, ApprovalStatus::Rejected);

        delete_expense(&db, &expense.id).await.unwrap();
        assert!(list_expenses(&db).await.unwrap().is_empty());
    }
}
