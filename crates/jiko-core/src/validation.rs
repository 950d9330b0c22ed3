//! # Validation Module
//!
//! Boundary validators for Jiko POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Panel forms                                                  │
//! │  ├── Raw text and floats, possibly empty or NaN                        │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Back-office commands                                         │
//! │  └── THIS MODULE: parse, reject non-finite and negative numbers        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing / order engine                                       │
//! │  └── Only ever sees well-formed Money, VatRate and quantities          │
//! │                                                                         │
//! │  Layer 4: Persistence                                                  │
//! │  └── Unique keys (expense category names)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use jiko_core::validation::{parse_amount, validate_name};
//!
//! validate_name("name", "Beef Pilau").unwrap();
//! let price = parse_amount("basePrice", "450").unwrap();
//! assert_eq!(price.to_string(), "KSh 450.00");
//! assert!(parse_amount("basePrice", "NaN").is_err());
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{
    ExpenseCategory, Ingredient, NewExpense, NewExpenseCategory, NewInventoryItem, NewMenuItem,
    VatRate,
};
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of names and descriptions.
pub const MAX_NAME_LEN: usize = 200;

/// Longest look-ahead for the stock expiry report.
pub const MAX_EXPIRY_WINDOW_DAYS: i64 = 365;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (dish, stock item, category).
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a non-negative amount typed into a form field.
///
/// For panels that submit raw text. Commands that take an `f64` go through
/// [`amount_from_f64`] instead.
///
/// ## Rules
/// - Blank is `Required`
/// - Anything that is not a plain decimal number is `NotANumber`
/// - Negative is `MustBeNonNegative`
///
/// ## Example
/// ```rust
/// use jiko_core::validation::parse_amount;
///
/// assert!(parse_amount("amount", "72.5").is_ok());
/// assert!(parse_amount("amount", "").is_err());
/// assert!(parse_amount("amount", "-3").is_err());
/// assert!(parse_amount("amount", "inf").is_err());
/// ```
pub fn parse_amount(field: &str, raw: &str) -> ValidationResult<Money> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let value = Decimal::from_str(raw).map_err(|_| ValidationError::NotANumber {
        field: field.to_string(),
    })?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(Money::new(value))
}

/// Converts a float from a numeric input into Money.
///
/// Rejects NaN, infinities and negatives.
pub fn amount_from_f64(field: &str, value: f64) -> ValidationResult<Money> {
    let money = Money::try_from_f64(value).ok_or_else(|| ValidationError::NotANumber {
        field: field.to_string(),
    })?;

    if money.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(money)
}

/// Must be strictly greater than zero (expense amounts).
pub fn validate_positive_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Must be zero or more (prices, surcharges, budgets, costs).
pub fn validate_non_negative_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a VAT rate fraction.
///
/// ## Rules
/// - Between 0 and 1 inclusive (0% to 100%)
pub fn validate_vat_rate(rate: VatRate) -> ValidationResult<()> {
    let fraction = rate.fraction();
    if fraction < Decimal::ZERO || fraction > Decimal::ONE {
        return Err(ValidationError::OutOfRange {
            field: "vatRate".to_string(),
            min: "0".to_string(),
            max: "1".to_string(),
        });
    }

    Ok(())
}

/// Validates an order line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > i64::from(MAX_LINE_QUANTITY) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: "1".to_string(),
            max: MAX_LINE_QUANTITY.to_string(),
        });
    }

    Ok(())
}

/// Validates the look-ahead of the expiry report, in days.
pub fn validate_expiry_window(days: i64) -> ValidationResult<()> {
    if !(0..=MAX_EXPIRY_WINDOW_DAYS).contains(&days) {
        return Err(ValidationError::OutOfRange {
            field: "expiry window".to_string(),
            min: "0".to_string(),
            max: MAX_EXPIRY_WINDOW_DAYS.to_string(),
        });
    }

    Ok(())
}

/// Recipe quantities must be positive.
pub fn validate_ingredient_quantity(quantity: Decimal) -> ValidationResult<()> {
    if quantity <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "ingredient quantity".to_string(),
        });
    }

    Ok(())
}

/// Stock levels and thresholds can be zero but never negative.
pub fn validate_stock_quantity(field: &str, quantity: Decimal) -> ValidationResult<()> {
    if quantity < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Reference Validators
// =============================================================================

/// An expense must name a category that exists (case-insensitive).
///
/// Returns the category's stored spelling so the expense matches it exactly.
pub fn validate_expense_category(
    name: &str,
    known: &[ExpenseCategory],
) -> ValidationResult<String> {
    validate_name("category", name)?;

    known
        .iter()
        .find(|c| c.matches_name(name))
        .map(|c| c.name.clone())
        .ok_or_else(|| ValidationError::NotAllowed {
            field: "category".to_string(),
            allowed: known.iter().map(|c| c.name.clone()).collect(),
        })
}

// =============================================================================
// Payload Validators
// =============================================================================

fn validate_ingredient(ingredient: &Ingredient) -> ValidationResult<()> {
    validate_name("ingredient name", &ingredient.name)?;
    validate_ingredient_quantity(ingredient.quantity)
}

/// Checks a new dish before it is stored.
pub fn validate_new_menu_item(item: &NewMenuItem) -> ValidationResult<()> {
    validate_name("name", &item.name)?;
    validate_name("category", &item.category)?;
    validate_non_negative_amount("basePrice", item.base_price)?;
    validate_vat_rate(item.vat_rate)?;

    for ingredient in &item.ingredients {
        validate_ingredient(ingredient)?;
    }
    for accompaniment in &item.accompaniments {
        validate_name("accompaniment name", &accompaniment.name)?;
        validate_non_negative_amount("accompaniment price", accompaniment.price)?;
    }

    Ok(())
}

pub fn validate_new_inventory_item(item: &NewInventoryItem) -> ValidationResult<()> {
    validate_name("name", &item.name)?;
    validate_name("unit", &item.unit)?;
    validate_stock_quantity("quantity", item.quantity)?;
    validate_stock_quantity("minStock", item.min_stock)?;
    validate_non_negative_amount("cost", item.cost)
}

/// Checks an expense; the category must already exist.
pub fn validate_new_expense(
    expense: &NewExpense,
    categories: &[ExpenseCategory],
) -> ValidationResult<()> {
    validate_name("description", &expense.description)?;
    validate_positive_amount("amount", expense.amount)?;
    validate_expense_category(&expense.category, categories)?;

    if expense.added_by.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "addedBy".to_string(),
        });
    }

    Ok(())
}

pub fn validate_new_expense_category(category: &NewExpenseCategory) -> ValidationResult<()> {
    validate_name("name", &category.name)?;
    validate_non_negative_amount("budget", category.budget)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NewExpenseCategory, PaymentMethod};
    use chrono::NaiveDate;

    fn categories() -> Vec<ExpenseCategory> {
        vec![ExpenseCategory::from_new(
            "1".to_string(),
            NewExpenseCategory {
                name: "Utilities".to_string(),
                budget: Money::from_major(20_000),
                color: String::new(),
            },
        )]
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Nyama Choma").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("amount", " 450 ").unwrap(), Money::from_major(450));
        assert_eq!(parse_amount("amount", "0").unwrap(), Money::zero());

        assert!(matches!(
            parse_amount("amount", ""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_amount("amount", "NaN"),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_amount("amount", "12abc"),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_amount("amount", "-5"),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
    }

    #[test]
    fn test_amount_from_f64() {
        assert!(amount_from_f64("amountPaid", 600.0).is_ok());
        assert!(amount_from_f64("amountPaid", f64::NAN).is_err());
        assert!(amount_from_f64("amountPaid", f64::NEG_INFINITY).is_err());
        assert!(amount_from_f64("amountPaid", -0.5).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_expiry_window() {
        assert!(validate_expiry_window(0).is_ok());
        assert!(validate_expiry_window(MAX_EXPIRY_WINDOW_DAYS).is_ok());

        assert!(validate_expiry_window(-1).is_err());
        assert!(validate_expiry_window(1_000_000_000).is_err());
        assert!(validate_expiry_window(i64::MIN).is_err());
    }

    #[test]
    fn test_validate_vat_rate() {
        assert!(validate_vat_rate(VatRate::default()).is_ok());
        assert!(validate_vat_rate(VatRate::zero()).is_ok());
        assert!(validate_vat_rate(VatRate::from_percent(100)).is_ok());
        assert!(validate_vat_rate(VatRate::from_percent(101)).is_err());
        assert!(validate_vat_rate(VatRate::new(Decimal::new(-1, 2))).is_err());
    }

    #[test]
    fn test_validate_ingredient_quantity() {
        assert!(validate_ingredient_quantity(Decimal::new(5, 1)).is_ok());
        assert!(validate_ingredient_quantity(Decimal::ZERO).is_err());
    }

    #[test]
    fn test_expense_category_must_exist() {
        let known = categories();
        assert_eq!(
            validate_expense_category("utilities", &known).unwrap(),
            "Utilities"
        );
        assert!(matches!(
            validate_expense_category("Rent", &known),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_validate_new_expense() {
        let mut expense = NewExpense {
            description: "KPLC tokens".to_string(),
            amount: Money::from_major(3500),
            category: "Utilities".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            payment_method: PaymentMethod::Mpesa,
            receipt: None,
            added_by: "2".to_string(),
            approval_status: Default::default(),
        };
        assert!(validate_new_expense(&expense, &categories()).is_ok());

        expense.amount = Money::zero();
        assert!(matches!(
            validate_new_expense(&expense, &categories()),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_validate_new_menu_item() {
        let item = NewMenuItem::new("Githeri", Money::from_major(200), "Mains");
        assert!(validate_new_menu_item(&item).is_ok());

        let bad = NewMenuItem::new("", Money::from_major(200), "Mains");
        assert!(validate_new_menu_item(&bad).is_err());

        let negative = NewMenuItem::new("Githeri", Money::from_major(-1), "Mains");
        assert!(validate_new_menu_item(&negative).is_err());
    }
}
