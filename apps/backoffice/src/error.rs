//! # API Error Type
//!
//! Unified error type returned by every back-office command.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Jiko POS                               │
//! │                                                                         │
//! │  Panel                       Rust Backend                               │
//! │  ─────                       ────────────                               │
//! │                                                                         │
//! │  completeSale('mpesa', 500)                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Rule broken? ─── CoreError::Underpayment ─────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Storage failed? ─── DbError::QueryFailed ────── ApiError ─────►│  │
//! │  │         │                                   (logged once)        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The panel shows `message` and keeps its own state. Nothing retries.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{error, warn};

use jiko_core::{CoreError, ValidationError};
use jiko_db::DbError;

use crate::state::ConfigError;

/// Error returned from back-office commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "PAYMENT_ERROR",
///   "message": "Amount paid KSh 500.00 is less than the total KSh 522.00"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Record not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// A unique field already holds this value
    Conflict,

    /// Storage operation failed
    DatabaseError,

    /// Business rule violated
    BusinessLogic,

    /// Order composition failed
    OrderError,

    /// Payment does not settle the order
    PaymentError,

    /// No user is signed in, or the credentials were refused
    Unauthorized,

    /// The signed-in role may not do this
    Forbidden,

    /// Configuration could not be loaded
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn order(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::OrderError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        let api = match &err {
            DbError::NotFound { entity, id } => ApiError::not_found(entity, id),
            DbError::UniqueViolation { .. } => ApiError::new(ErrorCode::Conflict, err.to_string()),
            DbError::Immutable { .. } => ApiError::new(ErrorCode::BusinessLogic, err.to_string()),
            DbError::Serialization { key, message } => {
                error!(key = %key, message = %message, "Stored collection is unreadable");
                ApiError::new(ErrorCode::DatabaseError, "Stored data could not be read")
            }
            DbError::ConnectionFailed(e) => {
                error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                error!("Database pool exhausted");
                ApiError::new(ErrorCode::DatabaseError, "Database is busy, try again")
            }
            DbError::Internal(e) => {
                error!("Internal storage error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        };

        if api.code != ErrorCode::DatabaseError {
            warn!(code = ?api.code, "{}", api.message);
        }
        api
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::MenuItemUnavailable { .. }
            | CoreError::RequiredAccompanimentMissing { .. }
            | CoreError::UnknownAccompaniment { .. }
            | CoreError::OrderLineNotFound(_)
            | CoreError::OrderTooLarge { .. }
            | CoreError::EmptyOrder => ErrorCode::OrderError,
            CoreError::QuantityTooLarge { .. } | CoreError::Validation(_) => {
                ErrorCode::ValidationError
            }
            CoreError::Underpayment { .. } | CoreError::InvalidPaymentAmount { .. } => {
                ErrorCode::PaymentError
            }
            CoreError::AccessDenied { .. } => ErrorCode::Forbidden,
            CoreError::UnknownPanel(_) => ErrorCode::NotFound,
        };

        let message = match err {
            CoreError::Validation(e) => e.to_string(),
            other => other.to_string(),
        };

        warn!(code = ?code, "{}", message);
        ApiError::new(code, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        warn!("Rejected input: {}", err);
        ApiError::validation(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        error!("Configuration error: {}", err);
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use jiko_core::money::Money;

    #[test]
    fn test_underpayment_maps_to_payment_error() {
        let err = ApiError::from(CoreError::Underpayment {
            total: Money::from_major(522),
            paid: Money::from_major(500),
        });
        assert_eq!(err.code, ErrorCode::PaymentError);
        assert!(err.message.contains("522"));
    }

    #[test]
    fn test_storage_details_are_hidden() {
        let err = ApiError::from(DbError::QueryFailed("disk I/O error at page 7".to_string()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("page 7"));
    }

    #[test]
    fn test_validation_message_is_not_prefixed() {
        let err = ApiError::from(CoreError::Validation(ValidationError::Required {
            field: "name".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name is required");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::not_found("MenuItem", "42");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "MenuItem not found: 42");
    }
}
