//! # Sales History Commands

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use jiko_core::error::ValidationError;
use jiko_core::types::Sale;
use jiko_db::{Repository, SaleRepository};

use crate::error::ApiError;
use crate::state::DbState;

pub async fn list_sales(db: &DbState) -> Result<Vec<Sale>, ApiError> {
    debug!("list_sales command");
    Ok(db.inner().sales().get_all().await?)
}

/// Sales with `start <= timestamp <= end`.
pub async fn sales_in_range(
    db: &DbState,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<Sale>, ApiError> {
    debug!(%start, %end, "sales_in_range command");
    if start > end {
        return Err(ValidationError::OutOfRange {
            field: "start".to_string(),
            min: "-".to_string(),
            max: end.to_rfc3339(),
        }
        .into());
    }
    Ok(db.inner().sales().get_by_date_range(start, end).await?)
}

/// Whole calendar days, UTC, both ends inclusive.
pub async fn sales_between_days(
    db: &DbState,
    first: NaiveDate,
    last: NaiveDate,
) -> Result<Vec<Sale>, ApiError> {
    let (start, end) = day_bounds(first, last)?;
    sales_in_range(db, start, end).await
}

pub async fn get_sale(db: &DbState, id: &str) -> Result<Sale, ApiError> {
    debug!(id, "get_sale command");
    Ok(db.inner().sales().get(&id.to_string()).await?)
}

/// First instant of `first` to the last representable instant of `last`.
pub(crate) fn day_bounds(
    first: NaiveDate,
    last: NaiveDate,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ApiError> {
    let start = first.and_hms_opt(0, 0, 0);
    let end = last.and_hms_nano_opt(23, 59, 59, 999_999_999);
    match (start, end) {
        (Some(start), Some(end)) => Ok((start.and_utc(), end.and_utc())),
        _ => Err(ApiError::internal("Could not build the date range")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::testing;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_day_range_includes_both_days() {
        let db = testing::db();
        let times = [
            Utc.with_ymd_and_hms(2026, 10, 4, 23, 59, 59).unwrap(),
            Utc.with_ymd_and_hms(2026, 10, 5, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 10, 6, 23, 59, 59).unwrap(),
            Utc.with_ymd_and_hms(2026, 10, 7, 0, 0, 0).unwrap(),
        ];
        for at in times {
            testing::record_sale(&db, at).await;
        }

        let first = NaiveDate::from_ymd_opt(2026, 10, 5).unwrap();
        let last = NaiveDate::from_ymd_opt(2026, 10, 6).unwrap();
        let sales = sales_between_days(&db, first, last).await.unwrap();
        assert_eq!(sales.len(), 2);

        assert_eq!(list_sales(&db).await.unwrap().len(), 4);
        let one = &sales[0];
        assert_eq!(&get_sale(&db, &one.id).await.unwrap(), one);
    }

    #[tokio::test]
    async fn test_reversed_range_is_rejected() {
        let db = testing::db();
        let now = Utc::now();
        let err = sales_in_range(&db, now, now - chrono::Duration::days(1))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
