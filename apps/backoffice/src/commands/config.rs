//! # Config Commands
//!
//! Store settings the panels need for display: header, currency, the VAT
//! rate new dishes start with. Storage and logging settings stay private.

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use jiko_core::types::VatRate;

use crate::state::AppConfig;

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub store_name: String,
    pub currency_code: String,
    pub currency_symbol: String,
    #[ts(type = "number")]
    pub default_vat_rate: VatRate,
}

pub fn get_config(config: &AppConfig) -> StoreSettings {
    debug!("get_config command");
    StoreSettings {
        store_name: config.store_name.clone(),
        currency_code: config.currency_code.clone(),
        currency_symbol: config.currency_symbol.clone(),
        default_vat_rate: config.default_vat_rate,
    }
}
