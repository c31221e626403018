//! Account models

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::wire::{deserialize_id, deserialize_optional_timestamp};

/// A balance-holding account owned by one user. Read-only on our side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Account {
    #[serde(default, alias = "aId", alias = "aid", deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(default)]
    pub balance: Decimal,
    #[serde(
        default,
        rename = "dateCreated",
        alias = "createdAt",
        deserialize_with = "deserialize_optional_timestamp"
    )]
    pub created_at: Option<NaiveDateTime>,
}
