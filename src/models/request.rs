//! Money request models

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::wire::{deserialize_account_ref, deserialize_id, deserialize_optional_timestamp};

/// Lifecycle of a money request: pending → confirmed | canceled
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum RequestStatus {
    Pending,
    Confirmed,
    Canceled,
    /// Anything else the backend might report; never shown as pending
    Other(String),
}

impl From<String> for RequestStatus {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pending" => RequestStatus::Pending,
            "confirmed" | "confirm" => RequestStatus::Confirmed,
            "canceled" | "cancelled" | "cancel" => RequestStatus::Canceled,
            _ => RequestStatus::Other(value),
        }
    }
}

/// Status transitions the client can ask the backend for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
    Confirm,
    Cancel,
}

impl RequestAction {
    /// Value of the `statusRequest` query parameter
    pub fn as_query_value(&self) -> &'static str {
        match self {
            RequestAction::Confirm => "confirm",
            RequestAction::Cancel => "cancel",
        }
    }
}

impl fmt::Display for RequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

/// A request from one account to another for funds
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoneyRequest {
    #[serde(alias = "rid", alias = "rId", deserialize_with = "deserialize_id")]
    pub id: i64,
    pub amount: Decimal,
    #[serde(
        default,
        rename = "requestDate",
        deserialize_with = "deserialize_optional_timestamp"
    )]
    pub requested_at: Option<NaiveDateTime>,
    pub status: RequestStatus,
    #[serde(
        default,
        rename = "requesterAccount",
        alias = "requester",
        deserialize_with = "deserialize_account_ref"
    )]
    pub requester: Option<i64>,
}

impl MoneyRequest {
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let json = r#"{
            "rid": 9,
            "amount": 75.25,
            "requestDate": "2025-04-01T10:00:00",
            "status": "Pending",
            "requesterAccount": { "aId": 3 }
        }"#;
        let request: MoneyRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.id, 9);
        assert_eq!(request.requester, Some(3));
        assert!(request.is_pending());
    }

    #[test]
    fn test_status_is_case_insensitive() {
        assert_eq!(RequestStatus::from("PENDING".to_string()), RequestStatus::Pending);
        assert_eq!(RequestStatus::from("Confirmed".to_string()), RequestStatus::Confirmed);
        assert_eq!(
            RequestStatus::from("expired".to_string()),
            RequestStatus::Other("expired".to_string())
        );
    }
}
