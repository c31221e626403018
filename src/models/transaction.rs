//! Transaction models

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use super::wire::{deserialize_account_ref, deserialize_id, deserialize_timestamp};

/// Kind of money movement recorded by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
    Canceled,
    /// A kind this client does not know; kept so the rest of the list still loads
    Other,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Withdrawal => "withdrawal",
            TransactionType::Transfer => "transfer",
            TransactionType::Canceled => "canceled",
            TransactionType::Other => "other",
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deposit" => Ok(TransactionType::Deposit),
            "withdraw" | "withdrawal" => Ok(TransactionType::Withdrawal),
            "transfer" => Ok(TransactionType::Transfer),
            "canceled" | "cancelled" => Ok(TransactionType::Canceled),
            other => Err(format!("unknown transaction type: {}", other)),
        }
    }
}

impl From<String> for TransactionType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            warn!("Unknown transaction type from backend: {:?}", value);
            TransactionType::Other
        })
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable record of a completed (or canceled) money movement
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    #[serde(alias = "tid", alias = "tId", deserialize_with = "deserialize_id")]
    pub id: i64,
    pub amount: Decimal,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date: NaiveDateTime,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(
        default,
        alias = "senderAccount",
        alias = "sendingAccount",
        alias = "sending_acc",
        deserialize_with = "deserialize_account_ref"
    )]
    pub sender: Option<i64>,
    #[serde(
        default,
        alias = "receiverAccount",
        alias = "receiver_acc",
        deserialize_with = "deserialize_account_ref"
    )]
    pub receiver: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_shape() {
        let json = r#"{
            "id": "41",
            "date": "2025-02-10T14:05:00",
            "type": "TRANSFER",
            "receiverAccount": { "aId": 12, "balance": 90.0 },
            "amount": 250.5
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(tx.id, 41);
        assert_eq!(tx.kind, TransactionType::Transfer);
        assert_eq!(tx.receiver, Some(12));
        assert_eq!(tx.sender, None);
        assert_eq!(tx.amount, "250.5".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_history_shape() {
        let json = r#"{
            "tid": 3,
            "amount": 100,
            "date": "2025-02-11",
            "type": "withdraw",
            "receiver_acc": null,
            "sending_acc": 5
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(tx.id, 3);
        assert_eq!(tx.kind, TransactionType::Withdrawal);
        assert_eq!(tx.sender, Some(5));
        assert_eq!(tx.receiver, None);
    }

    #[test]
    fn test_unknown_type_is_rejected_as_input() {
        assert!("refund".parse::<TransactionType>().is_err());
        assert!("other".parse::<TransactionType>().is_err());
        assert_eq!("Cancelled".parse::<TransactionType>(), Ok(TransactionType::Canceled));
    }

    #[test]
    fn test_unknown_type_does_not_break_the_list() {
        let json = r#"[
            { "tid": 1, "amount": 10, "date": "2025-02-11", "type": "deposit" },
            { "tid": 2, "amount": 4, "date": "2025-02-12", "type": "REFUND" }
        ]"#;
        let txs: Vec<Transaction> = serde_json::from_str(json).unwrap();

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].kind, TransactionType::Deposit);
        assert_eq!(txs[1].kind, TransactionType::Other);
        assert_eq!(txs[1].kind.to_string(), "other");
    }
}
