//! How each record type takes part in filtering and sorting

use std::borrow::Cow;
use std::str::FromStr;

use chrono::NaiveDateTime;

use super::{Listable, SortValue};
use crate::models::{Role, Transaction, TransactionType, User};

/// Sortable columns of a transaction table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionSort {
    Date,
    Type,
    Receiver,
    Amount,
}

impl FromStr for TransactionSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(TransactionSort::Date),
            "type" => Ok(TransactionSort::Type),
            "receiver" | "to" => Ok(TransactionSort::Receiver),
            "amount" => Ok(TransactionSort::Amount),
            other => Err(format!(
                "Cannot sort transactions by `{}`. Use date, type, receiver or amount",
                other
            )),
        }
    }
}

/// Sortable columns of the admin account list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountSort {
    Balance,
    DateCreated,
}

impl FromStr for AccountSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "balance" => Ok(AccountSort::Balance),
            "date" | "created" | "datecreated" => Ok(AccountSort::DateCreated),
            other => Err(format!(
                "Cannot sort accounts by `{}`. Use balance or date",
                other
            )),
        }
    }
}

impl Listable for Transaction {
    type SortKey = TransactionSort;
    type Category = TransactionType;

    // Transactions are only narrowed by type and date
    fn search_fields(&self) -> Vec<&str> {
        Vec::new()
    }

    fn category(&self) -> TransactionType {
        self.kind
    }

    fn timestamp(&self) -> Option<NaiveDateTime> {
        Some(self.date)
    }

    fn sort_value(&self, key: TransactionSort) -> SortValue<'_> {
        match key {
            TransactionSort::Date => SortValue::Instant(Some(self.date)),
            TransactionSort::Type => SortValue::Text(Cow::Borrowed(self.kind.as_str())),
            TransactionSort::Receiver => SortValue::Number(self.receiver.unwrap_or(0).into()),
            TransactionSort::Amount => SortValue::Number(self.amount),
        }
    }
}

impl Listable for User {
    type SortKey = AccountSort;
    type Category = Role;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.username.as_str(), self.email.as_str()]
    }

    fn category(&self) -> Role {
        self.role
    }

    fn timestamp(&self) -> Option<NaiveDateTime> {
        self.account_created_at()
    }

    fn sort_value(&self, key: AccountSort) -> SortValue<'_> {
        match key {
            AccountSort::Balance => SortValue::Number(self.balance()),
            AccountSort::DateCreated => SortValue::Instant(self.account_created_at()),
        }
    }
}
