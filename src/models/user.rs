//! User models

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use super::wire::{deserialize_id, deserialize_optional_text};
use super::Account;

/// Role claim carried by the backend token and user records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ADMIN" | "ROLE_ADMIN" => Ok(Role::Admin),
            "USER" | "ROLE_USER" | "CUSTOMER" => Ok(Role::User),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bank customer (or admin) with their account, as returned by `/api/users`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    #[serde(alias = "uid", alias = "userId", deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub mobile: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub account: Option<Account>,
}

impl User {
    /// Users without an account rank as a zero balance
    pub fn balance(&self) -> Decimal {
        self.account
            .as_ref()
            .map(|account| account.balance)
            .unwrap_or_default()
    }

    pub fn account_created_at(&self) -> Option<NaiveDateTime> {
        self.account.as_ref().and_then(|account| account.created_at)
    }
}
