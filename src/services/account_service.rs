use rust_decimal::Decimal;
use tracing::{error, info};

use crate::api::bank::BankBackend;
use crate::models::{Account, User};
use crate::session::AuthSession;
use crate::utils::errors::ServiceError;
use crate::utils::money::{format_money, parse_amount};

pub async fn get_profile(backend: &dyn BankBackend, auth: &AuthSession) -> Result<User, ServiceError> {
    backend
        .get_user(&auth.token, auth.user_id)
        .await
        .map_err(|e| {
            error!("Error fetching user {}: {}", auth.user_id, e);
            ServiceError::inline("Failed to fetch user", e)
        })
}

pub async fn get_balance(
    backend: &dyn BankBackend,
    auth: &AuthSession,
) -> Result<Account, ServiceError> {
    backend
        .get_account(&auth.token, auth.user_id)
        .await
        .map_err(|e| {
            error!("Error fetching account for user {}: {}", auth.user_id, e);
            ServiceError::inline("Failed to fetch account details", e)
        })
}

/// A validated money movement waiting for the user to confirm it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOperation {
    Deposit { amount: Decimal },
    Withdraw { amount: Decimal },
    Transfer { receiver: i64, amount: Decimal },
}

fn amount_or(raw: &str, message: &str) -> Result<Decimal, ServiceError> {
    parse_amount(raw).ok_or_else(|| ServiceError::validation(message))
}

pub(crate) fn parse_receiver(raw: &str) -> Result<i64, ServiceError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ServiceError::validation("Please enter a valid receiver ID"))
}

impl PendingOperation {
    pub fn deposit(raw_amount: &str) -> Result<Self, ServiceError> {
        let amount = amount_or(raw_amount, "Please enter a valid deposit amount")?;
        Ok(PendingOperation::Deposit { amount })
    }

    pub fn withdraw(raw_amount: &str) -> Result<Self, ServiceError> {
        let amount = amount_or(raw_amount, "Please enter a valid withdrawal amount")?;
        Ok(PendingOperation::Withdraw { amount })
    }

    /// Amount is checked before the receiver
    pub fn transfer(raw_receiver: &str, raw_amount: &str) -> Result<Self, ServiceError> {
        let amount = amount_or(raw_amount, "Please enter a valid transfer amount")?;
        let receiver = parse_receiver(raw_receiver)?;
        Ok(PendingOperation::Transfer { receiver, amount })
    }

    pub fn confirmation_prompt(&self) -> String {
        let question = match self {
            PendingOperation::Deposit { amount } => {
                format!("Deposit {} into your account?", format_money(*amount))
            }
            PendingOperation::Withdraw { amount } => {
                format!("Withdraw {} from your account?", format_money(*amount))
            }
            PendingOperation::Transfer { receiver, amount } => {
                format!("Send {} to account {}?", format_money(*amount), receiver)
            }
        };
        format!("⚠️ {}\nType `confirm` to proceed or `dismiss` to cancel.", question)
    }

    pub fn success_message(&self) -> String {
        match self {
            PendingOperation::Deposit { amount } => {
                format!("Deposited {} successfully!", format_money(*amount))
            }
            PendingOperation::Withdraw { amount } => {
                format!("Withdrew {} successfully!", format_money(*amount))
            }
            PendingOperation::Transfer { receiver, amount } => {
                format!("Sent {} to account {}!", format_money(*amount), receiver)
            }
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            PendingOperation::Deposit { .. } => "Deposit failed",
            PendingOperation::Withdraw { .. } => "Withdrawal failed",
            PendingOperation::Transfer { .. } => "Transfer failed",
        }
    }
}

/// Run a confirmed operation. Any non-2xx aborts it with no success message.
pub async fn execute(
    backend: &dyn BankBackend,
    auth: &AuthSession,
    operation: &PendingOperation,
) -> Result<String, ServiceError> {
    let result = match *operation {
        PendingOperation::Deposit { amount } => {
            backend.deposit(&auth.token, auth.user_id, amount).await
        }
        PendingOperation::Withdraw { amount } => {
            backend.withdraw(&auth.token, auth.user_id, amount).await
        }
        PendingOperation::Transfer { receiver, amount } => {
            backend
                .transfer(&auth.token, auth.user_id, receiver, amount)
                .await
        }
    };

    match result {
        Ok(()) => {
            info!("User {}: {:?} succeeded", auth.user_id, operation);
            Ok(operation.success_message())
        }
        Err(e) => {
            error!("{}: {}", operation.failure_message(), e);
            Err(ServiceError::api(operation.failure_message(), e))
        }
    }
}
