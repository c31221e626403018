//! Deposit, withdraw and send, each behind a confirmation step

use tracing::debug;

use super::{dashboard, Shell};
use crate::services::account_service::{self, PendingOperation};
use crate::services::request_service;
use crate::utils::errors::ServiceError;
use crate::utils::money::format_money;

pub async fn deposit(shell: &mut Shell, args: &[&str]) -> Result<String, ServiceError> {
    shell.session.require()?;
    let [amount] = args else {
        return Err(ServiceError::validation("Usage: `deposit <amount>`"));
    };
    open(shell, PendingOperation::deposit(amount)?).await
}

pub async fn withdraw(shell: &mut Shell, args: &[&str]) -> Result<String, ServiceError> {
    shell.session.require()?;
    let [amount] = args else {
        return Err(ServiceError::validation("Usage: `withdraw <amount>`"));
    };
    open(shell, PendingOperation::withdraw(amount)?).await
}

pub async fn send(shell: &mut Shell, args: &[&str]) -> Result<String, ServiceError> {
    shell.session.require()?;
    let [receiver, amount] = args else {
        return Err(ServiceError::validation("Usage: `send <account id> <amount>`"));
    };
    open(shell, PendingOperation::transfer(receiver, amount)?).await
}

/// Only one thing waits for `confirm` at a time
async fn open(shell: &mut Shell, operation: PendingOperation) -> Result<String, ServiceError> {
    shell.inbox.lock().await.dismiss();
    let prompt = operation.confirmation_prompt();
    shell.pending = Some(operation);
    Ok(prompt)
}

pub async fn confirm(shell: &mut Shell) -> Result<String, ServiceError> {
    let auth = shell.session.require()?;

    if let Some(operation) = shell.pending {
        // On failure the operation stays pending so the user can retry or dismiss
        let message = account_service::execute(shell.backend.as_ref(), auth, &operation).await?;
        shell.pending = None;
        dashboard::refresh_account(shell).await;
        return Ok(format!("✅ {}\n{}", message, dashboard::balance_line(shell)));
    }

    let has_selection = shell.inbox.lock().await.selected().is_some();
    if has_selection {
        let request =
            request_service::confirm_accept(shell.backend.as_ref(), auth, &shell.inbox).await?;
        dashboard::refresh_account(shell).await;
        return Ok(format!(
            "✅ Accepted request #{} for {}\n{}",
            request.id,
            format_money(request.amount),
            dashboard::balance_line(shell)
        ));
    }

    Err(ServiceError::validation("Nothing to confirm"))
}

pub async fn dismiss(shell: &mut Shell) -> Result<String, ServiceError> {
    if let Some(operation) = shell.pending.take() {
        debug!("Dismissed {:?}", operation);
        return Ok("Dismissed. Nothing was sent to the bank.".to_string());
    }
    if let Some(request) = shell.inbox.lock().await.dismiss() {
        return Ok(format!("Dismissed request #{}. It is still pending.", request.id));
    }
    Ok("Nothing to dismiss".to_string())
}
