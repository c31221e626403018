use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::api::bank::BankBackend;
use crate::models::{MoneyRequest, RequestAction};
use crate::services::account_service::parse_receiver;
use crate::session::AuthSession;
use crate::utils::errors::ServiceError;
use crate::utils::money::{format_money, parse_amount};

/// Ask another account for money. No confirmation step.
pub async fn create_request(
    backend: &dyn BankBackend,
    auth: &AuthSession,
    raw_receiver: &str,
    raw_amount: &str,
) -> Result<String, ServiceError> {
    let amount: Decimal = parse_amount(raw_amount)
        .ok_or_else(|| ServiceError::validation("Please enter a valid request amount"))?;
    let receiver = parse_receiver(raw_receiver)?;

    backend
        .create_request(&auth.token, auth.account_id(), receiver, amount)
        .await
        .map_err(|e| {
            error!("Money request creation failed: {}", e);
            ServiceError::api("Failed to create money request", e)
        })?;

    info!("User {} requested {} from account {}", auth.user_id, amount, receiver);
    Ok(format!(
        "Requested {} from account {}",
        format_money(amount),
        receiver
    ))
}

/// Pending money requests addressed to the user, plus the one picked for acceptance
#[derive(Debug, Default)]
pub struct RequestInbox {
    pending: Vec<MoneyRequest>,
    selected: Option<MoneyRequest>,
}

impl RequestInbox {
    pub fn pending(&self) -> &[MoneyRequest] {
        &self.pending
    }

    pub fn selected(&self) -> Option<&MoneyRequest> {
        self.selected.as_ref()
    }

    pub fn find(&self, id: i64) -> Option<&MoneyRequest> {
        self.pending.iter().find(|request| request.id == id)
    }

    /// Replace the visible set with the pending subset of a fresh fetch.
    /// A selection that is no longer pending is dropped.
    pub fn apply_poll(&mut self, fetched: Vec<MoneyRequest>) -> usize {
        self.pending = fetched.into_iter().filter(MoneyRequest::is_pending).collect();
        if let Some(id) = self.selected.as_ref().map(|r| r.id) {
            self.selected = self.find(id).cloned();
        }
        self.pending.len()
    }

    /// Pick a request for the confirmation step. Never touches the backend.
    pub fn begin_accept(&mut self, id: i64) -> Result<&MoneyRequest, ServiceError> {
        let request = self
            .find(id)
            .cloned()
            .ok_or_else(|| not_found(id))?;
        let request: &MoneyRequest = self.selected.insert(request);
        Ok(request)
    }

    pub fn dismiss(&mut self) -> Option<MoneyRequest> {
        self.selected.take()
    }

    fn remove(&mut self, id: i64) {
        self.pending.retain(|request| request.id != id);
        if self.selected.as_ref().is_some_and(|r| r.id == id) {
            self.selected = None;
        }
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.selected = None;
    }
}

fn not_found(id: i64) -> ServiceError {
    ServiceError::validation(format!("No pending money request with id {}", id))
}

/// Cancel straight away; the request disappears only once the backend agrees
pub async fn cancel_request(
    backend: &dyn BankBackend,
    auth: &AuthSession,
    inbox: &Mutex<RequestInbox>,
    id: i64,
) -> Result<MoneyRequest, ServiceError> {
    let request = inbox.lock().await.find(id).cloned().ok_or_else(|| not_found(id))?;

    backend
        .update_request(&auth.token, id, RequestAction::Cancel)
        .await
        .map_err(|e| {
            error!("Error updating money request {}: {}", id, e);
            ServiceError::api("Failed to update money request", e)
        })?;

    inbox.lock().await.remove(id);
    debug!("Canceled money request {}", id);
    Ok(request)
}

/// Confirm the selected request. On failure both the request and the selection stay.
pub async fn confirm_accept(
    backend: &dyn BankBackend,
    auth: &AuthSession,
    inbox: &Mutex<RequestInbox>,
) -> Result<MoneyRequest, ServiceError> {
    let request = inbox
        .lock()
        .await
        .selected()
        .cloned()
        .ok_or_else(|| ServiceError::validation("No request selected. Use `accept <id>` first"))?;

    backend
        .update_request(&auth.token, request.id, RequestAction::Confirm)
        .await
        .map_err(|e| {
            error!("Error confirming money request {}: {}", request.id, e);
            ServiceError::api("Failed to confirm money request", e)
        })?;

    inbox.lock().await.remove(request.id);
    info!("Confirmed money request {}", request.id);
    Ok(request)
}
