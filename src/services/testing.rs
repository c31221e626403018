//! In-memory backend for service tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::api::bank::{ApiError, BankBackend};
use crate::models::{
    Account, Credentials, LoginResponse, MoneyRequest, NewUser, RequestAction, Transaction,
    TransactionType, User,
};
use crate::models::request::RequestStatus;
use crate::session::AuthSession;

#[derive(Default)]
pub(crate) struct FakeBank {
    pub token: String,
    pub user_id: i64,
    pub users: Vec<User>,
    pub account: Option<Account>,
    pub transactions: Mutex<Vec<Transaction>>,
    pub requests: Mutex<Vec<MoneyRequest>>,
    /// Error returned by every mutating call while set
    pub fail_with: Mutex<Option<ApiError>>,
    /// Error returned by `list_users` while set
    pub list_users_error: Option<ApiError>,
    /// Makes `list_requests` hang, for teardown tests
    pub request_delay: Option<Duration>,
    pub calls: Mutex<Vec<String>>,
    pub request_polls: AtomicUsize,
}

impl FakeBank {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_mutations(&self, error: Option<ApiError>) {
        *self.fail_with.lock().unwrap() = error;
    }

    fn mutation(&self, call: String) -> Result<(), ApiError> {
        self.record(call);
        match self.fail_with.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    pub fn set_request_status(&self, id: i64, status: RequestStatus) {
        for request in self.requests.lock().unwrap().iter_mut() {
            if request.id == id {
                request.status = status.clone();
            }
        }
    }
}

pub(crate) fn pending_request(id: i64, amount: i64, requester: i64) -> MoneyRequest {
    MoneyRequest {
        id,
        amount: Decimal::from(amount),
        requested_at: NaiveDate::from_ymd_opt(2025, 4, 1).and_then(|d| d.and_hms_opt(9, 0, 0)),
        status: RequestStatus::Pending,
        requester: Some(requester),
    }
}

pub(crate) fn transaction(id: i64, amount: i64, day: u32, kind: TransactionType) -> Transaction {
    Transaction {
        id,
        amount: Decimal::from(amount),
        date: NaiveDate::from_ymd_opt(2025, 3, day)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .unwrap(),
        kind,
        sender: None,
        receiver: Some(100 + id),
    }
}

pub(crate) fn session(user_id: i64) -> AuthSession {
    AuthSession::new("fake-token".to_string(), user_id)
}

#[async_trait]
impl BankBackend for FakeBank {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.record(format!("login {}", credentials.username));
        if credentials.password == "wrong" {
            return Err(ApiError::Forbidden("Invalid credentials".to_string()));
        }
        Ok(LoginResponse {
            token: self.token.clone(),
            user_id: self.user_id,
        })
    }

    async fn register(&self, new_user: &NewUser) -> Result<(), ApiError> {
        self.mutation(format!("register {} {}", new_user.username, new_user.role))
    }

    async fn get_user(&self, _token: &str, user_id: i64) -> Result<User, ApiError> {
        self.record(format!("get_user {}", user_id));
        self.users
            .iter()
            .find(|user| user.id == user_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(String::new()))
    }

    async fn list_users(&self, _token: &str) -> Result<Vec<User>, ApiError> {
        self.record("list_users".to_string());
        match &self.list_users_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.users.clone()),
        }
    }

    async fn get_account(&self, _token: &str, user_id: i64) -> Result<Account, ApiError> {
        self.record(format!("get_account {}", user_id));
        self.account
            .clone()
            .ok_or_else(|| ApiError::NotFound(String::new()))
    }

    async fn deposit(&self, _token: &str, user_id: i64, amount: Decimal) -> Result<(), ApiError> {
        self.mutation(format!("deposit {} {}", user_id, amount))
    }

    async fn withdraw(&self, _token: &str, user_id: i64, amount: Decimal) -> Result<(), ApiError> {
        self.mutation(format!("withdraw {} {}", user_id, amount))
    }

    async fn transfer(
        &self,
        _token: &str,
        sender_id: i64,
        receiver_account_id: i64,
        amount: Decimal,
    ) -> Result<(), ApiError> {
        self.mutation(format!("transfer {} {} {}", sender_id, receiver_account_id, amount))
    }

    async fn list_transactions(
        &self,
        _token: &str,
        user_id: i64,
    ) -> Result<Vec<Transaction>, ApiError> {
        self.record(format!("list_transactions {}", user_id));
        Ok(self.transactions.lock().unwrap().clone())
    }

    async fn list_requests(
        &self,
        _token: &str,
        _account_id: i64,
    ) -> Result<Vec<MoneyRequest>, ApiError> {
        self.request_polls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.request_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.requests.lock().unwrap().clone())
    }

    async fn create_request(
        &self,
        _token: &str,
        requester_account_id: i64,
        receiver_account_id: i64,
        amount: Decimal,
    ) -> Result<(), ApiError> {
        self.mutation(format!(
            "create_request {} {} {}",
            requester_account_id, receiver_account_id, amount
        ))
    }

    async fn update_request(
        &self,
        _token: &str,
        request_id: i64,
        action: RequestAction,
    ) -> Result<(), ApiError> {
        self.mutation(format!("update_request {} {}", request_id, action))
    }
}
