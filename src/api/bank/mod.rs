pub mod client;
pub mod models;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::models::{
    Account, Credentials, LoginResponse, MoneyRequest, NewUser, RequestAction, Transaction, User,
};

pub use client::BankClient;
pub use models::ApiError;

/// Every backend call the client makes
///
/// `/api/*` calls take the bearer token explicitly; `/auth/*` calls never carry one.
#[async_trait]
pub trait BankBackend: Send + Sync {
    /// POST /auth/login
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;

    /// POST /auth/register
    async fn register(&self, new_user: &NewUser) -> Result<(), ApiError>;

    /// GET /api/users/{id}
    async fn get_user(&self, token: &str, user_id: i64) -> Result<User, ApiError>;

    /// GET /api/users (admin only)
    async fn list_users(&self, token: &str) -> Result<Vec<User>, ApiError>;

    /// GET /api/accounts/user/{userId}
    async fn get_account(&self, token: &str, user_id: i64) -> Result<Account, ApiError>;

    /// PUT /api/accounts/deposit/{userId}?amount=
    async fn deposit(&self, token: &str, user_id: i64, amount: Decimal) -> Result<(), ApiError>;

    /// PUT /api/accounts/withdraw/{userId}?amount=
    async fn withdraw(&self, token: &str, user_id: i64, amount: Decimal) -> Result<(), ApiError>;

    /// POST /api/transactions/transfer?senderId=&receiverAccountId=&amount=
    async fn transfer(
        &self,
        token: &str,
        sender_id: i64,
        receiver_account_id: i64,
        amount: Decimal,
    ) -> Result<(), ApiError>;

    /// GET /api/transactions/user/{userId}
    async fn list_transactions(&self, token: &str, user_id: i64)
        -> Result<Vec<Transaction>, ApiError>;

    /// GET /api/requests/receiver/{accountId}
    async fn list_requests(&self, token: &str, account_id: i64)
        -> Result<Vec<MoneyRequest>, ApiError>;

    /// POST /api/requests/create?requesterAccId=&receiverAccId=&amount=
    async fn create_request(
        &self,
        token: &str,
        requester_account_id: i64,
        receiver_account_id: i64,
        amount: Decimal,
    ) -> Result<(), ApiError>;

    /// PUT /api/requests/update/{id}?statusRequest=
    async fn update_request(
        &self,
        token: &str,
        request_id: i64,
        action: RequestAction,
    ) -> Result<(), ApiError>;
}
