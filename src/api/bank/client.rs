use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::models::{ApiError, ErrorResponse};
use super::BankBackend;
use crate::models::{
    Account, Credentials, LoginResponse, MoneyRequest, NewUser, RequestAction, Transaction, User,
};

/// HTTP client for the EscoBANKS backend
#[derive(Clone)]
pub struct BankClient {
    http_client: HttpClient,
    base_url: String,
}

impl BankClient {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8080";

    /// Create a client for the backend at `base_url` (no trailing slash needed)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// JSON headers, plus the bearer token for `/api/*` calls
    fn create_headers(token: Option<&str>) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = token {
            let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::RequestError(format!("Failed to create auth header: {}", e)))?;
            headers.insert(AUTHORIZATION, auth_value);
        }

        Ok(headers)
    }

    /// Turn a non-2xx response into the matching error
    async fn handle_error_response(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let body_text = response.text().await.unwrap_or_default();
        let message = ErrorResponse::extract_message(&body_text);

        if status >= 500 {
            warn!("Server error {}: {}", status, message);
        } else {
            warn!("Request rejected with {}: {}", status, message);
        }

        ApiError::from_status(status, message)
    }

    /// Attach headers, send, and reject non-2xx answers
    async fn execute(&self, request: RequestBuilder, token: Option<&str>) -> Result<Response, ApiError> {
        let headers = Self::create_headers(token)?;

        let response = request
            .headers(headers)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl BankBackend for BankClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let url = self.url("/auth/login");
        debug!("POST {}", url);

        let response = self
            .execute(self.http_client.post(&url).json(credentials), None)
            .await?;
        Self::read_json(response).await
    }

    async fn register(&self, new_user: &NewUser) -> Result<(), ApiError> {
        let url = self.url("/auth/register");
        debug!("POST {}", url);

        self.execute(self.http_client.post(&url).json(new_user), None)
            .await?;
        Ok(())
    }

    async fn get_user(&self, token: &str, user_id: i64) -> Result<User, ApiError> {
        let url = self.url(&format!("/api/users/{}", user_id));
        debug!("GET {}", url);

        let response = self.execute(self.http_client.get(&url), Some(token)).await?;
        Self::read_json(response).await
    }

    async fn list_users(&self, token: &str) -> Result<Vec<User>, ApiError> {
        let url = self.url("/api/users");
        debug!("GET {}", url);

        let response = self.execute(self.http_client.get(&url), Some(token)).await?;
        Self::read_json(response).await
    }

    async fn get_account(&self, token: &str, user_id: i64) -> Result<Account, ApiError> {
        let url = self.url(&format!("/api/accounts/user/{}", user_id));
        debug!("GET {}", url);

        let response = self.execute(self.http_client.get(&url), Some(token)).await?;
        Self::read_json(response).await
    }

    async fn deposit(&self, token: &str, user_id: i64, amount: Decimal) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/accounts/deposit/{}", user_id));
        debug!("PUT {} amount={}", url, amount);

        let request = self
            .http_client
            .put(&url)
            .query(&[("amount", amount.to_string())]);
        self.execute(request, Some(token)).await?;
        Ok(())
    }

    async fn withdraw(&self, token: &str, user_id: i64, amount: Decimal) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/accounts/withdraw/{}", user_id));
        debug!("PUT {} amount={}", url, amount);

        let request = self
            .http_client
            .put(&url)
            .query(&[("amount", amount.to_string())]);
        self.execute(request, Some(token)).await?;
        Ok(())
    }

    async fn transfer(
        &self,
        token: &str,
        sender_id: i64,
        receiver_account_id: i64,
        amount: Decimal,
    ) -> Result<(), ApiError> {
        let url = self.url("/api/transactions/transfer");
        debug!(
            "POST {} sender={} receiver={} amount={}",
            url, sender_id, receiver_account_id, amount
        );

        let request = self.http_client.post(&url).query(&[
            ("senderId", sender_id.to_string()),
            ("receiverAccountId", receiver_account_id.to_string()),
            ("amount", amount.to_string()),
        ]);
        self.execute(request, Some(token)).await?;
        Ok(())
    }

    async fn list_transactions(
        &self,
        token: &str,
        user_id: i64,
    ) -> Result<Vec<Transaction>, ApiError> {
        let url = self.url(&format!("/api/transactions/user/{}", user_id));
        debug!("GET {}", url);

        let response = self.execute(self.http_client.get(&url), Some(token)).await?;
        Self::read_json(response).await
    }

    async fn list_requests(
        &self,
        token: &str,
        account_id: i64,
    ) -> Result<Vec<MoneyRequest>, ApiError> {
        let url = self.url(&format!("/api/requests/receiver/{}", account_id));
        debug!("GET {}", url);

        let response = self.execute(self.http_client.get(&url), Some(token)).await?;
        Self::read_json(response).await
    }

    async fn create_request(
        &self,
        token: &str,
        requester_account_id: i64,
        receiver_account_id: i64,
        amount: Decimal,
    ) -> Result<(), ApiError> {
        let url = self.url("/api/requests/create");
        debug!(
            "POST {} requester={} receiver={} amount={}",
            url, requester_account_id, receiver_account_id, amount
        );

        let request = self.http_client.post(&url).query(&[
            ("requesterAccId", requester_account_id.to_string()),
            ("receiverAccId", receiver_account_id.to_string()),
            ("amount", amount.to_string()),
        ]);
        self.execute(request, Some(token)).await?;
        Ok(())
    }

    async fn update_request(
        &self,
        token: &str,
        request_id: i64,
        action: RequestAction,
    ) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/requests/update/{}", request_id));
        debug!("PUT {} statusRequest={}", url, action);

        let request = self
            .http_client
            .put(&url)
            .query(&[("statusRequest", action.as_query_value())]);
        self.execute(request, Some(token)).await?;
        Ok(())
    }
}
