use chrono::{NaiveDate, Utc};
use tracing::{error, info};

use crate::api::bank::BankBackend;
use crate::models::{Credentials, NewUser, Role};
use crate::session::AuthSession;
use crate::utils::errors::ServiceError;

/// Where a freshly logged-in user lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    Dashboard,
    AccountList,
}

pub fn landing_for(auth: &AuthSession) -> Landing {
    if auth.is_admin() {
        Landing::AccountList
    } else {
        Landing::Dashboard
    }
}

pub async fn log_in(
    backend: &dyn BankBackend,
    username: &str,
    password: &str,
) -> Result<AuthSession, ServiceError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(ServiceError::validation(
            "Please enter your username and password",
        ));
    }

    let credentials = Credentials {
        username: username.trim().to_string(),
        password: password.to_string(),
    };

    let response = backend.login(&credentials).await.map_err(|e| {
        error!("Login failed for {}: {}", credentials.username, e);
        ServiceError::api("Login failed", e)
    })?;

    let auth = AuthSession::new(response.token, response.user_id);
    info!(
        "Logged in as user {} (role: {})",
        auth.user_id,
        auth.role.map(|r| r.as_str()).unwrap_or("unknown")
    );
    Ok(auth)
}

/// Sign-up form as typed by the user
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub birthday: Option<String>,
    pub mobile: Option<String>,
}

impl RegistrationForm {
    /// Check the form and build the payload. Everything else is the backend's call.
    pub fn into_new_user(self) -> Result<NewUser, ServiceError> {
        if self.password != self.confirm_password {
            return Err(ServiceError::validation("Passwords do not match"));
        }

        let birthday = match self.birthday.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                ServiceError::validation("Birthday must look like YYYY-MM-DD")
            })?),
        };

        let mobile = match self.mobile.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<i64>()
                    .map_err(|_| ServiceError::validation("Mobile number must be digits only"))?,
            ),
        };

        Ok(NewUser {
            name: self.name,
            username: self.username,
            email: self.email,
            password: self.password,
            birthday,
            mobile,
            date_joined: Utc::now(),
            role: Role::User,
        })
    }
}

/// Create the account, then log straight in with the same credentials
pub async fn register(
    backend: &dyn BankBackend,
    form: RegistrationForm,
) -> Result<AuthSession, ServiceError> {
    let new_user = form.into_new_user()?;
    let (username, password) = (new_user.username.clone(), new_user.password.clone());

    backend.register(&new_user).await.map_err(|e| {
        error!("Registration failed for {}: {}", username, e);
        ServiceError::api("Registration failed", e)
    })?;
    info!("Registered new user {}", username);

    let credentials = Credentials { username, password };
    match backend.login(&credentials).await {
        Ok(response) => Ok(AuthSession::new(response.token, response.user_id)),
        Err(e) => {
            error!("Auto-login after registration failed: {}", e);
            Err(ServiceError::inline(
                "Registration succeeded, but auto-login failed. Please log in manually.",
                e,
            ))
        }
    }
}
