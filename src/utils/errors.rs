use thiserror::Error;

use crate::api::bank::ApiError;
use crate::session::SessionError;

/// Errors surfaced by services to the shell
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Bad user input, caught before any backend call
    #[error("{0}")]
    Validation(String),
    #[error("You are not logged in. Use `login <username> <password>`")]
    NotAuthenticated,
    /// Client-side role gate
    #[error("Access Denied: You do not have permission to view this page.")]
    AccessDenied,
    /// Rejected login, registration or money movement; may take over the screen
    #[error("{message}")]
    Api { message: String, source: ApiError },
    /// Failed read shown in the inline banner, never as a status screen
    #[error("{message}")]
    Inline { message: String, source: ApiError },
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    /// Wrap a backend failure; the server's own message wins over `fallback`
    pub fn api(fallback: &str, source: ApiError) -> Self {
        let message = source
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string());
        ServiceError::Api { message, source }
    }

    /// Banner-only failure with a fixed message
    pub fn inline(message: &str, source: ApiError) -> Self {
        ServiceError::Inline {
            message: message.to_string(),
            source,
        }
    }

    /// Status screen to show instead of the inline banner, if any
    pub fn error_page(&self) -> Option<ErrorPage> {
        match self {
            ServiceError::AccessDenied => Some(ErrorPage::AccessDenied),
            ServiceError::Api { source, .. } => source.status().and_then(ErrorPage::for_status),
            _ => None,
        }
    }
}

/// Themed full-screen status pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPage {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    RequestTimeout,
    TooManyRequests,
    AccessDenied,
}

impl ErrorPage {
    pub fn for_status(status: u16) -> Option<Self> {
        match status {
            400 => Some(ErrorPage::BadRequest),
            401 => Some(ErrorPage::Unauthorized),
            403 => Some(ErrorPage::Forbidden),
            404 => Some(ErrorPage::NotFound),
            405 => Some(ErrorPage::MethodNotAllowed),
            408 => Some(ErrorPage::RequestTimeout),
            429 => Some(ErrorPage::TooManyRequests),
            _ => None,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            ErrorPage::BadRequest => "400",
            ErrorPage::Unauthorized => "401",
            ErrorPage::Forbidden => "403",
            ErrorPage::NotFound => "404",
            ErrorPage::MethodNotAllowed => "405",
            ErrorPage::RequestTimeout => "408",
            ErrorPage::TooManyRequests => "429",
            ErrorPage::AccessDenied => "Access Denied",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorPage::BadRequest => "🍻 Boss, those details look off. Check them and try again.",
            ErrorPage::Unauthorized => "🏬 Not allowed. Please log in again, sir.",
            ErrorPage::Forbidden => "🏬 That door is closed to you.",
            ErrorPage::NotFound => "🔍 Nothing here.",
            ErrorPage::MethodNotAllowed => "🚫 The bank does not do that.",
            ErrorPage::RequestTimeout => "⌛ The bank took too long to answer.",
            ErrorPage::TooManyRequests => "😅 Easy there! One at a time.",
            ErrorPage::AccessDenied => "You do not have permission to view this page.",
        }
    }

    pub fn render(&self) -> String {
        format!("\n  {}\n\n  {}\n\n  (type `home` to go back)\n", self.heading(), self.message())
    }
}
