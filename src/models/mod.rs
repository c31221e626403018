//! Data models for the EscoBANKS client
//!
//! Canonical record shapes for everything the backend hands us. The backend is not
//! consistent about field names (`aId` vs `aid`, `tid` vs `tId`), so every model
//! accepts the known spellings and exposes exactly one.

pub mod account;
pub mod auth;
pub mod request;
pub mod transaction;
pub mod user;
pub mod wire;

// Re-export commonly used types for convenience
pub use account::Account;
pub use auth::{Credentials, LoginResponse, NewUser};
pub use request::{MoneyRequest, RequestAction};
pub use transaction::{Transaction, TransactionType};
pub use user::{Role, User};
