pub mod account_list_service;
pub mod account_service;
pub mod auth_service;
pub mod request_poller;
pub mod request_service;
pub mod transaction_service;

#[cfg(test)]
pub(crate) mod testing;
