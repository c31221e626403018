use super::{dashboard, Shell};
use crate::services::account_service;
use crate::utils::errors::ServiceError;

pub async fn execute(shell: &mut Shell) -> Result<String, ServiceError> {
    let auth = shell.session.require()?;
    let account = account_service::get_balance(shell.backend.as_ref(), auth).await?;
    shell.account = Some(account);
    Ok(dashboard::balance_line(shell))
}
