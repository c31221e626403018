use super::Shell;
use crate::services::request_service;
use crate::utils::errors::ServiceError;

pub async fn execute(shell: &mut Shell, args: &[&str]) -> Result<String, ServiceError> {
    let auth = shell.session.require()?;
    let [receiver, amount] = args else {
        return Err(ServiceError::validation("Usage: `request <account id> <amount>`"));
    };

    let message =
        request_service::create_request(shell.backend.as_ref(), auth, receiver, amount).await?;
    Ok(format!("📨 {}", message))
}
