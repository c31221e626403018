use tracing::info;

use super::{accounts, dashboard, render_error, Shell};
use crate::services::auth_service::{self, Landing, RegistrationForm};
use crate::session::AuthSession;
use crate::utils::errors::ServiceError;

pub async fn login(shell: &mut Shell, args: &[&str]) -> Result<String, ServiceError> {
    let [username, password] = args else {
        return Err(ServiceError::validation(
            "Usage: `login <username> <password>`",
        ));
    };

    let auth = auth_service::log_in(shell.backend.as_ref(), username, password).await?;
    start(shell, auth, "✅ Logged in").await
}

pub async fn register(shell: &mut Shell, args: &[&str]) -> Result<String, ServiceError> {
    if args.len() < 5 || args.len() > 7 {
        return Err(ServiceError::validation(
            "Usage: `register <name> <username> <email> <password> <confirm password> [birthday YYYY-MM-DD] [mobile]`\n\
             Use `_` for spaces in your name, e.g. `Ana_Cruz`",
        ));
    }

    let form = RegistrationForm {
        name: args[0].replace('_', " "),
        username: args[1].to_string(),
        email: args[2].to_string(),
        password: args[3].to_string(),
        confirm_password: args[4].to_string(),
        birthday: args.get(5).map(|s| s.to_string()),
        mobile: args.get(6).map(|s| s.to_string()),
    };

    let auth = auth_service::register(shell.backend.as_ref(), form).await?;
    start(shell, auth, "🎉 Account created").await
}

pub async fn logout(shell: &mut Shell) -> Result<String, ServiceError> {
    if !shell.session.is_authenticated() {
        return Ok("You are not logged in".to_string());
    }
    shell.end_session().await;
    info!("Logged out");
    Ok("👋 Logged out".to_string())
}

/// Replace any previous session, then show the landing view
async fn start(shell: &mut Shell, auth: AuthSession, greeting: &str) -> Result<String, ServiceError> {
    if shell.session.is_authenticated() {
        shell.end_session().await;
    }

    let landing = auth_service::landing_for(&auth);
    let user_id = auth.user_id;
    shell.begin_session(auth);

    let view = match landing {
        Landing::AccountList => accounts::show(shell).await,
        Landing::Dashboard => dashboard::show(shell).await,
    };
    let view = view.unwrap_or_else(|e| render_error(&e));

    Ok(format!("{} as user {}\n\n{}", greeting, user_id, view))
}
