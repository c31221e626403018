use tracing::debug;

use super::Shell;
use crate::listing::TransactionSort;
use crate::services::{account_service, transaction_service};
use crate::utils::errors::ServiceError;
use crate::utils::money::format_money;

pub async fn execute(shell: &mut Shell, args: &[&str]) -> Result<String, ServiceError> {
    shell.session.require()?;

    match args {
        [] | ["refresh"] => show(shell).await,
        ["sort", field] => {
            let key: TransactionSort = field.parse().map_err(ServiceError::Validation)?;
            shell.dashboard.sort_by(key, None);
            Ok(render(shell))
        }
        ["next"] => {
            shell.dashboard.next();
            Ok(render(shell))
        }
        ["prev"] | ["previous"] => {
            shell.dashboard.previous();
            Ok(render(shell))
        }
        _ => Err(ServiceError::validation(
            "Usage: `dash`, `dash sort <date|type|receiver|amount>`, `dash next` or `dash prev`",
        )),
    }
}

/// Fetch profile, balance and recent transactions, then render
pub async fn show(shell: &mut Shell) -> Result<String, ServiceError> {
    let auth = shell.session.require()?;
    let backend = shell.backend.as_ref();

    let (profile, account, transactions) = tokio::join!(
        account_service::get_profile(backend, auth),
        account_service::get_balance(backend, auth),
        transaction_service::fetch_transactions(backend, auth, auth.user_id),
    );

    // A missing profile breaks the page; the other two just leave stale data
    shell.profile = Some(profile?);
    if let Ok(account) = account {
        shell.account = Some(account);
    }
    if let Ok(transactions) = transactions {
        shell.dashboard.replace_records(transactions);
    }

    Ok(render(shell))
}

/// Refetch after a successful money movement. Failures are only logged.
pub(crate) async fn refresh_account(shell: &mut Shell) {
    let Ok(auth) = shell.session.require() else {
        return;
    };
    let backend = shell.backend.as_ref();

    let (account, transactions) = tokio::join!(
        account_service::get_balance(backend, auth),
        transaction_service::fetch_transactions(backend, auth, auth.user_id),
    );

    let viewing_own = auth.selected_user.is_none();
    if let Ok(account) = account {
        shell.account = Some(account);
    }
    if let Ok(transactions) = transactions {
        if viewing_own {
            shell.history.replace_records(transactions.clone());
        }
        shell.dashboard.replace_records(transactions);
    }
    debug!("Account refreshed after update");
}

pub(crate) fn balance_line(shell: &Shell) -> String {
    match &shell.account {
        Some(account) => format!(
            "💰 Balance: {} (account {})",
            format_money(account.balance),
            account.id
        ),
        None => "💰 Balance: unavailable".to_string(),
    }
}

fn render(shell: &Shell) -> String {
    let greeting = match &shell.profile {
        Some(user) => format!("👤 {} (@{}) · {}", user.name, user.username, user.role),
        None => "👤 Dashboard".to_string(),
    };

    format!(
        "{}\n{}\n\n{}",
        greeting,
        balance_line(shell),
        shell.dashboard.render("Recent transactions")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{output, shell_with};
    use crate::models::{Account, Role, TransactionType, User};
    use crate::services::testing::{session, transaction, FakeBank};
    use rust_decimal::Decimal;

    fn bank() -> FakeBank {
        FakeBank {
            users: vec![User {
                id: 3,
                name: "Ana Cruz".into(),
                username: "ana".into(),
                email: "ana@example.com".into(),
                mobile: None,
                role: Role::User,
                account: None,
            }],
            account: Some(Account {
                id: 3,
                balance: Decimal::new(125050, 2),
                created_at: None,
            }),
            transactions: std::sync::Mutex::new(
                (1..=7)
                    .map(|i| transaction(i, i * 10, i as u32, TransactionType::Deposit))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_dashboard_shows_profile_balance_and_first_page() {
        let (mut shell, _) = shell_with(bank());
        shell.session = crate::session::Session::Authenticated(session(3));

        let text = output(&mut shell, "dash").await;
        assert!(text.contains("Ana Cruz (@ana)"));
        assert!(text.contains("$1250.50"));
        assert!(text.contains("Page 1 of 2 (7 transactions)"));

        let text = output(&mut shell, "dash next").await;
        assert!(text.contains("Page 2 of 2"));
    }

    #[tokio::test]
    async fn test_dashboard_sort_toggles_column() {
        let (mut shell, _) = shell_with(bank());
        shell.session = crate::session::Session::Authenticated(session(3));
        output(&mut shell, "dash").await;

        let text = output(&mut shell, "dash sort amount").await;
        assert!(text.contains("Amount ▲"));
        let text = output(&mut shell, "dash sort amount").await;
        assert!(text.contains("Amount ▼"));
    }
}
