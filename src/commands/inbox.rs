use super::Shell;
use crate::services::request_service;
use crate::utils::errors::ServiceError;
use crate::utils::money::format_money;
use crate::utils::table::Table;

pub async fn list(shell: &mut Shell) -> Result<String, ServiceError> {
    shell.session.require()?;
    let inbox = shell.inbox.lock().await;

    if inbox.pending().is_empty() {
        return Ok("📬 No pending money requests".to_string());
    }

    let mut table = Table::new(&["ID", "From account", "Amount", "Requested"]);
    for request in inbox.pending() {
        table.add_row(vec![
            request.id.to_string(),
            request
                .requester
                .map_or_else(|| "-".to_string(), |id| id.to_string()),
            format_money(request.amount),
            request
                .requested_at
                .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d %H:%M").to_string()),
        ]);
    }

    Ok(format!(
        "📬 Pending money requests\n\n{}\n`accept <id>` to pay, `cancel <id>` to decline",
        table.render()
    ))
}

/// Opens the confirmation step; nothing reaches the bank until `confirm`
pub async fn accept(shell: &mut Shell, args: &[&str]) -> Result<String, ServiceError> {
    shell.session.require()?;
    let id = parse_id(args, "accept")?;

    let prompt = {
        let mut inbox = shell.inbox.lock().await;
        let request = inbox.begin_accept(id)?;
        let from = request
            .requester
            .map_or_else(|| "an unknown account".to_string(), |a| format!("account {}", a));
        format!(
            "⚠️ Pay {} to {} for request #{}?\nType `confirm` to proceed or `dismiss` to cancel.",
            format_money(request.amount),
            from,
            request.id
        )
    };
    shell.pending = None;
    Ok(prompt)
}

pub async fn cancel(shell: &mut Shell, args: &[&str]) -> Result<String, ServiceError> {
    let auth = shell.session.require()?;
    let id = parse_id(args, "cancel")?;

    let request =
        request_service::cancel_request(shell.backend.as_ref(), auth, &shell.inbox, id).await?;
    Ok(format!("🚫 Declined request #{}", request.id))
}

fn parse_id(args: &[&str], command: &str) -> Result<i64, ServiceError> {
    match args {
        [raw] => raw
            .parse()
            .map_err(|_| ServiceError::validation("Please enter a valid request ID")),
        _ => Err(ServiceError::validation(format!("Usage: `{} <request id>`", command))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{output, shell_with};
    use crate::services::testing::{pending_request, session, FakeBank};
    use crate::session::Session;

    #[tokio::test]
    async fn test_list_accept_and_cancel() {
        let (mut shell, bank) = shell_with(FakeBank::default());
        shell.session = Session::Authenticated(session(3));
        assert!(output(&mut shell, "requests").await.contains("No pending"));

        shell
            .inbox
            .lock()
            .await
            .apply_poll(vec![pending_request(9, 25, 5), pending_request(10, 3, 6)]);
        let text = output(&mut shell, "inbox").await;
        assert!(text.contains("$25.00"));

        let text = output(&mut shell, "accept 9").await;
        assert!(text.contains("Pay $25.00 to account 5"));
        assert!(bank.calls().is_empty());

        let text = output(&mut shell, "cancel 10").await;
        assert!(text.contains("Declined request #10"));
        assert_eq!(bank.calls(), vec!["update_request 10 cancel"]);
        assert_eq!(shell.inbox.lock().await.pending().len(), 1);
    }

    #[tokio::test]
    async fn test_accept_unknown_id() {
        let (mut shell, _) = shell_with(FakeBank::default());
        shell.session = Session::Authenticated(session(3));
        assert!(output(&mut shell, "accept 77").await.contains("No pending money request"));
        assert!(output(&mut shell, "accept x").await.contains("valid request ID"));
    }
}
