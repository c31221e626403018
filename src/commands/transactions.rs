use chrono::NaiveDate;

use super::{parse_page, Shell};
use crate::listing::{Category, SortDirection, TransactionSort};
use crate::models::TransactionType;
use crate::services::transaction_service;
use crate::utils::errors::ServiceError;

const USAGE: &str = "`tx`, `tx type <kind|all>`, `tx from <date>`, `tx to <date>`, `tx clear`, \
                     `tx mine`, `tx sort <field> [asc|desc]`, `tx next`, `tx prev` or `tx page <n>`";

pub async fn execute(shell: &mut Shell, args: &[&str]) -> Result<String, ServiceError> {
    shell.session.require()?;

    match args {
        [] | ["refresh"] => return show(shell).await,
        ["mine"] => {
            shell.session.require_mut()?.selected_user = None;
            return show(shell).await;
        }
        ["type", kind] => {
            let category =
                Category::<TransactionType>::parse(kind).map_err(ServiceError::Validation)?;
            shell.history.set_type(category);
        }
        ["from", day] => shell.history.set_start(parse_day(day)?),
        ["to", day] => shell.history.set_end(parse_day(day)?),
        ["clear"] => shell.history.clear_filters(),
        ["sort", field, rest @ ..] => {
            let key: TransactionSort = field.parse().map_err(ServiceError::Validation)?;
            let direction = match rest {
                [] => None,
                [direction] => Some(
                    direction
                        .parse::<SortDirection>()
                        .map_err(ServiceError::Validation)?,
                ),
                _ => return Err(usage()),
            };
            shell.history.sort_by(key, direction);
        }
        ["next"] => {
            shell.history.next();
        }
        ["prev"] | ["previous"] => {
            shell.history.previous();
        }
        ["page", rest @ ..] => {
            shell.history.go_to(parse_page(rest, "`tx page <n>`")?);
        }
        _ => return Err(usage()),
    }

    Ok(render(shell))
}

fn usage() -> ServiceError {
    ServiceError::validation(format!("Usage: {}", USAGE))
}

/// `-` or `any` clears the bound
fn parse_day(raw: &str) -> Result<Option<NaiveDate>, ServiceError> {
    if raw == "-" || raw.eq_ignore_ascii_case("any") {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ServiceError::validation(format!("`{}` is not a date. Use YYYY-MM-DD", raw)))
}

/// Fetch the viewed user's transactions and render the table
pub async fn show(shell: &mut Shell) -> Result<String, ServiceError> {
    let auth = shell.session.require()?;
    let transactions =
        transaction_service::fetch_transactions(shell.backend.as_ref(), auth, auth.viewed_user())
            .await?;
    shell.history.replace_records(transactions);
    Ok(render(shell))
}

fn render(shell: &Shell) -> String {
    let title = match shell.session.auth().and_then(|auth| auth.selected_user) {
        Some(user_id) => format!("Transactions of user {}", user_id),
        None => "Transaction History".to_string(),
    };
    shell.history.render(&title)
}
