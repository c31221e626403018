use super::{parse_page, transactions, Shell};
use crate::listing::{AccountSort, Category, SortDirection};
use crate::models::Role;
use crate::services::account_list_service;
use crate::utils::errors::ServiceError;

const USAGE: &str = "`accounts`, `accounts search <text>`, `accounts role <ADMIN|USER|all>`, \
                     `accounts sort <balance|date> [asc|desc]`, `accounts flip`, `accounts next`, \
                     `accounts prev`, `accounts page <n>` or `accounts open <user id>`";

pub async fn execute(shell: &mut Shell, args: &[&str]) -> Result<String, ServiceError> {
    let auth = shell.session.require()?;
    if !auth.is_admin() {
        return Err(ServiceError::AccessDenied);
    }

    match args {
        [] | ["refresh"] => return show(shell).await,
        ["search", words @ ..] => shell.accounts.set_search(&words.join(" ")),
        ["role", role] => {
            let role = Category::<Role>::parse(role).map_err(ServiceError::Validation)?;
            shell.accounts.set_role(role);
        }
        ["sort", field, rest @ ..] => {
            let key: AccountSort = field.parse().map_err(ServiceError::Validation)?;
            let direction = match rest {
                [] => None,
                [direction] => Some(
                    direction
                        .parse::<SortDirection>()
                        .map_err(ServiceError::Validation)?,
                ),
                _ => return Err(usage()),
            };
            shell.accounts.sort_by(key, direction);
        }
        ["flip"] => {
            shell.accounts.toggle_direction();
        }
        ["next"] => {
            shell.accounts.next();
        }
        ["prev"] | ["previous"] => {
            shell.accounts.previous();
        }
        ["page", rest @ ..] => {
            shell.accounts.go_to(parse_page(rest, "`accounts page <n>`")?);
        }
        ["open", user_id] => {
            let user_id: i64 = user_id
                .parse()
                .map_err(|_| ServiceError::validation("Please enter a valid user ID"))?;
            let auth = shell.session.require_mut()?;
            shell.accounts.open(auth, user_id)?;
            return transactions::show(shell).await;
        }
        _ => return Err(usage()),
    }

    Ok(shell.accounts.render())
}

fn usage() -> ServiceError {
    ServiceError::validation(format!("Usage: {}", USAGE))
}

/// Fetch every user and render the first view of the list
pub async fn show(shell: &mut Shell) -> Result<String, ServiceError> {
    let auth = shell.session.require()?;
    let users = account_list_service::fetch_accounts(shell.backend.as_ref(), auth).await?;
    shell.accounts.replace_records(users);
    Ok(shell.accounts.render())
}
