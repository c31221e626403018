//! Admin view over every user account

use tracing::{error, info, warn};

use crate::api::bank::{ApiError, BankBackend};
use crate::listing::{self, AccountSort, Category, PageView, QueryFor, SortDirection, ACCOUNTS_PER_PAGE};
use crate::models::{Role, User};
use crate::session::AuthSession;
use crate::utils::errors::ServiceError;
use crate::utils::money::format_money;
use crate::utils::page::Pager;
use crate::utils::table::Table;

/// Role gate first: a non-admin never reaches the backend
pub async fn fetch_accounts(
    backend: &dyn BankBackend,
    auth: &AuthSession,
) -> Result<Vec<User>, ServiceError> {
    if !auth.is_admin() {
        warn!("User {} tried to open the account list", auth.user_id);
        return Err(ServiceError::AccessDenied);
    }

    backend.list_users(&auth.token).await.map_err(|e| {
        error!("Error fetching users: {}", e);
        let message = match e {
            ApiError::Forbidden(_) => "Forbidden: You don't have permission.",
            _ => "Failed to fetch users.",
        };
        ServiceError::inline(message, e)
    })
}

#[derive(Debug, Clone)]
pub struct AccountList {
    records: Vec<User>,
    query: QueryFor<User>,
    pager: Pager,
}

impl Default for AccountList {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountList {
    pub fn new() -> Self {
        AccountList {
            records: Vec::new(),
            query: QueryFor::<User>::new(AccountSort::Balance, SortDirection::Descending),
            pager: Pager::new(),
        }
    }

    pub fn replace_records(&mut self, records: Vec<User>) {
        self.records = records;
        self.sync_pages();
    }

    pub fn set_search(&mut self, search: &str) {
        self.query.search = search.trim().to_string();
        self.sync_pages();
    }

    pub fn set_role(&mut self, role: Category<Role>) {
        self.query.category = role;
        self.sync_pages();
    }

    /// Field and direction are chosen independently here
    pub fn sort_by(&mut self, key: AccountSort, direction: Option<SortDirection>) {
        self.query.sort = key;
        if let Some(direction) = direction {
            self.query.direction = direction;
        }
    }

    pub fn toggle_direction(&mut self) -> SortDirection {
        self.query.direction = self.query.direction.toggle();
        self.query.direction
    }

    pub fn next(&mut self) -> bool {
        self.pager.next()
    }

    pub fn previous(&mut self) -> bool {
        self.pager.previous()
    }

    pub fn go_to(&mut self, page: usize) -> usize {
        self.pager.go_to(page)
    }

    fn sync_pages(&mut self) {
        let matches = listing::filter(&self.records, &self.query).len();
        self.pager
            .set_total_pages(listing::total_pages(matches, ACCOUNTS_PER_PAGE));
    }

    pub fn view(&self) -> PageView<'_, User> {
        listing::present(
            &self.records,
            &self.query,
            self.pager.current_page(),
            ACCOUNTS_PER_PAGE,
        )
    }

    /// Select a loaded user for the transaction view
    pub fn open(&self, auth: &mut AuthSession, user_id: i64) -> Result<(), ServiceError> {
        let user = self
            .records
            .iter()
            .find(|user| user.id == user_id)
            .ok_or_else(|| {
                ServiceError::validation(format!("No user with id {} in the account list", user_id))
            })?;
        info!("Admin {} opened transactions of user {}", auth.user_id, user.id);
        auth.selected_user = Some(user.id);
        Ok(())
    }

    pub fn render(&self) -> String {
        let view = self.view();
        let sort = match self.query.sort {
            AccountSort::Balance => "balance",
            AccountSort::DateCreated => "date created",
        };
        let role = match self.query.category {
            Category::All => "All".to_string(),
            Category::Only(role) => role.to_string(),
        };
        let search = if self.query.search.is_empty() {
            String::new()
        } else {
            format!(", matching \"{}\"", self.query.search)
        };

        let mut output = format!(
            "🏦 Accounts\nRole: {}{} | Sorted by {} ({})\n\n",
            role,
            search,
            sort,
            self.query.direction.label()
        );

        if view.is_empty() {
            output.push_str("No accounts match your filters\n");
        } else {
            let mut table = Table::new(&[
                "UID",
                "AID",
                "Name",
                "Username",
                "Email",
                "Mobile",
                "Balance",
                "Date Created",
            ]);
            for user in &view.items {
                let account = user.account.as_ref();
                table.add_row(vec![
                    user.id.to_string(),
                    account.map_or("N/A".to_string(), |a| a.id.to_string()),
                    user.name.clone(),
                    user.username.clone(),
                    user.email.clone(),
                    user.mobile.clone().unwrap_or_else(|| "-".to_string()),
                    account.map_or("N/A".to_string(), |a| format_money(a.balance)),
                    user.account_created_at()
                        .map_or("N/A".to_string(), |d| d.format("%Y-%m-%d").to_string()),
                ]);
            }
            output.push_str(&table.render());
        }

        output.push('\n');
        output.push_str(&view.footer("accounts"));
        output
    }
}
