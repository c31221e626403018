pub mod accounts;
pub mod auth;
pub mod balance;
pub mod dashboard;
pub mod help;
pub mod inbox;
pub mod operations;
pub mod request;
pub mod transactions;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use crate::api::bank::BankBackend;
use crate::models::{Account, User};
use crate::services::account_list_service::AccountList;
use crate::services::account_service::PendingOperation;
use crate::services::request_poller::RequestPoller;
use crate::services::request_service::RequestInbox;
use crate::services::transaction_service::TransactionTable;
use crate::session::{AuthSession, Session, SessionStore};
use crate::utils::errors::ServiceError;

/// Everything the shell remembers between commands
pub struct Shell {
    pub backend: Arc<dyn BankBackend>,
    pub session: Session,
    pub inbox: Arc<Mutex<RequestInbox>>,
    /// Deposit, withdrawal or transfer waiting for `confirm`
    pub pending: Option<PendingOperation>,
    pub profile: Option<User>,
    pub account: Option<Account>,
    pub dashboard: TransactionTable,
    pub history: TransactionTable,
    pub accounts: AccountList,
    store: SessionStore,
    poller: Option<RequestPoller>,
    poll_interval: Duration,
    notices: mpsc::UnboundedSender<usize>,
}

impl Shell {
    /// The receiver yields the pending request count whenever new requests arrive
    pub fn new(
        backend: Arc<dyn BankBackend>,
        store: SessionStore,
        poll_interval: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<usize>) {
        let (notices, receiver) = mpsc::unbounded_channel();
        let shell = Shell {
            backend,
            session: Session::Anonymous,
            inbox: Arc::new(Mutex::new(RequestInbox::default())),
            pending: None,
            profile: None,
            account: None,
            dashboard: TransactionTable::dashboard(),
            history: TransactionTable::full(),
            accounts: AccountList::new(),
            store,
            poller: None,
            poll_interval,
            notices,
        };
        (shell, receiver)
    }

    /// Pick up a session saved by an earlier run
    pub fn resume(&mut self) -> Option<String> {
        match self.store.load() {
            Ok(Session::Authenticated(auth)) => {
                let user_id = auth.user_id;
                self.begin_session(auth);
                Some(format!(
                    "👋 Welcome back, user {}. Type `dashboard` to see your account.",
                    user_id
                ))
            }
            Ok(Session::Anonymous) => None,
            Err(e) => {
                warn!("Ignoring stored session: {}", e);
                None
            }
        }
    }

    /// Remember the session on disk and start watching for money requests
    pub fn begin_session(&mut self, auth: AuthSession) {
        match self.store.save(&auth) {
            Ok(()) => debug!("Session saved to {}", self.store.path().display()),
            Err(e) => warn!("Could not persist session: {}", e),
        }
        self.poller = Some(RequestPoller::spawn(
            self.backend.clone(),
            &auth,
            self.inbox.clone(),
            self.poll_interval,
            self.notices.clone(),
        ));
        self.session = Session::Authenticated(auth);
    }

    /// Stop polling and forget everything tied to the old user
    pub async fn end_session(&mut self) {
        self.shutdown().await;
        if let Err(e) = self.store.clear() {
            warn!("Could not remove session file: {}", e);
        }
        self.session = Session::Anonymous;
        self.inbox.lock().await.clear();
        self.pending = None;
        self.profile = None;
        self.account = None;
        self.dashboard = TransactionTable::dashboard();
        self.history = TransactionTable::full();
        self.accounts = AccountList::new();
    }

    pub async fn shutdown(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop().await;
        }
    }
}

pub enum Reply {
    Output(String),
    Quit,
}

/// Error banner, or the full status screen when the failure maps to one
pub fn render_error(error: &ServiceError) -> String {
    match error.error_page() {
        Some(page) => page.render(),
        None => format!("❌ {}", error),
    }
}

pub async fn handle_line(shell: &mut Shell, line: &str) -> Reply {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return Reply::Output(String::new());
    }

    let command = parts[0].to_lowercase();
    let args = &parts[1..];

    let result = match command.as_str() {
        "help" | "?" => Ok(help::execute()),
        "quit" | "exit" => return Reply::Quit,
        "login" => auth::login(shell, args).await,
        "register" | "signup" => auth::register(shell, args).await,
        "logout" => auth::logout(shell).await,
        "dashboard" | "dash" | "home" => dashboard::execute(shell, args).await,
        "balance" | "bal" => balance::execute(shell).await,
        "deposit" => operations::deposit(shell, args).await,
        "withdraw" => operations::withdraw(shell, args).await,
        "send" | "transfer" => operations::send(shell, args).await,
        "confirm" | "yes" => operations::confirm(shell).await,
        "dismiss" | "no" => operations::dismiss(shell).await,
        "request" => request::execute(shell, args).await,
        "transactions" | "tx" => transactions::execute(shell, args).await,
        "accounts" => accounts::execute(shell, args).await,
        "requests" | "inbox" => inbox::list(shell).await,
        "accept" => inbox::accept(shell, args).await,
        "cancel" => inbox::cancel(shell, args).await,
        other => Err(ServiceError::validation(format!(
            "Unknown command `{}`. Type `help` for the list of commands",
            other
        ))),
    };

    match result {
        Ok(output) => Reply::Output(output),
        Err(e) => {
            info!("Command {} failed: {}", command, e);
            Reply::Output(render_error(&e))
        }
    }
}

/// Parse a 1-based page number argument
pub(crate) fn parse_page(args: &[&str], usage: &str) -> Result<usize, ServiceError> {
    args.first()
        .and_then(|raw| raw.parse::<usize>().ok())
        .ok_or_else(|| ServiceError::validation(format!("Usage: {}", usage)))
}
