//! Background refresh of the money request inbox
//!
//! Fetches immediately, then once per interval, for as long as the session
//! lasts. No backoff: a failed fetch is logged and the next tick tries again.
//! Stopping the poller also drops a fetch that is still in flight, so a late
//! response can never land in the inbox after logout.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::api::bank::BankBackend;
use crate::services::request_service::RequestInbox;
use crate::session::AuthSession;

pub struct RequestPoller {
    shutdown: broadcast::Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl RequestPoller {
    /// `notices` receives the pending count whenever it grows
    pub fn spawn(
        backend: Arc<dyn BankBackend>,
        auth: &AuthSession,
        inbox: Arc<Mutex<RequestInbox>>,
        period: Duration,
        notices: mpsc::UnboundedSender<usize>,
    ) -> Self {
        let (shutdown, receiver) = broadcast::channel(1);
        let token = auth.token.clone();
        let account_id = auth.account_id();

        let handle = tokio::spawn(poll_requests(
            backend, token, account_id, inbox, period, receiver, notices,
        ));
        info!("Polling money requests for account {} every {:?}", account_id, period);

        RequestPoller {
            shutdown,
            handle: Some(handle),
        }
    }

    /// Signal the loop and wait for it to wind down
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for RequestPoller {
    fn drop(&mut self) {
        let _ = self.shutdown.send(());
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn poll_requests(
    backend: Arc<dyn BankBackend>,
    token: String,
    account_id: i64,
    inbox: Arc<Mutex<RequestInbox>>,
    period: Duration,
    mut shutdown: broadcast::Receiver<()>,
    notices: mpsc::UnboundedSender<usize>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                info!("Received shutdown signal, stopping money request poll");
                break;
            }
            _ = ticker.tick() => {}
        }

        let fetched = tokio::select! {
            _ = shutdown.recv() => {
                debug!("Discarding in-flight money request poll");
                break;
            }
            result = backend.list_requests(&token, account_id) => result,
        };

        match fetched {
            Ok(requests) => {
                let mut inbox = inbox.lock().await;
                let before = inbox.pending().len();
                let after = inbox.apply_poll(requests);
                debug!("Money request poll: {} pending", after);
                if after > before {
                    let _ = notices.send(after);
                }
            }
            Err(e) => error!("Error fetching money requests: {}", e),
        }
    }
}
