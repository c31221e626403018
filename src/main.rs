use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod listing;
mod models;
mod services;
mod session;
mod utils;

use api::bank::BankClient;
use commands::{Reply, Shell};
use config::Config;
use session::SessionStore;

fn prompt() {
    print!("escobanks> ");
    let _ = std::io::stdout().flush();
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Logs go to stderr so they never interleave with the shell on stdout
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("escobanks_client=info,reqwest=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    info!("🏦 Starting EscoBANKS client v{}", env!("CARGO_PKG_VERSION"));
    let client = BankClient::new(config.api_base_url.clone());
    info!("Backend: {}", client.base_url());

    let store = SessionStore::new(config.session_file.clone(), config.session_cipher.clone());
    let (mut shell, mut notices) = Shell::new(Arc::new(client), store, config.poll_interval);

    println!("🏦 EscoBANKS. Type `help` for commands, `quit` to leave.");
    if let Some(message) = shell.resume() {
        println!("{}", message);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => match commands::handle_line(&mut shell, &line).await {
                    Reply::Output(text) => {
                        if !text.is_empty() {
                            println!("{}", text);
                        }
                    }
                    Reply::Quit => break,
                },
                Ok(None) => break,
                Err(e) => {
                    error!("Failed to read input: {}", e);
                    break;
                }
            },
            Some(count) = notices.recv() => {
                println!("\n🔔 You have {} pending money request(s). Type `requests` to view them.", count);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down");
                break;
            }
        }
        prompt();
    }

    shell.shutdown().await;
    println!("👋 Bye");
}
