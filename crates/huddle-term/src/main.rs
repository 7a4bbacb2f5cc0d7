//! Huddle terminal client.
//!
//! # Usage
//!
//! ```bash
//! # Prompt for a nickname, talk to a local server
//! huddle
//!
//! # Log in directly against another server
//! huddle --nickname alice --server ws://chat.example:3000 --api http://chat.example:3000
//! ```
//!
//! Logs go to stderr so they never interleave with the chat on stdout.

use clap::Parser;
use huddle_app::{ClientConfig, DEFAULT_API_BASE_URL, DEFAULT_SERVER_ADDR, Runtime};
use huddle_client::HttpRegistrar;
use huddle_core::SystemEnv;
use huddle_term::{TermDriver, spawn_line_reader};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Huddle terminal chat client
#[derive(Parser, Debug)]
#[command(name = "huddle")]
#[command(about = "Single-room terminal chat client")]
#[command(version)]
struct Args {
    /// WebSocket address of the chat server
    #[arg(short, long, env = "HUDDLE_SERVER", default_value = DEFAULT_SERVER_ADDR)]
    server: String,

    /// Base URL of the registration API
    #[arg(short, long, env = "HUDDLE_API", default_value = DEFAULT_API_BASE_URL)]
    api: String,

    /// Log in with this nickname instead of prompting
    #[arg(short, long)]
    nickname: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = ClientConfig { server_addr: args.server, api_base_url: args.api };
    tracing::info!(server = %config.server_addr, api = %config.api_base_url, "starting");

    let registrar = HttpRegistrar::new(&config.api_base_url);
    let lines = spawn_line_reader(std::io::BufReader::new(std::io::stdin()))?;
    let mut driver = TermDriver::new(lines, std::io::stdout(), registrar);
    if let Some(nickname) = args.nickname {
        driver = driver.with_nickname(nickname);
    }
    driver.prompt()?;

    let shutdown = driver.shutdown_handle();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => shutdown.notify_one(),
            Err(e) => tracing::warn!(error = %e, "cannot listen for Ctrl-C"),
        }
    });

    Runtime::new(driver, SystemEnv::new(), config).run().await?;

    Ok(())
}
