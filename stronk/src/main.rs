//! The Stronk server binary.

use stronk::StronkServer;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    // The `tracing-log` feature routes `log` macro records from the other
    // crates into this subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    let mut server = StronkServer::new().await;

    let cancel_token = server.cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Shutting down");
            cancel_token.cancel();
        }
    });

    server.start().await;
}
