//! # Stronk
//!
//! A Minecraft Java Edition server for protocol version 335 (game version
//! 1.12): the accept loop, the pre-play client, login cryptography, and the
//! play-state connection.

use std::{
    path::Path,
    sync::{Arc, LazyLock},
};

use tokio::{net::TcpListener, select};
use tokio_util::{sync::CancellationToken, task::TaskTracker};

use crate::{network::JavaTcpClient, server::Server, stronk_config::StronkConfig};

pub mod network;
pub mod player;
pub mod server;
pub mod stronk_config;
pub mod world;

/// The game version this server speaks.
pub const MC_VERSION: &str = "1.12";

/// The brand reported through the `MC|BRAND` plugin channel.
pub const SERVER_BRAND: &str = "Stronk";

/// The server configuration, loaded once at startup.
pub static STRONK_CONFIG: LazyLock<StronkConfig> =
    LazyLock::new(|| StronkConfig::load_or_create(Path::new("config/stronk_config.json5")));

/// The listening half of the server: accepts connections and hands them to
/// per-connection tasks.
pub struct StronkServer {
    /// The listening socket.
    pub tcp_listener: TcpListener,
    /// Cancelled to shut the whole server down.
    pub cancel_token: CancellationToken,
    /// The id handed to the next accepted connection.
    pub client_id: u64,
    /// Shared server state.
    pub server: Arc<Server>,
    task_tracker: TaskTracker,
}

impl StronkServer {
    /// Binds the listening socket and builds the shared state.
    ///
    /// # Panics
    /// - If the TCP listener fails to bind to the configured address.
    pub async fn new() -> Self {
        log::info!("Starting Stronk server on {}", STRONK_CONFIG.server_address);

        let server = Server::new();

        Self {
            tcp_listener: TcpListener::bind(STRONK_CONFIG.server_address)
                .await
                .expect("Failed to bind the server address"),
            cancel_token: CancellationToken::new(),
            client_id: 0,
            server: Arc::new(server),
            task_tracker: TaskTracker::new(),
        }
    }

    /// Accepts connections until the cancel token fires.
    pub async fn start(&mut self) {
        log::info!("Started Stronk server");

        loop {
            select! {
                () = self.cancel_token.cancelled() => {
                    break;
                }
                accept_result = self.tcp_listener.accept() => {
                    let Ok((connection, address)) = accept_result else {
                        continue;
                    };
                    if let Err(e) = connection.set_nodelay(true) {
                        log::warn!("Failed to set TCP_NODELAY: {e}");
                    }

                    let (java_client, sender_recv, net_reader) = JavaTcpClient::new(
                        connection,
                        address,
                        self.client_id,
                        self.cancel_token.child_token(),
                        self.server.clone(),
                        self.task_tracker.clone(),
                    );
                    log::info!("Accepted connection from {address} (id {})", self.client_id);
                    self.client_id = self.client_id.wrapping_add(1);

                    let java_client = Arc::new(java_client);
                    java_client.start_outgoing_packet_task(sender_recv);
                    java_client.start_incoming_packet_task(net_reader);
                    // The client is owned by its two tasks from here on.
                }
            }
        }

        self.task_tracker.close();
        self.task_tracker.wait().await;
    }
}
