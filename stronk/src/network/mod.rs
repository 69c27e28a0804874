//! The pre-play networking layer.

mod java_tcp_client;
/// The login sequence.
pub mod login;
/// Session-service authentication.
pub mod mojang_authentication;
/// The server-list status ping.
pub mod status;

pub use java_tcp_client::{ConnectionUpdate, JavaTcpClient};
