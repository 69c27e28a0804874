use stronk_macros::{ClientPacket, WriteTo};
use stronk_utils::text::TextComponent;

use crate::ids::login::C_LOGIN_DISCONNECT;

/// Kicks a client that is still logging in.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Login = C_LOGIN_DISCONNECT)]
pub struct CLoginDisconnect {
    /// The reason shown on the client's disconnect screen.
    #[write(as = Json)]
    pub reason: TextComponent,
}

impl CLoginDisconnect {
    /// Creates a new `CLoginDisconnect`.
    #[must_use]
    pub fn new(reason: TextComponent) -> Self {
        Self { reason }
    }
}
