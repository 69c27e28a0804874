use stronk_macros::{ClientPacket, WriteTo};
use stronk_utils::text::TextComponent;

use crate::ids::play::C_DISCONNECT;

/// Kicks a client that is in play state.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Play = C_DISCONNECT)]
pub struct CDisconnect {
    /// The reason shown on the client's disconnect screen.
    #[write(as = Json)]
    pub reason: TextComponent,
}

impl CDisconnect {
    /// Creates a new `CDisconnect`.
    #[must_use]
    pub fn new(reason: TextComponent) -> Self {
        Self { reason }
    }
}
