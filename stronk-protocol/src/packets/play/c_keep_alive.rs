use stronk_macros::{ClientPacket, WriteTo};

use crate::ids::play::C_KEEP_ALIVE;

/// The server's heartbeat; the client must echo the id.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Play = C_KEEP_ALIVE)]
pub struct CKeepAlive {
    /// An id to be echoed back, a VarInt in this protocol version.
    #[write(as = VarInt)]
    pub id: i32,
}

impl CKeepAlive {
    /// Creates a new `CKeepAlive`.
    #[must_use]
    pub fn new(id: i32) -> Self {
        Self { id }
    }
}
