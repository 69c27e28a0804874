use stronk_macros::{ClientPacket, WriteTo};

use crate::ids::play::C_PLUGIN_MESSAGE;

/// A plugin message to the client; used for the `MC|BRAND` server brand.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Play = C_PLUGIN_MESSAGE)]
pub struct CPluginMessage {
    /// The channel name.
    #[write(as = Prefixed(VarInt), bound = 20)]
    pub channel: String,
    /// The raw payload; the frame length delimits it.
    #[write(as = Unprefixed)]
    pub payload: Vec<u8>,
}

impl CPluginMessage {
    /// Creates a new `CPluginMessage`.
    #[must_use]
    pub fn new(channel: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            channel: channel.into(),
            payload,
        }
    }
}
