use stronk_macros::{ClientPacket, WriteTo};

use crate::ids::login::C_SET_COMPRESSION;

/// Announces the compression threshold; every frame after this one uses the
/// compressed framing in both directions.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Login = C_SET_COMPRESSION)]
pub struct CSetCompression {
    /// The minimum uncompressed packet size that actually deflates.
    #[write(as = VarInt)]
    pub threshold: i32,
}

impl CSetCompression {
    /// Creates a new `CSetCompression`.
    #[must_use]
    pub fn new(threshold: i32) -> Self {
        Self { threshold }
    }
}
