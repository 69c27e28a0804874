use stronk_macros::{ReadFrom, ServerPacket};

/// Echo of a clientbound keep-alive. The id is a VarInt in this protocol
/// version.
#[derive(ReadFrom, ServerPacket, Clone, Debug)]
pub struct SKeepAlive {
    /// The id from the clientbound keep-alive.
    #[read(as = VarInt)]
    pub id: i32,
}
