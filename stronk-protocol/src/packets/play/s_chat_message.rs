use stronk_macros::{ReadFrom, ServerPacket};

/// A chat message or command typed by the player. The content is a plain
/// string; only clientbound chat is a JSON component.
#[derive(ReadFrom, ServerPacket, Clone, Debug)]
pub struct SChatMessage {
    /// The raw message, at most 256 characters.
    #[read(as = Prefixed(VarInt), bound = 256)]
    pub message: String,
}
