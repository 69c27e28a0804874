use stronk_macros::{ReadFrom, ServerPacket};

/// The client's login request.
#[derive(ReadFrom, ServerPacket, Clone, Debug)]
pub struct SLoginStart {
    /// The requested username.
    #[read(as = Prefixed(VarInt), bound = 16)]
    pub name: String,
}
