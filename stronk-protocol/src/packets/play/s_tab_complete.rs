use stronk_macros::{ReadFrom, ServerPacket};
use stronk_utils::BlockPos;

/// A tab-completion request for the text currently in the chat box.
#[derive(ReadFrom, ServerPacket, Clone, Debug)]
pub struct STabComplete {
    /// The text behind the cursor.
    #[read(as = Prefixed(VarInt), bound = 32767)]
    pub text: String,
    /// Whether the client wants command parsing even without a `/`.
    pub assume_command: bool,
    /// The block the player looks at, if any.
    pub looked_at_block: Option<BlockPos>,
}
