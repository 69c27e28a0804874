use stronk_macros::{ReadFrom, ServerPacket};

/// The client closed a window (window id 0 is the inventory).
#[derive(ReadFrom, ServerPacket, Clone, Debug)]
pub struct SCloseWindow {
    /// The id of the closed window.
    pub window_id: u8,
}
