use stronk_macros::{ReadFrom, ServerPacket};

/// The client selected another hotbar slot.
#[derive(ReadFrom, ServerPacket, Clone, Debug)]
pub struct SHeldItemChange {
    /// The selected slot, 0 to 8.
    pub slot: i16,
}
