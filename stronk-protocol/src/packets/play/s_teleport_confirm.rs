use stronk_macros::{ReadFrom, ServerPacket};

/// Confirms a clientbound Player Position And Look.
#[derive(ReadFrom, ServerPacket, Clone, Debug)]
pub struct STeleportConfirm {
    /// The teleport id being confirmed.
    #[read(as = VarInt)]
    pub teleport_id: i32,
}
