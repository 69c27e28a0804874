use stronk_macros::{ClientPacket, WriteTo};
use stronk_utils::BlockPos;

use crate::ids::play::C_SPAWN_POSITION;

/// The world spawn; the client points its compass at it.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Play = C_SPAWN_POSITION)]
pub struct CSpawnPosition {
    /// The spawn location.
    pub location: BlockPos,
}

impl CSpawnPosition {
    /// Creates a new `CSpawnPosition`.
    #[must_use]
    pub fn new(location: BlockPos) -> Self {
        Self { location }
    }
}
