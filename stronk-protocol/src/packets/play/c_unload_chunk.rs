use stronk_macros::{ClientPacket, WriteTo};

use crate::ids::play::C_UNLOAD_CHUNK;

/// Tells the client to forget a chunk column.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Play = C_UNLOAD_CHUNK)]
pub struct CUnloadChunk {
    /// Chunk x coordinate.
    pub chunk_x: i32,
    /// Chunk z coordinate.
    pub chunk_z: i32,
}

impl CUnloadChunk {
    /// Creates a new `CUnloadChunk`.
    #[must_use]
    pub fn new(chunk_x: i32, chunk_z: i32) -> Self {
        Self { chunk_x, chunk_z }
    }
}
