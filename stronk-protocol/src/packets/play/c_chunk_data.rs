use stronk_macros::{ClientPacket, WriteTo};

use crate::ids::play::C_CHUNK_DATA;

/// A chunk column. The section and biome bytes are produced by the world
/// layer; this packet only frames them.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Play = C_CHUNK_DATA)]
pub struct CChunkData {
    /// Chunk x coordinate.
    pub chunk_x: i32,
    /// Chunk z coordinate.
    pub chunk_z: i32,
    /// Whether this is a full column (with biomes) rather than a delta.
    pub ground_up_continuous: bool,
    /// Bitmask of the sections present in `data`, lowest section first.
    #[write(as = VarInt)]
    pub primary_bit_mask: i32,
    /// The serialized sections, plus the biome array for full columns.
    #[write(as = Prefixed(VarInt), bound = 2097152)]
    pub data: Vec<u8>,
    /// Block entities in this column; none are sent here.
    #[write(as = VarInt)]
    pub block_entity_count: i32,
}

impl CChunkData {
    /// Creates a full chunk column packet.
    #[must_use]
    pub fn new(chunk_x: i32, chunk_z: i32, primary_bit_mask: i32, data: Vec<u8>) -> Self {
        Self {
            chunk_x,
            chunk_z,
            ground_up_continuous: true,
            primary_bit_mask,
            data,
            block_entity_count: 0,
        }
    }
}
