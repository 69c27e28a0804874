//! A minimal flat world: enough chunk data to stand on while the real
//! world storage lives outside the core.
//!
//! Chunk columns are serialized in the protocol 335 format: per section a
//! bits-per-block byte, an empty palette (meaning global block-state ids),
//! the packed block array, block light, and sky light; a full column ends
//! with the biome array.

use stronk_protocol::packets::play::CChunkData;
use stronk_utils::codec::VarInt;
use stronk_utils::serial::WriteTo;
use stronk_utils::BlockPos;

use crate::player::Position;

const SECTION_BLOCK_COUNT: usize = 4096;
/// The global palette of this protocol version is 13 bits wide.
const BITS_PER_BLOCK: u8 = 13;
const SECTION_DATA_LONGS: usize = SECTION_BLOCK_COUNT * BITS_PER_BLOCK as usize / 64;
const LIGHT_BYTES: usize = SECTION_BLOCK_COUNT / 2;
const BIOME_BYTES: usize = 256;

const BIOME_PLAINS: u8 = 1;
/// Global block-state id: block id 1 (stone), meta 0.
const STONE_STATE: u64 = 1 << 4;

/// Stone from bedrock level up to y = 63.
const STONE_SECTIONS: u32 = 4;

/// The height players spawn at, one block above the surface.
pub const SURFACE_Y: i32 = (STONE_SECTIONS * 16) as i32;

/// The block the compass points at.
#[must_use]
pub fn spawn_block() -> BlockPos {
    BlockPos::new(8, SURFACE_Y, 8)
}

/// Where players appear, centered on the spawn block.
#[must_use]
pub fn spawn_position() -> Position {
    Position {
        x: 8.5,
        y: f64::from(SURFACE_Y),
        z: 8.5,
        yaw: 0.0,
        pitch: 0.0,
    }
}

/// The flat world every player joins. The column bytes are identical for
/// every chunk and get built once.
pub struct FlatWorld {
    column_data: Vec<u8>,
    primary_bit_mask: i32,
}

impl FlatWorld {
    /// Builds the shared chunk column.
    #[must_use]
    #[allow(clippy::new_without_default, reason = "construction is not trivial")]
    pub fn new() -> Self {
        let section = build_stone_section();

        let mut column =
            Vec::with_capacity(section.len() * STONE_SECTIONS as usize + BIOME_BYTES);
        for _ in 0..STONE_SECTIONS {
            column.extend_from_slice(&section);
        }
        column.extend_from_slice(&[BIOME_PLAINS; BIOME_BYTES]);

        Self {
            column_data: column,
            primary_bit_mask: (1 << STONE_SECTIONS) - 1,
        }
    }

    /// The chunk column at the given chunk coordinates.
    #[must_use]
    pub fn chunk_data(&self, chunk_x: i32, chunk_z: i32) -> CChunkData {
        CChunkData::new(
            chunk_x,
            chunk_z,
            self.primary_bit_mask,
            self.column_data.clone(),
        )
    }

    /// The square of chunk columns around the spawn chunk, for the initial
    /// dispatch.
    pub fn chunks_around_spawn(&self, radius: i32) -> impl Iterator<Item = CChunkData> + '_ {
        (-radius..=radius).flat_map(move |x| {
            (-radius..=radius).map(move |z| self.chunk_data(x, z))
        })
    }
}

fn build_stone_section() -> Vec<u8> {
    let mut data = vec![0u64; SECTION_DATA_LONGS];
    for i in 0..SECTION_BLOCK_COUNT {
        let bit_index = i * BITS_PER_BLOCK as usize;
        let long_index = bit_index / 64;
        let offset = (bit_index % 64) as u32;

        data[long_index] |= STONE_STATE << offset;
        if offset + u32::from(BITS_PER_BLOCK) > 64 {
            data[long_index + 1] |= STONE_STATE >> (64 - offset);
        }
    }

    let mut buf =
        Vec::with_capacity(4 + SECTION_DATA_LONGS * 8 + LIGHT_BYTES * 2);
    BITS_PER_BLOCK
        .write(&mut buf)
        .expect("writing to a buffer should not fail");
    VarInt(0)
        .write(&mut buf)
        .expect("writing to a buffer should not fail");
    VarInt(SECTION_DATA_LONGS as i32)
        .write(&mut buf)
        .expect("writing to a buffer should not fail");
    for long in data {
        buf.extend_from_slice(&long.to_be_bytes());
    }
    // Block light is dark underground; the sky above is fully lit.
    buf.extend_from_slice(&[0x00; LIGHT_BYTES]);
    buf.extend_from_slice(&[0xFF; LIGHT_BYTES]);

    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_serialization_has_the_documented_size() {
        let section = build_stone_section();
        // bits-per-block byte + VarInt(0) + VarInt(832) + longs + light.
        assert_eq!(section.len(), 1 + 1 + 2 + SECTION_DATA_LONGS * 8 + LIGHT_BYTES * 2);
        assert_eq!(section[0], 13);
        assert_eq!(section[1], 0);
    }

    #[test]
    fn packed_blocks_survive_unpacking() {
        let section = build_stone_section();

        // The packed longs start after the three header fields.
        let longs: Vec<u64> = section[4..4 + SECTION_DATA_LONGS * 8]
            .chunks_exact(8)
            .map(|bytes| u64::from_be_bytes(bytes.try_into().expect("8 bytes")))
            .collect();

        for i in 0..SECTION_BLOCK_COUNT {
            let bit_index = i * BITS_PER_BLOCK as usize;
            let long_index = bit_index / 64;
            let offset = (bit_index % 64) as u32;

            let mut value = longs[long_index] >> offset;
            if offset + u32::from(BITS_PER_BLOCK) > 64 {
                value |= longs[long_index + 1] << (64 - offset);
            }
            value &= (1 << BITS_PER_BLOCK) - 1;

            assert_eq!(value, STONE_STATE, "block {i}");
        }
    }

    #[test]
    fn initial_dispatch_covers_the_square() {
        let world = FlatWorld::new();
        let chunks: Vec<_> = world.chunks_around_spawn(2).collect();
        assert_eq!(chunks.len(), 25);
        assert!(chunks.iter().all(|c| c.primary_bit_mask == 0b1111));
        assert!(
            chunks
                .iter()
                .any(|c| c.chunk_x == -2 && c.chunk_z == 2)
        );
    }

    #[test]
    fn spawn_is_above_the_stone() {
        assert_eq!(SURFACE_Y, 64);
        assert_eq!(spawn_block().y, 64);
        assert!(spawn_position().y >= f64::from(SURFACE_Y));
    }
}
