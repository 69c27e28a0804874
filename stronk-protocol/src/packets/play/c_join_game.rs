use std::io::{Result, Write};

use stronk_macros::{ClientPacket, WriteTo};
use stronk_utils::serial::WriteTo;

use crate::ids::play::C_JOIN_GAME;

/// The player's gamemode.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Gamemode {
    /// Survival.
    #[default]
    Survival = 0,
    /// Creative.
    Creative = 1,
    /// Adventure.
    Adventure = 2,
    /// Spectator.
    Spectator = 3,
}

impl WriteTo for Gamemode {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        (*self as u8).write(writer)
    }
}

/// The dimension a world lives in.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Dimension {
    /// The nether.
    Nether = -1,
    /// The overworld.
    #[default]
    Overworld = 0,
    /// The end.
    End = 1,
}

impl WriteTo for Dimension {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        (*self as i32).write(writer)
    }
}

/// The first play packet; announces the player's entity and the world.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Play = C_JOIN_GAME)]
pub struct CJoinGame {
    /// The player's entity id.
    pub entity_id: i32,
    /// The gamemode, with bit 0x08 flagging hardcore.
    pub gamemode: Gamemode,
    /// The dimension, as a plain int in this protocol version.
    pub dimension: Dimension,
    /// World difficulty, 0 peaceful to 3 hard.
    pub difficulty: u8,
    /// Historical field, ignored by modern clients.
    pub max_players: u8,
    /// The level type, e.g. `default` or `flat`.
    #[write(as = Prefixed(VarInt), bound = 16)]
    pub level_type: String,
    /// Whether the debug screen hides world details.
    pub reduced_debug_info: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet_traits::ClientPacket;
    use crate::utils::ConnectionProtocol;

    #[test]
    fn join_game_wire_layout() {
        let packet = CJoinGame {
            entity_id: 1,
            gamemode: Gamemode::Survival,
            dimension: Dimension::Overworld,
            difficulty: 0,
            max_players: 255,
            level_type: "default".to_string(),
            reduced_debug_info: false,
        };

        let mut buf = Vec::new();
        packet
            .write_packet(&mut buf, ConnectionProtocol::Play)
            .expect("write failed");

        let mut expected = vec![0x23];
        expected.extend_from_slice(&1i32.to_be_bytes());
        expected.push(0x00);
        expected.extend_from_slice(&0i32.to_be_bytes());
        expected.push(0x00);
        expected.push(0xFF);
        expected.push(7);
        expected.extend_from_slice(b"default");
        expected.push(0x00);

        assert_eq!(buf, expected);
    }
}
