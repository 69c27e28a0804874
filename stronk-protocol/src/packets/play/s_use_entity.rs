use std::io::{Error, Read};

use stronk_macros::ServerPacket;
use stronk_utils::{codec::VarInt, serial::ReadFrom};

/// How the player used an entity. The wire layout is conditional on the
/// action discriminant, so this packet is decoded by hand.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum UseEntityAction {
    /// Plain interaction with a hand.
    Interact {
        /// 0 for the main hand, 1 for the off hand.
        hand: i32,
    },
    /// An attack.
    Attack,
    /// Interaction at a specific point on the entity.
    InteractAt {
        /// Target x, relative to the entity.
        target_x: f32,
        /// Target y, relative to the entity.
        target_y: f32,
        /// Target z, relative to the entity.
        target_z: f32,
        /// 0 for the main hand, 1 for the off hand.
        hand: i32,
    },
}

/// The client used (attacked, interacted with) an entity.
#[derive(ServerPacket, Clone, Debug)]
pub struct SUseEntity {
    /// The id of the target entity.
    pub target: i32,
    /// What was done to it.
    pub action: UseEntityAction,
}

impl ReadFrom for SUseEntity {
    fn read(data: &mut impl Read) -> Result<Self, Error> {
        let target = VarInt::read(data)?.0;
        let action = match VarInt::read(data)?.0 {
            0 => UseEntityAction::Interact {
                hand: VarInt::read(data)?.0,
            },
            1 => UseEntityAction::Attack,
            2 => UseEntityAction::InteractAt {
                target_x: f32::read(data)?,
                target_y: f32::read(data)?,
                target_z: f32::read(data)?,
                hand: VarInt::read(data)?.0,
            },
            other => return Err(Error::other(format!("Invalid use entity type {other}"))),
        };

        Ok(Self { target, action })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet_traits::ServerPacket;
    use std::io::Cursor;
    use stronk_utils::serial::WriteTo;

    #[test]
    fn use_entity_attack_has_no_trailing_fields() {
        let mut buf = Vec::new();
        VarInt(42).write(&mut buf).expect("write");
        VarInt(1).write(&mut buf).expect("write");

        let packet = SUseEntity::read_packet(&mut Cursor::new(buf.as_slice())).expect("decode");
        assert_eq!(packet.target, 42);
        assert_eq!(packet.action, UseEntityAction::Attack);
    }

    #[test]
    fn use_entity_interact_at_reads_position_and_hand() {
        let mut buf = Vec::new();
        VarInt(7).write(&mut buf).expect("write");
        VarInt(2).write(&mut buf).expect("write");
        0.5f32.write(&mut buf).expect("write");
        1.0f32.write(&mut buf).expect("write");
        0.25f32.write(&mut buf).expect("write");
        VarInt(0).write(&mut buf).expect("write");

        let packet = SUseEntity::read_packet(&mut Cursor::new(buf.as_slice())).expect("decode");
        assert_eq!(packet.target, 7);
        assert_eq!(
            packet.action,
            UseEntityAction::InteractAt {
                target_x: 0.5,
                target_y: 1.0,
                target_z: 0.25,
                hand: 0,
            }
        );
    }
}
