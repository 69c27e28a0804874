use stronk_macros::{ClientPacket, WriteTo};

use crate::ids::play::C_PLAYER_ABILITIES;

/// Pushes the player's abilities to the client.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Play = C_PLAYER_ABILITIES)]
pub struct CPlayerAbilities {
    /// Bitmask: 0x01 invulnerable, 0x02 flying, 0x04 allow flying,
    /// 0x08 creative.
    pub flags: i8,
    /// Flying speed.
    pub flying_speed: f32,
    /// Field-of-view modifier; 1.0 is the default.
    pub field_of_view_modifier: f32,
}

impl CPlayerAbilities {
    /// Creates a new `CPlayerAbilities` from individual flags.
    #[must_use]
    pub fn new(
        invulnerable: bool,
        flying: bool,
        allow_flying: bool,
        creative: bool,
        flying_speed: f32,
        field_of_view_modifier: f32,
    ) -> Self {
        let mut flags = 0i8;
        if invulnerable {
            flags |= 0x01;
        }
        if flying {
            flags |= 0x02;
        }
        if allow_flying {
            flags |= 0x04;
        }
        if creative {
            flags |= 0x08;
        }
        Self {
            flags,
            flying_speed,
            field_of_view_modifier,
        }
    }
}
