use stronk_macros::{ReadFrom, ServerPacket};

/// Ability flags reported by the client, mainly flight toggles.
#[derive(ReadFrom, ServerPacket, Clone, Debug)]
pub struct SPlayerAbilities {
    /// Bitmask: 0x01 invulnerable, 0x02 flying, 0x04 allow flying,
    /// 0x08 creative.
    pub flags: i8,
    /// Flying speed.
    pub flying_speed: f32,
    /// Field-of-view modifier (walking speed).
    pub walking_speed: f32,
}
