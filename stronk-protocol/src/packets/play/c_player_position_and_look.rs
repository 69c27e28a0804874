use stronk_macros::{ClientPacket, WriteTo};

use crate::ids::play::C_PLAYER_POSITION_AND_LOOK;

/// Teleports the client. The client must answer with a Teleport Confirm
/// carrying the same id.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Play = C_PLAYER_POSITION_AND_LOOK)]
pub struct CPlayerPositionAndLook {
    /// Absolute or relative x, depending on `flags`.
    pub x: f64,
    /// Absolute or relative feet y, depending on `flags`.
    pub y: f64,
    /// Absolute or relative z, depending on `flags`.
    pub z: f64,
    /// Rotation around the vertical axis, in degrees.
    pub yaw: f32,
    /// Rotation up or down, in degrees.
    pub pitch: f32,
    /// Relative-coordinate bitmask: 0x01 x, 0x02 y, 0x04 z, 0x08 pitch,
    /// 0x10 yaw. Zero means every field is absolute.
    pub flags: u8,
    /// The id the client confirms with.
    #[write(as = VarInt)]
    pub teleport_id: i32,
}

impl CPlayerPositionAndLook {
    /// Creates an absolute teleport.
    #[must_use]
    pub fn absolute(x: f64, y: f64, z: f64, yaw: f32, pitch: f32, teleport_id: i32) -> Self {
        Self {
            x,
            y,
            z,
            yaw,
            pitch,
            flags: 0,
            teleport_id,
        }
    }
}
