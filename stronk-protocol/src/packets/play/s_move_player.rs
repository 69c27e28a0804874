//! The four serverbound movement packets. They share semantics and differ
//! only in which fields are present.

use stronk_macros::{ReadFrom, ServerPacket};

/// On-ground flag only.
#[derive(ReadFrom, ServerPacket, Clone, Debug)]
pub struct SPlayer {
    /// Whether the client considers itself on the ground.
    pub on_ground: bool,
}

/// Absolute position update.
#[derive(ReadFrom, ServerPacket, Clone, Debug)]
pub struct SPlayerPosition {
    /// Absolute x.
    pub x: f64,
    /// Absolute feet y.
    pub y: f64,
    /// Absolute z.
    pub z: f64,
    /// Whether the client considers itself on the ground.
    pub on_ground: bool,
}

/// Absolute position and rotation update.
#[derive(ReadFrom, ServerPacket, Clone, Debug)]
pub struct SPlayerPositionAndLook {
    /// Absolute x.
    pub x: f64,
    /// Absolute feet y.
    pub y: f64,
    /// Absolute z.
    pub z: f64,
    /// Rotation around the vertical axis, in degrees.
    pub yaw: f32,
    /// Rotation up or down, in degrees.
    pub pitch: f32,
    /// Whether the client considers itself on the ground.
    pub on_ground: bool,
}

/// Rotation update.
#[derive(ReadFrom, ServerPacket, Clone, Debug)]
pub struct SPlayerLook {
    /// Rotation around the vertical axis, in degrees.
    pub yaw: f32,
    /// Rotation up or down, in degrees.
    pub pitch: f32,
    /// Whether the client considers itself on the ground.
    pub on_ground: bool,
}
