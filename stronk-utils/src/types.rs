use std::io::{self, Read, Write};

use crate::serial::{ReadFrom, WriteTo};

/// A rotation with 256 steps to the full turn, as used for entity look
/// angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Angle(pub u8);

impl Angle {
    /// Converts degrees to the wire representation, wrapping as the
    /// protocol does.
    #[must_use]
    pub fn from_degrees(degrees: f32) -> Self {
        Self((degrees / 360.0 * 256.0).rem_euclid(256.0) as u8)
    }

    /// Converts the wire representation back to degrees in `[0, 360)`.
    #[must_use]
    pub fn to_degrees(self) -> f32 {
        f32::from(self.0) / 256.0 * 360.0
    }
}

impl WriteTo for Angle {
    fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        self.0.write(writer)
    }
}

impl ReadFrom for Angle {
    fn read(data: &mut impl Read) -> io::Result<Self> {
        Ok(Self(u8::read(data)?))
    }
}

/// A block position, packed on the wire into a single 64 bit integer.
///
/// Protocol 335 layout: X in bits 63..38 (26 bits), Y in bits 37..26
/// (12 bits), Z in bits 25..0 (26 bits). All three fields are
/// two's-complement and must be sign-extended on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPos {
    /// The x coordinate, valid in `[-2^25, 2^25 - 1]`.
    pub x: i32,
    /// The y coordinate, valid in `[-2^11, 2^11 - 1]`.
    pub y: i32,
    /// The z coordinate, valid in `[-2^25, 2^25 - 1]`.
    pub z: i32,
}

impl BlockPos {
    /// Creates a new `BlockPos`.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Packs this position into the wire representation.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        ((self.x as i64 & 0x3FF_FFFF) << 38)
            | ((self.y as i64 & 0xFFF) << 26)
            | (self.z as i64 & 0x3FF_FFFF)
    }

    /// Unpacks a position from the wire representation, sign-extending
    /// every field.
    #[must_use]
    pub const fn from_i64(value: i64) -> Self {
        Self {
            x: (value >> 38) as i32,
            y: ((value << 26) >> 52) as i32,
            z: ((value << 38) >> 38) as i32,
        }
    }
}

impl WriteTo for BlockPos {
    fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        self.as_i64().write(writer)
    }
}

impl ReadFrom for BlockPos {
    fn read(data: &mut impl Read) -> io::Result<Self> {
        Ok(Self::from_i64(i64::read(data)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_round_trip() {
        for raw in [0u8, 1, 64, 128, 255] {
            let angle = Angle(raw);
            let mut buf = Vec::new();
            angle.write(&mut buf).expect("write failed");
            assert_eq!(buf.len(), 1);

            let mut cursor = std::io::Cursor::new(buf.as_slice());
            assert_eq!(Angle::read(&mut cursor).expect("read failed"), angle);
        }

        assert_eq!(Angle::from_degrees(0.0), Angle(0));
        assert_eq!(Angle::from_degrees(90.0), Angle(64));
        assert_eq!(Angle::from_degrees(-90.0), Angle(192));
    }

    #[test]
    fn position_round_trip() {
        let positions = [
            BlockPos::new(0, 0, 0),
            BlockPos::new(1, 2, 3),
            BlockPos::new(-1, -1, -1),
            BlockPos::new(33_554_431, 2047, 33_554_431),
            BlockPos::new(-33_554_432, -2048, -33_554_432),
            BlockPos::new(12345, 64, -54321),
        ];

        for pos in positions {
            assert_eq!(BlockPos::from_i64(pos.as_i64()), pos, "Failed for {pos:?}");
        }
    }

    #[test]
    fn position_field_layout() {
        // X occupies the top 26 bits, Y the middle 12, Z the low 26.
        assert_eq!(BlockPos::new(1, 0, 0).as_i64(), 1 << 38);
        assert_eq!(BlockPos::new(0, 1, 0).as_i64(), 1 << 26);
        assert_eq!(BlockPos::new(0, 0, 1).as_i64(), 1);
    }

    #[test]
    fn position_wire_round_trip() {
        let pos = BlockPos::new(-100, 70, 255);
        let mut buf = Vec::new();
        pos.write(&mut buf).expect("write failed");
        assert_eq!(buf.len(), 8);

        let mut cursor = std::io::Cursor::new(buf.as_slice());
        assert_eq!(BlockPos::read(&mut cursor).expect("read failed"), pos);
    }
}
