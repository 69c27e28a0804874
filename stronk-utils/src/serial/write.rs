#![allow(missing_docs)]
use std::io::{Result, Write};

use uuid::Uuid;

use crate::{
    codec::VarInt,
    serial::{PrefixedWrite, WriteTo},
};

impl WriteTo for bool {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        u8::from(*self).write(writer)?;
        Ok(())
    }
}

macro_rules! write_be {
    ($($ty:ty),*) => {
        $(impl WriteTo for $ty {
            fn write(&self, writer: &mut impl Write) -> Result<()> {
                writer.write_all(&self.to_be_bytes())
            }
        })*
    };
}

write_be!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl<T: WriteTo> WriteTo for Option<T> {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        if let Some(value) = self {
            true.write(writer)?;
            value.write(writer)
        } else {
            false.write(writer)
        }
    }
}

impl<T: WriteTo, const N: usize> WriteTo for [T; N] {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        for i in self {
            i.write(writer)?;
        }
        Ok(())
    }
}

impl<T: WriteTo> WriteTo for Vec<T> {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        self.write_prefixed::<VarInt>(writer)
    }
}

impl WriteTo for Uuid {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        let (most_significant_bits, least_significant_bits) = self.as_u64_pair();
        most_significant_bits.write(writer)?;
        least_significant_bits.write(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serial::ReadFrom;
    use std::io::Cursor;

    fn round_trip<T: WriteTo + ReadFrom + PartialEq + std::fmt::Debug>(value: T, size: usize) {
        let mut buf = Vec::new();
        value.write(&mut buf).expect("write failed");
        assert_eq!(buf.len(), size, "wire size of {value:?}");

        let mut cursor = Cursor::new(buf.as_slice());
        assert_eq!(T::read(&mut cursor).expect("read failed"), value);
        assert_eq!(cursor.position() as usize, size);
    }

    #[test]
    fn primitive_round_trips() {
        round_trip(true, 1);
        round_trip(false, 1);
        round_trip(0x7Fu8, 1);
        round_trip(-1i8, 1);
        round_trip(25565u16, 2);
        round_trip(i16::MIN, 2);
        round_trip(0xDEAD_BEEFu32, 4);
        round_trip(i32::MIN, 4);
        round_trip(u64::MAX, 8);
        round_trip(i64::MIN, 8);
        round_trip(1.5f32, 4);
        round_trip(-0.25f64, 8);
    }

    #[test]
    fn network_byte_order_on_the_wire() {
        let mut buf = Vec::new();
        0x1234_5678i32.write(&mut buf).expect("write failed");
        assert_eq!(buf, [0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn option_is_bool_prefixed() {
        round_trip(Some(42u32), 5);
        round_trip(None::<u32>, 1);
    }

    #[test]
    fn uuid_is_two_big_endian_longs() {
        let uuid = Uuid::from_u64_pair(0x0123_4567_89AB_CDEF, 0xFEDC_BA98_7654_3210);
        round_trip(uuid, 16);

        let mut buf = Vec::new();
        uuid.write(&mut buf).expect("write failed");
        assert_eq!(buf[0], 0x01);
        assert_eq!(buf[15], 0x10);
    }
}
