use std::io::{Cursor, Error, Read, Write};

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::{
    FrontVec,
    serial::{ReadFrom, WriteTo},
};

/// A variable-length integer.
///
/// Little-endian base-128: the low seven bits of every byte carry payload,
/// the high bit flags continuation. Negative values are two's-complement and
/// always occupy the full five bytes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarInt(pub i32);

impl VarInt {
    /// The maximum number of bytes a `VarInt` can be.
    pub const MAX_SIZE: usize = 5;

    /// Returns the exact number of bytes this `VarInt` will write when
    /// [`WriteTo::write`] is called, assuming no error occurs.
    #[must_use]
    pub fn written_size(val: i32) -> usize {
        match val {
            0 => 1,
            n => (31 - n.leading_zeros() as usize) / 7 + 1,
        }
    }

    /// Reads a `VarInt` from an async reader.
    ///
    /// # Errors
    /// - If the `VarInt` is too long.
    pub async fn read_async(read: &mut (impl AsyncRead + Unpin)) -> Result<i32, Error> {
        let mut val = 0;
        for i in 0..Self::MAX_SIZE {
            let byte = read
                .read_u8()
                .await
                .map_err(|err| Error::new(err.kind(), "VarInt"))?;
            val |= (i32::from(byte) & 0x7F) << (i * 7);
            if byte & 0x80 == 0 {
                return Ok(val);
            }
        }
        Err(Error::other("VarInt too long"))
    }

    /// Sets the `VarInt` in front of a `FrontVec`.
    ///
    /// # Panics
    /// - If the `VarInt` fails to write to the buffer.
    pub fn set_in_front(&self, vec: &mut FrontVec, varint_size: usize) {
        // No heap allocation :)
        let mut buf = [0; Self::MAX_SIZE];
        self.write(&mut Cursor::new(&mut buf[..]))
            .expect("writing to a buffer should not fail");
        vec.set_in_front(&buf[..varint_size]);
    }
}

#[allow(missing_docs)]
impl ReadFrom for VarInt {
    fn read(read: &mut impl Read) -> Result<Self, Error> {
        let mut val = 0;
        for i in 0..Self::MAX_SIZE {
            let byte = u8::read(read)?;
            val |= (i32::from(byte) & 0x7F) << (i * 7);
            if byte & 0x80 == 0 {
                return Ok(Self(val));
            }
        }
        Err(Error::other("VarInt too long"))
    }
}

#[allow(missing_docs)]
impl WriteTo for VarInt {
    fn write(&self, writer: &mut impl Write) -> Result<(), Error> {
        let mut val = self.0 as u32;
        loop {
            let b: u8 = val as u8 & 0x7F;
            val >>= 7;
            if val == 0 {
                b.write(writer)?;
                break;
            }
            (b | 0x80).write(writer)?;
        }
        Ok(())
    }
}

#[allow(missing_docs)]
impl From<usize> for VarInt {
    fn from(value: usize) -> Self {
        Self(value as _)
    }
}

#[allow(missing_docs)]
impl From<VarInt> for usize {
    fn from(value: VarInt) -> usize {
        value.0 as _
    }
}

#[allow(missing_docs)]
impl From<i32> for VarInt {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

#[allow(missing_docs)]
impl From<VarInt> for i32 {
    fn from(value: VarInt) -> i32 {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn varint_round_trip() {
        let test_values = vec![
            0i32,
            1,
            2,
            127,
            128,
            255,
            25565,
            2_097_151,
            2_147_483_647,
            -1,
            -2_147_483_648,
        ];

        for val in test_values {
            let var_int = VarInt(val);
            let mut buf = Vec::new();
            var_int.write(&mut buf).expect("write failed");

            assert_eq!(buf.len(), VarInt::written_size(val), "size for {val}");
            assert!((1..=VarInt::MAX_SIZE).contains(&buf.len()));

            let mut cursor = Cursor::new(buf.as_slice());
            let read_val = VarInt::read(&mut cursor).expect("read failed");
            assert_eq!(read_val, var_int, "Failed for value {val}");
            assert_eq!(cursor.position() as usize, buf.len());
        }
    }

    #[test]
    fn varint_known_encodings() {
        let cases: &[(i32, &[u8])] = &[
            (0, &[0x00]),
            (1, &[0x01]),
            (127, &[0x7F]),
            (128, &[0x80, 0x01]),
            (255, &[0xFF, 0x01]),
            (2_147_483_647, &[0xFF, 0xFF, 0xFF, 0xFF, 0x07]),
            (-1, &[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]),
            (-2_147_483_648, &[0x80, 0x80, 0x80, 0x80, 0x08]),
        ];

        for (val, bytes) in cases {
            let mut buf = Vec::new();
            VarInt(*val).write(&mut buf).expect("write failed");
            assert_eq!(buf.as_slice(), *bytes, "encoding of {val}");
        }
    }

    #[test]
    fn varint_rejects_overlong_input() {
        let mut cursor = Cursor::new([0xFFu8, 0xFF, 0xFF, 0xFF, 0xFF, 0x01].as_slice());
        assert!(VarInt::read(&mut cursor).is_err());
    }

    #[tokio::test]
    async fn varint_read_async_matches_sync() {
        for val in [0i32, 300, -1, i32::MAX, i32::MIN] {
            let mut buf = Vec::new();
            VarInt(val).write(&mut buf).expect("write failed");

            let mut slice = buf.as_slice();
            assert_eq!(VarInt::read_async(&mut slice).await.expect("read"), val);
        }
    }
}
