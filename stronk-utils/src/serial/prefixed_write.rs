#![allow(missing_docs)]
use std::io::{Error, Result, Write};

use crate::serial::{PrefixedWrite, WriteTo};

impl PrefixedWrite for str {
    fn write_prefixed_bound<P: TryFrom<usize> + WriteTo>(
        &self,
        writer: &mut impl Write,
        bound: usize,
    ) -> Result<()> {
        if self.len() > bound {
            Err(Error::other("String too long"))?;
        }

        let len: P = self
            .len()
            .try_into()
            .map_err(|_| Error::other("Length does not fit the prefix"))?;
        len.write(writer)?;

        writer.write_all(self.as_bytes())
    }
}

impl PrefixedWrite for String {
    fn write_prefixed_bound<P: TryFrom<usize> + WriteTo>(
        &self,
        writer: &mut impl Write,
        bound: usize,
    ) -> Result<()> {
        self.as_str().write_prefixed_bound::<P>(writer, bound)
    }
}

impl<T: WriteTo> PrefixedWrite for [T] {
    fn write_prefixed_bound<P: TryFrom<usize> + WriteTo>(
        &self,
        writer: &mut impl Write,
        bound: usize,
    ) -> Result<()> {
        if self.len() > bound {
            Err(Error::other("Sequence too long"))?;
        }

        let len: P = self
            .len()
            .try_into()
            .map_err(|_| Error::other("Length does not fit the prefix"))?;
        len.write(writer)?;

        for item in self {
            item.write(writer)?;
        }

        Ok(())
    }
}

impl<T: WriteTo> PrefixedWrite for Vec<T> {
    fn write_prefixed_bound<P: TryFrom<usize> + WriteTo>(
        &self,
        writer: &mut impl Write,
        bound: usize,
    ) -> Result<()> {
        self.as_slice().write_prefixed_bound::<P>(writer, bound)
    }
}

impl<T: WriteTo, const N: usize> PrefixedWrite for [T; N] {
    fn write_prefixed_bound<P: TryFrom<usize> + WriteTo>(
        &self,
        writer: &mut impl Write,
        bound: usize,
    ) -> Result<()> {
        self.as_slice().write_prefixed_bound::<P>(writer, bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{codec::VarInt, serial::PrefixedRead};
    use std::io::Cursor;

    #[test]
    fn string_round_trip() {
        let mut buf = Vec::new();
        "localhost"
            .write_prefixed::<VarInt>(&mut buf)
            .expect("write failed");
        assert_eq!(buf[0], 9);

        let mut cursor = Cursor::new(buf.as_slice());
        let back = String::read_prefixed::<VarInt>(&mut cursor).expect("read failed");
        assert_eq!(back, "localhost");
    }

    #[test]
    fn string_bound_is_enforced_both_ways() {
        let mut buf = Vec::new();
        assert!("toolong".write_prefixed_bound::<VarInt>(&mut buf, 3).is_err());

        let mut buf = Vec::new();
        "toolong"
            .write_prefixed::<VarInt>(&mut buf)
            .expect("write failed");
        let mut cursor = Cursor::new(buf.as_slice());
        assert!(String::read_prefixed_bound::<VarInt>(&mut cursor, 3).is_err());
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let buf = [2u8, 0xFF, 0xFE];
        let mut cursor = Cursor::new(buf.as_slice());
        assert!(String::read_prefixed::<VarInt>(&mut cursor).is_err());
    }
}
