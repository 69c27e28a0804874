#![allow(missing_docs)]
use std::io::{Read, Result};

use uuid::Uuid;

use crate::serial::ReadFrom;

impl ReadFrom for bool {
    fn read(data: &mut impl Read) -> Result<Self> {
        let byte = u8::read(data)?;
        Ok(byte == 1)
    }
}

macro_rules! read_be {
    ($($ty:ty),*) => {
        $(impl ReadFrom for $ty {
            fn read(data: &mut impl Read) -> Result<Self> {
                let mut buf = [0; size_of::<Self>()];
                data.read_exact(&mut buf)?;
                Ok(Self::from_be_bytes(buf))
            }
        })*
    };
}

read_be!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl<T: ReadFrom> ReadFrom for Option<T> {
    fn read(data: &mut impl Read) -> Result<Self> {
        if bool::read(data)? {
            Ok(Some(T::read(data)?))
        } else {
            Ok(None)
        }
    }
}

impl ReadFrom for Uuid {
    fn read(data: &mut impl Read) -> Result<Self> {
        let most_significant_bits = u64::read(data)?;
        let least_significant_bits = u64::read(data)?;

        Ok(Uuid::from_u64_pair(
            most_significant_bits,
            least_significant_bits,
        ))
    }
}
