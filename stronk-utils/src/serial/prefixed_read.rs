#![allow(missing_docs)]
use std::io::{Error, Read, Result};

use crate::serial::{PrefixedRead, ReadFrom};

impl PrefixedRead for String {
    fn read_prefixed_bound<P: TryInto<usize> + ReadFrom>(
        data: &mut impl Read,
        bound: usize,
    ) -> Result<Self> {
        let len: usize = P::read(data)?
            .try_into()
            .map_err(|_| Error::other("Invalid prefix"))?;

        if len > bound {
            Err(Error::other("String too long"))?;
        }

        let mut buf = vec![0; len];
        data.read_exact(&mut buf)?;
        String::from_utf8(buf).map_err(|_| Error::other("String is not valid UTF-8"))
    }
}

impl<T: ReadFrom> PrefixedRead for Vec<T> {
    fn read_prefixed_bound<P: TryInto<usize> + ReadFrom>(
        data: &mut impl Read,
        bound: usize,
    ) -> Result<Self> {
        let len: usize = P::read(data)?
            .try_into()
            .map_err(|_| Error::other("Invalid prefix"))?;

        if len > bound {
            Err(Error::other("Sequence too long"))?;
        }

        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(T::read(data)?);
        }
        Ok(items)
    }
}
