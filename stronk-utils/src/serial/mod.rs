//! Traits for serializing and deserializing wire data.
use std::io::{Read, Result, Write};

/// Length-prefixed reads.
pub mod prefixed_read;
/// Length-prefixed writes.
pub mod prefixed_write;
/// Plain reads.
pub mod read;
/// Plain writes.
pub mod write;

/// The protocol-wide upper bound on prefixed lengths, in bytes.
const DEFAULT_BOUND: usize = i16::MAX as _;

/// A trait for reading data from a reader.
pub trait ReadFrom: Sized {
    /// Reads data from a reader.
    ///
    /// # Errors
    /// - If the underlying reader fails or the data is malformed.
    fn read(data: &mut impl Read) -> Result<Self>;
}

/// A trait for writing data to a writer.
pub trait WriteTo {
    /// Writes data to a writer.
    ///
    /// # Errors
    /// - If the underlying writer fails.
    fn write(&self, writer: &mut impl Write) -> Result<()>;
}

/// A trait for reading length-prefixed data.
pub trait PrefixedRead: Sized {
    /// Reads prefixed data with an explicit length bound.
    ///
    /// # Errors
    /// - If the prefix is invalid or the length exceeds `bound`.
    fn read_prefixed_bound<P: TryInto<usize> + ReadFrom>(
        data: &mut impl Read,
        bound: usize,
    ) -> Result<Self>;

    /// Reads prefixed data with the default bound.
    ///
    /// # Errors
    /// - If the prefix is invalid or the length exceeds the default bound.
    fn read_prefixed<P: TryInto<usize> + ReadFrom>(data: &mut impl Read) -> Result<Self> {
        Self::read_prefixed_bound::<P>(data, DEFAULT_BOUND)
    }
}

/// A trait for writing length-prefixed data.
pub trait PrefixedWrite {
    /// Writes prefixed data with an explicit length bound.
    ///
    /// # Errors
    /// - If the length exceeds `bound` or the writer fails.
    fn write_prefixed_bound<P: TryFrom<usize> + WriteTo>(
        &self,
        writer: &mut impl Write,
        bound: usize,
    ) -> Result<()>;

    /// Writes prefixed data with the default bound.
    ///
    /// # Errors
    /// - If the length exceeds the default bound or the writer fails.
    fn write_prefixed<P: TryFrom<usize> + WriteTo>(&self, writer: &mut impl Write) -> Result<()> {
        self.write_prefixed_bound::<P>(writer, DEFAULT_BOUND)
    }
}
