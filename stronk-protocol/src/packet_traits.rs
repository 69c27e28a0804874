//! Packet traits and frame encoding.
use std::{
    io::{Cursor, Write},
    num::NonZeroU32,
    sync::Arc,
};

use flate2::{Compression, write::ZlibEncoder};
use serde::Deserialize;
use stronk_utils::{
    FrontVec,
    codec::VarInt,
    serial::{ReadFrom, WriteTo},
};

use crate::utils::{ConnectionProtocol, MAX_PACKET_DATA_SIZE, MAX_PACKET_SIZE, PacketError};

/// A trait for packets sent from the client to the server.
pub trait ServerPacket: ReadFrom {
    /// Reads a packet body from the given data.
    ///
    /// # Errors
    /// - If the payload is malformed.
    fn read_packet(data: &mut Cursor<&[u8]>) -> Result<Self, PacketError> {
        Self::read(data).map_err(PacketError::from)
    }
}

/// A trait for packets sent from the server to the client.
pub trait ClientPacket: WriteTo {
    /// Writes the packet id and body to the given writer.
    ///
    /// # Errors
    /// - If the packet fails to write.
    /// - If the packet does not exist in the given protocol state.
    fn write_packet(
        &self,
        writer: &mut impl Write,
        protocol: ConnectionProtocol,
    ) -> Result<(), PacketError> {
        let packet_id = self
            .get_id(protocol)
            .ok_or(PacketError::InvalidProtocol(format!(
                "Packet cannot be sent in state {protocol:?}"
            )))?;
        VarInt(packet_id).write(writer)?;
        self.write(writer).map_err(PacketError::from)
    }

    /// Gets the numeric id of the packet for the given protocol state.
    fn get_id(&self, protocol: ConnectionProtocol) -> Option<i32>;
}

/// Information about compression.
#[derive(Copy, Clone, Debug, Deserialize)]
pub struct CompressionInfo {
    /// The compression threshold used when compression is enabled.
    /// A `NonZeroU32` so `Option<Self>` costs nothing.
    pub threshold: NonZeroU32,
    /// A value between `1..=9`.
    /// `1` = optimize for encoding speed, `9` = optimize for size.
    pub level: i32,
}

impl Default for CompressionInfo {
    fn default() -> Self {
        Self {
            threshold: NonZeroU32::new(256).expect("256 is non-zero"),
            level: 4,
        }
    }
}

/// A fully framed clientbound packet, ready for the socket.
///
/// # Packet Encoding Format
///
/// **Without compression:**
/// ```text
/// [Length: VarInt]      Length of (Packet ID + Data)
/// [Packet ID: VarInt]
/// [Data: Byte Array]
/// ```
///
/// **With compression (size >= threshold):**
/// ```text
/// [Length: VarInt]      Length of (Data Length + compressed data)
/// [Data Length: VarInt] Uncompressed length of (Packet ID + Data)
/// [Compressed Data]     zlib compressed (Packet ID + Data)
/// ```
///
/// **With compression (size < threshold):**
/// ```text
/// [Length: VarInt]      Length of (Data Length + uncompressed data)
/// [Data Length: VarInt] 0 to indicate uncompressed
/// [Packet ID: VarInt]
/// [Data: Byte Array]
/// ```
#[derive(Clone)]
pub struct EncodedPacket {
    /// The framed bytes, shared so a packet can be fanned out cheaply.
    pub encoded_data: Arc<FrontVec>,
}

impl EncodedPacket {
    pub(crate) fn from_data_uncompressed(mut packet_data: FrontVec) -> Result<Self, PacketError> {
        let data_len = packet_data.len();
        let varint_size = VarInt::written_size(data_len as i32);

        let complete_len = varint_size + data_len;
        if complete_len > MAX_PACKET_SIZE {
            return Err(PacketError::TooLong(complete_len));
        }

        VarInt(data_len as i32).set_in_front(&mut packet_data, varint_size);

        Ok(Self {
            encoded_data: Arc::new(packet_data),
        })
    }

    pub(crate) fn from_packet_data(
        mut packet_data: FrontVec,
        compression: CompressionInfo,
    ) -> Result<Self, PacketError> {
        let data_len = packet_data.len();
        // MAX_PACKET_DATA_SIZE < i32::MAX, so the i32 casts below are fine.
        if data_len + VarInt::MAX_SIZE * 2 > MAX_PACKET_DATA_SIZE {
            Err(PacketError::TooLong(data_len))?;
        }

        if data_len >= compression.threshold.get() as usize {
            let mut buf = FrontVec::new(VarInt::MAX_SIZE * 2);
            let mut compressor =
                ZlibEncoder::new(&mut buf, Compression::new(compression.level as u32));

            compressor
                .write_all(&packet_data)
                .map_err(|e| PacketError::CompressionFailed(e.to_string()))?;
            compressor
                .finish()
                .map_err(|e| PacketError::CompressionFailed(e.to_string()))?;

            // Compressed data cannot grow past the size checks above.
            let varint_size = VarInt::written_size(data_len as i32);
            let full_len = varint_size + buf.len();
            let full_varint_size = VarInt::written_size(full_len as i32);

            VarInt(data_len as i32).set_in_front(&mut buf, varint_size);
            VarInt(full_len as i32).set_in_front(&mut buf, full_varint_size);
            log::trace!(
                "data length: {data_len}, full length: {full_len}, varint size: {varint_size}, full varint size: {full_varint_size}"
            );

            Ok(Self {
                encoded_data: Arc::new(buf),
            })
        } else {
            // Below the threshold: a zero data-length sentinel, then the
            // literal packet id + body.
            let data_len_with_header = data_len + 1;
            let varint_size = VarInt::written_size(data_len_with_header as i32);

            VarInt(0).set_in_front(&mut packet_data, 1);
            VarInt(data_len_with_header as i32).set_in_front(&mut packet_data, varint_size);

            Ok(Self {
                encoded_data: Arc::new(packet_data),
            })
        }
    }

    /// Creates a new `EncodedPacket` from a bare packet.
    ///
    /// # Errors
    /// - If the packet fails to write.
    /// - If the packet fails to compress.
    pub fn from_bare<P: ClientPacket>(
        packet: P,
        compression: Option<CompressionInfo>,
        protocol: ConnectionProtocol,
    ) -> Result<Self, PacketError> {
        let buf = Self::write_vec(packet, protocol)?;
        Self::from_data(buf, compression)
    }

    fn write_vec<P: ClientPacket>(
        packet: P,
        protocol: ConnectionProtocol,
    ) -> Result<FrontVec, PacketError> {
        let mut buf = FrontVec::new(VarInt::MAX_SIZE + 1);
        packet.write_packet(&mut buf, protocol)?;
        Ok(buf)
    }

    fn from_data(buf: FrontVec, compression: Option<CompressionInfo>) -> Result<Self, PacketError> {
        if let Some(compression) = compression {
            Self::from_packet_data(buf, compression)
        } else {
            Self::from_data_uncompressed(buf)
        }
    }
}
