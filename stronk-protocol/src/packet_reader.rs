//! Decoding of the inbound byte stream into raw packets.

use std::{
    io::{self, Read},
    num::NonZeroU32,
};

use aes::cipher::KeyIvInit;
use flate2::read::ZlibDecoder;
use stronk_utils::codec::VarInt;
use stronk_utils::serial::ReadFrom;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::utils::{
    Aes128Cfb8Dec, DecryptionReader, MAX_PACKET_DATA_SIZE, MAX_PACKET_SIZE, PacketError, RawPacket,
};

/// Decoder: Client -> Server
/// Supports zlib decompression and AES-128/CFB8 decryption.
pub struct TCPNetworkDecoder<R: AsyncRead + Unpin> {
    reader: DecryptionReader<R>,
    compression: Option<NonZeroU32>,
}

impl<R: AsyncRead + Unpin> TCPNetworkDecoder<R> {
    /// Creates a new `TCPNetworkDecoder`.
    pub fn new(reader: R) -> Self {
        Self {
            reader: DecryptionReader::new(reader),
            compression: None,
        }
    }

    /// Sets the compression threshold for the decoder.
    pub fn set_compression(&mut self, threshold: NonZeroU32) {
        self.compression = Some(threshold);
    }

    /// Enables decryption. A minecraft stream cannot go back to plaintext.
    ///
    /// # Panics
    /// - If the reader is already decrypting.
    /// - If the key is invalid.
    pub fn set_encryption(&mut self, key: &[u8; 16]) {
        let cipher = Aes128Cfb8Dec::new_from_slices(key, key).expect("invalid key");
        self.reader.upgrade(cipher);
    }

    /// Reads one raw packet from the stream.
    ///
    /// # Errors
    /// - If the packet length is invalid or the packet is too long.
    /// - If the packet is uncompressed but exceeds the threshold.
    /// - If the packet fails to decompress.
    pub async fn get_raw_packet(&mut self) -> Result<RawPacket, PacketError> {
        let packet_len = VarInt::read_async(&mut self.reader).await? as usize;

        if packet_len > MAX_PACKET_SIZE {
            Err(PacketError::OutOfBounds)?;
        }

        // Read the entire frame into a buffer.
        let mut packet_data = vec![0u8; packet_len];
        self.reader
            .read_exact(&mut packet_data)
            .await
            .map_err(|e| PacketError::MalformedValue(e.to_string()))?;

        let mut cursor = io::Cursor::new(packet_data);

        let decompressed_data = if let Some(threshold) = self.compression {
            let decompressed_len = VarInt::read(&mut cursor)?.0 as usize;
            let raw_packet_len = packet_len - VarInt::written_size(decompressed_len as i32);

            if decompressed_len > MAX_PACKET_DATA_SIZE {
                Err(PacketError::TooLong(decompressed_len))?;
            }

            if decompressed_len > 0 {
                let mut decompressed = Vec::with_capacity(decompressed_len);
                ZlibDecoder::new(&mut cursor)
                    .take(decompressed_len as u64 + 1)
                    .read_to_end(&mut decompressed)
                    .map_err(|e| PacketError::DecompressionFailed(e.to_string()))?;

                if decompressed.len() != decompressed_len {
                    Err(PacketError::DecompressionFailed(format!(
                        "expected {decompressed_len} bytes, got {}",
                        decompressed.len()
                    )))?;
                }
                decompressed
            } else {
                // Validate that the peer did not skip compressing an
                // over-threshold packet.
                if raw_packet_len > threshold.get() as usize {
                    Err(PacketError::NotCompressed)?;
                }

                let pos = cursor.position() as usize;
                cursor.into_inner()[pos..].to_vec()
            }
        } else {
            cursor.into_inner()
        };

        // Split the packet id from the payload.
        let mut cursor = io::Cursor::new(decompressed_data);
        let packet_id = VarInt::read(&mut cursor)?.0;
        let pos = cursor.position() as usize;
        let payload = cursor.into_inner()[pos..].to_vec();

        Ok(RawPacket {
            id: packet_id,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet_traits::{CompressionInfo, EncodedPacket};
    use crate::packets::status::CPongResponse;
    use crate::utils::{Aes128Cfb8Enc, ConnectionProtocol};
    use aes::cipher::BlockModeEncrypt;
    use stronk_utils::serial::WriteTo;
    use tokio::io::AsyncWriteExt;

    fn compression(threshold: u32) -> CompressionInfo {
        CompressionInfo {
            threshold: NonZeroU32::new(threshold).expect("threshold"),
            level: 4,
        }
    }

    /// Builds the framed bytes for an arbitrary id + payload through the
    /// outbound encoder, optionally encrypting them.
    fn build_frame(
        packet_id: i32,
        payload: &[u8],
        compression: Option<CompressionInfo>,
        key: Option<&[u8; 16]>,
    ) -> Vec<u8> {
        let mut body = stronk_utils::FrontVec::new(VarInt::MAX_SIZE * 2);
        VarInt(packet_id).write(&mut body).expect("write id");
        body.extend_from_slice(payload);

        let encoded = if let Some(info) = compression {
            EncodedPacket::from_packet_data(body, info).expect("encode")
        } else {
            EncodedPacket::from_data_uncompressed(body).expect("encode")
        };

        let mut bytes = encoded.encoded_data.as_slice().to_vec();
        if let Some(key) = key {
            let mut cipher = Aes128Cfb8Enc::new_from_slices(key, key).expect("cipher");
            for block in bytes.chunks_mut(1) {
                cipher.encrypt_block(aes::cipher::Array::from_mut_slice(block));
            }
        }
        bytes
    }

    #[tokio::test]
    async fn decode_without_compression_and_encryption() {
        let packet = build_frame(0x03, b"Hello", None, None);

        let mut decoder = TCPNetworkDecoder::new(packet.as_slice());
        let raw_packet = decoder.get_raw_packet().await.expect("decoding failed");

        assert_eq!(raw_packet.id, 0x03);
        assert_eq!(raw_packet.payload.as_slice(), b"Hello");
    }

    #[tokio::test]
    async fn decode_with_compression_above_threshold() {
        let payload = vec![0x41u8; 1024];
        let packet = build_frame(0x02, &payload, Some(compression(128)), None);

        let mut decoder = TCPNetworkDecoder::new(packet.as_slice());
        decoder.set_compression(NonZeroU32::new(128).expect("threshold"));

        let raw_packet = decoder.get_raw_packet().await.expect("decoding failed");
        assert_eq!(raw_packet.id, 0x02);
        assert_eq!(raw_packet.payload, payload);
    }

    #[tokio::test]
    async fn decode_with_compression_below_threshold() {
        let packet = build_frame(0x02, b"tiny", Some(compression(256)), None);
        // Zero data-length sentinel right after the frame length.
        assert_eq!(packet[1], 0x00);

        let mut decoder = TCPNetworkDecoder::new(packet.as_slice());
        decoder.set_compression(NonZeroU32::new(256).expect("threshold"));

        let raw_packet = decoder.get_raw_packet().await.expect("decoding failed");
        assert_eq!(raw_packet.id, 0x02);
        assert_eq!(raw_packet.payload.as_slice(), b"tiny");
    }

    #[tokio::test]
    async fn threshold_boundary_at_exactly_threshold_bytes() {
        // An id + body of exactly 255 bytes stays literal at threshold 256,
        // and a 256 byte one deflates.
        let below = build_frame(0x00, &vec![7u8; 254], Some(compression(256)), None);
        assert_eq!(below[1], 0x00, "255 byte packet must carry the 0 sentinel");

        let at = build_frame(0x00, &vec![7u8; 255], Some(compression(256)), None);
        // data_length == 256, varint-encoded as [0x80, 0x02].
        assert_eq!(&at[1..3], &[0x80, 0x02], "256 byte packet must be deflated");

        for (bytes, expected_len) in [(below, 254), (at, 255)] {
            let mut decoder = TCPNetworkDecoder::new(bytes.as_slice());
            decoder.set_compression(NonZeroU32::new(256).expect("threshold"));
            let raw = decoder.get_raw_packet().await.expect("decoding failed");
            assert_eq!(raw.id, 0x00);
            assert_eq!(raw.payload.len(), expected_len);
        }
    }

    #[tokio::test]
    async fn decode_with_encryption() {
        let key = [0x01u8; 16];
        let packet = build_frame(0x03, b"Hello, encrypted world!", None, Some(&key));

        let mut decoder = TCPNetworkDecoder::new(packet.as_slice());
        decoder.set_encryption(&key);

        let raw_packet = decoder.get_raw_packet().await.expect("decoding failed");
        assert_eq!(raw_packet.id, 0x03);
        assert_eq!(raw_packet.payload.as_slice(), b"Hello, encrypted world!");
    }

    #[tokio::test]
    async fn decode_with_compression_and_encryption() {
        let key = [0x2Au8; 16];
        let payload = vec![0x55u8; 4096];
        let packet = build_frame(0x04, &payload, Some(compression(256)), Some(&key));

        let mut decoder = TCPNetworkDecoder::new(packet.as_slice());
        decoder.set_compression(NonZeroU32::new(256).expect("threshold"));
        decoder.set_encryption(&key);

        let raw_packet = decoder.get_raw_packet().await.expect("decoding failed");
        assert_eq!(raw_packet.id, 0x04);
        assert_eq!(raw_packet.payload, payload);
    }

    #[tokio::test]
    async fn invalid_compressed_data_errors() {
        let mut frame = Vec::new();
        VarInt(10).write(&mut frame).expect("write");
        frame.extend_from_slice(&[0xFF, 0xFF, 0xFF]);

        let mut packet = Vec::new();
        VarInt(frame.len() as i32).write(&mut packet).expect("write");
        packet.extend_from_slice(&frame);

        let mut decoder = TCPNetworkDecoder::new(packet.as_slice());
        decoder.set_compression(NonZeroU32::new(64).expect("threshold"));

        assert!(decoder.get_raw_packet().await.is_err());
    }

    #[tokio::test]
    async fn uncompressed_above_threshold_is_rejected() {
        // Hand-build a frame that claims data_length = 0 but carries more
        // than the threshold.
        let mut frame = Vec::new();
        VarInt(0).write(&mut frame).expect("write");
        VarInt(0x0A).write(&mut frame).expect("write");
        frame.extend_from_slice(&vec![1u8; 64]);

        let mut packet = Vec::new();
        VarInt(frame.len() as i32).write(&mut packet).expect("write");
        packet.extend_from_slice(&frame);

        let mut decoder = TCPNetworkDecoder::new(packet.as_slice());
        decoder.set_compression(NonZeroU32::new(16).expect("threshold"));

        assert!(matches!(
            decoder.get_raw_packet().await,
            Err(PacketError::NotCompressed)
        ));
    }

    #[tokio::test]
    async fn two_coalesced_frames_decode_in_order() {
        let mut stream = build_frame(0x00, b"first", None, None);
        stream.extend_from_slice(&build_frame(0x01, b"second", None, None));

        let mut decoder = TCPNetworkDecoder::new(stream.as_slice());

        let first = decoder.get_raw_packet().await.expect("first");
        assert_eq!(first.id, 0x00);
        assert_eq!(first.payload.as_slice(), b"first");

        let second = decoder.get_raw_packet().await.expect("second");
        assert_eq!(second.id, 0x01);
        assert_eq!(second.payload.as_slice(), b"second");
    }

    #[tokio::test]
    async fn fragmented_frame_decodes_after_last_fragment() {
        let frame = build_frame(0x00, b"fragmented login frame", None, None);
        let (client, server) = tokio::io::duplex(64);

        let writer_frame = frame.clone();
        let writer = tokio::spawn(async move {
            let (_, mut write_half) = tokio::io::split(client);
            for chunk in writer_frame.chunks(writer_frame.len() / 3 + 1) {
                write_half.write_all(chunk).await.expect("write chunk");
                write_half.flush().await.expect("flush");
                tokio::task::yield_now().await;
            }
        });

        let (read_half, _keep_write_alive) = tokio::io::split(server);
        let mut decoder = TCPNetworkDecoder::new(read_half);

        let raw = decoder.get_raw_packet().await.expect("decode");
        assert_eq!(raw.id, 0x00);
        assert_eq!(raw.payload.as_slice(), b"fragmented login frame");

        writer.await.expect("writer task");
    }

    #[tokio::test]
    async fn encoded_clientbound_packet_round_trips() {
        let packet = EncodedPacket::from_bare(
            CPongResponse::new(0x00DE_ADBE_EFCA_FEBA),
            None,
            ConnectionProtocol::Status,
        )
        .expect("encode");

        let bytes = packet.encoded_data.as_slice().to_vec();
        let mut decoder = TCPNetworkDecoder::new(bytes.as_slice());
        let raw = decoder.get_raw_packet().await.expect("decode");

        assert_eq!(raw.id, crate::ids::status::C_PONG_RESPONSE);
        assert_eq!(raw.payload, 0x00DE_ADBE_EFCA_FEBA_i64.to_be_bytes());
    }
}
