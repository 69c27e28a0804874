//! Encoding of framed packets onto the outbound byte stream.

use aes::cipher::KeyIvInit;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::{
    packet_traits::EncodedPacket,
    utils::{Aes128Cfb8Enc, EncryptionWriter, PacketError},
};

/// Encoder: Server -> Client
/// Writes already-framed packets, passing every byte (length prefix
/// included) through AES-128/CFB8 once encryption is enabled.
pub struct TCPNetworkEncoder<W: AsyncWrite + Unpin> {
    writer: EncryptionWriter<W>,
}

impl<W: AsyncWrite + Unpin> TCPNetworkEncoder<W> {
    /// Creates a new `TCPNetworkEncoder`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: EncryptionWriter::new(writer),
        }
    }

    /// Enables encryption. A minecraft stream cannot go back to plaintext.
    ///
    /// # Panics
    /// - If the writer is already encrypting.
    /// - If the key is invalid.
    pub fn set_encryption(&mut self, key: &[u8; 16]) {
        let cipher = Aes128Cfb8Enc::new_from_slices(key, key).expect("invalid key");
        self.writer.upgrade(cipher);
    }

    /// Writes a framed packet and flushes the stream.
    ///
    /// # Errors
    /// - If the underlying stream fails.
    pub async fn write_packet(&mut self, packet: &EncodedPacket) -> Result<(), PacketError> {
        self.writer
            .write_all(packet.encoded_data.as_slice())
            .await
            .map_err(|e| PacketError::SendError(e.to_string()))?;
        self.writer
            .flush()
            .await
            .map_err(|e| PacketError::SendError(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet_reader::TCPNetworkDecoder;
    use crate::packet_traits::CompressionInfo;
    use crate::packets::login::CSetCompression;
    use crate::utils::ConnectionProtocol;
    use std::num::NonZeroU32;

    #[tokio::test]
    async fn encoder_and_decoder_agree_through_encryption_and_compression() {
        let key = [0x10u8; 16];
        let info = CompressionInfo {
            threshold: NonZeroU32::new(1).expect("threshold"),
            level: 6,
        };

        let packet = EncodedPacket::from_bare(
            CSetCompression::new(256),
            Some(info),
            ConnectionProtocol::Login,
        )
        .expect("encode");

        let mut wire = Vec::new();
        {
            let mut encoder = TCPNetworkEncoder::new(&mut wire);
            encoder.set_encryption(&key);
            encoder.write_packet(&packet).await.expect("write");
        }

        let mut decoder = TCPNetworkDecoder::new(wire.as_slice());
        decoder.set_compression(info.threshold);
        decoder.set_encryption(&key);

        let raw = decoder.get_raw_packet().await.expect("decode");
        assert_eq!(raw.id, crate::ids::login::C_SET_COMPRESSION);
        assert_eq!(raw.payload, [0x80, 0x02]);
    }

    #[tokio::test]
    async fn frame_round_trip_across_thresholds() {
        for threshold in [1u32, 128, 256, 1024] {
            let info = CompressionInfo {
                threshold: NonZeroU32::new(threshold).expect("threshold"),
                level: 4,
            };

            let packet = EncodedPacket::from_bare(
                crate::packets::play::CKeepAlive::new(777),
                Some(info),
                ConnectionProtocol::Play,
            )
            .expect("encode");

            let mut wire = Vec::new();
            {
                let mut encoder = TCPNetworkEncoder::new(&mut wire);
                encoder.write_packet(&packet).await.expect("write");
            }

            let mut decoder = TCPNetworkDecoder::new(wire.as_slice());
            decoder.set_compression(info.threshold);

            let raw = decoder.get_raw_packet().await.expect("decode");
            assert_eq!(raw.id, crate::ids::play::C_KEEP_ALIVE);

            let mut cursor = std::io::Cursor::new(raw.payload.as_slice());
            use stronk_utils::{codec::VarInt, serial::ReadFrom};
            assert_eq!(VarInt::read(&mut cursor).expect("varint").0, 777);
        }
    }
}
