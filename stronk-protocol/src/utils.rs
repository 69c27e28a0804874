//! Shared protocol types: connection states, raw packets, errors and the
//! CFB8 stream cipher wrappers.
#![allow(deprecated)]

use std::{
    io,
    pin::Pin,
    task::{Context, Poll},
};

use aes::cipher::{Array, BlockModeDecrypt, BlockModeEncrypt, BlockSizeUser};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

/// An AES-128 CFB-8 encryptor.
pub type Aes128Cfb8Enc = cfb8::Encryptor<aes::Aes128>;
/// An AES-128 CFB-8 decryptor.
pub type Aes128Cfb8Dec = cfb8::Decryptor<aes::Aes128>;

/// The maximum size of a framed packet.
pub const MAX_PACKET_SIZE: usize = 2_097_152;
/// The maximum uncompressed size of a packet's data.
pub const MAX_PACKET_DATA_SIZE: usize = 8_388_608;

/// The protocol version this server speaks (game version 1.12).
pub const PROTOCOL_VERSION: i32 = 335;

/// Describes the set of packets a connection understands at a given point.
///
/// A connection always starts out in [`ConnectionProtocol::Handshake`], in
/// which the client announces the state it wants to move to. The server then
/// switches to [`ConnectionProtocol::Status`] for a server-list ping, or to
/// [`ConnectionProtocol::Login`]; a successful login moves the connection to
/// [`ConnectionProtocol::Play`] for the rest of its life. There are no
/// transitions backwards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ConnectionProtocol {
    /// The initial state; the client tells the server where it wants to go.
    Handshake,
    /// The server-list ping state.
    Status,
    /// Authentication and session establishment.
    Login,
    /// The in-game state; every packet after a completed login lives here.
    Play,
}

/// A raw packet: the numeric id and the undecoded payload bytes.
#[derive(Debug)]
pub struct RawPacket {
    /// The ID of the packet.
    pub id: i32,
    /// The payload following the packet id.
    pub payload: Vec<u8>,
}

/// An error that can occur when handling packets.
#[derive(Error, Debug)]
pub enum PacketError {
    #[error("packet length {0} exceeds maximum length")]
    /// The packet length exceeds the maximum length.
    TooLong(usize),
    #[error("packet length is out of bounds")]
    /// The packet length is out of bounds.
    OutOfBounds,
    #[error("malformed packet value: {0}")]
    /// A value in the packet is malformed.
    MalformedValue(String),
    #[error("failed to decompress packet: {0}")]
    /// Failed to decompress the packet.
    DecompressionFailed(String),
    #[error("failed to compress packet: {0}")]
    /// Failed to compress the packet.
    CompressionFailed(String),
    #[error("packet is uncompressed but greater than the threshold")]
    /// The packet is uncompressed but greater than the threshold.
    NotCompressed,
    #[error("the connection has closed")]
    /// The connection has closed.
    ConnectionClosed,
    #[error("{0}")]
    /// An error occurred when sending a packet.
    SendError(String),
    #[error("invalid packet id {id} in state {state:?}")]
    /// A packet id that does not exist in the current state.
    InvalidPacket {
        /// The offending id.
        id: i32,
        /// The state the connection was in.
        state: ConnectionProtocol,
    },
    #[error("invalid protocol: {0}")]
    /// The packet cannot be encoded for the current state.
    InvalidProtocol(String),
}

impl From<io::Error> for PacketError {
    fn from(value: io::Error) -> Self {
        Self::MalformedValue(value.to_string())
    }
}

/// NOTE: this makes lots of small writes; make sure there is a buffer
/// somewhere down the line.
pub struct EncryptionWriter<W: AsyncWrite + Unpin> {
    cipher: Option<Aes128Cfb8Enc>,
    write: W,
    last_unwritten_encrypted_byte: Option<u8>,
}

impl<W: AsyncWrite + Unpin> EncryptionWriter<W> {
    /// Creates a new `EncryptionWriter` in pass-through mode.
    pub fn new(stream: W) -> Self {
        debug_assert_eq!(Aes128Cfb8Enc::block_size(), 1);
        Self {
            cipher: None,
            write: stream,
            last_unwritten_encrypted_byte: None,
        }
    }

    /// Enables encryption. A connection cannot go back to plaintext.
    ///
    /// # Panics
    /// - If the writer is already encrypting.
    pub fn upgrade(&mut self, cipher: Aes128Cfb8Enc) {
        assert!(
            self.cipher.is_none(),
            "Cannot upgrade a stream that already has a cipher!"
        );
        self.cipher = Some(cipher);
    }
}

impl<W: AsyncWrite + Unpin> AsyncWrite for EncryptionWriter<W> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let ref_self = self.get_mut();

        let Some(cipher) = ref_self.cipher.as_mut() else {
            let write = Pin::new(&mut ref_self.write);
            return write.poll_write(cx, buf);
        };

        let mut total_written = 0;
        // The block size is one byte, so chunking is always safe.
        for block in buf.chunks(Aes128Cfb8Enc::block_size()) {
            let mut out = [0u8];

            if let Some(out_to_use) = ref_self.last_unwritten_encrypted_byte {
                // The caller retries with the same byte stream after Pending,
                // which is an invariant of the TCP stream anyway; the cipher
                // must not be advanced twice for it.
                out[0] = out_to_use;
            } else {
                let out_block = Array::from_mut_slice(&mut out);
                cipher.encrypt_block_b2b(Array::from_slice(block), out_block);
            }

            let write = Pin::new(&mut ref_self.write);
            match write.poll_write(cx, &out) {
                Poll::Pending => {
                    ref_self.last_unwritten_encrypted_byte = Some(out[0]);
                    if total_written == 0 {
                        return Poll::Pending;
                    }
                    return Poll::Ready(Ok(total_written));
                }
                Poll::Ready(result) => {
                    ref_self.last_unwritten_encrypted_byte = None;
                    match result {
                        Ok(written) => total_written += written,
                        Err(err) => return Poll::Ready(Err(err)),
                    }
                }
            }
        }

        Poll::Ready(Ok(total_written))
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let ref_self = self.get_mut();
        let write = Pin::new(&mut ref_self.write);
        write.poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let ref_self = self.get_mut();
        let write = Pin::new(&mut ref_self.write);
        write.poll_shutdown(cx)
    }
}

/// A reader that transparently decrypts once a cipher is installed.
pub struct DecryptionReader<R: AsyncRead + Unpin> {
    cipher: Option<Aes128Cfb8Dec>,
    read: R,
}

impl<R: AsyncRead + Unpin> DecryptionReader<R> {
    /// Creates a new `DecryptionReader` in pass-through mode.
    pub fn new(stream: R) -> Self {
        Self {
            cipher: None,
            read: stream,
        }
    }

    /// Enables decryption. A connection cannot go back to plaintext.
    ///
    /// # Panics
    /// - If the reader is already decrypting.
    pub fn upgrade(&mut self, cipher: Aes128Cfb8Dec) {
        assert!(
            self.cipher.is_none(),
            "Cannot upgrade a stream that already has a cipher!"
        );
        self.cipher = Some(cipher);
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for DecryptionReader<R> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let ref_self = self.get_mut();
        let read = Pin::new(&mut ref_self.read);

        let original_fill = buf.filled().len();
        let internal_poll = read.poll_read(cx, buf);

        if matches!(internal_poll, Poll::Ready(Ok(())))
            && let Some(cipher) = ref_self.cipher.as_mut()
        {
            // Decrypt in place; the block size is one byte.
            for block in buf.filled_mut()[original_fill..].chunks_mut(Aes128Cfb8Dec::block_size()) {
                cipher.decrypt_block(Array::from_mut_slice(block));
            }
        }

        internal_poll
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aes::cipher::KeyIvInit;

    #[test]
    fn cfb8_symmetry_preserves_length_and_content() {
        let key = [0x42u8; 16];
        let plaintext = b"stateful keystream across the whole connection".to_vec();

        let mut encrypted = plaintext.clone();
        let mut enc = Aes128Cfb8Enc::new_from_slices(&key, &key).expect("cipher init");
        for block in encrypted.chunks_mut(1) {
            enc.encrypt_block(Array::from_mut_slice(block));
        }

        assert_eq!(encrypted.len(), plaintext.len());
        assert_ne!(encrypted, plaintext);

        let mut decrypted = encrypted;
        let mut dec = Aes128Cfb8Dec::new_from_slices(&key, &key).expect("cipher init");
        for block in decrypted.chunks_mut(1) {
            dec.decrypt_block(Array::from_mut_slice(block));
        }

        assert_eq!(decrypted, plaintext);
    }
}
