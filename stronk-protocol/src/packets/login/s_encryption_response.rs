use stronk_macros::{ReadFrom, ServerPacket};

/// The client's answer to [`super::CEncryptionRequest`]. Both fields are
/// encrypted with the server's RSA public key.
#[derive(ReadFrom, ServerPacket, Clone, Debug)]
pub struct SEncryptionResponse {
    /// The RSA-encrypted 16 byte shared secret.
    #[read(as = Prefixed(VarInt), bound = 256)]
    pub shared_secret: Vec<u8>,
    /// The RSA-encrypted verify token.
    #[read(as = Prefixed(VarInt), bound = 256)]
    pub verify_token: Vec<u8>,
}
