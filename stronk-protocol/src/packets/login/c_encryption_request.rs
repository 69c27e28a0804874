use stronk_macros::{ClientPacket, WriteTo};

use crate::ids::login::C_ENCRYPTION_REQUEST;

/// The encryption challenge issued on Login Start.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Login = C_ENCRYPTION_REQUEST)]
pub struct CEncryptionRequest {
    /// Historical field; always empty for this protocol version.
    #[write(as = Prefixed(VarInt), bound = 20)]
    pub server_id: String,
    /// The server's RSA public key, DER-encoded SubjectPublicKeyInfo.
    #[write(as = Prefixed(VarInt))]
    pub public_key: Vec<u8>,
    /// A fresh 16 byte nonce the client must return RSA-encrypted.
    #[write(as = Prefixed(VarInt))]
    pub verify_token: Vec<u8>,
}

impl CEncryptionRequest {
    /// Creates a new `CEncryptionRequest` with an empty server id.
    #[must_use]
    pub fn new(public_key: Vec<u8>, verify_token: Vec<u8>) -> Self {
        Self {
            server_id: String::new(),
            public_key,
            verify_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet_traits::ClientPacket;
    use crate::utils::ConnectionProtocol;

    #[test]
    fn encryption_request_wire_layout() {
        let packet = CEncryptionRequest::new(vec![0xAA, 0xBB], vec![1, 2, 3, 4]);

        let mut buf = Vec::new();
        packet
            .write_packet(&mut buf, ConnectionProtocol::Login)
            .expect("write failed");

        assert_eq!(
            buf,
            [
                0x01, // packet id
                0x00, // empty server id
                0x02, 0xAA, 0xBB, // public key
                0x04, 1, 2, 3, 4, // verify token
            ]
        );
    }

    #[test]
    fn encryption_request_only_exists_in_login() {
        let packet = CEncryptionRequest::new(vec![], vec![]);
        assert_eq!(packet.get_id(ConnectionProtocol::Login), Some(0x01));
        assert_eq!(packet.get_id(ConnectionProtocol::Play), None);
    }
}
