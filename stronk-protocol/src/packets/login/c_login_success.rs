use stronk_macros::{ClientPacket, WriteTo};
use uuid::Uuid;

use crate::ids::login::C_LOGIN_SUCCESS;

/// Completes the login. In this protocol version the UUID travels as a
/// hyphenated string, not as raw bytes.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Login = C_LOGIN_SUCCESS)]
pub struct CLoginSuccess {
    /// The player's UUID, e.g. `069a79f4-44e9-4726-a5be-fca90e38aaf5`.
    #[write(as = Prefixed(VarInt), bound = 36)]
    pub uuid: String,
    /// The player's name.
    #[write(as = Prefixed(VarInt), bound = 16)]
    pub username: String,
}

impl CLoginSuccess {
    /// Creates a new `CLoginSuccess`.
    #[must_use]
    pub fn new(uuid: Uuid, username: impl Into<String>) -> Self {
        Self {
            uuid: uuid.hyphenated().to_string(),
            username: username.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet_traits::ClientPacket;
    use crate::utils::ConnectionProtocol;

    #[test]
    fn login_success_carries_hyphenated_uuid() {
        let uuid = Uuid::parse_str("069a79f444e94726a5befca90e38aaf5").expect("uuid");
        let packet = CLoginSuccess::new(uuid, "Notch");

        let mut buf = Vec::new();
        packet
            .write_packet(&mut buf, ConnectionProtocol::Login)
            .expect("write failed");

        assert_eq!(buf[0], 0x02);
        assert_eq!(buf[1], 36);
        assert_eq!(
            &buf[2..38],
            "069a79f4-44e9-4726-a5be-fca90e38aaf5".as_bytes()
        );
        assert_eq!(buf[38], 5);
        assert_eq!(&buf[39..], b"Notch");
    }
}
