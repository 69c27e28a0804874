//! The single handshake packet.

use stronk_macros::{ReadFrom, ServerPacket};

/// The state the client asks to move to after the handshake.
#[derive(ReadFrom, Clone, Copy, PartialEq, Eq, Debug)]
pub enum NextState {
    /// A server-list ping follows.
    Status = 1,
    /// A login attempt follows.
    Login = 2,
}

/// The first packet of every connection.
#[derive(ReadFrom, ServerPacket, Clone, Debug)]
pub struct SHandshake {
    /// The protocol version the client speaks.
    #[read(as = VarInt)]
    pub protocol_version: i32,
    /// The hostname the client used to reach the server.
    #[read(as = Prefixed(VarInt), bound = 255)]
    pub server_address: String,
    /// The port the client used to reach the server.
    pub server_port: u16,
    /// The state to continue in.
    pub next_state: NextState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet_traits::ServerPacket;
    use std::io::Cursor;
    use stronk_utils::{codec::VarInt, serial::{PrefixedWrite, WriteTo}};

    #[test]
    fn handshake_decodes_every_field() {
        let mut buf = Vec::new();
        VarInt(335).write(&mut buf).expect("write");
        "localhost".write_prefixed::<VarInt>(&mut buf).expect("write");
        25565u16.write(&mut buf).expect("write");
        VarInt(1).write(&mut buf).expect("write");

        let packet =
            SHandshake::read_packet(&mut Cursor::new(buf.as_slice())).expect("decode failed");
        assert_eq!(packet.protocol_version, 335);
        assert_eq!(packet.server_address, "localhost");
        assert_eq!(packet.server_port, 25565);
        assert_eq!(packet.next_state, NextState::Status);
    }

    #[test]
    fn handshake_rejects_unknown_next_state() {
        let mut buf = Vec::new();
        VarInt(335).write(&mut buf).expect("write");
        "localhost".write_prefixed::<VarInt>(&mut buf).expect("write");
        25565u16.write(&mut buf).expect("write");
        VarInt(3).write(&mut buf).expect("write");

        assert!(SHandshake::read_packet(&mut Cursor::new(buf.as_slice())).is_err());
    }
}
