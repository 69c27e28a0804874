use std::io::Read;

use stronk_macros::{ReadFrom, ServerPacket};
use stronk_utils::serial::ReadFrom;

/// A plugin message from the client, e.g. the `MC|BRAND` client brand.
#[derive(ReadFrom, ServerPacket, Clone, Debug)]
pub struct SPluginMessage {
    /// The channel name.
    #[read(as = Prefixed(VarInt), bound = 20)]
    pub channel: String,
    /// The raw bytes after the channel; the frame length delimits them.
    pub payload: Payload,
}

/// The unframed tail of a plugin message.
#[derive(Clone, Debug)]
pub struct Payload(pub Vec<u8>);

impl ReadFrom for Payload {
    fn read(data: &mut impl Read) -> Result<Self, std::io::Error> {
        let mut buf = vec![];
        data.read_to_end(&mut buf)?;
        Ok(Self(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet_traits::ServerPacket;
    use std::io::Cursor;
    use stronk_utils::{codec::VarInt, serial::PrefixedWrite};

    #[test]
    fn plugin_message_payload_is_the_rest_of_the_packet() {
        let mut buf = Vec::new();
        "MC|BRAND".write_prefixed::<VarInt>(&mut buf).expect("write");
        // A VarInt-prefixed string inside the payload, as the brand is.
        "vanilla".write_prefixed::<VarInt>(&mut buf).expect("write");

        let packet =
            SPluginMessage::read_packet(&mut Cursor::new(buf.as_slice())).expect("decode");
        assert_eq!(packet.channel, "MC|BRAND");
        assert_eq!(packet.payload.0.len(), 8);
        assert_eq!(&packet.payload.0[1..], b"vanilla");
    }
}
