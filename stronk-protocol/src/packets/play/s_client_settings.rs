use stronk_macros::{ReadFrom, ServerPacket};

/// Chat visibility requested by the client.
#[derive(ReadFrom, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ChatMode {
    /// All chat is shown.
    Enabled = 0,
    /// Only command feedback is shown.
    CommandsOnly = 1,
    /// No chat at all.
    Hidden = 2,
}

/// The player's main hand.
#[derive(ReadFrom, Clone, Copy, PartialEq, Eq, Debug)]
pub enum MainHand {
    /// Left hand.
    Left = 0,
    /// Right hand.
    Right = 1,
}

/// The client's settings, sent once after joining and again on change.
#[derive(ReadFrom, ServerPacket, Clone, Debug)]
pub struct SClientSettings {
    /// Locale, e.g. `en_US`.
    #[read(as = Prefixed(VarInt), bound = 16)]
    pub locale: String,
    /// Render distance in chunks.
    pub view_distance: i8,
    /// Chat visibility.
    pub chat_mode: ChatMode,
    /// Whether chat colors are rendered.
    pub chat_colors: bool,
    /// Bitmask of displayed skin parts.
    pub displayed_skin_parts: u8,
    /// The player's main hand.
    pub main_hand: MainHand,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet_traits::ServerPacket;
    use std::io::Cursor;
    use stronk_utils::{codec::VarInt, serial::{PrefixedWrite, WriteTo}};

    #[test]
    fn client_settings_decodes_the_335_layout() {
        let mut buf = Vec::new();
        "en_US".write_prefixed::<VarInt>(&mut buf).expect("write");
        10i8.write(&mut buf).expect("write");
        VarInt(0).write(&mut buf).expect("write");
        true.write(&mut buf).expect("write");
        0x7Fu8.write(&mut buf).expect("write");
        VarInt(1).write(&mut buf).expect("write");

        let packet =
            SClientSettings::read_packet(&mut Cursor::new(buf.as_slice())).expect("decode");
        assert_eq!(packet.locale, "en_US");
        assert_eq!(packet.view_distance, 10);
        assert_eq!(packet.chat_mode, ChatMode::Enabled);
        assert!(packet.chat_colors);
        assert_eq!(packet.displayed_skin_parts, 0x7F);
        assert_eq!(packet.main_hand, MainHand::Right);
    }
}
