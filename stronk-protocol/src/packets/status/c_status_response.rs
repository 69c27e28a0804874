use serde::Serialize;
use stronk_macros::{ClientPacket, WriteTo};
use stronk_utils::text::TextComponent;

use crate::ids::status::C_STATUS_RESPONSE;

/// A player entry in the status sample.
#[derive(Serialize, Clone, Debug)]
pub struct Sample {
    /// The player's name.
    pub name: String,
    /// The player's UUID.
    pub id: String,
}

/// The player counts block of the status document.
#[derive(Clone, Debug, Serialize)]
pub struct Players {
    /// Maximum player count.
    pub max: i32,
    /// Current player count.
    pub online: i32,
    /// A sample of online players.
    pub sample: Vec<Sample>,
}

/// The version block of the status document.
#[derive(Clone, Debug, Serialize)]
pub struct Version {
    /// Human readable game version.
    pub name: &'static str,
    /// Protocol version.
    pub protocol: i32,
}

/// The status document sent in response to a status request.
#[derive(Clone, Debug, Serialize)]
pub struct Status {
    /// The message of the day.
    pub description: TextComponent,
    /// Player counts.
    pub players: Players,
    /// Version information.
    pub version: Version,
    /// Optional `data:image/png;base64,` favicon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

/// The status response; the document is serialized as a JSON string.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Status = C_STATUS_RESPONSE)]
pub struct CStatusResponse {
    #[write(as = Json)]
    status: Status,
}

impl CStatusResponse {
    /// Creates a new `CStatusResponse`.
    #[must_use]
    pub fn new(status: Status) -> Self {
        Self { status }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet_traits::ClientPacket;
    use crate::utils::ConnectionProtocol;
    use std::io::Cursor;
    use stronk_utils::{codec::VarInt, serial::{PrefixedRead, ReadFrom}};

    #[test]
    fn status_response_is_a_json_string_on_the_wire() {
        let packet = CStatusResponse::new(Status {
            description: TextComponent::new("A Stronk server"),
            players: Players {
                max: 255,
                online: 0,
                sample: vec![],
            },
            version: Version {
                name: "1.12",
                protocol: 335,
            },
            favicon: None,
        });

        let mut buf = Vec::new();
        packet
            .write_packet(&mut buf, ConnectionProtocol::Status)
            .expect("write failed");

        let mut cursor = Cursor::new(buf.as_slice());
        assert_eq!(VarInt::read(&mut cursor).expect("id").0, C_STATUS_RESPONSE);

        let json = String::read_prefixed::<VarInt>(&mut cursor).expect("string");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(value["version"]["protocol"], 335);
        assert_eq!(value["description"]["text"], "A Stronk server");
        assert_eq!(value["players"]["max"], 255);
    }
}
