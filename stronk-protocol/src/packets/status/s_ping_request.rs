use stronk_macros::{ReadFrom, ServerPacket};

/// The client's ping; the payload is echoed back verbatim.
#[derive(ReadFrom, ServerPacket, Clone, Debug)]
pub struct SPingRequest {
    /// An arbitrary number, usually a client timestamp.
    pub payload: i64,
}
