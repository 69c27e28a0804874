use stronk_macros::{ClientPacket, WriteTo};

use crate::ids::status::C_PONG_RESPONSE;

/// Echo of [`super::SPingRequest`].
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Status = C_PONG_RESPONSE)]
pub struct CPongResponse {
    /// The payload from the ping, unchanged.
    pub payload: i64,
}

impl CPongResponse {
    /// Creates a new `CPongResponse`.
    #[must_use]
    pub fn new(payload: i64) -> Self {
        Self { payload }
    }
}
