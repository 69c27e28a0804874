use stronk_macros::{ReadFrom, ServerPacket};

/// What the client requests with [`SClientStatus`].
#[derive(ReadFrom, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClientStatusAction {
    /// Respawn after death.
    PerformRespawn = 0,
    /// Open the statistics screen.
    RequestStats = 1,
    /// The inventory-opened achievement trigger.
    OpenInventory = 2,
}

/// A client status request.
#[derive(ReadFrom, ServerPacket, Clone, Debug)]
pub struct SClientStatus {
    /// The requested action.
    pub action: ClientStatusAction,
}
