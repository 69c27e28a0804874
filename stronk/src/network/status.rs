//! Status state handlers (server-list ping).

use stronk_protocol::packets::status::{
    CPongResponse, CStatusResponse, Players, SPingRequest, Status, Version,
};
use stronk_protocol::utils::PROTOCOL_VERSION;
use stronk_utils::text::TextComponent;

use crate::{MC_VERSION, STRONK_CONFIG, network::JavaTcpClient};

impl JavaTcpClient {
    /// Answers a status request with the server-list document.
    pub async fn handle_status_request(&self) {
        let packet = CStatusResponse::new(Status {
            description: TextComponent::new(STRONK_CONFIG.motd.clone()),
            players: Players {
                max: STRONK_CONFIG.max_players as i32,
                online: self.server.online_count(),
                sample: vec![],
            },
            version: Version {
                name: MC_VERSION,
                protocol: PROTOCOL_VERSION,
            },
            favicon: STRONK_CONFIG.load_favicon(),
        });
        self.send_bare_packet_now(packet).await;
    }

    /// Echoes a ping and ends the exchange.
    pub async fn handle_ping_request(&self, packet: SPingRequest) {
        self.send_bare_packet_now(CPongResponse::new(packet.payload))
            .await;
        self.close();
    }
}
