//! Login state handlers: the encryption handshake, session verification and
//! the transition into play state.

use std::sync::Arc;

use rsa::Pkcs1v15Encrypt;
use sha2::{Digest, Sha256};
use stronk_crypto::{SHARED_SECRET_BYTES, VERIFY_TOKEN_BYTES, server_id_hash};
use stronk_protocol::packets::login::{
    CEncryptionRequest, CLoginSuccess, CSetCompression, SEncryptionResponse, SLoginStart,
};
use stronk_protocol::packets::play::{
    CJoinGame, CPlayerAbilities, CPluginMessage, CSpawnPosition, Dimension, Gamemode,
};
use stronk_protocol::utils::ConnectionProtocol;
use stronk_utils::codec::VarInt;
use stronk_utils::serial::PrefixedWrite;
use stronk_utils::text::TextComponent;
use uuid::Uuid;

use crate::network::mojang_authentication::{AuthError, mojang_authenticate};
use crate::network::{ConnectionUpdate, JavaTcpClient};
use crate::player::{GameProfile, JavaConnection, Player};
use crate::{SERVER_BRAND, STRONK_CONFIG};

/// Checks if a player name is valid: 3 to 16 characters, ASCII
/// alphanumerics and underscores only.
#[must_use]
pub fn is_valid_player_name(name: &str) -> bool {
    (3..=16).contains(&name.len()) && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Derives the deterministic UUID used when the session service is not
/// consulted.
#[must_use]
pub fn offline_uuid(username: &str) -> Uuid {
    let digest = Sha256::digest(username);
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    Uuid::from_bytes(bytes)
}

impl JavaTcpClient {
    /// Handles Login Start: validates the name, and either issues the
    /// encryption challenge or (with encryption off) completes the login
    /// right away.
    pub async fn handle_login_start(&self, packet: SLoginStart) {
        if !is_valid_player_name(&packet.name) {
            self.kick(TextComponent::new("Invalid player name")).await;
            return;
        }

        if self.server.online_count() >= STRONK_CONFIG.max_players as i32 {
            self.kick(TextComponent::new("The server is full!")).await;
            return;
        }

        let profile = GameProfile {
            // Replaced by the session service's id in online mode.
            id: offline_uuid(&packet.name),
            name: packet.name,
            properties: vec![],
        };

        if STRONK_CONFIG.encryption {
            let verify_token: [u8; VERIFY_TOKEN_BYTES] = rand::random();
            self.verify_token.store(verify_token);

            *self.gameprofile.lock().await = Some(profile);

            self.send_bare_packet_now(CEncryptionRequest::new(
                self.server.key_store.public_key_der.to_vec(),
                verify_token.to_vec(),
            ))
            .await;
        } else {
            self.finish_login(profile).await;
        }
    }

    /// Handles the Encryption Response: checks the verify token, installs
    /// the cipher, verifies the session, and completes the login.
    pub async fn handle_encryption_response(&self, packet: SEncryptionResponse) {
        let fatal = TextComponent::new("A fatal error occurred whilst logging in.");

        let Ok(echoed_token) = self
            .server
            .key_store
            .private_key
            .decrypt(Pkcs1v15Encrypt, &packet.verify_token)
        else {
            self.kick(fatal).await;
            return;
        };

        if echoed_token != self.verify_token.load() {
            log::info!("Client {} returned a wrong verify token", self.id);
            self.kick(fatal).await;
            return;
        }

        let Ok(shared_secret) = self
            .server
            .key_store
            .private_key
            .decrypt(Pkcs1v15Encrypt, &packet.shared_secret)
        else {
            self.kick(fatal).await;
            return;
        };

        let shared_secret: [u8; SHARED_SECRET_BYTES] = match shared_secret.try_into() {
            Ok(secret) => secret,
            Err(_) => {
                self.kick(fatal).await;
                return;
            }
        };

        // Register for the signal before sending the update, so a fast
        // writer task cannot notify into the void.
        let mut writer_encrypted = std::pin::pin!(self.connection_updated.notified());
        writer_encrypted.as_mut().enable();

        if self
            .connection_updates
            .send(ConnectionUpdate::EnableEncryption(shared_secret))
            .is_err()
        {
            self.kick(fatal).await;
            return;
        }

        // The writer task signals once its cipher is installed; everything
        // sent from here on is encrypted.
        writer_encrypted.await;

        let Some(mut profile) = self.gameprofile.lock().await.take() else {
            self.kick(fatal).await;
            return;
        };

        if STRONK_CONFIG.online_mode {
            let server_hash = server_id_hash(
                "",
                &shared_secret,
                &self.server.key_store.public_key_der,
            );

            match mojang_authenticate(&profile.name, &server_hash).await {
                Ok(verified) => profile = verified,
                Err(error) => {
                    log::info!("Session verification failed for client {}: {error}", self.id);
                    let reason = match error {
                        AuthError::UnverifiedUsername => {
                            TextComponent::new("Failed to verify username!")
                        }
                        _ => TextComponent::new("Authentication servers are down, try again later"),
                    };
                    self.kick(reason).await;
                    return;
                }
            }
        }

        self.finish_login(profile).await;
    }

    /// Completes the login: negotiates compression, sends Login Success,
    /// enters play state and hands the connection over.
    pub async fn finish_login(&self, profile: GameProfile) {
        if let Some(compression) = STRONK_CONFIG.compression {
            self.send_bare_packet_now(CSetCompression::new(
                compression.threshold.get() as i32,
            ))
            .await;

            // Every frame after the packet above uses compressed framing,
            // in both directions.
            self.compression.store(Some(compression));
            if self
                .connection_updates
                .send(ConnectionUpdate::EnableCompression(compression))
                .is_err()
            {
                self.close();
                return;
            }
        }

        self.send_bare_packet_now(CLoginSuccess::new(profile.id, profile.name.clone()))
            .await;

        log::info!(
            "{} ({}) logged in (client id {})",
            profile.name,
            profile.id.hyphenated(),
            self.id
        );
        self.protocol.store(ConnectionProtocol::Play);

        let entity_id = self.server.next_entity_id();
        let player = Arc::new_cyclic(|weak| {
            let connection = Arc::new(JavaConnection::new(
                self.outgoing_queue.clone(),
                self.cancel_token.clone(),
                self.compression.load(),
                self.network_writer.clone(),
                self.id,
                weak.clone(),
            ));
            Player::new(connection, profile, entity_id)
        });
        self.server.add_player(self.id, player.clone());

        self.send_join_sequence(&player).await;

        if self
            .connection_updates
            .send(ConnectionUpdate::Upgrade(player.connection.clone()))
            .is_err()
        {
            self.close();
        }
    }

    /// The packets every fresh player receives: Join Game, the server
    /// brand, the spawn point and the ability flags. Chunks and the first
    /// teleport follow once the client reports its settings.
    async fn send_join_sequence(&self, player: &Player) {
        self.send_bare_packet_now(CJoinGame {
            entity_id: player.entity_id,
            gamemode: Gamemode::Survival,
            dimension: Dimension::Overworld,
            difficulty: 0,
            max_players: STRONK_CONFIG.max_players.min(255) as u8,
            level_type: "default".to_owned(),
            reduced_debug_info: false,
        })
        .await;

        let mut brand = Vec::new();
        SERVER_BRAND
            .write_prefixed::<VarInt>(&mut brand)
            .expect("writing to a buffer should not fail");
        self.send_bare_packet_now(CPluginMessage::new("MC|BRAND", brand))
            .await;

        self.send_bare_packet_now(CSpawnPosition::new(player.compass_target))
            .await;

        let abilities = *player.abilities.lock();
        self.send_bare_packet_now(CPlayerAbilities::new(
            abilities.invulnerable,
            abilities.flying,
            abilities.allow_flying,
            player.gamemode.load() == Gamemode::Creative,
            abilities.flying_speed,
            1.0,
        ))
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_name_validation() {
        assert!(is_valid_player_name("Notch"));
        assert!(is_valid_player_name("a_b"));
        assert!(is_valid_player_name("Sixteen_chars_xx"));

        assert!(!is_valid_player_name("ab"));
        assert!(!is_valid_player_name("seventeen_chars_xx"));
        assert!(!is_valid_player_name("bad name"));
        assert!(!is_valid_player_name("bäd"));
    }

    #[test]
    fn offline_uuid_is_deterministic() {
        assert_eq!(offline_uuid("Notch"), offline_uuid("Notch"));
        assert_ne!(offline_uuid("Notch"), offline_uuid("jeb_"));
    }
}
