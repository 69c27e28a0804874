//! The play-state connection: packet dispatch, the outbound queue and
//! keep-alive liveness.

use std::io::Cursor;
use std::sync::{Arc, Weak};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use stronk_protocol::ids::play;
use stronk_protocol::packet_reader::TCPNetworkDecoder;
use stronk_protocol::packet_traits::{ClientPacket, CompressionInfo, EncodedPacket, ServerPacket};
use stronk_protocol::packet_writer::TCPNetworkEncoder;
use stronk_protocol::packets::play::{
    CDisconnect, CKeepAlive, SChatMessage, SClientSettings, SClientStatus, SCloseWindow,
    SHeldItemChange, SKeepAlive, SPlayer, SPlayerAbilities, SPlayerLook, SPlayerPosition,
    SPlayerPositionAndLook, SPluginMessage, STabComplete, STeleportConfirm, SUseEntity,
};
use stronk_protocol::utils::{ConnectionProtocol, PacketError, RawPacket};
use stronk_utils::locks::{AsyncMutex, SyncMutex};
use stronk_utils::text::TextComponent;
use tokio::io::{BufReader, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::select;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

use crate::player::Player;
use crate::server::Server;

/// Keep-alives go out every 10 seconds.
const KEEP_ALIVE_INTERVAL_MS: u64 = 10_000;
/// A client that echoes nothing for 30 seconds is gone.
const KEEP_ALIVE_TIMEOUT_MS: u64 = 30_000;

struct KeepAliveTracker {
    last_sent: u64,
    last_received: u64,
    pending_id: Option<i32>,
    next_id: i32,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time before UNIX EPOCH")
        .as_millis() as u64
}

/// A connection to a client in play state.
pub struct JavaConnection {
    outgoing_packets: UnboundedSender<EncodedPacket>,
    cancel_token: CancellationToken,
    compression: Option<CompressionInfo>,
    network_writer: Arc<AsyncMutex<TCPNetworkEncoder<BufWriter<OwnedWriteHalf>>>>,
    id: u64,

    player: Weak<Player>,
    keep_alive_tracker: SyncMutex<KeepAliveTracker>,
    latency: SyncMutex<u32>,
}

impl JavaConnection {
    /// Creates a new `JavaConnection`.
    #[must_use]
    pub fn new(
        outgoing_packets: UnboundedSender<EncodedPacket>,
        cancel_token: CancellationToken,
        compression: Option<CompressionInfo>,
        network_writer: Arc<AsyncMutex<TCPNetworkEncoder<BufWriter<OwnedWriteHalf>>>>,
        id: u64,
        player: Weak<Player>,
    ) -> Self {
        let now = now_millis();
        Self {
            outgoing_packets,
            cancel_token,
            compression,
            network_writer,
            id,
            player,
            keep_alive_tracker: SyncMutex::new(KeepAliveTracker {
                last_sent: now,
                last_received: now,
                pending_id: None,
                next_id: 0,
            }),
            latency: SyncMutex::new(0),
        }
    }

    /// Drives the liveness timers; called once a second by the listener.
    pub async fn tick(&self) {
        enum Liveness {
            Fine,
            SendKeepAlive(i32),
            TimedOut,
        }

        let decision = {
            let mut tracker = self.keep_alive_tracker.lock();
            let now = now_millis();

            if now.saturating_sub(tracker.last_received) >= KEEP_ALIVE_TIMEOUT_MS {
                Liveness::TimedOut
            } else if now.saturating_sub(tracker.last_sent) >= KEEP_ALIVE_INTERVAL_MS {
                let id = tracker.next_id;
                tracker.next_id = tracker.next_id.wrapping_add(1);
                tracker.pending_id = Some(id);
                tracker.last_sent = now;
                Liveness::SendKeepAlive(id)
            } else {
                Liveness::Fine
            }
        };

        match decision {
            Liveness::Fine => {}
            Liveness::SendKeepAlive(id) => self.send_packet(CKeepAlive::new(id)),
            Liveness::TimedOut => self.disconnect(TextComponent::new("Timed out")).await,
        }
    }

    /// Handles the client's keep-alive echo.
    async fn handle_keep_alive(&self, packet: SKeepAlive) {
        let matched = {
            let mut tracker = self.keep_alive_tracker.lock();
            if tracker.pending_id == Some(packet.id) {
                let now = now_millis();
                let round_trip = now.saturating_sub(tracker.last_sent) as u32;
                tracker.pending_id = None;
                tracker.last_received = now;
                Some(round_trip)
            } else {
                None
            }
        };

        if let Some(round_trip) = matched {
            let mut latency = self.latency.lock();
            *latency = (*latency * 3 + round_trip) / 4;
        } else {
            self.disconnect(TextComponent::new("Timed out")).await;
        }
    }

    /// The smoothed keep-alive round trip in milliseconds.
    #[must_use]
    pub fn latency(&self) -> u32 {
        *self.latency.lock()
    }

    /// Sends a Disconnect with the given reason, then closes.
    pub async fn disconnect(&self, reason: TextComponent) {
        log::info!("Disconnecting client {}: {}", self.id, reason);
        match EncodedPacket::from_bare(
            CDisconnect::new(reason),
            self.compression,
            ConnectionProtocol::Play,
        ) {
            Ok(packet) => {
                // Written directly so it beats the close below; the queue
                // would race the cancellation.
                let _ = self.network_writer.lock().await.write_packet(&packet).await;
            }
            Err(err) => log::warn!("Failed to encode disconnect for client {}: {err}", self.id),
        }
        self.close();
    }

    /// Encodes and queues a packet.
    ///
    /// # Panics
    /// - If the packet fails to encode. This means a server bug, not a
    ///   peer problem.
    pub fn send_packet<P: ClientPacket>(&self, packet: P) {
        let packet = EncodedPacket::from_bare(packet, self.compression, ConnectionProtocol::Play)
            .expect("Failed to encode packet");
        if self.outgoing_packets.send(packet).is_err() {
            self.close();
        }
    }

    /// Queues an already encoded packet.
    pub fn send_encoded_packet(&self, packet: EncodedPacket) {
        if self.outgoing_packets.send(packet).is_err() {
            self.close();
        }
    }

    /// Closes the connection. Safe to call any number of times.
    pub fn close(&self) {
        self.cancel_token.cancel();
    }

    /// Returns whether the connection is closed.
    #[must_use]
    pub fn closed(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Waits for the connection to be closed.
    pub async fn wait_for_close(&self) {
        self.cancel_token.cancelled().await;
    }

    /// Decodes and dispatches one play packet.
    ///
    /// # Errors
    /// - If the payload is malformed or the id does not exist in the play
    ///   state of this protocol version.
    pub async fn process_packet(
        self: &Arc<Self>,
        packet: RawPacket,
        player: &Arc<Player>,
        server: &Arc<Server>,
    ) -> Result<(), PacketError> {
        let data = &mut Cursor::new(packet.payload.as_slice());

        match packet.id {
            play::S_TELEPORT_CONFIRM => {
                player.handle_teleport_confirm(STeleportConfirm::read_packet(data)?);
            }
            play::S_TAB_COMPLETE => {
                let packet = STabComplete::read_packet(data)?;
                log::debug!("Tab complete for {:?} not supported", packet.text);
            }
            play::S_CHAT_MESSAGE => {
                player.handle_chat(&SChatMessage::read_packet(data)?.message);
            }
            play::S_CLIENT_STATUS => {
                let _ = SClientStatus::read_packet(data)?;
            }
            play::S_CLIENT_SETTINGS => {
                player.handle_client_settings(SClientSettings::read_packet(data)?, server);
            }
            play::S_CLOSE_WINDOW => {
                let _ = SCloseWindow::read_packet(data)?;
            }
            play::S_PLUGIN_MESSAGE => {
                player.handle_plugin_message(SPluginMessage::read_packet(data)?);
            }
            play::S_USE_ENTITY => {
                let packet = SUseEntity::read_packet(data)?;
                log::debug!("Use entity {} without entity simulation", packet.target);
            }
            play::S_KEEP_ALIVE => {
                self.handle_keep_alive(SKeepAlive::read_packet(data)?).await;
            }
            play::S_PLAYER => {
                player.handle_move_player(SPlayer::read_packet(data)?.into());
            }
            play::S_PLAYER_POSITION => {
                player.handle_move_player(SPlayerPosition::read_packet(data)?.into());
            }
            play::S_PLAYER_POSITION_AND_LOOK => {
                player.handle_move_player(SPlayerPositionAndLook::read_packet(data)?.into());
            }
            play::S_PLAYER_LOOK => {
                player.handle_move_player(SPlayerLook::read_packet(data)?.into());
            }
            play::S_PLAYER_ABILITIES => {
                player.handle_player_abilities(SPlayerAbilities::read_packet(data)?);
            }
            play::S_HELD_ITEM_CHANGE => {
                player.handle_held_item_change(SHeldItemChange::read_packet(data)?);
            }
            id if (play::S_TELEPORT_CONFIRM..=play::S_USE_ITEM).contains(&id) => {
                // Defined in this protocol version, but nothing here acts
                // on it.
                log::debug!("Ignoring play packet id {id:#04x}");
            }
            id => {
                return Err(PacketError::InvalidPacket {
                    id,
                    state: ConnectionProtocol::Play,
                });
            }
        }
        Ok(())
    }

    /// Listens for packets from the client and drives liveness until the
    /// connection closes, then unregisters the player.
    pub async fn listener(
        self: Arc<Self>,
        mut reader: TCPNetworkDecoder<BufReader<OwnedReadHalf>>,
        server: Arc<Server>,
    ) {
        let mut liveness = tokio::time::interval(Duration::from_secs(1));

        loop {
            select! {
                biased;
                () = self.wait_for_close() => {
                    break;
                }
                _ = liveness.tick() => {
                    self.tick().await;
                }
                packet = reader.get_raw_packet() => {
                    match packet {
                        Ok(packet) => {
                            if let Some(player) = self.player.upgrade()
                                && let Err(err) = self.process_packet(packet, &player, &server).await
                            {
                                log::warn!("Protocol violation from client {}: {err}", self.id);
                                self.disconnect(TextComponent::new("Protocol error")).await;
                            }
                        }
                        Err(err) => {
                            log::debug!("Failed to get raw packet from client {}: {err}", self.id);
                            self.close();
                        }
                    }
                }
            }
        }

        server.remove_player(self.id);
    }

    /// Drains the outbound queue to the socket until the connection closes.
    pub async fn sender(self: Arc<Self>, mut sender_recv: UnboundedReceiver<EncodedPacket>) {
        loop {
            select! {
                biased;
                () = self.wait_for_close() => {
                    break;
                }
                packet = sender_recv.recv() => {
                    if let Some(packet) = packet {
                        if let Err(err) = self.network_writer.lock().await.write_packet(&packet).await
                        {
                            log::warn!("Failed to send packet to client {}: {err}", self.id);
                            self.close();
                        }
                    } else {
                        self.close();
                    }
                }
            }
        }
    }
}
