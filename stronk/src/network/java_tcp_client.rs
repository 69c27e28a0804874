use std::{
    fmt::{self, Debug, Formatter},
    io::Cursor,
    net::SocketAddr,
    sync::Arc,
};

use crossbeam::atomic::AtomicCell;
use stronk_protocol::{
    ids::{handshake, login, status},
    packet_reader::TCPNetworkDecoder,
    packet_traits::{ClientPacket, CompressionInfo, EncodedPacket, ServerPacket},
    packet_writer::TCPNetworkEncoder,
    packets::{
        handshake::{NextState, SHandshake},
        login::{CLoginDisconnect, SEncryptionResponse, SLoginStart},
        play::CDisconnect,
        status::SPingRequest,
    },
    utils::{ConnectionProtocol, PROTOCOL_VERSION, PacketError, RawPacket},
};
use stronk_utils::{
    locks::{AsyncMutex, SyncMutex},
    text::TextComponent,
};
use tokio::{
    io::{BufReader, BufWriter},
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
    select,
    sync::{
        Notify,
        broadcast::{self, Sender, error::RecvError},
        mpsc::{self, UnboundedReceiver, UnboundedSender},
    },
};
use tokio_util::{sync::CancellationToken, task::TaskTracker};

use crate::{player::GameProfile, player::JavaConnection, server::Server};

/// Updates applied to both halves of the connection pipeline.
#[derive(Clone)]
pub enum ConnectionUpdate {
    /// Enable encryption with the given shared secret.
    EnableEncryption([u8; 16]),
    /// Enable compression at the given threshold.
    EnableCompression(CompressionInfo),
    /// Hand the connection over to the play state.
    Upgrade(Arc<JavaConnection>),
}

impl Debug for ConnectionUpdate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnableEncryption(_) => f.debug_tuple("EnableEncryption").finish(),
            Self::EnableCompression(arg0) => {
                f.debug_tuple("EnableCompression").field(arg0).finish()
            }
            Self::Upgrade(_) => f.debug_tuple("Upgrade").finish(),
        }
    }
}

/// A connection before it reaches play state. Dropped by its tasks when
/// closed or upgraded to a play connection.
pub struct JavaTcpClient {
    /// The unique id of the client.
    pub id: u64,
    /// The profile; populated during login.
    pub gameprofile: AsyncMutex<Option<GameProfile>>,
    /// The current connection state.
    pub protocol: Arc<AtomicCell<ConnectionProtocol>>,
    /// The client's address.
    pub address: SocketAddr,
    /// The hostname the client connected through, from the handshake.
    pub server_address_used: SyncMutex<Option<String>>,
    /// Cancelled when the connection dies.
    pub cancel_token: CancellationToken,

    /// Encoded packets waiting for the writer task.
    pub outgoing_queue: UnboundedSender<EncodedPacket>,
    /// The outbound half of the pipeline.
    pub network_writer: Arc<AsyncMutex<TCPNetworkEncoder<BufWriter<OwnedWriteHalf>>>>,
    pub(crate) compression: Arc<AtomicCell<Option<CompressionInfo>>>,

    /// The shared server state.
    pub server: Arc<Server>,
    /// The verify token issued in the encryption request.
    pub verify_token: AtomicCell<[u8; 16]>,

    pub(crate) connection_updates: Sender<ConnectionUpdate>,
    pub(crate) connection_updated: Arc<Notify>,

    pub(crate) task_tracker: TaskTracker,
}

impl JavaTcpClient {
    /// Creates a new `JavaTcpClient` from an accepted socket, splitting it
    /// into the decoder handed back for the reader task and the writer kept
    /// inside.
    #[must_use]
    pub fn new(
        tcp_stream: TcpStream,
        address: SocketAddr,
        id: u64,
        cancel_token: CancellationToken,
        server: Arc<Server>,
        task_tracker: TaskTracker,
    ) -> (
        Self,
        UnboundedReceiver<EncodedPacket>,
        TCPNetworkDecoder<BufReader<OwnedReadHalf>>,
    ) {
        let (read, write) = tcp_stream.into_split();
        let (outgoing_queue, recv) = mpsc::unbounded_channel();
        let (connection_updates, _) = broadcast::channel(128);

        let client = Self {
            id,
            gameprofile: AsyncMutex::new(None),
            protocol: Arc::new(AtomicCell::new(ConnectionProtocol::Handshake)),
            address,
            server_address_used: SyncMutex::new(None),
            cancel_token,

            outgoing_queue,
            network_writer: Arc::new(AsyncMutex::new(TCPNetworkEncoder::new(BufWriter::new(
                write,
            )))),
            compression: Arc::new(AtomicCell::new(None)),
            server,
            verify_token: AtomicCell::new([0; 16]),
            connection_updates,
            connection_updated: Arc::new(Notify::new()),
            task_tracker,
        };

        (client, recv, TCPNetworkDecoder::new(BufReader::new(read)))
    }

    /// Closes the connection.
    pub fn close(&self) {
        self.cancel_token.cancel();
    }

    /// Encodes and sends a packet immediately, without queueing.
    ///
    /// # Panics
    /// - If the packet cannot be encoded. This means a server bug, not a
    ///   peer problem.
    pub async fn send_bare_packet_now<P: ClientPacket>(&self, packet: P) {
        let compression = self.compression.load();
        let protocol = self.protocol.load();
        let packet = EncodedPacket::from_bare(packet, compression, protocol)
            .expect("Failed to encode packet");

        self.send_packet_now(&packet).await;
    }

    /// Sends an already encoded packet immediately, without queueing.
    pub async fn send_packet_now(&self, packet: &EncodedPacket) {
        if let Err(err) = self.network_writer.lock().await.write_packet(packet).await
            && !self.cancel_token.is_cancelled()
        {
            log::warn!("Failed to send packet to client {}: {}", self.id, err);
            self.close();
        }
    }

    /// Starts the task that drains the outgoing queue and applies writer
    /// side connection updates. On upgrade it becomes the play sender.
    pub fn start_outgoing_packet_task(
        self: &Arc<Self>,
        mut sender_recv: UnboundedReceiver<EncodedPacket>,
    ) {
        let cancel_token = self.cancel_token.clone();
        let network_writer = self.network_writer.clone();
        let id = self.id;
        let mut connection_updates_recv = self.connection_updates.subscribe();
        let connection_updated = self.connection_updated.clone();

        self.task_tracker.spawn(async move {
            let mut connection = None;
            loop {
                select! {
                    biased;
                    () = cancel_token.cancelled() => {
                        break;
                    }
                    connection_update = connection_updates_recv.recv() => {
                        match connection_update {
                            Ok(ConnectionUpdate::EnableEncryption(key)) => {
                                network_writer.lock().await.set_encryption(&key);
                                connection_updated.notify_waiters();
                            }
                            Ok(ConnectionUpdate::EnableCompression(_)) => (),
                            Ok(ConnectionUpdate::Upgrade(upgrade)) => {
                                connection = Some(upgrade);
                                break;
                            }
                            Err(err) => {
                                if err != RecvError::Closed {
                                    log::warn!("Internal connection_updates channel failed for client {id}: {err}");
                                }
                                cancel_token.cancel();
                            }
                        }
                    }
                    packet = sender_recv.recv() => {
                        if let Some(packet) = packet {
                            if let Err(err) = network_writer.lock().await.write_packet(&packet).await
                            {
                                log::warn!("Failed to send packet to client {id}: {err}");
                                cancel_token.cancel();
                            }
                        } else {
                            cancel_token.cancel();
                        }
                    }
                }
            }

            drop(cancel_token);
            drop(network_writer);
            drop(connection_updates_recv);
            drop(connection_updated);

            if let Some(connection) = connection {
                connection.sender(sender_recv).await;
            }
        });
    }

    /// Starts the task that reads frames, dispatches them by state, and
    /// applies reader side connection updates. On upgrade it becomes the
    /// play listener.
    pub fn start_incoming_packet_task(
        self: &Arc<Self>,
        mut reader: TCPNetworkDecoder<BufReader<OwnedReadHalf>>,
    ) {
        let cancel_token = self.cancel_token.clone();
        let id = self.id;
        let mut connection_updates_recv = self.connection_updates.subscribe();
        let connection_updated = self.connection_updated.clone();

        let self_clone = self.clone();

        self.task_tracker.spawn(async move {
            let mut connection = None;
            loop {
                select! {
                    biased;
                    () = cancel_token.cancelled() => {
                        break;
                    }
                    connection_update = connection_updates_recv.recv() => {
                        match connection_update {
                            Ok(ConnectionUpdate::EnableEncryption(key)) => {
                                reader.set_encryption(&key);
                            }
                            Ok(ConnectionUpdate::EnableCompression(compression)) => {
                                reader.set_compression(compression.threshold);
                                connection_updated.notify_waiters();
                            }
                            Ok(ConnectionUpdate::Upgrade(upgrade)) => {
                                connection = Some(upgrade);
                                break;
                            }
                            Err(err) => {
                                if err != RecvError::Closed {
                                    log::info!("Internal connection_updates channel failed for client {id}: {err}");
                                }
                                cancel_token.cancel();
                            }
                        }
                    }
                    packet = reader.get_raw_packet() => {
                        match packet {
                            Ok(packet) => {
                                if let Err(err) = self_clone.process_packet(packet).await {
                                    log::info!("Kicking client {id}: {err}");
                                    self_clone.kick(login_failed_reason(self_clone.protocol.load())).await;
                                }
                            }
                            Err(err) => {
                                log::info!("Failed to get raw packet from client {id}: {err}");
                                cancel_token.cancel();
                            }
                        }
                    }
                }
            }

            drop(cancel_token);
            drop(connection_updates_recv);
            drop(connection_updated);

            if let Some(connection) = connection {
                let server = self_clone.server.clone();
                drop(self_clone);

                connection.listener(reader, server).await;
            }
        });
    }

    async fn process_packet(&self, packet: RawPacket) -> Result<(), PacketError> {
        match self.protocol.load() {
            ConnectionProtocol::Handshake => self.handle_handshake(&packet),
            ConnectionProtocol::Status => self.handle_status(&packet).await,
            ConnectionProtocol::Login => self.handle_login(&packet).await,
            ConnectionProtocol::Play => Err(PacketError::InvalidProtocol(
                "play packets belong to the upgraded connection".to_owned(),
            )),
        }
    }

    /// Handles the handshake packet.
    fn handle_handshake(&self, packet: &RawPacket) -> Result<(), PacketError> {
        let data = &mut Cursor::new(packet.payload.as_slice());

        match packet.id {
            handshake::S_HANDSHAKE => {
                let handshake = SHandshake::read_packet(data)?;
                let next = match handshake.next_state {
                    NextState::Status => ConnectionProtocol::Status,
                    NextState::Login => ConnectionProtocol::Login,
                };
                *self.server_address_used.lock() = Some(handshake.server_address);
                self.protocol.store(next);

                if next == ConnectionProtocol::Login
                    && handshake.protocol_version != PROTOCOL_VERSION
                {
                    log::info!(
                        "Client {} speaks protocol {}, this server requires {PROTOCOL_VERSION}",
                        self.id,
                        handshake.protocol_version
                    );
                    return Err(PacketError::InvalidProtocol(format!(
                        "unsupported protocol version {}",
                        handshake.protocol_version
                    )));
                }
                Ok(())
            }
            id => Err(PacketError::InvalidPacket {
                id,
                state: ConnectionProtocol::Handshake,
            }),
        }
    }

    /// Handles a status state packet.
    async fn handle_status(&self, packet: &RawPacket) -> Result<(), PacketError> {
        let data = &mut Cursor::new(packet.payload.as_slice());

        match packet.id {
            status::S_STATUS_REQUEST => {
                self.handle_status_request().await;
                Ok(())
            }
            status::S_PING_REQUEST => {
                self.handle_ping_request(SPingRequest::read_packet(data)?)
                    .await;
                Ok(())
            }
            id => Err(PacketError::InvalidPacket {
                id,
                state: ConnectionProtocol::Status,
            }),
        }
    }

    /// Handles a login state packet.
    async fn handle_login(&self, packet: &RawPacket) -> Result<(), PacketError> {
        let data = &mut Cursor::new(packet.payload.as_slice());

        match packet.id {
            login::S_LOGIN_START => {
                self.handle_login_start(SLoginStart::read_packet(data)?)
                    .await;
                Ok(())
            }
            login::S_ENCRYPTION_RESPONSE => {
                self.handle_encryption_response(SEncryptionResponse::read_packet(data)?)
                    .await;
                Ok(())
            }
            id => Err(PacketError::InvalidPacket {
                id,
                state: ConnectionProtocol::Login,
            }),
        }
    }

    /// Kicks the client with a given reason, using the disconnect packet of
    /// the current state. Before login there is nothing to send.
    pub async fn kick(&self, reason: TextComponent) {
        log::info!("Kicking client {}: {}", self.id, reason);
        match self.protocol.load() {
            ConnectionProtocol::Login => {
                self.send_bare_packet_now(CLoginDisconnect::new(reason))
                    .await;
            }
            ConnectionProtocol::Play => {
                self.send_bare_packet_now(CDisconnect::new(reason)).await;
            }
            ConnectionProtocol::Handshake | ConnectionProtocol::Status => {}
        }
        log::debug!("Closing connection for {}", self.id);
        self.close();
    }
}

fn login_failed_reason(protocol: ConnectionProtocol) -> TextComponent {
    match protocol {
        ConnectionProtocol::Login => {
            TextComponent::new("A fatal error occurred whilst logging in.")
        }
        _ => TextComponent::new("Protocol error"),
    }
}
