//! The player record and its packet handlers.

mod game_profile;
pub mod networking;

pub use game_profile::{GameProfile, ProfileProperty};
pub use networking::JavaConnection;

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use bitflags::bitflags;
use crossbeam::atomic::AtomicCell;
use stronk_protocol::packets::play::{
    CPlayerPositionAndLook, ChatMode, Gamemode, MainHand, SClientSettings, SHeldItemChange,
    SPlayerAbilities, SPlayer, SPlayerLook, SPlayerPosition, SPlayerPositionAndLook,
    SPluginMessage, STeleportConfirm,
};
use stronk_utils::{BlockPos, locks::SyncMutex, serial::PrefixedRead};

use crate::{server::Server, STRONK_CONFIG};

bitflags! {
    /// The skin layers the client wants rendered.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SkinParts: u8 {
        /// Cape.
        const CAPE = 0x01;
        /// Jacket.
        const JACKET = 0x02;
        /// Left sleeve.
        const LEFT_SLEEVE = 0x04;
        /// Right sleeve.
        const RIGHT_SLEEVE = 0x08;
        /// Left pants leg.
        const LEFT_PANTS = 0x10;
        /// Right pants leg.
        const RIGHT_PANTS = 0x20;
        /// Hat layer.
        const HAT = 0x40;
    }
}

/// The client settings carried by the Client Settings packet.
#[derive(Debug, Clone)]
pub struct ClientInformation {
    /// Locale, e.g. `en_US`.
    pub locale: String,
    /// Render distance in chunks.
    pub view_distance: i8,
    /// Chat visibility.
    pub chat_mode: ChatMode,
    /// Whether chat colors are rendered.
    pub chat_colors: bool,
    /// Displayed skin layers.
    pub skin_parts: SkinParts,
    /// The player's main hand.
    pub main_hand: MainHand,
}

impl Default for ClientInformation {
    fn default() -> Self {
        Self {
            locale: "en_US".to_owned(),
            view_distance: 8,
            chat_mode: ChatMode::Enabled,
            chat_colors: true,
            skin_parts: SkinParts::all(),
            main_hand: MainHand::Right,
        }
    }
}

/// Ability flags and flying speed.
#[derive(Debug, Clone, Copy)]
pub struct Abilities {
    /// Whether the player takes damage.
    pub invulnerable: bool,
    /// Whether the player is currently flying.
    pub flying: bool,
    /// Whether the player may start flying.
    pub allow_flying: bool,
    /// Flying speed.
    pub flying_speed: f32,
}

impl Default for Abilities {
    fn default() -> Self {
        Self {
            invulnerable: false,
            flying: false,
            allow_flying: false,
            flying_speed: 0.05,
        }
    }
}

/// An absolute position with orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    /// Absolute x.
    pub x: f64,
    /// Absolute feet y.
    pub y: f64,
    /// Absolute z.
    pub z: f64,
    /// Rotation around the vertical axis, in degrees.
    pub yaw: f32,
    /// Rotation up or down, in degrees.
    pub pitch: f32,
}

/// A movement update, unified over the four serverbound movement packets.
#[derive(Debug, Clone, Copy)]
pub struct MovePlayer {
    /// New absolute coordinates, if the packet carried them.
    pub position: Option<(f64, f64, f64)>,
    /// New rotation, if the packet carried it.
    pub rotation: Option<(f32, f32)>,
    /// Whether the client considers itself on the ground.
    pub on_ground: bool,
}

impl From<SPlayer> for MovePlayer {
    fn from(packet: SPlayer) -> Self {
        Self {
            position: None,
            rotation: None,
            on_ground: packet.on_ground,
        }
    }
}

impl From<SPlayerPosition> for MovePlayer {
    fn from(packet: SPlayerPosition) -> Self {
        Self {
            position: Some((packet.x, packet.y, packet.z)),
            rotation: None,
            on_ground: packet.on_ground,
        }
    }
}

impl From<SPlayerPositionAndLook> for MovePlayer {
    fn from(packet: SPlayerPositionAndLook) -> Self {
        Self {
            position: Some((packet.x, packet.y, packet.z)),
            rotation: Some((packet.yaw, packet.pitch)),
            on_ground: packet.on_ground,
        }
    }
}

impl From<SPlayerLook> for MovePlayer {
    fn from(packet: SPlayerLook) -> Self {
        Self {
            position: None,
            rotation: Some((packet.yaw, packet.pitch)),
            on_ground: packet.on_ground,
        }
    }
}

/// A player in play state. Owned by its connection; the connection holds it
/// behind a `Weak` to avoid a cycle.
pub struct Player {
    /// The play-state connection.
    pub connection: Arc<JavaConnection>,
    /// The authenticated profile.
    pub profile: GameProfile,
    /// The player's entity id.
    pub entity_id: i32,
    /// The gamemode.
    pub gamemode: AtomicCell<Gamemode>,
    /// Client settings; defaults until the first Client Settings packet.
    pub client_information: SyncMutex<ClientInformation>,
    /// The server-authoritative position.
    pub position: SyncMutex<Position>,
    /// Ability flags.
    pub abilities: SyncMutex<Abilities>,
    /// Where the client's compass points.
    pub compass_target: BlockPos,
    /// The selected hotbar slot.
    pub held_slot: AtomicCell<i16>,
    /// The brand the client reported over `MC|BRAND`.
    pub client_brand: SyncMutex<Option<String>>,
    /// The teleport id the client still has to confirm.
    pub pending_teleport: AtomicCell<Option<i32>>,
    next_teleport_id: AtomicCell<i32>,
    settings_received: AtomicBool,
}

impl Player {
    /// Creates a freshly joined player at the world spawn.
    #[must_use]
    pub fn new(connection: Arc<JavaConnection>, profile: GameProfile, entity_id: i32) -> Self {
        Self {
            connection,
            profile,
            entity_id,
            gamemode: AtomicCell::new(Gamemode::Survival),
            client_information: SyncMutex::new(ClientInformation::default()),
            position: SyncMutex::new(crate::world::spawn_position()),
            abilities: SyncMutex::new(Abilities::default()),
            compass_target: crate::world::spawn_block(),
            held_slot: AtomicCell::new(0),
            client_brand: SyncMutex::new(None),
            pending_teleport: AtomicCell::new(None),
            next_teleport_id: AtomicCell::new(0),
            settings_received: AtomicBool::new(false),
        }
    }

    /// Stores the client settings. The first settings packet completes the
    /// join sequence: the initial chunks go out, followed by the absolute
    /// spawn teleport.
    pub fn handle_client_settings(&self, packet: SClientSettings, server: &Server) {
        let view_distance = packet.view_distance;
        {
            let mut info = self.client_information.lock();
            info.locale = packet.locale;
            info.view_distance = packet.view_distance;
            info.chat_mode = packet.chat_mode;
            info.chat_colors = packet.chat_colors;
            info.skin_parts = SkinParts::from_bits_truncate(packet.displayed_skin_parts);
            info.main_hand = packet.main_hand;
        }

        if self.settings_received.swap(true, Ordering::Relaxed) {
            return;
        }

        let server_view_distance = STRONK_CONFIG.view_distance as i8;
        let radius = i32::from(view_distance.min(server_view_distance).max(1));
        for chunk in server.world.chunks_around_spawn(radius) {
            self.connection.send_packet(chunk);
        }

        let position = *self.position.lock();
        let teleport_id = self.begin_teleport();
        self.connection.send_packet(CPlayerPositionAndLook::absolute(
            position.x,
            position.y,
            position.z,
            position.yaw,
            position.pitch,
            teleport_id,
        ));
    }

    fn begin_teleport(&self) -> i32 {
        let id = self.next_teleport_id.fetch_add(1);
        self.pending_teleport.store(Some(id));
        id
    }

    /// Confirms a pending teleport. A mismatched id is not fatal; the
    /// server re-syncs the client to the authoritative position instead.
    pub fn handle_teleport_confirm(&self, packet: STeleportConfirm) {
        match self.pending_teleport.load() {
            Some(expected) if expected == packet.teleport_id => {
                self.pending_teleport.store(None);
            }
            Some(expected) => {
                log::debug!(
                    "{} confirmed teleport {} while {expected} is pending; re-syncing",
                    self.profile.name,
                    packet.teleport_id
                );
                let position = *self.position.lock();
                self.connection.send_packet(CPlayerPositionAndLook::absolute(
                    position.x,
                    position.y,
                    position.z,
                    position.yaw,
                    position.pitch,
                    expected,
                ));
            }
            None => {}
        }
    }

    /// Applies a movement packet. Movement is ignored while a teleport is
    /// unconfirmed; the client is not where it claims to be yet.
    pub fn handle_move_player(&self, update: MovePlayer) {
        if self.pending_teleport.load().is_some() {
            return;
        }

        let mut position = self.position.lock();
        if let Some((x, y, z)) = update.position {
            position.x = x;
            position.y = y;
            position.z = z;
        }
        if let Some((yaw, pitch)) = update.rotation {
            position.yaw = yaw;
            position.pitch = pitch;
        }
    }

    /// Handles a plugin message; only `MC|BRAND` is understood.
    pub fn handle_plugin_message(&self, packet: SPluginMessage) {
        if packet.channel == "MC|BRAND" {
            let mut cursor = std::io::Cursor::new(packet.payload.0.as_slice());
            match String::read_prefixed_bound::<stronk_utils::codec::VarInt>(&mut cursor, 64) {
                Ok(brand) => {
                    log::debug!("{} uses client brand {brand:?}", self.profile.name);
                    *self.client_brand.lock() = Some(brand);
                }
                Err(err) => {
                    log::debug!("Malformed MC|BRAND payload from {}: {err}", self.profile.name);
                }
            }
        } else {
            log::debug!(
                "Ignoring plugin message on channel {:?} from {}",
                packet.channel,
                self.profile.name
            );
        }
    }

    /// Stores the flying flag from a client abilities packet. The other
    /// flags are server-authoritative and never taken from the client.
    pub fn handle_player_abilities(&self, packet: SPlayerAbilities) {
        let mut abilities = self.abilities.lock();
        abilities.flying = abilities.allow_flying && packet.flags & 0x02 != 0;
    }

    /// Switches the selected hotbar slot.
    pub fn handle_held_item_change(&self, packet: SHeldItemChange) {
        if (0..=8).contains(&packet.slot) {
            self.held_slot.store(packet.slot);
        } else {
            log::debug!(
                "{} selected out-of-range hotbar slot {}",
                self.profile.name,
                packet.slot
            );
        }
    }

    /// Logs a chat line. Chat routing lives outside the core.
    pub fn handle_chat(&self, message: &str) {
        log::info!("<{}> {message}", self.profile.name);
    }
}
