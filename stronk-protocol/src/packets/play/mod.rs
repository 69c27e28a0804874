//! Play state packets: the serverbound set the core decodes plus the
//! clientbound set it produces for the join sequence, liveness and chunk
//! streaming.

mod c_chunk_data;
mod c_disconnect;
mod c_join_game;
mod c_keep_alive;
mod c_player_abilities;
mod c_player_position_and_look;
mod c_plugin_message;
mod c_spawn_position;
mod c_unload_chunk;
mod s_chat_message;
mod s_client_settings;
mod s_client_status;
mod s_close_window;
mod s_held_item_change;
mod s_keep_alive;
mod s_move_player;
mod s_player_abilities;
mod s_plugin_message;
mod s_tab_complete;
mod s_teleport_confirm;
mod s_use_entity;

pub use c_chunk_data::CChunkData;
pub use c_disconnect::CDisconnect;
pub use c_join_game::{CJoinGame, Dimension, Gamemode};
pub use c_keep_alive::CKeepAlive;
pub use c_player_abilities::CPlayerAbilities;
pub use c_player_position_and_look::CPlayerPositionAndLook;
pub use c_plugin_message::CPluginMessage;
pub use c_spawn_position::CSpawnPosition;
pub use c_unload_chunk::CUnloadChunk;
pub use s_chat_message::SChatMessage;
pub use s_client_settings::{ChatMode, MainHand, SClientSettings};
pub use s_client_status::{ClientStatusAction, SClientStatus};
pub use s_close_window::SCloseWindow;
pub use s_held_item_change::SHeldItemChange;
pub use s_keep_alive::SKeepAlive;
pub use s_move_player::{SPlayer, SPlayerLook, SPlayerPosition, SPlayerPositionAndLook};
pub use s_player_abilities::SPlayerAbilities;
pub use s_plugin_message::{Payload, SPluginMessage};
pub use s_tab_complete::STabComplete;
pub use s_teleport_confirm::STeleportConfirm;
pub use s_use_entity::{SUseEntity, UseEntityAction};
