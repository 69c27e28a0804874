//! The numeric packet id tables for protocol version 335.
//!
//! `S_` constants are serverbound, `C_` constants are clientbound. Ids are
//! only meaningful within their (state, direction) pair.
#![allow(missing_docs)]

/// Handshake state.
pub mod handshake {
    pub const S_HANDSHAKE: i32 = 0x00;
}

/// Status state.
pub mod status {
    pub const S_STATUS_REQUEST: i32 = 0x00;
    pub const S_PING_REQUEST: i32 = 0x01;

    pub const C_STATUS_RESPONSE: i32 = 0x00;
    pub const C_PONG_RESPONSE: i32 = 0x01;
}

/// Login state.
pub mod login {
    pub const S_LOGIN_START: i32 = 0x00;
    pub const S_ENCRYPTION_RESPONSE: i32 = 0x01;

    pub const C_LOGIN_DISCONNECT: i32 = 0x00;
    pub const C_ENCRYPTION_REQUEST: i32 = 0x01;
    pub const C_LOGIN_SUCCESS: i32 = 0x02;
    pub const C_SET_COMPRESSION: i32 = 0x03;
}

/// Play state.
pub mod play {
    pub const S_TELEPORT_CONFIRM: i32 = 0x00;
    pub const S_PREPARE_CRAFTING_GRID: i32 = 0x01;
    pub const S_TAB_COMPLETE: i32 = 0x02;
    pub const S_CHAT_MESSAGE: i32 = 0x03;
    pub const S_CLIENT_STATUS: i32 = 0x04;
    pub const S_CLIENT_SETTINGS: i32 = 0x05;
    pub const S_CONFIRM_TRANSACTION: i32 = 0x06;
    pub const S_ENCHANT_ITEM: i32 = 0x07;
    pub const S_CLICK_WINDOW: i32 = 0x08;
    pub const S_CLOSE_WINDOW: i32 = 0x09;
    pub const S_PLUGIN_MESSAGE: i32 = 0x0A;
    pub const S_USE_ENTITY: i32 = 0x0B;
    pub const S_KEEP_ALIVE: i32 = 0x0C;
    pub const S_PLAYER: i32 = 0x0D;
    pub const S_PLAYER_POSITION: i32 = 0x0E;
    pub const S_PLAYER_POSITION_AND_LOOK: i32 = 0x0F;
    pub const S_PLAYER_LOOK: i32 = 0x10;
    pub const S_VEHICLE_MOVE: i32 = 0x11;
    pub const S_STEER_BOAT: i32 = 0x12;
    pub const S_PLAYER_ABILITIES: i32 = 0x13;
    pub const S_PLAYER_DIGGING: i32 = 0x14;
    pub const S_ENTITY_ACTION: i32 = 0x15;
    pub const S_STEER_VEHICLE: i32 = 0x16;
    pub const S_CRAFTING_BOOK_DATA: i32 = 0x17;
    pub const S_RESOURCE_PACK_STATUS: i32 = 0x18;
    pub const S_ADVANCEMENT_TAB: i32 = 0x19;
    pub const S_HELD_ITEM_CHANGE: i32 = 0x1A;
    pub const S_CREATIVE_INVENTORY_ACTION: i32 = 0x1B;
    pub const S_UPDATE_SIGN: i32 = 0x1C;
    pub const S_ANIMATION: i32 = 0x1D;
    pub const S_SPECTATE: i32 = 0x1E;
    pub const S_PLAYER_BLOCK_PLACEMENT: i32 = 0x1F;
    pub const S_USE_ITEM: i32 = 0x20;

    pub const C_PLUGIN_MESSAGE: i32 = 0x18;
    pub const C_DISCONNECT: i32 = 0x1A;
    pub const C_UNLOAD_CHUNK: i32 = 0x1D;
    pub const C_KEEP_ALIVE: i32 = 0x1F;
    pub const C_CHUNK_DATA: i32 = 0x20;
    pub const C_JOIN_GAME: i32 = 0x23;
    pub const C_PLAYER_ABILITIES: i32 = 0x2B;
    pub const C_PLAYER_POSITION_AND_LOOK: i32 = 0x2E;
    pub const C_SPAWN_POSITION: i32 = 0x45;
}
