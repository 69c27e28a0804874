//! # Stronk Protocol
//!
//! The wire protocol implementation for the Stronk Minecraft server:
//! packet definitions, the numeric id tables, and the framing pipeline
//! (length prefixes, zlib compression, AES-128/CFB8 encryption) for
//! protocol version 335.

pub mod ids;
pub mod packet_reader;
pub mod packet_traits;
pub mod packet_writer;
pub mod packets;
pub mod utils;
