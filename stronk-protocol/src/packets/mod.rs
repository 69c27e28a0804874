//! Concrete packet definitions, organized per connection state.

/// Handshake state packets.
pub mod handshake;
/// Login state packets.
pub mod login;
/// Play state packets.
pub mod play;
/// Status state packets.
pub mod status;
