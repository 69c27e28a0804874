//! Cryptographic utilities for the Stronk server: RSA key handling for the
//! login handshake and the session-service server-id hash.

pub mod rsa_utils;
pub mod server_id;

pub use rsa_utils::{CryptError, generate_key_pair, public_key_from_der, public_key_to_der};
pub use server_id::{server_id_hash, signed_bytes_be_to_hex};

/// Size of RSA keys in bits. The vanilla login handshake uses 1024.
pub const RSA_KEY_BITS: usize = 1024;

/// Size of the shared secret (AES key and IV) in bytes.
pub const SHARED_SECRET_BYTES: usize = 16;

/// Size of the verify token issued in the encryption request.
pub const VERIFY_TOKEN_BYTES: usize = 16;
