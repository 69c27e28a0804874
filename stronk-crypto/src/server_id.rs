//! The server-id hash presented to the session service.
//!
//! The session service expects the SHA-1 digest rendered the way Java's
//! `new BigInteger(digest).toString(16)` renders it: the 20 bytes are a
//! big-endian two's-complement integer, negative values are negated and
//! prefixed with `-`, and leading zeros are stripped. A plain lowercase hex
//! dump is not accepted.

use sha1::{Digest, Sha1};

/// Renders big-endian two's-complement bytes as a signed hex string.
#[must_use]
pub fn signed_bytes_be_to_hex(bytes: &[u8]) -> String {
    let negative = bytes.first().is_some_and(|b| b & 0x80 != 0);

    let mut magnitude = bytes.to_vec();
    if negative {
        // Two's-complement negation, carrying from the least significant
        // byte upwards.
        let mut carry = true;
        for byte in magnitude.iter_mut().rev() {
            *byte = !*byte;
            if carry {
                let (negated, overflowed) = byte.overflowing_add(1);
                *byte = negated;
                carry = overflowed;
            }
        }
    }

    let hex = hex::encode(magnitude);
    let trimmed = hex.trim_start_matches('0');
    let body = if trimmed.is_empty() { "0" } else { trimmed };

    if negative {
        format!("-{body}")
    } else {
        body.to_owned()
    }
}

/// Computes the server-id hash for the `hasJoined` query:
/// `SHA1(server_id ‖ shared_secret ‖ public_key_der)` in the signed
/// stringification above.
#[must_use]
pub fn server_id_hash(server_id: &str, shared_secret: &[u8], public_key_der: &[u8]) -> String {
    let digest = Sha1::new()
        .chain_update(server_id.as_bytes())
        .chain_update(shared_secret)
        .chain_update(public_key_der)
        .finalize();

    signed_bytes_be_to_hex(&digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    // The canonical vectors: sha1 of the bare name, signed-stringified.
    #[test]
    fn notch_vector() {
        let digest = Sha1::digest(b"Notch");
        assert_eq!(
            signed_bytes_be_to_hex(&digest),
            "4ed1f46bbe04bc756bcb17c0c7ce3e4632f06a48"
        );
    }

    #[test]
    fn jeb_vector_is_negative() {
        let digest = Sha1::digest(b"jeb_");
        assert_eq!(
            signed_bytes_be_to_hex(&digest),
            "-7c9d5b0044c130109a5d7b5fb5c317c02b4e28c1"
        );
    }

    #[test]
    fn empty_vector_is_negative() {
        let digest = Sha1::digest(b"");
        assert_eq!(
            signed_bytes_be_to_hex(&digest),
            "-af1e3f75a530d72cf4f8bdd2f5f47a0aeee88ef6"
        );
    }

    #[test]
    fn zero_renders_as_zero() {
        assert_eq!(signed_bytes_be_to_hex(&[0, 0, 0]), "0");
    }

    #[test]
    fn hash_concatenates_all_three_inputs() {
        let separate = server_id_hash("", b"0123456789abcdef", b"derderder");
        let joined = {
            let digest = Sha1::digest(b"0123456789abcdefderderder");
            signed_bytes_be_to_hex(&digest)
        };
        assert_eq!(separate, joined);
    }
}
