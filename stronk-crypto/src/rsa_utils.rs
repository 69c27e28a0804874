//! RSA key pair generation and encoding.

use rsa::{RsaPrivateKey, RsaPublicKey, traits::PublicKeyParts};
use thiserror::Error;

/// Errors that can occur during cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptError {
    /// An error from the RSA implementation.
    #[error("RSA error: {0}")]
    RsaError(#[from] rsa::Error),

    /// An error while parsing a DER-encoded key.
    #[error("SPKI error: {0}")]
    SpkiError(#[from] rsa::pkcs8::spki::Error),

    /// The decrypted value has the wrong size.
    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// The expected length.
        expected: usize,
        /// The actual length.
        got: usize,
    },
}

/// Generates the RSA key pair for the login handshake.
///
/// # Errors
/// - If key generation fails.
pub fn generate_key_pair() -> Result<(RsaPrivateKey, RsaPublicKey), CryptError> {
    let mut rng = rand::rng();
    let private_key = RsaPrivateKey::new(&mut rng, crate::RSA_KEY_BITS)?;
    let public_key = RsaPublicKey::from(&private_key);
    Ok((private_key, public_key))
}

/// Encodes an RSA public key as DER `SubjectPublicKeyInfo`, the format the
/// encryption request carries.
#[must_use]
pub fn public_key_to_der(key: &RsaPublicKey) -> Vec<u8> {
    rsa_der::public_key_to_der(&key.n().to_be_bytes(), &key.e().to_be_bytes())
}

/// Parses an RSA public key from DER `SubjectPublicKeyInfo` bytes.
///
/// # Errors
/// - If the bytes are not a valid encoded key.
pub fn public_key_from_der(bytes: &[u8]) -> Result<RsaPublicKey, CryptError> {
    use rsa::pkcs8::DecodePublicKey;
    RsaPublicKey::from_public_key_der(bytes).map_err(CryptError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_public_key_round_trips_through_der() {
        let (_, public_key) = generate_key_pair().expect("key generation");
        let der = public_key_to_der(&public_key);
        let decoded = public_key_from_der(&der).expect("decode");

        assert_eq!(public_key_to_der(&decoded), der);
    }
}
