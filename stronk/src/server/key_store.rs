use rsa::RsaPrivateKey;
use stronk_crypto::{generate_key_pair, public_key_to_der};

/// The server's RSA key pair, generated once at startup, plus the cached
/// DER encoding sent in every encryption request.
pub struct KeyStore {
    /// The private half, used to decrypt the shared secret.
    pub private_key: RsaPrivateKey,
    /// The public half as DER `SubjectPublicKeyInfo`.
    pub public_key_der: Box<[u8]>,
}

impl KeyStore {
    /// Generates the key pair.
    ///
    /// # Panics
    /// - If key generation fails.
    #[must_use]
    #[allow(clippy::new_without_default, reason = "construction is not trivial")]
    pub fn new() -> Self {
        log::debug!("Creating encryption keys...");
        let (private_key, public_key) =
            generate_key_pair().expect("Failed to generate the RSA key pair");
        let public_key_der = public_key_to_der(&public_key).into_boxed_slice();

        Self {
            private_key,
            public_key_der,
        }
    }
}
