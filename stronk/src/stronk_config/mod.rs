//! Server configuration, loaded from a JSON5 file.

use std::{fs, net::SocketAddr, path::Path};

use base64::{Engine, prelude::BASE64_STANDARD};
use serde::Deserialize;
use stronk_protocol::packet_traits::CompressionInfo;

const DEFAULT_CONFIG_STR: &str = include_str!("default_config.json5");

/// The server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StronkConfig {
    /// The address the listening socket binds to.
    pub server_address: SocketAddr,
    /// The advertised and enforced player limit.
    pub max_players: u32,
    /// Server-side view distance in chunks.
    pub view_distance: u8,
    /// Whether logins are verified against the session service.
    pub online_mode: bool,
    /// Whether the login handshake negotiates stream encryption.
    pub encryption: bool,
    /// The message of the day shown in the server list.
    pub motd: String,
    /// Whether to serve a favicon in the server list.
    pub use_favicon: bool,
    /// Path to a 64x64 PNG favicon.
    pub favicon: String,
    /// Compression settings; absent means uncompressed framing.
    pub compression: Option<CompressionInfo>,
}

impl StronkConfig {
    /// Loads the configuration, writing the default file first if none
    /// exists.
    ///
    /// # Panics
    /// - If the file cannot be read, written, or parsed, or fails
    ///   validation.
    #[must_use]
    pub fn load_or_create(path: &Path) -> Self {
        let config_str = if path.exists() {
            fs::read_to_string(path).expect("Failed to read the config file")
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("Failed to create the config directory");
            }
            fs::write(path, DEFAULT_CONFIG_STR).expect("Failed to write the default config");
            DEFAULT_CONFIG_STR.to_owned()
        };

        let config: StronkConfig =
            serde_json5::from_str(&config_str).expect("Failed to parse the config file");
        if let Err(reason) = config.validate() {
            panic!("Invalid config: {reason}");
        }
        config
    }

    /// Checks the configuration for values the server cannot run with.
    ///
    /// # Errors
    /// - If a value is out of its supported range.
    pub fn validate(&self) -> Result<(), String> {
        if self.view_distance == 0 {
            return Err("View distance must be greater than 0".to_owned());
        }
        if self.view_distance > 32 {
            return Err("View distance must be less than or equal to 32".to_owned());
        }
        if self.online_mode && !self.encryption {
            return Err("Online mode requires encryption".to_owned());
        }
        if let Some(compression) = self.compression {
            if !(1..=9).contains(&compression.level) {
                return Err("Compression level must be between 1 and 9".to_owned());
            }
        }
        Ok(())
    }

    const FAVICON_PREFIX: &str = "data:image/png;base64,";

    /// Loads the favicon as a data URI, if configured and present on disk.
    #[must_use]
    pub fn load_favicon(&self) -> Option<String> {
        if !self.use_favicon {
            return None;
        }

        let icon = fs::read(Path::new(&self.favicon)).ok()?;

        let mut data_uri = String::with_capacity(
            Self::FAVICON_PREFIX.len() + icon.len().div_ceil(3) * 4,
        );
        data_uri += Self::FAVICON_PREFIX;
        BASE64_STANDARD.encode_string(icon, &mut data_uri);
        Some(data_uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses_and_validates() {
        let config: StronkConfig =
            serde_json5::from_str(DEFAULT_CONFIG_STR).expect("default config must parse");
        config.validate().expect("default config must validate");

        assert_eq!(config.server_address.port(), 25565);
        assert!(config.online_mode);
        assert_eq!(
            config.compression.expect("compression enabled").threshold.get(),
            256
        );
    }

    #[test]
    fn online_mode_without_encryption_is_rejected() {
        let mut config: StronkConfig =
            serde_json5::from_str(DEFAULT_CONFIG_STR).expect("default config must parse");
        config.encryption = false;
        assert!(config.validate().is_err());
    }
}
