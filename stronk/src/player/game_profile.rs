//! The player profile as returned by the session service.

use serde::Deserialize;
use uuid::Uuid;

/// A signed property of a profile, e.g. `textures`.
#[derive(Deserialize, Clone, Debug)]
pub struct ProfileProperty {
    /// The property name.
    pub name: String,
    /// The base64 property document.
    pub value: String,
    /// Mojang's signature over the value.
    pub signature: Option<String>,
}

/// A player's game profile.
///
/// In online mode this is the session service's `hasJoined` response; in
/// offline mode it is synthesized from the username.
#[derive(Deserialize, Clone, Debug)]
pub struct GameProfile {
    /// The player's UUID.
    pub id: Uuid,
    /// The player's name.
    pub name: String,
    /// Signed profile properties.
    #[serde(default)]
    pub properties: Vec<ProfileProperty>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_joined_response_parses() {
        // The session service sends the UUID without hyphens.
        let json = r#"{
            "id": "069a79f444e94726a5befca90e38aaf5",
            "name": "Notch",
            "properties": [
                {
                    "name": "textures",
                    "value": "eyJ0aW1lc3RhbXAiOjB9",
                    "signature": "c2lnbmF0dXJl"
                }
            ]
        }"#;

        let profile: GameProfile = serde_json::from_str(json).expect("parse failed");
        assert_eq!(
            profile.id,
            Uuid::parse_str("069a79f4-44e9-4726-a5be-fca90e38aaf5").expect("uuid")
        );
        assert_eq!(profile.name, "Notch");
        assert_eq!(profile.properties.len(), 1);
        assert_eq!(profile.properties[0].name, "textures");
    }

    #[test]
    fn properties_default_to_empty() {
        let json = r#"{"id": "069a79f444e94726a5befca90e38aaf5", "name": "Notch"}"#;
        let profile: GameProfile = serde_json::from_str(json).expect("parse failed");
        assert!(profile.properties.is_empty());
    }
}
