//! Chat text components.
//!
//! Protocol 335 chat is a JSON document sent as an ordinary string. This
//! module models the subset of the component format the server produces and
//! consumes: plain text with optional formatting and children.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A chat text component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextComponent {
    /// The literal text of this component.
    pub text: String,
    /// Named color, e.g. `"red"` or `"gold"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Bold formatting.
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Italic formatting.
    pub italic: Option<bool>,
    /// Child components appended after this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<TextComponent>,
}

impl TextComponent {
    /// Creates a plain text component.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets the color of this component.
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl From<&str> for TextComponent {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TextComponent {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for TextComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)?;
        for child in &self.extra {
            write!(f, "{child}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_component_serializes_minimal_json() {
        let component = TextComponent::new("Hello, world!");
        let json = serde_json::to_string(&component).expect("serialize failed");
        assert_eq!(json, r#"{"text":"Hello, world!"}"#);
    }

    #[test]
    fn colored_component_round_trip() {
        let component = TextComponent::new("Stronk").color("gold");
        let json = serde_json::to_string(&component).expect("serialize failed");
        let back: TextComponent = serde_json::from_str(&json).expect("parse failed");
        assert_eq!(back, component);
    }
}
