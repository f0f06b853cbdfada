//! Terminal client configuration.
//!
//! Loaded from the environment with defaults for everything but the
//! username.

use std::env;

use vimeet_sdk::ws::config::{DEFAULT_ORIGIN, DEFAULT_WELCOME_MESSAGE};
use vimeet_sdk::WsConfig;

/// Environment variable holding the origin.
pub const ORIGIN_VAR: &str = "VIMEET_ORIGIN";

/// Environment variable holding the room name.
pub const ROOM_VAR: &str = "VIMEET_ROOM";

/// Environment variable holding the username.
pub const USERNAME_VAR: &str = "VIMEET_USERNAME";

/// Environment variable holding the welcome message.
pub const WELCOME_VAR: &str = "VIMEET_WELCOME";

/// Room joined when none is configured.
pub const DEFAULT_ROOM: &str = "lobby";

/// Configuration for the terminal client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Origin of the room server, e.g. `https://meet.example.com`.
    pub origin: String,

    /// Room to join.
    pub room: String,

    /// Display name in the room.
    pub username: String,

    /// Welcome message seeded into the chat transcript.
    pub welcome_message: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            room: DEFAULT_ROOM.to_string(),
            username: String::new(),
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
        }
    }
}

impl CliConfig {
    /// Loads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration from an arbitrary variable source.
    ///
    /// Unset or blank variables fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            origin: read(ORIGIN_VAR).unwrap_or(defaults.origin),
            room: read(ROOM_VAR).unwrap_or(defaults.room),
            username: read(USERNAME_VAR).unwrap_or(defaults.username),
            welcome_message: read(WELCOME_VAR).unwrap_or(defaults.welcome_message),
        }
    }

    /// Sets the room.
    #[must_use]
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    /// Sets the username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Returns the websocket configuration for the sdk client.
    #[must_use]
    pub fn ws_config(&self) -> WsConfig {
        WsConfig::new(self.origin.clone()).with_welcome_message(self.welcome_message.clone())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.username.is_empty() {
            return Err(ConfigError::MissingUsername);
        }

        if self.room.is_empty() {
            return Err(ConfigError::MissingRoom);
        }

        self.ws_config()
            .validate()
            .map_err(|e| ConfigError::InvalidOrigin(e.to_string()))?;

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No username configured.
    #[error("VIMEET_USERNAME must be set")]
    MissingUsername,

    /// Empty room name.
    #[error("VIMEET_ROOM cannot be empty")]
    MissingRoom,

    /// Origin rejected by the websocket configuration.
    #[error("invalid origin: {0}")]
    InvalidOrigin(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = CliConfig::default();
        assert_eq!(config.origin, DEFAULT_ORIGIN);
        assert_eq!(config.room, DEFAULT_ROOM);
        assert!(config.username.is_empty());
    }

    #[test]
    fn test_config_from_lookup() {
        let config = CliConfig::from_lookup(lookup(&[
            (ORIGIN_VAR, "https://meet.example.com"),
            (ROOM_VAR, "standup"),
            (USERNAME_VAR, "zoë"),
        ]));
        assert_eq!(config.origin, "https://meet.example.com");
        assert_eq!(config.room, "standup");
        assert_eq!(config.username, "zoë");
        assert_eq!(config.welcome_message, DEFAULT_WELCOME_MESSAGE);
    }

    #[test]
    fn test_config_blank_values_use_defaults() {
        let config = CliConfig::from_lookup(lookup(&[(ROOM_VAR, "  ")]));
        assert_eq!(config.room, DEFAULT_ROOM);
    }

    #[test]
    fn test_config_builder() {
        let config = CliConfig::default()
            .with_room("retro")
            .with_username("alice");
        assert_eq!(config.room, "retro");
        assert_eq!(config.username, "alice");
    }

    #[test]
    fn test_config_validate_valid() {
        let config = CliConfig::default().with_username("alice");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_missing_username() {
        let config = CliConfig::default();
        assert_eq!(config.validate(), Err(ConfigError::MissingUsername));
    }

    #[test]
    fn test_config_validate_empty_room() {
        let config = CliConfig::default().with_username("alice").with_room("");
        assert_eq!(config.validate(), Err(ConfigError::MissingRoom));
    }

    #[test]
    fn test_config_validate_bad_origin() {
        let config = CliConfig {
            origin: "ftp://files.example.com".to_string(),
            ..CliConfig::default().with_username("alice")
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidOrigin(_))
        ));
    }

    #[test]
    fn test_config_ws_config() {
        let config = CliConfig {
            welcome_message: "hi".to_string(),
            ..CliConfig::default()
        };
        let ws = config.ws_config();
        assert_eq!(ws.origin, DEFAULT_ORIGIN);
        assert_eq!(ws.welcome_message, "hi");
    }
}
