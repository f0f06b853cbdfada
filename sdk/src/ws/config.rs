//! WebSocket configuration.
//!
//! Provides configuration options for the room client.

use url::Url;

use super::error::WsError;

/// Default origin the client was served from.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8000";

/// Default welcome message seeded into every chat transcript.
pub const DEFAULT_WELCOME_MESSAGE: &str =
    "Welcome! Messages you send here are visible to everyone in the room.";

/// Path prefix of the room websocket endpoint.
pub const WS_PATH_PREFIX: &str = "/ws";

/// Room client configuration.
#[derive(Debug, Clone)]
pub struct WsConfig {
    /// Origin the client belongs to, e.g. `https://meet.example.com`.
    ///
    /// Its scheme selects `ws` or `wss`; any path is ignored.
    pub origin: String,

    /// Text of the welcome message seeded into the chat transcript.
    pub welcome_message: String,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
        }
    }
}

impl WsConfig {
    /// Creates a new configuration with the given origin.
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            ..Default::default()
        }
    }

    /// Sets the welcome message.
    #[must_use]
    pub fn with_welcome_message(mut self, text: impl Into<String>) -> Self {
        self.welcome_message = text.into();
        self
    }

    /// Parses the origin once into the websocket scheme and `host[:port]`.
    fn endpoint(&self) -> Result<(&'static str, String), WsError> {
        let origin = Url::parse(&self.origin).map_err(|e| {
            WsError::InvalidConfig(format!("invalid origin '{}': {}", self.origin, e))
        })?;

        let scheme = match origin.scheme() {
            "https" | "wss" => "wss",
            "http" | "ws" => "ws",
            other => {
                return Err(WsError::InvalidConfig(format!(
                    "unsupported origin scheme: {}",
                    other
                )))
            }
        };

        let host = origin
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| WsError::InvalidConfig("origin must include a host".to_string()))?;

        let host = match origin.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Ok((scheme, host))
    }

    /// Returns the websocket scheme matching the origin's scheme.
    ///
    /// # Errors
    ///
    /// Returns an error if the origin does not parse or its scheme is not
    /// one of `http`, `https`, `ws` or `wss`.
    pub fn ws_scheme(&self) -> Result<&'static str, WsError> {
        self.endpoint().map(|(scheme, _)| scheme)
    }

    /// Returns the host of the origin, with its port when one is given.
    ///
    /// Credentials, path, query and fragment are not part of the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the origin does not parse or has no host.
    pub fn host(&self) -> Result<String, WsError> {
        self.endpoint().map(|(_, host)| host)
    }

    /// Builds the websocket URL for a room.
    ///
    /// The result has the form `scheme://host/ws/{room}/{username}/` with both
    /// segments percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if the origin is invalid or either segment is empty.
    pub fn room_url(&self, room: &str, username: &str) -> Result<String, WsError> {
        if room.is_empty() {
            return Err(WsError::InvalidConfig("room cannot be empty".to_string()));
        }
        if username.is_empty() {
            return Err(WsError::InvalidConfig(
                "username cannot be empty".to_string(),
            ));
        }

        let (scheme, host) = self.endpoint()?;

        Ok(format!(
            "{}://{}{}/{}/{}/",
            scheme,
            host,
            WS_PATH_PREFIX,
            urlencoding::encode(room),
            urlencoding::encode(username)
        ))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), WsError> {
        if self.origin.is_empty() {
            return Err(WsError::InvalidConfig(
                "origin cannot be empty".to_string(),
            ));
        }

        self.endpoint()?;

        Ok(())
    }
}
