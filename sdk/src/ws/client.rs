//! WebSocket client implementation.
//!
//! Opens the room socket and wires it to a [`RoomEngine`]: a reader task
//! feeds inbound text frames to the engine and a writer task drains the
//! engine's outbox to the socket.

use std::sync::Arc;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info};

use super::config::WsConfig;
use super::error::WsError;
use crate::engine::{Outbound, RoomEngine};
use crate::store::RoomStore;
use crate::types::ChatMessage;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

/// WebSocket client for one room session.
///
/// Cloning is cheap; clones share the same engine and store.
#[derive(Debug, Clone)]
pub struct RoomClient {
    config: WsConfig,
    engine: Arc<RoomEngine>,
}

impl RoomClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: WsConfig) -> Result<Self, WsError> {
        config.validate()?;

        let welcome = ChatMessage::welcome(config.welcome_message.clone());

        Ok(Self {
            config,
            engine: Arc::new(RoomEngine::new(welcome)),
        })
    }

    /// Creates a new client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_defaults() -> Result<Self, WsError> {
        Self::new(WsConfig::default())
    }

    /// Creates a new client for the given origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_origin(origin: impl Into<String>) -> Result<Self, WsError> {
        Self::new(WsConfig::new(origin))
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &WsConfig {
        &self.config
    }

    /// Returns the engine, which also carries the command API.
    #[must_use]
    pub fn engine(&self) -> &Arc<RoomEngine> {
        &self.engine
    }

    /// Returns the state store.
    #[must_use]
    pub fn store(&self) -> &RoomStore {
        self.engine.store()
    }

    /// Returns true once the server has sent a frame on the current
    /// connection.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.engine.connection_state().is_connected()
    }

    /// Connects to `room` as `username`.
    ///
    /// Any previous connection is superseded: its frames are no longer
    /// applied and its outbox is dropped. Room state is kept. The state
    /// becomes `Connected` when the first frame arrives, not when this
    /// returns.
    ///
    /// # Errors
    ///
    /// Returns `WsError::InvalidConfig` for an empty room or username,
    /// `WsError::Connection` if the handshake fails and `WsError::Closed` if
    /// another `connect` superseded this one while it was in progress.
    pub async fn connect(&self, username: &str, room: &str) -> Result<(), WsError> {
        let url = self.config.room_url(room, username)?;
        let generation = self.engine.begin_connect();

        info!("Connecting to room '{}' as '{}'", room, username);

        let (ws_stream, _) = match tokio_tungstenite::connect_async(&url).await {
            Ok(connected) => connected,
            Err(e) => {
                error!("Failed to connect to {}: {}", url, e);
                self.engine.disconnect(generation);
                return Err(WsError::Connection(e.to_string()));
            }
        };

        let (sink, source) = ws_stream.split();
        let (outbox, inbox) = mpsc::unbounded_channel();

        if !self.engine.attach(generation, outbox) {
            debug!("Connection {} superseded during handshake", generation);
            return Err(WsError::Closed);
        }

        self.spawn_writer(generation, sink, inbox);
        self.spawn_reader(generation, source);

        Ok(())
    }

    /// Spawns the message reader task.
    fn spawn_reader(&self, generation: u64, mut source: WsSource) {
        let engine = Arc::clone(&self.engine);

        tokio::spawn(async move {
            while let Some(result) = source.next().await {
                match result {
                    Ok(Message::Text(text)) => {
                        if !engine.receive(generation, text.as_str()) {
                            debug!("Reader for connection {} stopped", generation);
                            return;
                        }
                    }
                    Ok(Message::Close(frame)) => {
                        info!("Server closed the connection: {:?}", frame);
                        break;
                    }
                    Err(e) => {
                        error!("WebSocket read error: {}", WsError::from(e));
                        break;
                    }
                    _ => {}
                }
            }
            engine.disconnect(generation);
        });
    }

    /// Spawns the outbox writer task.
    fn spawn_writer(
        &self,
        generation: u64,
        mut sink: WsSink,
        mut inbox: mpsc::UnboundedReceiver<Outbound>,
    ) {
        let engine = Arc::clone(&self.engine);

        tokio::spawn(async move {
            while let Some(outbound) = inbox.recv().await {
                match outbound {
                    Outbound::Frame(json) => {
                        if let Err(e) = sink.send(Message::Text(json.into())).await {
                            error!("{}", WsError::SendFailed(e.to_string()));
                            engine.disconnect(generation);
                            break;
                        }
                    }
                    Outbound::Close => {
                        let _ = sink.send(Message::Close(None)).await;
                        break;
                    }
                }
            }
        });
    }

    /// Closes the connection gracefully. Room state is kept.
    pub fn close(&self) {
        self.engine.close();
    }
}
