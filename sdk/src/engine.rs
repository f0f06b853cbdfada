//! Room engine.
//!
//! Owns the [`RoomStore`] and the outbound half of the current connection.
//! A transport drives the engine through a small lifecycle:
//!
//! 1. [`RoomEngine::begin_connect`] supersedes any previous connection and
//!    returns a generation number.
//! 2. [`RoomEngine::attach`] registers the outbox once the socket is open.
//! 3. [`RoomEngine::receive`] applies every inbound text frame.
//! 4. [`RoomEngine::disconnect`] reports a failed or closed connection.
//!
//! Every call carries the generation it was issued for; calls for a
//! superseded connection are ignored, so a reader task that outlives its
//! socket can never touch the store.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::dispatcher::dispatch;
use crate::metrics::SessionMetrics;
use crate::store::RoomStore;
use crate::types::{ChatMessage, ConnectionState};
use crate::ws::error::WsError;
use crate::ws::messages::{decode_frame, ClientMessage};

/// Item queued for the socket writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// An encoded JSON frame.
    Frame(String),
    /// Send a close frame and stop writing.
    Close,
}

struct Link {
    generation: u64,
    outbox: mpsc::UnboundedSender<Outbound>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Client-side room state machine.
pub struct RoomEngine {
    store: RoomStore,
    metrics: Arc<SessionMetrics>,
    link: Mutex<Option<Link>>,
    generation: AtomicU64,
    // Serializes inbound processing so subscribers see events in arrival order.
    dispatch_lock: Mutex<()>,
}

impl RoomEngine {
    /// Creates an engine whose chat transcript starts with `welcome`.
    #[must_use]
    pub fn new(welcome: ChatMessage) -> Self {
        Self {
            store: RoomStore::new(welcome),
            metrics: Arc::new(SessionMetrics::new()),
            link: Mutex::new(None),
            generation: AtomicU64::new(0),
            dispatch_lock: Mutex::new(()),
        }
    }

    /// Returns the state store.
    #[must_use]
    pub fn store(&self) -> &RoomStore {
        &self.store
    }

    /// Returns the session metrics.
    #[must_use]
    pub fn metrics(&self) -> Arc<SessionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Returns the current connection state.
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        *self.store.connection.get()
    }

    /// Returns the generation of the most recent connection attempt.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation() == generation
    }

    /// Starts a new connection attempt.
    ///
    /// Drops the outbox of any previous connection without closing its
    /// socket and moves the state to `Connecting`. Room state is kept.
    pub fn begin_connect(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if lock(&self.link).take().is_some() {
            debug!("Connection superseded by attempt {}", generation);
        }
        self.set_connection(ConnectionState::Connecting);
        generation
    }

    /// Registers the outbox of an open connection.
    ///
    /// Returns false if `generation` has been superseded; the caller should
    /// then drop the socket.
    pub fn attach(&self, generation: u64, outbox: mpsc::UnboundedSender<Outbound>) -> bool {
        let mut link = lock(&self.link);
        if !self.is_current(generation) {
            return false;
        }
        *link = Some(Link { generation, outbox });
        self.metrics.record_connection_opened();
        true
    }

    /// Applies one inbound text frame.
    ///
    /// The first frame of a connection moves the state from `Connecting` to
    /// `Connected`. Frames that fail to decode or apply are logged and
    /// dropped. Returns false if `generation` has been superseded or its
    /// connection is already down, in which case nothing is applied and the
    /// reader should stop.
    ///
    /// Subscribers run on the calling thread while the frame is applied;
    /// they must not call `receive` or `disconnect` themselves.
    pub fn receive(&self, generation: u64, text: &str) -> bool {
        let _guard = lock(&self.dispatch_lock);
        if !self.is_current(generation) {
            return false;
        }

        self.metrics.record_frame_received();
        if !self.mark_connected(generation) {
            debug!("Connection {} closed while receiving", generation);
            return false;
        }

        let message = match decode_frame(text) {
            Ok(message) => message,
            Err(e) => {
                debug!("Dropping frame: {}", e);
                self.metrics.record_frame_dropped();
                return true;
            }
        };

        let kind = message.kind();
        match dispatch(&self.store, message) {
            Ok(outcome) if outcome.is_noop() => {
                debug!("Frame '{}' had no effect", kind);
                self.metrics.record_frame_ignored();
            }
            Ok(outcome) => {
                debug!("Frame '{}' updated {:?}", kind, outcome.changed);
                self.metrics.record_frame_applied();
            }
            Err(e) => {
                debug!("Dropping frame: {}", e);
                self.metrics.record_frame_dropped();
            }
        }

        true
    }

    /// Marks the connection of `generation` as lost.
    ///
    /// Ignored if a newer connection attempt has started. Room state is kept
    /// and no reconnect is attempted.
    pub fn disconnect(&self, generation: u64) {
        let _guard = lock(&self.dispatch_lock);
        if !self.is_current(generation) {
            return;
        }

        let released = {
            let mut link = lock(&self.link);
            match link.as_ref() {
                Some(current) if current.generation == generation => link.take().is_some(),
                _ => false,
            }
        };
        if released {
            self.metrics.record_connection_closed();
        }

        if self.set_connection(ConnectionState::Disconnected) {
            warn!("Disconnected from room");
        }
    }

    /// Closes the current connection from the client side.
    ///
    /// The writer sends a close frame and any reader still running stops
    /// applying frames.
    pub fn close(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(link) = lock(&self.link).take() {
            let _ = link.outbox.send(Outbound::Close);
            self.metrics.record_connection_closed();
        }
        if self.set_connection(ConnectionState::Disconnected) {
            info!("Connection closed");
        }
    }

    /// Returns true if an outbox is attached and its writer is alive.
    #[must_use]
    pub fn is_open(&self) -> bool {
        lock(&self.link)
            .as_ref()
            .is_some_and(|link| !link.outbox.is_closed())
    }

    /// Moves `Connecting` to `Connected` for the current generation.
    ///
    /// The generation is checked inside the slice update, so a concurrent
    /// `close` or `begin_connect` can never be overwritten. Returns false if
    /// the connection is no longer live.
    fn mark_connected(&self, generation: u64) -> bool {
        let entered = self.store.connection.update(|current| {
            (*current == ConnectionState::Connecting && self.is_current(generation))
                .then_some(ConnectionState::Connected)
        });
        if entered {
            info!("Connected to room");
            return true;
        }
        self.connection_state().is_connected() && self.is_current(generation)
    }

    /// Publishes a new connection state. Returns true if it changed.
    fn set_connection(&self, next: ConnectionState) -> bool {
        self.store
            .connection
            .update(|current| (*current != next).then_some(next))
    }

    /// Encodes a message and queues it for the socket writer.
    pub(crate) fn send(&self, message: &ClientMessage) -> Result<(), WsError> {
        let frame = message.encode()?;

        let link = lock(&self.link);
        let link = link.as_ref().ok_or(WsError::NotConnected)?;
        link.outbox
            .send(Outbound::Frame(frame))
            .map_err(|_| WsError::NotConnected)?;

        self.metrics.record_command_sent();
        debug!("Queued '{}' frame", message.kind());
        Ok(())
    }

    /// Records a command that a guard turned into a no-op.
    pub(crate) fn skip(&self, command: &str, reason: &str) -> Result<(), WsError> {
        debug!("Skipping {}: {}", command, reason);
        self.metrics.record_command_skipped();
        Ok(())
    }
}

impl fmt::Debug for RoomEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoomEngine")
            .field("generation", &self.generation())
            .field("connection", &self.connection_state())
            .field("open", &self.is_open())
            .finish()
    }
}
