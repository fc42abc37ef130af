use serde_json::json;
use spire_core::{
    config::ListenerCleanup,
    emitter::{Emitter, ListenerId, PIECE_LOADED},
    store::PieceStore,
    traits::{Event, Piece, PieceKey},
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Stores every event piece and keeps exactly one emitter listener per
/// stored event.
pub struct EventStore {
    emitter: Arc<Emitter>,
    cleanup: ListenerCleanup,
    pieces: PieceStore<dyn Event>,
    /// Listener token installed for each stored event, keyed by event name.
    listeners: HashMap<String, ListenerId>,
}

impl EventStore {
    /// Create an empty store wired to `emitter`.
    pub fn new(emitter: Arc<Emitter>, cleanup: ListenerCleanup) -> Self {
        Self {
            emitter,
            cleanup,
            pieces: PieceStore::new("events"),
            listeners: HashMap::new(),
        }
    }

    /// Store a piece coming from a loader.
    ///
    /// Pieces that are not events are rejected on the emitter's `error`
    /// channel and `None` is returned.
    pub fn register(&mut self, piece: Arc<dyn Piece>) -> Option<Arc<dyn Event>> {
        let name = piece.name().to_string();
        match piece.into_event() {
            Some(event) => Some(self.insert(event)),
            None => {
                debug!("events: rejected non-event piece '{name}'");
                self.emitter
                    .error("Only events may be stored in the EventStore.");
                None
            }
        }
    }

    /// Store `event` and start listening for its name.
    ///
    /// An event already stored under the same name is fully unregistered
    /// first; otherwise a `pieceLoaded` notification is emitted when anyone
    /// listens for it.
    pub fn insert(&mut self, event: Arc<dyn Event>) -> Arc<dyn Event> {
        let name = event.name().to_string();
        if self.pieces.has(&name) {
            self.unregister(name.as_str());
        } else if self.emitter.listener_count(PIECE_LOADED) > 0 {
            self.emitter.emit(
                PIECE_LOADED,
                &[json!({ "store": self.pieces.name(), "name": name })],
            );
        }

        let handler = Arc::clone(&event);
        let id = self.emitter.add_listener(&name, move |args| {
            if handler.enabled() {
                handler.run(args);
            }
        });
        self.listeners.insert(name.clone(), id);
        self.pieces.insert(Arc::clone(&event));
        debug!("events: registered '{name}'");
        event
    }

    /// Remove an event by name or by piece. Returns `false` if it is not stored.
    pub fn unregister<K: PieceKey + ?Sized>(&mut self, key: &K) -> bool {
        let Some(event) = self.pieces.resolve(key) else {
            return false;
        };
        let name = event.name().to_string();

        match self.cleanup {
            ListenerCleanup::Owned => {
                if let Some(id) = self.listeners.remove(&name) {
                    self.emitter.remove_listener(&name, id);
                }
            }
            ListenerCleanup::All => {
                self.listeners.remove(&name);
                self.emitter.remove_all_listeners(&name);
            }
        }
        self.pieces.remove(&name);
        debug!("events: unregistered '{name}'");
        true
    }

    /// Unregister every stored event.
    pub fn clear(&mut self) {
        for name in self.pieces.keys() {
            self.unregister(name.as_str());
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Event>> {
        self.pieces.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.pieces.has(name)
    }

    /// Names of all stored events, sorted.
    pub fn names(&self) -> Vec<String> {
        self.pieces.keys()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn cleanup(&self) -> ListenerCleanup {
        self.cleanup
    }

    /// The emitter this store installs listeners on.
    pub fn emitter(&self) -> &Arc<Emitter> {
        &self.emitter
    }
}
