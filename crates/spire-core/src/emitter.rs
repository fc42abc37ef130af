//! Host event emitter: named events dispatched to registered listeners.
//!
//! Every listener gets a [`ListenerId`] token at registration, so owners can
//! remove exactly what they installed without touching other subscribers
//! to the same event name.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::trace;

/// Diagnostic channel. Payload: one string argument.
pub const ERROR: &str = "error";

/// Warning channel. Payload: one string argument.
pub const WARN: &str = "warn";

/// Emitted once the client finished loading.
pub const READY: &str = "ready";

/// Lifecycle notification for newly stored pieces.
/// Payload: `{"store": <store name>, "name": <piece name>}`.
pub const PIECE_LOADED: &str = "pieceLoaded";

/// A callback invoked with the arguments of an emitted event.
pub type Listener = Arc<dyn Fn(&[Value]) + Send + Sync>;

/// Token identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Event emitter shared by the client and its stores.
#[derive(Default)]
pub struct Emitter {
    next_id: AtomicU64,
    listeners: Mutex<HashMap<String, Vec<(ListenerId, Listener)>>>,
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table();
        let counts: HashMap<&str, usize> =
            table.iter().map(|(k, v)| (k.as_str(), v.len())).collect();
        f.debug_struct("Emitter").field("listeners", &counts).finish()
    }
}

impl Emitter {
    /// Create an emitter with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking listener must not brick the table for everyone else.
    fn table(&self) -> MutexGuard<'_, HashMap<String, Vec<(ListenerId, Listener)>>> {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register `callback` under `name` and return its token.
    pub fn add_listener<F>(&self, name: &str, callback: F) -> ListenerId
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.table()
            .entry(name.to_string())
            .or_default()
            .push((id, Arc::new(callback)));
        trace!("emitter: added listener {id:?} for '{name}'");
        id
    }

    /// Remove the single listener `id` from `name`. Returns whether it existed.
    pub fn remove_listener(&self, name: &str, id: ListenerId) -> bool {
        let mut table = self.table();
        let Some(list) = table.get_mut(name) else {
            return false;
        };
        let before = list.len();
        list.retain(|(lid, _)| *lid != id);
        let removed = list.len() != before;
        if list.is_empty() {
            table.remove(name);
        }
        removed
    }

    /// Remove every listener registered under `name`. Returns how many were removed.
    pub fn remove_all_listeners(&self, name: &str) -> usize {
        self.table().remove(name).map(|l| l.len()).unwrap_or(0)
    }

    /// Number of listeners currently registered under `name`.
    pub fn listener_count(&self, name: &str) -> usize {
        self.table().get(name).map(Vec::len).unwrap_or(0)
    }

    /// Invoke every listener under `name` with `args`.
    ///
    /// Listeners are snapshotted before dispatch, so a listener may add or
    /// remove listeners without deadlocking. Returns `true` if any listener ran.
    pub fn emit(&self, name: &str, args: &[Value]) -> bool {
        let snapshot: Vec<Listener> = match self.table().get(name) {
            Some(list) => list.iter().map(|(_, l)| Arc::clone(l)).collect(),
            None => return false,
        };
        for listener in &snapshot {
            listener(args);
        }
        !snapshot.is_empty()
    }

    /// Report a recoverable problem on the [`ERROR`] channel.
    pub fn error(&self, message: impl Into<String>) -> bool {
        self.emit(ERROR, &[Value::String(message.into())])
    }
}
