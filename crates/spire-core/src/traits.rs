use serde_json::Value;
use std::sync::Arc;

/// A piece: a named, individually loadable unit kept in a store.
///
/// Every event handler and language implements this trait so stores can
/// accept pieces from a loader without knowing their concrete type.
pub trait Piece: Send + Sync {
    /// Unique name within the piece's store.
    fn name(&self) -> &str;

    /// Piece type, e.g. `"event"` or `"language"`.
    fn kind(&self) -> &'static str;

    /// Whether the piece is enabled.
    fn enabled(&self) -> bool {
        true
    }

    /// Upcast to an event handler, if this piece is one.
    fn into_event(self: Arc<Self>) -> Option<Arc<dyn Event>> {
        None
    }
}

/// An event handler piece, run whenever the host emits an event named
/// after the piece.
pub trait Event: Piece {
    /// Handle one emission of the event.
    fn run(&self, args: &[Value]);
}

/// Anything a store can resolve to a piece name: the name itself or the piece.
pub trait PieceKey {
    fn piece_name(&self) -> &str;
}

impl PieceKey for str {
    fn piece_name(&self) -> &str {
        self
    }
}

impl PieceKey for String {
    fn piece_name(&self) -> &str {
        self
    }
}

impl<T: Piece + ?Sized> PieceKey for Arc<T> {
    fn piece_name(&self) -> &str {
        self.name()
    }
}
