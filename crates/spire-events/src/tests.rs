use super::*;
use serde_json::Value;
use spire_core::config::ListenerCleanup;
use spire_core::emitter::{Emitter, ERROR, PIECE_LOADED};
use spire_core::traits::{Event, Piece};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Event piece that counts how often it ran.
struct Counting {
    name: &'static str,
    runs: AtomicUsize,
    enabled: AtomicBool,
}

impl Counting {
    fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            runs: AtomicUsize::new(0),
            enabled: AtomicBool::new(true),
        })
    }

    fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl Piece for Counting {
    fn name(&self) -> &str {
        self.name
    }
    fn kind(&self) -> &'static str {
        "event"
    }
    fn enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
    fn into_event(self: Arc<Self>) -> Option<Arc<dyn Event>> {
        Some(self)
    }
}

impl Event for Counting {
    fn run(&self, _args: &[Value]) {
        self.runs.fetch_add(1, Ordering::SeqCst);
    }
}

/// A piece that is not an event.
struct NotAnEvent;

impl Piece for NotAnEvent {
    fn name(&self) -> &str {
        "ready"
    }
    fn kind(&self) -> &'static str {
        "language"
    }
}

fn store(cleanup: ListenerCleanup) -> EventStore {
    EventStore::new(Arc::new(Emitter::new()), cleanup)
}

fn capture(emitter: &Emitter, name: &str) -> Arc<Mutex<Vec<Value>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = Arc::clone(&seen);
    emitter.add_listener(name, move |args| {
        s.lock().unwrap().extend(args.iter().cloned());
    });
    seen
}

#[test]
fn test_register_then_unregister_round_trip() {
    let mut events = store(ListenerCleanup::Owned);
    let ready = Counting::new("ready");
    events.insert(ready.clone());

    assert_eq!(events.emitter().listener_count("ready"), 1);
    assert!(events.has("ready"));

    assert!(events.unregister("ready"));
    assert_eq!(events.emitter().listener_count("ready"), 0);
    assert!(events.get("ready").is_none());
}

#[test]
fn test_emit_runs_registered_event() {
    let mut events = store(ListenerCleanup::Owned);
    let ready = Counting::new("ready");
    events.insert(ready.clone());

    events.emitter().emit("ready", &[]);
    events.emitter().emit("ready", &[]);
    assert_eq!(ready.runs(), 2);
}

#[test]
fn test_reregister_replaces_old_handler() {
    let mut events = store(ListenerCleanup::Owned);
    let old = Counting::new("message");
    let new = Counting::new("message");
    events.insert(old.clone());
    events.insert(new.clone());

    assert_eq!(events.len(), 1);
    assert_eq!(events.emitter().listener_count("message"), 1);

    events.emitter().emit("message", &[]);
    assert_eq!(old.runs(), 0);
    assert_eq!(new.runs(), 1);
}

#[test]
fn test_reregister_keeps_foreign_listeners_with_owned_cleanup() {
    let mut events = store(ListenerCleanup::Owned);
    let foreign = capture(events.emitter(), "message");
    let old = Counting::new("message");
    let new = Counting::new("message");
    events.insert(old.clone());
    events.insert(new.clone());

    assert_eq!(events.emitter().listener_count("message"), 2);
    events
        .emitter()
        .emit("message", &[Value::String("hi".into())]);
    assert_eq!(old.runs(), 0);
    assert_eq!(new.runs(), 1);
    assert_eq!(foreign.lock().unwrap().len(), 1);
}

#[test]
fn test_all_cleanup_removes_foreign_listeners() {
    let mut events = store(ListenerCleanup::All);
    let foreign = capture(events.emitter(), "message");
    events.insert(Counting::new("message"));
    assert_eq!(events.emitter().listener_count("message"), 2);

    assert!(events.unregister("message"));
    assert_eq!(events.emitter().listener_count("message"), 0);
    events.emitter().emit("message", &[]);
    assert!(foreign.lock().unwrap().is_empty());
}

#[test]
fn test_unregister_unknown_name() {
    let mut events = store(ListenerCleanup::Owned);
    events.insert(Counting::new("ready"));
    assert!(!events.unregister("unknown-name"));
    assert_eq!(events.len(), 1);
    assert_eq!(events.emitter().listener_count("ready"), 1);
}

#[test]
fn test_unregister_by_piece() {
    let mut events = store(ListenerCleanup::Owned);
    let stored = events.insert(Counting::new("guildCreate"));
    assert!(events.unregister(&stored));
    assert!(events.is_empty());
}

#[test]
fn test_clear_empties_store_and_listeners() {
    let mut events = store(ListenerCleanup::Owned);
    for name in ["ready", "message", "guildCreate", "error"] {
        events.insert(Counting::new(name));
    }
    assert_eq!(events.len(), 4);

    events.clear();
    assert!(events.is_empty());
    for name in ["ready", "message", "guildCreate", "error"] {
        assert!(events.get(name).is_none());
        assert_eq!(events.emitter().listener_count(name), 0);
    }
}

#[test]
fn test_register_rejects_non_event_piece() {
    let mut events = store(ListenerCleanup::Owned);
    let errors = capture(events.emitter(), ERROR);

    assert!(events.register(Arc::new(NotAnEvent)).is_none());
    assert!(events.is_empty());
    assert_eq!(events.emitter().listener_count("ready"), 0);
    assert_eq!(
        *errors.lock().unwrap(),
        vec![Value::String(
            "Only events may be stored in the EventStore.".into()
        )]
    );
}

#[test]
fn test_register_accepts_event_piece() {
    let mut events = store(ListenerCleanup::Owned);
    let piece: Arc<dyn Piece> = Counting::new("ready");
    let stored = events.register(piece).expect("event piece is accepted");
    assert_eq!(stored.name(), "ready");
    assert_eq!(events.emitter().listener_count("ready"), 1);
}

#[test]
fn test_piece_loaded_emitted_only_for_new_names() {
    let mut events = store(ListenerCleanup::Owned);
    let loaded = capture(events.emitter(), PIECE_LOADED);

    events.insert(Counting::new("ready"));
    events.insert(Counting::new("ready"));

    let loaded = loaded.lock().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0]["store"], "events");
    assert_eq!(loaded[0]["name"], "ready");
}

#[test]
fn test_disabled_event_is_not_run() {
    let mut events = store(ListenerCleanup::Owned);
    let ready = Counting::new("ready");
    events.insert(ready.clone());
    ready.enabled.store(false, Ordering::SeqCst);

    events.emitter().emit("ready", &[]);
    assert_eq!(ready.runs(), 0);
}
