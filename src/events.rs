//! Built-in core events, registered by the client before any user event.

use serde_json::Value;
use spire_core::{
    emitter::{ERROR, PIECE_LOADED, READY, WARN},
    traits::{Event, Piece},
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Flatten event arguments into one log line.
fn describe(args: &[Value]) -> String {
    args.iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Logs whatever is reported on the `error` channel.
pub struct ErrorEvent;

impl Piece for ErrorEvent {
    fn name(&self) -> &str {
        ERROR
    }
    fn kind(&self) -> &'static str {
        "event"
    }
    fn into_event(self: Arc<Self>) -> Option<Arc<dyn Event>> {
        Some(self)
    }
}

impl Event for ErrorEvent {
    fn run(&self, args: &[Value]) {
        error!("{}", describe(args));
    }
}

/// Logs whatever is reported on the `warn` channel.
pub struct WarnEvent;

impl Piece for WarnEvent {
    fn name(&self) -> &str {
        WARN
    }
    fn kind(&self) -> &'static str {
        "event"
    }
    fn into_event(self: Arc<Self>) -> Option<Arc<dyn Event>> {
        Some(self)
    }
}

impl Event for WarnEvent {
    fn run(&self, args: &[Value]) {
        warn!("{}", describe(args));
    }
}

/// Announces that the client finished loading.
pub struct ReadyEvent {
    client_name: String,
}

impl ReadyEvent {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
        }
    }
}

impl Piece for ReadyEvent {
    fn name(&self) -> &str {
        READY
    }
    fn kind(&self) -> &'static str {
        "event"
    }
    fn into_event(self: Arc<Self>) -> Option<Arc<dyn Event>> {
        Some(self)
    }
}

impl Event for ReadyEvent {
    fn run(&self, _args: &[Value]) {
        info!("{} is ready", self.client_name);
    }
}

/// Traces every piece a store reports as newly loaded.
pub struct PieceLoadedEvent;

impl Piece for PieceLoadedEvent {
    fn name(&self) -> &str {
        PIECE_LOADED
    }
    fn kind(&self) -> &'static str {
        "event"
    }
    fn into_event(self: Arc<Self>) -> Option<Arc<dyn Event>> {
        Some(self)
    }
}

impl Event for PieceLoadedEvent {
    fn run(&self, args: &[Value]) {
        for piece in args {
            let store = piece["store"].as_str().unwrap_or("?");
            let name = piece["name"].as_str().unwrap_or("?");
            debug!("loaded {store} piece '{name}'");
        }
    }
}

/// Core events in registration order. `pieceLoaded` goes first so the
/// others are reported through it.
pub fn core_events(client_name: &str) -> Vec<Arc<dyn Event>> {
    vec![
        Arc::new(PieceLoadedEvent) as Arc<dyn Event>,
        Arc::new(ErrorEvent) as Arc<dyn Event>,
        Arc::new(WarnEvent) as Arc<dyn Event>,
        Arc::new(ReadyEvent::new(client_name)) as Arc<dyn Event>,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_describe_joins_args() {
        assert_eq!(describe(&[]), "");
        assert_eq!(
            describe(&[json!("bad piece"), json!(3), json!({"a": 1})]),
            r#"bad piece 3 {"a":1}"#
        );
    }

    #[test]
    fn test_core_events_names() {
        let names: Vec<String> = core_events("Spire")
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        assert_eq!(names, vec![PIECE_LOADED, ERROR, WARN, READY]);
    }
}
