//! The client: owns the host emitter and the piece stores.

use spire_core::{
    config::{shellexpand, Config},
    emitter::{Emitter, READY},
};
use spire_events::EventStore;
use spire_i18n::{install_bundled_languages, LanguageStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::events::core_events;

/// Ties the emitter, the event store, and the language store together.
pub struct Client {
    config: Config,
    emitter: Arc<Emitter>,
    pub events: EventStore,
    pub languages: LanguageStore,
}

impl Client {
    /// Create a client with empty stores.
    pub fn new(config: Config) -> Self {
        let emitter = Arc::new(Emitter::new());
        let events = EventStore::new(Arc::clone(&emitter), config.events.listener_cleanup);
        let languages = LanguageStore::new(config.languages.default.clone());
        Self {
            config,
            emitter,
            events,
            languages,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn emitter(&self) -> &Arc<Emitter> {
        &self.emitter
    }

    /// Directory holding the bundled core pieces.
    pub fn core_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand(&self.config.spire.core_dir))
    }

    /// Directory holding user pieces.
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand(&self.config.spire.data_dir))
    }

    /// Register the core events and load every language.
    pub async fn load(&mut self) {
        for event in core_events(&self.config.spire.name) {
            self.events.insert(event);
        }

        install_bundled_languages(&self.config.spire.core_dir);
        let (core_dir, data_dir) = (self.core_dir(), self.data_dir());
        self.languages
            .load_all(&core_dir, &data_dir, &self.config.piece_defaults.languages)
            .await;

        info!(
            "{} loaded | events: {} | languages: {} (default: {})",
            self.config.spire.name,
            self.events.len(),
            self.languages.len(),
            self.languages.default_name(),
        );
    }

    /// Emit `ready`. Returns whether anything listened.
    pub fn ready(&self) -> bool {
        self.emitter.emit(READY, &[])
    }

    /// Unregister every event.
    pub fn shutdown(&mut self) {
        self.events.clear();
        info!("{} shut down", self.config.spire.name);
    }
}
