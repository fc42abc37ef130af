//! The language store: loads language pieces and resolves lookups against
//! the configured default language.

use spire_core::{config::LanguageDefaults, store::PieceStore};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::definition::LanguageDefinition;
use crate::language::{Language, MergeOutcome};

/// Stores every language and knows which one is the default.
pub struct LanguageStore {
    pieces: PieceStore<Language>,
    default: String,
    outcomes: BTreeMap<String, MergeOutcome>,
}

impl LanguageStore {
    /// Create an empty store whose default language is `default`.
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            pieces: PieceStore::new("languages"),
            default: default.into(),
            outcomes: BTreeMap::new(),
        }
    }

    /// Store a language, returning the one it replaced.
    pub fn insert(&mut self, language: Language) -> Option<Arc<Language>> {
        self.pieces.insert(Arc::new(language))
    }

    /// Remove a language by name.
    pub fn remove(&mut self, name: &str) -> bool {
        self.outcomes.remove(name);
        self.pieces.remove(name).is_some()
    }

    pub fn get_piece(&self, name: &str) -> Option<&Arc<Language>> {
        self.pieces.get(name)
    }

    /// The default language, if loaded.
    pub fn default_piece(&self) -> Option<&Arc<Language>> {
        self.pieces.get(&self.default)
    }

    pub fn default_name(&self) -> &str {
        &self.default
    }

    /// Core-merge outcome recorded for `name` by [`LanguageStore::load_all`].
    pub fn outcome(&self, name: &str) -> Option<&MergeOutcome> {
        self.outcomes.get(name)
    }

    /// Enable or disable a stored language. Returns `false` if it is unknown.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        let Some(current) = self.pieces.get(name) else {
            return false;
        };
        let mut language = Language::clone(current);
        language.set_enabled(enabled);
        self.pieces.insert(Arc::new(language));
        true
    }

    pub fn names(&self) -> Vec<String> {
        self.pieces.keys()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Look up `term` in `language`.
    ///
    /// Unknown languages resolve through the default language. Without a
    /// default language loaded, the requested language acts as its own
    /// default. With no languages at all the term itself is returned.
    pub fn get(&self, language: &str, term: &str, args: &[&str]) -> String {
        let Some(piece) = self.pieces.get(language).or_else(|| self.default_piece()) else {
            debug!("languages: no language available for '{term}'");
            return term.to_string();
        };
        let default = self.default_piece().unwrap_or(piece);
        piece.get(term, args, default)
    }

    /// Load core languages from `{core_dir}/languages/` and user languages
    /// from `{user_dir}/languages/`, then run the core merge on each.
    ///
    /// A user language replaces a core language of the same name. Files that
    /// fail to parse are skipped with a warning. Returns how many languages
    /// were stored.
    pub async fn load_all(
        &mut self,
        core_dir: &Path,
        user_dir: &Path,
        defaults: &LanguageDefaults,
    ) -> usize {
        let core_languages = core_dir.join("languages");
        let user_languages = user_dir.join("languages");

        let mut loaded: BTreeMap<String, Language> = BTreeMap::new();
        for (dir, core) in [(&core_languages, true), (&user_languages, false)] {
            for path in language_files(dir).await {
                let Some(file) = path.file_name().map(|f| f.to_string_lossy().into_owned()) else {
                    continue;
                };
                match LanguageDefinition::load(&path).await {
                    Ok(def) => {
                        let language = def.into_language(dir, &file, core, defaults);
                        loaded.insert(language.name().to_string(), language);
                    }
                    Err(e) => warn!("languages: skipping {}: {e}", path.display()),
                }
            }
        }

        let count = loaded.len();
        for (name, mut language) in loaded {
            let outcome = language.init(core_dir).await;
            debug!("languages: '{name}' {outcome}");
            self.outcomes.insert(name, outcome);
            self.insert(language);
        }

        if self.default_piece().is_none() {
            warn!("languages: default language '{}' is not loaded", self.default);
        }
        info!("languages: loaded {count} language(s)");
        count
    }
}

/// `*.toml` files directly inside `dir`, sorted. A missing directory is empty.
async fn language_files(dir: &Path) -> Vec<PathBuf> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };

    let mut files = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "toml") && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    files
}
