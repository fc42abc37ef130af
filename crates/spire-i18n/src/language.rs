//! Language pieces: term lookup with default-language fallback and the
//! one-time core merge.

use spire_core::{config::LanguageDefaults, traits::Piece};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::definition::LanguageDefinition;
use crate::term::Term;

/// Reserved term: formats the notice for a missing term (argument 0 is the term).
pub const DEFAULT: &str = "DEFAULT";

/// Reserved term: label naming the default language in fallback notices.
pub const DEFAULT_LANGUAGE: &str = "DEFAULT_LANGUAGE";

/// Why [`Language::init`] did not attempt a core merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The language is itself a core language.
    IsCore,
    /// No core language exists under the same file name.
    NoCoreDefinition,
}

/// Result of [`Language::init`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Core terms were merged in; `inherited` terms came from the core language.
    Merged { inherited: usize },
    /// No merge was attempted.
    Skipped(SkipReason),
    /// A core language exists but could not be loaded. Own terms are unchanged.
    Failed(String),
}

impl fmt::Display for MergeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Merged { inherited } => write!(f, "merged ({inherited} inherited)"),
            Self::Skipped(SkipReason::IsCore) => f.write_str("core"),
            Self::Skipped(SkipReason::NoCoreDefinition) => f.write_str("standalone"),
            Self::Failed(reason) => write!(f, "core merge failed: {reason}"),
        }
    }
}

/// A language piece.
#[derive(Debug, Clone)]
pub struct Language {
    name: String,
    /// File name relative to the language directory (e.g. `en-US.toml`).
    file: String,
    /// Directory the piece was loaded from.
    dir: PathBuf,
    core: bool,
    enabled: bool,
    terms: HashMap<String, Term>,
}

impl Language {
    /// Create an empty, enabled, non-core language named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            file: format!("{name}.toml"),
            name,
            dir: PathBuf::new(),
            core: false,
            enabled: true,
            terms: HashMap::new(),
        }
    }

    /// Record where the piece was loaded from.
    pub fn located(mut self, dir: impl Into<PathBuf>, file: impl Into<String>) -> Self {
        self.dir = dir.into();
        self.file = file.into();
        self
    }

    /// Mark the piece as a core language.
    pub fn with_core(mut self, core: bool) -> Self {
        self.core = core;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Add or replace a term.
    pub fn with_term(mut self, key: impl Into<String>, term: impl Into<Term>) -> Self {
        self.terms.insert(key.into(), term.into());
        self
    }

    /// Add or replace a formatter term.
    pub fn with_format<F>(self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[&str]) -> String + Send + Sync + 'static,
    {
        self.with_term(key, Term::format(f))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_core(&self) -> bool {
        self.core
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Raw term lookup, without any fallback.
    pub fn term(&self, key: &str) -> Option<&Term> {
        self.terms.get(key)
    }

    pub fn terms(&self) -> &HashMap<String, Term> {
        &self.terms
    }

    /// Whether this piece is `default`.
    pub fn is_default(&self, default: &Language) -> bool {
        std::ptr::eq(self, default) || self.name == default.name
    }

    /// This language's notice for a missing `term`, from its `DEFAULT` formatter.
    pub fn missing(&self, term: &str) -> String {
        match self.terms.get(DEFAULT) {
            Some(t) => t.render(&[term]),
            None => format!("{term} has not been localized for {} yet.", self.name),
        }
    }

    /// This language's label for the default language.
    pub fn default_language_label(&self) -> String {
        match self.terms.get(DEFAULT_LANGUAGE) {
            Some(t) => t.render(&[]),
            None => "Default Language".to_string(),
        }
    }

    /// Render `term` from this piece only. Missing and empty results are `None`.
    pub fn resolve(&self, term: &str, args: &[&str]) -> Option<String> {
        let value = self.terms.get(term).filter(|t| !t.is_empty())?;
        Some(value.render(args)).filter(|s| !s.is_empty())
    }

    /// Look up `term`, falling back to `default` (the store's default language).
    ///
    /// Never fails: a missing term degrades to a notice naming the term,
    /// followed by the default language's rendering when this is not the
    /// default language. A disabled language defers entirely to `default`.
    pub fn get(&self, term: &str, args: &[&str], default: &Language) -> String {
        let is_default = self.is_default(default);
        if !self.enabled && !is_default {
            return default.get(term, args, default);
        }

        if let Some(value) = self.terms.get(term).filter(|t| !t.is_empty()) {
            return value.render(args);
        }

        if is_default {
            return self.missing(term);
        }

        let notice = if self.terms.contains_key(DEFAULT) {
            self.missing(term)
        } else {
            default.missing(term)
        };
        let label = if self.terms.contains_key(DEFAULT_LANGUAGE) {
            self.default_language_label()
        } else {
            default.default_language_label()
        };
        let fallback = default
            .resolve(term, args)
            .unwrap_or_else(|| default.missing(term));

        [notice, String::new(), format!("**{label}:**"), fallback].join("\n")
    }

    /// Merge the core language with the same file name into this one.
    ///
    /// Core languages, and languages without a core counterpart, are left
    /// alone. Load failures are reported in the outcome and leave this
    /// language unchanged.
    pub async fn init(&mut self, core_dir: &Path) -> MergeOutcome {
        let core_languages = core_dir.join("languages");
        if self.core || self.dir == core_languages {
            return MergeOutcome::Skipped(SkipReason::IsCore);
        }

        let loc = core_languages.join(&self.file);
        if !tokio::fs::try_exists(&loc).await.unwrap_or(false) {
            return MergeOutcome::Skipped(SkipReason::NoCoreDefinition);
        }

        let core = match LanguageDefinition::load(&loc).await {
            Ok(def) => def.into_language(
                &core_languages,
                &self.file,
                true,
                &LanguageDefaults::default(),
            ),
            Err(e) => {
                debug!("languages: core merge for '{}' failed: {e}", self.name);
                return MergeOutcome::Failed(e.to_string());
            }
        };

        let inherited = self.merge_core(core);
        info!(
            "languages: merged core {} into '{}' ({inherited} inherited)",
            loc.display(),
            self.name
        );
        MergeOutcome::Merged { inherited }
    }

    /// Use `core`'s terms as the base and this language's terms as overrides.
    /// Returns how many terms came from `core`.
    pub fn merge_core(&mut self, core: Language) -> usize {
        let own = std::mem::take(&mut self.terms);
        let mut merged = core.terms;
        let inherited = merged.keys().filter(|k| !own.contains_key(*k)).count();
        merged.extend(own);
        self.terms = merged;
        inherited
    }
}

impl Piece for Language {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "language"
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}
