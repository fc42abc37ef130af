//! Language files: TOML definitions that build [`Language`] pieces.

use serde::Deserialize;
use spire_core::{config::LanguageDefaults, error::SpireError};
use std::collections::HashMap;
use std::path::Path;

use crate::language::Language;
use crate::term::Term;

/// Per-file piece options. Unset fields fall back to `[piece_defaults.languages]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageOptions {
    /// Piece name. Defaults to the file stem.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// A term value in a language file: one string, or lines joined with `\n`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTerm {
    One(String),
    Lines(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct RawDefinition {
    #[serde(default)]
    options: LanguageOptions,
    terms: Option<HashMap<String, RawTerm>>,
}

/// A parsed language file.
#[derive(Debug, Clone)]
pub struct LanguageDefinition {
    pub options: LanguageOptions,
    pub terms: HashMap<String, Term>,
}

impl LanguageDefinition {
    /// Parse a language file. A file without a `[terms]` table is not a language.
    pub fn parse(content: &str) -> Result<Self, SpireError> {
        let raw: RawDefinition = toml::from_str(content)?;
        let terms = raw
            .terms
            .ok_or_else(|| SpireError::Language("missing [terms] table".into()))?
            .into_iter()
            .map(|(key, value)| {
                let text = match value {
                    RawTerm::One(s) => s,
                    RawTerm::Lines(lines) => lines.join("\n"),
                };
                (key, Term::parse(text))
            })
            .collect();
        Ok(Self {
            options: raw.options,
            terms,
        })
    }

    /// Read and parse the language file at `path`.
    pub async fn load(path: &Path) -> Result<Self, SpireError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    /// Build the piece, merging the file's options over `defaults`.
    pub fn into_language(
        self,
        dir: &Path,
        file: &str,
        core: bool,
        defaults: &LanguageDefaults,
    ) -> Language {
        let name = self.options.name.unwrap_or_else(|| {
            Path::new(file)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.to_string())
        });
        let enabled = self.options.enabled.unwrap_or(defaults.enabled);

        self.terms.into_iter().fold(
            Language::new(name)
                .located(dir, file)
                .with_core(core)
                .with_enabled(enabled),
            |lang, (key, term)| lang.with_term(key, term),
        )
    }
}
