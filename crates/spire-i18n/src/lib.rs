//! # spire-i18n
//!
//! Language pieces for Spire. Each language maps terms to literal strings,
//! positional templates, or formatter closures. Lookups fall back to the
//! default language instead of failing, and user languages inherit every
//! term they do not override from the bundled core language of the same
//! file name.

mod bundled;
mod definition;
mod language;
mod store;
mod term;


pub use bundled::install_bundled_languages;
pub use definition::{LanguageDefinition, LanguageOptions};
pub use language::{Language, MergeOutcome, SkipReason, DEFAULT, DEFAULT_LANGUAGE};
pub use store::LanguageStore;
pub use term::{Formatter, Term};
