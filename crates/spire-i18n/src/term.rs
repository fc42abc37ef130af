//! Term values and positional interpolation.

use std::fmt;
use std::sync::Arc;

/// A formatter term: builds a string from caller-supplied arguments.
pub type Formatter = Arc<dyn Fn(&[&str]) -> String + Send + Sync>;

/// The value a language maps a term to.
#[derive(Clone)]
pub enum Term {
    /// A literal string, returned as-is.
    Text(String),
    /// A string with positional `{0}`, `{1}`, ... placeholders.
    Template(String),
    /// A closure taking the lookup arguments.
    Format(Formatter),
}

impl Term {
    /// Wrap a closure as a formatter term.
    pub fn format<F>(f: F) -> Self
    where
        F: Fn(&[&str]) -> String + Send + Sync + 'static,
    {
        Self::Format(Arc::new(f))
    }

    /// Classify a string from a language file: strings with positional
    /// placeholders become templates, everything else is literal text.
    pub fn parse(value: impl Into<String>) -> Self {
        let value = value.into();
        if has_placeholder(&value) {
            Self::Template(value)
        } else {
            Self::Text(value)
        }
    }

    /// Produce the term's string for `args`.
    ///
    /// Without arguments, text and templates are returned verbatim. With
    /// arguments, templates are interpolated and literal text ignores them.
    pub fn render(&self, args: &[&str]) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Template(t) if args.is_empty() => t.clone(),
            Self::Template(t) => interpolate(t, args),
            Self::Format(f) => f(args),
        }
    }

    /// Empty literals count as missing during lookup.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) | Self::Template(s) => s.is_empty(),
            Self::Format(_) => false,
        }
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Template(t) => f.debug_tuple("Template").field(t).finish(),
            Self::Format(_) => f.write_str("Format(..)"),
        }
    }
}

impl From<&str> for Term {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Term {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Parse `{N}` at the start of `s`, returning the index and the token length.
fn placeholder_at(s: &str) -> Option<(usize, usize)> {
    let rest = s.strip_prefix('{')?;
    let end = rest.find('}')?;
    let digits = &rest[..end];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((digits.parse().ok()?, end + 2))
}

fn has_placeholder(s: &str) -> bool {
    s.match_indices('{')
        .any(|(i, _)| placeholder_at(&s[i..]).is_some())
}

/// Replace `{N}` with `args[N]` in a single pass.
///
/// Placeholders without a matching argument are left as-is.
pub(crate) fn interpolate(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match placeholder_at(tail) {
            Some((idx, len)) if idx < args.len() => {
                out.push_str(args[idx]);
                rest = &tail[len..];
            }
            _ => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classifies_placeholders() {
        assert!(matches!(Term::parse("Ping?"), Term::Text(_)));
        assert!(matches!(Term::parse("Hello {0}"), Term::Template(_)));
        assert!(matches!(Term::parse("{name} is not positional"), Term::Text(_)));
        assert!(matches!(Term::parse("braces {} only"), Term::Text(_)));
    }

    #[test]
    fn test_interpolate_positional() {
        assert_eq!(
            interpolate("Pong! Took {0}ms, heartbeat {1}ms.", &["12", "40"]),
            "Pong! Took 12ms, heartbeat 40ms."
        );
        assert_eq!(interpolate("{1} before {0}", &["a", "b"]), "b before a");
        assert_eq!(interpolate("{0}{0}", &["x"]), "xx");
    }

    #[test]
    fn test_interpolate_leaves_unmatched_tokens() {
        assert_eq!(interpolate("{0} and {3}", &["one"]), "one and {3}");
        assert_eq!(interpolate("{oops} {0}", &["ok"]), "{oops} ok");
        assert_eq!(interpolate("trailing {", &["x"]), "trailing {");
    }

    #[test]
    fn test_interpolate_is_single_pass() {
        assert_eq!(interpolate("{0}", &["{1}", "nested"]), "{1}");
    }

    #[test]
    fn test_render_without_args_is_verbatim() {
        assert_eq!(Term::parse("Hi {0}").render(&[]), "Hi {0}");
        assert_eq!(Term::from("plain").render(&["ignored"]), "plain");
    }

    #[test]
    fn test_format_term_receives_args() {
        let term = Term::format(|args| format!("{} args", args.len()));
        assert_eq!(term.render(&["a", "b"]), "2 args");
        assert_eq!(term.render(&[]), "0 args");
        assert!(!term.is_empty());
    }

    #[test]
    fn test_empty_literal_is_empty() {
        assert!(Term::from("").is_empty());
        assert!(!Term::from(" ").is_empty());
    }
}
