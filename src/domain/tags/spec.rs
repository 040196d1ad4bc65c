//! Tag specifications: selection and suppression
//!
//! A tag specification is a list of tags separated by a multi-value separator
//! (`,` by default, `;` is always accepted). Each tag may have several levels
//! separated by periods, e.g. `Favorites.Tech`.
//!
//! # Examples
//!
//! ```
//! use notepub::domain::tags::TagSpec;
//!
//! let spec = TagSpec::parse("work, Favorites.Tech");
//! assert!(spec.matches("favorites.music"));
//! assert_eq!(TagSpec::parse("b").suppress("a.b"), "a");
//! ```

use std::fmt;

/// Default separator between tags in a tag string
pub const DEFAULT_SEPARATOR: char = ',';

/// Split a raw tag string into trimmed tags, normalizing the period-separated levels
pub fn split_tags(raw: &str, separator: char) -> Vec<String> {
    raw.split(|c| c == separator || c == ';')
        .map(|tag| tag_levels(tag).join("."))
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// The non-empty, trimmed levels of a single tag
pub fn tag_levels(tag: &str) -> Vec<&str> {
    tag.split('.')
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .collect()
}

/// Join tags back into a tag string
pub fn join_tags(tags: &[String], separator: char) -> String {
    tags.join(&format!("{} ", separator))
}

/// A parsed tag specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSpec {
    tokens: Vec<String>,
    separator: char,
}

impl TagSpec {
    /// Parse a specification using the default separator
    pub fn parse(spec: &str) -> Self {
        Self::parse_with_separator(spec, DEFAULT_SEPARATOR)
    }

    /// Parse a specification using a configured multi-value separator
    pub fn parse_with_separator(spec: &str, separator: char) -> Self {
        TagSpec {
            tokens: split_tags(spec, separator),
            separator,
        }
    }

    /// Parse an optional specification; blank input yields `None`
    pub fn parse_optional(spec: &str, separator: char) -> Option<Self> {
        let parsed = Self::parse_with_separator(spec, separator);
        (!parsed.is_empty()).then_some(parsed)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Lower-cased top-level segment of every token
    pub fn top_levels(&self) -> Vec<String> {
        self.tokens
            .iter()
            .filter_map(|t| tag_levels(t).first().map(|s| s.to_lowercase()))
            .collect()
    }

    /// Does any top-level tag in `note_tags` match a top-level token of this spec?
    ///
    /// Matching is case-insensitive. An empty specification matches nothing.
    pub fn matches(&self, note_tags: &str) -> bool {
        let wanted = self.top_levels();
        if wanted.is_empty() {
            return false;
        }

        split_tags(note_tags, self.separator).iter().any(|tag| {
            tag_levels(tag)
                .first()
                .is_some_and(|top| wanted.contains(&top.to_lowercase()))
        })
    }

    /// Produce a new tag string with this spec's tokens removed.
    ///
    /// A multi-level token removes an equal tag; a single-level token removes
    /// that level from every tag. Tags left without levels are dropped.
    /// Applying the same suppression twice gives the same result as once.
    pub fn suppress(&self, note_tags: &str) -> String {
        let whole: Vec<String> = self
            .tokens
            .iter()
            .filter(|t| t.contains('.'))
            .map(|t| t.to_lowercase())
            .collect();
        let levels: Vec<String> = self
            .tokens
            .iter()
            .filter(|t| !t.contains('.'))
            .map(|t| t.to_lowercase())
            .collect();

        let mut kept: Vec<String> = Vec::new();
        for tag in split_tags(note_tags, self.separator) {
            if whole.contains(&tag.to_lowercase()) {
                continue;
            }

            let reduced = tag_levels(&tag)
                .into_iter()
                .filter(|level| !levels.contains(&level.to_lowercase()))
                .collect::<Vec<_>>()
                .join(".");

            if reduced.is_empty() || whole.contains(&reduced.to_lowercase()) {
                continue;
            }

            if !kept.iter().any(|k| k.eq_ignore_ascii_case(&reduced)) {
                kept.push(reduced);
            }
        }

        join_tags(&kept, self.separator)
    }
}

impl fmt::Display for TagSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", join_tags(&self.tokens, self.separator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_tags_trims_levels_and_separators() {
        assert_eq!(
            split_tags(" Favorites . Tech ;work,, ", ','),
            vec!["Favorites.Tech".to_string(), "work".to_string()]
        );
    }

    #[test]
    fn test_custom_separator() {
        let spec = TagSpec::parse_with_separator("a | b.c", '|');
        assert_eq!(spec.tokens(), &["a".to_string(), "b.c".to_string()]);
        assert!(spec.matches("x | B.z"));
        assert_eq!(spec.to_string(), "a| b.c");
    }

    #[test]
    fn test_matches_top_level_case_insensitive() {
        let spec = TagSpec::parse("Favorites.Tech");
        assert!(spec.matches("favorites.music"));
        assert!(spec.matches("other, FAVORITES"));
        assert!(!spec.matches("tech"));
        assert!(!spec.matches("work.favorites"));
    }

    #[test]
    fn test_empty_spec_matches_nothing() {
        let spec = TagSpec::parse("  ");
        assert!(spec.is_empty());
        assert!(!spec.matches("anything"));
        assert!(TagSpec::parse_optional(" , ", ',').is_none());
    }

    #[test]
    fn test_suppress_single_level() {
        assert_eq!(TagSpec::parse("b").suppress("a.b"), "a");
        assert_eq!(TagSpec::parse("B").suppress("a.b, b, c"), "a, c");
    }

    #[test]
    fn test_suppress_multi_level_removes_whole_tag() {
        let spec = TagSpec::parse("a.b");
        assert_eq!(spec.suppress("a.b, a.c, a"), "a.c, a");
    }

    #[test]
    fn test_suppress_is_idempotent() {
        let spec = TagSpec::parse("a, b.c");
        let once = spec.suppress("a.b.c, a.d, x.a, b.c.d");
        let twice = spec.suppress(&once);
        assert_eq!(once, twice);
        assert_eq!(once, "d, x, b.c.d");
    }

    #[test]
    fn test_suppress_everything_yields_empty() {
        assert_eq!(TagSpec::parse("a").suppress("a"), "");
    }
}
