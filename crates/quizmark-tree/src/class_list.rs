//! Class token lists
//!
//! A `class` attribute is a whitespace separated list of tokens. Matching
//! treats it as a set, but writes keep the original token order so a
//! rewritten attribute reads like the source.

use std::fmt;

/// Ordered list of class tokens
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Parse a `class` attribute value
    pub fn parse(value: &str) -> Self {
        Self {
            tokens: value.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Check for a token
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Append a token unless it is already present
    ///
    /// Returns `true` if the token was added.
    pub fn push_unique(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        if token.is_empty() || self.contains(&token) {
            return false;
        }
        self.tokens.push(token);
        true
    }

    /// Remove the first token starting with `prefix` and return the rest of it
    ///
    /// `strip_prefixed("id_")` on `exercise id_intro` yields `Some("intro")`
    /// and leaves `exercise`.
    pub fn strip_prefixed(&mut self, prefix: &str) -> Option<String> {
        let pos = self.tokens.iter().position(|t| t.starts_with(prefix))?;
        let token = self.tokens.remove(pos);
        Some(token[prefix.len()..].to_string())
    }

    /// Iterate over tokens in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if there are no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

impl<'a> FromIterator<&'a str> for ClassList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(str::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_collapses_whitespace() {
        let list = ClassList::parse("  admonition   exercise\tchoice ");
        assert_eq!(list.len(), 3);
        assert_eq!(list.to_string(), "admonition exercise choice");
    }

    #[test]
    fn test_contains_is_token_based() {
        let list = ClassList::parse("admonition exercises");
        assert!(!list.contains("exercise"));
        assert!(list.contains("exercises"));
    }

    #[test]
    fn test_push_unique() {
        let mut list = ClassList::parse("admonition exercise");
        assert!(list.push_unique("exercise-choice"));
        assert!(!list.push_unique("exercise-choice"));
        assert_eq!(list.to_string(), "admonition exercise exercise-choice");
    }

    #[test]
    fn test_strip_prefixed_keeps_other_tokens_in_order() {
        let mut list = ClassList::parse("exercise id_foo choice");
        assert_eq!(list.strip_prefixed("id_"), Some("foo".to_string()));
        assert_eq!(list.to_string(), "exercise choice");
        assert_eq!(list.strip_prefixed("id_"), None);
    }
}
