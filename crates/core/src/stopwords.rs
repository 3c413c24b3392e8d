//! Stopword filtering.
//!
//! This module builds a whole-word matcher from a configured word list and
//! strips every occurrence from extracted article text before rendering.
//! The list is loaded once at startup; the filter is immutable afterwards.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::{OrdskyError, Result};

/// A filter that removes a fixed set of words from text.
///
/// Words are matched as standalone tokens (word-boundary match) and removed
/// together with any immediately trailing whitespace, so the remaining text
/// keeps single spaces between surviving words. Matching is literal: the
/// pipeline lowercases text before filtering, so the word list is expected
/// to be lowercase as well.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    pattern: Option<Regex>,
}

impl StopwordFilter {
    /// Builds a filter from a list of words.
    ///
    /// An empty list produces a filter whose [`apply`](Self::apply) is the
    /// identity function.
    pub fn from_list<S: AsRef<str>>(words: &[S]) -> Result<Self> {
        let words: Vec<&str> = words
            .iter()
            .map(|w| w.as_ref())
            .filter(|w| !w.is_empty())
            .collect();

        if words.is_empty() {
            return Ok(Self { pattern: None });
        }

        let alternation = words.iter().map(|w| regex::escape(w)).collect::<Vec<_>>().join("|");
        let pattern = Regex::new(&format!(r"\b(?:{})\b\s*", alternation))
            .map_err(|e| OrdskyError::ConfigError(format!("bad stopword pattern: {}", e)))?;

        Ok(Self { pattern: Some(pattern) })
    }

    /// Builds a filter from a whitespace-separated word-list file.
    ///
    /// # Errors
    ///
    /// Returns [`OrdskyError::ConfigError`] when the file cannot be read.
    /// This is fatal at startup and never retried.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| OrdskyError::ConfigError(format!("cannot read stopword list {}: {}", path.display(), e)))?;

        let words: Vec<&str> = contents.split_whitespace().collect();
        Self::from_list(&words)
    }

    /// Removes every whole-word occurrence of the configured words.
    ///
    /// Each non-overlapping match is deleted along with trailing whitespace,
    /// preserving the relative order of the remaining text.
    pub fn apply(&self, text: &str) -> String {
        match &self.pattern {
            Some(pattern) => pattern.replace_all(text, "").into_owned(),
            None => text.to_string(),
        }
    }

    /// Whether the filter removes anything at all.
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }
}
