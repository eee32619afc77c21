//! Notation token store
//!
//! Ordered, editable list of move tokens as extracted from a scoresheet.
//! Index order is ply order. Tokens can be overwritten in place; the list
//! length only changes when a whole new list is loaded.

use crate::error::{ReplayError, ReplayResult};

/// Ordered list of notation tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStore {
    /// Index 0 = White's first move, index 1 = Black's reply, ...
    tokens: Vec<String>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole sequence
    pub fn load<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens = tokens.into_iter().map(Into::into).collect();
    }

    /// Overwrite one token; length is unchanged
    pub fn edit(&mut self, index: usize, value: impl Into<String>) -> ReplayResult<()> {
        let len = self.tokens.len();
        let slot = self
            .tokens
            .get_mut(index)
            .ok_or(ReplayError::IndexOutOfRange { index, len })?;
        *slot = value.into();
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// `true` when the token is empty or whitespace only
    pub fn is_blank(&self, index: usize) -> bool {
        self.get(index).is_some_and(|token| token.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}
