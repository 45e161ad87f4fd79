//! # DelimitedList
//!
//! Tags and links travel as a single comma-delimited string
//! (`"Vastu, Puja"`). The stored text is kept exactly as submitted; readers
//! go through [`DelimitedList::items`] instead of splitting ad hoc.

use serde::{Deserialize, Serialize};
use std::fmt;

const SEPARATOR: char = ',';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DelimitedList(String);

impl DelimitedList {
    /// Wraps the wire form. Returns `None` for blank input so that an empty
    /// form field never reaches storage as `""`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Builds the wire form from individual labels, dropping blank ones.
    pub fn from_items<I, S>(items: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = items
            .into_iter()
            .map(|item| item.as_ref().trim().to_string())
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        Self::parse(&joined)
    }

    /// The ordered labels, each trimmed, blanks skipped.
    pub fn items(&self) -> Vec<&str> {
        self.0
            .split(SEPARATOR)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DelimitedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
