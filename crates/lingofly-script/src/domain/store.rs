//! The immutable, ordered script store.

use std::sync::Arc;

use lingofly_core::error::DomainError;

use super::entry::ScriptEntry;

/// Ordered dialogue entries, fixed at construction.
///
/// Cloning is cheap: clones share the same entries.
#[derive(Debug, Clone)]
pub struct ScriptStore {
    entries: Arc<[ScriptEntry]>,
}

impl ScriptStore {
    /// Builds a store from a literal sequence of entries.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidScript` if `entries` is empty or any entry
    /// fails validation. The message names the offending entry index.
    pub fn new(entries: Vec<ScriptEntry>) -> Result<Self, DomainError> {
        if entries.is_empty() {
            return Err(DomainError::InvalidScript(
                "script must contain at least one entry".to_owned(),
            ));
        }
        for (index, entry) in entries.iter().enumerate() {
            entry.validate().map_err(|e| match e {
                DomainError::InvalidScript(message) => {
                    DomainError::InvalidScript(format!("entry {index}: {message}"))
                }
                other => other,
            })?;
        }
        Ok(Self {
            entries: entries.into(),
        })
    }

    /// Number of entries in the script. Always at least one.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IndexOutOfRange` if `index >= entry_count()`.
    pub fn entry_at(&self, index: usize) -> Result<&ScriptEntry, DomainError> {
        self.entries.get(index).ok_or(DomainError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    /// Index of the final entry.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.entries.len() - 1
    }

    /// Whether `index` is the final entry.
    #[must_use]
    pub fn is_last(&self, index: usize) -> bool {
        index == self.last_index()
    }

    /// All entries in script order.
    #[must_use]
    pub fn entries(&self) -> &[ScriptEntry] {
        &self.entries
    }
}
