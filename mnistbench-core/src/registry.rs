//! Classifier Registry
//!
//! Maps command-line identifiers to registration constructors. Selection keeps
//! registry order regardless of the order identifiers were given in, and
//! unknown identifiers are simply not matched.

use crate::classifier::Registration;

/// A selectable classifier implementation
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
    /// Identifier accepted on the command line
    pub id: &'static str,
    /// Short description for listings
    pub summary: &'static str,
    /// Builds the configured prototype
    pub register: fn() -> Registration,
}

/// Ordered set of selectable implementations
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. A later entry with an existing id replaces the earlier one
    /// in place, so ids stay unique.
    pub fn with(mut self, entry: RegistryEntry) -> Self {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        self
    }

    /// All entries in registration order
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Identifiers in registration order
    pub fn ids(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// Look up an entry by identifier
    pub fn get(&self, id: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Build registrations for every entry named in `tokens`.
    pub fn select<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<Registration> {
        for token in tokens {
            if self.get(token.as_ref()).is_none() {
                tracing::warn!(token = token.as_ref(), "ignoring unknown implementation");
            }
        }

        self.entries
            .iter()
            .filter(|e| tokens.iter().any(|t| t.as_ref() == e.id))
            .map(|e| (e.register)())
            .collect()
    }
}
