//! Unresolved-key reporting.

use std::sync::Mutex;

/// A key had no value in the table and no declared default.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnresolvedKey {
    pub key: String,
    pub locale: String,
}

impl UnresolvedKey {
    pub fn new(key: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            locale: locale.into(),
        }
    }
}

/// Receives non-fatal resolution diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn unresolved_key(&self, diagnostic: UnresolvedKey);
}

/// Logs each diagnostic as a `tracing` warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn unresolved_key(&self, diagnostic: UnresolvedKey) {
        tracing::warn!(
            key = %diagnostic.key,
            locale = %diagnostic.locale,
            "unlocalized key '{}' for locale '{}'",
            diagnostic.key,
            diagnostic.locale
        );
    }
}

/// Buffers diagnostics so callers can report them later.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<UnresolvedKey>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything collected so far.
    pub fn take(&self) -> Vec<UnresolvedKey> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<UnresolvedKey>> {
        // A panic while pushing cannot leave the Vec inconsistent.
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DiagnosticSink for CollectingSink {
    fn unresolved_key(&self, diagnostic: UnresolvedKey) {
        self.lock().push(diagnostic);
    }
}
