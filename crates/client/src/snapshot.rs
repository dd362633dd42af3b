//! Last-known state of a fetched collection.

use crate::error::ClientError;

/// Holds the most recent successful fetch.
///
/// A failed refresh is logged and leaves the previous contents untouched; the
/// first failure therefore leaves the snapshot empty.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    items: Vec<T>,
    loaded: bool,
    last_error: Option<String>,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loaded: false,
            last_error: None,
        }
    }
}

impl<T> Snapshot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a fetch result. Returns `true` when the contents were replaced.
    pub fn apply(&mut self, what: &str, result: Result<Vec<T>, ClientError>) -> bool {
        match result {
            Ok(items) => {
                tracing::debug!(what, count = items.len(), "snapshot refreshed");
                self.items = items;
                self.loaded = true;
                self.last_error = None;
                true
            }
            Err(err) => {
                tracing::warn!(what, error = %err, "fetch failed; keeping last known data");
                self.last_error = Some(err.to_string());
                false
            }
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Whether any fetch has succeeded yet.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_keeps_previous_items() {
        let mut snap = Snapshot::new();
        assert!(snap.apply("sales", Ok(vec![1, 2, 3])));
        assert!(!snap.apply("sales", Err(ClientError::Network("refused".into()))));
        assert_eq!(snap.items(), &[1, 2, 3]);
        assert!(snap.is_loaded());
        assert_eq!(snap.last_error(), Some("network error: refused"));
    }

    #[test]
    fn first_failure_leaves_empty_state() {
        let mut snap: Snapshot<u8> = Snapshot::new();
        snap.apply("sales", Err(ClientError::Api(500, "boom".into())));
        assert!(snap.items().is_empty());
        assert!(!snap.is_loaded());
    }

    #[test]
    fn success_clears_error() {
        let mut snap = Snapshot::new();
        snap.apply("debts", Err(ClientError::Decode("bad".into())));
        snap.apply("debts", Ok(vec!["a"]));
        assert_eq!(snap.last_error(), None);
        assert_eq!(snap.into_items(), vec!["a"]);
    }
}
