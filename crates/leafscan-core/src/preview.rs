//! Ephemeral preview references.
//!
//! A preview reference points at a selected file's bytes for rendering only.
//! References are created when a file is set and must be revoked when it is
//! replaced or the widget is torn down. The registry tracks live references
//! so leaks are observable.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use base64::Engine;
use parking_lot::Mutex;

use crate::types::SelectedFile;

/// Opaque handle to a live preview reference.
///
/// Not `Clone`: the single owner revokes it.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct PreviewHandle(u64);

impl PreviewHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preview:{}", self.0)
    }
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    live: HashMap<u64, String>,
}

/// Shared store of preview references.
#[derive(Clone, Default)]
pub struct PreviewRegistry {
    inner: Arc<Mutex<Inner>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reference for `file`.
    pub fn create(&self, file: &SelectedFile) -> PreviewHandle {
        let uri = data_uri(file);
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.live.insert(id, uri);
        tracing::trace!(id, name = file.name(), "Preview reference created");
        PreviewHandle(id)
    }

    /// Resolve a handle to something an `img` can display.
    pub fn resolve(&self, handle: &PreviewHandle) -> Option<String> {
        self.inner.lock().live.get(&handle.0).cloned()
    }

    /// Revoke a reference. Returns false if it was already gone.
    pub fn revoke(&self, handle: PreviewHandle) -> bool {
        let removed = self.inner.lock().live.remove(&handle.0).is_some();
        if removed {
            tracing::trace!(id = handle.0, "Preview reference revoked");
        } else {
            tracing::warn!(id = handle.0, "Revoking unknown preview reference");
        }
        removed
    }

    /// Revoke every live reference. Returns how many were dropped.
    pub fn revoke_all(&self) -> usize {
        let mut inner = self.inner.lock();
        let count = inner.live.len();
        inner.live.clear();
        count
    }

    /// Number of references not yet revoked.
    pub fn live_count(&self) -> usize {
        self.inner.lock().live.len()
    }
}

impl fmt::Debug for PreviewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewRegistry")
            .field("live", &self.live_count())
            .finish()
    }
}

fn data_uri(file: &SelectedFile) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(file.bytes());
    format!("data:{};base64,{}", file.mime(), encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_resolve_revoke() {
        let registry = PreviewRegistry::new();
        let file = SelectedFile::new("leaf.png", "image/png", b"abc".to_vec());

        let handle = registry.create(&file);
        assert_eq!(
            registry.resolve(&handle).as_deref(),
            Some("data:image/png;base64,YWJj")
        );
        assert_eq!(registry.live_count(), 1);

        assert!(registry.revoke(handle));
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn test_handles_are_unique() {
        let registry = PreviewRegistry::new();
        let file = SelectedFile::new("leaf.png", "image/png", b"abc".to_vec());

        let a = registry.create(&file);
        let b = registry.create(&file);
        assert_ne!(a, b);
        assert_eq!(registry.live_count(), 2);

        let b_id = b.id();
        registry.revoke(a);
        assert!(registry.revoke(PreviewHandle(b_id)));
        assert!(!registry.revoke(PreviewHandle(b_id)));
    }

    #[test]
    fn test_revoke_all() {
        let registry = PreviewRegistry::new();
        let file = SelectedFile::new("leaf.png", "image/png", b"abc".to_vec());
        let handle = registry.create(&file);
        registry.create(&file);

        assert_eq!(registry.revoke_all(), 2);
        assert_eq!(registry.live_count(), 0);
        assert!(registry.resolve(&handle).is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let registry = PreviewRegistry::new();
        let other = registry.clone();
        let file = SelectedFile::new("leaf.jpg", "image/jpeg", vec![0xFF, 0xD8]);

        let handle = registry.create(&file);
        assert!(other.resolve(&handle).is_some());
        other.revoke(handle);
        assert_eq!(registry.live_count(), 0);
    }
}
