//! Module identity interning.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::fmt;

use super::qname::{QNameModule, Revision};

/// Deduplicates [`QNameModule`] values so that every name of a module shares
/// one namespace allocation.
///
/// Entries live until the caller evicts them with [`ModuleInterner::evict`] or
/// [`ModuleInterner::clear`]. Evicting never invalidates names already handed
/// out; later requests simply allocate a fresh canonical instance.
///
/// Thread-safe via internal locking.
#[derive(Default)]
pub struct ModuleInterner {
    inner: RwLock<FxHashMap<(SmolStr, Option<Revision>), QNameModule>>,
}

impl ModuleInterner {
    /// Create a new empty interner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the canonical module identity for `namespace` and `revision`.
    pub fn intern(&self, namespace: &str, revision: Option<Revision>) -> QNameModule {
        let key = (SmolStr::new(namespace), revision);

        // Fast path: already interned (read lock)
        if let Some(module) = self.inner.read().get(&key) {
            return module.clone();
        }

        // Slow path: the entry may have appeared while we were unlocked
        let mut inner = self.inner.write();
        inner
            .entry(key)
            .or_insert_with_key(|(namespace, revision)| {
                QNameModule::new(namespace.clone(), revision.clone())
            })
            .clone()
    }

    /// Canonicalize an existing module identity.
    pub fn canonical(&self, module: &QNameModule) -> QNameModule {
        self.intern(module.namespace(), module.revision().cloned())
    }

    /// Drop the cached instance for `module`. Returns whether it was present.
    pub fn evict(&self, module: &QNameModule) -> bool {
        let key = (SmolStr::new(module.namespace()), module.revision().cloned());
        self.inner.write().remove(&key).is_some()
    }

    /// Drop every cached instance.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Get the number of interned modules.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if the interner is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ModuleInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleInterner")
            .field("count", &self.len())
            .finish()
    }
}
