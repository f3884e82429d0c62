use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{BuildFlags, Error};
use crate::schema::{Model, ModelKind};

/// A constructor produces a `T` from a model configuration and the build
/// flags. Any matching callable qualifies; there is no trait hierarchy to
/// implement.
pub(crate) type Constructor<T> = Arc<dyn Fn(Model, BuildFlags) -> T + Send + Sync>;

/// The registry holds the `(category, kind)` to constructor table.
///
/// Categories and kinds are opaque keys here; the registry never interprets
/// them and never inspects what a constructor produces. The table lives for
/// as long as the registry value does, and callers that want process-wide
/// wiring hold the registry for the life of the process. Tests construct
/// their own.
///
/// The table is guarded by an `RwLock`: registration takes the write lock,
/// lookups the read lock, so a lookup never observes a partially written
/// entry and concurrent registrations of distinct pairs lose no updates.
pub(crate) struct FactoryRegistry<T> {
    table: RwLock<HashMap<String, HashMap<ModelKind, Constructor<T>>>>,
}

impl<T> FactoryRegistry<T> {
    pub(crate) fn new() -> FactoryRegistry<T> {
        FactoryRegistry {
            table: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or overwrite the constructor for `(category, kind)`.
    ///
    /// Re-registering a pair silently replaces the previous constructor;
    /// last write wins. Callers that need double registration to be an
    /// error must check [`FactoryRegistry::registered`] first.
    pub(crate) fn register(&self, category: &str, kind: ModelKind, constructor: Constructor<T>) {
        let mut table = self.table.write().expect("factory table lock poisoned");

        table
            .entry(category.to_string())
            .or_default()
            .insert(kind, constructor);
    }

    /// The constructor registered for exactly `(category, kind)`.
    pub(crate) fn get(&self, category: &str, kind: ModelKind) -> Result<Constructor<T>, Error> {
        let table = self.table.read().expect("factory table lock poisoned");

        table
            .get(category)
            .and_then(|kinds| kinds.get(&kind))
            .cloned()
            .ok_or_else(|| Error::NotRegistered {
                category: category.to_string(),
                kind,
            })
    }

    /// Remove and return the constructor for `(category, kind)`, if any.
    pub(crate) fn unregister(&self, category: &str, kind: ModelKind) -> Option<Constructor<T>> {
        let mut table = self.table.write().expect("factory table lock poisoned");

        let kinds = table.get_mut(category)?;
        let removed = kinds.remove(&kind);

        if kinds.is_empty() {
            table.remove(category);
        }

        removed
    }

    /// A snapshot of the kinds currently registered under `category`.
    pub(crate) fn registered(&self, category: &str) -> Vec<ModelKind> {
        let table = self.table.read().expect("factory table lock poisoned");

        match table.get(category) {
            Some(kinds) => kinds.keys().copied().collect(),
            None => Vec::new(),
        }
    }
}
