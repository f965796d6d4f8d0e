//! Identity map facade
//!
//! Combines the scoped flag, the repository and the type registry. Lookups
//! are keyed by the hierarchy root of the requested type and only accepted
//! when the stored record is the requested type or one of its subtypes.
//!
//! The map is `!Sync`: it belongs to a single execution context. Share it
//! within that context by reference or through [`crate::context`].

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::config::IdentityMapConfig;
use crate::error::{Error, Result};
use crate::flag::ScopeFlag;
use crate::record::{downcast, Record, RecordId, RecordRef, RecordType};
use crate::registry::TypeRegistry;
use crate::repository::Repository;
use crate::stats::CacheStats;

/// Per-context identity map
pub struct IdentityMap {
    /// Type hierarchy used for key resolution
    registry: Arc<TypeRegistry>,

    /// Enabled switch for this context
    enabled: ScopeFlag,

    /// Cached records
    repository: RefCell<Repository>,

    /// Lookup statistics
    stats: CacheStats,
}

impl IdentityMap {
    /// Create a disabled identity map over `registry`
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self::with_config(registry, IdentityMapConfig::default())
    }

    /// Create an identity map using `config`
    pub fn with_config(registry: Arc<TypeRegistry>, config: IdentityMapConfig) -> Self {
        Self {
            registry,
            enabled: ScopeFlag::new(config.enabled),
            repository: RefCell::new(Repository::new()),
            stats: CacheStats::new(),
        }
    }

    /// Type registry used by this map
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// Whether the map is active in this context
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Turn the map on or off for this context
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// Run `body` with the map enabled, restoring the previous setting after
    pub fn using<R>(&self, body: impl FnOnce() -> R) -> R {
        debug!("identity map enabled for scope");
        self.enabled.enable_during(body)
    }

    /// Run `body` with the map disabled, restoring the previous setting after
    pub fn without<R>(&self, body: impl FnOnce() -> R) -> R {
        debug!("identity map disabled for scope");
        self.enabled.disable_during(body)
    }

    /// Look up one or more records
    ///
    /// Fails with [`Error::InvalidArgument`] when `ids` is empty. Misses are
    /// dropped, so the result may be shorter than `ids`.
    pub fn get(&self, ty: RecordType, ids: &[RecordId]) -> Result<Vec<RecordRef>> {
        match ids {
            [] => Err(Error::InvalidArgument("Must have at least one ID".to_string())),
            [id] => Ok(self.get_one(ty, id).into_iter().collect()),
            _ => self.get_many(ty, ids),
        }
    }

    /// Look up several records in order, skipping misses
    pub fn get_many(&self, ty: RecordType, ids: &[RecordId]) -> Result<Vec<RecordRef>> {
        if ids.is_empty() {
            return Err(Error::InvalidArgument("Must have at least one ID".to_string()));
        }
        Ok(ids.iter().filter_map(|id| self.get_one(ty, id)).collect())
    }

    /// Look up a single record
    ///
    /// Returns `None` if nothing is cached under the type's repository key,
    /// or if the cached record is not `ty` or a subtype of it.
    pub fn get_one(&self, ty: RecordType, id: &RecordId) -> Option<RecordRef> {
        let key = self.registry.repository_key_of(ty);
        let stored = self.repository.borrow().get(key, id).cloned();

        match stored {
            Some(record) if self.registry.matches(ty, record.record_type()) => {
                debug!(%ty, %id, "identity map hit");
                self.stats.record_hit();
                Some(record)
            }
            Some(record) => {
                warn!(
                    %ty,
                    %id,
                    stored = %record.record_type(),
                    "identity map entry has foreign type, treating as miss"
                );
                self.stats.record_miss();
                None
            }
            None => {
                debug!(%ty, %id, "identity map miss");
                self.stats.record_miss();
                None
            }
        }
    }

    /// Look up a record and downcast it to its concrete type
    pub fn get_as<T: Record>(&self, ty: RecordType, id: &RecordId) -> Option<Rc<T>> {
        self.get_one(ty, id).and_then(downcast::<T>)
    }

    /// Store a record, replacing any entry with the same key and id
    ///
    /// `None` is ignored.
    pub fn add(&self, record: impl Into<Option<RecordRef>>) {
        let Some(record) = record.into() else {
            return;
        };

        let ty = record.record_type();
        let id = record.record_id();
        let key = self.registry.repository_key_of(ty);
        trace!(%ty, %id, %key, "identity map add");

        // Replaced record is dropped after the borrow ends
        let _replaced = self.repository.borrow_mut().insert(key, id, record);
        self.stats.record_insert();
    }

    /// Remove the entry for `record`, if any
    pub fn remove(&self, record: &dyn Record) {
        self.remove_by_id(record.record_type(), &record.record_id());
    }

    /// Remove the entry for `ty` / `id`, if any
    pub fn remove_by_id(&self, ty: RecordType, id: &RecordId) {
        let key = self.registry.repository_key_of(ty);
        let removed = self.repository.borrow_mut().delete(key, id);

        if removed.is_some() {
            trace!(%ty, %id, %key, "identity map remove");
            self.stats.record_removal();
        }
    }

    /// True if an entry exists for `ty` / `id` that a lookup would return
    pub fn contains(&self, ty: RecordType, id: &RecordId) -> bool {
        let key = self.registry.repository_key_of(ty);
        self.repository
            .borrow()
            .get(key, id)
            .is_some_and(|record| self.registry.matches(ty, record.record_type()))
    }

    /// Drop every cached record (stats are kept)
    pub fn clear(&self) {
        trace!("identity map clear");
        // Records are dropped after the borrow ends; their Drop may read the map
        let dropped = std::mem::take(&mut *self.repository.borrow_mut());
        drop(dropped);
    }

    /// Return to the initial state: no records, zeroed stats, disabled
    pub fn reset(&self) {
        self.clear();
        self.stats.reset();
        self.enabled.set(false);
    }

    /// Number of cached records
    pub fn len(&self) -> usize {
        self.repository.borrow().len()
    }

    /// Check if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.repository.borrow().is_empty()
    }

    /// Lookup statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

impl std::fmt::Debug for IdentityMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityMap")
            .field("enabled", &self.is_enabled())
            .field("len", &self.len())
            .finish()
    }
}
