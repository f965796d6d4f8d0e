//! Hooks wiring the identity map into a finder and a record lifecycle
//!
//! The finder and the record's persistence operations are collaborators:
//! they are passed in and called, never wrapped in error handling. No
//! repository borrow is held while a collaborator runs, so they may call
//! back into the map.

use tracing::debug;

use crate::map::IdentityMap;
use crate::record::{Record, RecordId, RecordRef, RecordType};

/// Options of a single-record lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindOptions {
    /// Restrict the fetched fields; a partial record must never be cached
    pub select: Option<Vec<String>>,
}

impl FindOptions {
    /// Lookup restricted to `fields`
    pub fn select<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            select: Some(fields.into_iter().map(Into::into).collect()),
        }
    }

    /// True if a lookup with these options may be served from the map
    pub fn is_identity_map_eligible(&self) -> bool {
        self.select.is_none()
    }
}

/// Data-access layer that fetches records by id
pub trait Finder {
    /// Failure raised by a real fetch
    type Error;

    /// Fetch one record; `Ok(None)` if it does not exist
    fn find_one(
        &self,
        ty: RecordType,
        id: &RecordId,
        options: &FindOptions,
    ) -> Result<Option<RecordRef>, Self::Error>;
}

impl<T: Finder + ?Sized> Finder for &T {
    type Error = T::Error;

    fn find_one(
        &self,
        ty: RecordType,
        id: &RecordId,
        options: &FindOptions,
    ) -> Result<Option<RecordRef>, Self::Error> {
        (**self).find_one(ty, id, options)
    }
}

impl IdentityMap {
    /// Lookup-by-id hook
    ///
    /// When enabled and the options are eligible, a hit is returned without
    /// touching `finder`; a miss is fetched and the result added. Otherwise
    /// the call goes straight to `finder`. Fetch errors propagate and
    /// nothing is added.
    pub fn find_one<F: Finder + ?Sized>(
        &self,
        finder: &F,
        ty: RecordType,
        id: &RecordId,
        options: &FindOptions,
    ) -> Result<Option<RecordRef>, F::Error> {
        if !self.is_enabled() || !options.is_identity_map_eligible() {
            return finder.find_one(ty, id, options);
        }

        if let Some(record) = self.get_one(ty, id) {
            return Ok(Some(record));
        }

        let found = finder.find_one(ty, id, options)?;
        self.add(found.clone());
        Ok(found)
    }

    /// Pre-reload hook: drop `record` from the map, then run `real_reload`
    ///
    /// The entry is gone before the reload starts, so a lookup made while
    /// it runs misses. Takes a plain `&dyn Record`: only the type and id are
    /// needed to evict.
    pub fn reload<T, E>(
        &self,
        record: &dyn Record,
        real_reload: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        if self.is_enabled() {
            debug!(ty = %record.record_type(), id = %record.record_id(), "reload evicts record");
            self.remove(record);
        }
        real_reload()
    }

    /// Destroy hook: run `real_destroy`, then drop `record` on success
    ///
    /// On failure the entry stays, since it still reflects stored state.
    /// Like [`reload`](Self::reload), only the type and id of `record` are used.
    pub fn destroy<T, E>(
        &self,
        record: &dyn Record,
        real_destroy: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        if !self.is_enabled() {
            return real_destroy();
        }

        let out = real_destroy()?;
        self.remove(record);
        Ok(out)
    }

    /// Create hook: run `real_create` for a new record, then add it on success
    ///
    /// Takes the shared handle because the map stores a clone of it.
    pub fn create<T, E>(
        &self,
        record: &RecordRef,
        real_create: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        if !self.is_enabled() {
            return real_create();
        }

        let out = real_create()?;
        self.add(record.clone());
        Ok(out)
    }

    /// Post-construction hook for a record built straight from a fetch
    ///
    /// Takes the shared handle because the map stores a clone of it.
    pub fn after_load(&self, record: &RecordRef) {
        if self.is_enabled() {
            self.add(record.clone());
        }
    }
}

/// [`Finder`] that consults an identity map before its inner finder
pub struct IdentityMapFinder<'a, F> {
    map: &'a IdentityMap,
    inner: F,
}

impl<'a, F: Finder> IdentityMapFinder<'a, F> {
    /// Wrap `inner` with `map`
    pub fn new(map: &'a IdentityMap, inner: F) -> Self {
        Self { map, inner }
    }

    /// The wrapped finder
    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F: Finder> Finder for IdentityMapFinder<'_, F> {
    type Error = F::Error;

    fn find_one(
        &self,
        ty: RecordType,
        id: &RecordId,
        options: &FindOptions,
    ) -> Result<Option<RecordRef>, Self::Error> {
        self.map.find_one(&self.inner, ty, id, options)
    }
}
