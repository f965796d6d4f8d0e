//! Per-context record storage
//!
//! Two levels: repository key (hierarchy root) -> identifier -> record.
//! Buckets are created on first access and live until the repository is
//! dropped; `clear` empties every bucket.

use std::collections::HashMap;

use ahash::RandomState;

use crate::record::{RecordId, RecordRef, RecordType};

/// Identifier -> record mapping for one repository key
pub type Bucket = HashMap<RecordId, RecordRef, RandomState>;

/// Storage for cached records
#[derive(Default)]
pub struct Repository {
    buckets: HashMap<RecordType, Bucket, RandomState>,
}

impl Repository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Bucket for `key`, created if missing
    pub fn bucket_for(&mut self, key: RecordType) -> &mut Bucket {
        self.buckets.entry(key).or_default()
    }

    /// Look up a record without creating a bucket
    pub fn get(&self, key: RecordType, id: &RecordId) -> Option<&RecordRef> {
        self.buckets.get(&key).and_then(|bucket| bucket.get(id))
    }

    /// Store a record, returning the one it replaced
    pub fn insert(&mut self, key: RecordType, id: RecordId, record: RecordRef) -> Option<RecordRef> {
        self.bucket_for(key).insert(id, record)
    }

    /// Remove an entry if present
    pub fn delete(&mut self, key: RecordType, id: &RecordId) -> Option<RecordRef> {
        self.buckets.get_mut(&key).and_then(|bucket| bucket.remove(id))
    }

    /// Empty all buckets
    pub fn clear(&mut self) {
        self.buckets.values_mut().for_each(Bucket::clear);
    }

    /// Total number of cached records
    pub fn len(&self) -> usize {
        self.buckets.values().map(Bucket::len).sum()
    }

    /// Check if no records are cached
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Bucket::is_empty)
    }
}
