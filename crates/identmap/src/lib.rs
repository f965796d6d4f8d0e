//! # identmap
//!
//! Identity map for a data-access layer: repeated lookups of the same record
//! by type and id return the same in-memory object instead of a fresh copy.
//!
//! ## Architecture
//! - **ScopeFlag**: per-context on/off switch with scoped save/restore
//! - **Repository**: hierarchy root -> id -> record, AHash maps
//! - **TypeRegistry**: explicit type hierarchy for key resolution and is-a checks
//! - **IdentityMap**: lookup/add/remove facade, plus finder and lifecycle hooks
//! - **context**: one map per thread and the process-wide toggles
//!
//! No eviction, no TTL, no sharing across threads. Entries change only when
//! a caller adds or removes them.

#![warn(missing_docs)]

mod config;
pub mod context;
mod error;
mod flag;
mod lifecycle;
mod map;
mod record;
mod registry;
mod repository;
mod stats;

pub use config::{IdentityMapConfig, ENABLED_ENV};
pub use error::{Error, Result};
pub use flag::ScopeFlag;
pub use lifecycle::{FindOptions, Finder, IdentityMapFinder};
pub use map::IdentityMap;
pub use record::{downcast, same_record, AsAnyRc, Record, RecordId, RecordRef, RecordType};
pub use registry::{TypeRegistry, TypeRegistryBuilder};
pub use repository::{Bucket, Repository};
pub use stats::CacheStats;
