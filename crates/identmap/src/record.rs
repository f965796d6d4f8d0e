//! Record model: type tags, identifiers and the `Record` trait
//!
//! The map never builds records. It holds `Rc` handles handed to it by the
//! data-access layer, so a hit returns the very same allocation.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Runtime type tag of a record (its "class")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordType(&'static str);

impl RecordType {
    /// Create a type tag
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Type name
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Record identifier, unique within a type hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    /// Create an identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<u32> for RecordId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl From<i32> for RecordId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

/// Conversion of a shared record into `Rc<dyn Any>` for downcasting
///
/// Implemented for every `'static` type; never implement it by hand.
pub trait AsAnyRc: Any {
    /// Upcast to `Rc<dyn Any>`
    fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any>;
}

impl<T: Any> AsAnyRc for T {
    fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

/// A domain object the identity map can hold
pub trait Record: AsAnyRc {
    /// Runtime type of this record
    fn record_type(&self) -> RecordType;

    /// Identifier of this record
    fn record_id(&self) -> RecordId;
}

impl fmt::Debug for dyn Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("type", &self.record_type())
            .field("id", &self.record_id())
            .finish()
    }
}

/// Shared handle to a cached record
pub type RecordRef = Rc<dyn Record>;

/// Downcast a record handle to its concrete type, keeping identity
pub fn downcast<T: Record>(record: RecordRef) -> Option<Rc<T>> {
    record.into_any_rc().downcast::<T>().ok()
}

/// True if both handles point at the same in-memory record
pub fn same_record(a: &RecordRef, b: &RecordRef) -> bool {
    Rc::ptr_eq(a, b)
}
