//! Type hierarchy registry
//!
//! Resolves a record type to its repository key (the hierarchy root) and
//! answers "is-a" questions. Built once at startup; parents must be
//! registered before their subtypes, so the table is always a forest.

use std::collections::HashMap;

use ahash::RandomState;

use crate::error::{Error, Result};
use crate::record::RecordType;

/// Registered type hierarchy
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    /// type -> direct parent (`None` for roots)
    parents: HashMap<RecordType, Option<RecordType>, RandomState>,
}

impl TypeRegistry {
    /// Start building a registry
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::default()
    }

    /// Check if `ty` was registered
    pub fn is_registered(&self, ty: RecordType) -> bool {
        self.parents.contains_key(&ty)
    }

    /// Direct parent of `ty`, if any
    pub fn parent_of(&self, ty: RecordType) -> Option<RecordType> {
        self.parents.get(&ty).copied().flatten()
    }

    /// Repository key of `ty`: the root of its hierarchy
    ///
    /// Unregistered types are their own root.
    pub fn repository_key_of(&self, ty: RecordType) -> RecordType {
        let mut current = ty;
        while let Some(parent) = self.parent_of(current) {
            current = parent;
        }
        current
    }

    /// True if `actual` is `requested` or one of its descendants
    pub fn matches(&self, requested: RecordType, actual: RecordType) -> bool {
        let mut current = Some(actual);
        while let Some(ty) = current {
            if ty == requested {
                return true;
            }
            current = self.parent_of(ty);
        }
        false
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Check if no types are registered
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Builder for [`TypeRegistry`]
#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    parents: HashMap<RecordType, Option<RecordType>, RandomState>,
    error: Option<Error>,
}

impl TypeRegistryBuilder {
    /// Register a hierarchy root
    pub fn root(mut self, ty: RecordType) -> Self {
        self.register(ty, None);
        self
    }

    /// Register `ty` as a direct subtype of `parent`
    pub fn subtype(mut self, ty: RecordType, parent: RecordType) -> Self {
        if self.error.is_none() && !self.parents.contains_key(&parent) {
            self.error = Some(Error::UnknownParent { ty, parent });
        }
        self.register(ty, Some(parent));
        self
    }

    /// Finish, reporting the first registration error
    pub fn build(self) -> Result<TypeRegistry> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(TypeRegistry {
                parents: self.parents,
            }),
        }
    }

    fn register(&mut self, ty: RecordType, parent: Option<RecordType>) {
        if self.error.is_some() {
            return;
        }
        if self.parents.insert(ty, parent).is_some() {
            self.error = Some(Error::DuplicateType(ty));
        }
    }
}
