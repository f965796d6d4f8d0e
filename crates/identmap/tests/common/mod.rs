//! Shared fixtures: a small animal hierarchy and an in-memory finder

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use identmap::{
    FindOptions, Finder, IdentityMap, Record, RecordId, RecordRef, RecordType, TypeRegistry,
};

pub const ANIMAL: RecordType = RecordType::new("Animal");
pub const DOG: RecordType = RecordType::new("Dog");
pub const CAT: RecordType = RecordType::new("Cat");
pub const PERSON: RecordType = RecordType::new("Person");

pub struct Animal {
    pub ty: RecordType,
    pub id: u64,
    pub name: RefCell<String>,
}

impl Record for Animal {
    fn record_type(&self) -> RecordType {
        self.ty
    }

    fn record_id(&self) -> RecordId {
        self.id.into()
    }
}

pub fn animal(ty: RecordType, id: u64, name: &str) -> RecordRef {
    Rc::new(Animal {
        ty,
        id,
        name: RefCell::new(name.to_string()),
    })
}

pub fn registry() -> Arc<TypeRegistry> {
    Arc::new(
        TypeRegistry::builder()
            .root(ANIMAL)
            .subtype(DOG, ANIMAL)
            .subtype(CAT, ANIMAL)
            .root(PERSON)
            .build()
            .unwrap(),
    )
}

pub fn enabled_map() -> IdentityMap {
    let map = IdentityMap::new(registry());
    map.set_enabled(true);
    map
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError(pub String);

/// Finder over stored rows; every fetch builds a fresh record
#[derive(Default)]
pub struct MemoryFinder {
    rows: RefCell<HashMap<(RecordType, u64), String>>,
    pub calls: Cell<usize>,
    pub fail: Cell<bool>,
}

impl MemoryFinder {
    pub fn with_row(self, ty: RecordType, id: u64, name: &str) -> Self {
        self.rows.borrow_mut().insert((ty, id), name.to_string());
        self
    }

    pub fn delete_row(&self, ty: RecordType, id: u64) -> Result<(), FetchError> {
        if self.fail.get() {
            return Err(FetchError("storage offline".to_string()));
        }
        self.rows.borrow_mut().remove(&(ty, id));
        Ok(())
    }
}

impl Finder for MemoryFinder {
    type Error = FetchError;

    fn find_one(
        &self,
        ty: RecordType,
        id: &RecordId,
        _options: &FindOptions,
    ) -> Result<Option<RecordRef>, FetchError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail.get() {
            return Err(FetchError("storage offline".to_string()));
        }

        let id: u64 = id
            .as_str()
            .parse()
            .map_err(|_| FetchError(format!("bad id {id}")))?;
        let rows = self.rows.borrow();
        let found = rows
            .iter()
            .find(|((row_ty, row_id), _)| *row_id == id && (*row_ty == ty || ty == ANIMAL))
            .map(|((row_ty, _), name)| animal(*row_ty, id, name));
        Ok(found)
    }
}
