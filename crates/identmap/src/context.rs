//! Current-thread identity map and the process-wide toggles
//!
//! Each thread owns its own map, created on first use from the default
//! registry. Nothing here is shared between threads except that read-only
//! registry. Pooled threads that serve unrelated logical scopes should call
//! [`reset`] at scope boundaries.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::map::IdentityMap;
use crate::registry::TypeRegistry;

static DEFAULT_REGISTRY: RwLock<Option<Arc<TypeRegistry>>> = parking_lot::const_rwlock(None);

thread_local! {
    static CURRENT: RefCell<Option<Rc<IdentityMap>>> = const { RefCell::new(None) };
}

/// Registry used for maps created lazily by [`current`]
///
/// Threads that already have a map keep it.
pub fn set_default_registry(registry: Arc<TypeRegistry>) {
    *DEFAULT_REGISTRY.write() = Some(registry);
}

/// Registry installed with [`set_default_registry`], or an empty one
pub fn default_registry() -> Arc<TypeRegistry> {
    DEFAULT_REGISTRY.read().clone().unwrap_or_default()
}

/// This thread's identity map, created if missing
pub fn current() -> Rc<IdentityMap> {
    CURRENT.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(|| Rc::new(IdentityMap::new(default_registry())))
            .clone()
    })
}

/// Make `map` this thread's identity map, returning the previous one
pub fn install(map: IdentityMap) -> Option<Rc<IdentityMap>> {
    CURRENT.with(|slot| slot.borrow_mut().replace(Rc::new(map)))
}

/// Detach and return this thread's identity map
pub fn take() -> Option<Rc<IdentityMap>> {
    CURRENT.with(|slot| slot.borrow_mut().take())
}

/// Clear this thread's records and switch its map off
pub fn reset() {
    if let Some(map) = CURRENT.with(|slot| slot.borrow().clone()) {
        map.reset();
    }
}

/// Turn the identity map on or off for this thread
pub fn enable(enabled: bool) {
    current().set_enabled(enabled);
}

/// Whether the identity map is on for this thread
pub fn is_enabled() -> bool {
    CURRENT.with(|slot| slot.borrow().as_ref().is_some_and(|map| map.is_enabled()))
}

/// Run `body` with this thread's identity map enabled
pub fn using<R>(body: impl FnOnce() -> R) -> R {
    current().using(body)
}

/// Run `body` with this thread's identity map disabled
pub fn without<R>(body: impl FnOnce() -> R) -> R {
    current().without(body)
}
