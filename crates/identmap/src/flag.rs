//! Scoped enabled flag
//!
//! One flag per execution context. Scoped runs save the entry value and put
//! it back on every exit path, panics included.

use std::cell::Cell;

/// Context-scoped on/off switch for the identity map
#[derive(Debug, Default)]
pub struct ScopeFlag {
    value: Cell<bool>,
}

impl ScopeFlag {
    /// Create a flag with the given initial value
    pub fn new(value: bool) -> Self {
        Self {
            value: Cell::new(value),
        }
    }

    /// Current value (false if never set)
    pub fn get(&self) -> bool {
        self.value.get()
    }

    /// Overwrite the current value
    pub fn set(&self, value: bool) {
        self.value.set(value);
    }

    /// Run `body` with the flag set to `value`, then restore the entry value
    pub fn run_with_value<R>(&self, value: bool, body: impl FnOnce() -> R) -> R {
        let _restore = Restore {
            flag: self,
            saved: self.value.replace(value),
        };
        body()
    }

    /// Run `body` with the flag on
    pub fn enable_during<R>(&self, body: impl FnOnce() -> R) -> R {
        self.run_with_value(true, body)
    }

    /// Run `body` with the flag off
    pub fn disable_during<R>(&self, body: impl FnOnce() -> R) -> R {
        self.run_with_value(false, body)
    }
}

/// Puts the saved value back when dropped (normal return or unwind)
struct Restore<'a> {
    flag: &'a ScopeFlag,
    saved: bool,
}

impl Drop for Restore<'_> {
    fn drop(&mut self) {
        self.flag.value.set(self.saved);
    }
}
