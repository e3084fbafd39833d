//! Per-fragment allocation scope
//!
//! Fragments often need scratch values that must stay alive as long as the
//! fragment itself (interop buffers, cached lookups built during view
//! construction). A [`Scope`] keeps such values and releases them in one
//! shot when the fragment is destroyed.

use std::any::Any;

/// Arena of values tied to a fragment's lifetime
#[derive(Default)]
pub struct Scope {
    slots: Vec<Box<dyn Any + Send>>,
}

impl Scope {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Keep `value` alive until the scope is cleared, returning a reference
    /// to the stored copy.
    pub fn keep<T: Any + Send>(&mut self, value: T) -> &mut T {
        self.slots.push(Box::new(value));
        let slot = self.slots.last_mut().expect("slot just pushed");
        slot.downcast_mut::<T>().expect("slot type just pushed")
    }

    /// Whether anything was ever kept in this scope
    pub fn is_used(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Drop every kept value
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
