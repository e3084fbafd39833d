//! Fragment lifecycle
//!
//! A fragment is a navigable screen owning a root widget tree. The
//! [`NavigationHost`](crate::NavigationHost) drives its lifecycle:
//!
//! 1. `on_attached` — once, before the view tree is built
//! 2. `create_view` — once, builds the root widget tree
//! 3. `on_display` — every time the fragment becomes the active screen
//! 4. `on_leave` — every time another fragment is navigated on top of it
//! 5. `on_destroy` — once, when the fragment is popped off the stack
//!
//! After `on_destroy` the host releases the fragment's root widget tree and
//! clears its [`Scope`], so the destroy hook still sees every resource
//! intact.

use std::any::Any;

use trellis_widgets::{WidgetId, WidgetStore};

use crate::scope::Scope;

/// Upcast helper so `dyn Fragment` supports typed stack lookups
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A navigable screen with attach/display/leave/destroy hooks
pub trait Fragment: AsAny {
    /// Build the fragment's root widget tree. Called once, when the fragment
    /// first enters the stack. Values needed for the fragment's whole
    /// lifetime can be parked in `scope`.
    fn create_view(&mut self, ui: &mut WidgetStore, scope: &mut Scope) -> WidgetId;

    /// Called once, before [`create_view`](Self::create_view)
    fn on_attached(&mut self) {}

    /// Called whenever this fragment becomes the active screen
    fn on_display(&mut self) {}

    /// Called on the active fragment when another one is navigated on top
    fn on_leave(&mut self) {}

    /// Called when the fragment is popped, before its widgets are released
    fn on_destroy(&mut self) {}
}
