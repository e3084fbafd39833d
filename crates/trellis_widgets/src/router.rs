//! Widget event router
//!
//! Inbound entry point for raw backend events: an event id plus the opaque
//! handle of the widget that fired it. Routing resolves the handle through
//! the claim table and emits the widget's signal for that id.
//!
//! Unresolvable events are dropped, never raised: a null or unclaimed handle
//! usually means the widget belongs to another runtime sharing the same
//! backend, which is routine rather than an error.

use crate::widget::{EventId, NativeHandle, WidgetStore};

impl WidgetStore {
    /// Route a raw backend event to the owning widget's signal. Returns
    /// whether a signal fired.
    pub fn dispatch(&mut self, event: EventId, native: NativeHandle) -> bool {
        if native.is_null() {
            tracing::trace!(event, "event with null handle dropped");
            return false;
        }
        let Some(widget) = self.resolve(native) else {
            tracing::trace!(event, ?native, "event for unclaimed handle dropped");
            return false;
        };
        self.handle_event(widget, event)
    }
}
