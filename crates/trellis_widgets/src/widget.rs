//! Widget store
//!
//! Widgets wrap opaque handles owned by the native backend. The store is a
//! slot-map arena: widget state lives here, and the native handle is only an
//! external key. Claiming a handle is explicit and fails on double-claim, so
//! two runtimes sharing one backend never fight over the same widget.
//!
//! Each widget owns a table mapping backend event ids to signals in the
//! store's [`SignalGraph`]. The owner context of every widget signal is the
//! owning [`WidgetId`], so handlers always learn which widget fired.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use trellis_core::signals::{SignalGraph, SignalId};

use crate::error::WrapError;

/// Backend-defined event type identifier. The store maps ids to signals per
/// widget and does not validate their semantics.
pub type EventId = u32;

/// Opaque handle to a backend widget. May be null.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NativeHandle(pub usize);

impl NativeHandle {
    pub const NULL: NativeHandle = NativeHandle(0);

    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }
}

new_key_type! {
    /// Unique identifier for a widget owned by this store
    pub struct WidgetId;
}

/// Locally managed state for one backend widget
pub struct Widget {
    native: NativeHandle,
    signals: FxHashMap<EventId, SignalId>,
}

impl Widget {
    /// The backend handle this widget wraps
    pub fn native(&self) -> NativeHandle {
        self.native
    }

    /// The signal registered for `event`, if any
    pub fn signal(&self, event: EventId) -> Option<SignalId> {
        self.signals.get(&event).copied()
    }
}

/// Arena owning every wrapped widget, the handle claim table, and the
/// widget signal graph.
pub struct WidgetStore {
    widgets: SlotMap<WidgetId, Widget>,
    /// Native handles claimed by this store. A handle absent from this table
    /// belongs to the backend or to another runtime.
    claims: FxHashMap<NativeHandle, WidgetId>,
    signals: SignalGraph<WidgetId>,
}

impl WidgetStore {
    pub fn new() -> Self {
        Self {
            widgets: SlotMap::with_key(),
            claims: FxHashMap::default(),
            signals: SignalGraph::new(),
        }
    }

    /// Wrap a backend handle, claiming it for this store. Fails on a null
    /// handle or if the handle is already claimed; the error carries the raw
    /// handle so callers can still recover it.
    pub fn wrap(&mut self, native: NativeHandle) -> Result<WidgetId, WrapError> {
        if native.is_null() {
            return Err(WrapError::NullHandle);
        }
        if self.claims.contains_key(&native) {
            return Err(WrapError::AlreadyClaimed { handle: native });
        }
        let widget = self.widgets.insert(Widget {
            native,
            signals: FxHashMap::default(),
        });
        self.claims.insert(native, widget);
        tracing::debug!(?widget, ?native, "widget wrapped");
        Ok(widget)
    }

    /// Like [`wrap`](Self::wrap), but reports failure as `None`
    pub fn try_wrap(&mut self, native: NativeHandle) -> Option<WidgetId> {
        self.wrap(native).ok()
    }

    /// Create a widget for `native` without claiming the handle. Adopted
    /// widgets can be manipulated but never receive routed events.
    pub fn adopt(&mut self, native: NativeHandle) -> WidgetId {
        self.widgets.insert(Widget {
            native,
            signals: FxHashMap::default(),
        })
    }

    /// Register a signal for a backend event id on `widget`.
    ///
    /// # Panics
    ///
    /// Panics if the widget has been released or the event id already has a
    /// signal; both indicate a wiring bug, not a runtime condition.
    pub fn register_signal(&mut self, widget: WidgetId, event: EventId) -> SignalId {
        let Some(slot) = self.widgets.get(widget) else {
            panic!("signal registered on a released widget");
        };
        assert!(
            !slot.signals.contains_key(&event),
            "event id {event} already has a signal on this widget"
        );
        let signal = self.signals.add_signal(widget);
        self.widgets[widget].signals.insert(event, signal);
        signal
    }

    /// The signal registered for `event` on `widget`, if any
    pub fn signal(&self, widget: WidgetId, event: EventId) -> Option<SignalId> {
        self.widgets.get(widget)?.signal(event)
    }

    /// Emit the signal mapped to `event` on `widget`. Returns whether a
    /// signal was registered for the id.
    pub fn handle_event(&mut self, widget: WidgetId, event: EventId) -> bool {
        let Some(signal) = self.signal(widget, event) else {
            return false;
        };
        self.signals.emit(signal);
        true
    }

    /// The widget claiming `native`, if this store owns it
    pub fn resolve(&self, native: NativeHandle) -> Option<WidgetId> {
        self.claims.get(&native).copied()
    }

    /// The backend handle wrapped by `widget`
    pub fn native(&self, widget: WidgetId) -> Option<NativeHandle> {
        self.widgets.get(widget).map(Widget::native)
    }

    pub fn get(&self, widget: WidgetId) -> Option<&Widget> {
        self.widgets.get(widget)
    }

    /// Destroy a widget: its claim is released and every signal it owns is
    /// removed from the graph, so stale handler back-references fail to
    /// reconnect afterwards.
    pub fn release(&mut self, widget: WidgetId) -> bool {
        let Some(entry) = self.widgets.remove(widget) else {
            return false;
        };
        if self.claims.get(&entry.native) == Some(&widget) {
            self.claims.remove(&entry.native);
        }
        for signal in entry.signals.values() {
            self.signals.remove_signal(*signal);
        }
        tracing::debug!(?widget, "widget released");
        true
    }

    /// The signal graph backing every widget signal
    pub fn signals(&self) -> &SignalGraph<WidgetId> {
        &self.signals
    }

    pub fn signals_mut(&mut self) -> &mut SignalGraph<WidgetId> {
        &mut self.signals
    }

    /// Number of live widgets
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the store has no widgets
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

impl Default for WidgetStore {
    fn default() -> Self {
        Self::new()
    }
}
