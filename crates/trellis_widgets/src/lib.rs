//! Trellis Widget Store
//!
//! Slot-map arena for widgets wrapping opaque backend handles, with explicit
//! handle claiming, per-widget event-id signal tables, and routing of raw
//! backend events into signal emissions.
//!
//! # Example
//!
//! ```rust
//! use trellis_widgets::{NativeHandle, WidgetStore};
//!
//! const SIGNAL_CLICK: u32 = 1000;
//!
//! let mut ui = WidgetStore::new();
//! let button = ui.wrap(NativeHandle(0x7000)).unwrap();
//! let clicked = ui.register_signal(button, SIGNAL_CLICK);
//!
//! ui.signals_mut().connect_fn(clicked, |_, widget| {
//!     println!("clicked by {widget:?}");
//! });
//!
//! // Raw backend events route through the claim table
//! assert!(ui.dispatch(SIGNAL_CLICK, NativeHandle(0x7000)));
//! ```

pub mod error;
pub mod router;
pub mod widget;

pub use error::WrapError;
pub use widget::{EventId, NativeHandle, Widget, WidgetId, WidgetStore};
