//! Trellis Navigation
//!
//! Fragment lifecycle and the navigation stack. A [`NavigationHost`] owns an
//! ordered stack of [`Fragment`]s; [`Destination`]s resolve navigation
//! requests to concrete fragments, with find-or-create policy left to the
//! destination itself.
//!
//! # Example
//!
//! ```rust
//! use trellis_core::Bundle;
//! use trellis_nav::{Fragment, NavigationHost, Resolved, Scope};
//! use trellis_widgets::{NativeHandle, WidgetId, WidgetStore};
//!
//! struct Home;
//!
//! impl Fragment for Home {
//!     fn create_view(&mut self, ui: &mut WidgetStore, _scope: &mut Scope) -> WidgetId {
//!         ui.adopt(NativeHandle(0x7000))
//!     }
//! }
//!
//! let home = |_: &NavigationHost, _: Option<&Bundle>| {
//!     Resolved::New(Box::new(Home) as Box<dyn Fragment>)
//! };
//!
//! let mut ui = WidgetStore::new();
//! let mut host = NavigationHost::new(&home, &mut ui);
//! assert_eq!(host.depth(), 1);
//! assert!(!host.navigate_up(&mut ui)); // the root is never popped
//! ```

pub mod destination;
pub mod fragment;
pub mod host;
pub mod scope;

pub use destination::{Destination, Resolved};
pub use fragment::{AsAny, Fragment};
pub use host::NavigationHost;
pub use scope::Scope;
