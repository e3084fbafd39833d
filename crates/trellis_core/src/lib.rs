//! Trellis Core Runtime
//!
//! This crate provides the foundational primitives for the Trellis UI
//! runtime:
//!
//! - **Signal Graph**: emission points with connect/disconnect/reconnect
//!   handler lifecycle and mutation-safe dispatch
//! - **Bundles**: dynamically typed, string-keyed argument carriers
//!
//! # Example
//!
//! ```rust
//! use trellis_core::signals::SignalGraph;
//!
//! let mut graph: SignalGraph<u32> = SignalGraph::new();
//!
//! // Create a signal whose owner context is widget id 7
//! let clicked = graph.add_signal(7);
//!
//! // Connect a handler
//! let handler = graph.connect_fn(clicked, |_, owner| {
//!     println!("clicked: {owner}");
//! });
//!
//! graph.emit(clicked);
//!
//! // Handlers can be disconnected and reconnected without naming the signal
//! assert!(graph.disconnect(handler));
//! assert!(graph.reconnect(handler));
//! ```

pub mod bundle;
pub mod error;
pub mod signals;

pub use bundle::Bundle;
pub use error::BundleError;
pub use signals::{HandlerFn, HandlerId, SignalGraph, SignalId, TranslateFn};
