//! Destination resolution
//!
//! A destination is a factory that turns a navigation request into a
//! concrete fragment. Whether that means creating a fresh fragment or
//! reusing one already on the stack is the destination's policy, not the
//! host's.

use trellis_core::Bundle;

use crate::fragment::Fragment;
use crate::host::NavigationHost;

/// Outcome of resolving a destination
pub enum Resolved {
    /// A freshly created fragment to be initialized and pushed
    New(Box<dyn Fragment>),
    /// Reuse the fragment at this stack index
    Existing(usize),
}

/// Resolves a navigation request to a fragment
pub trait Destination {
    fn resolve(&self, host: &NavigationHost, arguments: Option<&Bundle>) -> Resolved;
}

/// Plain functions work as destinations
impl<F> Destination for F
where
    F: Fn(&NavigationHost, Option<&Bundle>) -> Resolved,
{
    fn resolve(&self, host: &NavigationHost, arguments: Option<&Bundle>) -> Resolved {
        self(host, arguments)
    }
}
