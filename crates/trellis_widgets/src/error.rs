//! Widget error types

use thiserror::Error;

use crate::widget::NativeHandle;

/// Failure to claim a backend handle
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapError {
    /// The backend passed a null handle
    #[error("cannot wrap a null widget handle")]
    NullHandle,

    /// The handle is already claimed, by this store or another runtime
    #[error("widget handle {handle:?} is already claimed")]
    AlreadyClaimed { handle: NativeHandle },
}

impl WrapError {
    /// The raw handle involved in the failure, so callers can still hand it
    /// to a different runtime or manipulate it without event routing.
    pub fn handle(&self) -> NativeHandle {
        match self {
            WrapError::NullHandle => NativeHandle::NULL,
            WrapError::AlreadyClaimed { handle } => *handle,
        }
    }
}
