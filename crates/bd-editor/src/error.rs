use bd_core::id::ObjectId;
use thiserror::Error;

/// Errors raised by editing operations on a session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Please select a block to add a port.")]
    MissingSelection,

    #[error("Object '{0}' is not in the scene")]
    UnknownObject(ObjectId),

    /// An id from outside the session that was never issued.
    #[error("Object '{0}' is not in the scene")]
    UnknownId(String),

    #[error("Object '{0}' is not a block")]
    NotABlock(ObjectId),

    #[error("Object '{0}' has no editable label")]
    NoLabel(ObjectId),

    #[error("Object '{0}' cannot be flipped by a negative or zero scale")]
    FlipLocked(ObjectId),
}
