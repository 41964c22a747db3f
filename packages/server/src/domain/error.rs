//! Domain error types.

use thiserror::Error;

/// Errors raised by the relay core (clients, rooms and the registry).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelayError {
    /// Transport read/write failure
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Unexpected frame type or content
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    /// Invalid client or room passed to an API
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Room or client lookup miss
    #[error("Not found: {0}")]
    NotFound(String),

    /// The room was reclaimed or its broadcast task has stopped
    #[error("Room '{0}' is closed")]
    RoomClosed(String),
}

/// Validation errors for value objects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueObjectError {
    #[error("Room name must not be empty")]
    RoomNameEmpty,

    #[error("Room name is too long (max {max}, got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    #[error("Room name '{0}' contains whitespace or '/'")]
    RoomNameInvalidCharacter(String),

    #[error("Nickname must not be empty")]
    NicknameEmpty,

    #[error("Nickname is too long (max {max}, got {actual})")]
    NicknameTooLong { max: usize, actual: usize },

    #[error("Nickname contains control characters")]
    NicknameInvalidCharacter,
}
