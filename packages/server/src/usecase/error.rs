//! UseCase error types.

use thiserror::Error;

use crate::domain::RelayError;

/// Errors returned by `ConnectClientUseCase`
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectError {
    /// Another client already uses this nickname in the room
    #[error("nickname '{nickname}' is already taken in room '{room}'")]
    NicknameTaken { nickname: String, room: String },

    #[error(transparent)]
    Relay(#[from] RelayError),
}

/// Errors returned by `GetRoomDetailUseCase`
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GetRoomDetailError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),
}
