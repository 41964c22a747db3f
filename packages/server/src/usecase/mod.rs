//! UseCase layer.
//!
//! Each use case is a small struct holding the abstractions it needs
//! (`Arc<dyn RoomRegistry>`) and exposing an `execute` method.

pub mod connect_client;
pub mod disconnect_client;
pub mod error;
pub mod get_room_detail;
pub mod get_rooms;
pub mod relay_messages;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{ConnectError, GetRoomDetailError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use relay_messages::RelayMessagesUseCase;
