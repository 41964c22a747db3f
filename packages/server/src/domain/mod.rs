//! Domain layer: the relay core.
//!
//! - `Client`: one connected participant
//! - `Room`: membership, inbound queue and the per-room broadcast task
//! - `RoomRegistry`: room name → Room directory
//! - `Transport`: the connection capability the core depends on

pub mod client;
pub mod error;
pub mod registry;
pub mod room;
pub mod transport;
pub mod value_object;

pub use client::{Client, ClientState};
pub use error::{RelayError, ValueObjectError};
pub use registry::RoomRegistry;
pub use room::{JoinOutcome, MemberInfo, Room, RoomMessage, RoomSnapshot};
#[cfg(test)]
pub use transport::MockTransport;
pub use transport::{Frame, Transport, TransportError};
pub use value_object::{ClientId, Nickname, RoomName, Timestamp};
