//! Transport trait の実装
//!
//! - `websocket`: axum の WebSocket を使った実装
//! - `memory`: チャンネルを使ったインメモリ実装（テスト用）

#[cfg(test)]
pub mod memory;
pub mod websocket;

#[cfg(test)]
pub use memory::{InMemoryTransport, TransportPeer};
pub use websocket::WebSocketTransport;
