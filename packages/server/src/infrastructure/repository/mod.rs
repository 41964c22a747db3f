//! Registry の実装
//!
//! - `inmemory`: HashMap を使った実装

pub mod inmemory;

pub use inmemory::InMemoryRoomRegistry;
