//! Hiroba room relay server library.
//!
//! Clients connect over WebSocket to `/ws/{room}`, send a nickname as their
//! first frame, and every later text frame is relayed to the other members
//! of the same room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
