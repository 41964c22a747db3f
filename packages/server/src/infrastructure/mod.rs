//! Infrastructure layer.
//!
//! Concrete implementations of the domain traits and the DTOs exposed over HTTP.

pub mod dto;
pub mod repository;
pub mod transport;
