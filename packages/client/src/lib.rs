//! Terminal client for pixelroom.
//!
//! - `api`: HTTP calls for listing and creating rooms
//! - `session`: room view state driven by server events
//! - `canvas`: local canvas with optimistic writes
//! - `runner`: connection loop with reconnection

pub mod api;
pub mod canvas;
pub mod command;
mod connection;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod runner;
pub mod session;
mod ui;

pub use runner::run_client;
