//! Shared library for pixelroom server and client.
//!
//! - `logger`: tracing subscriber setup
//! - `time`: clock abstraction and timestamp formatting
//! - `protocol`: WebSocket wire messages exchanged by server and client

pub mod logger;
pub mod protocol;
pub mod time;
