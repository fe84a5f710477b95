//! pixelroom server: a shared pixel canvas with chat, served over HTTP and WebSocket.
//!
//! Layers, from the inside out: `domain` ← `infrastructure` ← `usecase` ← `ui`.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
