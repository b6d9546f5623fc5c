//! Chatterm - a terminal chat client for an AI assistant backend
//!
//! This library provides the core functionality for Chatterm: a thin HTTP
//! client for the assistant backend, an in-memory conversation log, a
//! connectivity monitor, and the TUI that composes them.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod connectivity;
pub mod format;
pub mod store;
pub mod tui;

pub use client::{BackendClient, ChatError, ChatReply};
pub use config::Config;
pub use connectivity::{ConnectivityMonitor, ConnectivityState};

/// Initialize the Chatterm library with logging
///
/// Installs a `tracing_subscriber` fmt subscriber writing to stdout. The
/// TUI binary must not call this (stdout belongs to the terminal UI);
/// it exists for headless consumers and ad-hoc debugging.
pub fn init() {
    tracing_subscriber::fmt::init();
}
