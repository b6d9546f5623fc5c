//! UI rendering module
//!
//! Chatterm has a single screen: the conversation view. The rendering
//! logic lives in `chat.rs`; small pure helpers in `helpers.rs`.

mod chat;
mod helpers;

use crate::tui::app::App;
use ratatui::Frame;

// Re-export render and helper functions
pub use chat::render_chat;
pub use helpers::{classification_label, format_timestamp};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    render_chat(f, app);
}
