//! Main TUI application state and logic

use crate::client::{BackendClient, ChatError, ChatReply};
use crate::config::Config;
use crate::connectivity::ConnectivityMonitor;
use crate::store::{ConversationStore, Message, ReplyMetadata};
use std::thread::JoinHandle;

/// Greeting seeded into every new conversation
const GREETING: &str = "Hi! I'm your assistant. Ask me anything.";

/// Application state
///
/// Holds the conversation, the connectivity monitor, the input buffer and
/// the in-flight request handles. All mutation happens on the event loop
/// thread; network calls run on short-lived worker threads that are
/// observed through the `poll_*` methods each tick.
pub struct App {
    /// Backend configuration
    pub config: Config,
    /// Conversation history
    pub store: ConversationStore,
    /// Backend reachability
    pub connectivity: ConnectivityMonitor,
    /// Input buffer for message composition
    pub input: String,
    /// Messages scrolled up from the bottom (0 = pinned to newest)
    pub scroll_offset: usize,
    /// Should quit
    pub should_quit: bool,
    /// In-flight chat request, if any; the sole mutual-exclusion gate
    pub chat_handle: Option<JoinHandle<Result<ChatReply, ChatError>>>,
    /// In-flight health check and its token, if any
    pub health_handle: Option<(u64, JoinHandle<bool>)>,
    /// HTTP client for the backend
    client: BackendClient,
}

impl App {
    /// Create a new application
    ///
    /// The conversation starts with a greeting from the assistant. The
    /// caller is expected to trigger the first health check right after
    /// construction.
    pub fn new(config: Config) -> Self {
        let client = BackendClient::new(config.clone());

        let mut store = ConversationStore::new();
        store.append(Message::assistant(GREETING, None));

        Self {
            config,
            store,
            connectivity: ConnectivityMonitor::new(),
            input: String::new(),
            scroll_offset: 0,
            should_quit: false,
            chat_handle: None,
            health_handle: None,
            client,
        }
    }

    /// Whether a chat request is in flight
    pub fn is_pending(&self) -> bool {
        self.chat_handle.is_some()
    }

    /// Whether the input box accepts keystrokes and sends
    ///
    /// Input is disabled while a request is pending or the backend is
    /// offline. `Checking` leaves input enabled.
    pub fn input_enabled(&self) -> bool {
        !self.is_pending() && !self.connectivity.is_offline()
    }

    /// Trigger a health check (non-blocking)
    ///
    /// No-op while a check is already running. The result is applied in
    /// `poll_recheck()`.
    pub fn trigger_recheck(&mut self) {
        if self.health_handle.is_some() {
            return;
        }

        let token = self.connectivity.begin_check();
        let client = self.client.clone();

        let handle = std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            rt.block_on(async move { client.check_health().await })
        });

        self.health_handle = Some((token, handle));
    }

    /// Poll for health check completion (non-blocking)
    ///
    /// Returns true if a check resolved this call.
    pub fn poll_recheck(&mut self) -> bool {
        if let Some((token, handle)) = self.health_handle.take() {
            if handle.is_finished() {
                let reachable = handle.join().unwrap_or(false);
                self.connectivity.apply_result(token, reachable);
                return true;
            }
            // Thread still running, put it back
            self.health_handle = Some((token, handle));
        }
        false
    }

    /// Send the current input as a chat message
    ///
    /// Rejected outright (no store mutation, no network call) when the
    /// trimmed input is empty, a request is already pending, or the
    /// backend is offline. Otherwise the user message is appended
    /// immediately and the request runs in the background; it is never
    /// rolled back, even on failure.
    pub fn send_message(&mut self) {
        let text = self.input.trim().to_string();
        if text.is_empty() || self.is_pending() || self.connectivity.is_offline() {
            return;
        }

        self.store.append(Message::user(text.clone()));
        self.input.clear();
        self.scroll_offset = 0;

        let client = self.client.clone();
        let handle = std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            rt.block_on(async move { client.send_chat(&text).await })
        });

        self.chat_handle = Some(handle);
    }

    /// Poll for chat request completion (non-blocking)
    ///
    /// On success appends the assistant reply; on failure appends an
    /// error message and downgrades connectivity to offline. The pending
    /// handle is cleared on every resolution path. Returns true if the
    /// request resolved this call.
    pub fn poll_chat_response(&mut self) -> bool {
        let Some(handle) = self.chat_handle.take() else {
            return false;
        };

        if !handle.is_finished() {
            self.chat_handle = Some(handle);
            return false;
        }

        match handle.join() {
            Ok(Ok(reply)) => {
                tracing::info!("Assistant reply received");
                let metadata = ReplyMetadata::from_reply(&reply);
                self.store.append(Message::assistant(reply.response, metadata));
            }
            Ok(Err(e)) => {
                tracing::warn!("Chat request failed: {}", e);
                self.store.append(Message::error(format!("Request failed: {}", e)));
                self.connectivity.mark_offline();
            }
            Err(_) => {
                tracing::error!("Chat worker thread panicked");
                self.store
                    .append(Message::error("Request failed: internal error"));
                self.connectivity.mark_offline();
            }
        }

        self.scroll_offset = 0;
        true
    }

    /// Add a character to the input buffer
    pub fn push_char(&mut self, c: char) {
        if self.input_enabled() {
            self.input.push(c);
        }
    }

    /// Remove the last character from the input buffer
    pub fn backspace(&mut self) {
        if self.input_enabled() {
            self.input.pop();
        }
    }

    /// Append clipboard text to the input buffer
    pub fn paste_from_clipboard(&mut self) {
        if !self.input_enabled() {
            return;
        }
        if let Ok(mut clipboard) = arboard::Clipboard::new() {
            if let Ok(text) = clipboard.get_text() {
                self.input.push_str(text.trim_end_matches('\n'));
            }
        }
    }

    /// Scroll message history up (towards older messages)
    pub fn scroll_up(&mut self) {
        let max_offset = self.store.len().saturating_sub(1);
        if self.scroll_offset < max_offset {
            self.scroll_offset += 1;
        }
    }

    /// Scroll message history down (towards the newest message)
    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}
