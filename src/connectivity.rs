//! Backend reachability tracking
//!
//! A small state machine the UI consumes to decide whether input is
//! enabled and whether to offer a manual recheck. The monitor itself does
//! no I/O; the view-model runs the health probe and feeds the outcome back
//! through [`ConnectivityMonitor::apply_result`].

use tracing::debug;

/// Backend reachability as the UI sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityState {
    /// A health check is in flight
    Checking,
    /// The last health check succeeded
    Online,
    /// The last health check or chat request failed
    Offline,
}

impl ConnectivityState {
    /// Short status label for display
    pub fn label(&self) -> &str {
        match self {
            Self::Checking => "Checking...",
            Self::Online => "Online",
            Self::Offline => "Offline",
        }
    }
}

/// Tracks backend reachability across health checks
///
/// Every check is tagged with a monotonically increasing token; a result
/// is applied only when its token is the latest issued, so a slow probe
/// resolving after a newer one cannot overwrite fresher state.
#[derive(Debug)]
pub struct ConnectivityMonitor {
    state: ConnectivityState,
    latest_token: u64,
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectivityMonitor {
    /// Create a monitor in the `Checking` state
    ///
    /// The first health check is expected immediately after construction,
    /// so there is no point pretending to know the answer before it runs.
    pub fn new() -> Self {
        Self {
            state: ConnectivityState::Checking,
            latest_token: 0,
        }
    }

    /// Current reachability state
    pub fn state(&self) -> ConnectivityState {
        self.state
    }

    /// Whether the backend was reachable at the last check
    pub fn is_online(&self) -> bool {
        self.state == ConnectivityState::Online
    }

    /// Whether the backend is considered unreachable
    pub fn is_offline(&self) -> bool {
        self.state == ConnectivityState::Offline
    }

    /// Start a new check: moves to `Checking` and returns its token
    pub fn begin_check(&mut self) -> u64 {
        self.latest_token += 1;
        self.state = ConnectivityState::Checking;
        self.latest_token
    }

    /// Apply a health check result
    ///
    /// Returns `false` when the token is stale (a newer check was issued
    /// after this one started); stale results are discarded.
    pub fn apply_result(&mut self, token: u64, reachable: bool) -> bool {
        if token != self.latest_token {
            debug!(
                "Discarding stale health result (token {} < {})",
                token, self.latest_token
            );
            return false;
        }

        self.state = if reachable {
            ConnectivityState::Online
        } else {
            ConnectivityState::Offline
        };
        true
    }

    /// Force `Offline`
    ///
    /// Used when a chat request fails: delivery failure is treated as
    /// evidence of unreachability even when the cause might be
    /// request-specific.
    pub fn mark_offline(&mut self) {
        self.state = ConnectivityState::Offline;
    }
}
