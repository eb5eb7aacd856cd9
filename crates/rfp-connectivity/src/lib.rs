//! Connectivity state machine.
//!
//! # Invariants
//!
//! - **Probes never fail**: the caller maps every transport failure to
//!   [`ConnectivityState::Offline`] before feeding it in; this module only
//!   sees observed states.
//! - **One edge has a side effect**: a resync is requested on the
//!   `Offline → Online` transition and on no other.
//! - **First observation is silent**: the initial probe sets the state
//!   without requesting a resync; there is no prior offline state to
//!   recover from.
//!
//! All logic is pure and deterministic, with no IO and no clock. The driver owns
//! the probe cadence and enforces the requested action.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Binary liveness state of the upstream API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityState {
    Online,
    Offline,
}

impl ConnectivityState {
    pub fn is_online(&self) -> bool {
        matches!(self, ConnectivityState::Online)
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// What the monitor asks the scheduler to do after a probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeAction {
    /// Update the indicator only.
    None,
    /// Connectivity was regained: run one unscheduled refresh of the
    /// currently active view, regardless of that view's own cadence.
    Resync,
}

/// Outcome of feeding one probe result into the monitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeDecision {
    /// The state now recorded (always the observed state).
    pub state: ConnectivityState,
    pub action: ProbeAction,
}

impl ProbeDecision {
    pub fn wants_resync(&self) -> bool {
        self.action == ProbeAction::Resync
    }
}

// ---------------------------------------------------------------------------
// Monitor
// ---------------------------------------------------------------------------

/// Tracks the last observed connectivity state and detects recovery.
///
/// Transition table for [`observe`][ConnectivityMonitor::observe]:
///
/// | previous        | observed  | action   |
/// |-----------------|-----------|----------|
/// | `None` (first)  | any       | `None`   |
/// | `Online`        | `Online`  | `None`   |
/// | `Online`        | `Offline` | `None`   |
/// | `Offline`       | `Offline` | `None`   |
/// | `Offline`       | `Online`  | `Resync` |
#[derive(Clone, Debug, Default)]
pub struct ConnectivityMonitor {
    last: Option<ConnectivityState>,
}

impl ConnectivityMonitor {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Record one probe result and decide whether a resync is due.
    pub fn observe(&mut self, observed: ConnectivityState) -> ProbeDecision {
        let recovered = self.last == Some(ConnectivityState::Offline)
            && observed == ConnectivityState::Online;
        self.last = Some(observed);
        ProbeDecision {
            state: observed,
            action: if recovered {
                ProbeAction::Resync
            } else {
                ProbeAction::None
            },
        }
    }

    /// The last recorded state; `None` before the first probe.
    pub fn current(&self) -> Option<ConnectivityState> {
        self.last
    }
}
