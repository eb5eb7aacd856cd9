//! Poll scheduler: drives periodic refresh cycles per active view, fans out
//! to the snapshot fetcher, joins results, and reconciles them into shared
//! presentation state.
//!
//! Split per the module's design rule: [`planner`] holds the pure cadence
//! decision logic (testable without a network or a clock), [`driver`] owns
//! the timers and IO, [`state`] owns the shared context and the UI event
//! bus.

pub mod driver;
pub mod planner;
pub mod state;

pub use driver::Scheduler;
pub use planner::{PlannerConfig, TickPlan, TickPlanner};
pub use state::{AppState, AuditPane, ControlState, DashboardPane, StatusSnapshot, UiMsg, ViewId};
