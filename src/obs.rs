//! Optional observability helpers for the arbiter.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit spans named `request_arbiter.admission` with the `stage` (call
//!   site or dispatch path), `endpoint`, and `outcome` (admission decision or dispatch result)
//!   fields, plus warnings for suspicious configurations and drain-loop
//!   lifecycle events.
//! - Enable `metrics` to increment `request_arbiter_admission_total` (labeled by `outcome`) and
//!   `request_arbiter_dispatch_total` (labeled by `path` + `result`), and to publish the
//!   `request_arbiter_backlog_depth` gauge.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Decision the arbiter reached for one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdmissionOutcome {
	/// Metered request admitted and dispatched right away.
	Dispatched,
	/// Metered request parked in the backlog.
	Queued,
	/// Unmetered request dispatched without touching quota.
	Bypassed,
	/// Request refused because the backlog was full.
	Rejected,
}
impl AdmissionOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AdmissionOutcome::Dispatched => "dispatched",
			AdmissionOutcome::Queued => "queued",
			AdmissionOutcome::Bypassed => "bypassed",
			AdmissionOutcome::Rejected => "rejected",
		}
	}
}
impl Display for AdmissionOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Execution context a dispatch ran in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DispatchPath {
	/// Spawned straight from `arbitrate`.
	Immediate,
	/// Released by the drain loop.
	Drained,
}
impl DispatchPath {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			DispatchPath::Immediate => "immediate",
			DispatchPath::Drained => "drained",
		}
	}
}
impl Display for DispatchPath {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
