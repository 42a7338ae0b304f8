// self
use crate::obs::{AdmissionOutcome, DispatchPath};

/// Records an admission decision via the global metrics recorder (when enabled).
pub fn record_admission(outcome: AdmissionOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("request_arbiter_admission_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

/// Records a completed dispatch, labeled by path and whether the server answered successfully.
pub fn record_dispatch(path: DispatchPath, success: bool) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"request_arbiter_dispatch_total",
			"path" => path.as_str(),
			"result" => if success { "success" } else { "failure" }
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (path, success);
	}
}

/// Publishes the current backlog depth (when enabled).
pub fn record_backlog_depth(depth: usize) {
	#[cfg(feature = "metrics")]
	{
		metrics::gauge!("request_arbiter_backlog_depth").set(depth as f64);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = depth;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_noop_without_metrics() {
		record_admission(AdmissionOutcome::Rejected);
		record_dispatch(DispatchPath::Drained, false);
		record_backlog_depth(3);
	}
}
