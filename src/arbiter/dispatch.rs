//! Runs one admitted request and routes its outcome to the handler.

// crates.io
use tokio::task::JoinHandle;
// self
use crate::{
	arbiter::ArbiterMetrics,
	backlog::PendingEntry,
	obs::{self, ArbiterSpan, DispatchPath},
	request::Response,
};

/// Executes the request, folds dispatch failures into a failure-shaped [`Response`], and hands
/// the result to the handler. Quota was already charged by the caller.
pub(crate) async fn dispatch(entry: PendingEntry, path: DispatchPath, metrics: &ArbiterMetrics) {
	let (request, handler) = entry.into_parts();
	let endpoint = request.endpoint().to_owned();
	let span = ArbiterSpan::new(path.as_str(), &endpoint);
	let response = span
		.instrument(request.execute())
		.await
		.unwrap_or_else(|failure| Response::failed(endpoint, failure));

	span.record_outcome(if response.is_success() { "success" } else { "failure" });
	obs::record_dispatch(path, response.is_success());

	handler.handle(response);
	metrics.record_completed();
}

/// Waits for a spawned dispatch and reports it if it panicked.
pub(crate) async fn supervise(task: JoinHandle<()>, path: DispatchPath, metrics: &ArbiterMetrics) {
	if task.await.is_err_and(|e| e.is_panic()) {
		metrics.record_panicked();
		obs::warn(path.as_str(), "A dispatch panicked before its handler returned.");
	}
}
