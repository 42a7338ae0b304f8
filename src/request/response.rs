// self
use crate::{_prelude::*, error::DispatchError, request::ApiStatus};

/// Outcome of one dispatched request, delivered to its handler exactly once.
///
/// Transport failures do not surface as errors; they arrive here with `status == None` and
/// `failure` populated, so the handler sees every outcome through one type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
	/// Endpoint label (usually the request URL) that produced the response.
	pub endpoint: String,
	/// HTTP status, when the server answered.
	pub status: Option<ApiStatus>,
	/// Raw response body; empty when the call failed before a body arrived.
	pub body: String,
	/// Instant the response (or failure) was observed.
	#[serde(with = "time::serde::rfc3339")]
	pub received_at: OffsetDateTime,
	/// Dispatch failure, when the call never completed.
	pub failure: Option<DispatchError>,
}
impl Response {
	/// Builds a response for a call the server answered.
	pub fn new(endpoint: impl Into<String>, status: ApiStatus, body: impl Into<String>) -> Self {
		Self {
			endpoint: endpoint.into(),
			status: Some(status),
			body: body.into(),
			received_at: OffsetDateTime::now_utc(),
			failure: None,
		}
	}

	/// Builds the failure-shaped response handed to handlers when dispatch fails.
	pub fn failed(endpoint: impl Into<String>, failure: DispatchError) -> Self {
		Self {
			endpoint: endpoint.into(),
			status: None,
			body: String::new(),
			received_at: OffsetDateTime::now_utc(),
			failure: Some(failure),
		}
	}

	/// Returns `true` when the server answered with a 2xx status.
	pub fn is_success(&self) -> bool {
		self.failure.is_none() && self.status.is_some_and(ApiStatus::is_success)
	}
}
impl Display for Response {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match (&self.failure, self.status) {
			(Some(failure), _) => Display::fmt(failure, f),
			(None, Some(status)) if status.is_success() => f.write_str(&self.body),
			(None, Some(status)) => Display::fmt(&status, f),
			(None, None) => f.write_str("No response was received."),
		}
	}
}
