//! Contracts between the arbiter and its collaborators.
//!
//! The arbiter never looks inside a request. It only asks whether the call is metered, borrows
//! an endpoint label for logs and failure responses, and finally hands the request over to be
//! executed. Whatever comes back is passed to the request's [`ResponseHandler`] exactly once.

mod response;
mod status;

pub use response::Response;
pub use status::ApiStatus;

// self
use crate::{_prelude::*, error::DispatchError};

/// Boxed future returned by [`Request::execute`].
pub type RequestFuture = Pin<Box<dyn Future<Output = Result<Response, DispatchError>> + Send>>;

/// An outbound API call the arbiter can admit and dispatch.
pub trait Request
where
	Self: 'static + Send,
{
	/// Whether the call counts against the key's rate limits.
	fn is_rate_limited(&self) -> bool;

	/// Label identifying the call, used for spans and failure responses.
	fn endpoint(&self) -> &str;

	/// Performs the network call, consuming the request.
	fn execute(self: Box<Self>) -> RequestFuture;
}

/// Sink for the outcome of a dispatched request.
///
/// Implemented for every `FnOnce(Response) + Send + 'static`, so closures work directly.
pub trait ResponseHandler
where
	Self: 'static + Send,
{
	/// Consumes the response; invoked exactly once per request.
	fn handle(self: Box<Self>, response: Response);
}
impl<F> ResponseHandler for F
where
	F: 'static + Send + FnOnce(Response),
{
	fn handle(self: Box<Self>, response: Response) {
		(*self)(response)
	}
}
