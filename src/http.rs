//! Reqwest-backed [`Request`] for plain `GET` calls against the API.
//!
//! The arbiter only needs the metering flag and an execution future; everything else here is
//! transport glue. Endpoint labels drop the query string so API keys never reach spans or
//! failure responses.

// self
use crate::{
	_prelude::*,
	error::DispatchError,
	request::{ApiStatus, Request, RequestFuture, Response},
};

/// A `GET` request executed through a shared [`ReqwestClient`].
#[derive(Clone, Debug)]
pub struct HttpRequest {
	client: ReqwestClient,
	url: Url,
	endpoint: String,
	rate_limited: bool,
}
impl HttpRequest {
	/// Creates a metered `GET` request for `url`.
	pub fn get(client: ReqwestClient, url: Url) -> Self {
		let endpoint = endpoint_label(&url);

		Self { client, url, endpoint, rate_limited: true }
	}

	/// Overrides whether the request counts against the rate limits.
	pub fn with_rate_limited(mut self, rate_limited: bool) -> Self {
		self.rate_limited = rate_limited;

		self
	}

	/// Marks the request as free of rate limits (e.g. static reference data).
	pub fn unmetered(self) -> Self {
		self.with_rate_limited(false)
	}

	/// Full request URL, including query parameters.
	pub fn url(&self) -> &Url {
		&self.url
	}
}
impl Request for HttpRequest {
	fn is_rate_limited(&self) -> bool {
		self.rate_limited
	}

	fn endpoint(&self) -> &str {
		&self.endpoint
	}

	fn execute(self: Box<Self>) -> RequestFuture {
		let Self { client, url, endpoint, .. } = *self;

		Box::pin(async move {
			let response = client
				.get(url)
				.send()
				.await
				.map_err(|e| DispatchError::transport(&endpoint, e))?;
			let status = ApiStatus::from_code(response.status().as_u16());
			let body = response.text().await.map_err(|e| DispatchError::body(&endpoint, e))?;

			Ok(Response::new(endpoint, status, body))
		})
	}
}

fn endpoint_label(url: &Url) -> String {
	let mut label = url.clone();

	label.set_query(None);
	label.set_fragment(None);

	label.into()
}
