//! Explicit per-credential context: one API key, one base URL, one arbiter.
//!
//! Nothing here is global. Applications juggling several keys simply build several sessions,
//! each with its own [`AdmissionController`] and therefore its own quota windows and backlog.

// self
use crate::{
	_prelude::*,
	arbiter::{Admission, AdmissionController},
	error::ConfigError,
	http::HttpRequest,
	request::{Request, Response, ResponseHandler},
};

/// API credential bound to the arbiter that meters its calls.
#[derive(Clone)]
pub struct ApiSession {
	key: String,
	base_url: Url,
	http_client: ReqwestClient,
	controller: AdmissionController,
}
impl ApiSession {
	/// Creates a session; `base_url` should end with `/` so relative paths append to it.
	pub fn new(key: impl Into<String>, base_url: Url, controller: AdmissionController) -> Self {
		Self { key: key.into(), base_url, http_client: ReqwestClient::default(), controller }
	}

	/// Replaces the HTTP client used for requests built by this session.
	pub fn with_http_client(mut self, client: ReqwestClient) -> Self {
		self.http_client = client;

		self
	}

	/// Builds a `GET` request for `path` relative to the base URL, carrying the API key.
	pub fn request(&self, path: &str, rate_limited: bool) -> Result<HttpRequest> {
		let mut url = self.base_url.join(path).map_err(ConfigError::from)?;

		url.query_pairs_mut().append_pair("api_key", &self.key);

		Ok(HttpRequest::get(self.http_client.clone(), url).with_rate_limited(rate_limited))
	}

	/// Routes a request through this session's arbiter.
	pub fn arbitrate(
		&self,
		request: impl Request,
		handler: impl ResponseHandler,
	) -> Result<Admission> {
		self.controller.arbitrate(request, handler)
	}

	/// Routes a request through this session's arbiter and waits for the response.
	pub async fn send(&self, request: impl Request) -> Result<Response> {
		self.controller.send(request).await
	}

	/// Arbiter metering this session.
	pub fn controller(&self) -> &AdmissionController {
		&self.controller
	}

	/// Base URL requests are resolved against.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}
}
impl Debug for ApiSession {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiSession")
			.field("base_url", &self.base_url.as_str())
			.field("key_set", &!self.key.is_empty())
			.field("controller", &self.controller)
			.finish()
	}
}
