//! Arbiter-level error types shared across quotas, backlogs, and dispatchers.

// self
use crate::_prelude::*;

/// Arbiter-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical arbiter error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; fatal at setup time.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Backlog refused or could not yield an entry.
	#[error(transparent)]
	Backlog(#[from] BacklogError),

	/// The response never reached the awaiting caller.
	#[error("Response handler was dropped before a response was delivered.")]
	HandlerDropped,
}

/// Configuration and validation failures raised while setting up an arbiter.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Rate limit parameters must be strictly positive.
	#[error("Rate limit of {capacity} per {period:?} is invalid; both values must be positive.")]
	InvalidLimit {
		/// Requested capacity.
		capacity: u32,
		/// Requested period.
		period: Duration,
	},
	/// The quota set already holds the maximum number of windows.
	#[error("At most {max} rate limits may be configured.")]
	TooManyLimits {
		/// Maximum number of windows a quota set accepts.
		max: usize,
	},
	/// Backlog capacity must be at least one entry.
	#[error("Backlog capacity must be positive.")]
	ZeroBacklogCapacity,
	/// Drain poll interval must be non-zero.
	#[error("Drain poll interval must be positive.")]
	ZeroPollInterval,
	/// No tokio runtime was supplied or found on the current thread.
	#[error("No tokio runtime is available to host the drain loop.")]
	MissingRuntime,
	/// Serialized configuration could not be parsed.
	#[error("Arbiter configuration is malformed.")]
	Parse {
		/// Structured parsing failure, including the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Session base URL cannot be parsed or joined.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
impl From<url::ParseError> for ConfigError {
	fn from(e: url::ParseError) -> Self {
		Self::InvalidBaseUrl { source: e }
	}
}

/// Backlog queue failures.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum BacklogError {
	/// The backlog reached its configured maximum; retry later or raise the capacity.
	#[error("Backlog is full ({capacity} entries); the rate limit is saturated.")]
	Full {
		/// Configured maximum backlog size.
		capacity: usize,
	},
	/// Nothing is waiting in the backlog.
	#[error("Backlog is empty.")]
	Empty,
}

/// Failure raised by a request collaborator while performing its network call.
///
/// Dispatch failures are never returned to the arbitrating caller; the dispatcher folds them
/// into a failure-shaped [`Response`](crate::request::Response) so the handler remains the
/// single sink for every outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum DispatchError {
	/// Network failure (DNS, TCP, TLS, timeouts).
	#[error("Network error occurred while calling {endpoint}: {message}.")]
	Transport {
		/// Endpoint label of the failed request.
		endpoint: String,
		/// Human-readable error payload.
		message: String,
	},
	/// The response body could not be read.
	#[error("Response body from {endpoint} could not be read: {message}.")]
	Body {
		/// Endpoint label of the failed request.
		endpoint: String,
		/// Human-readable error payload.
		message: String,
	},
}
impl DispatchError {
	/// Builds a transport failure from any error type.
	pub fn transport(endpoint: impl Into<String>, src: impl Display) -> Self {
		Self::Transport { endpoint: endpoint.into(), message: src.to_string() }
	}

	/// Builds a body-read failure from any error type.
	pub fn body(endpoint: impl Into<String>, src: impl Display) -> Self {
		Self::Body { endpoint: endpoint.into(), message: src.to_string() }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn backlog_error_converts_into_arbiter_error() {
		let backlog_error = BacklogError::Full { capacity: 3 };
		let error: Error = backlog_error.clone().into();

		assert!(matches!(error, Error::Backlog(BacklogError::Full { capacity: 3 })));
		assert_eq!(error.to_string(), backlog_error.to_string());
	}

	#[test]
	fn config_error_exposes_parse_source() {
		let mut de = serde_json::Deserializer::from_str("{\"capacity\":\"ten\"}");
		let source = serde_path_to_error::deserialize::<_, crate::config::RateLimit>(&mut de)
			.expect_err("Malformed capacity should fail to deserialize.");
		let error = Error::from(ConfigError::Parse { source });
		let inner = StdError::source(&error)
			.expect("Transparent config error should expose the parse failure.");

		assert!(inner.to_string().contains("capacity"));
	}

	#[test]
	fn dispatch_error_serializes_for_logging() {
		let error = DispatchError::transport("summoner/by-name", "connection reset");
		let payload = serde_json::to_string(&error)
			.expect("DispatchError should serialize to JSON.");

		assert!(payload.contains("connection reset"));
		assert_eq!(
			error.to_string(),
			"Network error occurred while calling summoner/by-name: connection reset."
		);
	}
}
