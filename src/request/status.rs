// self
use crate::_prelude::*;

/// HTTP statuses documented by the upstream API, with a catch-all for anything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiStatus {
	/// 200: the request succeeded.
	Successful,
	/// 400: the request was malformed; do not resend it unchanged.
	BadRequest,
	/// 401: the key was missing or invalid, or the path is unsupported.
	Unauthorized,
	/// 404: the requested data does not exist.
	DataNotFound,
	/// 429: the key's rate limit was exceeded.
	RateLimitExceeded,
	/// 500: the service hit an unexpected condition.
	InternalServerError,
	/// 503: the service is temporarily unavailable.
	ServiceUnavailable,
	/// Any status the API does not document.
	Other(u16),
}
impl ApiStatus {
	/// Maps a raw status code.
	pub const fn from_code(code: u16) -> Self {
		match code {
			200 => Self::Successful,
			400 => Self::BadRequest,
			401 => Self::Unauthorized,
			404 => Self::DataNotFound,
			429 => Self::RateLimitExceeded,
			500 => Self::InternalServerError,
			503 => Self::ServiceUnavailable,
			other => Self::Other(other),
		}
	}

	/// Returns the three-digit status code.
	pub const fn code(self) -> u16 {
		match self {
			Self::Successful => 200,
			Self::BadRequest => 400,
			Self::Unauthorized => 401,
			Self::DataNotFound => 404,
			Self::RateLimitExceeded => 429,
			Self::InternalServerError => 500,
			Self::ServiceUnavailable => 503,
			Self::Other(code) => code,
		}
	}

	/// Human-readable explanation of the status.
	pub const fn description(self) -> &'static str {
		match self {
			Self::Successful => "Request successful.",
			Self::BadRequest => "Invalid request. The URL may be formatted incorrectly.",
			Self::Unauthorized =>
				"An API key was not supplied with the request, the key supplied was invalid, or the request was for an incorrect or unsupported path.",
			Self::DataNotFound => "The data you requested could not be found.",
			Self::RateLimitExceeded => "Your API key's rate limit has been exceeded.",
			Self::InternalServerError => "There is an issue with the API service.",
			Self::ServiceUnavailable => "The API service is unavailable.",
			Self::Other(_) => "Unrecognized response status.",
		}
	}

	/// Returns `true` for 2xx statuses.
	pub const fn is_success(self) -> bool {
		matches!(self.code(), 200..=299)
	}

	/// Returns `true` for 4xx statuses.
	pub const fn is_client_error(self) -> bool {
		matches!(self.code(), 400..=499)
	}

	/// Returns `true` for 5xx statuses.
	pub const fn is_server_error(self) -> bool {
		matches!(self.code(), 500..=599)
	}
}
impl Display for ApiStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		if self.is_success() {
			write!(f, "{} OK: {}", self.code(), self.description())
		} else {
			write!(f, "{} Error: {}", self.code(), self.description())
		}
	}
}
