//! Admission control for rate-limited HTTP APIs: quota windows, FIFO backlogs, and an
//! event-driven drain loop behind one arbiter per credential.
//!
//! Every outbound call goes through [`arbiter::AdmissionController::arbitrate`], which either
//! dispatches it right away, parks it in a bounded backlog until the configured quota windows
//! free a slot, or rejects it with a backpressure error. Response handlers always run on the
//! controller's tokio runtime, never on the caller's stack.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod arbiter;
pub mod backlog;
pub mod config;
pub mod error;
#[cfg(feature = "reqwest")] pub mod http;
pub mod obs;
pub mod quota;
pub mod request;
#[cfg(feature = "reqwest")] pub mod session;

mod _prelude {
	pub use std::{
		collections::VecDeque,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use tokio::time::Instant;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
