//! Validating builder that assembles an [`AdmissionController`] on a tokio runtime.

// crates.io
use tokio::runtime::Handle;
// self
use crate::{
	_prelude::*,
	arbiter::AdmissionController,
	config::{ArbiterConfig, RateLimit},
	error::ConfigError,
};

/// Builder for [`AdmissionController`] values.
#[derive(Debug, Default)]
pub struct ArbiterBuilder {
	/// Configuration validated at [`ArbiterBuilder::build`] time.
	pub config: ArbiterConfig,
	/// Runtime hosting dispatches and the drain loop; defaults to the ambient runtime.
	pub runtime: Option<Handle>,
}
impl ArbiterBuilder {
	/// Seeds the builder with an existing configuration.
	pub fn from_config(config: ArbiterConfig) -> Self {
		Self { config, runtime: None }
	}

	/// Adds a `capacity`-per-`period` limit.
	pub fn limit(self, capacity: u32, period: Duration) -> Self {
		self.rate_limit(RateLimit::new(capacity, period))
	}

	/// Adds a prebuilt limit.
	pub fn rate_limit(mut self, limit: RateLimit) -> Self {
		self.config.limits.push(limit);

		self
	}

	/// Adds several limits.
	pub fn limits<I>(mut self, limits: I) -> Self
	where
		I: IntoIterator<Item = RateLimit>,
	{
		self.config.limits.extend(limits);

		self
	}

	/// Overrides the maximum backlog size.
	pub fn backlog_capacity(mut self, capacity: usize) -> Self {
		self.config.backlog_capacity = capacity;

		self
	}

	/// Overrides the longest sleep the drain loop takes between quota checks.
	pub fn poll_interval(mut self, interval: Duration) -> Self {
		self.config.poll_interval = interval;

		self
	}

	/// Pins the runtime that hosts dispatches and the drain loop.
	pub fn runtime(mut self, handle: Handle) -> Self {
		self.runtime = Some(handle);

		self
	}

	/// Consumes the builder and validates the resulting controller.
	pub fn build(self) -> Result<AdmissionController> {
		self.config.validate()?;

		let runtime = match self.runtime {
			Some(handle) => handle,
			None => Handle::try_current().map_err(|_| ConfigError::MissingRuntime)?,
		};

		Ok(AdmissionController::assemble(self.config, runtime)?)
	}
}
