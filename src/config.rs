//! Serializable arbiter configuration: rate limits, backlog bounds, and drain cadence.

// self
use crate::{_prelude::*, error::ConfigError, quota::QuotaSet};

/// One `(capacity, period)` quota: at most `capacity` metered calls per rolling `period`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RateLimit {
	/// Maximum accepted units per period.
	pub capacity: u32,
	/// Rolling period a unit stays charged against the window.
	#[serde(rename = "period_secs", with = "duration_secs")]
	pub period: Duration,
}
impl RateLimit {
	/// Short burst limit granted to development keys (10 calls per 10 seconds).
	pub const DEVELOPER_BURST: Self = Self::per_seconds(10, 10);
	/// Sustained limit granted to development keys (500 calls per 10 minutes).
	pub const DEVELOPER_SUSTAINED: Self = Self::per_seconds(500, 600);

	/// Creates a limit from a capacity and an arbitrary period.
	pub const fn new(capacity: u32, period: Duration) -> Self {
		Self { capacity, period }
	}

	/// Creates a limit whose period is expressed in whole seconds.
	pub const fn per_seconds(capacity: u32, secs: u64) -> Self {
		Self::new(capacity, Duration::from_secs(secs))
	}

	/// Rejects zero capacities and zero periods.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.capacity == 0 || self.period.is_zero() {
			Err(ConfigError::InvalidLimit { capacity: self.capacity, period: self.period })
		} else {
			Ok(())
		}
	}
}
impl Display for RateLimit {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{} per {:?}", self.capacity, self.period)
	}
}

/// Complete arbiter configuration.
///
/// Missing fields fall back to [`ArbiterConfig::default`], so a JSON document only needs to
/// name what it overrides:
///
/// ```
/// use request_arbiter::config::{ArbiterConfig, RateLimit};
///
/// let config = ArbiterConfig::from_json_str(
/// 	r#"{ "limits": [{ "capacity": 10, "period_secs": 10 }], "backlog_capacity": 64 }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.limits, vec![RateLimit::DEVELOPER_BURST]);
/// assert_eq!(config.backlog_capacity, 64);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbiterConfig {
	/// Quota windows guarding metered requests (0, 1, or 2 entries).
	pub limits: Vec<RateLimit>,
	/// Maximum number of requests parked in the backlog.
	pub backlog_capacity: usize,
	/// Upper bound on how long the drain loop sleeps between quota checks.
	#[serde(rename = "poll_interval_secs", with = "duration_secs")]
	pub poll_interval: Duration,
}
impl ArbiterConfig {
	/// Backlog size used when none is configured.
	pub const DEFAULT_BACKLOG_CAPACITY: usize = 100_000;
	/// Drain ceiling used when none is configured.
	pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

	/// Configuration matching the limits of a development API key.
	pub fn developer() -> Self {
		Self {
			limits: vec![RateLimit::DEVELOPER_BURST, RateLimit::DEVELOPER_SUSTAINED],
			..Default::default()
		}
	}

	/// Builds a configuration from two `(calls, seconds)` pairs.
	///
	/// A second pair of `(0, 0)` means only the first limit applies.
	pub fn with_pairs(n1: u32, t1: u64, n2: u32, t2: u64) -> Result<Self, ConfigError> {
		let mut limits = vec![RateLimit::per_seconds(n1, t1)];

		if n2 != 0 || t2 != 0 {
			limits.push(RateLimit::per_seconds(n2, t2));
		}

		let config = Self { limits, ..Default::default() };

		config.validate()?;

		Ok(config)
	}

	/// Parses a JSON document, reporting the failing field path on error.
	pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
		let mut de = serde_json::Deserializer::from_str(raw);
		let config: Self = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| ConfigError::Parse { source })?;

		config.validate()?;

		Ok(config)
	}

	/// Validates every limit plus the backlog and drain parameters.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.limits.len() > QuotaSet::MAX_WINDOWS {
			return Err(ConfigError::TooManyLimits { max: QuotaSet::MAX_WINDOWS });
		}
		if self.backlog_capacity == 0 {
			return Err(ConfigError::ZeroBacklogCapacity);
		}
		if self.poll_interval.is_zero() {
			return Err(ConfigError::ZeroPollInterval);
		}

		self.limits.iter().try_for_each(RateLimit::validate)
	}
}
impl Default for ArbiterConfig {
	fn default() -> Self {
		Self {
			limits: Vec::new(),
			backlog_capacity: Self::DEFAULT_BACKLOG_CAPACITY,
			poll_interval: Self::DEFAULT_POLL_INTERVAL,
		}
	}
}

mod duration_secs {
	// std
	use std::time::Duration;
	// crates.io
	use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

	pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_f64(value.as_secs_f64())
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
	where
		D: Deserializer<'de>,
	{
		let secs = f64::deserialize(deserializer)?;

		Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn developer_preset_carries_both_windows() {
		let config = ArbiterConfig::developer();

		assert_eq!(config.limits.len(), 2);
		assert_eq!(config.limits[0].to_string(), "10 per 10s");
		assert_eq!(config.limits[1].period, Duration::from_secs(600));
		config.validate().expect("Developer preset should validate.");
	}

	#[test]
	fn with_pairs_skips_empty_second_limit() {
		let single = ArbiterConfig::with_pairs(20, 1, 0, 0)
			.expect("A single limit with an empty second pair should be accepted.");

		assert_eq!(single.limits, vec![RateLimit::per_seconds(20, 1)]);

		let err = ArbiterConfig::with_pairs(20, 1, 100, 0)
			.expect_err("A second limit with a zero period should be rejected.");

		assert!(matches!(err, ConfigError::InvalidLimit { capacity: 100, .. }));
	}

	#[test]
	fn validate_rejects_more_than_two_limits() {
		let config = ArbiterConfig {
			limits: vec![RateLimit::per_seconds(1, 1); 3],
			..Default::default()
		};

		assert!(matches!(config.validate(), Err(ConfigError::TooManyLimits { max: 2 })));
	}

	#[test]
	fn json_parse_reports_field_path() {
		let err =
			ArbiterConfig::from_json_str(r#"{ "limits": [{ "capacity": -1, "period_secs": 1 }] }"#)
				.expect_err("Negative capacities should fail to parse.");

		match err {
			ConfigError::Parse { source } =>
				assert_eq!(source.path().to_string(), "limits[0].capacity"),
			other => panic!("Expected a parse error, got {other:?}."),
		}
	}

	#[test]
	fn json_accepts_fractional_periods() {
		let config = ArbiterConfig::from_json_str(
			r#"{ "limits": [{ "capacity": 3, "period_secs": 0.5 }], "poll_interval_secs": 0.25 }"#,
		)
		.expect("Fractional periods should parse.");

		assert_eq!(config.limits[0].period, Duration::from_millis(500));
		assert_eq!(config.poll_interval, Duration::from_millis(250));
		assert_eq!(config.backlog_capacity, ArbiterConfig::DEFAULT_BACKLOG_CAPACITY);
	}
}
