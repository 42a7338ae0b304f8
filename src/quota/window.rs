//! Single `(capacity, period)` window backed by an ordered log of reservation instants.

// self
use crate::{_prelude::*, config::RateLimit, error::ConfigError};

/// Occupancy tracker for one rate limit.
///
/// Every accepted unit is stamped with the instant it was reserved and stays charged for exactly
/// one `period`. Expired stamps are pruned lazily, so each unit is released once and only once
/// without any per-unit timer. Mutation requires `&mut self`; shared use goes through
/// [`QuotaSet`](crate::quota::QuotaSet), which serializes access behind a single lock.
#[derive(Clone, Debug)]
pub struct QuotaWindow {
	limit: RateLimit,
	reservations: VecDeque<Instant>,
}
impl QuotaWindow {
	/// Creates an empty window, rejecting zero capacities or periods.
	pub fn new(capacity: u32, period: Duration) -> Result<Self, ConfigError> {
		Self::from_limit(RateLimit::new(capacity, period))
	}

	/// Creates an empty window from a validated [`RateLimit`].
	pub fn from_limit(limit: RateLimit) -> Result<Self, ConfigError> {
		limit.validate()?;

		Ok(Self { limit, reservations: VecDeque::new() })
	}

	/// Returns the limit enforced by this window.
	pub fn limit(&self) -> RateLimit {
		self.limit
	}

	/// Returns the number of units charged right now.
	pub fn occupancy(&self) -> u32 {
		self.occupancy_at(Instant::now())
	}

	/// Returns the number of units still charged at `now`.
	pub fn occupancy_at(&self, now: Instant) -> u32 {
		let live = self.reservations.len() - self.expired_count(now);

		u32::try_from(live).unwrap_or(u32::MAX)
	}

	/// Read-only check that one more unit would fit right now.
	pub fn has_capacity(&self) -> bool {
		self.has_capacity_at(Instant::now())
	}

	/// Read-only check that one more unit would fit at `now`.
	pub fn has_capacity_at(&self, now: Instant) -> bool {
		self.occupancy_at(now) < self.limit.capacity
	}

	/// Charges one unit if the window has room; returns whether it did.
	pub fn try_reserve(&mut self) -> bool {
		self.try_reserve_at(Instant::now())
	}

	/// Charges one unit at `now` if the window has room; returns whether it did.
	///
	/// Stamps never move backwards: a `now` older than the newest stamp is clamped to it.
	pub fn try_reserve_at(&mut self, now: Instant) -> bool {
		self.expire(now);

		if self.reservations.len() >= self.limit.capacity as usize {
			return false;
		}

		let stamp = self.reservations.back().map_or(now, |last| now.max(*last));

		self.reservations.push_back(stamp);

		true
	}

	/// Instant at which the oldest live unit is released, if any unit is live.
	pub fn next_release(&self) -> Option<Instant> {
		self.next_release_at(Instant::now())
	}

	/// Instant after `now` at which the oldest live unit is released.
	///
	/// Returns `None` when that instant is too far out to be represented.
	pub fn next_release_at(&self, now: Instant) -> Option<Instant> {
		self.reservations
			.get(self.expired_count(now))
			.and_then(|stamp| stamp.checked_add(self.limit.period))
	}

	fn expire(&mut self, now: Instant) {
		let expired = self.expired_count(now);

		for _ in 0..expired {
			self.reservations.pop_front();
		}
	}

	fn expired_count(&self, now: Instant) -> usize {
		let period = self.limit.period;

		self.reservations.partition_point(|stamp| now.saturating_duration_since(*stamp) >= period)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn rejects_non_positive_parameters() {
		assert!(matches!(
			QuotaWindow::new(0, Duration::from_secs(1)),
			Err(ConfigError::InvalidLimit { capacity: 0, .. })
		));
		assert!(matches!(
			QuotaWindow::new(5, Duration::ZERO),
			Err(ConfigError::InvalidLimit { capacity: 5, .. })
		));
	}

	#[test]
	fn reserve_stops_at_capacity_and_leaves_state_unchanged() {
		let start = Instant::now();
		let mut window =
			QuotaWindow::new(2, Duration::from_secs(10)).expect("Window fixture should build.");

		assert!(window.try_reserve_at(start));
		assert!(window.try_reserve_at(start));
		assert!(!window.try_reserve_at(start));
		assert_eq!(window.occupancy_at(start), 2);
		assert!(!window.has_capacity_at(start));
	}

	#[test]
	fn each_unit_expires_exactly_once_after_its_period() {
		let start = Instant::now();
		let period = Duration::from_secs(10);
		let mut window = QuotaWindow::new(3, period).expect("Window fixture should build.");

		assert!(window.try_reserve_at(start));
		assert!(window.try_reserve_at(start + Duration::from_secs(4)));
		assert_eq!(window.occupancy_at(start + Duration::from_secs(9)), 2);
		assert_eq!(window.occupancy_at(start + period), 1);
		assert_eq!(window.occupancy_at(start + Duration::from_secs(14)), 0);
		// A later reservation prunes both stale stamps without touching the new one.
		assert!(window.try_reserve_at(start + Duration::from_secs(20)));
		assert_eq!(window.occupancy_at(start + Duration::from_secs(20)), 1);
	}

	#[test]
	fn has_capacity_is_read_only() {
		let start = Instant::now();
		let mut window =
			QuotaWindow::new(1, Duration::from_secs(1)).expect("Window fixture should build.");

		for _ in 0..5 {
			assert!(window.has_capacity_at(start));
		}

		assert_eq!(window.occupancy_at(start), 0);
		assert!(window.try_reserve_at(start));
	}

	#[test]
	fn next_release_tracks_oldest_live_unit() {
		let start = Instant::now();
		let mut window =
			QuotaWindow::new(2, Duration::from_secs(5)).expect("Window fixture should build.");

		assert_eq!(window.next_release_at(start), None);
		assert!(window.try_reserve_at(start));
		assert!(window.try_reserve_at(start + Duration::from_secs(2)));
		assert_eq!(window.next_release_at(start), Some(start + Duration::from_secs(5)));
		assert_eq!(
			window.next_release_at(start + Duration::from_secs(6)),
			Some(start + Duration::from_secs(7))
		);
	}

	#[test]
	fn unrepresentable_release_is_reported_as_unknown() {
		let start = Instant::now();
		let mut window = QuotaWindow::new(1, Duration::MAX).expect("Window fixture should build.");

		assert!(window.try_reserve_at(start));
		assert!(!window.has_capacity_at(start + Duration::from_secs(3_600)));
		assert_eq!(window.next_release_at(start), None);
	}
}
