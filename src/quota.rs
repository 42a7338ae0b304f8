//! Quota windows and the all-or-nothing set that guards metered dispatches.

pub mod window;

pub use window::QuotaWindow;

// self
use crate::{_prelude::*, config::RateLimit, error::ConfigError};

/// Point-in-time view of one window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WindowSnapshot {
	/// Limit enforced by the window.
	pub limit: RateLimit,
	/// Units charged when the snapshot was taken.
	pub occupancy: u32,
}

/// Conjunction of every active [`QuotaWindow`].
///
/// A unit is admitted only when *all* windows have room, and the admission charges every window
/// under one lock, so two concurrent callers can never both claim the last slot. An empty set
/// always has headroom.
#[derive(Debug, Default)]
pub struct QuotaSet {
	windows: Mutex<Vec<QuotaWindow>>,
}
impl QuotaSet {
	/// Maximum number of simultaneous windows the API imposes.
	pub const MAX_WINDOWS: usize = 2;

	/// Creates a set from a list of limits.
	pub fn from_limits(limits: &[RateLimit]) -> Result<Self, ConfigError> {
		let set = Self::default();

		for limit in limits {
			set.add_limit(*limit)?;
		}

		Ok(set)
	}

	/// Appends a validated limit; fails once [`Self::MAX_WINDOWS`] windows exist.
	pub fn add_limit(&self, limit: RateLimit) -> Result<(), ConfigError> {
		self.add_window(QuotaWindow::from_limit(limit)?)
	}

	/// Appends a window; fails without mutating the set once it is full.
	pub fn add_window(&self, window: QuotaWindow) -> Result<(), ConfigError> {
		let mut windows = self.windows.lock();

		if windows.len() >= Self::MAX_WINDOWS {
			return Err(ConfigError::TooManyLimits { max: Self::MAX_WINDOWS });
		}

		windows.push(window);

		Ok(())
	}

	/// Number of configured windows.
	pub fn len(&self) -> usize {
		self.windows.lock().len()
	}

	/// Returns `true` when no window is configured.
	pub fn is_empty(&self) -> bool {
		self.windows.lock().is_empty()
	}

	/// Charges one unit on every window, or on none of them.
	pub fn try_reserve_all(&self) -> bool {
		self.try_reserve_all_at(Instant::now())
	}

	/// Charges one unit on every window at `now`, or on none of them.
	pub fn try_reserve_all_at(&self, now: Instant) -> bool {
		let mut windows = self.windows.lock();

		if !windows.iter().all(|window| window.has_capacity_at(now)) {
			return false;
		}

		for window in windows.iter_mut() {
			window.try_reserve_at(now);
		}

		true
	}

	/// Read-only check that every window has room right now.
	pub fn has_headroom(&self) -> bool {
		self.has_headroom_at(Instant::now())
	}

	/// Read-only check that every window has room at `now`.
	pub fn has_headroom_at(&self, now: Instant) -> bool {
		self.windows.lock().iter().all(|window| window.has_capacity_at(now))
	}

	/// Instant at which every full window has freed a slot.
	///
	/// Returns `None` when no window is full, i.e. a reservation would succeed immediately, or
	/// when a release lies beyond the clock's range.
	pub fn next_release(&self) -> Option<Instant> {
		self.next_release_at(Instant::now())
	}

	/// Instant after `now` at which every full window has freed a slot.
	pub fn next_release_at(&self, now: Instant) -> Option<Instant> {
		self.windows
			.lock()
			.iter()
			.filter(|window| !window.has_capacity_at(now))
			.filter_map(|window| window.next_release_at(now))
			.max()
	}

	/// Snapshots every window in configuration order.
	pub fn occupancy(&self) -> Vec<WindowSnapshot> {
		let now = Instant::now();

		self.windows
			.lock()
			.iter()
			.map(|window| WindowSnapshot {
				limit: window.limit(),
				occupancy: window.occupancy_at(now),
			})
			.collect()
	}
}
