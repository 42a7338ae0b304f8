// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for admission decisions and completed dispatches.
#[derive(Debug, Default)]
pub struct ArbiterMetrics {
	dispatched: AtomicU64,
	queued: AtomicU64,
	bypassed: AtomicU64,
	rejected: AtomicU64,
	drained: AtomicU64,
	completed: AtomicU64,
	panicked: AtomicU64,
}
impl ArbiterMetrics {
	/// Metered requests dispatched without waiting.
	pub fn dispatched(&self) -> u64 {
		self.dispatched.load(Ordering::Relaxed)
	}

	/// Metered requests parked in the backlog.
	pub fn queued(&self) -> u64 {
		self.queued.load(Ordering::Relaxed)
	}

	/// Unmetered requests that skipped the quota set.
	pub fn bypassed(&self) -> u64 {
		self.bypassed.load(Ordering::Relaxed)
	}

	/// Requests refused because the backlog was full.
	pub fn rejected(&self) -> u64 {
		self.rejected.load(Ordering::Relaxed)
	}

	/// Backlogged requests released by the drain loop.
	pub fn drained(&self) -> u64 {
		self.drained.load(Ordering::Relaxed)
	}

	/// Handlers invoked so far, across every path.
	pub fn completed(&self) -> u64 {
		self.completed.load(Ordering::Relaxed)
	}

	/// Dispatches that panicked before their handler returned.
	pub fn panicked(&self) -> u64 {
		self.panicked.load(Ordering::Relaxed)
	}

	pub(crate) fn record_dispatched(&self) {
		self.dispatched.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_queued(&self) {
		self.queued.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_bypassed(&self) {
		self.bypassed.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_rejected(&self) {
		self.rejected.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_drained(&self) {
		self.drained.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_completed(&self) {
		self.completed.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_panicked(&self) {
		self.panicked.fetch_add(1, Ordering::Relaxed);
	}
}
