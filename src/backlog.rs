//! Bounded FIFO that holds requests while the quota set has no headroom.

// self
use crate::{
	_prelude::*,
	error::{BacklogError, ConfigError},
	request::{Request, ResponseHandler},
};

/// A request paired with the handler that will receive its response.
pub struct PendingEntry {
	request: Box<dyn Request>,
	handler: Box<dyn ResponseHandler>,
}
impl PendingEntry {
	/// Pairs a request with its handler.
	pub fn new(request: impl Request, handler: impl ResponseHandler) -> Self {
		Self::boxed(Box::new(request), Box::new(handler))
	}

	/// Pairs already boxed collaborators.
	pub fn boxed(request: Box<dyn Request>, handler: Box<dyn ResponseHandler>) -> Self {
		Self { request, handler }
	}

	/// Endpoint label of the wrapped request.
	pub fn endpoint(&self) -> &str {
		self.request.endpoint()
	}

	/// Whether the wrapped request is metered.
	pub fn is_rate_limited(&self) -> bool {
		self.request.is_rate_limited()
	}

	pub(crate) fn into_parts(self) -> (Box<dyn Request>, Box<dyn ResponseHandler>) {
		(self.request, self.handler)
	}
}
impl Debug for PendingEntry {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PendingEntry")
			.field("endpoint", &self.endpoint())
			.field("rate_limited", &self.is_rate_limited())
			.finish()
	}
}

/// Order-preserving queue with a fixed maximum size.
///
/// Entries leave in exactly the order they arrived. The queue is not synchronized; the
/// [`AdmissionController`](crate::arbiter::AdmissionController) keeps it behind the same lock
/// as its drain flag so producers and the single drain consumer never race.
#[derive(Debug)]
pub struct Backlog<T = PendingEntry> {
	entries: VecDeque<T>,
	capacity: usize,
}
impl<T> Backlog<T> {
	/// Creates an empty backlog holding at most `capacity` entries.
	pub fn new(capacity: usize) -> Result<Self, ConfigError> {
		if capacity == 0 {
			return Err(ConfigError::ZeroBacklogCapacity);
		}

		Ok(Self { entries: VecDeque::new(), capacity })
	}

	/// Appends to the tail, returning the entry's 1-based position in line.
	pub fn enqueue(&mut self, entry: T) -> Result<usize, BacklogError> {
		if self.is_full() {
			return Err(BacklogError::Full { capacity: self.capacity });
		}

		self.entries.push_back(entry);

		Ok(self.entries.len())
	}

	/// Removes and returns the oldest entry.
	pub fn dequeue(&mut self) -> Result<T, BacklogError> {
		self.entries.pop_front().ok_or(BacklogError::Empty)
	}

	/// Number of waiting entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` when nothing is waiting.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns `true` once the configured maximum is reached.
	pub fn is_full(&self) -> bool {
		self.entries.len() >= self.capacity
	}

	/// Configured maximum size.
	pub fn capacity(&self) -> usize {
		self.capacity
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn zero_capacity_is_a_configuration_error() {
		assert!(matches!(Backlog::<u32>::new(0), Err(ConfigError::ZeroBacklogCapacity)));
	}

	#[test]
	fn dequeues_in_insertion_order() {
		let mut backlog = Backlog::new(8).expect("Backlog fixture should build.");

		for value in 1..=5 {
			assert_eq!(backlog.enqueue(value), Ok(value));
		}
		assert_eq!(backlog.dequeue(), Ok(1));
		assert_eq!(backlog.enqueue(6), Ok(5));

		let drained = std::iter::from_fn(|| backlog.dequeue().ok()).collect::<Vec<_>>();

		assert_eq!(drained, vec![2, 3, 4, 5, 6]);
		assert!(backlog.is_empty());
	}

	#[test]
	fn overflow_is_rejected_and_size_is_unchanged() {
		let mut backlog = Backlog::new(2).expect("Backlog fixture should build.");

		backlog.enqueue("a").expect("First entry should fit.");
		backlog.enqueue("b").expect("Second entry should fit.");

		assert_eq!(backlog.enqueue("c"), Err(BacklogError::Full { capacity: 2 }));
		assert_eq!(backlog.len(), 2);
		assert_eq!(backlog.dequeue(), Ok("a"));
	}

	#[test]
	fn dequeue_on_empty_reports_empty() {
		let mut backlog = Backlog::<u8>::new(1).expect("Backlog fixture should build.");

		assert_eq!(backlog.dequeue(), Err(BacklogError::Empty));
	}
}
