//! Background task that releases backlogged requests as quota frees up.
//!
//! One task exists per activation. It is spawned by the first enqueue that finds the
//! controller idle and exits, clearing the `draining` flag under the backlog lock, as soon as
//! it observes an empty backlog. Between releases it sleeps until the quota set's next slot
//! opens, bounded by the configured poll interval.

// self
use crate::{
	_prelude::*,
	arbiter::{Shared, dispatch},
	obs::{self, DispatchPath},
};

pub(crate) fn spawn(shared: Arc<Shared>) {
	let runtime = shared.runtime.clone();

	runtime.spawn(run(shared));
}

async fn run(shared: Arc<Shared>) {
	obs::debug("drain", "Drain loop started.");

	loop {
		let next = {
			let mut state = shared.state.lock();

			if state.backlog.is_empty() {
				state.draining = false;

				break;
			}

			let entry =
				if shared.quota.try_reserve_all() { state.backlog.dequeue().ok() } else { None };

			obs::record_backlog_depth(state.backlog.len());

			entry
		};

		match next {
			Some(entry) => {
				shared.metrics.record_drained();

				// One release in flight at a time; handlers observe backlog order.
				let task_shared = shared.clone();
				let task = shared.runtime.spawn(async move {
					dispatch::dispatch(entry, DispatchPath::Drained, &task_shared.metrics).await
				});

				dispatch::supervise(task, DispatchPath::Drained, &shared.metrics).await;
			},
			None => {
				let now = Instant::now();
				let wait = shared
					.quota
					.next_release_at(now)
					.map_or(shared.poll_interval, |release| {
						release.saturating_duration_since(now).min(shared.poll_interval)
					});

				// `sleep` clamps deadlines past the clock's range.
				tokio::time::sleep(wait).await;
			},
		}
	}

	obs::debug("drain", "Backlog empty; drain loop stopped.");
}
