//! The admission controller: dispatch now, park in the backlog, or reject.
//!
//! [`AdmissionController::arbitrate`] is the single entry point for outbound calls. Unmetered
//! requests skip the quota set entirely. Metered requests are dispatched right away only when
//! the backlog is empty *and* every quota window accepts the reservation; otherwise they join
//! the tail of the backlog and the drain loop releases them in arrival order as slots expire.
//!
//! Handlers always run on the controller's runtime: immediate dispatches are spawned, backlogged
//! ones run on the drain task. `arbitrate` itself never waits on network I/O, so callers see the
//! same asynchronous contract on both paths.

pub mod builder;

mod dispatch;
mod drain;
mod metrics;

pub use builder::ArbiterBuilder;
pub use metrics::ArbiterMetrics;

// crates.io
use tokio::{runtime::Handle, sync::oneshot};
// self
use crate::{
	_prelude::*,
	backlog::{Backlog, PendingEntry},
	config::{ArbiterConfig, RateLimit},
	error::ConfigError,
	obs::{self, AdmissionOutcome, ArbiterSpan, DispatchPath},
	quota::{QuotaSet, WindowSnapshot},
	request::{Request, Response, ResponseHandler},
};

/// Decision returned by [`AdmissionController::arbitrate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
	/// Quota was reserved and the request is being dispatched now.
	Dispatched,
	/// The request waits in the backlog at the given 1-based position.
	Queued {
		/// Position in line at the moment of enqueue.
		position: usize,
	},
	/// The request is unmetered and was dispatched without touching quota.
	Bypassed,
}

/// Per-credential arbiter guarding every outbound call.
///
/// Cloning is cheap; all clones share the same quota windows, backlog, and drain loop.
#[derive(Clone)]
pub struct AdmissionController {
	shared: Arc<Shared>,
}
impl AdmissionController {
	/// Starts building a controller.
	pub fn builder() -> ArbiterBuilder {
		ArbiterBuilder::default()
	}

	/// Builds a controller from a configuration, using the ambient tokio runtime.
	pub fn from_config(config: ArbiterConfig) -> Result<Self> {
		ArbiterBuilder::from_config(config).build()
	}

	pub(crate) fn assemble(config: ArbiterConfig, runtime: Handle) -> Result<Self, ConfigError> {
		let quota = QuotaSet::from_limits(&config.limits)?;
		let backlog = Backlog::new(config.backlog_capacity)?;

		if quota.is_empty() {
			obs::warn(
				"configure",
				"No rate limits configured; every metered request will be dispatched immediately.",
			);
		}

		Ok(Self {
			shared: Arc::new(Shared {
				quota,
				state: Mutex::new(BacklogState { backlog, draining: false }),
				poll_interval: config.poll_interval,
				runtime,
				metrics: ArbiterMetrics::default(),
			}),
		})
	}

	/// Admits, queues, or rejects a request.
	///
	/// Returns [`Error::Backlog`] when the request has to wait but the backlog is full; the
	/// request and handler are dropped in that case and the handler is never invoked.
	pub fn arbitrate(
		&self,
		request: impl Request,
		handler: impl ResponseHandler,
	) -> Result<Admission> {
		self.admit(PendingEntry::new(request, handler))
	}

	/// [`Self::arbitrate`] for already boxed collaborators.
	pub fn arbitrate_boxed(
		&self,
		request: Box<dyn Request>,
		handler: Box<dyn ResponseHandler>,
	) -> Result<Admission> {
		self.admit(PendingEntry::boxed(request, handler))
	}

	/// Arbitrates a request and waits for its response.
	pub async fn send(&self, request: impl Request) -> Result<Response> {
		let (tx, rx) = oneshot::channel();

		self.arbitrate(request, move |response: Response| {
			let _ = tx.send(response);
		})?;

		rx.await.map_err(|_| Error::HandlerDropped)
	}

	/// Adds a rate limit; fails once two limits are configured.
	pub fn add_limit(&self, capacity: u32, period: Duration) -> Result<()> {
		self.shared.quota.add_limit(RateLimit::new(capacity, period))?;

		Ok(())
	}

	/// Number of requests waiting in the backlog.
	pub fn backlog_size(&self) -> usize {
		self.shared.state.lock().backlog.len()
	}

	/// Maximum number of requests the backlog accepts.
	pub fn backlog_capacity(&self) -> usize {
		self.shared.state.lock().backlog.capacity()
	}

	/// Read-only check that every quota window has room right now.
	pub fn has_headroom(&self) -> bool {
		self.shared.quota.has_headroom()
	}

	/// Whether a drain loop is currently alive.
	pub fn is_draining(&self) -> bool {
		self.shared.state.lock().draining
	}

	/// Number of configured rate limits.
	pub fn limit_count(&self) -> usize {
		self.shared.quota.len()
	}

	/// Snapshots every quota window.
	pub fn occupancy(&self) -> Vec<WindowSnapshot> {
		self.shared.quota.occupancy()
	}

	/// Local admission and dispatch counters.
	pub fn metrics(&self) -> &ArbiterMetrics {
		&self.shared.metrics
	}

	fn admit(&self, entry: PendingEntry) -> Result<Admission> {
		let span = ArbiterSpan::new("arbitrate", entry.endpoint()).entered();

		if !entry.is_rate_limited() {
			span.record_outcome(AdmissionOutcome::Bypassed.as_str());
			self.shared.metrics.record_bypassed();
			obs::record_admission(AdmissionOutcome::Bypassed);
			self.spawn_dispatch(entry);

			return Ok(Admission::Bypassed);
		}

		let mut state = self.shared.state.lock();

		// Older backlogged requests always go first, even if a slot just opened.
		if state.backlog.is_empty() && self.shared.quota.try_reserve_all() {
			drop(state);
			span.record_outcome(AdmissionOutcome::Dispatched.as_str());
			self.shared.metrics.record_dispatched();
			obs::record_admission(AdmissionOutcome::Dispatched);
			self.spawn_dispatch(entry);

			return Ok(Admission::Dispatched);
		}

		let position = match state.backlog.enqueue(entry) {
			Ok(position) => position,
			Err(e) => {
				drop(state);
				span.record_outcome(AdmissionOutcome::Rejected.as_str());
				self.shared.metrics.record_rejected();
				obs::record_admission(AdmissionOutcome::Rejected);

				return Err(e.into());
			},
		};
		let start_drain = !state.draining;

		state.draining = true;
		obs::record_backlog_depth(state.backlog.len());
		drop(state);
		span.record_outcome(AdmissionOutcome::Queued.as_str());
		self.shared.metrics.record_queued();
		obs::record_admission(AdmissionOutcome::Queued);

		if start_drain {
			drain::spawn(self.shared.clone());
		}

		Ok(Admission::Queued { position })
	}

	fn spawn_dispatch(&self, entry: PendingEntry) {
		let task_shared = self.shared.clone();
		let task = self.shared.runtime.spawn(async move {
			dispatch::dispatch(entry, DispatchPath::Immediate, &task_shared.metrics).await
		});
		let shared = self.shared.clone();

		self.shared.runtime.spawn(async move {
			dispatch::supervise(task, DispatchPath::Immediate, &shared.metrics).await
		});
	}
}
impl Debug for AdmissionController {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let state = self.shared.state.lock();

		f.debug_struct("AdmissionController")
			.field("limits", &self.shared.quota.occupancy())
			.field("backlog", &state.backlog.len())
			.field("draining", &state.draining)
			.field("poll_interval", &self.shared.poll_interval)
			.finish()
	}
}

pub(crate) struct Shared {
	quota: QuotaSet,
	state: Mutex<BacklogState>,
	poll_interval: Duration,
	runtime: Handle,
	metrics: ArbiterMetrics,
}

struct BacklogState {
	backlog: Backlog,
	draining: bool,
}
