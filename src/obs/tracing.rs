// self
use crate::_prelude::*;

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedDispatch<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedDispatch<F> = F;

/// A span builder used around admission decisions and dispatches.
#[derive(Clone, Debug)]
pub struct ArbiterSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl ArbiterSpan {
	/// Creates a new span tagged with the provided stage + endpoint label.
	pub fn new(stage: &'static str, endpoint: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"request_arbiter.admission",
				stage,
				endpoint,
				outcome = tracing::field::Empty
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (stage, endpoint);

			Self {}
		}
	}

	/// Records how the admission or dispatch ended on the span.
	pub fn record_outcome(&self, outcome: &'static str) {
		#[cfg(feature = "tracing")]
		{
			self.span.record("outcome", outcome);
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = outcome;
		}
	}

	/// Enters the span for synchronous sections.
	pub fn entered(self) -> ArbiterSpanGuard {
		#[cfg(feature = "tracing")]
		{
			ArbiterSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			ArbiterSpanGuard {}
		}
	}

	/// Instruments a dispatch future without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedDispatch<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// RAII guard returned by [`ArbiterSpan::entered`].
pub struct ArbiterSpanGuard {
	#[cfg(feature = "tracing")]
	guard: tracing::span::EnteredSpan,
}
impl ArbiterSpanGuard {
	/// Records the outcome on the entered span.
	pub fn record_outcome(&self, outcome: &'static str) {
		#[cfg(feature = "tracing")]
		{
			self.guard.record("outcome", outcome);
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = outcome;
		}
	}
}
impl Debug for ArbiterSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ArbiterSpanGuard(..)")
	}
}

/// Emits a warning event (when enabled) for conditions that are legal but likely mistakes.
pub fn warn(stage: &'static str, message: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(stage, "{message}");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (stage, message);
	}
}

/// Emits a debug event (when enabled) for drain-loop lifecycle changes.
pub fn debug(stage: &'static str, message: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(stage, "{message}");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (stage, message);
	}
}
