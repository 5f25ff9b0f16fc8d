// self
use crate::{_prelude::*, obs::Stage};

/// Future returned by [`StageSpan::instrument`]: wrapped in the stage span with `tracing` on.
#[cfg(feature = "tracing")]
pub type InstrumentedStage<F> = tracing::instrument::Instrumented<F>;
/// Without `tracing` the step's future is returned as is.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedStage<F> = F;

/// `destination_proxy.stage` span for one step of a call.
///
/// `stage` names the step, `subject` what it acts on: the service instance (or client id for an
/// explicit binding) in the token step, the destination name in the lookup and the proxied call.
#[derive(Clone, Debug)]
pub struct StageSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl StageSpan {
	/// Opens the span for `stage` acting on `subject`.
	pub fn new(stage: Stage, subject: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"destination_proxy.stage",
				stage = stage.as_str(),
				subject = subject
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (stage, subject);

			Self {}
		}
	}

	/// Runs `fut` inside the span; no guard is held across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedStage<Fut>
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

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_passes_output_through() {
		let span = StageSpan::new(Stage::Destination, "orders-api");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
