use super::{Player, RunOutcome};
use gstreamer as gst;
use gstreamer::prelude::*;
use tracing::{debug, error, info, warn};

impl Player {
    /// Block on the bus until a terminal message arrives.
    ///
    /// Only state-changed, error and EOS messages are requested; the
    /// wait is the loop's only suspension point and has no timeout.
    pub(crate) fn watch_bus(&self) -> RunOutcome {
        let Some(bus) = self.pipeline.bus() else {
            error!("Pipeline does not have a bus - cannot monitor");
            return RunOutcome::Failed;
        };

        loop {
            let Some(msg) = bus.timed_pop_filtered(
                gst::ClockTime::NONE,
                &[
                    gst::MessageType::StateChanged,
                    gst::MessageType::Error,
                    gst::MessageType::Eos,
                ],
            ) else {
                // A flushing bus can hand back nothing; keep waiting
                continue;
            };

            use gst::MessageView;
            match msg.view() {
                MessageView::Error(err) => {
                    let source = err
                        .src()
                        .map(|s| s.name().to_string())
                        .unwrap_or_else(|| "<unknown>".to_string());
                    let debug_info = err
                        .debug()
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "none".to_string());
                    error!("Error received from element {}: {}", source, err.error());
                    error!("Debugging information: {}", debug_info);
                    return RunOutcome::Failed;
                }
                MessageView::Eos(_) => {
                    info!("End-of-stream reached");
                    return RunOutcome::Finished;
                }
                MessageView::StateChanged(state_changed) => {
                    // Only state changes of the pipeline itself are reported
                    let from_pipeline = msg
                        .src()
                        .is_some_and(|s| s == self.pipeline.upcast_ref::<gst::Object>());
                    if from_pipeline {
                        info!(
                            "Pipeline state changed from {:?} to {:?} (pending: {:?})",
                            state_changed.old(),
                            state_changed.current(),
                            state_changed.pending()
                        );
                    } else {
                        debug!(
                            "Element '{}' state changed from {:?} to {:?}",
                            msg.src().map(|s| s.name().to_string()).unwrap_or_default(),
                            state_changed.old(),
                            state_changed.current()
                        );
                    }
                }
                _ => {
                    // Unreachable given the filter above
                    warn!("Unexpected message received: {:?}", msg.type_());
                }
            }
        }
    }
}
