use super::{PipelineError, Player};
use gstreamer as gst;
use gstreamer::prelude::*;
use tracing::{debug, error, info, warn};
use udplay_types::PipelineState;

impl Player {
    /// Start the pipeline (set to PLAYING state).
    pub fn start(&mut self) -> Result<(), PipelineError> {
        info!("Starting pipeline ({} element(s))", self.elements.len());

        let state_change = self.pipeline.set_state(gst::State::Playing).map_err(|e| {
            error!("Unable to set the pipeline to the playing state: {}", e);
            PipelineError::StateChange(format!("Failed to reach PLAYING: {}", e))
        })?;

        match state_change {
            gst::StateChangeSuccess::Success => info!("Pipeline set to PLAYING"),
            gst::StateChangeSuccess::Async => {
                info!("Pipeline set to PLAYING (state change in progress)")
            }
            gst::StateChangeSuccess::NoPreroll => {
                info!("Pipeline set to PLAYING (live source, no preroll)")
            }
        }
        Ok(())
    }

    /// Tear the pipeline down (state to NULL).
    ///
    /// Runs exactly once; later calls and the drop backstop are no-ops.
    pub(crate) fn shutdown(&mut self) {
        if self.torn_down {
            return;
        }
        debug!("Tearing down pipeline");
        if let Err(e) = self.pipeline.set_state(gst::State::Null) {
            warn!("Failed to reach NULL during teardown: {}", e);
        }
        self.torn_down = true;
    }

    /// Current pipeline state, mapped to the shared state enum.
    pub fn state(&self) -> PipelineState {
        let (_, current, _) = self.pipeline.state(gst::ClockTime::from_mseconds(500));
        match current {
            gst::State::Ready => PipelineState::Ready,
            gst::State::Paused => PipelineState::Paused,
            gst::State::Playing => PipelineState::Playing,
            _ => PipelineState::Null,
        }
    }
}
