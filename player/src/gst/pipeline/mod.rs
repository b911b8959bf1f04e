//! GStreamer pipeline management.

mod bus;
mod construction;
mod lifecycle;
mod linking;

use gstreamer as gst;
use gstreamer::prelude::ElementExt;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("GStreamer error: {0}")]
    GStreamer(#[from] gst::glib::Error),

    #[error("GStreamer boolean error: {0}")]
    BoolError(#[from] gst::glib::BoolError),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Failed to create element: {0}")]
    ElementCreation(String),

    #[error("Invalid property value for {element}.{property}: {reason}")]
    InvalidProperty {
        element: String,
        property: String,
        reason: String,
    },

    #[error("Failed to link branch '{branch}': {detail}")]
    Link { branch: String, detail: String },

    #[error("Pipeline state change failed: {0}")]
    StateChange(String),
}

/// Terminal condition reached by the bus monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// End of stream was reached
    Finished,
    /// An element reported a runtime error
    Failed,
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finished => write!(f, "finished"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Owns the assembled pipeline from construction to teardown.
#[derive(Debug)]
pub struct Player {
    pipeline: gst::Pipeline,
    elements: HashMap<String, gst::Element>,
    /// Set once teardown has run; the drop backstop checks it
    torn_down: bool,
}

impl Player {
    /// Drive the pipeline from idle to running, monitor the bus until a
    /// terminal condition, then tear down.
    ///
    /// Teardown happens on every exit path, exactly once, from this
    /// single finalization point.
    pub fn run(mut self) -> Result<RunOutcome, PipelineError> {
        if let Err(e) = self.start() {
            self.shutdown();
            return Err(e);
        }
        let outcome = self.watch_bus();
        self.shutdown();
        Ok(outcome)
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        if !self.torn_down {
            debug!("Dropping pipeline without explicit teardown");
            let _ = self.pipeline.set_state(gst::State::Null);
        }
    }
}
