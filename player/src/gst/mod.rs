//! GStreamer integration.

pub mod pipeline;
