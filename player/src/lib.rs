//! udplay - UDP H.264 media player.
//!
//! Assembles a fixed GStreamer pipeline (H.264 video over UDP, with an
//! optional parallel audio branch) and monitors its bus until
//! end-of-stream or error.

pub mod config;
pub mod gst;
pub mod topology;
