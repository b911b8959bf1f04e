//! Shared types for the udplay UDP media player.
//!
//! This crate contains the domain model for pipeline topologies:
//! element descriptions, branch definitions and pipeline state.
//! It carries no GStreamer dependency; the player crate maps these
//! types onto the engine.

/// Default UDP port for the video stream.
pub const DEFAULT_VIDEO_PORT: u16 = 13131;

/// Default UDP port for the audio stream.
pub const DEFAULT_AUDIO_PORT: u16 = 12121;

/// Default output video width.
pub const DEFAULT_WIDTH: i32 = 1920;

/// Default output video height.
pub const DEFAULT_HEIGHT: i32 = 920;

/// Default audio sample format.
pub const DEFAULT_AUDIO_FORMAT: &str = "S16LE";

/// Default audio channel count.
pub const DEFAULT_AUDIO_CHANNELS: i32 = 2;

/// Default audio sample rate in Hz.
pub const DEFAULT_AUDIO_RATE: i32 = 44100;

pub mod branch;
pub mod element;
pub mod state;

// Re-export commonly used types
pub use branch::BranchSpec;
pub use element::{CapsSpec, CapsValue, ElementId, ElementSpec, PropertyValue};
pub use state::PipelineState;
