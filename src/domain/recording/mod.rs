//! Recording domain module

mod audio_format;
mod recording_reference;

pub use audio_format::{human_readable_size, AudioFormat};
pub use recording_reference::RecordingReference;
