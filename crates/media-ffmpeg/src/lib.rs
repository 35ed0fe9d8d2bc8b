//! Thin wrappers over the `ffprobe` and `ffmpeg` command line tools.

mod error;
mod probe;
mod sample;
mod time;

pub use error::{MediaFfmpegError, Result};
pub use probe::{MediaInfo, StreamInfo, StreamKind, probe_media};
pub use sample::{FrameSampler, SampledFrame};
pub use time::Rational;
