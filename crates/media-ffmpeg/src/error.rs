use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, MediaFfmpegError>;

/// Failures while reading a clip's layout or pulling single stills out of it.
#[derive(Debug)]
pub enum MediaFfmpegError {
    /// A stream time base with a non-positive denominator.
    InvalidTimeBase { num: i32, den: i32 },
    /// Still requested at a negative or non-finite position.
    InvalidSampleTime(f64),
    NoVideoStream(PathBuf),
    /// The video stream reported no usable width or height.
    NoVideoSize(PathBuf),
    /// ffmpeg exited cleanly but wrote no picture, usually past the last frame.
    NoFrameAt { path: PathBuf, seconds: f64 },
    /// Raw RGBA output whose length does not match the requested size.
    FrameSizeMismatch { expected: usize, actual: usize },
    /// The tool could not be started at all.
    Spawn {
        tool: &'static str,
        source: std::io::Error,
    },
    ToolFailed {
        tool: &'static str,
        target: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    NonUtf8Output(std::string::FromUtf8Error),
    /// A field in ffprobe's report that could not be read.
    ProbeField { field: &'static str, raw: String },
}

impl Display for MediaFfmpegError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimeBase { num, den } => write!(f, "unusable time base {num}/{den}"),
            Self::InvalidSampleTime(seconds) => {
                write!(f, "cannot sample a still at {seconds}s")
            }
            Self::NoVideoStream(path) => write!(f, "{} has no video stream", path.display()),
            Self::NoVideoSize(path) => {
                write!(f, "{} reports no video frame size", path.display())
            }
            Self::NoFrameAt { path, seconds } => {
                write!(f, "{} has no picture at {seconds}s", path.display())
            }
            Self::FrameSizeMismatch { expected, actual } => {
                write!(f, "still is {actual} bytes, expected {expected}")
            }
            Self::Spawn { tool, source } => write!(f, "could not start {tool}: {source}"),
            Self::ToolFailed {
                tool,
                target,
                status,
                stderr,
            } => write!(f, "{tool} {target} exited with {status}: {}", stderr.trim()),
            Self::NonUtf8Output(err) => write!(f, "ffprobe output is not utf-8: {err}"),
            Self::ProbeField { field, raw } => {
                write!(f, "unreadable ffprobe field {field}: {raw:?}")
            }
        }
    }
}

impl std::error::Error for MediaFfmpegError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::NonUtf8Output(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::string::FromUtf8Error> for MediaFfmpegError {
    fn from(value: std::string::FromUtf8Error) -> Self {
        Self::NonUtf8Output(value)
    }
}
