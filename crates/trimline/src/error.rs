use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Result type used by the trimline crate.
pub type Result<T> = std::result::Result<T, TrimError>;

/// Errors produced while building or feeding a trim control.
///
/// Interactive operations (gestures, time setters) never fail; these errors
/// only surface from construction, configuration and asset access.
#[derive(Debug)]
pub enum TrimError {
    InvalidRationalTime {
        value: i64,
        timescale: i32,
    },
    InvalidConfig {
        reason: String,
    },
    ConfigIo {
        context: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    ConfigSerialization {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
    MissingDuration(PathBuf),
    AssetNotLoaded,
    SampleOutOfRange {
        seconds: f64,
    },
    Media(media_ffmpeg::MediaFfmpegError),
}

impl Display for TrimError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRationalTime { value, timescale } => {
                write!(f, "invalid rational time {value}/{timescale}")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid trim config: {reason}"),
            Self::ConfigIo {
                context,
                path,
                source,
            } => write!(f, "{context}: {} ({source})", path.display()),
            Self::ConfigSerialization { path, source } => match path {
                Some(path) => write!(
                    f,
                    "trim config deserialization failed at {} ({source})",
                    path.display()
                ),
                None => write!(f, "trim config deserialization failed ({source})"),
            },
            Self::MissingDuration(path) => {
                write!(f, "media duration is missing: {}", path.display())
            }
            Self::AssetNotLoaded => write!(f, "asset is not loaded"),
            Self::SampleOutOfRange { seconds } => {
                write!(f, "sample time out of range: {seconds}s")
            }
            Self::Media(err) => write!(f, "media backend error: {err}"),
        }
    }
}

impl std::error::Error for TrimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigIo { source, .. } => Some(source),
            Self::ConfigSerialization { source, .. } => Some(source),
            Self::Media(err) => Some(err),
            _ => None,
        }
    }
}

impl From<media_ffmpeg::MediaFfmpegError> for TrimError {
    fn from(value: media_ffmpeg::MediaFfmpegError) -> Self {
        Self::Media(value)
    }
}
