use std::fmt::Debug;
use std::path::Path;
use std::sync::Arc;

use media_ffmpeg::{FrameSampler, MediaFfmpegError};
use tracing::debug;

use crate::error::{Result, TrimError};
use crate::time::RationalTime;

/// Timescale used when the container only reports a duration in seconds.
pub const FALLBACK_TIMESCALE: i32 = 600;

/// Pixel layout of a sampled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgba8,
}

/// One still image handed to the strip or to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub bytes: Arc<[u8]>,
}

impl Frame {
    /// Wraps tightly packed RGBA bytes, rejecting mismatched lengths.
    pub fn from_rgba(width: u32, height: u32, bytes: impl Into<Arc<[u8]>>) -> Option<Self> {
        let bytes = bytes.into();
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if bytes.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            format: PixelFormat::Rgba8,
            bytes,
        })
    }
}

/// Video source the control reads its duration and stills from.
///
/// Implementations are called from the thumbnail worker thread and must not
/// mutate shared state.
pub trait Asset: Debug + Send + Sync {
    fn duration(&self) -> RationalTime;

    /// Samples one still at `at`.
    fn sample_image(&self, at: RationalTime) -> Result<Frame>;
}

/// Shared handle the host and the thumbnail worker both hold.
pub type SharedAsset = Arc<dyn Asset>;

/// Asset backed by the ffmpeg command line tools.
///
/// The clip is probed once on open; every still afterwards is a single
/// `ffmpeg` run at the size fixed then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfmpegAsset {
    duration: RationalTime,
    sampler: FrameSampler,
}

impl FfmpegAsset {
    /// Probes `path` for its duration and frame size.
    ///
    /// # Example
    /// ```no_run
    /// use trimline::FfmpegAsset;
    ///
    /// let asset = FfmpegAsset::open("sample.mp4").expect("probe should succeed");
    /// assert!(asset.duration_seconds() > 0.0);
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let info = media_ffmpeg::probe_media(path)?;
        let duration = match info.video_duration() {
            Some((value, timescale)) => RationalTime::new(value, timescale)?,
            None => {
                let seconds = info
                    .duration_seconds
                    .ok_or_else(|| TrimError::MissingDuration(path.to_path_buf()))?;
                RationalTime::from_seconds(seconds, FALLBACK_TIMESCALE)
            }
        };
        let sampler = FrameSampler::from_probe(&info)?;
        let (width, height) = sampler.output_size();
        debug!(
            path = %path.display(),
            value = duration.value,
            timescale = duration.timescale,
            width,
            height,
            "asset probed"
        );

        Ok(Self { duration, sampler })
    }

    /// Downscales sampled stills to at most `height` pixels tall.
    pub fn with_sample_height(mut self, height: u32) -> Self {
        self.sampler = self.sampler.with_max_height(Some(height));
        self
    }

    pub fn path(&self) -> &Path {
        self.sampler.path()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration.seconds()
    }
}

impl Asset for FfmpegAsset {
    fn duration(&self) -> RationalTime {
        self.duration
    }

    fn sample_image(&self, at: RationalTime) -> Result<Frame> {
        let seconds = at.seconds();
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(TrimError::SampleOutOfRange { seconds });
        }
        let sampled = self.sampler.sample_at_seconds(seconds)?;
        let expected = sampled.width as usize * sampled.height as usize * 4;
        let actual = sampled.rgba.len();
        Frame::from_rgba(sampled.width, sampled.height, sampled.rgba).ok_or(TrimError::Media(
            MediaFfmpegError::FrameSizeMismatch { expected, actual },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;

    #[test]
    fn from_rgba_accepts_tightly_packed_bytes() {
        let frame = Frame::from_rgba(2, 1, vec![0_u8; 8]).expect("valid frame");

        assert_eq!(frame.width, 2);
        assert_eq!(frame.bytes.len(), 8);
    }

    #[test]
    fn from_rgba_rejects_wrong_length() {
        assert!(Frame::from_rgba(2, 2, vec![0_u8; 15]).is_none());
    }
}
