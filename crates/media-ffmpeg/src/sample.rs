use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{MediaFfmpegError, Result};
use crate::probe::MediaInfo;

/// One still picture in tightly packed RGBA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampledFrame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Pulls single stills out of one clip.
///
/// The output size is fixed when the sampler is built, so each still costs
/// exactly one `ffmpeg` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSampler {
    path: PathBuf,
    source: (u32, u32),
    width: u32,
    height: u32,
}

impl FrameSampler {
    /// Builds a full-size sampler from an existing probe of the clip.
    ///
    /// # Example
    /// ```no_run
    /// use media_ffmpeg::{FrameSampler, probe_media};
    ///
    /// let info = probe_media("sample.mp4").expect("probe should succeed");
    /// let sampler = FrameSampler::from_probe(&info)
    ///     .expect("video stream")
    ///     .with_max_height(Some(48));
    /// let frame = sampler.sample_at_seconds(0.5).expect("sample should succeed");
    /// assert_eq!(frame.height, 48);
    /// ```
    pub fn from_probe(info: &MediaInfo) -> Result<Self> {
        let (width, height) = info.video_dimensions()?;
        Ok(Self {
            path: info.path.clone(),
            source: (width, height),
            width,
            height,
        })
    }

    /// Downscales stills to at most `max_height` pixels tall; `None` restores
    /// the source size. Never upscales.
    pub fn with_max_height(mut self, max_height: Option<u32>) -> Self {
        let (width, height) = scaled_dimensions(self.source.0, self.source.1, max_height);
        self.width = width;
        self.height = height;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Output size of every still as `(width, height)`.
    pub fn output_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Samples the frame shown at `at_seconds`.
    ///
    /// Seeking happens before decoding (`-ss` ahead of `-i`), which lands on
    /// the nearest decodable frame rather than scanning the whole stream.
    pub fn sample_at_seconds(&self, at_seconds: f64) -> Result<SampledFrame> {
        if !at_seconds.is_finite() || at_seconds < 0.0 {
            return Err(MediaFfmpegError::InvalidSampleTime(at_seconds));
        }

        let rgba = decode_rgba_at(&self.path, at_seconds, self.width, self.height)?;
        if rgba.is_empty() {
            return Err(MediaFfmpegError::NoFrameAt {
                path: self.path.clone(),
                seconds: at_seconds,
            });
        }
        let expected = self.width as usize * self.height as usize * 4;
        if rgba.len() != expected {
            return Err(MediaFfmpegError::FrameSizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }

        Ok(SampledFrame {
            width: self.width,
            height: self.height,
            rgba,
        })
    }
}

fn scaled_dimensions(width: u32, height: u32, max_height: Option<u32>) -> (u32, u32) {
    match max_height {
        Some(max_height) if max_height > 0 && max_height < height => {
            let scaled = u64::from(width) * u64::from(max_height) / u64::from(height);
            let even = (scaled as u32 & !1).max(2);
            (even, max_height)
        }
        _ => (width, height),
    }
}

fn decode_rgba_at(path: &Path, at_seconds: f64, width: u32, height: u32) -> Result<Vec<u8>> {
    let filter = format!("scale={width}:{height},format=rgba");
    let output = Command::new("ffmpeg")
        .arg("-hide_banner")
        .arg("-v")
        .arg("error")
        .arg("-ss")
        .arg(format!("{at_seconds:.6}"))
        .arg("-i")
        .arg(path)
        .arg("-vf")
        .arg(&filter)
        .arg("-frames:v")
        .arg("1")
        .arg("-f")
        .arg("rawvideo")
        .arg("-pix_fmt")
        .arg("rgba")
        .arg("-")
        .output()
        .map_err(|source| MediaFfmpegError::Spawn {
            tool: "ffmpeg",
            source,
        })?;

    if !output.status.success() {
        return Err(MediaFfmpegError::ToolFailed {
            tool: "ffmpeg",
            target: format!("{} at {at_seconds}s", path.display()),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(output.stdout)
}
