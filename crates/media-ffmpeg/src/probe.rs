use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{MediaFfmpegError, Result};
use crate::time::Rational;

/// Stream kind discovered by probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Video,
    Audio,
    Other,
}

/// Stream metadata read from `ffprobe`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    pub index: u32,
    pub kind: StreamKind,
    pub codec_name: Option<String>,
    pub time_base: Rational,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub r_frame_rate: Option<Rational>,
    pub duration_ts: Option<i64>,
}

/// Media probe result.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    pub path: PathBuf,
    pub streams: Vec<StreamInfo>,
    pub duration_seconds: Option<f64>,
}

impl MediaInfo {
    /// Returns the first video stream.
    pub fn first_video(&self) -> Option<&StreamInfo> {
        self.streams
            .iter()
            .find(|stream| stream.kind == StreamKind::Video)
    }

    /// Exact duration of the first video stream as `(value, timescale)`.
    ///
    /// # Example
    /// ```no_run
    /// use media_ffmpeg::probe_media;
    ///
    /// let info = probe_media("sample.mp4").expect("probe should succeed");
    /// let (value, timescale) = info.video_duration().expect("stream duration");
    /// assert!(value > 0 && timescale > 0);
    /// ```
    pub fn video_duration(&self) -> Option<(i64, i32)> {
        let video = self.first_video()?;
        let ticks = video.duration_ts.filter(|ticks| *ticks > 0)?;
        video.time_base.ticks_to_rational_time(ticks)
    }

    /// Pixel size of the first video stream.
    pub fn video_dimensions(&self) -> Result<(u32, u32)> {
        let video = self
            .first_video()
            .ok_or_else(|| MediaFfmpegError::NoVideoStream(self.path.clone()))?;
        match (video.width, video.height) {
            (Some(width), Some(height)) if width > 0 && height > 0 => Ok((width, height)),
            _ => Err(MediaFfmpegError::NoVideoSize(self.path.clone())),
        }
    }
}

/// Probes a media file via `ffprobe`.
///
/// # Example
/// ```no_run
/// use media_ffmpeg::probe_media;
///
/// let info = probe_media("sample.mp4").expect("probe should succeed");
/// assert!(!info.streams.is_empty());
/// ```
pub fn probe_media(path: impl AsRef<Path>) -> Result<MediaInfo> {
    let path = path.as_ref();

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "stream=index,codec_type,codec_name,time_base,width,height,r_frame_rate,duration_ts",
            "-of",
            "compact=p=0:nk=0",
        ])
        .arg(path)
        .output()
        .map_err(|source| MediaFfmpegError::Spawn {
            tool: "ffprobe",
            source,
        })?;

    if !output.status.success() {
        return Err(MediaFfmpegError::ToolFailed {
            tool: "ffprobe",
            target: path.display().to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let stdout = String::from_utf8(output.stdout)?;
    let streams = stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_stream_line)
        .collect::<Result<Vec<_>>>()?;

    if streams.is_empty() {
        return Err(MediaFfmpegError::ProbeField {
            field: "streams",
            raw: "no streams found".to_string(),
        });
    }

    let duration_seconds = probe_duration_seconds(path)?;
    Ok(MediaInfo {
        path: path.to_path_buf(),
        streams,
        duration_seconds,
    })
}

fn parse_stream_line(line: &str) -> Result<StreamInfo> {
    let mut map = HashMap::<&str, &str>::new();
    for field in line.split('|') {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| MediaFfmpegError::ProbeField {
                field: "stream field",
                raw: field.to_string(),
            })?;
        map.insert(key.trim(), value.trim().trim_matches('"'));
    }

    let codec_type = map
        .get("codec_type")
        .copied()
        .ok_or_else(|| MediaFfmpegError::ProbeField {
            field: "codec_type",
            raw: line.to_string(),
        })?;
    let kind = match codec_type {
        "video" => StreamKind::Video,
        "audio" => StreamKind::Audio,
        _ => StreamKind::Other,
    };

    let index = parse_optional(map.get("index").copied(), "stream index", str::parse::<u32>)?
        .ok_or_else(|| MediaFfmpegError::ProbeField {
            field: "stream index",
            raw: line.to_string(),
        })?;
    let time_base = parse_optional_rational(map.get("time_base").copied(), "time_base")?
        .ok_or_else(|| MediaFfmpegError::ProbeField {
            field: "time_base",
            raw: line.to_string(),
        })?;

    Ok(StreamInfo {
        index,
        kind,
        codec_name: map.get("codec_name").map(|value| value.to_string()),
        time_base,
        width: parse_optional(map.get("width").copied(), "width", str::parse::<u32>)?,
        height: parse_optional(map.get("height").copied(), "height", str::parse::<u32>)?,
        r_frame_rate: parse_optional_rational(map.get("r_frame_rate").copied(), "r_frame_rate")?,
        duration_ts: parse_optional(
            map.get("duration_ts").copied(),
            "duration_ts",
            str::parse::<i64>,
        )?,
    })
}

fn probe_duration_seconds(path: &Path) -> Result<Option<f64>> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=nokey=1:noprint_wrappers=1",
        ])
        .arg(path)
        .output()
        .map_err(|source| MediaFfmpegError::Spawn {
            tool: "ffprobe",
            source,
        })?;

    if !output.status.success() {
        return Err(MediaFfmpegError::ToolFailed {
            tool: "ffprobe",
            target: path.display().to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let stdout = String::from_utf8(output.stdout)?;
    let value = stdout.trim();
    if value.is_empty() || value == "N/A" {
        return Ok(None);
    }
    let duration = value.parse::<f64>().map_err(|_| MediaFfmpegError::ProbeField {
        field: "format duration seconds",
        raw: value.to_string(),
    })?;
    Ok(Some(duration))
}

fn parse_optional_rational(value: Option<&str>, field: &'static str) -> Result<Option<Rational>> {
    let Some(raw) = value else {
        return Ok(None);
    };
    if raw.is_empty() || raw == "N/A" || raw == "0/0" {
        return Ok(None);
    }

    Rational::parse(raw)
        .map(Some)
        .map_err(|_| MediaFfmpegError::ProbeField {
            field,
            raw: raw.to_string(),
        })
}

fn parse_optional<T, F>(value: Option<&str>, field: &'static str, parse: F) -> Result<Option<T>>
where
    F: Fn(&str) -> std::result::Result<T, std::num::ParseIntError>,
{
    let Some(raw) = value else {
        return Ok(None);
    };
    if raw.is_empty() || raw == "N/A" {
        return Ok(None);
    }

    parse(raw).map(Some).map_err(|_| MediaFfmpegError::ProbeField {
        field,
        raw: raw.to_string(),
    })
}
