use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrimError};
use crate::time::RationalTime;

pub const DEFAULT_FRAME_COUNT: usize = 20;
pub const DEFAULT_MIN_REMAINING_WIDTH: f64 = 50.0;
pub const DEFAULT_HANDLE_WIDTH: f64 = 4.0;
pub const DEFAULT_PLAYHEAD_WIDTH: f64 = 6.0;
pub const DEFAULT_SIDE_MARGIN: f64 = 14.0;

/// Runtime-tunable behaviour of a trim control.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
///
/// # Example
/// ```
/// use trimline::TrimConfig;
///
/// let config = TrimConfig::from_json_str(r#"{ "frame_count": 12 }"#).expect("valid");
/// assert_eq!(config.frame_count, 12);
/// assert_eq!(config.min_remaining_width, 50.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimConfig {
    pub frame_count: usize,
    pub min_remaining_width: f64,
    /// Longest selectable span; zero means unbounded.
    pub max_duration: RationalTime,
    pub handle_width: f64,
    pub playhead_width: f64,
    pub show_time_labels: bool,
    pub can_trim: bool,
    pub layout: ControlLayout,
}

/// Margins between the control's bounds and the trim frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlLayout {
    pub leading_margin: f64,
    pub trailing_margin: f64,
}

/// Strip placement derived from the control width and the configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StripGeometry {
    /// Control-space x of the strip's left edge.
    pub origin_x: f64,
    /// Drawable strip width, zero until the control is laid out.
    pub width: f64,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            frame_count: DEFAULT_FRAME_COUNT,
            min_remaining_width: DEFAULT_MIN_REMAINING_WIDTH,
            max_duration: RationalTime::ZERO,
            handle_width: DEFAULT_HANDLE_WIDTH,
            playhead_width: DEFAULT_PLAYHEAD_WIDTH,
            show_time_labels: true,
            can_trim: true,
            layout: ControlLayout::default(),
        }
    }
}

impl Default for ControlLayout {
    fn default() -> Self {
        Self {
            leading_margin: DEFAULT_SIDE_MARGIN,
            trailing_margin: DEFAULT_SIDE_MARGIN,
        }
    }
}

impl TrimConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|source| TrimError::ConfigSerialization { path: None, source })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| TrimError::ConfigIo {
            context: "failed to read trim config",
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&raw).map_err(|source| TrimError::ConfigSerialization {
                path: Some(path.to_path_buf()),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.frame_count == 0 {
            return Err(invalid("frame_count must be positive"));
        }
        for (name, value) in [
            ("min_remaining_width", self.min_remaining_width),
            ("handle_width", self.handle_width),
            ("playhead_width", self.playhead_width),
            ("layout.leading_margin", self.layout.leading_margin),
            ("layout.trailing_margin", self.layout.trailing_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(&format!("{name} must be a non-negative number")));
            }
        }
        if self.max_duration.timescale <= 0 || self.max_duration.value < 0 {
            return Err(invalid("max_duration must be a non-negative rational time"));
        }
        Ok(())
    }

    /// Places the strip inside a control of `control_width`.
    ///
    /// Each side loses its margin plus one handle width; the result never
    /// goes negative.
    pub fn strip_geometry(&self, control_width: f64) -> StripGeometry {
        let origin_x = self.layout.leading_margin + self.handle_width;
        let trailing = self.layout.trailing_margin + self.handle_width;
        StripGeometry {
            origin_x,
            width: (control_width - origin_x - trailing).max(0.0),
        }
    }
}

fn invalid(reason: &str) -> TrimError {
    TrimError::InvalidConfig {
        reason: reason.to_string(),
    }
}
