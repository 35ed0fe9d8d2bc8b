//! UI-agnostic core of a scrubbable, trimmable video timeline control.

pub mod asset;
pub mod axis;
pub mod config;
pub mod control;
pub mod error;
pub mod gesture;
pub mod notify;
pub mod playback;
pub mod range;
pub mod thumbnails;
pub mod time;

pub use asset::{Asset, FALLBACK_TIMESCALE, FfmpegAsset, Frame, PixelFormat, SharedAsset};
pub use axis::TimeAxis;
pub use config::{ControlLayout, StripGeometry, TrimConfig};
pub use control::TrimControl;
pub use error::{Result, TrimError};
pub use gesture::{DragState, DragTarget, Gesture, GestureController};
pub use notify::{Event, TrimDelegate, dispatch};
pub use range::{MoveOutcome, RangeModel, RangeState, RejectReason, TimeLabels, TimelineGeometry};
pub use thumbnails::{Generation, ThumbnailMessage, ThumbnailPipeline, ThumbnailSet, ThumbnailSlot};
pub use time::RationalTime;
