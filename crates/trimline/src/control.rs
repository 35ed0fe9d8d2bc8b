use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::asset::{Frame, SharedAsset};
use crate::config::{StripGeometry, TrimConfig};
use crate::error::{Result, TrimError};
use crate::gesture::{Gesture, GestureController};
use crate::notify::Event;
use crate::range::{RangeModel, TimeLabels};
use crate::thumbnails::{ThumbnailPipeline, ThumbnailSet};
use crate::time::RationalTime;

/// UI-agnostic trim control: frame strip, trim handles and playhead.
///
/// The host feeds layout width, pointer gestures and the player clock in,
/// and reacts to the returned [`Event`]s. Thumbnails arrive asynchronously
/// and are published by [`TrimControl::poll_thumbnails`].
#[derive(Debug)]
pub struct TrimControl {
    config: TrimConfig,
    control_width: f64,
    strip: StripGeometry,
    range: RangeModel,
    gestures: GestureController,
    pipeline: ThumbnailPipeline,
    thumbnails: ThumbnailSet,
    asset: Option<SharedAsset>,
}

impl Default for TrimControl {
    fn default() -> Self {
        Self::from_valid_config(TrimConfig::default())
    }
}

impl TrimControl {
    /// Creates an empty control from a validated configuration.
    ///
    /// # Example
    /// ```
    /// use trimline::{TrimConfig, TrimControl};
    ///
    /// let mut control = TrimControl::new(TrimConfig::default()).expect("valid config");
    /// control.set_control_width(400.0);
    /// assert_eq!(control.strip().width, 364.0);
    /// assert!(control.start_time().is_zero());
    /// ```
    pub fn new(config: TrimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: TrimConfig) -> Self {
        Self {
            range: RangeModel::new(&config),
            gestures: GestureController::new(config.can_trim),
            config,
            control_width: 0.0,
            strip: StripGeometry::default(),
            pipeline: ThumbnailPipeline::new(),
            thumbnails: ThumbnailSet::default(),
            asset: None,
        }
    }

    pub fn config(&self) -> &TrimConfig {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// Geometry is recomputed once; a changed frame count restarts thumbnail
    /// generation. Disabling trimming mid-drag yields the events of the
    /// cancelled drag.
    pub fn set_config(&mut self, config: TrimConfig) -> Result<Vec<Event>> {
        config.validate()?;
        let frame_count_changed = config.frame_count != self.config.frame_count;
        let events = if config.can_trim != self.config.can_trim {
            self.gestures.set_can_trim(config.can_trim)
        } else {
            Vec::new()
        };

        self.config = config;
        self.range.apply_config(&self.config);
        self.recompute_derived_geometry();
        if frame_count_changed && self.asset.is_some() {
            self.restart_thumbnails();
        }
        Ok(events)
    }

    pub fn set_frame_count(&mut self, frame_count: usize) -> Result<()> {
        let config = TrimConfig {
            frame_count,
            ..self.config.clone()
        };
        self.set_config(config).map(|_| ())
    }

    pub fn can_trim(&self) -> bool {
        self.gestures.can_trim()
    }

    pub fn set_can_trim(&mut self, can_trim: bool) -> Vec<Event> {
        self.config.can_trim = can_trim;
        self.gestures.set_can_trim(can_trim)
    }

    pub fn set_show_time_labels(&mut self, show: bool) {
        self.config.show_time_labels = show;
        self.range.apply_config(&self.config);
    }

    /// Lays the control out at a new width.
    pub fn set_control_width(&mut self, width: f64) {
        self.control_width = width;
        self.recompute_derived_geometry();
    }

    /// Derives strip placement from the control width and configuration.
    pub fn recompute_derived_geometry(&mut self) {
        self.strip = self.config.strip_geometry(self.control_width);
        self.range.set_width(self.strip.width);
    }

    pub fn control_width(&self) -> f64 {
        self.control_width
    }

    pub fn strip(&self) -> StripGeometry {
        self.strip
    }

    pub fn range(&self) -> &RangeModel {
        &self.range
    }

    pub fn thumbnails(&self) -> &ThumbnailSet {
        &self.thumbnails
    }

    pub fn asset(&self) -> Option<&SharedAsset> {
        self.asset.as_ref()
    }

    /// Installs an asset, resetting the selection to the whole clip.
    ///
    /// Any thumbnail run still in flight for the previous asset is abandoned.
    pub fn set_asset(&mut self, asset: Option<SharedAsset>) {
        let duration = asset.as_ref().map(|asset| asset.duration());
        self.asset = asset;
        self.range.reset_for_duration(duration);
        info!(
            has_asset = self.asset.is_some(),
            duration_seconds = duration.map(RationalTime::seconds).unwrap_or(0.0),
            "asset installed"
        );
        self.restart_thumbnails();
    }

    /// Shows caller-provided stills instead of an asset; `None` clears the strip.
    ///
    /// Without an asset every time accessor reports zero.
    pub fn set_images(&mut self, images: Option<Vec<Frame>>) {
        self.asset = None;
        self.pipeline.invalidate();
        self.range.reset_for_duration(None);
        self.thumbnails = images.map(ThumbnailSet::from_images).unwrap_or_default();
        info!(image_count = self.thumbnails.len(), "images installed");
    }

    /// Images currently shown in the strip.
    pub fn images(&self) -> Vec<Frame> {
        self.thumbnails.images()
    }

    /// Whether the strip and its dimming masks should be drawn.
    pub fn is_strip_visible(&self) -> bool {
        match &self.asset {
            Some(asset) => !asset.duration().is_zero(),
            None => !self.thumbnails.is_empty(),
        }
    }

    /// Applies a gesture given in control coordinates.
    pub fn handle(&mut self, gesture: Gesture) -> Vec<Event> {
        let gesture = gesture.offset(-self.strip.origin_x);
        self.gestures.handle(&mut self.range, gesture)
    }

    pub fn is_dragging(&self) -> bool {
        self.gestures.is_dragging()
    }

    pub fn start_time(&self) -> RationalTime {
        self.range.start_time()
    }

    pub fn set_start_time(&mut self, time: RationalTime) {
        self.range.set_start_time(time);
    }

    pub fn end_time(&self) -> RationalTime {
        self.range.end_time()
    }

    pub fn set_end_time(&mut self, time: RationalTime) {
        self.range.set_end_time(time);
    }

    pub fn duration_time(&self) -> RationalTime {
        self.range.duration_time()
    }

    pub fn set_duration_time(&mut self, time: RationalTime) {
        self.range.set_duration_time(time);
    }

    /// Playhead position relative to the trim start.
    pub fn play_time(&self) -> RationalTime {
        self.range.play_time()
    }

    pub fn absolute_play_time(&self) -> RationalTime {
        self.range.absolute_play_time()
    }

    /// Follows the host player; never produces events.
    pub fn set_current_time(&mut self, time: RationalTime) {
        self.range.set_current_time(time);
    }

    pub fn labels(&self) -> &TimeLabels {
        self.range.labels()
    }

    /// Still under the playhead.
    ///
    /// With an asset this samples synchronously at the absolute playhead
    /// time; with caller-provided images it returns the strip image whose
    /// span contains the playhead.
    pub fn current_image(&self) -> Result<Option<Frame>> {
        match &self.asset {
            Some(asset) => asset
                .sample_image(self.range.absolute_play_time())
                .map(Some),
            None => Ok(self
                .thumbnails
                .slot_at_x(self.range.state().playhead_x, self.strip.width)
                .and_then(|slot| slot.image.clone())),
        }
    }

    /// Samples one still from the current asset.
    pub fn image_at(&self, time: RationalTime) -> Result<Frame> {
        let asset = self.asset.as_ref().ok_or(TrimError::AssetNotLoaded)?;
        asset.sample_image(time)
    }

    /// Publishes every thumbnail result posted so far.
    ///
    /// Returns whether the strip changed.
    pub fn poll_thumbnails(&mut self) -> bool {
        let mut changed = false;
        while let Some(message) = self.pipeline.try_next() {
            changed |= self.pipeline.apply(&mut self.thumbnails, message);
        }
        changed
    }

    /// Blocks until the current run has published its batch or `timeout`
    /// elapses. Returns whether loading finished.
    pub fn wait_for_thumbnails(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.thumbnails.is_loading() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            if let Some(message) = self.pipeline.next_timeout(remaining) {
                let _ = self.pipeline.apply(&mut self.thumbnails, message);
            }
        }
        true
    }

    fn restart_thumbnails(&mut self) {
        let Some(asset) = self.asset.clone() else {
            self.pipeline.invalidate();
            self.thumbnails = ThumbnailSet::default();
            return;
        };
        if asset.duration().is_zero() {
            debug!("zero-length asset; no thumbnails");
            self.pipeline.invalidate();
            self.thumbnails = ThumbnailSet::default();
            return;
        }

        let frame_count = self.config.frame_count;
        self.thumbnails = ThumbnailSet::loading(frame_count);
        let _ = self.pipeline.start(asset, frame_count);
    }
}
