use tracing::{debug, warn};

use crate::axis::{TimeAxis, effective_width};
use crate::config::TrimConfig;
use crate::time::{RationalTime, format_clock};

/// Pixel offsets of the trim frame and playhead, measured from the strip's
/// left edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RangeState {
    pub trim_start_x: f64,
    /// Distance withheld at the trailing edge of the strip.
    pub trim_end_reserved: f64,
    pub playhead_x: f64,
}

/// Strip dimensions the range invariants are measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineGeometry {
    pub width: f64,
    pub handle_width: f64,
    pub min_remaining_width: f64,
    pub playhead_width: f64,
}

/// Text shown above the strip: position inside the selection and its length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLabels {
    pub play: String,
    pub total: String,
    pub visible: bool,
}

/// Why a drag move left the range untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MaxDuration,
    MinimumGap,
}

/// Result of applying one pointer position to the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { playhead_moved: bool },
    /// The pointer was beyond a strip edge and the offset was pinned to it.
    Clamped { playhead_moved: bool },
    Rejected(RejectReason),
}

impl MoveOutcome {
    pub fn playhead_moved(self) -> bool {
        match self {
            Self::Moved { playhead_moved } | Self::Clamped { playhead_moved } => playhead_moved,
            Self::Rejected(_) => false,
        }
    }
}

/// Trim selection and playhead for one strip.
///
/// Offsets are the stored state; every time accessor derives its value from
/// them through a [`TimeAxis`]. Without an asset duration all times are zero.
#[derive(Debug, Clone)]
pub struct RangeModel {
    duration: Option<RationalTime>,
    geometry: TimelineGeometry,
    max_duration: RationalTime,
    state: RangeState,
    labels: TimeLabels,
    show_time_labels: bool,
}

impl RangeModel {
    pub fn new(config: &TrimConfig) -> Self {
        Self {
            duration: None,
            geometry: TimelineGeometry {
                width: 0.0,
                handle_width: config.handle_width,
                min_remaining_width: config.min_remaining_width,
                playhead_width: config.playhead_width,
            },
            max_duration: config.max_duration,
            state: RangeState::default(),
            labels: TimeLabels {
                play: format_clock(0),
                total: format_clock(0),
                visible: false,
            },
            show_time_labels: config.show_time_labels,
        }
    }

    /// Picks up geometry and limits from a changed configuration.
    pub fn apply_config(&mut self, config: &TrimConfig) {
        self.geometry.handle_width = config.handle_width;
        self.geometry.min_remaining_width = config.min_remaining_width;
        self.geometry.playhead_width = config.playhead_width;
        self.max_duration = config.max_duration;
        self.show_time_labels = config.show_time_labels;
        self.labels.visible = self.labels_should_show();
        self.clamp_playhead();
    }

    pub fn state(&self) -> RangeState {
        self.state
    }

    pub fn geometry(&self) -> TimelineGeometry {
        self.geometry
    }

    pub fn labels(&self) -> &TimeLabels {
        &self.labels
    }

    pub fn asset_duration(&self) -> Option<RationalTime> {
        self.duration
    }

    pub fn max_duration(&self) -> RationalTime {
        self.max_duration
    }

    /// Strip width used for all ratios; never zero.
    pub fn width(&self) -> f64 {
        effective_width(self.geometry.width)
    }

    /// Width between the trim handles.
    pub fn selectable_width(&self) -> f64 {
        self.width() - self.state.trim_start_x - self.state.trim_end_reserved
    }

    pub fn axis(&self) -> Option<TimeAxis> {
        self.duration
            .map(|duration| TimeAxis::new(duration, self.geometry.width))
    }

    /// Updates the strip width, rescaling offsets so the selected times stay put.
    pub fn set_width(&mut self, width: f64) {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let old = self.width();
        let new = effective_width(width);
        self.geometry.width = width;
        if old == new {
            return;
        }

        let scale = new / old;
        self.state.trim_start_x *= scale;
        self.state.trim_end_reserved *= scale;
        self.state.playhead_x *= scale;
        self.restore_minimum_gap();
        self.clamp_playhead();
        debug!(width, scale, "strip width changed");
    }

    /// Widens a selection squeezed below the minimum gap, releasing the
    /// trailing reserve before the leading offset. The maximum duration caps
    /// the gap; a strip narrower than the gap keeps its proportional selection.
    fn restore_minimum_gap(&mut self) {
        let mut minimum = self.geometry.min_remaining_width;
        if self.geometry.width < minimum {
            return;
        }
        if let Some(axis) = self.axis().filter(|_| self.has_max_duration()) {
            minimum = minimum.min(pixel_for(&axis, self.max_duration));
        }
        let mut deficit = minimum - self.selectable_width();
        if deficit <= 0.0 {
            return;
        }
        let from_end = deficit.min(self.state.trim_end_reserved);
        self.state.trim_end_reserved -= from_end;
        deficit -= from_end;
        self.state.trim_start_x = (self.state.trim_start_x - deficit).max(0.0);
        debug!(
            trim_start_x = self.state.trim_start_x,
            trim_end_reserved = self.state.trim_end_reserved,
            "selection widened to minimum gap"
        );
    }

    /// Installs a new asset duration and resets the selection to the full strip.
    ///
    /// A configured maximum duration shrinks the selection immediately.
    pub fn reset_for_duration(&mut self, duration: Option<RationalTime>) {
        self.duration = duration;
        self.state = RangeState::default();
        self.labels.play = format_clock(0);
        self.labels.total = format_clock(duration.map(RationalTime::ceil_seconds).unwrap_or(0));
        self.labels.visible = self.labels_should_show();

        if self.has_max_duration() && self.duration_time().seconds() > self.max_duration.seconds() {
            self.set_duration_time(self.max_duration);
        }
    }

    /// Start of the selection.
    pub fn start_time(&self) -> RationalTime {
        self.time_at(self.state.trim_start_x)
    }

    /// Moves the trim start; the playhead follows when the new start passes it.
    pub fn set_start_time(&mut self, time: RationalTime) {
        let Some(axis) = self.axis() else {
            return;
        };
        let upper = (self.width() - self.state.trim_end_reserved).max(0.0);
        let start_x = pixel_for(&axis, time).clamp(0.0, upper);
        self.state.trim_start_x = start_x;
        self.update_total_label();
        if start_x > self.state.playhead_x {
            self.state.playhead_x = start_x;
        }
        self.clamp_playhead();
        self.update_play_label();
    }

    /// Length of the selection.
    pub fn duration_time(&self) -> RationalTime {
        self.time_at(self.selectable_width())
    }

    /// Resizes the selection by recomputing the trailing reserve.
    pub fn set_duration_time(&mut self, time: RationalTime) {
        let Some(axis) = self.axis() else {
            return;
        };
        let span = pixel_for(&axis, time).abs();
        let reserved = self.width() - self.state.trim_start_x.abs() - span;
        let upper = (self.width() - self.state.trim_start_x).max(0.0);
        self.state.trim_end_reserved = reserved.clamp(0.0, upper);
        self.update_total_label();
        self.clamp_playhead();
        self.update_play_label();
    }

    /// End of the selection, `start + duration` on the start's timescale.
    pub fn end_time(&self) -> RationalTime {
        let start = self.start_time();
        RationalTime {
            value: start.value + self.duration_time().value,
            timescale: start.timescale,
        }
    }

    /// Sets the end of the selection through the duration it implies.
    pub fn set_end_time(&mut self, time: RationalTime) {
        let Some(duration) = self.duration else {
            return;
        };
        let start = self.start_time();
        let end = time.with_timescale(duration.timescale);
        self.set_duration_time(RationalTime {
            value: end.value - start.value,
            timescale: end.timescale,
        });
    }

    /// Playhead position measured from the trim start.
    pub fn play_time(&self) -> RationalTime {
        self.time_at(self.state.playhead_x - self.state.trim_start_x)
    }

    /// Playhead position on the asset's own clock: `start + play`.
    pub fn absolute_play_time(&self) -> RationalTime {
        let start = self.start_time();
        RationalTime {
            value: start.value + self.play_time().value,
            timescale: start.timescale,
        }
    }

    /// Follows the host player's position without notifying anyone.
    pub fn set_current_time(&mut self, time: RationalTime) {
        let Some(axis) = self.axis() else {
            return;
        };
        self.state.playhead_x = axis.seconds_to_pixel(time);
        self.clamp_playhead();
        self.update_play_label();
    }

    /// Duration the selection would have with the given offsets.
    pub fn tentative_duration(&self, trim_start_x: f64, trim_end_reserved: f64) -> Option<RationalTime> {
        let axis = self.axis()?;
        let remaining = self.width() - trim_start_x.abs() - trim_end_reserved.abs();
        Some(axis.pixel_to_time(remaining))
    }

    /// Applies a trim-start handle position.
    ///
    /// Spans over the maximum duration and handles crossing the minimum gap
    /// are rejected; a pointer left of the strip pins the start to zero.
    pub fn move_trim_start(&mut self, pointer_x: f64) -> MoveOutcome {
        if self.would_exceed_max(pointer_x.max(0.0), self.state.trim_end_reserved) {
            warn!(pointer_x, "trim start rejected: maximum duration");
            return MoveOutcome::Rejected(RejectReason::MaxDuration);
        }
        if pointer_x < 0.0 {
            self.state.trim_start_x = 0.0;
            self.update_total_label();
            self.update_play_label();
            return MoveOutcome::Clamped {
                playhead_moved: false,
            };
        }
        let remaining = self.width() - self.state.trim_end_reserved;
        if pointer_x + self.handle_clearance() > remaining {
            debug!(pointer_x, remaining, "trim start rejected: minimum gap");
            return MoveOutcome::Rejected(RejectReason::MinimumGap);
        }

        self.state.trim_start_x = pointer_x;
        self.update_total_label();
        let playhead_moved = pointer_x > self.state.playhead_x;
        if playhead_moved {
            self.state.playhead_x = pointer_x;
            self.clamp_playhead();
        }
        self.update_play_label();
        MoveOutcome::Moved { playhead_moved }
    }

    /// Applies a trim-end handle position given in strip coordinates.
    pub fn move_trim_end(&mut self, pointer_x: f64) -> MoveOutcome {
        let reserved = self.width() - pointer_x;
        if self.would_exceed_max(self.state.trim_start_x, reserved.max(0.0)) {
            warn!(pointer_x, "trim end rejected: maximum duration");
            return MoveOutcome::Rejected(RejectReason::MaxDuration);
        }
        if reserved < 0.0 {
            self.state.trim_end_reserved = 0.0;
            self.update_total_label();
            return MoveOutcome::Clamped {
                playhead_moved: false,
            };
        }
        let remaining = self.width() - self.state.trim_start_x;
        if reserved + self.handle_clearance() > remaining {
            debug!(pointer_x, remaining, "trim end rejected: minimum gap");
            return MoveOutcome::Rejected(RejectReason::MinimumGap);
        }

        self.state.trim_end_reserved = reserved;
        self.update_total_label();
        let limit = self.playhead_upper_bound();
        let playhead_moved = limit < self.state.playhead_x;
        if playhead_moved {
            self.state.playhead_x = limit;
            self.clamp_playhead();
            self.update_play_label();
        }
        MoveOutcome::Moved { playhead_moved }
    }

    /// Applies a playhead drag position, pinning it inside the selection.
    pub fn move_playhead(&mut self, pointer_x: f64) -> MoveOutcome {
        let lower = self.state.trim_start_x;
        let upper = self.playhead_upper_bound();
        let outcome = if pointer_x < lower || pointer_x > upper {
            MoveOutcome::Clamped {
                playhead_moved: true,
            }
        } else {
            MoveOutcome::Moved {
                playhead_moved: true,
            }
        };
        self.state.playhead_x = pointer_x;
        self.clamp_playhead();
        self.update_play_label();
        outcome
    }

    /// Centres the playhead on a tapped strip position.
    pub fn seek_to_tap(&mut self, tap_x: f64) {
        self.state.playhead_x = tap_x + self.geometry.playhead_width / 2.0;
        self.clamp_playhead();
        self.update_play_label();
    }

    fn has_max_duration(&self) -> bool {
        !self.max_duration.is_zero()
    }

    fn would_exceed_max(&self, trim_start_x: f64, trim_end_reserved: f64) -> bool {
        if !self.has_max_duration() {
            return false;
        }
        self.tentative_duration(trim_start_x, trim_end_reserved)
            .is_some_and(|duration| self.max_duration.seconds() < duration.seconds())
    }

    fn handle_clearance(&self) -> f64 {
        self.geometry.handle_width * 2.0 + self.geometry.min_remaining_width
    }

    fn playhead_upper_bound(&self) -> f64 {
        self.width() - self.state.trim_end_reserved - self.geometry.playhead_width
    }

    fn clamp_playhead(&mut self) {
        let lower = self.state.trim_start_x;
        let upper = self.playhead_upper_bound().max(lower);
        self.state.playhead_x = self.state.playhead_x.clamp(lower, upper);
    }

    fn time_at(&self, x: f64) -> RationalTime {
        self.axis()
            .map(|axis| axis.pixel_to_time(x))
            .unwrap_or(RationalTime::ZERO)
    }

    fn labels_should_show(&self) -> bool {
        self.show_time_labels && self.duration.is_some_and(|duration| !duration.is_zero())
    }

    fn update_play_label(&mut self) {
        self.labels.play = format_clock(self.play_time().ceil_seconds());
    }

    fn update_total_label(&mut self) {
        self.labels.total = format_clock(self.duration_time().ceil_seconds());
    }
}

/// Maps a caller-supplied time onto the axis after moving it to the asset's
/// timescale, so the product formula compares like with like.
fn pixel_for(axis: &TimeAxis, time: RationalTime) -> f64 {
    axis.time_to_pixel(time.with_timescale(axis.duration().timescale))
}

#[cfg(test)]
mod tests {
    use super::{MoveOutcome, RangeModel, RejectReason};
    use crate::config::TrimConfig;
    use crate::time::RationalTime;

    fn model(config: TrimConfig) -> RangeModel {
        let mut model = RangeModel::new(&config);
        model.set_width(300.0);
        model.reset_for_duration(Some(RationalTime::from_secs(60)));
        model
    }

    fn unhandled() -> TrimConfig {
        TrimConfig {
            handle_width: 0.0,
            ..TrimConfig::default()
        }
    }

    #[test]
    fn reset_selects_the_full_asset() {
        let model = model(TrimConfig::default());

        assert_eq!(model.start_time(), RationalTime::from_secs(0));
        assert_eq!(model.duration_time(), RationalTime::from_secs(60));
        assert_eq!(model.end_time(), RationalTime::from_secs(60));
        assert_eq!(model.labels().total, "1:00");
        assert_eq!(model.labels().play, "0:00");
        assert!(model.labels().visible);
    }

    #[test]
    fn dragging_start_then_end_selects_twenty_to_thirty_seconds() {
        let mut model = model(unhandled());

        assert_eq!(
            model.move_trim_start(100.0),
            MoveOutcome::Moved {
                playhead_moved: true
            }
        );
        assert_eq!(model.state().trim_start_x, 100.0);
        assert_eq!(model.start_time(), RationalTime::from_secs(20));

        assert!(matches!(
            model.move_trim_end(150.0),
            MoveOutcome::Moved { .. }
        ));
        assert_eq!(model.state().trim_end_reserved, 150.0);
        assert_eq!(model.duration_time(), RationalTime::from_secs(10));
        assert_eq!(model.end_time(), RationalTime::from_secs(30));
        assert_eq!(model.labels().total, "0:10");
    }

    #[test]
    fn offsets_and_selection_always_sum_to_width() {
        let mut model = model(TrimConfig::default());

        for pointer in [-40.0, 12.5, 80.0, 190.0, 260.0, 320.0] {
            let _ = model.move_trim_start(pointer);
            let _ = model.move_trim_end(300.0 - pointer / 2.0);
            let state = model.state();
            let sum = state.trim_start_x + state.trim_end_reserved + model.selectable_width();
            assert!((sum - 300.0).abs() < 1e-9);
            assert!(model.selectable_width() >= 50.0);
        }
    }

    #[test]
    fn start_handle_cannot_cross_minimum_gap() {
        let mut model = model(TrimConfig::default());
        let _ = model.move_trim_start(200.0);
        let before = model.state();

        let outcome = model.move_trim_start(300.0 - 50.0 - 8.0 + 0.5);

        assert_eq!(outcome, MoveOutcome::Rejected(RejectReason::MinimumGap));
        assert_eq!(model.state(), before);
    }

    #[test]
    fn pointer_beyond_edges_is_clamped() {
        let mut model = model(TrimConfig::default());
        let _ = model.move_trim_start(40.0);
        let _ = model.move_trim_end(200.0);

        assert_eq!(
            model.move_trim_start(-12.0),
            MoveOutcome::Clamped {
                playhead_moved: false
            }
        );
        assert_eq!(model.state().trim_start_x, 0.0);
        assert_eq!(
            model.move_trim_end(340.0),
            MoveOutcome::Clamped {
                playhead_moved: false
            }
        );
        assert_eq!(model.state().trim_end_reserved, 0.0);
    }

    #[test]
    fn max_duration_shrinks_selection_on_reset_and_rejects_growth() {
        let mut model = model(TrimConfig {
            max_duration: RationalTime::from_secs(5),
            ..TrimConfig::default()
        });

        assert_eq!(model.state().trim_end_reserved, 275.0);
        assert_eq!(model.duration_time(), RationalTime::from_secs(5));

        let outcome = model.move_trim_end(200.0);

        assert_eq!(outcome, MoveOutcome::Rejected(RejectReason::MaxDuration));
        assert_eq!(model.state().trim_end_reserved, 275.0);
    }

    #[test]
    fn max_duration_holds_across_arbitrary_drags() {
        let max = RationalTime::from_secs(12);
        let mut model = model(TrimConfig {
            max_duration: max,
            handle_width: 0.0,
            min_remaining_width: 10.0,
            ..TrimConfig::default()
        });

        let pointers = [-30.0, 5.0, 77.0, 150.0, 240.0, 299.0, 330.0, 18.0, 120.0];
        for (index, pointer) in pointers.iter().copied().enumerate() {
            if index % 2 == 0 {
                let _ = model.move_trim_start(pointer);
            } else {
                let _ = model.move_trim_end(pointer);
            }
            assert!(model.duration_time().seconds() <= max.seconds());
        }
    }

    #[test]
    fn setting_start_after_playhead_drags_playhead_along() {
        let mut model = model(TrimConfig::default());
        model.set_current_time(RationalTime::from_secs(10));
        assert_eq!(model.state().playhead_x, 50.0);

        model.set_start_time(RationalTime::from_secs(20));

        assert_eq!(model.state().playhead_x, 100.0);
        assert_eq!(model.play_time(), RationalTime::from_secs(0));
    }

    #[test]
    fn setting_start_before_playhead_leaves_playhead() {
        let mut model = model(TrimConfig::default());
        model.set_current_time(RationalTime::from_secs(30));

        model.set_start_time(RationalTime::from_secs(12));

        assert_eq!(model.state().playhead_x, 150.0);
        assert_eq!(model.absolute_play_time(), RationalTime::from_secs(30));
    }

    #[test]
    fn set_end_time_stores_a_duration() {
        let mut model = model(TrimConfig::default());
        model.set_start_time(RationalTime::from_secs(15));

        model.set_end_time(RationalTime::from_secs(45));

        assert_eq!(model.duration_time(), RationalTime::from_secs(30));
        assert_eq!(model.end_time(), RationalTime::from_secs(45));
        assert_eq!(model.state().trim_end_reserved, 75.0);
    }

    #[test]
    fn current_time_is_clamped_inside_selection() {
        let mut model = model(TrimConfig::default());
        let _ = model.move_trim_start(60.0);
        let _ = model.move_trim_end(240.0);

        model.set_current_time(RationalTime::from_secs(2));
        assert_eq!(model.state().playhead_x, 60.0);

        model.set_current_time(RationalTime::from_secs(59));
        assert_eq!(model.state().playhead_x, 234.0);
    }

    #[test]
    fn trim_end_pulls_playhead_back_inside() {
        let mut model = model(TrimConfig::default());
        model.set_current_time(RationalTime::from_secs(50));

        let outcome = model.move_trim_end(200.0);

        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                playhead_moved: true
            }
        );
        assert_eq!(model.state().playhead_x, 194.0);
    }

    #[test]
    fn tap_centres_playhead_on_pointer() {
        let mut model = model(TrimConfig::default());

        model.seek_to_tap(150.0);

        assert_eq!(model.state().playhead_x, 153.0);
    }

    #[test]
    fn times_are_zero_without_an_asset() {
        let mut model = RangeModel::new(&TrimConfig::default());
        model.set_width(300.0);
        model.set_start_time(RationalTime::from_secs(3));
        model.set_current_time(RationalTime::from_secs(3));

        assert!(model.start_time().is_zero());
        assert!(model.end_time().is_zero());
        assert!(model.duration_time().is_zero());
        assert!(model.play_time().is_zero());
        assert!(!model.labels().visible);
    }

    #[test]
    fn stream_timescale_asset_honours_max_duration_in_seconds() {
        let mut model = RangeModel::new(&TrimConfig {
            max_duration: RationalTime::from_secs(5),
            handle_width: 0.0,
            min_remaining_width: 10.0,
            ..TrimConfig::default()
        });
        model.set_width(300.0);
        model.reset_for_duration(Some(RationalTime::new(921_600, 15_360).expect("valid")));

        assert_eq!(model.state().trim_end_reserved, 275.0);
        assert_eq!(model.duration_time(), RationalTime::new(76_800, 15_360).expect("valid"));

        assert_eq!(
            model.move_trim_end(40.0),
            MoveOutcome::Rejected(RejectReason::MaxDuration)
        );
        assert!(matches!(model.move_trim_end(20.0), MoveOutcome::Moved { .. }));
        assert_eq!(model.duration_time().seconds(), 4.0);
    }

    #[test]
    fn setters_accept_times_on_any_timescale() {
        let mut model = RangeModel::new(&TrimConfig::default());
        model.set_width(300.0);
        model.reset_for_duration(Some(RationalTime::new(36_000, 600).expect("valid")));

        model.set_start_time(RationalTime::from_secs(20));
        assert_eq!(model.state().trim_start_x, 100.0);
        assert_eq!(model.start_time(), RationalTime::new(12_000, 600).expect("valid"));

        model.set_duration_time(RationalTime::new(150_000, 15_000).expect("valid"));
        assert_eq!(model.state().trim_end_reserved, 150.0);

        model.set_end_time(RationalTime::from_secs(40));
        assert_eq!(model.end_time(), RationalTime::new(24_000, 600).expect("valid"));
        assert_eq!(model.state().trim_end_reserved, 100.0);
    }

    #[test]
    fn shrinking_restores_the_minimum_gap() {
        let mut model = model(TrimConfig::default());
        let _ = model.move_trim_start(230.0);
        assert_eq!(model.selectable_width(), 70.0);

        model.set_width(150.0);

        assert_eq!(model.selectable_width(), 50.0);
        assert_eq!(model.state().trim_end_reserved, 0.0);
        assert_eq!(model.state().trim_start_x, 100.0);
        assert!(model.state().playhead_x >= model.state().trim_start_x);
    }

    #[test]
    fn shrinking_releases_the_trailing_reserve_first() {
        let mut model = model(unhandled());
        let _ = model.move_trim_start(100.0);
        let _ = model.move_trim_end(160.0);
        assert_eq!(model.selectable_width(), 60.0);

        model.set_width(150.0);

        assert_eq!(model.state().trim_start_x, 50.0);
        assert_eq!(model.state().trim_end_reserved, 50.0);
        assert_eq!(model.selectable_width(), 50.0);
    }

    #[test]
    fn shrinking_never_widens_past_max_duration() {
        let mut model = model(TrimConfig {
            max_duration: RationalTime::from_secs(5),
            ..TrimConfig::default()
        });
        assert_eq!(model.selectable_width(), 25.0);

        model.set_width(600.0);
        model.set_width(300.0);

        assert_eq!(model.selectable_width(), 25.0);
        assert_eq!(model.duration_time(), RationalTime::from_secs(5));
    }

    #[test]
    fn resize_keeps_selected_times() {
        let mut model = RangeModel::new(&TrimConfig::default());
        model.reset_for_duration(Some(RationalTime::from_secs(60)));
        model.set_start_time(RationalTime::from_secs(30));

        model.set_width(300.0);

        assert_eq!(model.state().trim_start_x, 150.0);
        assert_eq!(model.start_time(), RationalTime::from_secs(30));
    }
}
