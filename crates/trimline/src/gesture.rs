use tracing::debug;

use crate::notify::Event;
use crate::range::{MoveOutcome, RangeModel};

/// Draggable parts of the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragTarget {
    TrimStart,
    TrimEnd,
    Playhead,
}

impl DragTarget {
    fn is_handle(self) -> bool {
        matches!(self, Self::TrimStart | Self::TrimEnd)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Pointer input for the control. Positions are horizontal offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    DragBegan { target: DragTarget },
    DragMoved { target: DragTarget, x: f64 },
    DragEnded { target: DragTarget },
    DragCancelled { target: DragTarget },
    /// Single tap on the frame strip.
    Tapped { x: f64 },
    /// Pan over the background; swallowed so it never reaches the host.
    Absorbed,
}

impl Gesture {
    /// Shifts the gesture's position by `dx`.
    pub fn offset(self, dx: f64) -> Self {
        match self {
            Self::DragMoved { target, x } => Self::DragMoved { target, x: x + dx },
            Self::Tapped { x } => Self::Tapped { x: x + dx },
            other => other,
        }
    }
}

/// Per-target drag state machine that turns gestures into range mutations.
///
/// Every target runs `Idle -> Dragging -> Idle`. Moves for a target that is
/// not dragging are ignored, as are handle gestures while trimming is off.
#[derive(Debug, Clone, Default)]
pub struct GestureController {
    trim_start: DragState,
    trim_end: DragState,
    playhead: DragState,
    trimming_disabled: bool,
}

impl GestureController {
    pub fn new(can_trim: bool) -> Self {
        Self {
            trimming_disabled: !can_trim,
            ..Self::default()
        }
    }

    pub fn can_trim(&self) -> bool {
        !self.trimming_disabled
    }

    /// Enables or disables handle drags.
    ///
    /// Disabling cancels handle drags in flight, which reports the usual
    /// range-changed event for each.
    pub fn set_can_trim(&mut self, can_trim: bool) -> Vec<Event> {
        self.trimming_disabled = !can_trim;
        let mut events = Vec::new();
        if can_trim {
            return events;
        }
        for target in [DragTarget::TrimStart, DragTarget::TrimEnd] {
            if self.state(target) == DragState::Dragging {
                *self.state_mut(target) = DragState::Idle;
                events.push(Event::TrimRangeChanged);
            }
        }
        events
    }

    pub fn state(&self, target: DragTarget) -> DragState {
        match target {
            DragTarget::TrimStart => self.trim_start,
            DragTarget::TrimEnd => self.trim_end,
            DragTarget::Playhead => self.playhead,
        }
    }

    pub fn is_dragging(&self) -> bool {
        [self.trim_start, self.trim_end, self.playhead].contains(&DragState::Dragging)
    }

    /// Applies one gesture given in strip coordinates and returns the events
    /// the host should see, in order.
    pub fn handle(&mut self, range: &mut RangeModel, gesture: Gesture) -> Vec<Event> {
        match gesture {
            Gesture::DragBegan { target } => self.begin(target),
            Gesture::DragMoved { target, x } => self.drag(range, target, x),
            Gesture::DragEnded { target } | Gesture::DragCancelled { target } => self.end(target),
            Gesture::Tapped { x } => {
                range.seek_to_tap(x);
                debug!(x, playhead_x = range.state().playhead_x, "tap seek");
                vec![Event::PlayheadMoved]
            }
            Gesture::Absorbed => Vec::new(),
        }
    }

    fn begin(&mut self, target: DragTarget) -> Vec<Event> {
        if self.blocked(target) || self.state(target) == DragState::Dragging {
            return Vec::new();
        }
        *self.state_mut(target) = DragState::Dragging;
        debug!(?target, "drag began");
        vec![Event::TrimStartChanging]
    }

    fn drag(&mut self, range: &mut RangeModel, target: DragTarget, x: f64) -> Vec<Event> {
        if self.blocked(target) || self.state(target) != DragState::Dragging {
            return Vec::new();
        }

        let outcome = match target {
            DragTarget::TrimStart => range.move_trim_start(x),
            DragTarget::TrimEnd => range.move_trim_end(x),
            DragTarget::Playhead => range.move_playhead(x),
        };
        if let MoveOutcome::Rejected(reason) = outcome {
            debug!(?target, x, ?reason, "drag move rejected");
        }

        if outcome.playhead_moved() {
            vec![Event::PlayheadMoved]
        } else {
            Vec::new()
        }
    }

    fn end(&mut self, target: DragTarget) -> Vec<Event> {
        if self.state(target) != DragState::Dragging {
            return Vec::new();
        }
        *self.state_mut(target) = DragState::Idle;
        debug!(?target, "drag ended");
        vec![Event::TrimRangeChanged]
    }

    fn blocked(&self, target: DragTarget) -> bool {
        self.trimming_disabled && target.is_handle()
    }

    fn state_mut(&mut self, target: DragTarget) -> &mut DragState {
        match target {
            DragTarget::TrimStart => &mut self.trim_start,
            DragTarget::TrimEnd => &mut self.trim_end,
            DragTarget::Playhead => &mut self.playhead,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DragState, DragTarget, Gesture, GestureController};
    use crate::config::TrimConfig;
    use crate::notify::Event;
    use crate::range::RangeModel;
    use crate::time::RationalTime;

    fn setup(config: TrimConfig) -> (GestureController, RangeModel) {
        let mut range = RangeModel::new(&config);
        range.set_width(300.0);
        range.reset_for_duration(Some(RationalTime::from_secs(60)));
        (GestureController::new(config.can_trim), range)
    }

    fn drag(
        controller: &mut GestureController,
        range: &mut RangeModel,
        target: DragTarget,
        xs: &[f64],
    ) -> Vec<Event> {
        let mut events = controller.handle(range, Gesture::DragBegan { target });
        for x in xs {
            events.extend(controller.handle(range, Gesture::DragMoved { target, x: *x }));
        }
        events.extend(controller.handle(range, Gesture::DragEnded { target }));
        events
    }

    #[test]
    fn start_handle_drag_brackets_moves_with_changing_and_changed() {
        let (mut controller, mut range) = setup(TrimConfig::default());

        let events = drag(&mut controller, &mut range, DragTarget::TrimStart, &[40.0, 80.0]);

        assert_eq!(
            events,
            vec![
                Event::TrimStartChanging,
                Event::PlayheadMoved,
                Event::PlayheadMoved,
                Event::TrimRangeChanged,
            ]
        );
        assert_eq!(range.state().trim_start_x, 80.0);
        assert_eq!(range.state().playhead_x, 80.0);
        assert_eq!(controller.state(DragTarget::TrimStart), DragState::Idle);
    }

    #[test]
    fn start_handle_moving_left_does_not_move_playhead() {
        let (mut controller, mut range) = setup(TrimConfig::default());
        range.set_current_time(RationalTime::from_secs(40));

        let events = drag(&mut controller, &mut range, DragTarget::TrimStart, &[100.0, 60.0]);

        assert_eq!(events, vec![Event::TrimStartChanging, Event::TrimRangeChanged]);
        assert_eq!(range.state().trim_start_x, 60.0);
        assert_eq!(range.state().playhead_x, 200.0);
    }

    #[test]
    fn rejected_move_keeps_offset_and_emits_nothing() {
        let (mut controller, mut range) = setup(TrimConfig::default());
        let limit = 300.0 - 50.0 - 2.0 * 4.0;

        let _ = controller.handle(
            &mut range,
            Gesture::DragBegan {
                target: DragTarget::TrimStart,
            },
        );
        let events = controller.handle(
            &mut range,
            Gesture::DragMoved {
                target: DragTarget::TrimStart,
                x: limit + 1.0,
            },
        );

        assert!(events.is_empty());
        assert_eq!(range.state().trim_start_x, 0.0);
    }

    #[test]
    fn end_handle_over_max_duration_is_rejected() {
        let (mut controller, mut range) = setup(TrimConfig {
            max_duration: RationalTime::from_secs(5),
            ..TrimConfig::default()
        });
        let reserved = range.state().trim_end_reserved;

        let events = drag(&mut controller, &mut range, DragTarget::TrimEnd, &[200.0]);

        assert_eq!(events, vec![Event::TrimStartChanging, Event::TrimRangeChanged]);
        assert_eq!(range.state().trim_end_reserved, reserved);
        assert!(range.duration_time().seconds() <= 5.0);
    }

    #[test]
    fn playhead_drag_always_reports_and_clamps_into_selection() {
        let (mut controller, mut range) = setup(TrimConfig::default());
        let _ = range.move_trim_start(50.0);
        let _ = range.move_trim_end(250.0);

        let events = drag(
            &mut controller,
            &mut range,
            DragTarget::Playhead,
            &[10.0, 120.0, 299.0],
        );

        assert_eq!(
            events,
            vec![
                Event::TrimStartChanging,
                Event::PlayheadMoved,
                Event::PlayheadMoved,
                Event::PlayheadMoved,
                Event::TrimRangeChanged,
            ]
        );
        assert_eq!(range.state().playhead_x, 244.0);
    }

    #[test]
    fn tap_emits_exactly_one_playhead_event() {
        let (mut controller, mut range) = setup(TrimConfig::default());

        let events = controller.handle(&mut range, Gesture::Tapped { x: 150.0 });

        assert_eq!(events, vec![Event::PlayheadMoved]);
        assert!((range.state().playhead_x - 150.0).abs() <= 3.0);
    }

    #[test]
    fn moves_without_begin_and_absorbed_pans_are_ignored() {
        let (mut controller, mut range) = setup(TrimConfig::default());

        let moved = controller.handle(
            &mut range,
            Gesture::DragMoved {
                target: DragTarget::Playhead,
                x: 100.0,
            },
        );
        let absorbed = controller.handle(&mut range, Gesture::Absorbed);
        let ended = controller.handle(
            &mut range,
            Gesture::DragCancelled {
                target: DragTarget::TrimEnd,
            },
        );

        assert!(moved.is_empty() && absorbed.is_empty() && ended.is_empty());
        assert_eq!(range.state().playhead_x, 0.0);
    }

    #[test]
    fn disabled_trimming_ignores_handles_but_not_playhead() {
        let (mut controller, mut range) = setup(TrimConfig {
            can_trim: false,
            ..TrimConfig::default()
        });

        let handle_events = drag(&mut controller, &mut range, DragTarget::TrimStart, &[90.0]);
        let playhead_events = drag(&mut controller, &mut range, DragTarget::Playhead, &[90.0]);

        assert!(handle_events.is_empty());
        assert_eq!(range.state().trim_start_x, 0.0);
        assert_eq!(playhead_events.len(), 3);
        assert_eq!(range.state().playhead_x, 90.0);
    }

    #[test]
    fn disabling_trim_mid_drag_cancels_the_drag() {
        let (mut controller, mut range) = setup(TrimConfig::default());
        let _ = controller.handle(
            &mut range,
            Gesture::DragBegan {
                target: DragTarget::TrimEnd,
            },
        );

        let events = controller.set_can_trim(false);

        assert_eq!(events, vec![Event::TrimRangeChanged]);
        assert!(!controller.is_dragging());
    }
}
