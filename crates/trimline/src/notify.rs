/// Notifications emitted to the host while the user works the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A handle or the playhead was grabbed; hosts usually pause playback.
    TrimStartChanging,
    /// The grab ended or was cancelled; hosts re-read the trim times.
    TrimRangeChanged,
    /// The playhead moved because of the user, not because of playback.
    PlayheadMoved,
}

/// Callback-style receiver for [`Event`]s. Every method defaults to a no-op.
pub trait TrimDelegate {
    fn trim_start_changing(&mut self) {}

    fn trim_range_changed(&mut self) {}

    fn playhead_moved(&mut self) {}
}

/// Forwards events to a delegate in emission order.
pub fn dispatch<D>(events: &[Event], delegate: &mut D)
where
    D: TrimDelegate + ?Sized,
{
    for event in events {
        match event {
            Event::TrimStartChanging => delegate.trim_start_changing(),
            Event::TrimRangeChanged => delegate.trim_range_changed(),
            Event::PlayheadMoved => delegate.playhead_moved(),
        }
    }
}
