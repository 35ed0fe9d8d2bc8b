use std::time::Duration;

use crate::range::RangeModel;
use crate::time::RationalTime;

/// How often hosts are expected to feed the player position back in.
pub const TICK_INTERVAL: Duration = Duration::from_millis(300);

/// What the host player should do after a clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAction {
    Continue,
    /// Playback reached the trim end: pause and seek back to the given start.
    PauseAndSeek(RationalTime),
}

/// Decides whether playback at `current` has run past the selection.
///
/// # Example
/// ```
/// use trimline::playback::{TickAction, on_tick};
/// use trimline::{RangeModel, RationalTime, TrimConfig};
///
/// let mut range = RangeModel::new(&TrimConfig::default());
/// range.set_width(300.0);
/// range.reset_for_duration(Some(RationalTime::from_secs(60)));
/// range.set_end_time(RationalTime::from_secs(30));
///
/// assert_eq!(on_tick(RationalTime::from_secs(12), &range), TickAction::Continue);
/// assert_eq!(
///     on_tick(RationalTime::from_secs(30), &range),
///     TickAction::PauseAndSeek(RationalTime::from_secs(0))
/// );
/// ```
pub fn on_tick(current: RationalTime, range: &RangeModel) -> TickAction {
    if range.asset_duration().is_none() {
        return TickAction::Continue;
    }
    if current.seconds() >= range.end_time().seconds() {
        TickAction::PauseAndSeek(range.start_time())
    } else {
        TickAction::Continue
    }
}
