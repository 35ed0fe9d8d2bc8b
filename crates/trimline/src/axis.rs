use crate::time::RationalTime;

/// Time/pixel mapping for one asset duration laid across the strip width.
///
/// A zero width is treated as one pixel so conversions stay defined before
/// the first layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    duration: RationalTime,
    width: f64,
}

impl TimeAxis {
    pub fn new(duration: RationalTime, width: f64) -> Self {
        Self { duration, width }
    }

    pub fn duration(&self) -> RationalTime {
        self.duration
    }

    /// Width used for division; never zero.
    pub fn effective_width(&self) -> f64 {
        effective_width(self.width)
    }

    /// Maps a time to a pixel offset from the strip's left edge.
    ///
    /// Both rational components enter the ratio:
    /// `(t.value * t.timescale) / (D.value * D.timescale) * W`.
    ///
    /// # Example
    /// ```
    /// use trimline::{RationalTime, TimeAxis};
    ///
    /// let axis = TimeAxis::new(RationalTime::from_secs(60), 300.0);
    /// assert_eq!(axis.time_to_pixel(RationalTime::from_secs(20)), 100.0);
    /// ```
    pub fn time_to_pixel(&self, time: RationalTime) -> f64 {
        let denominator = self.duration.value as f64 * f64::from(self.duration.timescale);
        if denominator == 0.0 {
            return 0.0;
        }
        let numerator = time.value as f64 * f64::from(time.timescale);
        numerator * self.effective_width() / denominator
    }

    /// Maps a pixel offset (or pixel span) to a time on the asset's timescale.
    ///
    /// # Example
    /// ```
    /// use trimline::{RationalTime, TimeAxis};
    ///
    /// let axis = TimeAxis::new(RationalTime::new(36_000, 600).expect("valid"), 300.0);
    /// assert_eq!(axis.pixel_to_time(150.0).value, 18_000);
    /// ```
    pub fn pixel_to_time(&self, x: f64) -> RationalTime {
        let value = self.duration.value as f64 * x / self.effective_width();
        RationalTime {
            value: value as i64,
            timescale: self.duration.timescale,
        }
    }

    /// Maps a playback position by its share of the total duration in seconds.
    ///
    /// Used for the host's playback feed, which may report on any timescale.
    pub fn seconds_to_pixel(&self, time: RationalTime) -> f64 {
        let total = self.duration.seconds();
        if total == 0.0 {
            return 0.0;
        }
        self.effective_width() * time.seconds() / total
    }
}

pub(crate) fn effective_width(width: f64) -> f64 {
    if width == 0.0 { 1.0 } else { width }
}

#[cfg(test)]
mod tests {
    use super::TimeAxis;
    use crate::time::RationalTime;

    #[test]
    fn pixel_to_time_round_trips_within_one_timescale_unit() {
        let duration = RationalTime::new(36_000, 600).expect("valid");
        let axis = TimeAxis::new(duration, 317.0);

        for value in (0..=36_000).step_by(37) {
            let time = RationalTime::new(value, 600).expect("valid");
            let back = axis.pixel_to_time(axis.time_to_pixel(time));
            assert_eq!(back.timescale, 600);
            assert!(
                (back.value - value).abs() <= 1,
                "round trip drifted: {value} -> {}",
                back.value
            );
        }
    }

    #[test]
    fn zero_width_is_treated_as_one_pixel() {
        let axis = TimeAxis::new(RationalTime::from_secs(60), 0.0);

        assert_eq!(axis.effective_width(), 1.0);
        assert_eq!(axis.time_to_pixel(RationalTime::from_secs(30)), 0.5);
        assert_eq!(axis.pixel_to_time(1.0), RationalTime::from_secs(60));
    }

    #[test]
    fn zero_duration_maps_everything_to_the_left_edge() {
        let axis = TimeAxis::new(RationalTime::ZERO, 300.0);

        assert_eq!(axis.time_to_pixel(RationalTime::from_secs(3)), 0.0);
        assert_eq!(axis.seconds_to_pixel(RationalTime::from_secs(3)), 0.0);
        assert!(axis.pixel_to_time(120.0).is_zero());
    }

    #[test]
    fn time_to_pixel_multiplies_both_rational_components() {
        let axis = TimeAxis::new(RationalTime::new(60, 1).expect("valid"), 300.0);
        let same_instant_other_scale = RationalTime::new(600, 10).expect("valid");

        assert_eq!(axis.time_to_pixel(same_instant_other_scale), 30_000.0);
        assert_eq!(axis.seconds_to_pixel(same_instant_other_scale), 300.0);
    }
}
