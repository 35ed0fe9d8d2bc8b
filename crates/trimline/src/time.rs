use serde::{Deserialize, Serialize};

use crate::error::{Result, TrimError};

/// Media timestamp expressed as `value / timescale` seconds.
///
/// `value` and `timescale` are kept exactly as the asset reports them; the
/// pixel mapping in [`crate::axis::TimeAxis`] relies on both components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RationalTime {
    pub value: i64,
    pub timescale: i32,
}

impl RationalTime {
    /// Zero time, also used as "unbounded" for the maximum trim duration.
    pub const ZERO: Self = Self {
        value: 0,
        timescale: 1,
    };

    /// Creates a validated rational time.
    ///
    /// # Example
    /// ```
    /// use trimline::RationalTime;
    ///
    /// let t = RationalTime::new(3_000, 600).expect("valid");
    /// assert_eq!(t.seconds(), 5.0);
    /// ```
    pub fn new(value: i64, timescale: i32) -> Result<Self> {
        if timescale <= 0 {
            return Err(TrimError::InvalidRationalTime { value, timescale });
        }
        Ok(Self { value, timescale })
    }

    /// Whole seconds on a timescale of one.
    pub const fn from_secs(seconds: i64) -> Self {
        Self {
            value: seconds,
            timescale: 1,
        }
    }

    /// Converts fractional seconds, truncating toward zero on `timescale`.
    pub fn from_seconds(seconds: f64, timescale: i32) -> Self {
        let timescale = timescale.max(1);
        Self {
            value: (seconds * f64::from(timescale)) as i64,
            timescale,
        }
    }

    /// Returns the time in seconds.
    pub fn seconds(self) -> f64 {
        if self.timescale == 0 {
            return 0.0;
        }
        self.value as f64 / f64::from(self.timescale)
    }

    pub fn is_zero(self) -> bool {
        self.value == 0
    }

    /// Seconds rounded up to a whole number, as shown by the time labels.
    pub fn ceil_seconds(self) -> i64 {
        self.seconds().ceil() as i64
    }

    /// Re-expresses the time on another timescale with nearest rounding.
    ///
    /// # Example
    /// ```
    /// use trimline::RationalTime;
    ///
    /// let t = RationalTime::new(90_000, 90_000).expect("valid");
    /// assert_eq!(t.with_timescale(600).value, 600);
    /// ```
    pub fn with_timescale(self, timescale: i32) -> Self {
        let timescale = timescale.max(1);
        Self {
            value: rescale(self.value, self.timescale.max(1), timescale),
            timescale,
        }
    }
}

impl Default for RationalTime {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Rescales `value` from one timescale to another with nearest rounding.
pub fn rescale(value: i64, from: i32, to: i32) -> i64 {
    let numerator = i128::from(value) * i128::from(to);
    let denominator = i128::from(from);
    let rounded = div_round_nearest(numerator, denominator);
    rounded.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

fn div_round_nearest(num: i128, den: i128) -> i128 {
    debug_assert!(den > 0);

    let abs_num = num.abs();
    let mut out = abs_num / den;
    let remainder = abs_num % den;
    if remainder.saturating_mul(2) >= den {
        out += 1;
    }

    if num < 0 { -out } else { out }
}

/// Formats whole seconds as `m:ss`.
///
/// # Example
/// ```
/// use trimline::time::format_clock;
///
/// assert_eq!(format_clock(0), "0:00");
/// assert_eq!(format_clock(125), "2:05");
/// ```
pub fn format_clock(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
