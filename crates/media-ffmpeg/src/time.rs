use crate::error::{MediaFfmpegError, Result};

/// Stream time base or frame rate as reported by ffprobe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub num: i32,
    pub den: i32,
}

impl Rational {
    /// Creates a rational with a positive denominator and non-zero numerator.
    ///
    /// # Example
    /// ```
    /// use media_ffmpeg::Rational;
    ///
    /// let tb = Rational::new(1, 15_360).expect("valid");
    /// assert_eq!(tb.den, 15_360);
    /// ```
    pub fn new(num: i32, den: i32) -> Result<Self> {
        if den <= 0 || num == 0 {
            return Err(MediaFfmpegError::InvalidTimeBase { num, den });
        }

        Ok(Self { num, den })
    }

    /// Parses ffprobe's `num/den` text.
    ///
    /// # Example
    /// ```
    /// use media_ffmpeg::Rational;
    ///
    /// let rate = Rational::parse("30000/1001").expect("valid");
    /// assert_eq!(rate.num, 30_000);
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let (num, den) = input
            .split_once('/')
            .ok_or_else(|| MediaFfmpegError::ProbeField {
                field: "rational",
                raw: input.to_string(),
            })?;
        let num = parse_i32(num, "rational num")?;
        let den = parse_i32(den, "rational den")?;
        Self::new(num, den)
    }

    /// Expresses `ticks` of this time base as a `(value, timescale)` pair.
    ///
    /// Returns `None` when the value overflows.
    pub fn ticks_to_rational_time(self, ticks: i64) -> Option<(i64, i32)> {
        ticks
            .checked_mul(i64::from(self.num))
            .map(|value| (value, self.den))
    }
}

fn parse_i32(value: &str, field: &'static str) -> Result<i32> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| MediaFfmpegError::ProbeField {
            field,
            raw: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::Rational;
    use crate::error::MediaFfmpegError;

    #[test]
    fn parse_rejects_zero_denominator() {
        let error = Rational::parse("1/0").expect_err("zero denominator");

        assert!(matches!(
            error,
            MediaFfmpegError::InvalidTimeBase { num: 1, den: 0 }
        ));
    }

    #[test]
    fn ticks_keep_the_stream_time_base() {
        let tb = Rational::new(1, 15_360).expect("valid");

        assert_eq!(tb.ticks_to_rational_time(30_720), Some((30_720, 15_360)));
        assert_eq!(
            Rational::new(1_001, 30_000)
                .expect("valid")
                .ticks_to_rational_time(30),
            Some((30_030, 30_000))
        );
    }
}
