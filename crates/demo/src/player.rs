use std::time::Duration;

use trimline::RationalTime;

/// Stand-in for a media player: a clock that advances while playing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedPlayer {
    position: RationalTime,
    playing: bool,
}

impl Default for SimulatedPlayer {
    fn default() -> Self {
        Self::new(trimline::FALLBACK_TIMESCALE)
    }
}

impl SimulatedPlayer {
    /// Paused player at zero reporting positions on `timescale`.
    pub fn new(timescale: i32) -> Self {
        Self {
            position: RationalTime {
                value: 0,
                timescale: timescale.max(1),
            },
            playing: false,
        }
    }

    pub fn position(&self) -> RationalTime {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Jumps to `time`, keeping the player's own timescale.
    pub fn seek(&mut self, time: RationalTime) {
        self.position = time.with_timescale(self.position.timescale);
    }

    /// Moves the clock forward by `elapsed` if playing.
    pub fn advance(&mut self, elapsed: Duration) {
        if !self.playing {
            return;
        }
        let ticks = elapsed.as_nanos() * self.position.timescale as u128 / 1_000_000_000;
        self.position.value = self
            .position
            .value
            .saturating_add(i64::try_from(ticks).unwrap_or(i64::MAX));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use trimline::RationalTime;

    use super::SimulatedPlayer;

    #[test]
    fn advances_only_while_playing() {
        let mut player = SimulatedPlayer::new(600);

        player.advance(Duration::from_millis(300));
        assert!(player.position().is_zero());

        player.play();
        player.advance(Duration::from_millis(300));
        player.advance(Duration::from_millis(300));

        assert_eq!(player.position(), RationalTime::new(360, 600).expect("valid"));
    }

    #[test]
    fn seek_converts_to_player_timescale() {
        let mut player = SimulatedPlayer::new(600);

        player.seek(RationalTime::from_secs(20));

        assert_eq!(player.position(), RationalTime::new(12_000, 600).expect("valid"));
    }
}
