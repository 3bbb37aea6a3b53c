use chrono::NaiveDateTime;

use super::types::SimConfig;

/// One tick handed out by the [`Clock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Tick index, starting at 0.
    pub index: usize,
    /// Wall-clock instant of the tick.
    pub time: NaiveDateTime,
    /// First tick of a day after the first one.
    pub new_day: bool,
}

/// A simulation clock that hands out ticks over a fixed run.
///
/// The clock is the only source of time in a run; the rule engine receives
/// the instant as an input and never reads a clock itself.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use home_ems::sim::clock::Clock;
/// use home_ems::sim::types::SimConfig;
///
/// let start = NaiveDate::from_ymd_opt(2025, 10, 16)
///     .and_then(|d| d.and_hms_opt(0, 0, 0))
///     .unwrap();
/// let mut clock = Clock::new(&SimConfig::new(start, 24, 1, 0));
/// let mut hours = Vec::new();
///
/// clock.run(|tick| hours.push(tick.index));
/// assert_eq!(hours.len(), 24);
/// ```
pub struct Clock {
    config: SimConfig,
    current: usize,
}

impl Clock {
    /// Creates a clock covering every tick of `config`.
    pub fn new(config: &SimConfig) -> Self {
        Self {
            config: config.clone(),
            current: 0,
        }
    }

    /// Advances the clock by one tick.
    ///
    /// Returns `None` once every tick has been handed out.
    pub fn tick(&mut self) -> Option<Tick> {
        if self.current >= self.config.total_steps() {
            return None;
        }
        let index = self.current;
        self.current += 1;
        Some(Tick {
            index,
            time: self.config.time_at(index),
            new_day: self.config.is_day_boundary(index),
        })
    }

    /// Calls `f` for each remaining tick.
    pub fn run(&mut self, mut f: impl FnMut(Tick)) {
        while let Some(tick) = self.tick() {
            f(tick);
        }
    }

    pub fn remaining(&self) -> usize {
        self.config.total_steps() - self.current
    }
}
