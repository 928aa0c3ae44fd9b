//! The simulated instant and its flow rate.
//!
//! # Speed ladder
//!
//! Speed changes are stepped rather than continuous. With `T` = [`JD_SECOND`]
//! (real time):
//!
//! | current rate `r` | `increase_speed` | `decrease_speed` |
//! |------------------|------------------|------------------|
//! | `r >= T` | `r * 10` | `r / 10` (if `r > T`), `0` (if `r == T`) |
//! | `0 <= r < T` | `T` | `0` (if `r > 0`), `-T` (if `r == 0`) |
//! | `-T <= r < 0` | `0` | `-T` |
//! | `r < -T` | `r / 10` | `r * 10` |
//!
//! The `_less` variants use a factor of 2. Repeated presses therefore walk
//! `0 → T → 10T → 100T` and back down through zero into reverse.

use crate::constants::{JD_HOUR, JD_MAX, JD_MIN, JD_SECOND};
use crate::parsing::{parse_time_of_day, TimeOfDay};
use crate::source::TimeSource;
use crate::JulianDate;
use std::cell::Cell;

#[derive(Debug, Clone)]
pub struct SimulationClock {
    jd: f64,
    rate: f64,
    // instant at the last wall-clock check, and its verdict
    now_check: Cell<Option<(f64, bool)>>,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationClock {
    /// Starts at J2000.0, running in real time.
    pub fn new() -> Self {
        Self::starting_at(celestial_core::constants::J2000_JD)
    }

    pub fn starting_at(jd: f64) -> Self {
        Self {
            jd: clamp_jd(jd),
            rate: JD_SECOND,
            now_check: Cell::new(None),
        }
    }

    #[inline]
    pub fn jd(&self) -> f64 {
        self.jd
    }

    pub fn julian_date(&self) -> JulianDate {
        JulianDate::from_f64(self.jd)
    }

    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn set_instant(&mut self, jd: f64) {
        self.jd = clamp_jd(jd);
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    pub fn is_real_time(&self) -> bool {
        (self.rate - JD_SECOND).abs() < 0.0000001 * JD_SECOND
    }

    pub fn is_paused(&self) -> bool {
        self.rate == 0.0
    }

    /// Moves the instant by `rate * dt_seconds` and clamps it.
    pub fn advance(&mut self, dt_seconds: f64) {
        self.jd = clamp_jd(self.jd + self.rate * dt_seconds);
    }

    pub fn add_solar_days(&mut self, days: f64) {
        self.set_instant(self.julian_date().add_days(days).to_f64());
    }

    pub fn increase_speed(&mut self) {
        self.rate = step_up(self.rate, 10.0);
    }

    pub fn decrease_speed(&mut self) {
        self.rate = step_down(self.rate, 10.0);
    }

    pub fn increase_speed_less(&mut self) {
        self.rate = step_up(self.rate, 2.0);
    }

    pub fn decrease_speed_less(&mut self) {
        self.rate = step_down(self.rate, 2.0);
    }

    pub fn set_to_now(&mut self, source: &dyn TimeSource) {
        self.set_instant(source.now_jd());
    }

    /// Sets a preset instant given in local civil time.
    pub fn set_to_preset(&mut self, source: &dyn TimeSource, preset_jd: f64) {
        let offset = source.utc_offset_hours(preset_jd);
        self.set_instant(preset_jd - offset * JD_HOUR);
    }

    /// Sets today's local date at the given local time of day.
    ///
    /// An unparseable time falls back to [`set_to_now`](Self::set_to_now) with a
    /// warning. Returns whether the requested time was applied.
    pub fn set_to_today(&mut self, source: &dyn TimeSource, time_of_day: &str) -> bool {
        match parse_time_of_day(time_of_day) {
            Ok(time) => self.set_to_today_at(source, time),
            Err(err) => {
                log::warn!("invalid today time {:?} ({}); using current time", time_of_day, err);
                self.set_to_now(source);
                false
            }
        }
    }

    pub fn set_to_today_at(&mut self, source: &dyn TimeSource, time: TimeOfDay) -> bool {
        let now = source.now_jd();
        let offset = source.utc_offset_hours(now);
        let local_today = match JulianDate::from_f64(now + offset * JD_HOUR).to_calendar() {
            Ok(date) => date,
            Err(err) => {
                log::warn!("cannot resolve today's date ({}); using current time", err);
                self.set_to_now(source);
                return false;
            }
        };

        let local = JulianDate::from_calendar(
            local_today.year,
            local_today.month,
            local_today.day,
            time.hour,
            time.minute,
            time.second,
        );
        self.set_instant(local.to_f64() - offset * JD_HOUR);
        true
    }

    /// Whether the simulated instant is within one second of the wall clock.
    ///
    /// The wall clock is only consulted again once the instant has moved by a
    /// quarter second or more since the previous check.
    pub fn is_now(&self, source: &dyn TimeSource) -> bool {
        if let Some((checked_jd, verdict)) = self.now_check.get() {
            if (checked_jd - self.jd).abs() < JD_SECOND / 4.0 {
                return verdict;
            }
        }
        let verdict = (self.jd - source.now_jd()).abs() < JD_SECOND;
        self.now_check.set(Some((self.jd, verdict)));
        verdict
    }
}

fn clamp_jd(jd: f64) -> f64 {
    jd.clamp(JD_MIN, JD_MAX)
}

fn step_up(rate: f64, factor: f64) -> f64 {
    if rate >= JD_SECOND {
        rate * factor
    } else if rate < -JD_SECOND {
        rate / factor
    } else if rate >= 0.0 {
        JD_SECOND
    } else {
        0.0
    }
}

fn step_down(rate: f64, factor: f64) -> f64 {
    if rate > JD_SECOND {
        rate / factor
    } else if rate <= -JD_SECOND {
        rate * factor
    } else if rate > 0.0 {
        0.0
    } else {
        -JD_SECOND
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{JD_DAY, JD_MINUTE};
    use crate::source::ManualTimeSource;
    use celestial_core::constants::J2000_JD;

    #[test]
    fn test_default_is_real_time() {
        let clock = SimulationClock::new();
        assert_eq!(clock.rate(), JD_SECOND);
        assert!(clock.is_real_time());
        assert_eq!(clock.jd(), J2000_JD);
    }

    #[test]
    fn test_ladder_from_rest() {
        let mut clock = SimulationClock::new();
        clock.set_rate(0.0);
        clock.increase_speed();
        assert_eq!(clock.rate(), JD_SECOND);
        clock.increase_speed();
        assert_eq!(clock.rate(), JD_SECOND * 10.0);
        clock.increase_speed();
        assert_eq!(clock.rate(), JD_SECOND * 10.0 * 10.0);
        assert!((clock.rate() - 0.0011574074).abs() < 1e-12);
    }

    #[test]
    fn test_three_increases_from_real_time() {
        let mut clock = SimulationClock::new();
        for _ in 0..3 {
            clock.increase_speed();
        }
        assert_eq!(clock.rate(), JD_SECOND * 10.0 * 10.0 * 10.0);
    }

    #[test]
    fn test_decrease_from_threshold_stops() {
        let mut clock = SimulationClock::new();
        clock.decrease_speed();
        assert_eq!(clock.rate(), 0.0);
        clock.decrease_speed();
        assert_eq!(clock.rate(), -JD_SECOND);
        clock.decrease_speed();
        assert_eq!(clock.rate(), -JD_SECOND * 10.0);
        clock.increase_speed();
        assert!((clock.rate() + JD_SECOND).abs() < 1e-20);

        clock.set_rate(-JD_SECOND);
        clock.increase_speed();
        assert_eq!(clock.rate(), 0.0);
    }

    #[test]
    fn test_small_rates_snap_to_threshold() {
        let mut clock = SimulationClock::new();
        clock.set_rate(JD_SECOND / 3.0);
        clock.increase_speed();
        assert_eq!(clock.rate(), JD_SECOND);

        clock.set_rate(JD_SECOND / 3.0);
        clock.decrease_speed();
        assert_eq!(clock.rate(), 0.0);

        clock.set_rate(-JD_SECOND / 3.0);
        clock.increase_speed();
        assert_eq!(clock.rate(), 0.0);
    }

    #[test]
    fn test_less_variants_use_factor_two() {
        let mut clock = SimulationClock::new();
        clock.increase_speed_less();
        assert_eq!(clock.rate(), JD_SECOND * 2.0);
        clock.decrease_speed_less();
        assert_eq!(clock.rate(), JD_SECOND);
        clock.set_rate(-JD_SECOND * 4.0);
        clock.increase_speed_less();
        assert_eq!(clock.rate(), -JD_SECOND * 2.0);
    }

    #[test]
    fn test_advance_is_additive_inside_bounds() {
        let mut split = SimulationClock::new();
        split.set_rate(0.5);
        split.advance(3.0);
        split.advance(5.0);

        let mut whole = SimulationClock::new();
        whole.set_rate(0.5);
        whole.advance(8.0);

        assert_eq!(split.jd(), whole.jd());
        assert_eq!(whole.jd(), J2000_JD + 4.0);
    }

    #[test]
    fn test_advance_clamps() {
        let mut clock = SimulationClock::new();
        clock.set_rate(1e9);
        clock.advance(1.0);
        assert_eq!(clock.jd(), JD_MAX);
        clock.set_rate(-1e9);
        clock.advance(1.0);
        assert_eq!(clock.jd(), JD_MIN);
        clock.set_instant(f64::MAX);
        assert_eq!(clock.jd(), JD_MAX);
    }

    #[test]
    fn test_set_to_now_keeps_rate() {
        let wall = ManualTimeSource::new(2_460_000.25, 0.0);
        let mut clock = SimulationClock::new();
        clock.set_rate(0.0);
        clock.set_to_now(&wall);
        assert_eq!(clock.jd(), 2_460_000.25);
        assert_eq!(clock.rate(), 0.0);
    }

    #[test]
    fn test_is_now_window_and_cache() {
        let wall = ManualTimeSource::new(2_460_000.0, 0.0);
        let mut clock = SimulationClock::new();
        clock.set_to_now(&wall);
        assert!(clock.is_now(&wall));

        // wall clock moves away but the instant did not: cached answer stands
        wall.advance_days(JD_SECOND * 5.0);
        assert!(clock.is_now(&wall));

        // instant moves a full second: re-checked against the new wall time
        clock.set_instant(clock.jd() + JD_SECOND);
        assert!(!clock.is_now(&wall));

        clock.set_instant(wall.now_jd());
        assert!(clock.is_now(&wall));
    }

    #[test]
    fn test_set_to_today_applies_local_offset() {
        // 2000-01-01 12:00 UTC, local clocks at UTC+2
        let wall = ManualTimeSource::new(J2000_JD, 2.0);
        let mut clock = SimulationClock::new();
        assert!(clock.set_to_today(&wall, "22:00"));
        // 22:00 local is 20:00 UTC
        assert!((clock.jd() - (J2000_JD + 8.0 / 24.0)).abs() < 1e-9);
    }

    #[test]
    fn test_set_to_today_uses_local_date() {
        // 2000-01-01 23:00 UTC is already Jan 2 at UTC+3
        let wall = ManualTimeSource::new(J2000_JD + 11.0 / 24.0, 3.0);
        let mut clock = SimulationClock::new();
        assert!(clock.set_to_today(&wall, "06:00"));
        // 2000-01-02 06:00 local = 03:00 UTC
        assert!((clock.jd() - (J2000_JD + 15.0 / 24.0)).abs() < 1e-9);
    }

    #[test]
    fn test_set_to_today_invalid_falls_back_to_now() {
        let _ = env_logger::builder().is_test(true).try_init();
        let wall = ManualTimeSource::new(2_455_000.75, 1.0);
        let mut clock = SimulationClock::new();
        assert!(!clock.set_to_today(&wall, "27:99"));
        assert_eq!(clock.jd(), 2_455_000.75);
    }

    #[test]
    fn test_set_to_preset_subtracts_offset() {
        let wall = ManualTimeSource::new(0.0, -5.0);
        let mut clock = SimulationClock::new();
        clock.set_to_preset(&wall, J2000_JD);
        assert!((clock.jd() - (J2000_JD + 5.0 * JD_HOUR)).abs() < 1e-12);
    }

    #[test]
    fn test_add_solar_days() {
        let mut clock = SimulationClock::new();
        clock.add_solar_days(-1.5);
        assert_eq!(clock.jd(), J2000_JD - 1.5 * JD_DAY);
        clock.add_solar_days(1e9);
        assert_eq!(clock.jd(), JD_MAX);
    }

    #[test]
    fn test_set_to_today_keeps_minutes_after_wall_moves() {
        let wall = ManualTimeSource::new(J2000_JD, 0.0);
        let mut clock = SimulationClock::new();
        assert!(clock.set_to_today(&wall, "18:45"));
        assert!((clock.jd() - (J2000_JD + 6.0 * JD_HOUR + 45.0 * JD_MINUTE)).abs() < 1e-9);

        // Next local day once the offset pushes the wall past midnight.
        wall.set_now(J2000_JD + 11.5 * JD_HOUR);
        wall.set_utc_offset_hours(1.0);
        assert!(clock.set_to_today(&wall, "00:30"));
        let expected = J2000_JD + JD_DAY - 12.0 * JD_HOUR + 30.0 * JD_MINUTE - JD_HOUR;
        assert!((clock.jd() - expected).abs() < 1e-9, "jd = {}", clock.jd());
    }
}
