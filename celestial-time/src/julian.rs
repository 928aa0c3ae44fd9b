use crate::constants::{SECONDS_TO_DAYS, UNIX_EPOCH_JD};
use crate::{TimeError, TimeResult};
use celestial_core::constants::{J2000_JD, MJD_ZERO_POINT, SECONDS_PER_DAY_F64};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JulianDate {
    pub jd1: f64,
    pub jd2: f64,
}

/// Gregorian calendar date with the time of day as a fraction of a day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub day_fraction: f64,
}

impl CalendarDate {
    /// Splits the day fraction into hours, minutes and seconds.
    pub fn hms(&self) -> (u8, u8, f64) {
        let seconds = self.day_fraction * SECONDS_PER_DAY_F64;
        let hour = (seconds / 3600.0).floor();
        let minute = ((seconds - hour * 3600.0) / 60.0).floor();
        let second = seconds - hour * 3600.0 - minute * 60.0;
        (hour as u8, minute as u8, second)
    }
}

impl JulianDate {
    pub fn new(jd1: f64, jd2: f64) -> Self {
        Self { jd1, jd2 }
    }

    pub fn from_f64(jd: f64) -> Self {
        Self::new(jd, 0.0)
    }

    pub fn j2000() -> Self {
        Self::new(J2000_JD, 0.0)
    }

    pub fn unix_epoch() -> Self {
        Self::new(UNIX_EPOCH_JD, 0.0)
    }

    pub fn to_f64(&self) -> f64 {
        self.jd1 + self.jd2
    }

    pub fn add_days(&self, days: f64) -> Self {
        Self::new(self.jd1, self.jd2 + days)
    }

    pub fn add_seconds(&self, seconds: f64) -> Self {
        self.add_days(seconds * SECONDS_TO_DAYS)
    }

    pub fn from_calendar(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: f64) -> Self {
        // eraCal2jd: jd1 holds midnight, jd2 the fraction of day
        let my = (month as i32 - 14) / 12;
        let iypmy = year + my;

        let mjd = ((1461 * (iypmy + 4800)) / 4 + (367 * (month as i32 - 2 - 12 * my)) / 12
            - (3 * ((iypmy + 4900) / 100)) / 4
            + day as i32
            - 2432076) as f64;

        let jd1 = MJD_ZERO_POINT + mjd;
        let jd2 = (60.0 * (60 * hour as i32 + minute as i32) as f64 + second) / SECONDS_PER_DAY_F64;

        Self::new(jd1, jd2)
    }

    /// Converts back to a Gregorian calendar date.
    ///
    /// # Errors
    ///
    /// [`TimeError::ConversionError`] before JD -68569.5, where the integer
    /// algorithm breaks down, or for non-finite input.
    pub fn to_calendar(&self) -> TimeResult<CalendarDate> {
        const DJMIN: f64 = -68569.5;
        const DJMAX: f64 = 1e9;

        let dj = self.to_f64();
        if !(DJMIN..=DJMAX).contains(&dj) {
            return Err(TimeError::ConversionError(format!(
                "Julian Date {} out of valid range [{}, {}]",
                dj, DJMIN, DJMAX
            )));
        }

        // Keep the two parts apart until the integer day is known.
        let whole1 = self.jd1.floor();
        let whole2 = self.jd2.floor();
        let frac = (self.jd1 - whole1) + (self.jd2 - whole2) + 0.5;
        let carry = frac.floor();
        let jdn = (whole1 + whole2 + carry) as i64;
        let day_fraction = frac - carry;

        let mut l = jdn + 68569;
        let n = (4 * l) / 146097;
        l -= (146097 * n + 3) / 4;
        let i = (4000 * (l + 1)) / 1461001;
        l -= (1461 * i) / 4 - 31;
        let k = (80 * l) / 2447;
        let day = (l - (2447 * k) / 80) as u8;
        let l_final = k / 11;
        let month = (k + 2 - 12 * l_final) as u8;
        let year = (100 * (n - 49) + i + l_final) as i32;

        Ok(CalendarDate {
            year,
            month,
            day,
            day_fraction,
        })
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, minute, second) = self.hms();
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:06.3}",
            self.year, self.month, self.day, hour, minute, second
        )
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.9}", self.to_f64())
    }
}

impl From<f64> for JulianDate {
    fn from(jd: f64) -> Self {
        Self::from_f64(jd)
    }
}
