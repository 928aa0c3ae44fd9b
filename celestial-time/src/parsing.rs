use crate::{JulianDate, TimeError, TimeResult};

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDateTime {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: f64,
}

impl ParsedDateTime {
    pub fn to_julian_date(&self) -> JulianDate {
        JulianDate::from_calendar(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        )
    }
}

/// Wall-clock time of day, as read from a `"HH:MM"` or `"HH:MM:SS"` string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: f64,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8, second: f64) -> TimeResult<Self> {
        if hour > 23 || minute > 59 || !(0.0..60.0).contains(&second) {
            return Err(TimeError::InvalidTimeOfDay(format!(
                "{:02}:{:02}:{:06.3}",
                hour, minute, second
            )));
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }
}

const MAX_ISO8601_LENGTH: usize = 32;

fn parse_digits(text: &str, what: &str, widths: std::ops::RangeInclusive<usize>) -> TimeResult<u32> {
    if !widths.contains(&text.len()) || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeError::ParseError(format!("Invalid {}: '{}'", what, text)));
    }
    Ok(text
        .bytes()
        .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0')))
}

fn parse_date(date_part: &str) -> TimeResult<(i32, u8, u8)> {
    let fields: Vec<&str> = date_part.split('-').collect();
    if fields.len() != 3 {
        return Err(TimeError::ParseError(format!(
            "Invalid date format: '{}'. Expected YYYY-MM-DD",
            date_part
        )));
    }
    let year = parse_digits(fields[0], "year", 4..=4)? as i32;
    let month = parse_digits(fields[1], "month", 1..=2)? as u8;
    let day = parse_digits(fields[2], "day", 1..=2)? as u8;

    if !(1..=12).contains(&month) {
        return Err(TimeError::ParseError(format!("Month out of range: {}", month)));
    }
    if !(1..=31).contains(&day) {
        return Err(TimeError::ParseError(format!("Day out of range: {}", day)));
    }
    Ok((year, month, day))
}

fn parse_clock(time_part: &str, require_seconds: bool) -> TimeResult<(u8, u8, f64)> {
    let fields: Vec<&str> = time_part.split(':').collect();
    let valid_count = if require_seconds {
        fields.len() == 3
    } else {
        fields.len() == 2 || fields.len() == 3
    };
    if !valid_count {
        return Err(TimeError::ParseError(format!(
            "Invalid time format: '{}'",
            time_part
        )));
    }

    let hour = parse_digits(fields[0], "hour", 1..=2)? as u8;
    let minute = parse_digits(fields[1], "minute", 1..=2)? as u8;
    let second = match fields.get(2) {
        Some(text) => text
            .parse::<f64>()
            .map_err(|_| TimeError::ParseError(format!("Invalid second: '{}'", text)))?,
        None => 0.0,
    };

    if hour > 23 {
        return Err(TimeError::ParseError(format!("Hour out of range: {}", hour)));
    }
    if minute > 59 {
        return Err(TimeError::ParseError(format!("Minute out of range: {}", minute)));
    }
    if !(0.0..60.0).contains(&second) {
        return Err(TimeError::ParseError(format!("Second out of range: {}", second)));
    }
    Ok((hour, minute, second))
}

/// Parses `YYYY-MM-DDTHH:MM:SS[.fff][Z]`, with `T` or a space as separator.
pub fn parse_iso8601(s: &str) -> TimeResult<ParsedDateTime> {
    let s = s.trim();
    if s.len() > MAX_ISO8601_LENGTH {
        return Err(TimeError::ParseError("Input too long".to_string()));
    }
    let s = s.strip_suffix('Z').unwrap_or(s);

    let separator_pos = s.find('T').or_else(|| s.find(' ')).ok_or_else(|| {
        TimeError::ParseError(format!(
            "Invalid datetime format: '{}'. Expected YYYY-MM-DDTHH:MM:SS",
            s
        ))
    })?;
    let (date_part, rest) = s.split_at(separator_pos);

    let (year, month, day) = parse_date(date_part)?;
    let (hour, minute, second) = parse_clock(&rest[1..], true)?;

    Ok(ParsedDateTime {
        year,
        month,
        day,
        hour,
        minute,
        second,
    })
}

/// Accepts a full ISO-8601 datetime, a datetime without seconds, or a bare date
/// (read as midnight).
pub fn parse_date_or_datetime(s: &str) -> TimeResult<ParsedDateTime> {
    let trimmed = s.trim();
    if trimmed.len() > MAX_ISO8601_LENGTH {
        return Err(TimeError::ParseError("Input too long".to_string()));
    }
    let body = trimmed.strip_suffix('Z').unwrap_or(trimmed);

    match body.find('T').or_else(|| body.find(' ')) {
        Some(pos) => {
            let (year, month, day) = parse_date(&body[..pos])?;
            let (hour, minute, second) = parse_clock(&body[pos + 1..], false)?;
            Ok(ParsedDateTime {
                year,
                month,
                day,
                hour,
                minute,
                second,
            })
        }
        None => {
            let (year, month, day) = parse_date(body)?;
            Ok(ParsedDateTime {
                year,
                month,
                day,
                hour: 0,
                minute: 0,
                second: 0.0,
            })
        }
    }
}

/// Parses `"HH:MM"` or `"HH:MM:SS"`.
pub fn parse_time_of_day(s: &str) -> TimeResult<TimeOfDay> {
    let (hour, minute, second) = parse_clock(s.trim(), false)
        .map_err(|e| TimeError::InvalidTimeOfDay(format!("'{}': {}", s, e)))?;
    TimeOfDay::new(hour, minute, second)
}
