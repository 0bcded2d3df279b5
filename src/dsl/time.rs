use std::fmt;

/// Failure while parsing a `[[H:]M:]S` time literal.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    /// More than three colon-separated fields.
    #[error("bad time format '{0}'")]
    Format(String),
    /// Hour field is not a non-negative integer.
    #[error("bad hour value '{0}'")]
    Hour(String),
    /// Minute field is not a non-negative integer.
    #[error("bad minute value '{0}'")]
    Minute(String),
    /// Seconds field is not a finite, non-negative number.
    #[error("bad second value '{0}'")]
    Second(String),
}

/// Offset from the start of the media.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Time {
    /// Whole hours.
    pub hour: u32,
    /// Whole minutes.
    pub minute: u32,
    /// Seconds, possibly fractional.
    pub second: f64,
}

impl Time {
    /// The media start.
    pub const ZERO: Time = Time {
        hour: 0,
        minute: 0,
        second: 0.0,
    };

    /// Build from parts.
    pub fn new(hour: u32, minute: u32, second: f64) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Parse a time literal such as `1:32`, `2:19.85`, `1:02:03.5` or `45`.
    ///
    /// Empty subfields read as zero (`:30` is thirty seconds). A blank string is the zero
    /// time, not an error.
    pub fn parse(raw: &str) -> Result<Self, TimeParseError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::ZERO);
        }

        let parts: Vec<&str> = raw
            .split(':')
            .map(|p| if p.is_empty() { "00" } else { p })
            .collect();

        let (hour, minute, sec_raw) = match parts.as_slice() {
            [s] => (0, 0, *s),
            [m, s] => (0, parse_field(m, TimeParseError::Minute)?, *s),
            [h, m, s] => (
                parse_field(h, TimeParseError::Hour)?,
                parse_field(m, TimeParseError::Minute)?,
                *s,
            ),
            _ => return Err(TimeParseError::Format(raw.to_owned())),
        };

        let second: f64 = sec_raw
            .parse()
            .map_err(|_| TimeParseError::Second(sec_raw.to_owned()))?;
        if !second.is_finite() || second < 0.0 {
            return Err(TimeParseError::Second(sec_raw.to_owned()));
        }

        Ok(Self::new(hour, minute, second))
    }

    /// Offset in seconds.
    pub fn total_seconds(&self) -> f64 {
        f64::from(self.hour) * 3600.0 + f64::from(self.minute) * 60.0 + self.second
    }

    /// Seconds with two decimals, as written into filter graphs.
    pub fn seconds_string(&self) -> String {
        format!("{:.2}", self.total_seconds())
    }

    /// True when [`Time::seconds_string`] would print `0.00`.
    pub fn renders_as_zero(&self) -> bool {
        (self.total_seconds() * 100.0).round() == 0.0
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hour > 0 {
            write!(f, "{}:{:02}:{:05.2}", self.hour, self.minute, self.second)
        } else {
            write!(f, "{}:{:05.2}", self.minute, self.second)
        }
    }
}

fn parse_field(raw: &str, err: fn(String) -> TimeParseError) -> Result<u32, TimeParseError> {
    raw.parse().map_err(|_| err(raw.to_owned()))
}

#[cfg(test)]
#[path = "../../tests/unit/dsl/time.rs"]
mod tests;
