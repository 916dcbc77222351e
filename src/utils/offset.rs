//! Compact offsets such as `12d` or `1M`, used to decide how far back a scheduled scan looks.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Months, TimeDelta, Utc};
use itertools::Itertools;
use thiserror::Error;

/// Unit of an [`Offset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OffsetUnit {
    Hour,
    Day,
    Month,
}

impl OffsetUnit {
    const ALL: [OffsetUnit; 3] = [OffsetUnit::Hour, OffsetUnit::Day, OffsetUnit::Month];

    pub fn letter(self) -> char {
        match self {
            OffsetUnit::Hour => 'H',
            OffsetUnit::Day => 'd',
            OffsetUnit::Month => 'M',
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|unit| unit.letter() == letter)
    }
}

/// A span of time going back from now, written as `<magnitude><unit>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Offset {
    pub magnitude: u32,
    pub unit: OffsetUnit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OffsetParseError {
    #[error("`{0}` is not an offset, expected one or more digits followed by a unit, e.g. `12d`")]
    Malformed(String),
    #[error("`{token}` has an unknown unit `{unit}`, expected one of {expected}")]
    UnknownUnit {
        token: String,
        unit: char,
        expected: String,
    },
    #[error("`{0}` must have a positive magnitude")]
    ZeroMagnitude(String),
    #[error("`{0}` has a magnitude that is too large")]
    MagnitudeOverflow(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Cannot go back {offset} from {instant}")]
pub struct OffsetRangeError {
    offset: Offset,
    instant: DateTime<Utc>,
}

/// Parses a token such as `12d`. Nothing but the digits and the unit letter is allowed.
pub fn parse_offset(token: &str) -> Result<Offset, OffsetParseError> {
    let malformed = || OffsetParseError::Malformed(token.to_string());

    let digits_end = token
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(malformed)?;
    let (digits, rest) = token.split_at(digits_end);
    if digits.is_empty() {
        return Err(malformed());
    }

    let mut rest = rest.chars();
    let (Some(letter), None) = (rest.next(), rest.next()) else {
        return Err(malformed());
    };
    let unit = OffsetUnit::from_letter(letter).ok_or_else(|| OffsetParseError::UnknownUnit {
        token: token.to_string(),
        unit: letter,
        expected: OffsetUnit::ALL
            .iter()
            .map(|unit| format!("`{}`", unit.letter()))
            .join(", "),
    })?;

    let magnitude: u32 = digits
        .parse()
        .map_err(|_| OffsetParseError::MagnitudeOverflow(token.to_string()))?;
    if magnitude == 0 {
        return Err(OffsetParseError::ZeroMagnitude(token.to_string()));
    }
    Ok(Offset { magnitude, unit })
}

/// Returns the instant that lies `offset` before `now`.
///
/// Hours and days are exact durations. Months follow the calendar and keep the day of month,
/// clamped to the last day of shorter months (e.g. one month before March 31st is the last day
/// of February).
pub fn offset_instant(
    now: DateTime<Utc>,
    offset: Offset,
) -> Result<DateTime<Utc>, OffsetRangeError> {
    let magnitude = i64::from(offset.magnitude);
    let instant = match offset.unit {
        OffsetUnit::Hour => {
            TimeDelta::try_hours(magnitude).and_then(|delta| now.checked_sub_signed(delta))
        }
        OffsetUnit::Day => {
            TimeDelta::try_days(magnitude).and_then(|delta| now.checked_sub_signed(delta))
        }
        OffsetUnit::Month => now.checked_sub_months(Months::new(offset.magnitude)),
    };
    instant.ok_or(OffsetRangeError {
        offset,
        instant: now,
    })
}

impl Offset {
    /// The instant that lies this offset before `now`.
    pub fn before(self, now: DateTime<Utc>) -> Result<DateTime<Utc>, OffsetRangeError> {
        offset_instant(now, self)
    }
}

impl FromStr for Offset {
    type Err = OffsetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_offset(s)
    }
}

impl Display for Offset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit.letter())
    }
}
