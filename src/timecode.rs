use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

// @module: Clamped caption time values

/// One of the four fields of a time code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeCodeField {
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
}

impl TimeCodeField {
    /// Largest valid value for the field (the smallest is always 0)
    pub const fn max(self) -> u32 {
        match self {
            Self::Hours => TimeCode::MAX_HOURS,
            Self::Minutes => TimeCode::MAX_MINUTES,
            Self::Seconds => TimeCode::MAX_SECONDS,
            Self::Milliseconds => TimeCode::MAX_MILLISECONDS,
        }
    }

    /// Lowercase field name
    pub fn name(self) -> &'static str {
        match self {
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
            Self::Milliseconds => "milliseconds",
        }
    }

    // @returns: Value forced into 0..=max
    fn clamp(self, value: i64) -> u32 {
        value.clamp(0, i64::from(self.max())) as u32
    }
}

impl fmt::Display for TimeCodeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Record of a field that was out of range and got clamped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldClamp {
    /// Which field
    pub field: TimeCodeField,
    /// The value that was asked for
    pub requested: i64,
    /// The value that was stored
    pub clamped_to: u32,
}

impl fmt::Display for FieldClamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "incorrect {} value {}: must be in range of 0 to {} (inclusive), clamped to {}",
            self.field,
            self.requested,
            self.field.max(),
            self.clamped_to
        )
    }
}

/// A time code built from possibly out-of-range fields
#[derive(Debug, Clone, PartialEq)]
pub struct ClampedTimeCode {
    /// The stored, always valid, time code
    pub time_code: TimeCode,
    /// One record per field that had to be clamped
    pub clamps: Vec<FieldClamp>,
}

impl ClampedTimeCode {
    /// Whether every field was already within range
    pub fn is_exact(&self) -> bool {
        self.clamps.is_empty()
    }
}

/// Hours/minutes/seconds/milliseconds value where every field is in range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct TimeCode {
    hours: u32,
    minutes: u32,
    seconds: u32,
    milliseconds: u32,
}

impl TimeCode {
    pub const MAX_HOURS: u32 = 23;
    pub const MAX_MINUTES: u32 = 59;
    pub const MAX_SECONDS: u32 = 59;
    pub const MAX_MILLISECONDS: u32 = 999;

    /// Build a time code, clamping each field independently.
    ///
    /// Construction never fails. Every field outside its range is forced to
    /// the nearest bound and reported in `clamps`, one record per field.
    pub fn clamped(hours: i64, minutes: i64, seconds: i64, milliseconds: i64) -> ClampedTimeCode {
        let mut clamps = Vec::new();
        let mut field = |field: TimeCodeField, value: i64| {
            let clamped_to = field.clamp(value);
            if i64::from(clamped_to) != value {
                clamps.push(FieldClamp {
                    field,
                    requested: value,
                    clamped_to,
                });
            }
            clamped_to
        };

        let time_code = TimeCode {
            hours: field(TimeCodeField::Hours, hours),
            minutes: field(TimeCodeField::Minutes, minutes),
            seconds: field(TimeCodeField::Seconds, seconds),
            milliseconds: field(TimeCodeField::Milliseconds, milliseconds),
        };

        ClampedTimeCode { time_code, clamps }
    }

    /// Build a time code, silently clamping out-of-range fields
    pub fn new(hours: u32, minutes: u32, seconds: u32, milliseconds: u32) -> Self {
        Self::clamped(
            i64::from(hours),
            i64::from(minutes),
            i64::from(seconds),
            i64::from(milliseconds),
        )
        .time_code
    }

    /// Time code for a whole number of seconds (handy in tests and tools)
    pub fn from_seconds(total: u32) -> Self {
        Self::new(total / 3600, (total / 60) % 60, total % 60, 0)
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn milliseconds(&self) -> u32 {
        self.milliseconds
    }

    /// Value of a single field
    pub fn get(&self, field: TimeCodeField) -> u32 {
        match field {
            TimeCodeField::Hours => self.hours,
            TimeCodeField::Minutes => self.minutes,
            TimeCodeField::Seconds => self.seconds,
            TimeCodeField::Milliseconds => self.milliseconds,
        }
    }

    /// Elapsed milliseconds since 00:00:00.000
    pub fn total_millis(&self) -> u64 {
        u64::from(self.hours) * 3_600_000
            + u64::from(self.minutes) * 60_000
            + u64::from(self.seconds) * 1_000
            + u64::from(self.milliseconds)
    }

    /// Elapsed seconds: hours*3600 + minutes*60 + seconds + milliseconds/1000
    pub fn total_seconds(&self) -> f64 {
        self.total_millis() as f64 / 1000.0
    }
}

impl fmt::Display for TimeCode {
    // SRT rendering, HH:MM:SS,mmm
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            self.hours, self.minutes, self.seconds, self.milliseconds
        )
    }
}

impl Ord for TimeCode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_millis().cmp(&other.total_millis())
    }
}

impl PartialOrd for TimeCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
