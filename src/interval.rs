use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Minutes in the 365-day year the time index assumes. Leap days are not
/// accounted for.
pub const MINUTES_PER_YEAR: u32 = 60 * 24 * 365;

/// Sampling interval of an NSRDB file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    ThirtyMinutes,
    Hourly,
}

impl Interval {
    pub fn minutes(self) -> u32 {
        match self {
            Interval::ThirtyMinutes => 30,
            Interval::Hourly        => 60,
        }
    }

    /// Rows in one (365-day) year at this interval.
    pub fn periods(self) -> usize {
        (MINUTES_PER_YEAR / self.minutes()) as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalDetection {
    Recognized(Interval),
    Unrecognized,
}

impl IntervalDetection {
    pub fn interval(self) -> Option<Interval> {
        match self {
            IntervalDetection::Recognized(i) => Some(i),
            IntervalDetection::Unrecognized  => None,
        }
    }
}

/// Infers the interval from the first two values of the `Minute` column:
/// a step of 30 is half-hourly, an unchanged minute is hourly.
pub fn detect_interval(minutes: &[f64]) -> IntervalDetection {
    let (m0, m1) = match minutes {
        [m0, m1, ..] => (*m0, *m1),
        _ => return IntervalDetection::Unrecognized,
    };
    let diff = m1 - m0;
    if diff == 30.0 {
        IntervalDetection::Recognized(Interval::ThirtyMinutes)
    } else if diff == 0.0 {
        IntervalDetection::Recognized(Interval::Hourly)
    } else {
        IntervalDetection::Unrecognized
    }
}

/// `interval.periods()` timestamps from Jan 1 00:00 of `year`. `None` if
/// the year is outside chrono's range.
pub fn time_index(year: i32, interval: Interval) -> Option<Vec<NaiveDateTime>> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)?;
    let step  = Duration::minutes(i64::from(interval.minutes()));
    let mut out = Vec::with_capacity(interval.periods());
    let mut t = start;
    for _ in 0..interval.periods() {
        out.push(t);
        t = t.checked_add_signed(step)?;
    }
    Some(out)
}
