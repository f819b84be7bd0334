use std::fmt::Write as _;

use chrono::{
    DateTime, Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Weekday,
};
use tracing::warn;

use crate::core::scale::{LinearScale, extent};
use crate::core::ticks::{nice_ticks, tick_step};

const SECOND_MS: f64 = 1_000.0;
const MINUTE_MS: f64 = 60.0 * SECOND_MS;
const HOUR_MS: f64 = 60.0 * MINUTE_MS;
const DAY_MS: f64 = 24.0 * HOUR_MS;
const WEEK_MS: f64 = 7.0 * DAY_MS;
const MONTH_MS: f64 = 30.0 * DAY_MS;
const YEAR_MS: f64 = 365.0 * DAY_MS;

/// Upper bound on candidate instants visited while generating ticks.
const MAX_TICK_CANDIDATES: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

/// A calendar interval such as "every 15 minutes" or "every 3 months".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub unit: TimeUnit,
    pub step: u32,
}

impl TimeInterval {
    #[must_use]
    pub const fn new(unit: TimeUnit, step: u32) -> Self {
        Self { unit, step }
    }
}

const INTERVAL_LADDER: [(TimeInterval, f64); 18] = [
    (TimeInterval::new(TimeUnit::Second, 1), SECOND_MS),
    (TimeInterval::new(TimeUnit::Second, 5), 5.0 * SECOND_MS),
    (TimeInterval::new(TimeUnit::Second, 15), 15.0 * SECOND_MS),
    (TimeInterval::new(TimeUnit::Second, 30), 30.0 * SECOND_MS),
    (TimeInterval::new(TimeUnit::Minute, 1), MINUTE_MS),
    (TimeInterval::new(TimeUnit::Minute, 5), 5.0 * MINUTE_MS),
    (TimeInterval::new(TimeUnit::Minute, 15), 15.0 * MINUTE_MS),
    (TimeInterval::new(TimeUnit::Minute, 30), 30.0 * MINUTE_MS),
    (TimeInterval::new(TimeUnit::Hour, 1), HOUR_MS),
    (TimeInterval::new(TimeUnit::Hour, 3), 3.0 * HOUR_MS),
    (TimeInterval::new(TimeUnit::Hour, 6), 6.0 * HOUR_MS),
    (TimeInterval::new(TimeUnit::Hour, 12), 12.0 * HOUR_MS),
    (TimeInterval::new(TimeUnit::Day, 1), DAY_MS),
    (TimeInterval::new(TimeUnit::Day, 2), 2.0 * DAY_MS),
    (TimeInterval::new(TimeUnit::Week, 1), WEEK_MS),
    (TimeInterval::new(TimeUnit::Month, 1), MONTH_MS),
    (TimeInterval::new(TimeUnit::Month, 3), 3.0 * MONTH_MS),
    (TimeInterval::new(TimeUnit::Year, 1), YEAR_MS),
];

/// Time axis over epoch milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    #[must_use]
    pub fn new(domain_ms: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            linear: LinearScale::new(domain_ms, range),
        }
    }

    #[must_use]
    pub fn from_extent(values_ms: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Self {
        Self::new(extent(values_ms).unwrap_or((0.0, 0.0)), range)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn map(self, time_ms: f64) -> f64 {
        self.linear.map(time_ms)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }

    /// Calendar-aligned tick instants inside the domain.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        let (start, stop) = self.domain();
        if count == 0 {
            return Vec::new();
        }
        if start == stop {
            return vec![start];
        }
        let reverse = stop < start;
        let (low, high) = if reverse { (stop, start) } else { (start, stop) };

        let mut ticks = match choose_interval(low, high, count) {
            Some(interval) => calendar_ticks(low, high, interval),
            None => nice_ticks(low, high, count)
                .into_iter()
                .filter(|tick| tick.fract() == 0.0)
                .collect(),
        };
        if reverse {
            ticks.reverse();
        }
        ticks
    }

    #[must_use]
    pub fn tick_labels(ticks: &[f64]) -> Vec<String> {
        ticks.iter().map(|tick| multi_scale_label(*tick)).collect()
    }
}

/// Picks the ladder interval closest to `span / count`; `None` means the
/// span is below one second and plain millisecond ticks apply.
#[must_use]
pub fn choose_interval(start_ms: f64, stop_ms: f64, count: usize) -> Option<TimeInterval> {
    let target = (stop_ms - start_ms).abs() / count.max(1) as f64;
    let index = INTERVAL_LADDER.partition_point(|(_, duration)| *duration <= target);
    if index == INTERVAL_LADDER.len() {
        let years = tick_step(start_ms / YEAR_MS, stop_ms / YEAR_MS, count)
            .abs()
            .max(1.0);
        return Some(TimeInterval::new(TimeUnit::Year, years.round() as u32));
    }
    if index == 0 {
        return None;
    }
    let (previous, previous_ms) = INTERVAL_LADDER[index - 1];
    let (next, next_ms) = INTERVAL_LADDER[index];
    Some(if target / previous_ms < next_ms / target {
        previous
    } else {
        next
    })
}

fn calendar_ticks(start_ms: f64, stop_ms: f64, interval: TimeInterval) -> Vec<f64> {
    let Some(mut current) = from_epoch_ms(start_ms).and_then(|dt| floor_unit(dt, interval.unit))
    else {
        return Vec::new();
    };

    let mut ticks = Vec::new();
    for _ in 0..MAX_TICK_CANDIDATES {
        let at = to_epoch_ms(current);
        if at > stop_ms {
            break;
        }
        if at >= start_ms && is_aligned(current, interval) {
            ticks.push(at);
        }
        match step_unit(current, interval.unit) {
            Some(next) => current = next,
            None => break,
        }
    }
    ticks
}

fn floor_unit(dt: NaiveDateTime, unit: TimeUnit) -> Option<NaiveDateTime> {
    let date = dt.date();
    match unit {
        TimeUnit::Second => date.and_hms_opt(dt.hour(), dt.minute(), dt.second()),
        TimeUnit::Minute => date.and_hms_opt(dt.hour(), dt.minute(), 0),
        TimeUnit::Hour => date.and_hms_opt(dt.hour(), 0, 0),
        TimeUnit::Day => date.and_hms_opt(0, 0, 0),
        TimeUnit::Week => {
            let back = i64::from(date.weekday().num_days_from_sunday());
            date.checked_sub_signed(TimeDelta::days(back))?
                .and_hms_opt(0, 0, 0)
        }
        TimeUnit::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?.and_hms_opt(0, 0, 0),
        TimeUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)?.and_hms_opt(0, 0, 0),
    }
}

fn step_unit(dt: NaiveDateTime, unit: TimeUnit) -> Option<NaiveDateTime> {
    match unit {
        TimeUnit::Second => dt.checked_add_signed(TimeDelta::seconds(1)),
        TimeUnit::Minute => dt.checked_add_signed(TimeDelta::minutes(1)),
        TimeUnit::Hour => dt.checked_add_signed(TimeDelta::hours(1)),
        TimeUnit::Day => dt.checked_add_signed(TimeDelta::days(1)),
        TimeUnit::Week => dt.checked_add_signed(TimeDelta::weeks(1)),
        TimeUnit::Month => dt.checked_add_months(Months::new(1)),
        TimeUnit::Year => dt.checked_add_months(Months::new(12)),
    }
}

fn is_aligned(dt: NaiveDateTime, interval: TimeInterval) -> bool {
    let step = interval.step.max(1);
    match interval.unit {
        TimeUnit::Second => dt.second() % step == 0,
        TimeUnit::Minute => dt.minute() % step == 0,
        TimeUnit::Hour => dt.hour() % step == 0,
        TimeUnit::Day => (dt.day() - 1) % step == 0,
        TimeUnit::Week => true,
        TimeUnit::Month => dt.month0() % step == 0,
        TimeUnit::Year => dt.year().rem_euclid(step as i32) == 0,
    }
}

/// Label for a tick, using the coarsest calendar field that is non-zero.
fn multi_scale_label(time_ms: f64) -> String {
    let Some(dt) = from_epoch_ms(time_ms) else {
        return String::new();
    };
    let pattern = if dt.nanosecond() != 0 {
        "%.3f"
    } else if dt.second() != 0 {
        ":%S"
    } else if dt.minute() != 0 {
        "%I:%M"
    } else if dt.hour() != 0 {
        "%I %p"
    } else if dt.day() != 1 {
        if dt.weekday() == Weekday::Sun {
            "%b %d"
        } else {
            "%a %d"
        }
    } else if dt.month() != 1 {
        "%B"
    } else {
        "%Y"
    };
    dt.format(pattern).to_string()
}

#[must_use]
pub fn from_epoch_ms(time_ms: f64) -> Option<NaiveDateTime> {
    if !time_ms.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(time_ms.round() as i64).map(|dt| dt.naive_utc())
}

#[must_use]
pub fn to_epoch_ms(dt: NaiveDateTime) -> f64 {
    dt.and_utc().timestamp_millis() as f64
}

/// Parses the timestamp strings accepted in scatter data.
///
/// Offset-less forms are read as UTC.
#[must_use]
pub fn parse_timestamp_ms(text: &str) -> Option<f64> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis() as f64);
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(to_epoch_ms(dt));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(to_epoch_ms)
}

const DAYJS_TOKENS: [(&str, &str); 24] = [
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("M", "%-m"),
    ("DD", "%d"),
    ("D", "%-d"),
    ("dddd", "%A"),
    ("ddd", "%a"),
    ("dd", "%a"),
    ("d", "%w"),
    ("HH", "%H"),
    ("H", "%-H"),
    ("hh", "%I"),
    ("h", "%-I"),
    ("mm", "%M"),
    ("m", "%-M"),
    ("ss", "%S"),
    ("s", "%-S"),
    ("SSS", "%3f"),
    ("A", "%p"),
    ("ZZ", "%z"),
    ("Z", "%:z"),
];

/// Translates a dayjs-style pattern (`YYYY-MM-DD HH:mm`) into a chrono
/// format string. `[...]` escapes literal text.
#[must_use]
pub fn translate_time_format(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;
    'outer: while let Some(first) = rest.chars().next() {
        if first == '[' {
            if let Some(end) = rest.find(']') {
                push_literal(&mut out, &rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }
        for (token, replacement) in DAYJS_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(replacement);
                rest = tail;
                continue 'outer;
            }
        }
        if first == 'a' {
            out.push_str("%P");
        } else {
            push_literal(&mut out, &rest[..first.len_utf8()]);
        }
        rest = &rest[first.len_utf8()..];
    }
    out
}

fn push_literal(out: &mut String, literal: &str) {
    for ch in literal.chars() {
        if ch == '%' {
            out.push_str("%%");
        } else {
            out.push(ch);
        }
    }
}

/// Formats an epoch-millisecond instant with a dayjs-style pattern, in UTC.
#[must_use]
pub fn format_timestamp(time_ms: f64, pattern: &str) -> String {
    let Some(dt) = from_epoch_ms(time_ms) else {
        return String::new();
    };
    let translated = translate_time_format(pattern);
    let mut out = String::new();
    // offset tokens need a zoned value
    if write!(out, "{}", dt.and_utc().format(&translated)).is_err() {
        warn!(pattern, "time format not renderable, leaving the text empty");
        out.clear();
    }
    out
}
