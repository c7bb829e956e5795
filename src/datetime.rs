//! Date-string validation
//!
//! Accepts the date shapes commonly seen in pasted API payloads:
//!
//! - `yyyy-M-d` / `yyyy-MM-dd` with `-` or `/` separators
//! - `d/M/yyyy` (day first)
//! - any of the above followed by `" HH:mm:ss"`
//! - any of the above followed by an ISO time part
//!   `THH:mm:ss[.fff][Z|±HH:mm]`
//!
//! Validation is calendar-exact: month/day ranges are checked against the
//! actual days in that month (leap-year aware), so overflow dates such as
//! `2024-02-30` are rejected.

use chrono::{NaiveDate, NaiveTime};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// ISO time suffix: `THH:mm:ss[.fff][Z|±HH:mm]`, anchored at end of input
static ISO_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"T(\d{2}):(\d{2}):(\d{2})(?:\.(\d{1,3}))?(Z|[+-]\d{2}:?\d{2})?$").unwrap()
});

/// Year-first date, optional space-separated time
static DATE_YMD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<y>\d{4})[-/](?P<m>0?[1-9]|1[0-2])[-/](?P<d>0?[1-9]|[12]\d|3[01])(?:\s+(?P<hh>\d{1,2}):(?P<mm>\d{1,2}):(?P<ss>\d{1,2}))?$",
    )
    .unwrap()
});

/// Day-first slash-separated date, optional space-separated time
static DATE_DMY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<d>0?[1-9]|[12]\d|3[01])/(?P<m>0?[1-9]|1[0-2])/(?P<y>\d{4})(?:\s+(?P<hh>\d{1,2}):(?P<mm>\d{1,2}):(?P<ss>\d{1,2}))?$",
    )
    .unwrap()
});

/// Timezone offset inside an ISO suffix: `±HH:mm` or `±HHmm`
static TZ_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-](\d{2}):?(\d{2})$").unwrap());

#[derive(Debug, Clone, Copy)]
struct TimeOfDay {
    hour: u32,
    minute: u32,
    second: u32,
    milli: u32,
}

impl TimeOfDay {
    const MIDNIGHT: TimeOfDay = TimeOfDay {
        hour: 0,
        minute: 0,
        second: 0,
        milli: 0,
    };
}

/// Check whether a string is a well-formed, calendar-valid date.
///
/// Returns `false` for empty/whitespace-only input, pattern mismatches, and
/// any out-of-range component. Never panics.
///
/// ```rust
/// use relmap::is_valid_date;
///
/// assert!(is_valid_date("2024-02-29"));            // leap year
/// assert!(is_valid_date("15/01/2024 23:59:59"));
/// assert!(is_valid_date("2024-01-15T10:30:00.5Z"));
/// assert!(!is_valid_date("2023-02-29"));
/// ```
pub fn is_valid_date(input: &str) -> bool {
    let input = input.trim();
    if input.is_empty() {
        return false;
    }

    // An ISO time suffix is split off first; when present it supplies the
    // time-of-day and the space-separated time in the remainder is ignored.
    let (date_part, iso_time) = match ISO_TIME_RE.captures(input) {
        Some(caps) => {
            let Some(time) = parse_iso_time(&caps) else {
                return false;
            };
            let start = caps.get(0).map_or(0, |m| m.start());
            (&input[..start], Some(time))
        }
        None => (input, None),
    };

    for re in [&DATE_YMD_RE, &DATE_DMY_RE] {
        let Some(caps) = re.captures(date_part) else {
            continue;
        };
        return components_are_valid(&caps, iso_time);
    }
    false
}

/// Validate the captured date (and optional space-separated time) components.
fn components_are_valid(caps: &Captures<'_>, iso_time: Option<TimeOfDay>) -> bool {
    let Some(year) = named_capture::<i32>(caps, "y") else {
        return false;
    };
    let Some(month) = named_capture::<u32>(caps, "m") else {
        return false;
    };
    let Some(day) = named_capture::<u32>(caps, "d") else {
        return false;
    };

    let time = if let Some(time) = iso_time {
        time
    } else if let (Some(hour), Some(minute), Some(second)) = (
        named_capture::<u32>(caps, "hh"),
        named_capture::<u32>(caps, "mm"),
        named_capture::<u32>(caps, "ss"),
    ) {
        if hour > 23 || minute > 59 || second > 59 {
            return false;
        }
        TimeOfDay {
            hour,
            minute,
            second,
            milli: 0,
        }
    } else {
        TimeOfDay::MIDNIGHT
    };

    // chrono rejects day-in-month overflow (Feb 30, Apr 31, non-leap Feb 29)
    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
        return false;
    }
    NaiveTime::from_hms_milli_opt(time.hour, time.minute, time.second, time.milli).is_some()
}

/// Extract and range-check the ISO time suffix captures.
fn parse_iso_time(caps: &Captures<'_>) -> Option<TimeOfDay> {
    let hour: u32 = indexed_capture(caps, 1)?;
    let minute: u32 = indexed_capture(caps, 2)?;
    let second: u32 = indexed_capture(caps, 3)?;
    if hour > 23 || minute > 59 || second > 59 {
        return None;
    }

    // Milliseconds are right-padded to three digits: ".5" means 500ms
    let milli: u32 = match caps.get(4) {
        Some(m) => format!("{:0<3}", m.as_str()).parse().ok()?,
        None => 0,
    };
    if milli > 999 {
        return None;
    }

    if let Some(tz) = caps.get(5) {
        let tz = tz.as_str();
        if tz != "Z" {
            let tz_caps = TZ_RE.captures(tz)?;
            let tz_hour: u32 = indexed_capture(&tz_caps, 1)?;
            let tz_minute: u32 = indexed_capture(&tz_caps, 2)?;
            if tz_hour > 14 || tz_minute > 59 {
                return None;
            }
        }
    }

    Some(TimeOfDay {
        hour,
        minute,
        second,
        milli,
    })
}

fn named_capture<T: std::str::FromStr>(caps: &Captures<'_>, name: &str) -> Option<T> {
    caps.name(name)?.as_str().parse().ok()
}

fn indexed_capture<T: std::str::FromStr>(caps: &Captures<'_>, index: usize) -> Option<T> {
    caps.get(index)?.as_str().parse().ok()
}
