//! Display formatting for the raw time strings stored on messages.
//!
//! Transcripts carry times as `9:05 PM`, `9:05:12 PM` or `14:02:10`
//! depending on the dialect. The renderer shows them in the user's chosen
//! clock without re-parsing the transcript.
//!
//! # Example
//!
//! ```rust
//! use chatview::time::format_time;
//!
//! assert_eq!(format_time("9:05 PM", true), "21:05");
//! assert_eq!(format_time("00:05", false), "12:05 AM");
//! assert_eq!(format_time("13:30:59", false), "1:30 PM");
//! assert_eq!(format_time("yesterday", true), "yesterday");
//! ```

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static MERIDIEM_CLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]{1,2}):([0-9]{2})(?::([0-9]{2}))?\s?([AP]M)")
        .expect("12-hour clock pattern is valid")
});

static CLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{1,2}):([0-9]{2})(?::([0-9]{2}))?").expect("24-hour clock pattern is valid")
});

fn field(caps: &Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index).map_or(Some(0), |m| m.as_str().parse().ok())
}

// Hours and minutes decide validity; seconds are kept only when in range.
fn clock(hours: u32, minutes: u32, seconds: u32) -> Option<NaiveTime> {
    let time = NaiveTime::from_hms_opt(hours, minutes, 0)?;
    Some(NaiveTime::from_hms_opt(hours, minutes, seconds).unwrap_or(time))
}

/// Parses a raw transcript time into a clock value.
///
/// Accepts a 12-hour form with `AM`/`PM` (any case, optional space, seconds
/// optional) or a 24-hour `HH:MM` / `HH:MM:SS` form. Returns `None` if
/// neither shape is present or the hours and minutes are not a valid time of
/// day. Out-of-range seconds are dropped.
pub fn parse_clock(raw: &str) -> Option<NaiveTime> {
    if let Some(caps) = MERIDIEM_CLOCK.captures(raw) {
        let mut hours = field(&caps, 1)?;
        let minutes = field(&caps, 2)?;
        let seconds = field(&caps, 3)?;
        let pm = caps.get(4)?.as_str().eq_ignore_ascii_case("PM");

        if pm && hours < 12 {
            hours += 12;
        }
        if !pm && hours == 12 {
            hours = 0;
        }
        return clock(hours, minutes, seconds);
    }

    let caps = CLOCK.captures(raw)?;
    clock(field(&caps, 1)?, field(&caps, 2)?, field(&caps, 3)?)
}

/// Formats a raw transcript time for display.
///
/// 24-hour output is `HH:MM`; 12-hour output is `H:MM AM|PM` with hour 0
/// shown as 12. Seconds are dropped. Unrecognized input is returned
/// unchanged.
pub fn format_time(raw: &str, use_24_hour: bool) -> String {
    match parse_clock(raw) {
        Some(time) if use_24_hour => time.format("%H:%M").to_string(),
        Some(time) => time.format("%-I:%M %p").to_string(),
        None => raw.to_string(),
    }
}
