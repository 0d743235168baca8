//! Fixed-format date and time parsing.
//!
//! All three formats are read in UTC and never consult the local time zone.
//!
//! Parsing is lenient. Only a prefix of the text has to match the format, so
//! `2014-01-15 10:00:00` read as a date is `2014-01-15`. Fields past their
//! range roll over into the next larger one: `2014-02-30` is `2014-03-02`,
//! `10:20:60` is `10:21:00` and a time of `25:00:00` wraps to `01:00:00`.
//!
//! The hour field is a clock-hour-of-half-day with no AM/PM marker: `12`
//! reads as hour 0, every other value is taken as written. This makes
//! `01:00:00` and `13:00:00` distinct but `12:30:00` means half past midnight.

use std::sync::LazyLock;

use chrono::{
    DateTime, NaiveDate, NaiveTime, TimeDelta, Utc,
    format::{Item, Numeric, StrftimeItems},
};

pub(crate) const DATE_DISPLAY: &str = "%Y-%m-%d";
pub(crate) const TIME_DISPLAY: &str = "%H:%M:%S";
pub(crate) const TIMESTAMP_DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

const SECONDS_PER_DAY: i64 = 86_400;

static DATE_FORMAT: LazyLock<Vec<Item<'static>>> =
    LazyLock::new(|| StrftimeItems::new("%Y-%m-%d").collect());

static TIME_FORMAT: LazyLock<Vec<Item<'static>>> =
    LazyLock::new(|| StrftimeItems::new("%H:%M:%S").collect());

static TIMESTAMP_FORMAT: LazyLock<Vec<Item<'static>>> =
    LazyLock::new(|| StrftimeItems::new("%Y-%m-%d %H:%M:%S").collect());

/// Raw field values read from the text, before any range checks.
///
/// Unset fields default to 1970-01-01 00:00:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fields {
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
}

impl Default for Fields {
    fn default() -> Self {
        Self {
            year: 1970,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }
}

impl Fields {
    /// Resolves year, month and day, rolling overflow forward.
    fn date(&self) -> Option<NaiveDate> {
        let months = self.year.checked_mul(12)?.checked_add(self.month - 1)?;
        let year = i32::try_from(months.div_euclid(12)).ok()?;
        let month = u32::try_from(months.rem_euclid(12) + 1).ok()?;

        NaiveDate::from_ymd_opt(year, month, 1)?
            .checked_add_signed(TimeDelta::try_days(self.day.checked_sub(1)?)?)
    }

    /// Seconds since midnight, possibly past one day.
    fn seconds(&self) -> Option<i64> {
        let hour = if self.hour == 12 { 0 } else { self.hour };

        hour.checked_mul(3600)?
            .checked_add(self.minute.checked_mul(60)?)?
            .checked_add(self.second)
    }
}

/// Splits a run of leading ASCII digits off `text`.
fn leading_number(text: &str) -> Option<(i64, &str)> {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }

    let value = text[..end].parse().ok()?;
    Some((value, &text[end..]))
}

/// Reads `text` against a compiled format. Text after the last item is
/// ignored.
fn scan(text: &str, items: &[Item<'static>]) -> Option<Fields> {
    let mut rest = text;
    let mut fields = Fields::default();

    for item in items {
        match item {
            Item::Literal(literal) => rest = rest.strip_prefix(literal)?,
            Item::Space(_) => rest = rest.trim_start(),
            Item::Numeric(numeric, _) => {
                let (value, remainder) = leading_number(rest)?;
                rest = remainder;

                match numeric {
                    Numeric::Year => fields.year = value,
                    Numeric::Month => fields.month = value,
                    Numeric::Day => fields.day = value,
                    Numeric::Hour => fields.hour = value,
                    Numeric::Minute => fields.minute = value,
                    Numeric::Second => fields.second = value,
                    _ => return None,
                }
            }
            _ => return None,
        }
    }

    Some(fields)
}

/// Parses `yyyy-MM-dd`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    scan(text, &DATE_FORMAT)?.date()
}

/// Parses `hh:mm:ss`. Times past one day wrap around.
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let seconds = scan(text, &TIME_FORMAT)?.seconds()?;
    let of_day = u32::try_from(seconds.rem_euclid(SECONDS_PER_DAY)).ok()?;
    NaiveTime::from_num_seconds_from_midnight_opt(of_day, 0)
}

/// Parses `yyyy-MM-dd hh:mm:ss` as an instant in UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let fields = scan(text, &TIMESTAMP_FORMAT)?;
    let midnight = fields.date()?.and_hms_opt(0, 0, 0)?;
    let instant = midnight.checked_add_signed(TimeDelta::try_seconds(fields.seconds()?)?)?;
    Some(instant.and_utc())
}
