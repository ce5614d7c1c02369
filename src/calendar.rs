//! Compact `yyyyMMddHHmmss` timestamps, as used in call-detail records.
//!
//! All conversions are in UTC. Parsing is strict: `20170631235959` is an
//! error, not the first second of July.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::codec::KeyCodec;
use crate::error::{Error, Result};
use crate::range::ScanBounds;
use crate::types::{Resolution, Timestamp};

const COMPACT_FORMAT: &str = "%Y%m%d%H%M%S";
const COMPACT_LEN: usize = 14;

/// Parse `yyyyMMddHHmmss` into an epoch timestamp at `resolution`.
pub fn parse_compact(text: &str, resolution: Resolution) -> Result<Timestamp> {
    if text.len() != COMPACT_LEN || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidInput(format!(
            "{text:?} is not a {COMPACT_LEN}-digit yyyyMMddHHmmss timestamp"
        )));
    }
    let datetime = NaiveDateTime::parse_from_str(text, COMPACT_FORMAT)
        .map_err(|e| Error::InvalidInput(format!("{text:?}: {e}")))?;
    to_timestamp(datetime, resolution)
}

/// Render an epoch timestamp as `yyyyMMddHHmmss`, dropping sub-second units.
pub fn format_compact(timestamp: Timestamp, resolution: Resolution) -> Result<String> {
    let seconds = i64::try_from(timestamp / resolution.units_per_second())
        .map_err(|_| Error::InvalidInput(format!("timestamp {timestamp} out of range")))?;
    let datetime = DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| Error::InvalidInput(format!("timestamp {timestamp} out of range")))?;
    Ok(datetime.format(COMPACT_FORMAT).to_string())
}

/// First and last instant of a calendar month, both inclusive.
pub fn month_range(
    year: i32,
    month: u32,
    resolution: Resolution,
) -> Result<(Timestamp, Timestamp)> {
    let first = first_instant(year, month)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let next = first_instant(next_year, next_month)?;

    let from = to_timestamp(first, resolution)?;
    // Nothing after the epoch can end below one unit.
    let to = to_timestamp(next, resolution)? - 1;
    Ok((from, to))
}

impl KeyCodec {
    /// [`parse_compact`] at this codec's resolution.
    pub fn parse_time(&self, text: &str) -> Result<Timestamp> {
        parse_compact(text, self.resolution())
    }

    /// [`format_compact`] at this codec's resolution.
    pub fn format_time(&self, timestamp: Timestamp) -> Result<String> {
        format_compact(timestamp, self.resolution())
    }

    /// Bounds selecting every row of `partition_key` within a calendar month,
    /// measured at this codec's resolution.
    pub fn month_bounds(
        &self,
        partition_key: &[u8],
        year: i32,
        month: u32,
    ) -> Result<ScanBounds> {
        let (from, to) = month_range(year, month, self.resolution())?;
        self.build_range(partition_key, from, to)
    }
}

fn first_instant(year: i32, month: u32) -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| Error::InvalidInput(format!("no such month {year}-{month:02}")))
}

fn to_timestamp(datetime: NaiveDateTime, resolution: Resolution) -> Result<Timestamp> {
    let utc = datetime.and_utc();
    let units = match resolution {
        Resolution::Seconds => utc.timestamp(),
        Resolution::Millis => utc.timestamp_millis(),
    };
    Timestamp::try_from(units)
        .map_err(|_| Error::InvalidInput(format!("{datetime} is before the epoch")))
}
