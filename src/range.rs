//! Scan bounds for time-range queries over reverse-chronological keys.
//!
//! Ordered stores scan `[start, stop)` in ascending byte order. Because the
//! codec stores `max - t`, a caller's "from A to B inclusive" turns into:
//!
//! ```text
//! time:   A-1      A  ...  B      B+1
//! key:    stop  >  k_A ... k_B  >  (before start)
//!                          ^start
//! ```
//!
//! `start` is the key of the *later* bound and `stop` is the key of the
//! instant just before the earlier bound, which the exclusive stop leaves out.

use std::ops::{Bound, RangeBounds};

use log::trace;

use crate::codec::KeyCodec;
use crate::error::{Error, Result};
use crate::types::{EncodedKey, Timestamp};

/// Half-open interval `[start, stop)` on the encoded key space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanBounds {
    /// Inclusive. Key of the latest instant in the query.
    pub start: EncodedKey,
    /// Exclusive. First key past the earliest instant in the query.
    pub stop: EncodedKey,
}

impl ScanBounds {
    /// Whether an ascending `[start, stop)` scan would return `key`.
    pub fn contains(&self, key: &[u8]) -> bool {
        key >= self.start.as_slice() && key < self.stop.as_slice()
    }
}

impl KeyCodec {
    /// Bounds selecting the rows of `partition_key` with timestamps in
    /// `[from, to]`, returned newest first by an ascending scan.
    ///
    /// Fails with [`Error::InvalidRange`] when `from > to`, and with
    /// [`Error::InvalidInput`] when either bound cannot be encoded.
    pub fn build_range(
        &self,
        partition_key: &[u8],
        from: Timestamp,
        to: Timestamp,
    ) -> Result<ScanBounds> {
        if from > to {
            return Err(Error::InvalidRange { from, to });
        }

        let start = self.encode(partition_key, to)?;
        let stop = match from.checked_sub(1) {
            Some(before) => self.encode(partition_key, before)?,
            // No instant precedes zero. Keys of one partition share a length,
            // so the key followed by 0x00 is its immediate successor.
            None => {
                let mut stop = self.encode(partition_key, 0)?;
                stop.push(0x00);
                stop
            }
        };

        trace!(
            "range [{from}, {to}] -> start {:?} stop {:?}",
            String::from_utf8_lossy(&start),
            String::from_utf8_lossy(&stop)
        );
        Ok(ScanBounds { start, stop })
    }

    /// [`build_range`](Self::build_range) over Rust range syntax.
    ///
    /// Unbounded ends extend to `0` and `max_timestamp`. A range that
    /// normalizes to nothing (`5..5`, `..0`) is an [`Error::InvalidRange`].
    pub fn scan_range<R: RangeBounds<Timestamp>>(
        &self,
        partition_key: &[u8],
        range: R,
    ) -> Result<ScanBounds> {
        let (from, to) = normalize(&range, self.max_timestamp())?;
        self.build_range(partition_key, from, to)
    }

    /// Bounds covering every row of `partition_key`.
    pub fn partition_bounds(&self, partition_key: &[u8]) -> Result<ScanBounds> {
        self.build_range(partition_key, 0, self.max_timestamp())
    }
}

/// Convert any `RangeBounds<Timestamp>` into a closed `[from, to]`.
fn normalize<R: RangeBounds<Timestamp>>(
    range: &R,
    max: Timestamp,
) -> Result<(Timestamp, Timestamp)> {
    let end = match range.end_bound() {
        Bound::Included(&e) => Some(e),
        Bound::Excluded(&e) => e.checked_sub(1),
        Bound::Unbounded => Some(max),
    };
    let start = match range.start_bound() {
        Bound::Included(&s) => Some(s),
        Bound::Excluded(&s) => s.checked_add(1),
        Bound::Unbounded => Some(0),
    };
    match (start, end) {
        (Some(from), Some(to)) => Ok((from, to)),
        (from, to) => Err(Error::InvalidRange {
            from: from.unwrap_or(Timestamp::MAX),
            to: to.unwrap_or(0),
        }),
    }
}
