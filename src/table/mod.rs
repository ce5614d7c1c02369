pub mod filter;
pub mod row;

pub use filter::{CompareOp, Filter, Operator};
pub use row::Row;

use std::collections::BTreeMap;

use log::debug;

use crate::error::{Error, Result};
use crate::iterator::{BoundedIterator, StorageIterator};
use crate::memtable::MemTable;
use crate::range::ScanBounds;
use crate::types::Key;

/// Description of a range scan: optional `[start, stop)` bounds, an optional
/// post-scan filter, a row limit and a column projection.
#[derive(Debug, Clone, Default)]
pub struct Scan {
    start: Option<Key>,
    stop: Option<Key>,
    filter: Option<Filter>,
    limit: Option<usize>,
    columns: Vec<String>,
}

impl Scan {
    /// Full-table scan.
    pub fn new() -> Self {
        Scan::default()
    }

    /// Scan over precomputed bounds.
    pub fn bounded(bounds: ScanBounds) -> Self {
        Scan {
            start: Some(bounds.start),
            stop: Some(bounds.stop),
            ..Scan::default()
        }
    }

    /// Inclusive start row.
    pub fn with_start_row(mut self, start: impl Into<Key>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Exclusive stop row.
    pub fn with_stop_row(mut self, stop: impl Into<Key>) -> Self {
        self.stop = Some(stop.into());
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Return at most `limit` rows.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Return only these columns. Filters still see the whole row.
    pub fn with_columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| (*c).to_owned()).collect();
        self
    }
}

/// An in-memory ordered table of rows, owned by its caller.
///
/// Stands in for the ordered store that encoded keys are written to: rows are
/// kept sorted by key bytes and scanned ascending over `[start, stop)`, the
/// same contract a wide-column store offers. Nothing is persisted.
pub struct Table {
    name: String,
    rows: MemTable,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Table {
            name: name.into(),
            rows: MemTable::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write columns into a row, merging with any columns already there.
    pub fn put(&mut self, row_key: impl Into<Key>, row: Row) -> Result<()> {
        let row_key = row_key.into();
        validate_put(&row_key, &row)?;
        let mut merged = self.stored(&row_key)?.unwrap_or_default();
        merged.merge(row);
        let encoded = merged.encode()?;
        self.rows.put(row_key, encoded)
    }

    /// Apply several puts, all or nothing. Each put is checked, then merged
    /// with the stored row and any earlier put to the same key, and every
    /// merged row is encoded before the first write.
    pub fn put_batch<I>(&mut self, puts: I) -> Result<()>
    where
        I: IntoIterator<Item = (Key, Row)>,
    {
        let mut staged: BTreeMap<Key, Row> = BTreeMap::new();
        let mut count = 0usize;
        for (row_key, row) in puts {
            validate_put(&row_key, &row)?;
            let mut merged = match staged.remove(&row_key) {
                Some(pending) => pending,
                None => self.stored(&row_key)?.unwrap_or_default(),
            };
            merged.merge(row);
            staged.insert(row_key, merged);
            count += 1;
        }

        let encoded = staged
            .into_iter()
            .map(|(row_key, row)| Ok((row_key, row.encode()?)))
            .collect::<Result<Vec<_>>>()?;
        for (row_key, value) in encoded {
            self.rows.put(row_key, value)?;
        }
        debug!("table {}: applied batch of {count} puts", self.name);
        Ok(())
    }

    /// The live row stored under `row_key`, decoded.
    fn stored(&self, row_key: &[u8]) -> Result<Option<Row>> {
        self.rows.get(row_key).map(Row::decode).transpose()
    }

    /// Point lookup. `columns` projects the result; empty returns every column.
    pub fn get(&self, row_key: &[u8], columns: &[&str]) -> Result<Option<Row>> {
        match self.rows.get(row_key) {
            Some(encoded) => Ok(Some(Row::decode(encoded)?.project(columns))),
            None => Ok(None),
        }
    }

    /// Remove a row.
    pub fn delete(&mut self, row_key: impl Into<Key>) {
        self.rows.delete(row_key.into());
    }

    /// Ascending scan of live rows in the scan's key interval.
    pub fn scan(&self, scan: &Scan) -> Result<Vec<(Key, Row)>> {
        let mut iter = BoundedIterator::new(
            self.rows.iter(),
            scan.start.as_deref(),
            scan.stop.as_deref(),
        )?;
        let mut out = Vec::new();
        let mut visited = 0usize;

        while iter.is_valid() && scan.limit.is_none_or(|limit| out.len() < limit) {
            visited += 1;
            let encoded = iter.value();
            // Empty values are tombstones.
            if !encoded.is_empty() {
                let row = Row::decode(encoded)?;
                if scan.filter.as_ref().is_none_or(|f| f.matches(iter.key(), &row)) {
                    out.push((iter.key().to_vec(), row.project(scan.columns.as_slice())));
                }
            }
            iter.next()?;
        }

        debug!(
            "table {}: scan visited {visited} entries, returned {} rows",
            self.name,
            out.len()
        );
        Ok(out)
    }

    /// Approximate memory held by keys and encoded rows, tombstones included.
    pub fn approximate_size(&self) -> usize {
        self.rows.size()
    }
}

fn validate_put(row_key: &[u8], row: &Row) -> Result<()> {
    if row_key.is_empty() {
        return Err(Error::InvalidInput("row key is empty".into()));
    }
    if row.is_empty() {
        return Err(Error::InvalidInput("put has no columns".into()));
    }
    // Surfaces oversized names or values before anything is written.
    row.encode().map(|_| ())
}
