use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// A row: named columns holding byte values, one version per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    columns: BTreeMap<String, Vec<u8>>,
}

impl Row {
    pub fn new() -> Self {
        Row::default()
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.set(column, value);
        self
    }

    /// Set a column, replacing any previous value.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.columns.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&[u8]> {
        self.columns.get(column).map(Vec::as_slice)
    }

    /// Columns in name order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Overlay `other` on this row; its columns win.
    pub fn merge(&mut self, other: Row) {
        self.columns.extend(other.columns);
    }

    /// Keep only the named columns. An empty list keeps everything.
    pub fn project<S: AsRef<str>>(mut self, columns: &[S]) -> Row {
        if !columns.is_empty() {
            self.columns
                .retain(|name, _| columns.iter().any(|c| c.as_ref() == name.as_str()));
        }
        self
    }

    /// Serialize the row.
    ///
    /// Layout (little-endian):
    /// ```text
    /// ┌───────────┬──────────────┬──────┬───────────────┬───────┬─────┐
    /// │ count(2B) │ name_len(2B) │ name │ value_len(4B) │ value │ ... │
    /// └───────────┴──────────────┴──────┴───────────────┴───────┴─────┘
    /// ```
    pub fn encode(&self) -> Result<Vec<u8>> {
        let count = u16::try_from(self.columns.len()).map_err(|_| {
            Error::InvalidInput(format!("{} columns in one row", self.columns.len()))
        })?;

        let mut buf = Vec::with_capacity(self.encoded_size());
        buf.extend_from_slice(&count.to_le_bytes());
        for (name, value) in &self.columns {
            let name_len = u16::try_from(name.len())
                .map_err(|_| Error::InvalidInput(format!("column name is {} bytes", name.len())))?;
            let value_len = u32::try_from(value.len()).map_err(|_| {
                Error::InvalidInput(format!("value of {name:?} is {} bytes", value.len()))
            })?;
            buf.extend_from_slice(&name_len.to_le_bytes());
            buf.extend_from_slice(name.as_bytes());
            buf.extend_from_slice(&value_len.to_le_bytes());
            buf.extend_from_slice(value);
        }
        Ok(buf)
    }

    /// Deserialize a row written by [`encode`](Self::encode).
    pub fn decode(mut data: &[u8]) -> Result<Self> {
        let count = u16::from_le_bytes(take_array(&mut data)?);
        let mut columns = BTreeMap::new();
        for _ in 0..count {
            let name_len = u16::from_le_bytes(take_array(&mut data)?) as usize;
            let name = std::str::from_utf8(take(&mut data, name_len)?)
                .map_err(|e| Error::Corruption(format!("column name: {e}")))?
                .to_owned();
            let value_len = u32::from_le_bytes(take_array(&mut data)?) as usize;
            let value = take(&mut data, value_len)?.to_vec();
            columns.insert(name, value);
        }
        if !data.is_empty() {
            return Err(Error::Corruption(format!("{} trailing bytes after row", data.len())));
        }
        Ok(Row { columns })
    }

    fn encoded_size(&self) -> usize {
        2 + self
            .columns
            .iter()
            .map(|(name, value)| 2 + name.len() + 4 + value.len())
            .sum::<usize>()
    }
}

fn take<'a>(data: &mut &'a [u8], n: usize) -> Result<&'a [u8]> {
    if data.len() < n {
        return Err(Error::Corruption("row truncated".into()));
    }
    let (head, tail) = data.split_at(n);
    *data = tail;
    Ok(head)
}

fn take_array<const N: usize>(data: &mut &[u8]) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    out.copy_from_slice(take(data, N)?);
    Ok(out)
}
