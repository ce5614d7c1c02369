pub mod bounded;

pub use bounded::BoundedIterator;

use crate::error::Result;

/// The central iteration abstraction over sorted key-value sources.
///
/// The skip list implements it directly; [`BoundedIterator`] wraps any
/// implementation to give it half-open `[start, stop)` range semantics.
pub trait StorageIterator {
    /// Returns the current key. Only valid when is_valid() is true.
    fn key(&self) -> &[u8];

    /// Returns the current value. Only valid when is_valid() is true.
    fn value(&self) -> &[u8];

    /// Returns true if the iterator is positioned at a valid entry.
    fn is_valid(&self) -> bool;

    /// Advances to the next entry.
    fn next(&mut self) -> Result<()>;

    /// Positions the iterator at the first entry with key >= target.
    fn seek(&mut self, key: &[u8]) -> Result<()>;
}
