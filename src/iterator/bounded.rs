use crate::error::Result;
use crate::iterator::StorageIterator;
use crate::range::ScanBounds;

/// Restricts an iterator to the half-open key interval `[start, stop)`.
///
/// Either bound may be open. The stop key itself is never yielded, which is
/// what lets [`KeyCodec::build_range`](crate::KeyCodec::build_range) place
/// `stop` on the instant just before the requested interval.
pub struct BoundedIterator<I> {
    inner: I,
    start: Option<Vec<u8>>,
    stop: Option<Vec<u8>>,
}

impl<I: StorageIterator> BoundedIterator<I> {
    /// Wrap `inner` and position it at the first key >= `start`.
    pub fn new(mut inner: I, start: Option<&[u8]>, stop: Option<&[u8]>) -> Result<Self> {
        if let Some(start) = start {
            inner.seek(start)?;
        }
        Ok(BoundedIterator {
            inner,
            start: start.map(<[u8]>::to_vec),
            stop: stop.map(<[u8]>::to_vec),
        })
    }

    /// Wrap `inner` with both bounds taken from `bounds`.
    pub fn with_bounds(inner: I, bounds: &ScanBounds) -> Result<Self> {
        Self::new(inner, Some(bounds.start.as_slice()), Some(bounds.stop.as_slice()))
    }
}

impl<I: StorageIterator> StorageIterator for BoundedIterator<I> {
    fn key(&self) -> &[u8] {
        self.inner.key()
    }

    fn value(&self) -> &[u8] {
        self.inner.value()
    }

    fn is_valid(&self) -> bool {
        self.inner.is_valid()
            && self
                .stop
                .as_deref()
                .is_none_or(|stop| self.inner.key() < stop)
    }

    fn next(&mut self) -> Result<()> {
        self.inner.next()
    }

    /// Seeking below `start` lands on `start`.
    fn seek(&mut self, key: &[u8]) -> Result<()> {
        match self.start.as_deref() {
            Some(start) if key < start => self.inner.seek(start),
            _ => self.inner.seek(key),
        }
    }
}
