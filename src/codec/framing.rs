use crate::error::{Error, Result};

/// Size of the big-endian length prefix written by [`Framing::LengthPrefixed`].
pub const LENGTH_PREFIX_SIZE: usize = 2;

/// Longest partition key a length prefix can describe.
pub const MAX_PREFIXED_LEN: usize = u16::MAX as usize;

/// How the partition key is delimited inside a composite key.
///
/// Without framing, a scan for partition `186` would also walk rows of
/// `18612341234`: plain concatenation only separates partitions when every
/// partition key has the same length.
///
/// ```text
/// Fixed(11):       │ 18612341234 │ complement │
/// LengthPrefixed:  │ len (2B BE) │ partition key │ complement │
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// Every partition key is exactly this many bytes. Keys of another
    /// length are rejected rather than padded.
    Fixed(usize),
    /// A two-byte big-endian length precedes the partition key.
    #[default]
    LengthPrefixed,
}

impl Framing {
    /// Number of bytes the framed partition key occupies.
    pub fn framed_len(self, partition_len: usize) -> usize {
        match self {
            Framing::Fixed(width) => width,
            Framing::LengthPrefixed => LENGTH_PREFIX_SIZE + partition_len,
        }
    }

    /// Check a partition key against this framing without writing anything.
    pub fn validate(self, partition_key: &[u8]) -> Result<()> {
        if partition_key.is_empty() {
            return Err(Error::InvalidInput("partition key is empty".into()));
        }
        match self {
            Framing::Fixed(width) if partition_key.len() != width => Err(Error::InvalidInput(
                format!(
                    "partition key is {} bytes, fixed framing requires {width}",
                    partition_key.len()
                ),
            )),
            Framing::LengthPrefixed if partition_key.len() > MAX_PREFIXED_LEN => {
                Err(Error::InvalidInput(format!(
                    "partition key is {} bytes, length prefix allows at most {MAX_PREFIXED_LEN}",
                    partition_key.len()
                )))
            }
            _ => Ok(()),
        }
    }

    /// Append the framed partition key to `out`. The key must already be
    /// validated.
    pub(crate) fn write(self, partition_key: &[u8], out: &mut Vec<u8>) {
        if let Framing::LengthPrefixed = self {
            out.extend_from_slice(&(partition_key.len() as u16).to_be_bytes());
        }
        out.extend_from_slice(partition_key);
    }

    /// Split an encoded key into `(partition key, remainder)`.
    pub(crate) fn split(self, key: &[u8]) -> Result<(&[u8], &[u8])> {
        match self {
            Framing::Fixed(width) => {
                if key.len() < width {
                    return Err(Error::MalformedKey(format!(
                        "key is {} bytes, shorter than the {width}-byte partition key",
                        key.len()
                    )));
                }
                Ok(key.split_at(width))
            }
            Framing::LengthPrefixed => {
                if key.len() < LENGTH_PREFIX_SIZE {
                    return Err(Error::MalformedKey("key too short for length prefix".into()));
                }
                let (prefix, rest) = key.split_at(LENGTH_PREFIX_SIZE);
                let len = u16::from_be_bytes([prefix[0], prefix[1]]) as usize;
                if len == 0 {
                    return Err(Error::MalformedKey("zero-length partition key".into()));
                }
                if rest.len() < len {
                    return Err(Error::MalformedKey(format!(
                        "length prefix says {len} bytes, only {} remain",
                        rest.len()
                    )));
                }
                Ok(rest.split_at(len))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_prefix_is_big_endian() {
        let mut out = Vec::new();
        Framing::LengthPrefixed.write(b"186", &mut out);
        assert_eq!(out, [0x00, 0x03, b'1', b'8', b'6']);
    }

    #[test]
    fn split_rejects_prefix_longer_than_key() {
        let key = [0x00, 0x09, b'1', b'8'];
        assert!(matches!(
            Framing::LengthPrefixed.split(&key),
            Err(Error::MalformedKey(_))
        ));
    }

    #[test]
    fn split_fixed_width() {
        let (pk, rest) = Framing::Fixed(3).split(b"186xyz").unwrap();
        assert_eq!(pk, b"186");
        assert_eq!(rest, b"xyz");
    }

    #[test]
    fn fixed_rejects_other_widths() {
        assert!(Framing::Fixed(11).validate(b"186").is_err());
        assert!(Framing::Fixed(11).validate(b"18612341234").is_ok());
    }
}
