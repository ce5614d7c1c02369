use crate::error::{Error, Result};

/// How the timestamp complement is written after the partition key.
///
/// Both renderings are fixed width, so byte order and numeric order agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rendering {
    /// ASCII decimal, left-zero-padded to the digit count of the ceiling.
    #[default]
    Decimal,
    /// Big-endian unsigned integer using as few bytes as the ceiling needs.
    BigEndian,
}

impl Rendering {
    /// Width in bytes of a rendered value bounded by `max`.
    pub fn width(self, max: u64) -> usize {
        match self {
            Rendering::Decimal => max.checked_ilog10().map_or(1, |d| d as usize + 1),
            Rendering::BigEndian => ((u64::BITS - max.leading_zeros()) as usize).div_ceil(8).max(1),
        }
    }

    /// Append `value` at exactly `width` bytes. `value` must fit.
    pub(crate) fn write(self, value: u64, width: usize, out: &mut Vec<u8>) {
        match self {
            Rendering::Decimal => out.extend_from_slice(format!("{value:0width$}").as_bytes()),
            Rendering::BigEndian => out.extend_from_slice(&value.to_be_bytes()[8 - width..]),
        }
    }

    /// Parse a complement field. The caller checks the field width.
    pub(crate) fn parse(self, field: &[u8]) -> Result<u64> {
        match self {
            Rendering::Decimal => field.iter().try_fold(0u64, |acc, &b| {
                if !b.is_ascii_digit() {
                    return Err(Error::MalformedKey(format!(
                        "non-digit byte {b:#04x} in complement"
                    )));
                }
                acc.checked_mul(10)
                    .and_then(|v| v.checked_add(u64::from(b - b'0')))
                    .ok_or_else(|| Error::MalformedKey("complement overflows u64".into()))
            }),
            Rendering::BigEndian => Ok(field
                .iter()
                .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))),
        }
    }
}
