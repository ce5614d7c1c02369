/// Raw key bytes.
pub type Key = Vec<u8>;

/// Raw value bytes.
pub type Value = Vec<u8>;

/// Epoch-based point in time, counted in units of a [`Resolution`].
pub type Timestamp = u64;

/// A composite row key: framed partition key followed by the rendered
/// timestamp complement.
pub type EncodedKey = Vec<u8>;

/// Unit of a [`Timestamp`].
///
/// The codec itself only ever adds or subtracts one unit, so it works the same
/// at any resolution. The resolution matters when converting from wall-clock
/// time (see [`crate::calendar`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    Seconds,
    #[default]
    Millis,
}

impl Resolution {
    /// Number of timestamp units in one second.
    pub fn units_per_second(self) -> u64 {
        match self {
            Resolution::Seconds => 1,
            Resolution::Millis => 1_000,
        }
    }
}

/// A key split back into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedKey {
    pub partition: Vec<u8>,
    pub timestamp: Timestamp,
}
