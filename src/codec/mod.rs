pub mod complement;
pub mod framing;

pub use complement::Rendering;
pub use framing::Framing;

use crate::error::{Error, Result};
use crate::types::{DecodedKey, EncodedKey, Resolution, Timestamp};

/// Default ceiling: the largest signed 64-bit value, so any `i64` epoch
/// timestamp (seconds or milliseconds) is representable.
pub const DEFAULT_MAX_TIMESTAMP: Timestamp = i64::MAX as Timestamp;

/// Configuration for a [`KeyCodec`].
///
/// `max_timestamp`, `framing` and `rendering` are part of the stored key
/// format. Changing any of them for an existing dataset silently breaks the
/// ordering of keys already written. `resolution` only governs how the
/// codec's calendar helpers turn wall-clock time into timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    pub max_timestamp: Timestamp,
    pub framing: Framing,
    pub rendering: Rendering,
    pub resolution: Resolution,
}

impl Default for CodecOptions {
    fn default() -> Self {
        CodecOptions {
            max_timestamp: DEFAULT_MAX_TIMESTAMP,
            framing: Framing::default(),
            rendering: Rendering::default(),
            resolution: Resolution::default(),
        }
    }
}

impl CodecOptions {
    pub fn with_max_timestamp(mut self, max_timestamp: Timestamp) -> Self {
        self.max_timestamp = max_timestamp;
        self
    }

    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    pub fn with_rendering(mut self, rendering: Rendering) -> Self {
        self.rendering = rendering;
        self
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }
}

/// Encodes `(partition key, timestamp)` pairs into row keys that sort newest
/// first.
///
/// ```text
/// ┌──────────────────────────┬──────────────────────────────────────┐
/// │ framed partition key     │ max_timestamp - timestamp (fixed w.) │
/// └──────────────────────────┴──────────────────────────────────────┘
/// ```
///
/// A later timestamp gives a smaller complement, and a fixed-width complement
/// makes byte order follow numeric order. A plain ascending scan over one
/// partition therefore walks its rows from newest to oldest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCodec {
    options: CodecOptions,
    width: usize,
}

impl KeyCodec {
    /// Validate `options` and build a codec.
    pub fn new(options: CodecOptions) -> Result<Self> {
        if options.max_timestamp == 0 {
            return Err(Error::InvalidInput("max_timestamp must be positive".into()));
        }
        if let Framing::Fixed(0) = options.framing {
            return Err(Error::InvalidInput("fixed framing width must be positive".into()));
        }
        let width = options.rendering.width(options.max_timestamp);
        Ok(KeyCodec { options, width })
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    pub fn max_timestamp(&self) -> Timestamp {
        self.options.max_timestamp
    }

    pub fn resolution(&self) -> Resolution {
        self.options.resolution
    }

    /// Width in bytes of the rendered complement.
    pub fn complement_width(&self) -> usize {
        self.width
    }

    /// Total length of a key whose partition key is `partition_len` bytes.
    pub fn key_len(&self, partition_len: usize) -> usize {
        self.options.framing.framed_len(partition_len) + self.width
    }

    /// Encode a partition key and timestamp into a row key.
    ///
    /// Fails with [`Error::InvalidInput`] when the partition key does not fit
    /// the framing or the timestamp exceeds `max_timestamp`.
    pub fn encode(&self, partition_key: &[u8], timestamp: Timestamp) -> Result<EncodedKey> {
        self.options.framing.validate(partition_key)?;
        if timestamp > self.options.max_timestamp {
            return Err(Error::InvalidInput(format!(
                "timestamp {timestamp} exceeds max_timestamp {}",
                self.options.max_timestamp
            )));
        }

        let mut key = Vec::with_capacity(self.key_len(partition_key.len()));
        self.options.framing.write(partition_key, &mut key);
        self.options
            .rendering
            .write(self.options.max_timestamp - timestamp, self.width, &mut key);
        Ok(key)
    }

    /// Split a row key back into partition key and timestamp.
    ///
    /// The partition boundary comes from the framing. Fails with
    /// [`Error::MalformedKey`] when the key is truncated, over-long, or the
    /// complement field does not parse.
    pub fn decode(&self, key: &[u8]) -> Result<DecodedKey> {
        let (partition, field) = self.options.framing.split(key)?;
        if field.len() != self.width {
            return Err(Error::MalformedKey(format!(
                "complement field is {} bytes, expected {}",
                field.len(),
                self.width
            )));
        }
        let complement = self.options.rendering.parse(field)?;
        if complement > self.options.max_timestamp {
            return Err(Error::MalformedKey(format!(
                "complement {complement} exceeds max_timestamp {}",
                self.options.max_timestamp
            )));
        }
        Ok(DecodedKey {
            partition: partition.to_vec(),
            timestamp: self.options.max_timestamp - complement,
        })
    }

    /// The framed partition key. Every key of the partition starts with it and
    /// no key of another partition does, so it is safe as a prefix filter.
    pub fn partition_prefix(&self, partition_key: &[u8]) -> Result<Vec<u8>> {
        self.options.framing.validate(partition_key)?;
        let mut prefix = Vec::with_capacity(self.options.framing.framed_len(partition_key.len()));
        self.options.framing.write(partition_key, &mut prefix);
        Ok(prefix)
    }
}

impl Default for KeyCodec {
    fn default() -> Self {
        let options = CodecOptions::default();
        KeyCodec {
            width: options.rendering.width(options.max_timestamp),
            options,
        }
    }
}
