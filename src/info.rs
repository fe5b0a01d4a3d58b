//! Human-readable breakdown of a UUID.

use std::fmt;

use crate::layout::Field;
use crate::{time, timestamp, Uuid};

/// Decoded contents of a UUID as reported by [`info`].
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Info {
    /// The inspected UUID.
    pub uuid: Uuid,
    /// Version nibble.
    pub version: u8,
    /// Variant nibble, of which only the leading bits are significant.
    pub variant: u8,
    /// Embedded timestamp in nanoseconds since the Unix epoch, if the version carries one.
    pub timestamp: Option<i128>,
    /// Raw value of every field of the version, in layout order. The time field holds the
    /// internal tick count.
    pub fields: Vec<(Field, u64)>,
}

impl Info {
    /// Returns the name of the variant family.
    pub const fn variant_name(&self) -> &'static str {
        match self.variant {
            0x0..=0x7 => "NCS",
            0x8..=0xb => "RFC 9562",
            0xc..=0xd => "Microsoft",
            _ => "future",
        }
    }
}

/// Decodes every field of `uuid` that its version defines.
///
/// # Examples
///
/// ```rust
/// use uuidtool::{info, Field, Uuid};
///
/// let x: Uuid = "c232ab00-9414-11ec-b3c8-9f6bdeced846".parse()?;
/// let info = info(x);
/// assert_eq!(info.version, 1);
/// assert_eq!(info.timestamp, Some(1_645_557_742_000_000_000));
/// assert!(info.fields.contains(&(Field::Node, 0x9f6bdeced846)));
/// # Ok::<(), uuidtool::Error>(())
/// ```
pub fn info(uuid: Uuid) -> Info {
    Info {
        uuid,
        version: uuid.version(),
        variant: uuid.variant(),
        timestamp: timestamp::decode_timestamp(&uuid).ok(),
        fields: uuid.fields().collect(),
    }
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "uuid: {}", self.uuid)?;
        writeln!(f, "version: {}", self.version)?;
        write!(f, "variant: {} ({:x})", self.variant_name(), self.variant)?;
        if let Some(nanos) = self.timestamp {
            match time::format_time(nanos) {
                Some(text) => write!(f, "\ntimestamp: {} ({} ns)", text, nanos)?,
                None => write!(f, "\ntimestamp: {} ns", nanos)?,
            }
        }
        for (field, value) in &self.fields {
            match field {
                Field::Node | Field::CustomA | Field::CustomB | Field::CustomC => {
                    write!(f, "\n{}: {:x}", field, value)?
                }
                _ => write!(f, "\n{}: {}", field, value)?,
            }
        }
        Ok(())
    }
}
