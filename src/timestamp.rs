//! Conversion between the timestamp encodings of versions 1, 2, 6 and 7 and Unix nanoseconds.
//!
//! Every timestamp-bearing version stores a tick count relative to some epoch. Versions 1 and 6
//! count 100 ns ticks since the Gregorian reform (1582-10-15), version 2 counts coarse ticks of
//! 429.4967295 seconds since the same epoch, and version 7 counts milliseconds since the Unix
//! epoch. Where the ticks land in the 128 bits is decided by the layout table, so the arithmetic
//! here is identical for all four versions.

use crate::layout::{self, Field};
use crate::{Error, Result, Uuid};

/// Nanoseconds between 1582-10-15T00:00:00Z and 1970-01-01T00:00:00Z.
pub const GREGORIAN_UNIX_OFFSET: i128 = 12_219_292_800_000_000_000;

/// Version 2 tick in nanoseconds, i.e. 429.4967295 s.
///
/// With this tick the 28-bit version 2 timestamp spans the same period as the 60-bit version 1
/// timestamp.
pub const V2_TICK_NS: i128 = 429_496_729_500;

/// Resolution and representable span of the timestamp of one UUID version.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Domain {
    /// Smallest timestamp increment in nanoseconds.
    pub tick: i128,
    /// Lowest representable timestamp, which is also the epoch of the tick count.
    pub lowest: i128,
    /// Highest timestamp considered by range enumeration.
    pub highest: i128,
}

impl Domain {
    /// Versions 1 and 6.
    pub const GREGORIAN_100NS: Self = Self {
        tick: 100,
        lowest: -GREGORIAN_UNIX_OFFSET,
        highest: 0x5966c59f06182ff9c,
    };

    /// Version 2.
    pub const DCE_SECURITY: Self = Self {
        tick: V2_TICK_NS,
        lowest: -GREGORIAN_UNIX_OFFSET,
        highest: 0x5966c598621830000,
    };

    /// Version 7.
    pub const UNIX_MS: Self = Self {
        tick: 1_000_000,
        lowest: 0,
        highest: ((1 << 48) - 1) * 1_000_000,
    };

    /// Returns the domain of the timestamp carried by UUIDs of `version`.
    pub fn of(version: u8) -> Result<Self> {
        match version {
            1 | 6 => Ok(Self::GREGORIAN_100NS),
            2 => Ok(Self::DCE_SECURITY),
            7 => Ok(Self::UNIX_MS),
            _ => Err(Error::UnsupportedVersion { version }),
        }
    }

    /// Converts Unix nanoseconds into a tick count, rounding towards negative infinity.
    ///
    /// Instants too far in the future for `i128` arithmetic saturate to a tick count that no time
    /// field can hold.
    pub const fn to_ticks(&self, nanos: i128) -> i128 {
        nanos.saturating_sub(self.lowest).div_euclid(self.tick)
    }

    /// Converts a tick count back into Unix nanoseconds.
    pub const fn from_ticks(&self, ticks: i128) -> i128 {
        ticks.saturating_mul(self.tick).saturating_add(self.lowest)
    }

    /// Rounds `nanos` down to the tick grid of this domain.
    pub const fn truncate(&self, nanos: i128) -> i128 {
        self.from_ticks(self.to_ticks(nanos))
    }
}

/// Returns the timestamp embedded in `uuid` as nanoseconds since the Unix epoch.
///
/// # Examples
///
/// ```rust
/// use uuidtool::{decode_timestamp, Uuid};
///
/// let x: Uuid = "017f22e2-79b0-7cc3-98c4-dc0c0c07398f".parse()?;
/// assert_eq!(decode_timestamp(&x)?, 1_645_557_742_000 * 1_000_000);
/// # Ok::<(), uuidtool::Error>(())
/// ```
pub fn decode_timestamp(uuid: &Uuid) -> Result<i128> {
    let domain = Domain::of(uuid.version())?;
    let ticks = uuid.field(Field::Time)?;
    Ok(domain.from_ticks(ticks.into()))
}

/// Returns a copy of `uuid` whose embedded timestamp is `nanos` truncated to the version's tick.
///
/// Fails with [`Error::ValueOutOfRange`] if the resulting tick count is negative or does not fit
/// in the time field.
pub fn encode_timestamp(uuid: Uuid, nanos: i128) -> Result<Uuid> {
    let version = uuid.version();
    let domain = Domain::of(version)?;
    let ticks = domain.to_ticks(nanos);
    match u64::try_from(ticks) {
        Ok(ticks) => uuid.with_field(Field::Time, ticks),
        Err(_) => Err(Error::ValueOutOfRange {
            field: Field::Time,
            value: ticks,
            width: layout::lookup(version, Field::Time).map_or(0, |l| l.width()),
        }),
    }
}
