//! Enumeration of UUIDs whose timestamps fall around or between reference UUIDs.
//!
//! Both operations reduce to a half-open window `[low, high)` of tick-aligned timestamps in the
//! domain of the reference UUID's version. The window is walked lazily, so even a window spanning
//! the whole representable period costs nothing until it is consumed.

use std::{fmt, str};

use tracing::debug;

use crate::layout::{self, Field, Layout};
use crate::timestamp::{self, Domain};
use crate::{Error, Result, Uuid};

/// Emission order of an enumerated window.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Order {
    /// Increasing timestamps.
    Asc,
    /// Decreasing timestamps.
    Desc,
    /// Middle element first, then alternating one below, one above, and so on outwards.
    #[default]
    Alt,
}

impl Order {
    /// Maps emission position `pos` to an index into an ascending sequence of `len` elements.
    const fn index(self, len: u128, pos: u128) -> u128 {
        match self {
            Order::Asc => pos,
            Order::Desc => len - 1 - pos,
            Order::Alt => {
                let mid = len / 2;
                if len % 2 == 1 {
                    match pos {
                        0 => mid,
                        p if p % 2 == 1 => mid - (p + 1) / 2,
                        p => mid + p / 2,
                    }
                } else if pos % 2 == 0 {
                    mid - 1 - pos / 2
                } else {
                    mid + pos / 2
                }
            }
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
            Order::Alt => "alt",
        })
    }
}

impl str::FromStr for Order {
    type Err = Error;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        match src {
            "asc" => Ok(Order::Asc),
            "desc" => Ok(Order::Desc),
            "alt" => Ok(Order::Alt),
            _ => Err(Error::InvalidOrder {
                input: src.to_owned(),
            }),
        }
    }
}

/// Reorders `items`, assumed to be in ascending order, into alternating order.
///
/// # Examples
///
/// ```rust
/// use uuidtool::range::alt_sort;
///
/// assert_eq!(alt_sort(&[0, 1, 2, 3, 4]), [2, 1, 3, 0, 4]);
/// assert_eq!(alt_sort(&[0, 1, 2, 3]), [1, 2, 0, 3]);
/// ```
pub fn alt_sort<T: Clone>(items: &[T]) -> Vec<T> {
    let len = items.len() as u128;
    (0..len)
        .map(|pos| items[Order::Alt.index(len, pos) as usize].clone())
        .collect()
}

/// Tick-aligned timestamps `t` with `low <= t < high`, in nanoseconds since the Unix epoch.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TimestampRange {
    low: i128,
    high: i128,
    tick: i128,
}

impl TimestampRange {
    /// Creates a range starting at `low`, stepping by `tick` and ending before `high`.
    ///
    /// Returns `None` unless `tick` is positive. A `high` at or below `low` makes an empty range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidtool::range::TimestampRange;
    ///
    /// let r = TimestampRange::new(0, 250, 100).unwrap();
    /// assert_eq!(r.len(), 3);
    /// assert!(TimestampRange::new(0, 250, 0).is_none());
    /// ```
    pub const fn new(low: i128, high: i128, tick: i128) -> Option<Self> {
        if tick > 0 {
            Some(Self { low, high, tick })
        } else {
            None
        }
    }

    /// Returns the inclusive lower bound.
    pub const fn low(&self) -> i128 {
        self.low
    }

    /// Returns the exclusive upper bound.
    pub const fn high(&self) -> i128 {
        self.high
    }

    /// Returns the step between consecutive timestamps.
    pub const fn tick(&self) -> i128 {
        self.tick
    }

    /// Returns the number of timestamps in the range.
    pub const fn len(&self) -> u128 {
        if self.high <= self.low {
            return 0;
        }
        let span = self.high.abs_diff(self.low);
        let tick = self.tick as u128;
        span / tick + (span % tick != 0) as u128
    }

    /// Returns `true` if the range holds no timestamp.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the `index`-th timestamp in ascending order.
    pub const fn get(&self, index: u128) -> Option<i128> {
        if index < self.len() {
            // the offset stays below `high - low`, so the sum lands back inside i128
            Some(self.low.wrapping_add((index * self.tick as u128) as i128))
        } else {
            None
        }
    }

    /// Returns an iterator over the timestamps in `order`.
    pub const fn iter(&self, order: Order) -> Timestamps {
        Timestamps {
            range: *self,
            order,
            len: self.len(),
            pos: 0,
        }
    }
}

/// Lazy iterator over a [`TimestampRange`] in a given [`Order`].
#[derive(Clone, Debug)]
pub struct Timestamps {
    range: TimestampRange,
    order: Order,
    len: u128,
    pos: u128,
}

impl Iterator for Timestamps {
    type Item = i128;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.len {
            return None;
        }
        let index = self.order.index(self.len, self.pos);
        self.pos += 1;
        self.range.get(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.pos;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Lazy iterator over copies of a base UUID carrying successive timestamps.
///
/// Every bit outside the time field, including the version and variant tags, is taken from the
/// base UUID. The sequence can be restarted by cloning it before consumption.
#[derive(Clone, Debug)]
pub struct UuidSequence {
    base: u128,
    time: Layout,
    domain: Domain,
    timestamps: Timestamps,
}

impl UuidSequence {
    fn new(base: Uuid, domain: Domain, range: TimestampRange, order: Order) -> Result<Self> {
        let version = base.version();
        let time = layout::lookup(version, Field::Time).ok_or(Error::UnsupportedField {
            version,
            field: Field::Time,
        })?;
        Ok(Self {
            base: base.as_u128(),
            time,
            domain,
            timestamps: range.iter(order),
        })
    }

    /// Returns the window of timestamps the sequence walks through.
    pub const fn range(&self) -> TimestampRange {
        self.timestamps.range
    }
}

impl Iterator for UuidSequence {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        let nanos = self.timestamps.next()?;
        // the window never leaves [lowest, highest], so the tick count is non-negative and fits
        let ticks = self.domain.to_ticks(nanos) as u128;
        Some(Uuid::from_u128(self.time.write(self.base, ticks)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.timestamps.size_hint()
    }
}

/// Enumerates `count` UUIDs around the timestamp of `uuid`, clamped to the version's domain.
///
/// The window reaches `count / 2` ticks below the timestamp of `uuid` and `count / 2 + count % 2`
/// ticks above it, upper bound exclusive, so `uuid` itself is part of the sequence.
///
/// Fails with [`Error::UnsupportedVersion`] if `uuid` carries no timestamp and with
/// [`Error::InvalidCount`] if `count` is 0 or 1.
///
/// # Examples
///
/// ```rust
/// use uuidtool::{range, Order, Uuid};
///
/// let x: Uuid = "017f22e2-79b0-7cc3-98c4-dc0c0c07398f".parse()?;
/// let mut it = range(x, 3, Order::Asc)?;
/// assert_eq!(it.next().unwrap().to_string(), "017f22e2-79af-7cc3-98c4-dc0c0c07398f");
/// assert_eq!(it.next(), Some(x));
/// assert_eq!(it.next().unwrap().to_string(), "017f22e2-79b1-7cc3-98c4-dc0c0c07398f");
/// assert_eq!(it.next(), None);
/// # Ok::<(), uuidtool::Error>(())
/// ```
pub fn range(uuid: Uuid, count: u64, order: Order) -> Result<UuidSequence> {
    let version = uuid.version();
    let domain = Domain::of(version)?;
    if count <= 1 {
        return Err(Error::InvalidCount { count });
    }

    let t = timestamp::decode_timestamp(&uuid)?;
    let below = i128::from(count / 2);
    let above = i128::from(count / 2 + count % 2);
    let window = TimestampRange {
        low: domain.lowest.max(t - domain.tick * below),
        high: domain.highest.min(t + domain.tick * above),
        tick: domain.tick,
    };
    debug!(version, count, low = %window.low, high = %window.high, "computed range bounds");

    UuidSequence::new(uuid, domain, window, order)
}

/// Enumerates the UUIDs whose timestamps lie strictly between those of `first` and `second`.
///
/// The arguments may come in either order; the lower timestamp is used as the lower bound. All
/// other fields are copied from `first`.
///
/// Fails with [`Error::VersionMismatch`] if the versions differ, with
/// [`Error::UnsupportedVersion`] if they carry no timestamp and with
/// [`Error::IdenticalTimestamps`] if both timestamps are equal.
pub fn sandwich(first: Uuid, second: Uuid, order: Order) -> Result<UuidSequence> {
    let version = first.version();
    if version != second.version() {
        return Err(Error::VersionMismatch {
            first: version,
            second: second.version(),
        });
    }

    let domain = Domain::of(version)?;
    let t1 = timestamp::decode_timestamp(&first)?;
    let t2 = timestamp::decode_timestamp(&second)?;
    if t1 == t2 {
        return Err(Error::IdenticalTimestamps);
    }

    let window = TimestampRange {
        low: domain.lowest.max(t1.min(t2) + domain.tick),
        high: domain.highest.min(t1.max(t2)),
        tick: domain.tick,
    };
    debug!(version, low = %window.low, high = %window.high, "computed sandwich bounds");

    UuidSequence::new(first, domain, window, order)
}
