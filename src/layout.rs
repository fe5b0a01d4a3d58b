//! Static description of where each semantic field lives inside a UUID of a given version.
//!
//! Bit offsets count from the least significant bit of the 128-bit value, so the version nibble
//! occupies bits 76-79 and the variant bits occupy 62-63. No field range overlaps either of them.
//!
//! | Version | time                    | clock_sequence | node   | local_id | local_domain |
//! | ------- | ----------------------- | -------------- | ------ | -------- | ------------ |
//! | 1       | 96/32 + 80/16 + 64/12   | 48/14          | 0/48   |          |              |
//! | 2       | 80/16 + 64/12           | 56/6           | 0/48   | 96/32    | 48/8         |
//! | 6       | 64/12 + 80/48           | 48/14          | 0/48   |          |              |
//! | 7       | 80/48                   |                |        |          |              |
//!
//! Version 8 has `custom_a` at 80/48, `custom_b` at 64/12 and `custom_c` at 0/62.

use std::fmt;

/// A named, version-scoped field of a UUID.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Field {
    /// Internal timestamp tick count.
    Time,
    ClockSequence,
    /// IEEE 802 node identifier, usually a MAC address.
    Node,
    /// DCE Security local identifier (a POSIX UID or GID).
    LocalId,
    /// DCE Security local domain (0 = person, 1 = group, 2 = org).
    LocalDomain,
    CustomA,
    CustomB,
    CustomC,
}

impl Field {
    /// Every field in layout order.
    pub const ALL: [Field; 8] = [
        Field::Time,
        Field::ClockSequence,
        Field::Node,
        Field::LocalId,
        Field::LocalDomain,
        Field::CustomA,
        Field::CustomB,
        Field::CustomC,
    ];

    /// Returns the snake_case name of the field.
    pub const fn name(self) -> &'static str {
        match self {
            Field::Time => "time",
            Field::ClockSequence => "clock_sequence",
            Field::Node => "node",
            Field::LocalId => "local_id",
            Field::LocalDomain => "local_domain",
            Field::CustomA => "custom_a",
            Field::CustomB => "custom_b",
            Field::CustomC => "custom_c",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A contiguous run of bits inside the 128-bit value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct BitRange {
    /// Position of the lowest bit.
    pub offset: u32,
    /// Number of bits.
    pub width: u32,
}

impl BitRange {
    const fn new(offset: u32, width: u32) -> Self {
        Self { offset, width }
    }

    /// Returns the mask that selects this range in place.
    pub const fn mask(self) -> u128 {
        ((1u128 << self.width) - 1) << self.offset
    }

    /// Reads the bits of this range from `value`, shifted down to bit 0.
    pub const fn extract(self, value: u128) -> u128 {
        (value & self.mask()) >> self.offset
    }

    /// Replaces the bits of this range in `value` with the low `width` bits of `bits`.
    pub const fn insert(self, value: u128, bits: u128) -> u128 {
        (value & !self.mask()) | ((bits << self.offset) & self.mask())
    }
}

/// The bit ranges backing one field of one version.
///
/// Segments are listed from the least significant part of the field value upwards, so segment
/// `i` holds the field bits starting at the sum of the widths of segments `0..i`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Layout {
    segments: &'static [BitRange],
}

impl Layout {
    /// Returns the segments of the field, least significant first.
    pub const fn segments(&self) -> &'static [BitRange] {
        self.segments
    }

    /// Returns the total number of bits of the field.
    pub fn width(&self) -> u32 {
        self.segments.iter().map(|s| s.width).sum()
    }

    /// Gathers the field value scattered across the segments of `value`.
    pub(crate) fn read(&self, value: u128) -> u128 {
        let mut out = 0;
        let mut shift = 0;
        for s in self.segments {
            out |= s.extract(value) << shift;
            shift += s.width;
        }
        out
    }

    /// Scatters `bits` across the segments of `value`, leaving every other bit untouched.
    pub(crate) fn write(&self, value: u128, bits: u128) -> u128 {
        let mut out = value;
        let mut shift = 0;
        for s in self.segments {
            out = s.insert(out, bits >> shift);
            shift += s.width;
        }
        out
    }
}

const V1_TIME: &[BitRange] = &[
    BitRange::new(96, 32),
    BitRange::new(80, 16),
    BitRange::new(64, 12),
];
const V2_TIME: &[BitRange] = &[BitRange::new(80, 16), BitRange::new(64, 12)];
const V6_TIME: &[BitRange] = &[BitRange::new(64, 12), BitRange::new(80, 48)];
const V7_TIME: &[BitRange] = &[BitRange::new(80, 48)];

const CLOCK_SEQ_14: &[BitRange] = &[BitRange::new(48, 14)];
const CLOCK_SEQ_6: &[BitRange] = &[BitRange::new(56, 6)];
const NODE: &[BitRange] = &[BitRange::new(0, 48)];

static TABLE: &[(u8, Field, &[BitRange])] = &[
    (1, Field::Time, V1_TIME),
    (1, Field::ClockSequence, CLOCK_SEQ_14),
    (1, Field::Node, NODE),
    (2, Field::Time, V2_TIME),
    (2, Field::ClockSequence, CLOCK_SEQ_6),
    (2, Field::Node, NODE),
    (2, Field::LocalId, &[BitRange::new(96, 32)]),
    (2, Field::LocalDomain, &[BitRange::new(48, 8)]),
    (6, Field::Time, V6_TIME),
    (6, Field::ClockSequence, CLOCK_SEQ_14),
    (6, Field::Node, NODE),
    (7, Field::Time, V7_TIME),
    (8, Field::CustomA, &[BitRange::new(80, 48)]),
    (8, Field::CustomB, &[BitRange::new(64, 12)]),
    (8, Field::CustomC, &[BitRange::new(0, 62)]),
];

/// Looks up the layout of `field` for UUIDs of `version`, if that version has such a field.
pub fn lookup(version: u8, field: Field) -> Option<Layout> {
    TABLE
        .iter()
        .find(|(v, f, _)| *v == version && *f == field)
        .map(|(_, _, segments)| Layout { segments })
}

/// Returns the fields addressable in UUIDs of `version`, in layout order.
pub fn fields_of(version: u8) -> impl Iterator<Item = Field> {
    Field::ALL
        .into_iter()
        .filter(move |f| lookup(version, *f).is_some())
}

#[cfg(test)]
mod tests {
    use super::{fields_of, lookup, Field, TABLE};

    const VERSION_MASK: u128 = 0xf << 76;
    const VARIANT_MASK: u128 = 0b11 << 62;

    /// Keeps every field clear of version and variant bits
    #[test]
    fn keeps_every_field_clear_of_version_and_variant_bits() {
        for (version, field, segments) in TABLE {
            for s in segments.iter() {
                assert_eq!(s.mask() & VERSION_MASK, 0, "v{} {}", version, field);
                assert_eq!(s.mask() & VARIANT_MASK, 0, "v{} {}", version, field);
            }
        }
    }

    /// Keeps fields of one version disjoint
    #[test]
    fn keeps_fields_of_one_version_disjoint() {
        for version in 0..16 {
            let mut seen = 0u128;
            for field in fields_of(version) {
                for s in lookup(version, field).unwrap().segments() {
                    assert_eq!(seen & s.mask(), 0, "v{} {}", version, field);
                    seen |= s.mask();
                }
            }
        }
    }

    /// Declares expected field widths
    #[test]
    fn declares_expected_field_widths() {
        let cases = [
            (1, Field::Time, 60),
            (1, Field::ClockSequence, 14),
            (1, Field::Node, 48),
            (2, Field::Time, 28),
            (2, Field::ClockSequence, 6),
            (2, Field::LocalId, 32),
            (2, Field::LocalDomain, 8),
            (6, Field::Time, 60),
            (7, Field::Time, 48),
            (8, Field::CustomA, 48),
            (8, Field::CustomB, 12),
            (8, Field::CustomC, 62),
        ];

        for (version, field, width) in cases {
            assert_eq!(lookup(version, field).unwrap().width(), width);
        }
    }

    /// Returns nothing for fields a version lacks
    #[test]
    fn returns_nothing_for_fields_a_version_lacks() {
        assert!(lookup(7, Field::Node).is_none());
        assert!(lookup(1, Field::LocalId).is_none());
        assert!(lookup(4, Field::Time).is_none());
        assert_eq!(fields_of(3).count(), 0);
        assert_eq!(
            fields_of(2).collect::<Vec<_>>(),
            [
                Field::Time,
                Field::ClockSequence,
                Field::Node,
                Field::LocalId,
                Field::LocalDomain
            ]
        );
    }

    /// Scatters and gathers split fields
    #[test]
    fn scatters_and_gathers_split_fields() {
        let layout = lookup(6, Field::Time).unwrap();
        let written = layout.write(0, 0x0abc_def0_1234_5678);
        assert_eq!(written, (0xabcd_ef01_2345_u128 << 80) | (0x678_u128 << 64));
        assert_eq!(layout.read(written), 0x0abc_def0_1234_5678);

        let layout = lookup(1, Field::Time).unwrap();
        let written = layout.write(u128::MAX, 0);
        assert_eq!(written, !(0xffff_ffff_ffff_0fff_u128 << 64));
        assert_eq!(layout.read(written), 0);
    }
}
