//! Bit-level inspection, editing, generation and enumeration of UUIDs
//!
//! ```rust
//! use uuidtool::{decode_timestamp, edit, generator::Fields, info, Field, Uuid};
//!
//! let uuid: Uuid = "c232ab00-9414-11ec-b3c8-9f6bdeced846".parse()?;
//! assert_eq!(uuid.version(), 1);
//! assert_eq!(uuid.field(Field::Node)?, 0x9f6bdeced846);
//! assert_eq!(decode_timestamp(&uuid)?, 1_645_557_742_000_000_000); // ns since Unix epoch
//!
//! let fields = Fields {
//!     clock_sequence: Some(0),
//!     ..Default::default()
//! };
//! let edited = edit(uuid, &fields)?;
//! println!("{}", edited); // "c232ab00-9414-11ec-8000-9f6bdeced846"
//! println!("{}", info(edited)); // version, variant, timestamp and every field
//! # Ok::<(), uuidtool::Error>(())
//! ```
//!
//! # Field and bit layout
//!
//! Every operation goes through a static table that maps a `(version, field)` pair to the bit
//! ranges holding the field. Version 1, for instance, scatters its 60-bit timestamp over three
//! ranges:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           time_low                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           time_mid            |  ver  |       time_high       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|         clock_seq         |             node              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             node                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! See the [`layout`] module for the complete table. Field setters mask out the target bits and
//! leave everything else, including the `ver` and `var` tags, untouched; a UUID never changes its
//! version through this crate.
//!
//! # Timestamps
//!
//! Versions 1, 2, 6 and 7 embed a timestamp. [`decode_timestamp`] and [`encode_timestamp`]
//! convert it from and to nanoseconds since the Unix epoch, truncating to the resolution of the
//! version: 100 ns for versions 1 and 6, 429.4967295 s for version 2 and 1 ms for version 7.
//!
//! # Generation
//!
//! [`new_uuid`] builds a UUID of any version from 1 to 8 out of partially supplied
//! [`generator::Fields`], filling the rest with the current time, the host MAC address, the
//! current user or group id, or random bits:
//!
//! ```rust
//! use uuidtool::{generator::Fields, new_uuid};
//!
//! let uuid = new_uuid(7, &Fields::default())?;
//! println!("{}", uuid); // e.g. "01809424-3e59-7c05-9219-566f82fff672"
//! # Ok::<(), uuidtool::Error>(())
//! ```
//!
//! # Ranges
//!
//! [`range`] and [`sandwich`] lazily enumerate copies of a UUID whose timestamps step through a
//! window around one UUID or between two, in ascending, descending or middle-outward order:
//!
//! ```rust
//! use uuidtool::{sandwich, Order, Uuid};
//!
//! let a: Uuid = "017f22e2-79b0-7cc3-98c4-dc0c0c07398f".parse()?;
//! let b: Uuid = "017f22e2-79b4-7cc3-98c4-dc0c0c07398f".parse()?;
//! for uuid in sandwich(a, b, Order::Asc)? {
//!     println!("{}", uuid); // 017f22e2-79b1-..., 017f22e2-79b2-..., 017f22e2-79b3-...
//! }
//! # Ok::<(), uuidtool::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod id;
pub use id::Uuid;

mod error;
pub use error::{Error, Result};

pub mod layout;
pub use layout::Field;

mod codec;

pub mod timestamp;
pub use timestamp::{decode_timestamp, encode_timestamp};

pub mod input;
pub mod time;

mod host;

pub mod generator;

mod global_gen;
pub use global_gen::new_uuid;

mod edit;
pub use edit::edit;

mod info;
pub use info::{info, Info};

pub mod range;
#[doc(inline)]
pub use range::{range, sandwich, Order};
