//! Field accessors driven by the layout table.

use crate::layout::{self, Field, Layout};
use crate::{Error, Result, Uuid};

impl Uuid {
    /// Returns the layout of `field` for this UUID's version.
    fn layout_of(&self, field: Field) -> Result<Layout> {
        let version = self.version();
        layout::lookup(version, field).ok_or(Error::UnsupportedField { version, field })
    }

    /// Reads the raw value of `field`.
    ///
    /// The time field is returned as the internal tick count of the version; use
    /// [`decode_timestamp`](crate::decode_timestamp) for Unix nanoseconds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidtool::{Field, Uuid};
    ///
    /// let x: Uuid = "c232ab00-9414-11ec-b3c8-9f6bdeced846".parse()?;
    /// assert_eq!(x.field(Field::Node)?, 0x9f6bdeced846);
    /// assert_eq!(x.field(Field::ClockSequence)?, 0x33c8);
    /// assert!(x.field(Field::CustomA).is_err());
    /// # Ok::<(), uuidtool::Error>(())
    /// ```
    pub fn field(&self, field: Field) -> Result<u64> {
        let layout = self.layout_of(field)?;
        Ok(layout.read(self.as_u128()) as u64)
    }

    /// Returns a copy of this UUID with `field` replaced by `value`.
    ///
    /// All other bits, including the version and variant tags, are preserved.
    pub fn with_field(self, field: Field, value: u64) -> Result<Self> {
        let layout = self.layout_of(field)?;
        let width = layout.width();
        if u128::from(value) >> width != 0 {
            return Err(Error::ValueOutOfRange {
                field,
                value: value.into(),
                width,
            });
        }
        Ok(Self::from_u128(layout.write(self.as_u128(), value.into())))
    }

    /// Returns every field addressable for this UUID's version together with its raw value.
    pub fn fields(&self) -> impl Iterator<Item = (Field, u64)> + '_ {
        layout::fields_of(self.version()).filter_map(move |f| Some((f, self.field(f).ok()?)))
    }
}
