//! Field replacement on an existing UUID.

use crate::generator::Fields;
use crate::{timestamp, Error, Result, Uuid};

/// Returns a copy of `uuid` with every value supplied in `fields` written into it.
///
/// The version never changes, so only fields that UUIDs of `uuid`'s version carry may be
/// supplied. The time is applied first, then the remaining fields in layout order.
///
/// Fails with [`Error::FieldNotApplicable`] if `fields` holds a value the version cannot carry,
/// including a namespace or a name, which cannot be edited after hashing, and with
/// [`Error::ValueOutOfRange`] if a value does not fit its field.
///
/// # Examples
///
/// ```rust
/// use uuidtool::{edit, generator::Fields, Uuid};
///
/// let x: Uuid = "c232ab00-9414-11ec-b3c8-9f6bdeced846".parse()?;
/// let fields = Fields {
///     node: Some(0x0011_2233_4455),
///     ..Default::default()
/// };
/// assert_eq!(edit(x, &fields)?.to_string(), "c232ab00-9414-11ec-b3c8-001122334455");
/// # Ok::<(), uuidtool::Error>(())
/// ```
pub fn edit(uuid: Uuid, fields: &Fields) -> Result<Uuid> {
    let version = uuid.version();
    if fields.namespace.is_some() {
        return Err(Error::FieldNotApplicable {
            version,
            field: "namespace",
        });
    }
    if fields.name.is_some() {
        return Err(Error::FieldNotApplicable {
            version,
            field: "name",
        });
    }
    fields.check(version)?;

    let mut edited = match fields.time {
        Some(nanos) => timestamp::encode_timestamp(uuid, nanos)?,
        None => uuid,
    };
    for (field, value) in fields.layout_values() {
        if let Some(value) = value {
            edited = edited.with_field(field, value)?;
        }
    }
    Ok(edited)
}
