//! UUID generator and the field values it accepts.

use tracing::debug;

use crate::layout::{self, Field};
use crate::{host, time, timestamp, Error, Result, Uuid};

pub mod with_rand08;

/// Multicast and locally-administered bits of a node that is not a real MAC address.
const RANDOM_NODE_BITS: u64 = 0x0300_0000_0000;

/// A trait that defines the minimum random number generator interface for [`Generator`].
pub trait Rng {
    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;

    /// Fills `dest` with random data.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// Field values to build a UUID from. Every value is optional; what is left unset is defaulted
/// by the generator according to the requested version.
///
/// # Examples
///
/// ```rust
/// use uuidtool::generator::{Fields, Generator};
///
/// let fields = Fields {
///     time: Some(1_645_557_742_000_000_000),
///     clock_sequence: Some(0x33c8),
///     node: Some(0x9f6b_dece_d846),
///     ..Default::default()
/// };
/// let mut g = Generator::with_rand08(rand::thread_rng());
/// let uuid = g.generate(1, &fields)?;
/// assert_eq!(uuid.to_string(), "c232ab00-9414-11ec-b3c8-9f6bdeced846");
/// # Ok::<(), uuidtool::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Fields {
    /// Timestamp in nanoseconds since the Unix epoch (versions 1, 2, 6, 7).
    pub time: Option<i128>,
    /// Clock sequence (versions 1, 2, 6).
    pub clock_sequence: Option<u64>,
    /// Node, usually a MAC address (versions 1, 2, 6).
    pub node: Option<u64>,
    /// Local id (version 2).
    pub local_id: Option<u64>,
    /// Local domain (version 2).
    pub local_domain: Option<u64>,
    /// Namespace UUID (versions 3, 5).
    pub namespace: Option<Uuid>,
    /// Name hashed into the namespace (versions 3, 5).
    pub name: Option<String>,
    /// Custom field A (version 8).
    pub custom_a: Option<u64>,
    /// Custom field B (version 8).
    pub custom_b: Option<u64>,
    /// Custom field C (version 8).
    pub custom_c: Option<u64>,
}

impl Fields {
    /// Returns the supplied values that map onto layout fields, in the order they are applied.
    pub(crate) fn layout_values(&self) -> [(Field, Option<u64>); 7] {
        [
            (Field::ClockSequence, self.clock_sequence),
            (Field::Node, self.node),
            (Field::LocalId, self.local_id),
            (Field::LocalDomain, self.local_domain),
            (Field::CustomA, self.custom_a),
            (Field::CustomB, self.custom_b),
            (Field::CustomC, self.custom_c),
        ]
    }

    /// Fails with [`Error::FieldNotApplicable`] if a value is supplied that UUIDs of `version`
    /// cannot carry.
    pub fn check(&self, version: u8) -> Result<()> {
        let not_applicable = |field| Err(Error::FieldNotApplicable { version, field });

        if self.time.is_some() && layout::lookup(version, Field::Time).is_none() {
            return not_applicable(Field::Time.name());
        }
        for (field, value) in self.layout_values() {
            if value.is_some() && layout::lookup(version, field).is_none() {
                return not_applicable(field.name());
            }
        }

        let name_based = version == 3 || version == 5;
        if self.namespace.is_some() && !name_based {
            return not_applicable("namespace");
        }
        if self.name.is_some() && !name_based {
            return not_applicable("name");
        }
        Ok(())
    }
}

/// Resolves a namespace given either as a UUID or as one of the RFC 9562 aliases `@dns`, `@url`,
/// `@oid` and `@x500`.
pub fn resolve_namespace(input: &str) -> Result<Uuid> {
    let namespace = match input {
        "@dns" => uuid::Uuid::NAMESPACE_DNS,
        "@url" => uuid::Uuid::NAMESPACE_URL,
        "@oid" => uuid::Uuid::NAMESPACE_OID,
        "@x500" => uuid::Uuid::NAMESPACE_X500,
        _ => {
            return input.parse().map_err(|_| Error::UnknownNamespace {
                input: input.to_owned(),
            })
        }
    };
    Ok(namespace.into())
}

/// Returns an all-zero UUID carrying the version nibble and the `10` variant bits.
const fn template(version: u8) -> Uuid {
    Uuid::from_u128(((version as u128) << 76) | (0b10 << 62))
}

/// Builds UUIDs of any version from partially supplied field values.
///
/// Randomness comes from a pluggable [`Rng`]; wall clock time and host identifiers are read only
/// when the corresponding field is left unset.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Generator<R> {
    /// The random number generator used by the generator.
    rng: R,
}

impl<R: Rng> Generator<R> {
    /// Creates a generator instance.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generates a UUID of `version` from `fields`.
    ///
    /// Fails with [`Error::UnsupportedVersion`] unless `version` is within 1..=8, with
    /// [`Error::FieldNotApplicable`] if `fields` holds a value the version cannot carry, with
    /// [`Error::MissingArgument`] if version 3 or 5 lacks a namespace or a name, and with
    /// [`Error::ValueOutOfRange`] if a value does not fit its field.
    pub fn generate(&mut self, version: u8, fields: &Fields) -> Result<Uuid> {
        if !(1..=8).contains(&version) {
            return Err(Error::UnsupportedVersion { version });
        }
        fields.check(version)?;

        match version {
            1 | 6 => self.generate_gregorian(version, fields),
            2 => self.generate_dce_security(fields),
            3 | 5 => generate_name_based(version, fields),
            4 => Ok(self.generate_v4()),
            7 => self.generate_v7(fields),
            _ => self.generate_v8(fields),
        }
    }

    /// Generates a new UUIDv4 object utilizing the random number generator inside.
    pub fn generate_v4(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        bytes[6] = 0x40 | (bytes[6] >> 4);
        bytes[8] = 0x80 | (bytes[8] >> 2);
        Uuid::from(bytes)
    }

    /// Versions 1 and 6 differ only in where the timestamp bits go.
    fn generate_gregorian(&mut self, version: u8, fields: &Fields) -> Result<Uuid> {
        let uuid = timestamp::encode_timestamp(
            template(version),
            fields.time.unwrap_or_else(time::now_ns),
        )?;
        let clock_sequence = match fields.clock_sequence {
            Some(value) => value,
            None => self.random_field(version, Field::ClockSequence),
        };
        let node = match fields.node {
            Some(value) => value,
            None => self.host_node(),
        };

        uuid.with_field(Field::ClockSequence, clock_sequence)?
            .with_field(Field::Node, node)
    }

    fn generate_dce_security(&mut self, fields: &Fields) -> Result<Uuid> {
        let local_domain = fields.local_domain.unwrap_or(0);
        let local_id = fields.local_id.unwrap_or_else(|| {
            let local_id = host::local_id(local_domain);
            debug!(local_domain, local_id, "defaulted DCE Security local id");
            local_id
        });

        let uuid = self.generate_gregorian(2, fields)?;
        uuid.with_field(Field::LocalId, local_id)?
            .with_field(Field::LocalDomain, local_domain)
    }

    fn generate_v7(&mut self, fields: &Fields) -> Result<Uuid> {
        let uuid = timestamp::encode_timestamp(
            template(7),
            fields.time.unwrap_or_else(time::now_ns),
        )?;
        let unix_ts_ms = uuid.field(Field::Time)?;
        let rand_a = self.random_bits(12) as u16;
        let rand_b = self.random_bits(62);
        Ok(Uuid::from_fields_v7(unix_ts_ms, rand_a, rand_b))
    }

    fn generate_v8(&mut self, fields: &Fields) -> Result<Uuid> {
        let supplied = [
            (Field::CustomA, fields.custom_a),
            (Field::CustomB, fields.custom_b),
            (Field::CustomC, fields.custom_c),
        ];

        let mut uuid = template(8);
        for (field, value) in supplied {
            let value = match value {
                Some(value) => value,
                None => self.random_field(8, field),
            };
            uuid = uuid.with_field(field, value)?;
        }
        Ok(uuid)
    }

    /// Returns the host MAC address, or a random multicast node if none can be read.
    fn host_node(&mut self) -> u64 {
        host::mac_node().unwrap_or_else(|| {
            let node = self.random_bits(48) | RANDOM_NODE_BITS;
            debug!(node, "host MAC address unavailable, using random node");
            node
        })
    }

    /// Returns a random value as wide as `field` is for `version`.
    fn random_field(&mut self, version: u8, field: Field) -> u64 {
        let width = layout::lookup(version, field).map_or(0, |l| l.width());
        self.random_bits(width)
    }

    /// Returns `width` random bits (`width` < 64).
    fn random_bits(&mut self, width: u32) -> u64 {
        self.rng.next_u64() & ((1 << width) - 1)
    }
}

fn generate_name_based(version: u8, fields: &Fields) -> Result<Uuid> {
    let namespace = fields.namespace.ok_or(Error::MissingArgument {
        version,
        argument: "namespace",
    })?;
    let name = fields.name.as_deref().ok_or(Error::MissingArgument {
        version,
        argument: "name",
    })?;

    let namespace = uuid::Uuid::from(namespace);
    let hashed = if version == 3 {
        uuid::Uuid::new_v3(&namespace, name.as_bytes())
    } else {
        uuid::Uuid::new_v5(&namespace, name.as_bytes())
    };
    Ok(hashed.into())
}

#[cfg(test)]
mod tests {
    use super::{resolve_namespace, with_rand08, Fields, Generator};
    use crate::{decode_timestamp, host, time, Error, Field, Uuid};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    type TestGen = Generator<with_rand08::Adapter<ChaCha8Rng>>;

    const T_2022: i128 = 1_645_557_742_000_000_000;
    const N_SAMPLES: usize = 20_000;

    fn new_gen(seed: u64) -> TestGen {
        Generator::with_rand08(ChaCha8Rng::seed_from_u64(seed))
    }

    fn uuid(text: &str) -> Uuid {
        text.parse().unwrap()
    }

    /// Counts '1' of each bit across samples, bit 0 being the least significant
    fn count_ones(samples: &[Uuid]) -> [u32; 128] {
        let mut bins = [0u32; 128];
        for e in samples {
            let value = e.as_u128();
            for (i, bin) in bins.iter_mut().enumerate() {
                *bin += ((value >> i) & 1) as u32;
            }
        }
        bins
    }

    /// Asserts bits are set to 1 at ~50% probability
    fn assert_random_bits(bins: &[u32; 128], bits: impl Iterator<Item = usize>) {
        // set margin based on binom dist 99.999% confidence interval
        let margin = 4.417173 * (0.5 * 0.5 / N_SAMPLES as f64).sqrt();
        for i in bits {
            let p = bins[i] as f64 / N_SAMPLES as f64;
            assert!((p - 0.5).abs() < margin, "random bit {}: {}", i, p);
        }
    }

    /// Builds prepared cases from explicit fields
    #[test]
    fn builds_prepared_cases_from_explicit_fields() {
        let gregorian = Fields {
            time: Some(T_2022),
            clock_sequence: Some(0x33c8),
            node: Some(0x9f6b_dece_d846),
            ..Default::default()
        };
        let mut g = new_gen(0);
        assert_eq!(
            g.generate(1, &gregorian),
            Ok(uuid("c232ab00-9414-11ec-b3c8-9f6bdeced846"))
        );
        assert_eq!(
            g.generate(6, &gregorian),
            Ok(uuid("1ec9414c-232a-6b00-b3c8-9f6bdeced846"))
        );

        let dce = Fields {
            time: Some(T_2022),
            clock_sequence: Some(0x0a),
            node: Some(0x9f6b_dece_d846),
            local_id: Some(1000),
            local_domain: Some(1),
            ..Default::default()
        };
        assert_eq!(
            g.generate(2, &dce),
            Ok(uuid("000003e8-9414-21ec-8a01-9f6bdeced846"))
        );

        let custom = Fields {
            custom_a: Some(0x1234_5678_9abc),
            custom_b: Some(0xdef),
            custom_c: Some(0x3fed_cba9_8765_4321),
            ..Default::default()
        };
        assert_eq!(
            g.generate(8, &custom),
            Ok(uuid("12345678-9abc-8def-bfed-cba987654321"))
        );
    }

    /// Hashes names into namespaces deterministically
    #[test]
    fn hashes_names_into_namespaces_deterministically() {
        let fields = Fields {
            namespace: Some(resolve_namespace("@dns").unwrap()),
            name: Some("example.com".to_owned()),
            ..Default::default()
        };
        let mut g = new_gen(1);
        let v3 = g.generate(3, &fields).unwrap();
        let v5 = g.generate(5, &fields).unwrap();
        assert_eq!(v3, uuid("9073926b-929f-31c2-abc9-fad77ae3e8eb"));
        assert_eq!(v5, uuid("cfbff0d1-9375-5685-968c-48ce8b15ae17"));
        assert_eq!(new_gen(2).generate(3, &fields), Ok(v3));
        assert_eq!(new_gen(3).generate(5, &fields), Ok(v5));

        let explicit = Fields {
            namespace: Some(resolve_namespace("6ba7b810-9dad-11d1-80b4-00c04fd430c8").unwrap()),
            ..fields
        };
        assert_eq!(g.generate(5, &explicit), Ok(v5));
    }

    /// Resolves namespace aliases
    #[test]
    fn resolves_namespace_aliases() {
        let cases = [
            ("@dns", "6ba7b810-9dad-11d1-80b4-00c04fd430c8"),
            ("@url", "6ba7b811-9dad-11d1-80b4-00c04fd430c8"),
            ("@oid", "6ba7b812-9dad-11d1-80b4-00c04fd430c8"),
            ("@x500", "6ba7b814-9dad-11d1-80b4-00c04fd430c8"),
        ];
        for (alias, text) in cases {
            assert_eq!(resolve_namespace(alias), Ok(uuid(text)));
        }
        assert_eq!(
            resolve_namespace("@isbn"),
            Err(Error::UnknownNamespace {
                input: "@isbn".to_owned()
            })
        );
    }

    /// Requires namespace and name for name-based versions
    #[test]
    fn requires_namespace_and_name_for_name_based_versions() {
        let mut g = new_gen(4);
        let only_name = Fields {
            name: Some("example.com".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            g.generate(3, &only_name),
            Err(Error::MissingArgument {
                version: 3,
                argument: "namespace"
            })
        );
        let only_namespace = Fields {
            namespace: Some(Uuid::NIL),
            ..Default::default()
        };
        assert_eq!(
            g.generate(5, &only_namespace),
            Err(Error::MissingArgument {
                version: 5,
                argument: "name"
            })
        );
    }

    /// Rejects fields not applicable to the version
    #[test]
    fn rejects_fields_not_applicable_to_the_version() {
        let mut g = new_gen(5);
        let cases = [
            (
                3,
                Fields {
                    node: Some(1),
                    ..Default::default()
                },
                "node",
            ),
            (
                7,
                Fields {
                    clock_sequence: Some(1),
                    ..Default::default()
                },
                "clock_sequence",
            ),
            (
                4,
                Fields {
                    time: Some(0),
                    ..Default::default()
                },
                "time",
            ),
            (
                1,
                Fields {
                    local_id: Some(1),
                    ..Default::default()
                },
                "local_id",
            ),
            (
                6,
                Fields {
                    custom_a: Some(1),
                    ..Default::default()
                },
                "custom_a",
            ),
            (
                8,
                Fields {
                    local_domain: Some(1),
                    ..Default::default()
                },
                "local_domain",
            ),
            (
                1,
                Fields {
                    namespace: Some(Uuid::NIL),
                    ..Default::default()
                },
                "namespace",
            ),
            (
                2,
                Fields {
                    name: Some(String::new()),
                    ..Default::default()
                },
                "name",
            ),
        ];
        for (version, fields, field) in cases {
            assert_eq!(
                g.generate(version, &fields),
                Err(Error::FieldNotApplicable { version, field })
            );
        }
    }

    /// Rejects unknown versions
    #[test]
    fn rejects_unknown_versions() {
        let mut g = new_gen(6);
        for version in [0, 9, 15] {
            assert_eq!(
                g.generate(version, &Fields::default()),
                Err(Error::UnsupportedVersion { version })
            );
        }
    }

    /// Rejects values wider than their fields
    #[test]
    fn rejects_values_wider_than_their_fields() {
        let mut g = new_gen(7);
        let cases = [
            (
                1,
                Fields {
                    clock_sequence: Some(1 << 14),
                    ..Default::default()
                },
            ),
            (
                2,
                Fields {
                    clock_sequence: Some(1 << 6),
                    ..Default::default()
                },
            ),
            (
                6,
                Fields {
                    node: Some(1 << 48),
                    ..Default::default()
                },
            ),
            (
                2,
                Fields {
                    local_domain: Some(256),
                    ..Default::default()
                },
            ),
            (
                8,
                Fields {
                    custom_c: Some(1 << 62),
                    ..Default::default()
                },
            ),
            (
                7,
                Fields {
                    time: Some(-1),
                    ..Default::default()
                },
            ),
        ];
        for (version, fields) in cases {
            assert!(matches!(
                g.generate(version, &fields),
                Err(Error::ValueOutOfRange { .. })
            ));
        }
    }

    /// Fills unset fields with defaults
    #[test]
    fn fills_unset_fields_with_defaults() {
        let mut g = new_gen(8);
        for version in [1, 2, 6, 7] {
            let before = time::now_ns();
            let e = g.generate(version, &Fields::default()).unwrap();
            let after = time::now_ns();
            assert_eq!(e.version(), version);
            assert_eq!(e.variant() >> 2, 0b10);

            let t = decode_timestamp(&e).unwrap();
            let tick = crate::timestamp::Domain::of(version).unwrap().tick;
            assert!(before - tick < t && t <= after, "v{}", version);
        }

        let e = g.generate(2, &Fields::default()).unwrap();
        assert_eq!(e.field(Field::LocalDomain), Ok(0));
        assert_eq!(e.field(Field::LocalId), Ok(host::local_id(0)));

        let fields = Fields {
            local_domain: Some(2),
            ..Default::default()
        };
        let e = g.generate(2, &fields).unwrap();
        assert_eq!(e.field(Field::LocalId), Ok(host::FALLBACK_LOCAL_ID));

        if let Some(mac) = host::mac_node() {
            let e = g.generate(1, &Fields::default()).unwrap();
            assert_eq!(e.field(Field::Node), Ok(mac));
        }
    }

    /// Generates canonical v4 strings
    #[test]
    fn generates_canonical_v4_strings() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        let mut g = new_gen(9);
        for _ in 0..1_000 {
            let e = g.generate(4, &Fields::default()).unwrap();
            assert!(re.is_match(&e.to_string()));
        }
    }

    /// Sets constant bits and random bits properly
    #[test]
    fn sets_constant_bits_and_random_bits_properly() {
        let mut g = new_gen(10);
        let n = N_SAMPLES as u32;
        let t7 = Fields {
            time: Some(T_2022),
            ..Default::default()
        };

        for (version, fields) in [(4, Fields::default()), (7, t7), (8, Fields::default())] {
            let samples: Vec<Uuid> = (0..N_SAMPLES)
                .map(|_| g.generate(version, &fields).unwrap())
                .collect();
            let bins = count_ones(&samples);

            // test if constant bits are all set to 1 or 0
            for i in 0..4 {
                let expected = if (version >> i) & 1 == 1 { n } else { 0 };
                assert_eq!(bins[76 + i], expected, "v{} version bit {}", version, 76 + i);
            }
            assert_eq!(bins[63], n, "v{} variant bit 63", version);
            assert_eq!(bins[62], 0, "v{} variant bit 62", version);

            // v7 keeps the supplied timestamp in bits 80..128
            let random_bits: Vec<usize> = match version {
                7 => (0..62).chain(64..76).collect(),
                _ => (0..62).chain(64..76).chain(80..128).collect(),
            };
            assert_random_bits(&bins, random_bits.into_iter());
        }
    }

    /// Produces distinct values for random versions
    #[test]
    fn produces_distinct_values_for_random_versions() {
        let mut g = new_gen(11);
        for version in [4, 7, 8] {
            let a = g.generate(version, &Fields::default()).unwrap();
            let b = g.generate(version, &Fields::default()).unwrap();
            assert_ne!(a, b);
            assert_eq!(a.version(), version);
            assert_eq!(b.variant() >> 2, 0b10);
        }
    }
}
