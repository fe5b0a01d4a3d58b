//! Process-wide generator and entry point functions.

use std::sync;

use crate::generator::Fields;
use crate::{Result, Uuid};
use inner::GlobalGenInner;

/// Returns the lock handle of process-wide global generator, creating one if none exists.
///
/// A generator holds no invariant that a panicking holder could break, so a poisoned lock is
/// taken over as is.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .unwrap_or_else(sync::PoisonError::into_inner)
}

/// Generates a UUID of `version` from `fields` using the process-wide generator.
///
/// See [`Generator::generate`](crate::generator::Generator::generate) for the defaulting rules
/// and failure modes.
///
/// # Examples
///
/// ```rust
/// use uuidtool::{generator::Fields, new_uuid};
///
/// let uuid = new_uuid(4, &Fields::default())?;
/// println!("{}", uuid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
///
/// let fields = Fields {
///     custom_a: Some(0xcafe),
///     ..Default::default()
/// };
/// assert!(new_uuid(8, &fields)?.to_string().starts_with("00000000-cafe-8"));
/// # Ok::<(), uuidtool::Error>(())
/// ```
pub fn new_uuid(version: u8, fields: &Fields) -> Result<Uuid> {
    lock_global_gen().get_mut().generate(version, fields)
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use crate::generator::{Generator, Rng};

    /// The random number generator of the global generator.
    ///
    /// The global generator currently employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to
    /// emulate the strategy used by [`rand::rngs::ThreadRng`].
    #[derive(Debug)]
    pub struct GlobalGenRng(ReseedingRng<ChaCha12Core, OsRng>);

    impl Rng for GlobalGenRng {
        fn next_u64(&mut self) -> u64 {
            rand::RngCore::next_u64(&mut self.0)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            rand::RngCore::fill_bytes(&mut self.0, dest)
        }
    }

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: Generator<GlobalGenRng>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            let core = ChaCha12Core::from_rng(OsRng)
                .expect("uuidtool: could not initialize global generator");
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: Generator::new(GlobalGenRng(ReseedingRng::new(core, 1024 * 64, OsRng))),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`Generator`] instance, reseting the
        /// generator state on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut Generator<GlobalGenRng> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                *self = Default::default();
            }
            &mut self.generator
        }
    }
}
