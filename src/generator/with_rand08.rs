//! Integration with `rand` (v0.8) crate.

use super::{Generator, Rng};
use rand::RngCore;

/// An adapter that implements [`Rng`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> Rng for Adapter<T> {
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }
}

impl<T: RngCore> Generator<Adapter<T>> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rand::SeedableRng;
    /// use uuidtool::generator::{Fields, Generator};
    ///
    /// let mut g = Generator::with_rand08(rand_chacha::ChaCha8Rng::seed_from_u64(42));
    /// println!("{}", g.generate(8, &Fields::default())?);
    /// # Ok::<(), uuidtool::Error>(())
    /// ```
    pub const fn with_rand08(rng: T) -> Self {
        Self::new(Adapter(rng))
    }
}
