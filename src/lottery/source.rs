use rand::distributions::{Distribution, Uniform};
use rand::RngCore;

/// A source of uniformly distributed integers, injected into the lottery so
/// that draws can be reproduced in tests.
pub trait RandomSource {
    /// A uniformly distributed integer in `[low, high]`, inclusive at both ends.
    /// Callers guarantee `low <= high`.
    fn uniform_inclusive(&mut self, low: u128, high: u128) -> u128;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn uniform_inclusive(&mut self, low: u128, high: u128) -> u128 {
        Uniform::new_inclusive(low, high).sample(self)
    }
}
