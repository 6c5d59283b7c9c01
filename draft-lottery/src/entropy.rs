//! Cryptographically secure ticket selection.
//!
//! The draw loop never sees a general-purpose RNG. It is handed a
//! [`SecureChoice`], which is only implemented for generators carrying the
//! [`CryptoRng`] marker, so seedable simulation RNGs such as `SmallRng` are
//! rejected at compile time.

use rand::rngs::OsRng;
use rand::{CryptoRng, Rng, RngCore};

/// Capability to pick one ticket uniformly from a pool of `total_tickets`.
pub trait SecureChoice {
    /// Return a ticket number in `0..total_tickets`. Callers never pass zero.
    fn pick_ticket(&mut self, total_tickets: u64) -> u64;
}

impl<R> SecureChoice for R
where
    R: RngCore + CryptoRng,
{
    fn pick_ticket(&mut self, total_tickets: u64) -> u64 {
        self.gen_range(0..total_tickets)
    }
}

/// Operating-system entropy source used for real draws.
#[must_use]
pub const fn os_entropy() -> OsRng {
    OsRng
}
