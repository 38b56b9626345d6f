//! Explicit, seedable RNG plumbing.
//!
//! The original implementation drew from a process-global RNG implicitly
//! (Python's `random` module). Every randomised operation here instead
//! takes an explicit `&mut Rng`, so preprocessing and property tests are
//! reproducible given the same seed.

pub use rand_chacha::ChaCha8Rng;
use rand::SeedableRng;

/// Seed used by internal call sites that don't have an externally
/// threaded RNG available (e.g. `Polygon::area`/`Polygon::contains`,
/// which triangulate internally but expose no RNG parameter in their
/// public signature). Kept fixed so repeated calls are deterministic.
const INTERNAL_SEED: u64 = 0x5EED_1DEA_u64;

pub fn default_rng() -> ChaCha8Rng {
  ChaCha8Rng::seed_from_u64(INTERNAL_SEED)
}

/// Construct a reproducible RNG from a caller-supplied seed.
pub fn from_seed(seed: u64) -> ChaCha8Rng {
  ChaCha8Rng::seed_from_u64(seed)
}
