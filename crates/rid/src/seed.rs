use rand::{
    RngCore, SeedableRng, TryRngCore,
    rngs::{OsRng, SmallRng},
};
use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Only the low 24 bits of a seed are meaningful.
pub const SEED_MASK: u32 = 0x00FF_FFFF;

/// One step of the seed fallback chain.
///
/// A strategy either produces a 24-bit value or declines with `None`, leaving
/// the next strategy in the chain to try. See [`seed_from`].
///
/// # Example
/// ```
/// use rid::{SeedStrategy, seed_from};
///
/// struct Broken;
/// impl SeedStrategy for Broken {
///     fn try_seed(&self) -> Option<u32> {
///         None
///     }
/// }
///
/// struct Fixed;
/// impl SeedStrategy for Fixed {
///     fn try_seed(&self) -> Option<u32> {
///         Some(42)
///     }
/// }
///
/// assert_eq!(seed_from(&[&Broken, &Fixed]), 42);
/// ```
pub trait SeedStrategy {
    /// Returns a random value with the top 8 bits clear, or `None` if the
    /// underlying source is unavailable.
    fn try_seed(&self) -> Option<u32>;
}

/// Operating-system CSPRNG.
#[derive(Default, Clone, Copy, Debug)]
pub struct OsSeed;

impl SeedStrategy for OsSeed {
    fn try_seed(&self) -> Option<u32> {
        let mut buf = [0_u8; 3];
        match OsRng.try_fill_bytes(&mut buf) {
            Ok(()) => Some(compose(buf)),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_err, "os random source unavailable");
                None
            }
        }
    }
}

/// Non-cryptographic generator, freshly seeded from the clock and process id.
#[derive(Default, Clone, Copy, Debug)]
pub struct FallbackSeed;

impl SeedStrategy for FallbackSeed {
    fn try_seed(&self) -> Option<u32> {
        let stir = u64::from(std::process::id()).rotate_left(32) ^ wall_nanos();
        let mut rng = SmallRng::seed_from_u64(stir);
        let mut buf = [0_u8; 3];
        rng.fill_bytes(&mut buf);
        Some(compose(buf))
    }
}

/// Last resort: the nanosecond component of the wall clock.
#[derive(Default, Clone, Copy, Debug)]
pub struct ClockSeed;

impl SeedStrategy for ClockSeed {
    fn try_seed(&self) -> Option<u32> {
        Some(clock_seed())
    }
}

/// The strategies [`random_seed`] tries, in order. The final step always
/// produces a value.
pub const DEFAULT_SEED_CHAIN: &[&dyn SeedStrategy] = &[&OsSeed, &FallbackSeed, &ClockSeed];

/// Returns a 24-bit random value for seeding counters.
///
/// Walks [`DEFAULT_SEED_CHAIN`]: the OS CSPRNG first, then a
/// non-cryptographic generator, then the clock. This never fails; it
/// degrades.
#[cfg_attr(feature = "tracing", instrument(level = "trace"))]
#[must_use]
pub fn random_seed() -> u32 {
    seed_from(DEFAULT_SEED_CHAIN)
}

/// Runs `chain` in order and returns the first value produced, masked to 24
/// bits. Falls through to [`ClockSeed`] when every strategy declines.
#[must_use]
pub fn seed_from(chain: &[&dyn SeedStrategy]) -> u32 {
    chain
        .iter()
        .find_map(|strategy| strategy.try_seed())
        .unwrap_or_else(|| {
            #[cfg(feature = "tracing")]
            tracing::warn!("every random source declined, seeding from the clock");
            clock_seed()
        })
        & SEED_MASK
}

fn compose([b0, b1, b2]: [u8; 3]) -> u32 {
    u32::from(b0) << 16 | u32::from(b1) << 8 | u32::from(b2)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.subsec_nanos())
        & SEED_MASK
}

fn wall_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Declines;
    impl SeedStrategy for Declines {
        fn try_seed(&self) -> Option<u32> {
            None
        }
    }

    struct Wide;
    impl SeedStrategy for Wide {
        fn try_seed(&self) -> Option<u32> {
            Some(u32::MAX)
        }
    }

    #[test]
    fn compose_is_big_endian() {
        assert_eq!(compose([0x12, 0x34, 0x56]), 0x0012_3456);
    }

    #[test]
    fn random_seed_fits_24_bits() {
        for _ in 0..64 {
            assert_eq!(random_seed() & !SEED_MASK, 0);
        }
    }

    #[test]
    fn random_seed_is_not_stuck_at_zero() {
        // 64 zero draws from a 24-bit space is not a realistic outcome.
        assert!((0..64).any(|_| random_seed() != 0));
    }

    #[test]
    fn every_strategy_fits_24_bits() {
        for strategy in [&OsSeed as &dyn SeedStrategy, &FallbackSeed, &ClockSeed] {
            if let Some(v) = strategy.try_seed() {
                assert_eq!(v & !SEED_MASK, 0);
            }
        }
    }

    #[test]
    fn chain_skips_declining_strategies() {
        struct Fixed(u32);
        impl SeedStrategy for Fixed {
            fn try_seed(&self) -> Option<u32> {
                Some(self.0)
            }
        }
        assert_eq!(seed_from(&[&Declines, &Fixed(7), &Fixed(9)]), 7);
    }

    #[test]
    fn default_chain_ends_with_clock() {
        assert_eq!(DEFAULT_SEED_CHAIN.len(), 3);
        let last = DEFAULT_SEED_CHAIN[DEFAULT_SEED_CHAIN.len() - 1];
        assert!(last.try_seed().is_some());
        assert_eq!(seed_from(&[&Declines, &ClockSeed]) & !SEED_MASK, 0);
    }

    #[test]
    fn chain_masks_results() {
        assert_eq!(seed_from(&[&Wide]), SEED_MASK);
    }

    #[test]
    fn empty_chain_falls_back_to_clock() {
        assert_eq!(seed_from(&[]) & !SEED_MASK, 0);
        assert_eq!(seed_from(&[&Declines, &Declines]) & !SEED_MASK, 0);
    }
}
