use crate::{Context, Rid, SystemClock, TimeSource, random_seed};
use portable_atomic::{AtomicU32, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// A lock-free ID generator.
///
/// A source owns one 32-bit counter that every [`Source::next_id`] call
/// advances with a single atomic increment, so any number of threads can
/// share a source by reference without locking. The counter starts at a
/// random 24-bit value and wraps silently; only its low 24 bits reach the ID.
///
/// ## Features
///
/// - ✅ Thread-safe
/// - ✅ Never blocks, never fails
/// - ❌ Not monotonic across clock adjustments or restarts
///
/// # Example
///
/// ```
/// use rid::Source;
///
/// let source = Source::new();
/// let a = source.next_id();
/// let b = source.next_id();
/// assert_ne!(a, b);
/// assert_eq!(b.counter(), source.counter() & rid::Rid::COUNTER_MASK);
/// ```
pub struct Source<T = SystemClock>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    counter: crossbeam_utils::CachePadded<AtomicU32>,
    #[cfg(not(feature = "cache-padded"))]
    counter: AtomicU32,
    context: Context,
    clock: T,
}

impl Source {
    /// Creates a source on the global [`Context`] and the system clock, with
    /// a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_context(*Context::global())
    }

    /// Creates a randomly seeded source on the system clock for an explicit
    /// context.
    #[must_use]
    pub fn with_context(context: Context) -> Self {
        Self::from_components(context, SystemClock, random_seed())
    }
}

impl Default for Source {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Source<T>
where
    T: TimeSource,
{
    /// Creates a source from explicit parts.
    ///
    /// Useful for deterministic tests or for resuming from a persisted
    /// high-water mark.
    ///
    /// # Example
    /// ```
    /// use rid::{Context, Source, TimeSource};
    ///
    /// struct FixedTime;
    /// impl TimeSource for FixedTime {
    ///     fn current_nanos(&self) -> u64 {
    ///         1 << 32
    ///     }
    /// }
    ///
    /// let source = Source::from_components(Context::new(1, 2), FixedTime, 41);
    /// let id = source.next_id();
    /// assert_eq!(id.counter(), 42);
    /// assert_eq!(id.timestamp_nanos(), 1 << 32);
    /// ```
    pub fn from_components(context: Context, clock: T, seed: u32) -> Self {
        Self {
            #[cfg(feature = "cache-padded")]
            counter: crossbeam_utils::CachePadded::new(AtomicU32::new(seed)),
            #[cfg(not(feature = "cache-padded"))]
            counter: AtomicU32::new(seed),
            context,
            clock,
        }
    }

    /// Overwrites the counter. Increments racing with this call are not lost;
    /// they are ordered before or after the store.
    pub fn seed(&self, value: u32) {
        self.counter.store(value, Ordering::Relaxed);
    }

    /// A snapshot of the counter. Another thread may advance it at any time.
    pub fn counter(&self) -> u32 {
        self.counter.load(Ordering::Relaxed)
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Generates the next ID.
    ///
    /// Atomically advances the counter, reads the clock and packs both with
    /// this source's [`Context`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Rid {
        let count = self.counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        let nanos = self.clock.current_nanos();
        Rid::from_parts(
            nanos,
            self.context.machine_id(),
            self.context.process_id(),
            count,
        )
    }
}

impl<T> core::fmt::Debug for Source<T>
where
    T: TimeSource,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Source")
            .field("counter", &self.counter())
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
