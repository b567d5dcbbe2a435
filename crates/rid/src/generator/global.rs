//! Process-wide defaults.
//!
//! Both the [`Context`] and the default [`Source`] are built lazily on first
//! use and live for the rest of the process. Initialization runs exactly once
//! and happens-before every read.

use crate::{Context, Rid, Source, SystemClock, random_seed};
use std::sync::LazyLock;

pub(super) static GLOBAL_CONTEXT: LazyLock<Context> = LazyLock::new(Context::resolve);

static GLOBAL_SOURCE: LazyLock<Source> = LazyLock::new(Source::new);

/// Generates an ID from the [`global_source`].
///
/// # Example
/// ```
/// let id = rid::new();
/// assert!(!id.is_nil());
/// assert_eq!(id.machine_id(), rid::machine_id());
/// ```
#[must_use]
pub fn new() -> Rid {
    GLOBAL_SOURCE.next_id()
}

/// The process-wide default [`Source`].
#[must_use]
pub fn global_source() -> &'static Source {
    &GLOBAL_SOURCE
}

/// Creates an independent [`Source`] bound to the global [`Context`] and
/// seeded with [`random_seed`].
#[must_use]
pub fn new_source() -> Source {
    Source::from_components(*Context::global(), SystemClock, random_seed())
}

/// The machine id of this process.
#[must_use]
pub fn machine_id() -> u8 {
    Context::global().machine_id()
}

/// The process id of this process, as embedded in IDs.
#[must_use]
pub fn process_id() -> u16 {
    Context::global().process_id()
}
