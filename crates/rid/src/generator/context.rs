use crate::{resolve_machine_id, resolve_process_id};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// The process-wide constants stamped into every ID.
///
/// A context is built once, either resolved from the host with
/// [`Context::resolve`] or given explicitly with [`Context::new`], and is
/// immutable afterwards. The process-wide instance is [`Context::global`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Context {
    machine_id: u8,
    process_id: u16,
}

impl Context {
    /// Creates a context from explicit values, bypassing host resolution.
    ///
    /// # Example
    /// ```
    /// use rid::Context;
    ///
    /// let ctx = Context::new(7, 4242);
    /// assert_eq!(ctx.machine_id(), 7);
    /// assert_eq!(ctx.process_id(), 4242);
    /// ```
    #[must_use]
    pub const fn new(machine_id: u8, process_id: u16) -> Self {
        Self {
            machine_id,
            process_id,
        }
    }

    /// Resolves the machine id from the network interfaces and the process id
    /// from the OS.
    ///
    /// This enumerates interfaces and may read from `/proc`, so prefer
    /// [`Context::global`] which does it once.
    #[cfg_attr(feature = "tracing", instrument(level = "debug"))]
    #[must_use]
    pub fn resolve() -> Self {
        let ctx = Self::new(resolve_machine_id(), resolve_process_id());
        #[cfg(feature = "tracing")]
        tracing::debug!(
            machine_id = ctx.machine_id,
            process_id = ctx.process_id,
            "resolved id context"
        );
        ctx
    }

    /// The process-wide context, resolved on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        &super::global::GLOBAL_CONTEXT
    }

    #[must_use]
    pub const fn machine_id(&self) -> u8 {
        self.machine_id
    }

    #[must_use]
    pub const fn process_id(&self) -> u16 {
        self.process_id
    }
}
