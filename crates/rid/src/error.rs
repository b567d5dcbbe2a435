/// A result type defaulting to this crate's [`Error`].
///
/// Only decoding is fallible. Generation, encoding and process-wide
/// initialization never return an error.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `rid` can produce.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The input could not be decoded into a [`crate::Rid`].
    ///
    /// Raised by the compact, numeral and raw-byte decode paths. The
    /// [`Reason`] says which check rejected the input.
    #[error("invalid ID: {0}")]
    InvalidId(Reason),
}

/// The detail behind an [`Error::InvalidId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Reason {
    /// The input length matches none of the accepted forms.
    #[error("invalid length: {len}")]
    Length { len: usize },

    /// A byte outside the 32-symbol alphabet.
    #[error("invalid symbol {byte:#04x} at index {index}")]
    Symbol { byte: u8, index: usize },

    /// The final symbol sets padding bits, so it cannot have been produced by
    /// encoding any ID.
    #[error("non-canonical trailing symbol {byte:#04x}")]
    Trailing { byte: u8 },

    /// A 3-digit group of the numeral form is not a decimal in `000..=255`.
    #[error("invalid numeral group at index {index}")]
    Numeral { index: usize },
}

impl From<Reason> for Error {
    fn from(reason: Reason) -> Self {
        Self::InvalidId(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_reason() {
        let err = Error::from(Reason::Length { len: 7 });
        assert_eq!(err.to_string(), "invalid ID: invalid length: 7");

        let err = Error::from(Reason::Symbol {
            byte: b'!',
            index: 3,
        });
        assert_eq!(err.to_string(), "invalid ID: invalid symbol 0x21 at index 3");
    }
}
