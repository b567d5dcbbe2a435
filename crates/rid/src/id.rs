use crate::{
    ENCODED_LEN, Error, NUMERAL_LEN, RAW_LEN, Reason, Result, decode_base32, decode_numeral,
    encode_base32, encode_numeral, time_from_nanos,
};
use core::fmt;
use std::time::SystemTime;

/// A 12-byte, coarsely time-sortable identifier.
///
/// ```text
///  Byte:    0   1   2   3    4      5   6     7   8   9      10  11
///          +---------------+-----+-------+-----------+--------------+
///  Field:  | ns[63..32]    | mid |  pid  |  counter  | ns[31..16]   |
///          +---------------+-----+-------+-----------+--------------+
/// ```
///
/// - `ns`: nanoseconds since [`crate::EPOCH`]; the low 16 bits are dropped
/// - `mid`: machine id, see [`crate::resolve_machine_id`]
/// - `pid`: process id, see [`crate::resolve_process_id`]
/// - `counter`: low 24 bits of the generating [`crate::Source`]
///
/// All multi-byte fields are big-endian. Equality and ordering are byte-wise,
/// and the compact text form sorts the same way. Only `ns[63..32]` leads the
/// layout, so IDs order by time at a granularity of 2^32 ns (about 4.29 s);
/// within that window they order by machine id, process id and counter.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Rid([u8; RAW_LEN]);

impl Rid {
    /// The all-zero ID. Never produced by a generator.
    pub const NIL: Self = Self([0; RAW_LEN]);

    pub const COUNTER_MASK: u32 = 0x00FF_FFFF;

    /// Packs the given components.
    ///
    /// Only bits 63..16 of `nanos` and the low 24 bits of `counter` are kept.
    #[must_use]
    pub const fn from_parts(nanos: u64, machine_id: u8, process_id: u16, counter: u32) -> Self {
        let ns = nanos.to_be_bytes();
        let pid = process_id.to_be_bytes();
        let cnt = counter.to_be_bytes();
        Self([
            ns[0], ns[1], ns[2], ns[3], machine_id, pid[0], pid[1], cnt[1], cnt[2], cnt[3], ns[4],
            ns[5],
        ])
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; RAW_LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; RAW_LEN] {
        &self.0
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; RAW_LEN] {
        self.0
    }

    /// Nanoseconds since [`crate::EPOCH`], with the low 16 bits zeroed.
    #[must_use]
    pub const fn timestamp_nanos(&self) -> u64 {
        let b = &self.0;
        u64::from_be_bytes([b[0], b[1], b[2], b[3], b[10], b[11], 0, 0])
    }

    /// Creation time, accurate to the layout's 65.536µs resolution.
    #[must_use]
    pub fn time(&self) -> SystemTime {
        time_from_nanos(self.timestamp_nanos())
    }

    #[must_use]
    pub const fn machine_id(&self) -> u8 {
        self.0[4]
    }

    #[must_use]
    pub const fn process_id(&self) -> u16 {
        u16::from_be_bytes([self.0[5], self.0[6]])
    }

    /// The 24-bit counter field.
    #[must_use]
    pub const fn counter(&self) -> u32 {
        u32::from_be_bytes([0, self.0[7], self.0[8], self.0[9]])
    }

    #[must_use]
    pub const fn is_nil(&self) -> bool {
        let mut i = 0;
        while i < RAW_LEN {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Encodes this ID into its 20-character compact form.
    ///
    /// # Example
    /// ```
    /// assert_eq!(rid::Rid::NIL.encode(), "00000000000000000000");
    /// ```
    #[must_use]
    pub fn encode(&self) -> String {
        let mut buf = [0_u8; ENCODED_LEN];
        self.encode_to_buf(&mut buf);
        buf.iter().map(|&b| char::from(b)).collect()
    }

    /// Zero-allocation variant of [`Self::encode`]. The buffer holds ASCII.
    pub fn encode_to_buf(&self, buf: &mut [u8; ENCODED_LEN]) {
        encode_base32(&self.0, buf);
    }

    /// Decodes the 20-character compact form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidId`] on a wrong length, a symbol outside the
    /// alphabet, or a final symbol with padding bits set.
    pub fn decode(s: impl AsRef<[u8]>) -> Result<Self> {
        decode_base32(s.as_ref()).map(Self)
    }

    /// Encodes this ID into its 36-digit numeral form.
    ///
    /// # Example
    /// ```
    /// let id = rid::Rid::from_bytes([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 255]);
    /// assert_eq!(id.to_numeral(), "000001002003004005006007008009010255");
    /// ```
    #[must_use]
    pub fn to_numeral(&self) -> String {
        let mut buf = [0_u8; NUMERAL_LEN];
        encode_numeral(&self.0, &mut buf);
        buf.iter().map(|&b| char::from(b)).collect()
    }

    /// Decodes the 36-digit numeral form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidId`] on a wrong length or a group that is not a
    /// decimal byte.
    pub fn decode_numeral(s: impl AsRef<[u8]>) -> Result<Self> {
        decode_numeral(s.as_ref()).map(Self)
    }

    /// Parses either text form, picking the codec by length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidId`] if the input is neither a valid compact
    /// nor a valid numeral form.
    pub fn parse(s: impl AsRef<[u8]>) -> Result<Self> {
        let s = s.as_ref();
        match s.len() {
            ENCODED_LEN => Self::decode(s),
            NUMERAL_LEN => Self::decode_numeral(s),
            len => Err(Reason::Length { len }.into()),
        }
    }
}

impl From<[u8; RAW_LEN]> for Rid {
    fn from(bytes: [u8; RAW_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Rid> for [u8; RAW_LEN] {
    fn from(id: Rid) -> Self {
        id.0
    }
}

impl AsRef<[u8]> for Rid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl core::str::FromStr for Rid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Rid {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Storage-facing parse: accepts the 12 raw bytes as well as either text
/// form.
impl TryFrom<&[u8]> for Rid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        match <[u8; RAW_LEN]>::try_from(bytes) {
            Ok(raw) => Ok(Self(raw)),
            Err(_) => Self::parse(bytes),
        }
    }
}

impl fmt::Display for Rid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0_u8; ENCODED_LEN];
        self.encode_to_buf(&mut buf);
        f.write_str(core::str::from_utf8(&buf).map_err(|_| fmt::Error)?)
    }
}

impl fmt::Debug for Rid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rid")
            .field("id", &format_args!("{self}"))
            .field("nanos", &self.timestamp_nanos())
            .field("machine_id", &self.machine_id())
            .field("process_id", &self.process_id())
            .field("counter", &format_args!("{} (0x{:06x})", self.counter(), self.counter()))
            .finish()
    }
}
