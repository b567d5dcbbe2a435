/// Generator polynomial of the CRC-CCITT family.
const CRC4_POLY: u16 = 0x1021;

/// Reflected IEEE 802.3 polynomial.
const CRC32_POLY: u32 = 0xEDB8_8320;

/// Folds an arbitrary byte sequence into a single byte.
///
/// A bit-serial CRC-CCITT variant: a 16-bit accumulator starts at `0xFFFF`
/// and every input bit (most significant first) is shifted into its low end,
/// with the polynomial `0x1021` applied whenever a set bit falls off the top.
/// The low byte of the accumulator is returned.
///
/// This is a compressor, not an integrity check. Distinct inputs may map to
/// the same byte.
///
/// # Example
/// ```
/// assert_eq!(rid::crc4(&[0, 0, 0, 0, 0, 0x80]), 0x90);
/// ```
#[must_use]
pub fn crc4(bytes: &[u8]) -> u8 {
    let mut acc: u16 = 0xFFFF;
    for &byte in bytes {
        for shift in (0..8).rev() {
            let carry = acc & 0x8000 != 0;
            acc = (acc << 1) | u16::from((byte >> shift) & 1);
            if carry {
                acc ^= CRC4_POLY;
            }
        }
    }
    acc as u8
}

/// Standard CRC-32 (IEEE), used to fold container metadata into a process id.
#[must_use]
pub(crate) fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = !0_u32;
    for &byte in bytes {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (CRC32_POLY & mask);
        }
    }
    !crc
}
