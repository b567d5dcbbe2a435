use super::RAW_LEN;
use crate::{Reason, Result};

/// Length of the compact text form.
pub const ENCODED_LEN: usize = 20;

/// The 32 symbols of the compact form in value order. Ambiguous `j`, `l`, `u`
/// and `v` are left out.
pub const ALPHABET: &[u8; 32] = b"0123456789abcdefghikmnopqrstwxyz";

const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: u32 = 5;
const MASK: u128 = 0x1F;
/// 20 symbols carry 100 bits; the final four are zero padding.
const PAD_BITS: u32 = ENCODED_LEN as u32 * BITS_PER_CHAR - RAW_LEN as u32 * 8;

/// Lookup table for decoding. Every byte outside [`ALPHABET`] maps to
/// `NO_VALUE`.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        lut[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    lut
};

/// Encodes 12 raw bytes into the 20-symbol compact form.
///
/// Symbols are taken five bits at a time, most significant first, so the
/// lexicographic order of the output matches the byte order of the input.
pub fn encode_base32(raw: &[u8; RAW_LEN], out: &mut [u8; ENCODED_LEN]) {
    let mut wide = [0_u8; 16];
    wide[16 - RAW_LEN..].copy_from_slice(raw);
    let acc = u128::from_be_bytes(wide) << PAD_BITS;

    for (i, slot) in out.iter_mut().enumerate() {
        let shift = (ENCODED_LEN - 1 - i) as u32 * BITS_PER_CHAR;
        *slot = ALPHABET[((acc >> shift) & MASK) as usize];
    }
}

/// Decodes the 20-symbol compact form back into 12 raw bytes.
///
/// The input is validated in full before any bits are assembled.
///
/// # Errors
///
/// - [`Reason::Length`] if `encoded` is not exactly 20 bytes
/// - [`Reason::Symbol`] for any byte outside [`ALPHABET`]
/// - [`Reason::Trailing`] if the final symbol sets padding bits
pub fn decode_base32(encoded: &[u8]) -> Result<[u8; RAW_LEN]> {
    let encoded: &[u8; ENCODED_LEN] = encoded
        .try_into()
        .map_err(|_| Reason::Length { len: encoded.len() })?;

    let mut values = [0_u8; ENCODED_LEN];
    for (index, (&byte, value)) in encoded.iter().zip(values.iter_mut()).enumerate() {
        *value = LOOKUP[byte as usize];
        if *value == NO_VALUE {
            return Err(Reason::Symbol { byte, index }.into());
        }
    }
    let last = values[ENCODED_LEN - 1];
    if u128::from(last) & ((1 << PAD_BITS) - 1) != 0 {
        return Err(Reason::Trailing {
            byte: encoded[ENCODED_LEN - 1],
        }
        .into());
    }

    let acc = values
        .iter()
        .fold(0_u128, |acc, &v| (acc << BITS_PER_CHAR) | u128::from(v))
        >> PAD_BITS;
    let wide = acc.to_be_bytes();
    let mut raw = [0_u8; RAW_LEN];
    raw.copy_from_slice(&wide[16 - RAW_LEN..]);
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn encode(raw: [u8; RAW_LEN]) -> String {
        let mut buf = [0_u8; ENCODED_LEN];
        encode_base32(&raw, &mut buf);
        String::from_utf8(buf.to_vec()).unwrap()
    }

    fn reason(input: &[u8]) -> Reason {
        match decode_base32(input) {
            Err(Error::InvalidId(reason)) => reason,
            Ok(raw) => panic!("expected rejection, decoded {raw:?}"),
        }
    }

    #[test]
    fn alphabet_is_sorted_and_unique() {
        assert!(ALPHABET.windows(2).all(|w| w[0] < w[1]));
        for c in b"jluv" {
            assert!(!ALPHABET.contains(c));
        }
    }

    #[test]
    fn zero_encodes_to_all_zero_symbols() {
        assert_eq!(encode([0; RAW_LEN]), "00000000000000000000");
        assert_eq!(decode_base32(b"00000000000000000000").unwrap(), [0; RAW_LEN]);
    }

    #[test]
    fn max_encodes_with_padded_tail() {
        assert_eq!(encode([0xFF; RAW_LEN]), "zzzzzzzzzzzzzzzzzzzg");
        assert_eq!(decode_base32(b"zzzzzzzzzzzzzzzzzzzg").unwrap(), [0xFF; RAW_LEN]);
    }

    #[test]
    fn known_vectors() {
        let raw = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        assert_eq!(encode(raw), "041061050q3gg28a1c60");

        let golden = [21, 19, 113, 173, 218, 80, 23, 99, 83, 120, 110, 180];
        assert_eq!(decode_base32(b"2m9p3besa0bo6mtqdss0").unwrap(), golden);
        assert_eq!(encode(golden), "2m9p3besa0bo6mtqdss0");
    }

    #[test]
    fn round_trips_pseudo_random_inputs() {
        // xorshift keeps this deterministic without pulling in an RNG.
        let mut state = 0x9E37_79B9_7F4A_7C15_u64;
        for _ in 0..10_000 {
            let mut raw = [0_u8; RAW_LEN];
            for b in &mut raw {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                *b = state as u8;
            }
            let text = encode(raw);
            assert_eq!(decode_base32(text.as_bytes()).unwrap(), raw, "{text}");
        }
    }

    #[test]
    fn single_bit_positions_round_trip() {
        for bit in 0..RAW_LEN * 8 {
            let mut raw = [0_u8; RAW_LEN];
            raw[bit / 8] = 0x80 >> (bit % 8);
            let text = encode(raw);
            assert_eq!(decode_base32(text.as_bytes()).unwrap(), raw);
        }
    }

    #[test]
    fn encoding_preserves_order() {
        let a = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
        let b = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0];
        let c = [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(encode(a) < encode(b));
        assert!(encode(b) < encode(c));
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(reason(b""), Reason::Length { len: 0 });
        assert_eq!(reason(b"0000000000000000000"), Reason::Length { len: 19 });
        assert_eq!(reason(b"000000000000000000000"), Reason::Length { len: 21 });
    }

    #[test]
    fn rejects_symbols_outside_alphabet() {
        for bad in [b'!', b' ', b'A', b'Z', b'j', b'l', b'u', b'v', 0x00, 0xFF] {
            let mut input = *b"00000000000000000000";
            input[5] = bad;
            assert_eq!(reason(&input), Reason::Symbol { byte: bad, index: 5 });
        }
    }

    #[test]
    fn rejects_non_canonical_tail() {
        assert_eq!(
            reason(b"0000000000000000000z"),
            Reason::Trailing { byte: b'z' }
        );
        assert_eq!(
            reason(b"00000000000000000001"),
            Reason::Trailing { byte: b'1' }
        );
    }

    #[test]
    fn symbol_errors_win_over_tail_errors() {
        assert_eq!(
            reason(b"!000000000000000000z"),
            Reason::Symbol {
                byte: b'!',
                index: 0
            }
        );
    }
}
