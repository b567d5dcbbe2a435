use super::RAW_LEN;
use crate::{Reason, Result};

const DIGITS_PER_BYTE: usize = 3;

/// Length of the numeral text form.
pub const NUMERAL_LEN: usize = RAW_LEN * DIGITS_PER_BYTE;

/// Renders each byte as exactly three zero-padded decimal digits.
pub fn encode_numeral(raw: &[u8; RAW_LEN], out: &mut [u8; NUMERAL_LEN]) {
    for (&b, group) in raw.iter().zip(out.chunks_exact_mut(DIGITS_PER_BYTE)) {
        group[0] = b'0' + b / 100;
        group[1] = b'0' + b / 10 % 10;
        group[2] = b'0' + b % 10;
    }
}

/// Parses the 36-digit numeral form.
///
/// # Errors
///
/// - [`Reason::Length`] unless the input is exactly twelve 3-digit groups
/// - [`Reason::Numeral`] for a group with a non-digit or a value above 255
pub fn decode_numeral(encoded: &[u8]) -> Result<[u8; RAW_LEN]> {
    if encoded.len() != NUMERAL_LEN {
        return Err(Reason::Length { len: encoded.len() }.into());
    }
    let mut raw = [0_u8; RAW_LEN];
    for (index, (group, b)) in encoded
        .chunks_exact(DIGITS_PER_BYTE)
        .zip(raw.iter_mut())
        .enumerate()
    {
        *b = parse_group(group).ok_or(Reason::Numeral { index })?;
    }
    Ok(raw)
}

fn parse_group(group: &[u8]) -> Option<u8> {
    let value = group.iter().try_fold(0_u16, |acc, &c| {
        c.is_ascii_digit().then(|| acc * 10 + u16::from(c - b'0'))
    })?;
    u8::try_from(value).ok()
}
