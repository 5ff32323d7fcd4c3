//! Length octets: short-form, long-form, indefinite-form, or a caller
//! supplied override (X.690 §8.1.3).

use alloc::vec::Vec;

use crate::buffer::Buffer;
use crate::error::{EncodeError, LengthOverflowSnafu};
use crate::varint;
use snafu::ensure;

/// How a PDU's length octets should be produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LengthDirective {
    /// Emit these octets literally as the length field. Not checked
    /// against the actual value length in any way — this is how a
    /// fuzzer produces a length/value mismatch on purpose.
    Override(Vec<u8>),
    /// Emit the single length octet `0x80` and append a two-octet EOC
    /// marker (`0x00 0x00`) after the value.
    Indefinite,
    /// Compute the length from the actual encoded value size, using
    /// short-form for values `<= 127` and long-form otherwise.
    Definite,
}

/// The largest byte count a single DER long-form length octet can
/// announce (`0x80 | k` leaves 7 bits for `k`).
const MAX_LONG_FORM_OCTETS: usize = 0x7F;

/// Writes the length field for a PDU whose value is `actual_value_len`
/// octets long, at `len_pos` (the buffer position immediately after the
/// value was written). Returns the number of octets this length field
/// contributes to the PDU's own size.
pub(crate) fn encode_length(
    buf: &mut Buffer,
    directive: &LengthDirective,
    actual_value_len: usize,
    len_pos: usize,
) -> Result<usize, EncodeError> {
    match directive {
        LengthDirective::Override(raw) => {
            buf.insert_at(len_pos, raw);
            Ok(raw.len())
        }
        LengthDirective::Indefinite => {
            buf.insert_at(len_pos, &[0x80]);
            buf.append(&[0x00, 0x00]);
            Ok(3)
        }
        LengthDirective::Definite => encode_definite_length(buf, actual_value_len, len_pos),
    }
}

/// Writes a definite-form length, short or long as required by
/// `actual_value_len`.
pub(crate) fn encode_definite_length(
    buf: &mut Buffer,
    actual_value_len: usize,
    len_pos: usize,
) -> Result<usize, EncodeError> {
    if actual_value_len <= 127 {
        buf.insert_at(len_pos, &[actual_value_len as u8]);
        return Ok(1);
    }

    let octet_count = varint::byte_count(actual_value_len as u64, 256);
    ensure!(
        octet_count <= MAX_LONG_FORM_OCTETS,
        LengthOverflowSnafu {
            actual_len: actual_value_len
        }
    );

    let digits = varint::emit_big_endian(actual_value_len as u64, 256, octet_count);
    buf.insert_at(len_pos, &digits);
    buf.insert_at(len_pos, &[0x80 | octet_count as u8]);
    Ok(octet_count + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn encode(directive: LengthDirective, actual: usize) -> (Vec<u8>, usize) {
        let mut buf = Buffer::new();
        let len = encode_length(&mut buf, &directive, actual, 0).unwrap();
        (buf.into_vec(), len)
    }

    #[test]
    fn short_form_boundary() {
        let (bytes, n) = encode(LengthDirective::Definite, 127);
        assert_eq!(bytes, vec![127]);
        assert_eq!(n, 1);
    }

    #[test]
    fn long_form_threshold() {
        let (bytes, n) = encode(LengthDirective::Definite, 128);
        assert_eq!(bytes, vec![0x81, 0x80]);
        assert_eq!(n, 2);
    }

    #[test]
    fn long_form_200() {
        // S3: 200-byte value -> 0x81 0xC8
        let (bytes, n) = encode(LengthDirective::Definite, 200);
        assert_eq!(bytes, vec![0x81, 0xC8]);
        assert_eq!(n, 2);
    }

    #[test]
    fn indefinite_emits_marker_and_eoc() {
        let mut buf = Buffer::new();
        buf.append(&[0xAA, 0xBB]);
        let len = encode_length(&mut buf, &LengthDirective::Indefinite, 2, 0).unwrap();
        assert_eq!(buf.as_slice(), &[0x80, 0xAA, 0xBB, 0x00, 0x00]);
        assert_eq!(len, 3);
    }

    #[test]
    fn override_ignores_actual_length() {
        let (bytes, n) = encode(LengthDirective::Override(vec![0xFF, 0xFF, 0xFF]), 1);
        assert_eq!(bytes, vec![0xFF, 0xFF, 0xFF]);
        assert_eq!(n, 3);
    }
}
