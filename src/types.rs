//! Typed universal ASN.1 encoders: BIT STRING, INTEGER, UTCTime,
//! GeneralizedTime, AlgorithmIdentifier (C6).
//!
//! Each encoder here builds and returns its own byte sequence rather
//! than writing into a shared buffer; the caller (the certificate
//! composer, or a test) splices the result in.

use alloc::vec::Vec;

use crate::buffer::Buffer;
use crate::error::EncodeError;
use crate::identifier::{encode_identifier, Class, Encoding, Identifier, TagNumber};
use crate::length::encode_definite_length;

pub const TAG_INTEGER: TagNumber = 2;
pub const TAG_BIT_STRING: TagNumber = 3;
pub const TAG_SEQUENCE: TagNumber = 16;
pub const TAG_UTC_TIME: TagNumber = 23;
pub const TAG_GENERALIZED_TIME: TagNumber = 24;

/// A BIT STRING value: caller-supplied payload octets, a class (so
/// callers like the certificate composer can request `Application` or
/// `ContextSpecific` directly instead of patching the identifier octet
/// after the fact), and an implicit unused-bits count of `0x00`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitStringSpec {
    pub class: Class,
    pub payload: Vec<u8>,
}

impl BitStringSpec {
    pub fn new(class: Class, payload: Vec<u8>) -> Self {
        Self { class, payload }
    }

    /// A `Class::Universal` BIT STRING, the common case.
    pub fn universal(payload: Vec<u8>) -> Self {
        Self::new(Class::Universal, payload)
    }

    /// A `Class::Application` BIT STRING, as RFC 5280 §4.1 requires for
    /// `IssuerUniqueID`.
    pub fn application(payload: Vec<u8>) -> Self {
        Self::new(Class::Application, payload)
    }

    /// A `Class::ContextSpecific` BIT STRING, as RFC 5280 §4.1 requires
    /// for `SubjectUniqueID`.
    pub fn context_specific(payload: Vec<u8>) -> Self {
        Self::new(Class::ContextSpecific, payload)
    }
}

/// Encodes a BIT STRING: identifier, definite length of `payload.len() + 1`,
/// the `0x00` unused-bits octet, then the payload verbatim.
pub fn encode_bit_string(spec: &BitStringSpec) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Buffer::new();
    encode_identifier(
        &mut buf,
        Identifier::new(spec.class, Encoding::Primitive, TAG_BIT_STRING),
    );
    let len_pos = buf.size();
    buf.push(0x00);
    buf.append(&spec.payload);
    encode_definite_length(&mut buf, spec.payload.len() + 1, len_pos)?;
    Ok(buf.into_vec())
}

/// An INTEGER value: caller-supplied two's-complement payload octets,
/// not canonicalized (a fuzzer may deliberately supply a non-minimal
/// or zero-length encoding).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegerSpec {
    pub class: Class,
    pub payload: Vec<u8>,
}

impl IntegerSpec {
    pub fn new(class: Class, payload: Vec<u8>) -> Self {
        Self { class, payload }
    }

    pub fn universal(payload: Vec<u8>) -> Self {
        Self::new(Class::Universal, payload)
    }
}

/// Encodes an INTEGER: identifier, definite length of `payload.len()`,
/// then the payload verbatim.
pub fn encode_integer(spec: &IntegerSpec) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Buffer::new();
    encode_identifier(
        &mut buf,
        Identifier::new(spec.class, Encoding::Primitive, TAG_INTEGER),
    );
    let len_pos = buf.size();
    buf.append(&spec.payload);
    encode_definite_length(&mut buf, spec.payload.len(), len_pos)?;
    Ok(buf.into_vec())
}

/// Twelve base-10 digits (YY MM DD HH MM SS) plus an optional trailing
/// `Z`, as UTCTime encodes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UtcTime {
    pub digits: [u8; 12],
    pub zulu: bool,
}

impl UtcTime {
    pub fn new(digits: [u8; 12], zulu: bool) -> Self {
        Self { digits, zulu }
    }
}

/// Fourteen base-10 digits (YYYY MM DD HH MM SS) plus an optional
/// trailing `Z`, as GeneralizedTime encodes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneralizedTime {
    pub digits: [u8; 14],
    pub zulu: bool,
}

impl GeneralizedTime {
    pub fn new(digits: [u8; 14], zulu: bool) -> Self {
        Self { digits, zulu }
    }
}

/// The RFC 5280 `Time` choice: UTCTime or GeneralizedTime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Time {
    Utc(UtcTime),
    Generalized(GeneralizedTime),
}

fn digit_octets(digits: &[u8]) -> Vec<u8> {
    digits.iter().map(|d| 0x30 + d).collect()
}

/// Encodes a UTCTime: identifier, length, then the 12 digit octets and
/// an optional `'Z'`.
pub fn encode_utc_time(time: &UtcTime) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Buffer::new();
    encode_identifier(&mut buf, Identifier::universal(Encoding::Primitive, TAG_UTC_TIME));
    let len_pos = buf.size();
    buf.append(&digit_octets(&time.digits));
    if time.zulu {
        buf.push(b'Z');
    }
    let val_len = time.digits.len() + usize::from(time.zulu);
    encode_definite_length(&mut buf, val_len, len_pos)?;
    Ok(buf.into_vec())
}

/// Encodes a GeneralizedTime: identifier, length, then the 14 digit
/// octets and an optional `'Z'`.
pub fn encode_generalized_time(time: &GeneralizedTime) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Buffer::new();
    encode_identifier(
        &mut buf,
        Identifier::universal(Encoding::Primitive, TAG_GENERALIZED_TIME),
    );
    let len_pos = buf.size();
    buf.append(&digit_octets(&time.digits));
    if time.zulu {
        buf.push(b'Z');
    }
    let val_len = time.digits.len() + usize::from(time.zulu);
    encode_definite_length(&mut buf, val_len, len_pos)?;
    Ok(buf.into_vec())
}

/// Encodes whichever of the `Time` choice's variants is present.
pub fn encode_time(time: &Time) -> Result<Vec<u8>, EncodeError> {
    match time {
        Time::Utc(utc) => encode_utc_time(utc),
        Time::Generalized(generalized) => encode_generalized_time(generalized),
    }
}

/// An AlgorithmIdentifier: an object identifier and parameters, both
/// supplied already DER-encoded by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlgorithmIdentifierSpec {
    pub object_identifier: Vec<u8>,
    pub parameters: Vec<u8>,
}

impl AlgorithmIdentifierSpec {
    pub fn new(object_identifier: Vec<u8>, parameters: Vec<u8>) -> Self {
        Self {
            object_identifier,
            parameters,
        }
    }
}

/// Encodes an AlgorithmIdentifier as a SEQUENCE wrapping the object
/// identifier and parameters octets verbatim.
pub fn encode_algorithm_identifier(
    spec: &AlgorithmIdentifierSpec,
) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Buffer::new();
    encode_identifier(
        &mut buf,
        Identifier::universal(Encoding::Constructed, TAG_SEQUENCE),
    );
    let len_pos = buf.size();
    buf.append(&spec.object_identifier);
    buf.append(&spec.parameters);
    let val_len = spec.object_identifier.len() + spec.parameters.len();
    encode_definite_length(&mut buf, val_len, len_pos)?;
    Ok(buf.into_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bit_string_prefix_is_zero_unused_bits() {
        let spec = BitStringSpec::universal(alloc::vec![0xD0]);
        let out = encode_bit_string(&spec).unwrap();
        assert_eq!(out, vec![0x03, 0x02, 0x00, 0xD0]);
    }

    #[test]
    fn integer_payload_is_verbatim() {
        let spec = IntegerSpec::universal(alloc::vec![0x01]);
        assert_eq!(encode_integer(&spec).unwrap(), vec![0x02, 0x01, 0x01]);
    }

    #[test]
    fn s6_utc_time_zulu() {
        let time = UtcTime::new([2, 3, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0], true);
        let out = encode_utc_time(&time).unwrap();
        assert_eq!(
            out,
            vec![
                0x17, 0x0D, 0x32, 0x33, 0x30, 0x31, 0x30, 0x31, 0x30, 0x30, 0x30, 0x30, 0x30,
                0x30, 0x5A
            ]
        );
    }

    #[test]
    fn utc_time_without_zulu_has_length_twelve() {
        let time = UtcTime::new([0; 12], false);
        let out = encode_utc_time(&time).unwrap();
        assert_eq!(out[1], 12);
        assert_eq!(out.len(), 14);
    }

    #[test]
    fn generalized_time_fourteen_digits() {
        let time = GeneralizedTime::new([2, 0, 8, 0, 1, 0, 0, 9, 1, 3, 0, 0, 0, 5], true);
        let out = encode_generalized_time(&time).unwrap();
        assert_eq!(out[0], 0x18);
        assert_eq!(out[1], 15);
        assert_eq!(out.last().copied(), Some(b'Z'));
    }

    #[test]
    fn algorithm_identifier_concatenates_oid_and_parameters() {
        let spec = AlgorithmIdentifierSpec::new(alloc::vec![0x06, 0x01, 0x2A], alloc::vec![0x05, 0x00]);
        let out = encode_algorithm_identifier(&spec).unwrap();
        assert_eq!(out, vec![0x30, 0x05, 0x06, 0x01, 0x2A, 0x05, 0x00]);
    }

    #[test]
    fn bit_string_with_overridden_class() {
        let spec = BitStringSpec::new(Class::Application, alloc::vec![0x86]);
        let out = encode_bit_string(&spec).unwrap();
        // class bits (high 2 bits) = Application (01), primitive, tag 3
        assert_eq!(out[0], 0b0100_0011);
    }
}
