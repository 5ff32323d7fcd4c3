//! The X.509 v3 certificate composer (C7).
//!
//! Every field in the certificate shape is a [`Field<T>`]: either its
//! typed universal-type spec, or an arbitrary fallback [`Pdu`] that
//! replaces it verbatim. This is the switch a fuzzer flips to produce
//! malformed certificates while keeping the rest of the shape intact.

use alloc::vec::Vec;

use crate::error::EncodeError;
use crate::pdu::{Encoder, Pdu};
use crate::types::{
    encode_algorithm_identifier, encode_bit_string, encode_integer, encode_time,
    AlgorithmIdentifierSpec, BitStringSpec, IntegerSpec, Time,
};

/// A certificate field that is either its typed value or an arbitrary
/// PDU standing in for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Field<T> {
    Typed(T),
    Fallback(Pdu),
}

impl<T> Field<T> {
    pub fn typed(value: T) -> Self {
        Field::Typed(value)
    }

    pub fn fallback(pdu: Pdu) -> Self {
        Field::Fallback(pdu)
    }
}

/// The three-valued `Version` field of a TBSCertificate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Version {
    V1 = 0,
    V2 = 1,
    V3 = 2,
}

impl Version {
    pub fn value(self) -> u8 {
        self as u8
    }
}

/// The `Validity` SEQUENCE: a `notBefore`/`notAfter` pair of `Time` choices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validity {
    pub not_before: Field<Time>,
    pub not_after: Field<Time>,
}

/// The `SubjectPublicKeyInfo` SEQUENCE.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectPublicKeyInfo {
    pub algorithm: Field<AlgorithmIdentifierSpec>,
    pub subject_public_key: Field<BitStringSpec>,
}

/// The `TBSCertificate` SEQUENCE.
///
/// `issuer` and `subject` are always `Pdu`s: the schema has no typed
/// `Name` encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TbsCertificate {
    pub version: Field<Version>,
    pub serial_number: Field<IntegerSpec>,
    pub signature: Field<AlgorithmIdentifierSpec>,
    pub issuer: Pdu,
    pub validity: Validity,
    pub subject: Pdu,
    pub subject_public_key_info: SubjectPublicKeyInfo,
    pub issuer_unique_id: Option<Field<BitStringSpec>>,
    pub subject_unique_id: Option<Field<BitStringSpec>>,
    pub extensions: Option<Pdu>,
}

/// The outer `Certificate` SEQUENCE.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Certificate {
    pub tbs_certificate: TbsCertificate,
    pub signature_algorithm: Field<AlgorithmIdentifierSpec>,
    pub signature_value: Field<BitStringSpec>,
}

/// Encodes a field by either splicing in its typed encoding or
/// recursing into the generic PDU encoder for its fallback.
fn encode_field<T>(
    encoder: &mut Encoder,
    field: &Field<T>,
    encode_typed: impl FnOnce(&T) -> Result<Vec<u8>, EncodeError>,
) -> Result<(), EncodeError> {
    match field {
        Field::Typed(value) => {
            let bytes = encode_typed(value)?;
            encoder.append_raw(&bytes);
            Ok(())
        }
        Field::Fallback(pdu) => {
            encoder.encode_pdu(pdu)?;
            Ok(())
        }
    }
}

/// Wraps `body`'s output in a `SEQUENCE` (identifier `0x30`, full
/// long-form-capable definite length), using the same
/// write-value-then-insert-length idiom the generic PDU encoder uses.
fn encode_sequence(
    encoder: &mut Encoder,
    body: impl FnOnce(&mut Encoder) -> Result<(), EncodeError>,
) -> Result<(), EncodeError> {
    encoder.append_raw(&[0x30]);
    let len_pos = encoder.position();
    body(encoder)?;
    let val_len = encoder.position() - len_pos;
    encoder.insert_definite_length(len_pos, val_len)?;
    Ok(())
}

fn encode_version(version: &Version) -> Result<Vec<u8>, EncodeError> {
    // INTEGER of length 1: no context-specific [0] wrapper at this layer.
    Ok(alloc::vec![0x02, 0x01, version.value()])
}

fn encode_validity(encoder: &mut Encoder, validity: &Validity) -> Result<(), EncodeError> {
    encode_sequence(encoder, |encoder| {
        encode_field(encoder, &validity.not_before, encode_time)?;
        encode_field(encoder, &validity.not_after, encode_time)?;
        Ok(())
    })
}

fn encode_subject_public_key_info(
    encoder: &mut Encoder,
    spki: &SubjectPublicKeyInfo,
) -> Result<(), EncodeError> {
    encode_sequence(encoder, |encoder| {
        encode_field(encoder, &spki.algorithm, encode_algorithm_identifier)?;
        encode_field(encoder, &spki.subject_public_key, encode_bit_string)?;
        Ok(())
    })
}

fn encode_tbs_certificate(encoder: &mut Encoder, tbs: &TbsCertificate) -> Result<(), EncodeError> {
    encode_sequence(encoder, |encoder| {
        encode_field(encoder, &tbs.version, encode_version)?;
        encode_field(encoder, &tbs.serial_number, encode_integer)?;
        encode_field(encoder, &tbs.signature, encode_algorithm_identifier)?;
        encoder.encode_pdu(&tbs.issuer)?;
        encode_validity(encoder, &tbs.validity)?;
        encoder.encode_pdu(&tbs.subject)?;
        encode_subject_public_key_info(encoder, &tbs.subject_public_key_info)?;

        // RFC 5280 §4.1 only requires these for v2/v3 (unique ids) and v3
        // (extensions), but an interesting fuzz input may set them
        // regardless of the version field, so they're encoded whenever
        // present independent of `tbs.version`.
        if let Some(issuer_unique_id) = &tbs.issuer_unique_id {
            encode_field(encoder, issuer_unique_id, encode_bit_string)?;
        }
        if let Some(subject_unique_id) = &tbs.subject_unique_id {
            encode_field(encoder, subject_unique_id, encode_bit_string)?;
        }
        if let Some(extensions) = &tbs.extensions {
            encoder.encode_pdu(extensions)?;
        }
        Ok(())
    })
}

/// Encodes a full X.509 v3 `Certificate` to DER.
pub fn encode_certificate(certificate: &Certificate) -> Result<Vec<u8>, EncodeError> {
    let mut encoder = Encoder::new();
    encode_sequence(&mut encoder, |encoder| {
        encode_tbs_certificate(encoder, &certificate.tbs_certificate)?;
        encode_field(
            encoder,
            &certificate.signature_algorithm,
            encode_algorithm_identifier,
        )?;
        encode_field(encoder, &certificate.signature_value, encode_bit_string)?;
        Ok(())
    })?;
    Ok(encoder.into_output())
}
