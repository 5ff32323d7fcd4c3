//! The generic, depth-bounded PDU tree encoder (C5).
//!
//! This is the core of the crate: a PDU is encoded by writing its
//! identifier, then recursively writing its value, then going back and
//! splicing the length in front of the value at the position it started
//! at. No size is ever pre-computed.

use alloc::vec::Vec;

use crate::buffer::Buffer;
use crate::error::EncodeError;
use crate::identifier::{encode_identifier, Identifier};
use crate::length::{encode_length, LengthDirective};

/// The recursion cap inherited from the source fuzzer: deep enough to
/// reach real parser states, shallow enough to never overflow the stack.
pub const MAX_DEPTH: usize = 67_000;

/// One element of a PDU's value: either a nested PDU or a raw octet run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueElement {
    SubPdu(Pdu),
    Raw(Vec<u8>),
}

/// A PDU's value: an ordered sequence of elements, possibly empty.
pub type Value = Vec<ValueElement>;

/// A generic ASN.1 Protocol Data Unit: identifier, value, and how its
/// length should be encoded. Forms a tree through [`ValueElement::SubPdu`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pdu {
    pub identifier: Identifier,
    pub value: Value,
    pub length: LengthDirective,
}

impl Pdu {
    pub fn new(identifier: Identifier, value: Value, length: LengthDirective) -> Self {
        Self {
            identifier,
            value,
            length,
        }
    }
}

/// Encoder configuration. The only knob today is the recursion cap;
/// this exists as its own type (rather than a bare `usize` parameter)
/// so future rule variations have somewhere to live without changing
/// every call site, the way per-codec options structs commonly expose
/// rule variation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderConfig {
    pub max_depth: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
        }
    }
}

/// Recursively encodes a [`Pdu`] tree into a byte buffer.
///
/// Owns the buffer and the recursion depth for exactly one encode call;
/// nothing survives between calls, and nothing is shared.
#[derive(Debug, Default)]
pub struct Encoder {
    buffer: Buffer,
    depth: usize,
    config: EncoderConfig,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EncoderConfig) -> Self {
        Self {
            buffer: Buffer::new(),
            depth: 0,
            config,
        }
    }

    /// Appends raw octets to the tail of the underlying buffer. Used by
    /// callers (e.g. the certificate composer) that splice
    /// pre-encoded universal-type bytes in between PDU subtrees.
    pub fn append_raw(&mut self, bytes: &[u8]) {
        self.buffer.append(bytes);
    }

    /// The current tail position of the underlying buffer.
    pub fn position(&self) -> usize {
        self.buffer.size()
    }

    /// Inserts `bytes` at `position`, shifting everything at or after it
    /// to the right.
    pub fn insert_at(&mut self, position: usize, bytes: &[u8]) {
        self.buffer.insert_at(position, bytes);
    }

    /// Inserts a definite-form length for a value of `actual_len` octets
    /// at `len_pos`, short or long form as required. Used by callers
    /// that wrap their own SEQUENCE bodies (the certificate composer)
    /// with the same write-value-then-insert-length idiom `encode_pdu`
    /// uses internally.
    pub fn insert_definite_length(
        &mut self,
        len_pos: usize,
        actual_len: usize,
    ) -> Result<usize, EncodeError> {
        crate::length::encode_definite_length(&mut self.buffer, actual_len, len_pos)
    }

    /// Encodes `pdu`, appending identifier, value, and length to the
    /// buffer in that order (value materializes before length is
    /// spliced in front of it). Returns the total octets this PDU
    /// contributes to its parent.
    ///
    /// If the recursion cap is hit, the offending subtree contributes
    /// zero bytes and nothing is emitted for it — this is deliberate:
    /// the fuzzer needs the encode call to finish, not abort.
    pub fn encode_pdu(&mut self, pdu: &Pdu) -> Result<usize, EncodeError> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            self.depth -= 1;
            return Ok(0);
        }

        let id_len = encode_identifier(&mut self.buffer, pdu.identifier);
        let len_pos = self.buffer.size();
        let val_len = self.encode_value(&pdu.value)?;
        let len_len = encode_length(&mut self.buffer, &pdu.length, val_len, len_pos)?;

        self.depth -= 1;
        Ok(id_len + val_len + len_len)
    }

    fn encode_value(&mut self, value: &Value) -> Result<usize, EncodeError> {
        let mut total = 0;
        for element in value {
            match element {
                ValueElement::SubPdu(child) => total += self.encode_pdu(child)?,
                ValueElement::Raw(bytes) => {
                    self.buffer.append(bytes);
                    total += bytes.len();
                }
            }
        }
        Ok(total)
    }

    /// Consumes the encoder, returning everything written so far.
    pub fn into_output(self) -> Vec<u8> {
        self.buffer.into_vec()
    }
}

/// Encodes a single PDU tree to DER, using the default recursion cap.
pub fn encode(pdu: &Pdu) -> Result<Vec<u8>, EncodeError> {
    let mut encoder = Encoder::new();
    encoder.encode_pdu(pdu)?;
    Ok(encoder.into_output())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::{Class, Encoding};
    use pretty_assertions::assert_eq;

    fn integer(value: u8) -> Pdu {
        Pdu::new(
            Identifier::universal(Encoding::Primitive, 2),
            alloc::vec![ValueElement::Raw(alloc::vec![value])],
            LengthDirective::Definite,
        )
    }

    #[test]
    fn s1_integer_short() {
        let out = encode(&integer(1)).unwrap();
        assert_eq!(out, vec![0x02, 0x01, 0x01]);
    }

    #[test]
    fn s2_sequence_of_integer() {
        let seq = Pdu::new(
            Identifier::universal(Encoding::Constructed, 16),
            alloc::vec![
                ValueElement::SubPdu(integer(1)),
                ValueElement::SubPdu(integer(2)),
            ],
            LengthDirective::Definite,
        );
        let out = encode(&seq).unwrap();
        assert_eq!(out, vec![0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02]);
    }

    #[test]
    fn s3_long_form_length() {
        let value = alloc::vec![0xAAu8; 200];
        let pdu = Pdu::new(
            Identifier::universal(Encoding::Primitive, 4),
            alloc::vec![ValueElement::Raw(value)],
            LengthDirective::Definite,
        );
        let out = encode(&pdu).unwrap();
        assert_eq!(&out[..3], &[0x04, 0x81, 0xC8]);
        assert_eq!(out.len(), 3 + 200);
        assert!(out[3..].iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn s4_indefinite_length() {
        let pdu = Pdu::new(
            Identifier::universal(Encoding::Constructed, 16),
            alloc::vec![ValueElement::Raw(alloc::vec![0xAA, 0xBB])],
            LengthDirective::Indefinite,
        );
        let out = encode(&pdu).unwrap();
        assert_eq!(out, vec![0x30, 0x80, 0xAA, 0xBB, 0x00, 0x00]);
    }

    #[test]
    fn s5_high_tag_number() {
        let pdu = Pdu::new(
            Identifier::new(Class::ContextSpecific, Encoding::Primitive, 1000),
            alloc::vec![],
            LengthDirective::Definite,
        );
        let out = encode(&pdu).unwrap();
        assert_eq!(out, vec![0x9F, 0x87, 0x68, 0x00]);
    }

    #[test]
    fn depth_cap_zeroes_out_offending_subtree() {
        // A PDU nested one level past the cap contributes nothing, but
        // the parent still encodes.
        let mut config = EncoderConfig::default();
        config.max_depth = 1;
        let mut encoder = Encoder::with_config(config);

        let inner = integer(7);
        let outer = Pdu::new(
            Identifier::universal(Encoding::Constructed, 16),
            alloc::vec![ValueElement::SubPdu(inner)],
            LengthDirective::Definite,
        );
        let len = encoder.encode_pdu(&outer).unwrap();
        let out = encoder.into_output();
        // Outer SEQUENCE still encodes, with an empty (zero-length) body.
        assert_eq!(out, vec![0x30, 0x00]);
        assert_eq!(len, 2);
    }

    #[test]
    fn empty_value_sequence() {
        let pdu = Pdu::new(
            Identifier::universal(Encoding::Constructed, 16),
            alloc::vec![],
            LengthDirective::Definite,
        );
        assert_eq!(encode(&pdu).unwrap(), vec![0x30, 0x00]);
    }
}
