#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod buffer;
pub mod cert;
pub mod error;
pub mod identifier;
pub mod length;
pub mod pdu;
pub mod types;
mod varint;

pub use cert::{encode_certificate, Certificate, Field, SubjectPublicKeyInfo, TbsCertificate, Validity, Version};
pub use error::EncodeError;
pub use identifier::{Class, Encoding, Identifier, TagNumber};
pub use length::LengthDirective;
pub use pdu::{encode, Encoder, EncoderConfig, Pdu, Value, ValueElement, MAX_DEPTH};
pub use types::{
    encode_algorithm_identifier, encode_bit_string, encode_generalized_time, encode_integer,
    encode_time, encode_utc_time, AlgorithmIdentifierSpec, BitStringSpec, GeneralizedTime,
    IntegerSpec, Time, UtcTime,
};
