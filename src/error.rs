//! Error types for the encoder.
//!
//! Most of the encoder is a total function: malformed-by-design inputs
//! (an override length with nonsense bytes, a high-tag-number identifier
//! for a tag that didn't need one, a primitive encoding of a
//! constructed-only type) are not errors here — they are exactly what a
//! structure-aware fuzzer wants to emit, and the encoder writes them out
//! verbatim. The only genuinely fatal condition is a value length that
//! cannot be represented in a DER long-form length at all.

use snafu::Snafu;

/// Errors produced while encoding a PDU tree or certificate.
#[derive(Debug, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// A definite length's long-form byte count itself needs more than
    /// the 7 bits the leading length octet has available (`k > 127`).
    /// Unreachable for any length that fits in a native `usize`; kept as
    /// a hard error rather than silently truncating.
    #[snafu(display(
        "value length {actual_len} cannot be represented by a DER long-form length"
    ))]
    LengthOverflow {
        /// The value length that could not be encoded.
        actual_len: usize,
    },
}
