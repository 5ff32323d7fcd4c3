//! The append-and-insert octet buffer the rest of the encoder writes through.

use alloc::vec::Vec;

/// A growable sequence of octets.
///
/// [`Buffer::insert_at`] is the operation the whole encoder is built
/// around: a PDU's value is always written before its length, and the
/// length is spliced in front of the value afterwards. Positions at or
/// after the insertion point shift right; callers must not hold on to a
/// position across an `insert_at` unless it was captured strictly before
/// the insertion.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Buffer {
    octets: Vec<u8>,
}

impl Buffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `bytes` to the tail of the buffer.
    pub fn append(&mut self, bytes: &[u8]) {
        self.octets.extend_from_slice(bytes);
    }

    /// Appends a single octet to the tail of the buffer.
    pub fn push(&mut self, byte: u8) {
        self.octets.push(byte);
    }

    /// Inserts `bytes` before the octet currently at `position`.
    ///
    /// `position` must be `<= self.size()`.
    pub fn insert_at(&mut self, position: usize, bytes: &[u8]) {
        self.octets.splice(position..position, bytes.iter().copied());
    }

    /// The number of octets currently in the buffer.
    pub fn size(&self) -> usize {
        self.octets.len()
    }

    /// Borrows the buffer's contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.octets
    }

    /// Consumes the buffer, returning its contents.
    pub fn into_vec(self) -> Vec<u8> {
        self.octets
    }
}

impl From<Buffer> for Vec<u8> {
    fn from(buffer: Buffer) -> Self {
        buffer.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn append_then_insert_shifts_tail() {
        let mut buf = Buffer::new();
        buf.append(&[0xAA, 0xBB]);
        let len_pos = buf.size();
        buf.append(&[0xCC, 0xDD, 0xEE]);
        buf.insert_at(len_pos, &[0x03]);

        assert_eq!(buf.as_slice(), &[0xAA, 0xBB, 0x03, 0xCC, 0xDD, 0xEE]);
    }

    #[test]
    fn insert_at_head() {
        let mut buf = Buffer::new();
        buf.append(&[0x01, 0x02]);
        buf.insert_at(0, &[0x00]);

        assert_eq!(buf.as_slice(), &[0x00, 0x01, 0x02]);
    }

    #[test]
    fn insert_at_tail_is_append() {
        let mut buf = Buffer::new();
        buf.append(&[0x01]);
        buf.insert_at(1, &[0x02]);

        assert_eq!(buf.as_slice(), &[0x01, 0x02]);
    }
}
