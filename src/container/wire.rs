//! Cursor-style reader and writer for the container's wire primitives:
//! big-endian u32 integers and u32-length-prefixed byte strings.
//!
//! Every read is bounds-checked and surfaces `MalformedContainer` instead of
//! panicking, so a truncated or garbage buffer can never read out of bounds.

use crate::error::ContainerError;

pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Reader { buf, pos: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.buf.len()
    }

    /// Consume exactly `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], ContainerError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| ContainerError::malformed("truncated field"))?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32, ContainerError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes(bytes.try_into().expect("read_bytes returned 4 bytes")))
    }

    /// Consume a u32-length-prefixed byte string.
    pub fn read_string(&mut self) -> Result<&'a [u8], ContainerError> {
        let len = self.read_u32()? as usize;
        self.read_bytes(len)
    }

    /// Consume a length-prefixed string and require valid UTF-8.
    pub fn read_str(&mut self) -> Result<&'a str, ContainerError> {
        std::str::from_utf8(self.read_string()?)
            .map_err(|_| ContainerError::malformed("string field is not valid UTF-8"))
    }

    /// Everything not yet consumed, consuming it.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = &self.buf[self.pos..];
        self.pos = self.buf.len();
        rest
    }
}

#[derive(Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Writer::default()
    }

    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_string(&mut self, bytes: &[u8]) {
        self.write_u32(bytes.len() as u32);
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_string(s.as_bytes());
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_round_trip() {
        let mut w = Writer::new();
        w.write_str("none");
        w.write_u32(1);
        w.write_string(b"\x01\x02\x03");
        let bytes = w.into_bytes();

        let mut r = Reader::new(&bytes);
        assert_eq!(r.read_str().unwrap(), "none");
        assert_eq!(r.read_u32().unwrap(), 1);
        assert_eq!(r.read_string().unwrap(), b"\x01\x02\x03");
        assert!(r.is_empty());
    }

    #[test]
    fn test_truncated_read_is_an_error() {
        let mut r = Reader::new(&[0, 0, 0, 10, b'x']);
        assert!(r.read_string().is_err(), "length prefix beyond the buffer must fail");
    }

    #[test]
    fn test_length_prefix_overflow_is_an_error() {
        // A length prefix of u32::MAX must not wrap the cursor arithmetic.
        let mut r = Reader::new(&[0xff, 0xff, 0xff, 0xff, 1, 2, 3]);
        assert!(r.read_string().is_err());
    }

    #[test]
    fn test_read_rest_consumes_remainder() {
        let mut r = Reader::new(b"abc");
        assert_eq!(r.read_bytes(1).unwrap(), b"a");
        assert_eq!(r.read_rest(), b"bc");
        assert!(r.is_empty());
        assert_eq!(r.read_rest(), b"");
    }
}
