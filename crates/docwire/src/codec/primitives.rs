//! Primitive encoding/decoding for the docwire binary format.
//!
//! Implements varint, signed varint (zigzag), fixed 64-bit floats, length
//! prefixed strings, and the field keys every record is built from.

use crate::error::DecodeError;
use crate::limits::{MAX_MESSAGE_LEN, MAX_VARINT_BYTES};

/// How a field's payload is laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WireKind {
    /// LEB128 varint (integers, bools, enum codes).
    Varint = 0,
    /// Little-endian 8-byte value (f64).
    Fixed64 = 1,
    /// Varint length followed by that many bytes (strings, nested records).
    Len = 2,
}

impl WireKind {
    /// Creates a WireKind from the low three bits of a field key.
    pub fn from_u8(v: u8) -> Option<WireKind> {
        match v {
            0 => Some(WireKind::Varint),
            1 => Some(WireKind::Fixed64),
            2 => Some(WireKind::Len),
            _ => None,
        }
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding binary data.
///
/// Wraps a byte slice and provides methods for reading primitives
/// with bounds checking and error handling.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the remaining bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        if self.pos >= self.data.len() {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let byte = self.data[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if n > self.data.len() - self.pos {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads an unsigned varint (LEB128).
    #[inline]
    pub fn read_varint(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        let mut result: u64 = 0;
        let mut shift = 0;

        for i in 0..MAX_VARINT_BYTES {
            let byte = self.read_byte(context)?;
            let value = (byte & 0x7F) as u64;

            // Check for overflow
            if shift >= 64 || (shift == 63 && value > 1) {
                return Err(DecodeError::VarintOverflow);
            }

            result |= value << shift;

            if byte & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;

            if i == MAX_VARINT_BYTES - 1 {
                return Err(DecodeError::VarintTooLong);
            }
        }

        Err(DecodeError::VarintTooLong)
    }

    /// Reads a varint that must fit in a u32.
    pub fn read_u32(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        let value = self.read_varint(context)?;
        u32::try_from(value).map_err(|_| DecodeError::IntegerOutOfRange {
            field: context,
            value,
            target: "u32",
        })
    }

    /// Reads a signed varint (zigzag encoded).
    pub fn read_signed_varint(&mut self, context: &'static str) -> Result<i64, DecodeError> {
        let unsigned = self.read_varint(context)?;
        Ok(zigzag_decode(unsigned))
    }

    /// Reads a varint length prefix and returns that many bytes.
    pub fn read_len_prefixed(
        &mut self,
        max_len: usize,
        field: &'static str,
    ) -> Result<&'a [u8], DecodeError> {
        let len = self.read_varint(field)?;
        let len = usize::try_from(len).map_err(|_| DecodeError::LengthExceedsLimit {
            field,
            len: usize::MAX,
            max: max_len,
        })?;
        if len > max_len {
            return Err(DecodeError::LengthExceedsLimit {
                field,
                len,
                max: max_len,
            });
        }
        self.read_bytes(len, field)
    }

    /// Reads a length-prefixed UTF-8 string.
    #[inline]
    pub fn read_string(
        &mut self,
        max_len: usize,
        field: &'static str,
    ) -> Result<String, DecodeError> {
        let bytes = self.read_len_prefixed(max_len, field)?;
        // Validate UTF-8 on borrowed slice, then allocate once
        std::str::from_utf8(bytes)
            .map(|s| s.to_string())
            .map_err(|_| DecodeError::InvalidUtf8 { field })
    }

    /// Reads a little-endian f64.
    #[inline]
    pub fn read_f64(&mut self, context: &'static str) -> Result<f64, DecodeError> {
        let bytes = self.read_bytes(8, context)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(f64::from_le_bytes(buf))
    }

    /// Reads a field key and splits it into field number and wire kind.
    pub fn read_key(&mut self) -> Result<(u32, WireKind), DecodeError> {
        let key = self.read_varint("field key")?;
        let kind_bits = (key & 0x07) as u8;
        let kind = WireKind::from_u8(kind_bits)
            .ok_or(DecodeError::InvalidWireKind { kind: kind_bits })?;
        let number = key >> 3;
        if number == 0 {
            return Err(DecodeError::InvalidTag);
        }
        let number = u32::try_from(number).map_err(|_| DecodeError::IntegerOutOfRange {
            field: "field key",
            value: number,
            target: "u32",
        })?;
        Ok((number, kind))
    }

    /// Skips over the payload of a field this decoder does not know.
    pub fn skip_field(&mut self, kind: WireKind) -> Result<(), DecodeError> {
        match kind {
            WireKind::Varint => {
                self.read_varint("skipped field")?;
            }
            WireKind::Fixed64 => {
                self.read_bytes(8, "skipped field")?;
            }
            WireKind::Len => {
                self.read_len_prefixed(MAX_MESSAGE_LEN, "skipped field")?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding binary data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes an unsigned varint (LEB128).
    #[inline]
    pub fn write_varint(&mut self, value: u64) {
        let mut buf = [0u8; MAX_VARINT_BYTES];
        let len = encode_varint(value, &mut buf);
        self.buf.extend_from_slice(&buf[..len]);
    }

    /// Writes a signed varint (zigzag encoded).
    pub fn write_signed_varint(&mut self, value: i64) {
        self.write_varint(zigzag_encode(value));
    }

    /// Writes a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, s: &str) {
        self.write_bytes_prefixed(s.as_bytes());
    }

    /// Writes a length-prefixed byte array.
    pub fn write_bytes_prefixed(&mut self, bytes: &[u8]) {
        self.write_varint(bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a little-endian f64.
    pub fn write_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a field key.
    #[inline]
    pub fn write_key(&mut self, number: u32, kind: WireKind) {
        self.write_varint(((number as u64) << 3) | kind as u64);
    }
}

/// Encodes `value` as LEB128 into `buf`, returning the number of bytes used.
pub fn encode_varint(mut value: u64, buf: &mut [u8; MAX_VARINT_BYTES]) -> usize {
    let mut len = 0;
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        buf[len] = byte;
        len += 1;
        if value == 0 {
            return len;
        }
    }
}

// =============================================================================
// ZIGZAG ENCODING
// =============================================================================

/// Encodes a signed integer using zigzag encoding.
///
/// Maps negative numbers to odd positive numbers:
/// 0 -> 0, -1 -> 1, 1 -> 2, -2 -> 3, 2 -> 4, ...
#[inline]
pub fn zigzag_encode(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Decodes a zigzag-encoded unsigned integer back to signed.
#[inline]
pub fn zigzag_decode(n: u64) -> i64 {
    ((n >> 1) as i64) ^ (-((n & 1) as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zigzag_values() {
        assert_eq!(zigzag_encode(0), 0);
        assert_eq!(zigzag_encode(-1), 1);
        assert_eq!(zigzag_encode(1), 2);
        assert_eq!(zigzag_encode(-2), 3);
        assert_eq!(zigzag_decode(zigzag_encode(i64::MIN)), i64::MIN);
    }

    #[test]
    fn test_varint_boundaries() {
        for v in [0u64, 127, 128, 16383, 16384, u64::MAX] {
            let mut writer = Writer::new();
            writer.write_varint(v);

            let mut reader = Reader::new(writer.as_bytes());
            assert_eq!(reader.read_varint("test").unwrap(), v, "failed for {}", v);
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn test_varint_too_long() {
        let data = [0x80u8; 11];
        let mut reader = Reader::new(&data);
        assert!(matches!(reader.read_varint("test"), Err(DecodeError::VarintTooLong)));
    }

    #[test]
    fn test_u32_out_of_range() {
        let mut writer = Writer::new();
        writer.write_varint(u32::MAX as u64 + 1);

        let mut reader = Reader::new(writer.as_bytes());
        assert!(matches!(
            reader.read_u32("index"),
            Err(DecodeError::IntegerOutOfRange { target: "u32", .. })
        ));
    }

    #[test]
    fn test_string_too_long() {
        let mut writer = Writer::new();
        writer.write_varint(1000);
        writer.write_bytes(&[b'a'; 1000]);

        let mut reader = Reader::new(writer.as_bytes());
        assert!(matches!(
            reader.read_string(100, "test"),
            Err(DecodeError::LengthExceedsLimit { max: 100, .. })
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        let mut writer = Writer::new();
        writer.write_bytes_prefixed(&[0xC3, 0x28]);

        let mut reader = Reader::new(writer.as_bytes());
        assert!(matches!(
            reader.read_string(100, "word"),
            Err(DecodeError::InvalidUtf8 { field: "word" })
        ));
    }

    #[test]
    fn test_key_roundtrip_and_skip() {
        let mut writer = Writer::new();
        writer.write_key(300, WireKind::Len);
        writer.write_string("ignored");
        writer.write_key(2, WireKind::Fixed64);
        writer.write_f64(0.5);

        let mut reader = Reader::new(writer.as_bytes());
        let (number, kind) = reader.read_key().unwrap();
        assert_eq!((number, kind), (300, WireKind::Len));
        reader.skip_field(kind).unwrap();
        assert_eq!(reader.read_key().unwrap(), (2, WireKind::Fixed64));
        assert_eq!(reader.read_f64("score").unwrap(), 0.5);
    }

    #[test]
    fn test_field_number_zero_rejected() {
        let data = [0x02u8];
        let mut reader = Reader::new(&data);
        assert!(matches!(reader.read_key(), Err(DecodeError::InvalidTag)));
    }

    #[test]
    fn test_unknown_wire_kind_rejected() {
        let data = [0x0Fu8];
        let mut reader = Reader::new(&data);
        assert!(matches!(
            reader.read_key(),
            Err(DecodeError::InvalidWireKind { kind: 7 })
        ));
    }

    #[test]
    fn test_unexpected_eof() {
        let data = [0u8; 5];
        let mut reader = Reader::new(&data);
        assert!(matches!(
            reader.read_bytes(10, "test"),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }
}
