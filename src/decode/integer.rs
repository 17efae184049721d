//! Decoding of unsigned LEB128 integers.
//!
//! <https://en.wikipedia.org/wiki/LEB128>
use crate::decode::read_byte;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeU32Error {
    #[error("uint32 too large")]
    TooLarge,

    #[error("uint32 representation too long")]
    RepresentationTooLong,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Decode an unsigned LEB128 integer of at most 32 payload bits.
///
/// Encodings longer than 5 bytes are rejected, as is a 5th byte whose
/// payload would spill past bit 31. Non-minimal encodings (trailing zero
/// groups) are accepted.
pub(crate) fn decode_u32<R: io::Read + ?Sized>(reader: &mut R) -> Result<u32, DecodeU32Error> {
    let mut result: u32 = 0;
    let mut shift: u8 = 0;

    // at most ceil(32/7) == 5 bytes
    for i in 1..=5 {
        let byte = read_byte(reader)?;

        result |= u32::from(byte & 0x7F) << shift;

        if byte & 0x80 == 0 {
            // bytes 1-4 carry 28 payload bits; the 5th byte may only use
            // the remaining 4
            if i == 5 && byte & 0xF0 != 0 {
                return Err(DecodeU32Error::TooLarge);
            }
            return Ok(result);
        }

        shift += 7;
    }

    Err(DecodeU32Error::RepresentationTooLong)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_u32(mut value: u32) -> Vec<u8> {
        let mut out = Vec::new();
        loop {
            let mut byte = (value & 0x7F) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            out.push(byte);
            if value == 0 {
                return out;
            }
        }
    }

    fn decode_from(bytes: Vec<u8>) -> Result<u32, DecodeU32Error> {
        decode_u32(&mut Cursor::new(bytes))
    }

    #[test]
    fn decodes_round_trip_values() {
        for value in [0, 1, 127, 128, 16384, u32::MAX] {
            assert_eq!(decode_from(encode_u32(value)).unwrap(), value);
        }
    }

    #[test]
    fn accepts_non_minimal_zero() {
        assert_eq!(decode_from(vec![0x80, 0x00]).unwrap(), 0);
    }

    #[test]
    fn rejects_payload_bits_past_bit_31() {
        let err = decode_from(vec![0xFF, 0xFF, 0xFF, 0xFF, 0x10]).unwrap_err();
        assert!(matches!(err, DecodeU32Error::TooLarge));
    }

    #[test]
    fn rejects_six_byte_representation() {
        let err = decode_from(vec![0x80; 5]).unwrap_err();
        assert!(matches!(err, DecodeU32Error::RepresentationTooLong));
    }

    #[test]
    fn reports_truncation_as_io_error() {
        let err = decode_from(vec![0x80, 0x80]).unwrap_err();
        match err {
            DecodeU32Error::Io(e) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
