use crate::core::Expr;
use crate::core::instruction::Instruction;
use crate::decode::instructions::ParseError;
use crate::decode::integer::{DecodeU32Error, decode_u32};
use std::io;
use std::io::Read;
use thiserror::Error;

pub(crate) fn read_byte<R: Read + ?Sized>(reader: &mut R) -> Result<u8, io::Error> {
    let mut buf = [0u8];
    reader.read_exact(&mut buf)?;
    Ok(buf[0])
}

#[derive(Debug, Error)]
pub enum DecodeVectorError<E: std::error::Error + 'static> {
    #[error("failed decoding vector length")]
    DecodeLength(#[from] DecodeU32Error),

    #[error("failed decoding vector element at position {position}")]
    DecodeElement { position: u32, source: E },
}

/// Decode a count-prefixed sequence: an unsigned LEB128 length followed by
/// that many elements, each produced by `decode_fn`.
pub(crate) fn decode_vector<R, F, T, E>(
    reader: &mut R,
    mut decode_fn: F,
) -> Result<Vec<T>, DecodeVectorError<E>>
where
    R: Read + ?Sized,
    F: FnMut(&mut R) -> Result<T, E>,
    E: std::error::Error + 'static,
{
    let len = decode_u32(reader)?;

    let mut items = Vec::with_capacity(len.try_into().unwrap_or(0));
    for position in 0..len {
        let elem =
            decode_fn(reader).map_err(|source| DecodeVectorError::DecodeElement { position, source })?;
        items.push(elem);
    }

    Ok(items)
}

#[derive(Debug, Error)]
pub enum DecodeByteVectorError {
    #[error("failed decoding vector length")]
    DecodeLength(#[from] DecodeU32Error),

    #[error("failed reading vector elements")]
    ReadElements(#[from] io::Error),
}

/// Read a length-prefixed run of raw bytes into a newly owned buffer.
///
/// Used for export names, which are preserved byte-for-byte without text
/// validation.
pub(crate) fn decode_byte_vector<R: Read + ?Sized>(
    reader: &mut R,
) -> Result<Vec<u8>, DecodeByteVectorError> {
    let len = decode_u32(reader)?;
    let mut bytes = vec![0u8; len.try_into().unwrap_or(0)];
    reader.read_exact(&mut bytes)?;
    Ok(bytes)
}

#[derive(Debug, Error)]
pub enum ParseExpressionError {
    #[error("failed decoding instruction")]
    DecodeInstruction(#[from] ParseError),
}

/// Decode instructions one at a time until an `end` is produced, inclusive:
/// the returned body's last element is always [`Instruction::End`].
pub(crate) fn decode_expr<R: Read + ?Sized>(reader: &mut R) -> Result<Expr, ParseExpressionError> {
    let mut body = Vec::new();

    loop {
        let instruction = Instruction::decode(reader)?;
        let done = instruction == Instruction::End;
        body.push(instruction);
        if done {
            return Ok(body);
        }
    }
}
