use crate::core::Memory;
use crate::decode::helpers::{DecodeVectorError, decode_vector};
use crate::decode::types::{ParseLimitsError, parse_limits};
use std::io::Read;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeMemorySectionError {
    #[error("failed decoding Memory section")]
    DecodeVector(#[from] DecodeVectorError<DecodeMemoryError>),
}

pub(crate) fn decode_memory_section<R: Read + ?Sized>(
    reader: &mut R,
) -> Result<Vec<Memory>, DecodeMemorySectionError> {
    Ok(decode_vector(reader, parse_memory)?)
}

#[derive(Debug, Error)]
pub enum DecodeMemoryError {
    #[error(transparent)]
    ParseLimits(#[from] ParseLimitsError),

    #[error(
        "memory size out of range: expected at most {max} pages; got {got}",
        max = Memory::MAX_PAGES
    )]
    SizeOutOfRange { got: u32 },
}

/// Decode one memory entry and eagerly allocate its backing buffer to the
/// declared minimum. The page ceiling is checked first so the allocation
/// is bounded by the format itself.
fn parse_memory<R: Read + ?Sized>(reader: &mut R) -> Result<Memory, DecodeMemoryError> {
    let limits = parse_limits(reader)?;

    for pages in [Some(limits.min), limits.max].into_iter().flatten() {
        if pages > Memory::MAX_PAGES {
            return Err(DecodeMemoryError::SizeOutOfRange { got: pages });
        }
    }

    Ok(Memory::new(limits))
}
