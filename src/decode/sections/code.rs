use crate::core::types::ValType;
use crate::core::{Func, FuncBody};
use crate::decode::helpers::{DecodeVectorError, ParseExpressionError, decode_expr, decode_vector};
use crate::decode::integer::{DecodeU32Error, decode_u32};
use crate::decode::types::DecodeValTypeError;
use std::io::Read;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeCodeSectionError {
    #[error("failed decoding Code entry count")]
    DecodeCount(#[from] DecodeU32Error),

    #[error("Code section declares {declared} entries but only {funcs} functions exist")]
    CountExceedsFunctions { declared: u32, funcs: usize },

    #[error("failed decoding Code entry at position {position}")]
    DecodeEntry {
        position: u32,
        source: DecodeCodeError,
    },

    #[error("function {func_idx} already has a body")]
    BodyAlreadyAssigned { func_idx: usize },
}

/// Decode the code section, binding entry `i` to function `i`.
///
/// The declared entry count may not exceed the function table built by the
/// function section; this is checked before any entry is decoded. Each
/// matching [`Func`] goes from `code: None` to `code: Some(..)` exactly
/// once.
pub(crate) fn decode_code_section<R: Read + ?Sized>(
    reader: &mut R,
    funcs: &mut [Func],
) -> Result<(), DecodeCodeSectionError> {
    let count = decode_u32(reader)?;

    if count as usize > funcs.len() {
        return Err(DecodeCodeSectionError::CountExceedsFunctions {
            declared: count,
            funcs: funcs.len(),
        });
    }

    for position in 0..count {
        let code = parse_code(reader)
            .map_err(|source| DecodeCodeSectionError::DecodeEntry { position, source })?;

        let func = &mut funcs[position as usize];
        if func.code.is_some() {
            // reachable only through a repeated Code section
            return Err(DecodeCodeSectionError::BodyAlreadyAssigned {
                func_idx: position as usize,
            });
        }
        func.code = Some(code);
    }

    Ok(())
}

#[derive(Debug, Error)]
pub enum DecodeCodeError {
    #[error("failed decoding size of function code")]
    DecodeEntrySize(DecodeU32Error),

    #[error("failed decoding locals vector")]
    DecodeLocalsVector(#[from] DecodeVectorError<DecodeCodeLocalsError>),

    #[error("failed decoding function body expression")]
    DecodeFunctionBody(#[from] ParseExpressionError),

    #[error(
        "Code entry size mismatch: declared {declared_bytes} bytes; consumed {consumed_bytes} (leftover: {leftover_bytes})"
    )]
    EntrySizeMismatch {
        declared_bytes: u32,
        leftover_bytes: u64,
        consumed_bytes: u64,
    },
}

fn parse_code<R: Read + ?Sized>(reader: &mut R) -> Result<FuncBody, DecodeCodeError> {
    let size = decode_u32(reader).map_err(DecodeCodeError::DecodeEntrySize)?;

    let mut reader = reader.take(size.into());
    let mut expanded_locals: u64 = 0;
    let max_locals = u64::from(u32::MAX);

    let groups = decode_vector(&mut reader, |r| {
        parse_locals_group(r, &mut expanded_locals, max_locals)
    })?;

    let mut locals = Vec::new();
    for group in groups {
        for _ in 0..group.count {
            locals.push(group.t);
        }
    }

    let body = decode_expr(&mut reader)?;

    if reader.limit() != 0 {
        return Err(DecodeCodeError::EntrySizeMismatch {
            declared_bytes: size,
            leftover_bytes: reader.limit(),
            consumed_bytes: u64::from(size) - reader.limit(),
        });
    }

    Ok(FuncBody { locals, body })
}

// One run-length compressed locals declaration: `count` repetitions of `t`.
#[derive(Debug, PartialEq)]
struct LocalsGroup {
    count: u32,
    t: ValType,
}

#[derive(Debug, Error)]
pub enum DecodeCodeLocalsError {
    #[error("failed decoding count of function locals")]
    DecodeLocalsCount(DecodeU32Error),

    #[error("too many locals: expected at most {max_locals}; got {actual_locals}")]
    LocalsCountOutOfBound { max_locals: u64, actual_locals: u64 },

    #[error("failed decoding local Value type")]
    DecodeLocalValType(#[from] DecodeValTypeError),
}

fn parse_locals_group<R: Read + ?Sized>(
    reader: &mut R,
    expanded_locals: &mut u64,
    max_locals: u64,
) -> Result<LocalsGroup, DecodeCodeLocalsError> {
    let count = decode_u32(reader).map_err(DecodeCodeLocalsError::DecodeLocalsCount)?;

    *expanded_locals += u64::from(count);
    if *expanded_locals > max_locals {
        return Err(DecodeCodeLocalsError::LocalsCountOutOfBound {
            max_locals,
            actual_locals: *expanded_locals,
        });
    }

    Ok(LocalsGroup {
        count,
        t: ValType::decode(reader)?,
    })
}
