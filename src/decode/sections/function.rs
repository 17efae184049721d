use crate::core::indices::TypeIdx;
use crate::decode::helpers::{DecodeVectorError, decode_vector};
use crate::decode::indices::DecodeTypeIdxError;
use std::io::Read;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeFunctionSectionError {
    #[error("failed decoding Function section")]
    DecodeVector(#[from] DecodeVectorError<DecodeTypeIdxError>),
}

/// Decode the type indices declared by the function section. The caller
/// turns each into a [`Func`](crate::core::Func) with an unfilled body;
/// entry order defines the function index space.
pub(crate) fn decode_function_section<R: Read + ?Sized>(
    reader: &mut R,
) -> Result<Vec<TypeIdx>, DecodeFunctionSectionError> {
    Ok(decode_vector(reader, TypeIdx::decode)?)
}
