//! Decoding for the type grammar: value types, result types, function
//! types and limits.

use crate::core::types::{FuncType, Limits, NumType, RefType, ResultType, ValType, VecType};
use crate::decode::FromMarkerByte;
use crate::decode::helpers::{DecodeVectorError, decode_vector};
use crate::decode::integer::{DecodeU32Error, decode_u32};
use crate::decode::read_byte;
use phf::phf_ordered_map;
use std::io::{self, Read};
use thiserror::Error;

// Valid marker bytes for [ValType].
#[expect(non_upper_case_globals)]
static ValType_MARKERS: phf::OrderedMap<u8, ValType> = phf_ordered_map! {
    0x7Fu8 => ValType::Num(NumType::I32),
    0x7Eu8 => ValType::Num(NumType::I64),
    0x7Du8 => ValType::Num(NumType::F32),
    0x7Cu8 => ValType::Num(NumType::F64),
    0x7Bu8 => ValType::Vec(VecType::V128),
    0x70u8 => ValType::Ref(RefType::Func),
    0x6Fu8 => ValType::Ref(RefType::Extern),
};

#[derive(Debug, Error)]
#[error(
    "invalid ValType marker byte: expected one of {markers}; got {0:#04X}",
    markers = ValType::markers_formatted()
)]
pub struct InvalidValTypeMarkerError(pub u8);

impl From<u8> for InvalidValTypeMarkerError {
    fn from(b: u8) -> Self {
        Self(b)
    }
}

#[derive(Debug, Error)]
pub enum DecodeValTypeError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    InvalidMarkerByte(#[from] InvalidValTypeMarkerError),
}

impl ValType {
    pub(crate) fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self, DecodeValTypeError> {
        Ok(Self::from_marker(read_byte(reader)?)?)
    }
}

impl FromMarkerByte for ValType {
    type Error = InvalidValTypeMarkerError;

    fn markers() -> &'static phf::OrderedMap<u8, Self> {
        &ValType_MARKERS
    }
}

#[derive(Debug, Error)]
pub enum DecodeResultTypeError {
    #[error(transparent)]
    DecodeVector(#[from] DecodeVectorError<DecodeValTypeError>),
}

pub(crate) fn decode_result_type<R: Read + ?Sized>(
    reader: &mut R,
) -> Result<ResultType, DecodeResultTypeError> {
    Ok(decode_vector(reader, ValType::decode)?)
}

#[derive(Debug, Error)]
pub enum DecodeFuncTypeError {
    #[error(transparent)]
    ReadMarkerByte(#[from] io::Error),

    #[error(
        "unexpected FuncType marker byte: expected {expected:#04X}; got {0:#04X}",
        expected = FuncType::MARKER_BYTE
    )]
    InvalidMarkerByte(u8),

    #[error("failed decoding Parameters")]
    DecodeParameterTypes(#[source] DecodeResultTypeError),

    #[error("failed decoding Results")]
    DecodeResultTypes(#[source] DecodeResultTypeError),
}

impl FuncType {
    const MARKER_BYTE: u8 = 0x60;

    pub(crate) fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self, DecodeFuncTypeError> {
        let b = read_byte(reader)?;
        if b != Self::MARKER_BYTE {
            return Err(DecodeFuncTypeError::InvalidMarkerByte(b));
        }

        let parameters =
            decode_result_type(reader).map_err(DecodeFuncTypeError::DecodeParameterTypes)?;
        let results = decode_result_type(reader).map_err(DecodeFuncTypeError::DecodeResultTypes)?;

        Ok(FuncType {
            parameters,
            results,
        })
    }
}

#[derive(Debug, Error)]
pub enum ParseLimitsError {
    #[error("failed reading flag byte")]
    ReadFlagByte(io::Error),

    #[error("unexpected Limits flag byte: expected 0x00 (min only) or 0x01 (min and max); got {0:#04X}")]
    UnexpectedFlagByte(u8),

    #[error("failed decoding minimum limit")]
    DecodeMinLimit(DecodeU32Error),

    #[error("failed decoding maximum limit")]
    DecodeMaxLimit(DecodeU32Error),
}

pub(crate) fn parse_limits<R: Read + ?Sized>(reader: &mut R) -> Result<Limits, ParseLimitsError> {
    let has_max = match read_byte(reader).map_err(ParseLimitsError::ReadFlagByte)? {
        0x00 => false,
        0x01 => true,
        n => return Err(ParseLimitsError::UnexpectedFlagByte(n)),
    };

    let min = decode_u32(reader).map_err(ParseLimitsError::DecodeMinLimit)?;
    let max = if has_max {
        Some(decode_u32(reader).map_err(ParseLimitsError::DecodeMaxLimit)?)
    } else {
        None
    };

    Ok(Limits { min, max })
}
