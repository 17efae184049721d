//! Instruction decoding: one opcode byte, then the immediates that opcode
//! defines.
use crate::core::indices::LocalIdx;
use crate::core::instruction::Instruction;
use crate::decode::indices::DecodeLocalIdxError;
use crate::decode::read_byte;
use std::io::{self, Read};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed reading instruction opcode")]
    ReadOpcode(#[from] io::Error),

    #[error("failed decoding local.get immediate")]
    LocalIdx(#[from] DecodeLocalIdxError),

    #[error("unexpected opcode: {0:#04X}")]
    InvalidOpcode(u8),
}

impl Instruction {
    /// Decode a single instruction.
    ///
    /// This match is the extension point for new opcodes: each one gets a
    /// byte value, an immediate grammar and a variant. Bytes without an arm
    /// fail; they are never skipped or guessed at.
    pub(crate) fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self, ParseError> {
        let instruction = match read_byte(reader)? {
            0x0B => Instruction::End,
            0x20 => Instruction::LocalGet(LocalIdx::decode(reader)?),
            0x6A => Instruction::I32Add,
            opcode => return Err(ParseError::InvalidOpcode(opcode)),
        };

        Ok(instruction)
    }
}
