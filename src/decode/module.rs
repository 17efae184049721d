use crate::core::{Func, Module, SectionKind};
use crate::decode::FromMarkerByte;
use crate::decode::integer::{DecodeU32Error, decode_u32};
use crate::decode::read_byte;
use crate::decode::sections::*;
use phf::phf_ordered_map;
use std::io::{self, Read};
use thiserror::Error;

const MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6D];
const SUPPORTED_VERSION: u32 = 1;

// Valid marker bytes for [SectionKind].
#[expect(non_upper_case_globals)]
static SectionId_MARKERS: phf::OrderedMap<u8, SectionKind> = phf_ordered_map! {
    0u8 => SectionKind::Custom,
    1u8 => SectionKind::Type,
    2u8 => SectionKind::Import,
    3u8 => SectionKind::Function,
    4u8 => SectionKind::Table,
    5u8 => SectionKind::Memory,
    6u8 => SectionKind::Global,
    7u8 => SectionKind::Export,
    8u8 => SectionKind::Start,
    9u8 => SectionKind::Element,
    10u8 => SectionKind::Code,
    11u8 => SectionKind::Data,
    12u8 => SectionKind::DataCount,
};

impl FromMarkerByte for SectionKind {
    type Error = InvalidSectionIdError;

    fn markers() -> &'static phf::OrderedMap<u8, Self> {
        &SectionId_MARKERS
    }
}

#[derive(Debug, Error)]
#[error("invalid section ID: expected one of {markers}; got {0:#04X}", markers = SectionKind::markers_formatted())]
pub struct InvalidSectionIdError(pub u8);

impl From<u8> for InvalidSectionIdError {
    fn from(b: u8) -> Self {
        Self(b)
    }
}

/// The coarse classification of a [`DecodeModuleError`].
///
/// `InvalidMagic` and `InvalidVersion` are only reportable while checking
/// the header; every other structural violation, including truncation, is
/// `MalformedBinary`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    InvalidMagic,
    InvalidVersion,
    MalformedBinary,
}

/// The top-level error that may occur when attempting to decode bytes into
/// a [Module].
///
/// Carries the full cause chain of the first violation encountered in
/// document order; use [`DecodeModuleError::kind`] for the coarse
/// classification.
#[derive(Debug, Error)]
pub enum DecodeModuleError {
    #[error(transparent)]
    ParseHeader(#[from] ParseHeaderError),

    #[error(transparent)]
    DecodeSectionHeader(#[from] DecodeSectionHeaderError),

    #[error("failed skipping over {kind:?} section")]
    SkipSection {
        kind: SectionKind,
        source: io::Error,
    },

    #[error("{kind:?} section size mismatch: declared {declared} bytes; got {got}")]
    SectionSizeMismatch {
        kind: SectionKind,
        declared: u32,
        got: u64,
    },

    #[error("function {func_idx} has no matching Code entry")]
    MissingFunctionBody { func_idx: usize },

    // section-specific errors
    #[error(transparent)]
    DecodeTypeSection(#[from] DecodeTypeSectionError),

    #[error(transparent)]
    DecodeFunctionSection(#[from] DecodeFunctionSectionError),

    #[error(transparent)]
    DecodeMemorySection(#[from] DecodeMemorySectionError),

    #[error(transparent)]
    DecodeExportSection(#[from] DecodeExportSectionError),

    #[error(transparent)]
    DecodeCodeSection(#[from] DecodeCodeSectionError),
}

impl DecodeModuleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ParseHeader(ParseHeaderError::InvalidMagic(_)) => ErrorKind::InvalidMagic,
            Self::ParseHeader(ParseHeaderError::InvalidVersion(_)) => ErrorKind::InvalidVersion,
            _ => ErrorKind::MalformedBinary,
        }
    }
}

/// Decode `input` into a [Module].
///
/// One uninterrupted forward pass: header, then sections until the input
/// ends cleanly at a section boundary. Any error is terminal; everything
/// built so far (including in-flight buffers) is dropped and only the
/// error reaches the caller.
pub fn decode(mut input: impl Read) -> Result<Module, DecodeModuleError> {
    parse_header(&mut input)?;

    let mut module = Module::default();

    while let Some(section_header) = decode_section_header(&mut input)? {
        let mut section_reader = input.by_ref().take(section_header.size.into());

        let kind = section_header.kind;
        match kind {
            SectionKind::Type => {
                module.types.extend(decode_type_section(&mut section_reader)?);
            }
            SectionKind::Function => {
                for type_idx in decode_function_section(&mut section_reader)? {
                    module.funcs.push(Func {
                        r#type: type_idx,
                        // filled in once the Code section arrives
                        code: None,
                    });
                }
            }
            SectionKind::Memory => {
                module.mems.extend(decode_memory_section(&mut section_reader)?);
            }
            SectionKind::Export => {
                module
                    .exports
                    .extend(decode_export_section(&mut section_reader)?);
            }
            SectionKind::Code => {
                decode_code_section(&mut section_reader, &mut module.funcs)?;
            }

            // Recognized but not decoded: advance past the declared length
            // without interpreting the content.
            SectionKind::Custom
            | SectionKind::Import
            | SectionKind::Table
            | SectionKind::Global
            | SectionKind::Start
            | SectionKind::Element
            | SectionKind::Data
            | SectionKind::DataCount => {
                io::copy(&mut section_reader, &mut io::sink())
                    .map_err(|source| DecodeModuleError::SkipSection { kind, source })?;
            }
        }

        // strict framing: the content must account for every declared byte
        if section_reader.limit() != 0 {
            return Err(DecodeModuleError::SectionSizeMismatch {
                kind,
                declared: section_header.size,
                got: u64::from(section_header.size) - section_reader.limit(),
            });
        }
    }

    // Code entries bind positionally, so once the section loop is done every
    // function must have received a body.
    if let Some(func_idx) = module.funcs.iter().position(|f| f.code.is_none()) {
        return Err(DecodeModuleError::MissingFunctionBody { func_idx });
    }

    Ok(module)
}

#[derive(Debug, Error)]
pub enum ParseHeaderError {
    #[error("failed reading module header")]
    Io(#[from] io::Error),

    #[error("invalid magic bytes: expected {expected:#04X?}; got {0:#04X?}", expected = MAGIC)]
    InvalidMagic([u8; 4]),

    #[error("unsupported version: expected {SUPPORTED_VERSION}; got {0}")]
    InvalidVersion(u32),
}

// The magic comparison happens only after all four bytes are present, so a
// short read surfaces as Io rather than InvalidMagic.
fn parse_header<R: Read + ?Sized>(reader: &mut R) -> Result<(), ParseHeaderError> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(ParseHeaderError::InvalidMagic(magic));
    }

    let mut version = [0u8; 4];
    reader.read_exact(&mut version)?;
    let version = u32::from_le_bytes(version);
    if version != SUPPORTED_VERSION {
        return Err(ParseHeaderError::InvalidVersion(version));
    }

    Ok(())
}

// One section id byte plus the declared content length.
#[derive(Debug, PartialEq)]
struct SectionHeader {
    kind: SectionKind,
    size: u32,
}

#[derive(Debug, Error)]
pub enum DecodeSectionHeaderError {
    #[error("failed reading section ID byte")]
    ReadSectionIdByte(#[from] io::Error),

    #[error("invalid section ID")]
    InvalidSectionId(#[from] InvalidSectionIdError),

    #[error("failed decoding section size")]
    DecodeSectionSize(#[from] DecodeU32Error),
}

// Returns Ok(None) on a clean end of stream: the section list is not
// length-prefixed, so running out of bytes at an id boundary is the normal
// way a module ends.
fn decode_section_header<R: Read + ?Sized>(
    reader: &mut R,
) -> Result<Option<SectionHeader>, DecodeSectionHeaderError> {
    let id = match read_byte(reader) {
        Ok(id) => id,
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let kind = SectionKind::from_marker(id)?;
    let size = decode_u32(reader)?;

    Ok(Some(SectionHeader { kind, size }))
}
