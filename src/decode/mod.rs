//! Decoders for the binary module format, from the LEB128 primitives up to
//! the module driver.

pub(crate) mod helpers;
pub mod indices;
pub mod instructions;
pub mod integer;
mod module;
pub mod sections;
pub mod types;

pub(crate) use helpers::read_byte;
pub use helpers::{DecodeByteVectorError, DecodeVectorError, ParseExpressionError};
pub use module::{
    DecodeModuleError, DecodeSectionHeaderError, ErrorKind, InvalidSectionIdError,
    ParseHeaderError, decode,
};

/// Dispatch on a single tag byte via a fixed marker table.
///
/// Implementors provide the byte-to-variant mapping; the trait supplies
/// lookup and a formatted listing of valid markers for error messages.
pub(crate) trait FromMarkerByte
where
    Self: Sized + Copy + std::fmt::Debug + 'static,
{
    type Error: From<u8>;

    // defines the mapping between expected bytes and the corresponding value
    fn markers() -> &'static phf::OrderedMap<u8, Self>;

    fn markers_formatted() -> String {
        Self::markers()
            .entries()
            .map(|(marker, variant)| format!("{marker:#04X} ({variant:?})"))
            .collect::<Vec<String>>()
            .join(", ")
    }

    fn from_marker(b: u8) -> Result<Self, Self::Error> {
        match Self::markers().get(&b) {
            Some(n) => Ok(*n),
            None => Err(b.into()),
        }
    }
}
