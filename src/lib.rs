//! A decoder for binary modules in the WebAssembly MVP format.
//!
//! The decoder performs a single forward pass over a byte stream: it
//! verifies the module header, walks the self-describing sections and
//! reconstructs a typed, fully owned [`Module`]. Sections the decoder
//! understands (type, function, memory, export, code) are decoded into
//! structured data; every other recognized section is skipped over by its
//! declared length without interpretation.
//!
//! The main entry point is the [`decode()`] function.
#![forbid(unsafe_code)]

pub mod core;
pub mod decode;

pub use crate::core::{Export, ExportDesc, Func, FuncBody, Memory, Module, SectionKind};
pub use crate::decode::{DecodeModuleError, ErrorKind, decode};
