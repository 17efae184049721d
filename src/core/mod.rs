//! The decoded, in-memory representation of a module.
//!
//! Everything in here is plain owned data: a [`Module`] holds its types,
//! functions, memories and exports exclusively, and dropping it releases
//! the lot.

pub mod indices;
pub mod instruction;
pub mod types;

use crate::core::indices::{FuncIdx, GlobalIdx, MemIdx, TableIdx, TypeIdx};
use crate::core::instruction::Instruction;
use crate::core::types::{FuncType, Limits, ValType};

/// An instruction sequence forming one function body, terminated by (and
/// including) the `end` instruction.
pub type Expr = Vec<Instruction>;

/// The fixed unit in which memory limits are declared, in bytes.
pub const PAGE_SIZE: usize = 65536;

/// A decoded module: the result of a successful [`decode`](crate::decode())
/// pass.
///
/// All tables are populated in section-encounter order during a single
/// decode and are not touched afterwards.
#[derive(Debug, Default, PartialEq)]
pub struct Module {
    /// The function signatures referenced by [`Func::type`](Func) indices.
    pub types: Vec<FuncType>,

    /// The function index space. No import section is decoded, so index 0
    /// is the first entry of the function section.
    pub funcs: Vec<Func>,

    /// The linear memories, each with its backing buffer already allocated.
    pub mems: Vec<Memory>,

    pub exports: Vec<Export>,
}

/// A function: a signature reference plus, once the code section has been
/// decoded, its locals and body.
///
/// The function section creates entries with `code: None`; the code section
/// fills each entry exactly once, positionally. A `None` left over after
/// decoding is treated as a malformed module, never returned to the caller.
#[derive(Debug, PartialEq)]
pub struct Func {
    /// Index into [`Module::types`], stored as decoded (not range-checked).
    pub r#type: TypeIdx,

    pub code: Option<FuncBody>,
}

/// The locals and body of a function, decoded from one code-section entry.
#[derive(Debug, PartialEq)]
pub struct FuncBody {
    /// Declared locals in declaration order, with run-length groups already
    /// expanded. Parameters are not repeated here.
    pub locals: Vec<ValType>,

    pub body: Expr,
}

/// A linear memory with an eagerly allocated backing buffer.
#[derive(Debug, PartialEq)]
pub struct Memory {
    /// Minimum and optional maximum size, in pages.
    pub limits: Limits,

    /// The backing buffer, zero-initialized to `limits.min` pages.
    pub data: Vec<u8>,
}

impl Memory {
    /// The format's ceiling on page counts: 2^16 pages (4 GiB). Enforced
    /// before the backing buffer is allocated.
    pub const MAX_PAGES: u32 = 65536;

    pub fn new(limits: Limits) -> Self {
        let data = vec![0u8; limits.min as usize * PAGE_SIZE];
        Memory { limits, data }
    }
}

/// An export entry: a name and what it designates.
#[derive(Debug, PartialEq)]
pub struct Export {
    /// The export name, preserved byte-for-byte. The decoder does not
    /// require names to be valid UTF-8.
    pub name: Vec<u8>,

    pub desc: ExportDesc,
}

/// The target of an export: one of the four index spaces, with the index
/// stored as decoded.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ExportDesc {
    Func(FuncIdx),
    Table(TableIdx),
    Mem(MemIdx),
    Global(GlobalIdx),
}

/// The kinds of section a module may contain, in id order (0 through 12).
///
/// Only `Type`, `Function`, `Memory`, `Export` and `Code` contents are
/// decoded; the rest are recognized and skipped by their declared length.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum SectionKind {
    Custom,
    Type,
    Import,
    Function,
    Table,
    Memory,
    Global,
    Export,
    Start,
    Element,
    Code,
    Data,
    DataCount,
}
