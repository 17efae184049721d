//! Type definitions for the values a module can declare.

/// Value types classify the individual values a module computes with:
/// number types, vector types or reference types. Immutable once
/// constructed.
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum ValType {
    Num(NumType),
    Vec(VecType),
    Ref(RefType),
}

/// Number types classify 32/64-bit integers and IEEE 754 single/double
/// precision floats. Integers carry no inherent signedness; interpretation
/// is up to individual operations.
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum NumType {
    I32,
    I64,
    F32,
    F64,
}

/// Vector types classify 128-bit packed data. The decoder recognizes the
/// v128 tag but no vector instructions yet, so this is a zero-width
/// placeholder in practice.
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum VecType {
    V128,
}

/// Reference types classify first-class references to functions or to
/// host-provided objects.
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum RefType {
    Func,
    Extern,
}

/// A sequence of value types, as produced for function parameters and
/// results.
pub type ResultType = Vec<ValType>;

/// A function signature: an ordered parameter list mapped to an ordered
/// result list. Order matches call-site argument order and is semantically
/// significant.
#[derive(Debug, PartialEq)]
pub struct FuncType {
    pub parameters: ResultType,
    pub results: ResultType,
}

/// The size range of a resizable memory, in pages. A missing maximum means
/// the memory may grow without a declared bound.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Limits {
    pub min: u32,
    pub max: Option<u32>,
}
