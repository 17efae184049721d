use crate::core::indices::LocalIdx;

/// One decoded instruction, keyed by its opcode byte. Each variant carries
/// exactly the immediate operands its opcode defines.
///
/// The opcode table is deliberately open-ended: extending the decoder means
/// adding a variant here and one dispatch arm in
/// [`Instruction::decode`](crate::decode::instructions), never touching the
/// existing arms. Opcodes without a variant are rejected, not skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// `end` (0x0B). Terminates an expression; kept in the decoded body so
    /// a [`FuncBody`](crate::core::FuncBody) is self-delimiting.
    End,

    /// `local.get` (0x20), carrying the local index.
    LocalGet(LocalIdx),

    /// `i32.add` (0x6A).
    I32Add,
}
