//! One decoder per understood section kind. Each is handed a reader
//! already limited to the section's declared content length.

pub mod code;
pub mod export;
pub mod function;
pub mod memory;
pub mod r#type;

pub use code::DecodeCodeSectionError;
pub use export::DecodeExportSectionError;
pub use function::DecodeFunctionSectionError;
pub use memory::DecodeMemorySectionError;
pub use r#type::DecodeTypeSectionError;

pub(crate) use code::decode_code_section;
pub(crate) use export::decode_export_section;
pub(crate) use function::decode_function_section;
pub(crate) use memory::decode_memory_section;
pub(crate) use r#type::decode_type_section;
