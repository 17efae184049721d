//! Newtypes for the module's index spaces.
//!
//! Indices are carried exactly as decoded; whether they actually point at
//! an existing entry in their target table is not this crate's concern.

macro_rules! define_index_type {
    ($name:ident) => {
        #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
        pub struct $name(pub u32);
    };
}

define_index_type!(TypeIdx);
define_index_type!(FuncIdx);
define_index_type!(TableIdx);
define_index_type!(MemIdx);
define_index_type!(GlobalIdx);
define_index_type!(LocalIdx);
