//! Rewrite rules built on inference and the docblock manipulator.

mod fix_var_doc;

pub use fix_var_doc::FixVarDocTypePropertyRule;
