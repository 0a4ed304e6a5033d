//! PHP property type inference and doc comment synchronisation.

pub mod docblock;
pub mod imports;
pub mod inference;
pub mod rules;

pub use docblock::{DocBlockManipulator, PhpDocInfo, TypeInfo};
pub use imports::UseAddingCommander;
pub use inference::{FieldRef, InferContext, InferenceOptions, PropertyTypeInferer, TypeSet};
pub use rules::FixVarDocTypePropertyRule;
