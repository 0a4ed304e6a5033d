pub mod error;
pub mod models;
pub mod oracle;

pub use error::{DocsyncError, Result};
pub use models::*;
pub use oracle::{ClassRegistry, ExprScope, SubtypeOracle, TypeOracle, UseImportCommander};
