pub mod naming;
pub mod syntax;
pub mod types;

pub use naming::NameScope;
pub use syntax::*;
pub use types::*;
