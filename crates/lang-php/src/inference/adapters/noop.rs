use docsync_api::models::{Expr, StaticType};
use docsync_api::oracle::{ClassRegistry, ExprScope, SubtypeOracle, TypeOracle};

/// Knows nothing: no types, no classes, no subtypes.
/// Useful for testing or when no project index is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpOracle;

impl TypeOracle for NoOpOracle {
    fn evaluate(&self, _expr: &Expr, _scope: &ExprScope<'_>) -> Option<StaticType> {
        None
    }
}

impl SubtypeOracle for NoOpOracle {
    fn is_subtype_of(&self, _name: &str, _ancestor: &str) -> bool {
        false
    }
}

impl ClassRegistry for NoOpOracle {
    fn class_exists(&self, _fqn: &str) -> bool {
        false
    }
}
