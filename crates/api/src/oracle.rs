//! Collaborators the engine consumes but does not implement.
//!
//! Implementations live with the framework; `docsync-php` ships in-memory
//! adapters for tests and standalone use.

use crate::models::naming::NameScope;
use crate::models::syntax::{ClassLike, ClassMethod, Expr};
use crate::models::types::StaticType;

/// Where an expression is evaluated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExprScope<'a> {
    pub class: Option<&'a ClassLike>,
    pub method: Option<&'a ClassMethod>,
}

impl<'a> ExprScope<'a> {
    pub fn in_class(class: &'a ClassLike) -> Self {
        Self {
            class: Some(class),
            method: None,
        }
    }

    pub fn in_method(class: Option<&'a ClassLike>, method: &'a ClassMethod) -> Self {
        Self {
            class,
            method: Some(method),
        }
    }
}

/// Evaluates the static type of an expression.
pub trait TypeOracle: Send + Sync {
    /// Returns `None` when the type cannot be determined.
    fn evaluate(&self, expr: &Expr, scope: &ExprScope<'_>) -> Option<StaticType>;
}

/// Answers "is `name` a subtype of `ancestor`" over fully qualified names.
pub trait SubtypeOracle: Send + Sync {
    fn is_subtype_of(&self, name: &str, ancestor: &str) -> bool;
}

/// Knows which classes exist.
pub trait ClassRegistry: Send + Sync {
    fn class_exists(&self, fqn: &str) -> bool;
}

/// Receives requests to add `use` imports to the file of a scope.
pub trait UseImportCommander {
    /// Whether some import already occupies the short name of `fqn`.
    fn is_short_imported(&self, scope: &NameScope, fqn: &str) -> bool;

    /// Whether the import occupying the short name of `fqn` is `fqn` itself.
    fn is_import_shortable(&self, scope: &NameScope, fqn: &str) -> bool;

    fn add_use_import(&mut self, scope: &NameScope, fqn: &str);
}
