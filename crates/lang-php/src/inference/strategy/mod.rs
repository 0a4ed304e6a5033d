//! Property type strategies.
//!
//! Each strategy implements [`PropertyTypeStrategy`]; the
//! [`PropertyTypeInferer`](crate::inference::PropertyTypeInferer) runs them by
//! descending priority and keeps the first non-empty answer.

mod all_assign;
mod constructor;

pub use all_assign::AllAssignStrategy;
pub use constructor::{ConstructorParamStrategy, resolve_param_type_names};

use crate::inference::context::{FieldRef, InferContext};
use crate::inference::core::canonical;
use crate::inference::core::type_set::TypeSet;
use docsync_api::models::{Expr, StaticType};

/// A property type inference strategy.
///
/// Strategies are stateless and read-only: the same input always yields the
/// same output.
pub trait PropertyTypeStrategy: Send + Sync {
    /// Attempt to infer the types of the given property.
    ///
    /// Returns an empty set if this strategy doesn't apply or found nothing.
    fn infer(&self, field: &FieldRef<'_>, ctx: &InferContext<'_>) -> TypeSet;

    /// Higher runs first.
    fn priority(&self) -> i32;

    fn name(&self) -> &'static str;
}

/// Canonical strings of `ty` as a [`TypeSet`].
pub(crate) fn to_type_set(ty: &StaticType) -> TypeSet {
    canonical::resolve(Some(ty)).into_iter().collect()
}

/// `public $value;` and `public $value = null;` both start out as `null`.
pub(crate) fn defaults_to_null(default: Option<&Expr>) -> bool {
    default.is_none_or(Expr::is_null_const)
}

/// Evidence + null-by-default, canonicalized as an intersection.
pub(crate) fn evidence_to_type_set(
    mut evidence: Vec<StaticType>,
    default: Option<&Expr>,
) -> TypeSet {
    if evidence.is_empty() {
        return TypeSet::new();
    }
    if defaults_to_null(default) {
        evidence.push(StaticType::null());
    }
    to_type_set(&StaticType::intersection(evidence))
}
