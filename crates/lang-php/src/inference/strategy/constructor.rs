use super::{PropertyTypeStrategy, evidence_to_type_set, to_type_set};
use crate::docblock;
use crate::inference::context::{FieldRef, InferContext, InferenceOptions};
use crate::inference::core::canonical::MIXED_ARRAY;
use crate::inference::core::type_set::{TypeName, TypeSet};
use crate::inference::evidence::{find_param_bound_to_property, infer_in_method};
use docsync_api::models::naming::NAMESPACE_SEPARATOR;
use docsync_api::models::{ClassLike, ClassMethod, Param, StaticType, TypeHint};
use docsync_api::oracle::ExprScope;

/// Types of the instantiating-method parameter a property is assigned from.
///
/// ```text
/// public function __construct(?Logger $logger)
/// {
///     $this->logger = $logger;
/// }
/// ↓
/// \Psr\Log\Logger|null
/// ```
pub struct ConstructorParamStrategy;

impl PropertyTypeStrategy for ConstructorParamStrategy {
    fn infer(&self, field: &FieldRef<'_>, ctx: &InferContext<'_>) -> TypeSet {
        let Some(class) = field.class else {
            return TypeSet::new();
        };

        let mut types = TypeSet::new();
        for method in class
            .methods()
            .filter(|method| is_instantiating(method, ctx.options))
        {
            types.extend(infer_from_method(field, class, method, ctx));
        }
        types
    }

    fn priority(&self) -> i32 {
        800
    }

    fn name(&self) -> &'static str {
        "constructor_param"
    }
}

fn is_instantiating(method: &ClassMethod, options: &InferenceOptions) -> bool {
    options.is_instantiating_name(&method.name)
        || options
            .instantiation_markers
            .iter()
            .any(|marker| docblock::has_tag(method, marker))
}

fn infer_from_method(
    field: &FieldRef<'_>,
    class: &ClassLike,
    method: &ClassMethod,
    ctx: &InferContext<'_>,
) -> TypeSet {
    let Some(param) = find_param_bound_to_property(method, field.name()) else {
        return TypeSet::new();
    };

    let Some(type_hint) = &param.type_hint else {
        let evidence = infer_in_method(field.name(), Some(class), method, ctx);
        return evidence_to_type_set(evidence, field.property.default.as_ref());
    };

    let mut types = TypeSet::new();
    for name in resolve_param_type_names(type_hint) {
        if name.as_str() == "array" {
            // make the bare array more precise, if possible
            types.extend(resolve_more_specific_array_type(field, class, method, ctx));
        } else {
            types.insert(name);
        }
    }

    if is_param_nullable(param, class, method, ctx) {
        types.insert("null");
    }

    types
}

/// Names a declared parameter type contributes, as they should be written.
///
/// Reserved names are lower-cased, class names made absolute. A class name
/// written through a `use ... as Alias` import keeps its alias: the resolved
/// name then no longer ends with the written one.
pub fn resolve_param_type_names(type_hint: &TypeHint) -> TypeSet {
    let mut names = TypeSet::new();
    collect_param_type_names(type_hint, &mut names);
    names
}

fn collect_param_type_names(type_hint: &TypeHint, names: &mut TypeSet) {
    match type_hint {
        TypeHint::Identifier(name) => {
            names.insert(name.to_ascii_lowercase());
        }
        TypeHint::Name { resolved, written } => {
            if is_aliased(resolved, written) {
                names.insert(TypeName::alias(written.as_str()));
            } else {
                names.insert(format!("{}{}", NAMESPACE_SEPARATOR, resolved));
            }
        }
        TypeHint::Nullable(inner) => collect_param_type_names(inner, names),
        TypeHint::Union(members) => {
            for member in members {
                collect_param_type_names(member, names);
            }
        }
    }
}

fn is_aliased(resolved: &str, written: &str) -> bool {
    let written = written.trim_start_matches(NAMESPACE_SEPARATOR);
    if written == resolved {
        return false;
    }
    !resolved.ends_with(&format!("{}{}", NAMESPACE_SEPARATOR, written))
}

fn resolve_more_specific_array_type(
    field: &FieldRef<'_>,
    class: &ClassLike,
    method: &ClassMethod,
    ctx: &InferContext<'_>,
) -> TypeSet {
    let evidence = infer_in_method(field.name(), Some(class), method, ctx);
    if evidence.is_empty() {
        return TypeSet::from_iter([MIXED_ARRAY]);
    }

    let refined = to_type_set(&StaticType::intersection(evidence));
    if refined.is_empty() {
        return TypeSet::from_iter([MIXED_ARRAY]);
    }
    refined
}

fn is_param_nullable(
    param: &Param,
    class: &ClassLike,
    method: &ClassMethod,
    ctx: &InferContext<'_>,
) -> bool {
    if matches!(param.type_hint, Some(TypeHint::Nullable(_))) {
        return true;
    }

    let Some(default) = &param.default else {
        return false;
    };
    let scope = ExprScope::in_method(Some(class), method);
    ctx.oracle
        .evaluate(default, &scope)
        .is_some_and(|ty| ty.is_null())
}
