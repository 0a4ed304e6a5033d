use docsync_api::models::{ClassLike, Expr, Scalar, StaticType, TypeHint};
use docsync_api::oracle::{ExprScope, TypeOracle};

/// A TypeOracle that reads types off the syntax alone, without a backing
/// project index.
///
/// Understands literals, `new`, arrays, closures, `$this`, typed parameters of
/// the enclosing method and typed properties of the enclosing class.
/// Everything else is unknown.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicTypeOracle;

impl HeuristicTypeOracle {
    pub fn new() -> Self {
        Self
    }
}

impl TypeOracle for HeuristicTypeOracle {
    fn evaluate(&self, expr: &Expr, scope: &ExprScope<'_>) -> Option<StaticType> {
        match expr {
            Expr::Scalar(Scalar::Int(_)) => Some(StaticType::int()),
            Expr::Scalar(Scalar::Float(_)) => Some(StaticType::float()),
            Expr::Scalar(Scalar::String(_)) => Some(StaticType::string()),
            Expr::ConstFetch(name) => const_type(name),
            Expr::Array(items) => Some(self.array_type(items, scope)),
            Expr::New { class, .. } => class_reference(class, scope.class),
            Expr::Variable(name) if name == "this" => class_type(scope.class),
            Expr::Variable(name) => {
                let param = scope.method?.param(name)?;
                let ty = hint_type(param.type_hint.as_ref()?, scope.class)?;
                if param.variadic {
                    return Some(StaticType::array_of(ty));
                }
                Some(ty)
            }
            Expr::PropertyFetch { var, name } if is_this(var) => {
                let property = scope.class?.get_property(name)?;
                hint_type(property.type_hint.as_ref()?, scope.class)
            }
            Expr::StaticPropertyFetch { class, name } if is_self_reference(class) => {
                let property = scope.class?.get_property(name)?;
                hint_type(property.type_hint.as_ref()?, scope.class)
            }
            Expr::Closure { .. } => Some(StaticType::callable()),
            Expr::Assign { expr, .. } => self.evaluate(expr, scope),
            Expr::Ternary {
                cond,
                then,
                otherwise,
            } => {
                // `$a ?: $b` yields `$a` when truthy
                let then = self.evaluate(then.as_deref().unwrap_or(cond.as_ref()), scope)?;
                let otherwise = self.evaluate(otherwise, scope)?;
                if then == otherwise {
                    return Some(then);
                }
                Some(StaticType::union([then, otherwise]))
            }
            Expr::PropertyFetch { .. }
            | Expr::StaticPropertyFetch { .. }
            | Expr::ArrayDimFetch { .. }
            | Expr::MethodCall { .. }
            | Expr::StaticCall { .. }
            | Expr::FuncCall { .. }
            | Expr::Unknown => None,
        }
    }
}

impl HeuristicTypeOracle {
    /// Unknown element types degrade to `mixed[]`.
    fn array_type(&self, items: &[Expr], scope: &ExprScope<'_>) -> StaticType {
        let item_types: Option<Vec<StaticType>> = items
            .iter()
            .map(|item| self.evaluate(item, scope).filter(|ty| !ty.is_error()))
            .collect();

        match item_types {
            Some(mut types) if !types.is_empty() => {
                types.sort();
                types.dedup();
                if types.len() == 1 {
                    StaticType::array_of(types.remove(0))
                } else {
                    StaticType::array_of(StaticType::union(types))
                }
            }
            _ => StaticType::mixed_array(),
        }
    }
}

fn const_type(name: &str) -> Option<StaticType> {
    let name = name.trim_start_matches('\\').to_ascii_lowercase();
    match name.as_str() {
        "null" => Some(StaticType::null()),
        "true" | "false" => Some(StaticType::bool()),
        _ => None,
    }
}

fn is_this(expr: &Expr) -> bool {
    matches!(expr, Expr::Variable(name) if name == "this")
}

fn is_self_reference(class: &str) -> bool {
    class.eq_ignore_ascii_case("self") || class.eq_ignore_ascii_case("static")
}

fn class_type(class: Option<&ClassLike>) -> Option<StaticType> {
    class?.name.as_deref().map(StaticType::named)
}

fn class_reference(name: &str, class: Option<&ClassLike>) -> Option<StaticType> {
    if is_self_reference(name) {
        return class_type(class);
    }
    if name.eq_ignore_ascii_case("parent") {
        return None;
    }
    Some(StaticType::named(name))
}

fn hint_type(hint: &TypeHint, class: Option<&ClassLike>) -> Option<StaticType> {
    match hint {
        TypeHint::Identifier(name) => match name.to_ascii_lowercase().as_str() {
            "int" | "integer" => Some(StaticType::int()),
            "float" | "double" => Some(StaticType::float()),
            "bool" | "boolean" | "true" | "false" => Some(StaticType::bool()),
            "string" => Some(StaticType::string()),
            "callable" => Some(StaticType::callable()),
            "object" => Some(StaticType::object()),
            "null" => Some(StaticType::null()),
            "mixed" => Some(StaticType::mixed()),
            "array" | "iterable" => Some(StaticType::mixed_array()),
            "self" | "static" => class_type(class),
            _ => None,
        },
        TypeHint::Name { resolved, .. } => Some(StaticType::named(resolved)),
        TypeHint::Nullable(inner) => {
            Some(StaticType::union([hint_type(inner, class)?, StaticType::null()]))
        }
        TypeHint::Union(members) => {
            let types: Option<Vec<StaticType>> =
                members.iter().map(|member| hint_type(member, class)).collect();
            Some(StaticType::union(types?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsync_api::models::{ClassMethod, Param, Property};

    fn eval(expr: &Expr) -> Option<StaticType> {
        HeuristicTypeOracle::new().evaluate(expr, &ExprScope::default())
    }

    #[test]
    fn test_literals() {
        assert_eq!(eval(&Expr::int(1)), Some(StaticType::int()));
        assert_eq!(eval(&Expr::string("a")), Some(StaticType::string()));
        assert_eq!(eval(&Expr::ConstFetch("NULL".into())), Some(StaticType::null()));
        assert_eq!(eval(&Expr::bool(false)), Some(StaticType::bool()));
        assert_eq!(eval(&Expr::ConstFetch("PHP_EOL".into())), None);
    }

    #[test]
    fn test_arrays() {
        assert_eq!(eval(&Expr::array(vec![])), Some(StaticType::mixed_array()));
        assert_eq!(
            eval(&Expr::array(vec![Expr::int(1), Expr::int(2)])),
            Some(StaticType::array_of(StaticType::int()))
        );
        assert_eq!(
            eval(&Expr::array(vec![Expr::int(1), Expr::Unknown])),
            Some(StaticType::mixed_array())
        );
    }

    #[test]
    fn test_this_and_self_resolve_to_enclosing_class() {
        let class = ClassLike::new("App\\Node");
        let oracle = HeuristicTypeOracle::new();
        let scope = ExprScope::in_class(&class);

        assert_eq!(oracle.evaluate(&Expr::this(), &scope), Some(StaticType::named("App\\Node")));
        assert_eq!(
            oracle.evaluate(&Expr::new_object("static"), &scope),
            Some(StaticType::named("App\\Node"))
        );
    }

    #[test]
    fn test_typed_param_and_property() {
        let method = ClassMethod::new("__construct")
            .with_param(Param::typed("name", TypeHint::nullable(TypeHint::ident("string"))));
        let class = ClassLike::new("App\\A")
            .with_property(Property::new("id").with_type(TypeHint::ident("int")));
        let oracle = HeuristicTypeOracle::new();
        let scope = ExprScope::in_method(Some(&class), &method);

        assert_eq!(
            oracle.evaluate(&Expr::var("name"), &scope),
            Some(StaticType::union([StaticType::string(), StaticType::null()]))
        );
        assert_eq!(oracle.evaluate(&Expr::this_prop("id"), &scope), Some(StaticType::int()));
        assert_eq!(oracle.evaluate(&Expr::var("missing"), &scope), None);
    }
}
