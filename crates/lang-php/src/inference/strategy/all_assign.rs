use super::{PropertyTypeStrategy, evidence_to_type_set};
use crate::inference::context::{FieldRef, InferContext};
use crate::inference::core::type_set::TypeSet;
use crate::inference::evidence::infer_in_class_like;

/// Union of every value assigned to the property anywhere in its class.
///
/// ```text
/// $this->items = [];
/// $this->items[] = new Item();
/// ↓
/// \App\Item[]|null      (declared without default)
/// ```
pub struct AllAssignStrategy;

impl PropertyTypeStrategy for AllAssignStrategy {
    fn infer(&self, field: &FieldRef<'_>, ctx: &InferContext<'_>) -> TypeSet {
        let Some(class) = field.class else {
            return TypeSet::new();
        };

        let evidence = infer_in_class_like(field.name(), class, ctx);
        evidence_to_type_set(evidence, field.property.default.as_ref())
    }

    fn priority(&self) -> i32 {
        500
    }

    fn name(&self) -> &'static str {
        "all_assign"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::adapters::HeuristicTypeOracle;
    use crate::inference::context::InferenceOptions;
    use docsync_api::models::{ClassLike, ClassMethod, Expr, Property, Stmt};

    fn infer(class: &ClassLike, property: &str) -> TypeSet {
        let oracle = HeuristicTypeOracle::new();
        let options = InferenceOptions::default();
        let ctx = InferContext::new(&oracle, &options);
        let property = class.get_property(property).unwrap();
        AllAssignStrategy.infer(&FieldRef::new(property, class), &ctx)
    }

    #[test]
    fn test_bare_declaration_adds_null() {
        let class = ClassLike::new("App\\A")
            .with_property(Property::new("name"))
            .with_method(
                ClassMethod::new("rename").with_stmt(Stmt::assign_this("name", Expr::string("x"))),
            );
        assert_eq!(infer(&class, "name").names(), vec!["string", "null"]);
    }

    #[test]
    fn test_non_null_default_keeps_evidence_only() {
        let class = ClassLike::new("App\\A")
            .with_property(Property::new("count").with_default(Expr::int(0)))
            .with_method(
                ClassMethod::new("bump").with_stmt(Stmt::assign_this("count", Expr::int(2))),
            );
        assert_eq!(infer(&class, "count").names(), vec!["int"]);
    }

    #[test]
    fn test_specific_array_narrows_mixed_array() {
        let class = ClassLike::new("App\\Bag")
            .with_property(Property::new("items").with_default(Expr::array(vec![])))
            .with_method(
                ClassMethod::new("__construct")
                    .with_stmt(Stmt::assign_this("items", Expr::array(vec![]))),
            )
            .with_method(ClassMethod::new("add").with_stmt(Stmt::Expr(Expr::assign(
                Expr::append(Expr::this_prop("items")),
                Expr::new_object("App\\Item"),
            ))));
        assert_eq!(infer(&class, "items").names(), vec!["\\App\\Item[]"]);
    }

    #[test]
    fn test_no_evidence_is_empty() {
        let class = ClassLike::new("App\\A").with_property(Property::new("unused"));
        assert!(infer(&class, "unused").is_empty());
    }
}
