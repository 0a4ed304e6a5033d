//! Static types of the values assigned to a property.

use super::walker::{PropertyAssign, find_property_assigns};
use crate::inference::context::InferContext;
use docsync_api::models::{ClassLike, ClassMember, ClassMethod, StaticType};
use docsync_api::oracle::ExprScope;
use indexmap::IndexMap;

/// Evidence over every method of `class`.
pub fn infer_in_class_like(
    property_name: &str,
    class: &ClassLike,
    ctx: &InferContext<'_>,
) -> Vec<StaticType> {
    let mut collector = EvidenceCollector::default();
    for member in &class.members {
        if let ClassMember::Method(method) = member {
            collector.collect(property_name, Some(class), method, ctx);
        }
    }
    collector.finish()
}

/// Evidence restricted to one method.
pub fn infer_in_method(
    property_name: &str,
    class: Option<&ClassLike>,
    method: &ClassMethod,
    ctx: &InferContext<'_>,
) -> Vec<StaticType> {
    let mut collector = EvidenceCollector::default();
    collector.collect(property_name, class, method, ctx);
    collector.finish()
}

/// First occurrence per fingerprint wins.
#[derive(Default)]
struct EvidenceCollector {
    seen: IndexMap<u64, StaticType>,
}

impl EvidenceCollector {
    fn collect(
        &mut self,
        property_name: &str,
        class: Option<&ClassLike>,
        method: &ClassMethod,
        ctx: &InferContext<'_>,
    ) {
        let scope = ExprScope::in_method(class, method);
        for assign in find_property_assigns(&method.body, property_name) {
            if let Some(ty) = resolve_assigned_type(&assign, &scope, ctx) {
                self.seen.entry(ty.fingerprint()).or_insert(ty);
            }
        }
    }

    fn finish(self) -> Vec<StaticType> {
        self.seen.into_values().collect()
    }
}

fn resolve_assigned_type(
    assign: &PropertyAssign<'_>,
    scope: &ExprScope<'_>,
    ctx: &InferContext<'_>,
) -> Option<StaticType> {
    let ty = ctx.oracle.evaluate(assign.expr, scope)?;
    if ty.is_error() {
        return None;
    }
    if assign.is_subscript {
        return Some(StaticType::array_of(ty));
    }
    Some(ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::adapters::HeuristicTypeOracle;
    use crate::inference::context::InferenceOptions;
    use docsync_api::models::{Expr, Property, Stmt};

    fn class() -> ClassLike {
        ClassLike::new("App\\Bag")
            .with_property(Property::new("items"))
            .with_method(
                ClassMethod::new("__construct")
                    .with_stmt(Stmt::assign_this("items", Expr::array(vec![]))),
            )
            .with_method(
                ClassMethod::new("add")
                    .with_stmt(Stmt::Expr(Expr::assign(
                        Expr::append(Expr::this_prop("items")),
                        Expr::new_object("App\\Item"),
                    )))
                    .with_stmt(Stmt::assign_this("items", Expr::array(vec![]))),
            )
            .with_method(
                ClassMethod::new("broken").with_stmt(Stmt::assign_this("items", Expr::Unknown)),
            )
    }

    #[test]
    fn test_class_evidence_deduplicates_in_scan_order() {
        let oracle = HeuristicTypeOracle::new();
        let options = InferenceOptions::default();
        let ctx = InferContext::new(&oracle, &options);

        let found = infer_in_class_like("items", &class(), &ctx);
        assert_eq!(
            found,
            vec![
                StaticType::mixed_array(),
                StaticType::array_of(StaticType::named("App\\Item")),
            ]
        );
    }

    #[test]
    fn test_method_evidence_is_restricted() {
        let oracle = HeuristicTypeOracle::new();
        let options = InferenceOptions::default();
        let ctx = InferContext::new(&oracle, &options);
        let class = class();
        let ctor = class.get_method("__construct").unwrap();

        let found = infer_in_method("items", Some(&class), ctor, &ctx);
        assert_eq!(found, vec![StaticType::mixed_array()]);
    }
}
