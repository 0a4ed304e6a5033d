use crate::inference::context::{FieldRef, InferContext, InferenceOptions, StrategyKind};
use crate::inference::core::type_set::TypeSet;
use crate::inference::strategy::{AllAssignStrategy, ConstructorParamStrategy, PropertyTypeStrategy};
use docsync_api::{DocsyncError, Result};

/// Runs property type strategies by descending priority.
///
/// The strategy list is sorted once at construction and never changes.
pub struct PropertyTypeInferer {
    strategies: Vec<Box<dyn PropertyTypeStrategy>>,
}

impl PropertyTypeInferer {
    pub fn new(mut strategies: Vec<Box<dyn PropertyTypeStrategy>>) -> Self {
        // stable: equal priorities keep registration order
        strategies.sort_by_key(|strategy| std::cmp::Reverse(strategy.priority()));
        Self { strategies }
    }

    /// The built-in strategies enabled in `options`.
    pub fn with_defaults(options: &InferenceOptions) -> Self {
        let strategies = options
            .strategies
            .iter()
            .map(|kind| -> Box<dyn PropertyTypeStrategy> {
                match kind {
                    StrategyKind::ConstructorParam => Box::new(ConstructorParamStrategy),
                    StrategyKind::AllAssign => Box::new(AllAssignStrategy),
                }
            })
            .collect();
        Self::new(strategies)
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// First non-empty answer; empty when no strategy found anything.
    pub fn infer_property(&self, field: &FieldRef<'_>, ctx: &InferContext<'_>) -> Result<TypeSet> {
        if field.class.is_none() {
            return Err(DocsyncError::contract(
                "FieldRef::class",
                format!("property ${} has no owning class attached", field.name()),
            ));
        }

        for strategy in &self.strategies {
            let types = strategy.infer(field, ctx);
            if !types.is_empty() {
                tracing::debug!(
                    "Property ${} inferred by {}: {}",
                    field.name(),
                    strategy.name(),
                    types
                );
                return Ok(types);
            }
        }

        tracing::trace!("No strategy resolved property ${}", field.name());
        Ok(TypeSet::new())
    }
}
