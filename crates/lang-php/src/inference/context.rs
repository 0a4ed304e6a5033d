//! Context for property type inference.
//!
//! Holds the collaborators and options passed through the strategy chain.

use docsync_api::models::{ClassLike, Property};
use docsync_api::oracle::TypeOracle;
use serde::{Deserialize, Serialize};

/// Built-in strategies, selectable from configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Typed parameters of instantiating methods bound to the property.
    ConstructorParam,
    /// Every assignment to the property across the class body.
    AllAssign,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct InferenceOptions {
    /// Enabled strategies; order is irrelevant, priorities decide.
    pub strategies: Vec<StrategyKind>,
    /// Method names treated as instantiating (case-insensitive).
    pub instantiating_methods: Vec<String>,
    /// Docblock tags that mark any method as instantiating.
    pub instantiation_markers: Vec<String>,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            strategies: vec![StrategyKind::ConstructorParam, StrategyKind::AllAssign],
            instantiating_methods: vec!["__construct".to_string(), "setUp".to_string()],
            instantiation_markers: vec!["required".to_string()],
        }
    }
}

impl InferenceOptions {
    pub fn is_instantiating_name(&self, method_name: &str) -> bool {
        self.instantiating_methods
            .iter()
            .any(|name| name.eq_ignore_ascii_case(method_name))
    }
}

/// The property being inferred together with its owning class.
#[derive(Debug, Clone, Copy)]
pub struct FieldRef<'a> {
    pub property: &'a Property,
    /// `None` when the framework could not attach the owning class.
    pub class: Option<&'a ClassLike>,
}

impl<'a> FieldRef<'a> {
    pub fn new(property: &'a Property, class: &'a ClassLike) -> Self {
        Self {
            property,
            class: Some(class),
        }
    }

    pub fn detached(property: &'a Property) -> Self {
        Self {
            property,
            class: None,
        }
    }

    pub fn name(&self) -> &'a str {
        &self.property.name
    }
}

/// Context for property type inference.
///
/// Immutable; strategies only read through it.
#[derive(Clone, Copy)]
pub struct InferContext<'a> {
    /// Expression type evaluation
    pub oracle: &'a dyn TypeOracle,
    pub options: &'a InferenceOptions,
}

impl<'a> InferContext<'a> {
    pub fn new(oracle: &'a dyn TypeOracle, options: &'a InferenceOptions) -> Self {
        Self { oracle, options }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = InferenceOptions::default();
        assert!(options.is_instantiating_name("__CONSTRUCT"));
        assert!(options.is_instantiating_name("setup"));
        assert!(!options.is_instantiating_name("init"));
        assert_eq!(options.instantiation_markers, vec!["required"]);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: InferenceOptions =
            serde_json::from_str(r#"{"strategies":["all_assign"]}"#).unwrap();
        assert_eq!(options.strategies, vec![StrategyKind::AllAssign]);
        assert_eq!(options.instantiating_methods.len(), 2);
    }
}
