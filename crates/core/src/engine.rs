//! Engine facade: one entry point over inference and docblock rewriting.

use crate::config::EngineConfig;
use crate::logging;
use docsync_api::Result;
use docsync_api::models::{ClassLike, ClassMember, Property};
use docsync_api::oracle::{ClassRegistry, SubtypeOracle, TypeOracle, UseImportCommander};
use docsync_php::inference::adapters::{ClassHierarchy, HeuristicTypeOracle};
use docsync_php::{
    DocBlockManipulator, FieldRef, FixVarDocTypePropertyRule, InferContext, PropertyTypeInferer,
    TypeSet,
};
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;

/// Outcome of [`DocsyncEngine::process_class`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassReport {
    pub fixed_properties: usize,
    /// Fully qualified names a `use` import was requested for.
    pub imported_names: Vec<String>,
}

pub struct DocsyncEngine {
    config: EngineConfig,
    oracle: Arc<dyn TypeOracle>,
    subtypes: Arc<dyn SubtypeOracle>,
    classes: Arc<dyn ClassRegistry>,
    inferer: PropertyTypeInferer,
}

pub struct DocsyncEngineBuilder {
    config: EngineConfig,
    oracle: Option<Arc<dyn TypeOracle>>,
    subtypes: Option<Arc<dyn SubtypeOracle>>,
    classes: Option<Arc<dyn ClassRegistry>>,
}

impl DocsyncEngineBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            oracle: None,
            subtypes: None,
            classes: None,
        }
    }

    pub fn with_type_oracle(mut self, oracle: Arc<dyn TypeOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Subtype checks and class lookups from the same source.
    pub fn with_class_hierarchy<H>(mut self, hierarchy: Arc<H>) -> Self
    where
        H: SubtypeOracle + ClassRegistry + 'static,
    {
        self.subtypes = Some(hierarchy.clone());
        self.classes = Some(hierarchy);
        self
    }

    /// Fails on an invalid configuration.
    pub fn build(self) -> Result<DocsyncEngine> {
        self.config.validate()?;

        let inferer = PropertyTypeInferer::with_defaults(&self.config.inference);
        tracing::info!("Docsync engine ready, strategies: {:?}", inferer.strategy_names());

        let hierarchy = Arc::new(ClassHierarchy::new());
        Ok(DocsyncEngine {
            oracle: self
                .oracle
                .unwrap_or_else(|| Arc::new(HeuristicTypeOracle::new())),
            subtypes: self.subtypes.unwrap_or_else(|| hierarchy.clone()),
            classes: self.classes.unwrap_or(hierarchy),
            inferer,
            config: self.config,
        })
    }
}

impl DocsyncEngine {
    pub fn builder(config: EngineConfig) -> DocsyncEngineBuilder {
        DocsyncEngineBuilder::new(config)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Install logging as configured. Hold the guard for the lifetime of the
    /// host process.
    pub fn init_logging(&self) -> WorkerGuard {
        let guard = match &self.config.log_dir {
            Some(dir) => logging::init_logging_in(
                dir,
                &self.config.log_component,
                self.config.log_to_stderr,
            ),
            None => logging::init_logging(&self.config.log_component, self.config.log_to_stderr),
        };
        tracing::info!("Logging initialized for {}", self.config.log_component);
        guard
    }

    /// A manipulator with an empty import buffer.
    pub fn manipulator(&self) -> DocBlockManipulator<'_> {
        DocBlockManipulator::new(self.subtypes.as_ref(), self.classes.as_ref())
    }

    fn context(&self) -> InferContext<'_> {
        InferContext::new(self.oracle.as_ref(), &self.config.inference)
    }

    pub fn infer_property(&self, property: &Property, class: &ClassLike) -> Result<TypeSet> {
        self.inferer
            .infer_property(&FieldRef::new(property, class), &self.context())
    }

    /// Fix `@var` tags of every property; returns how many changed.
    pub fn fix_var_docs(&self, class: &mut ClassLike) -> Result<usize> {
        FixVarDocTypePropertyRule::new(&self.inferer, self.context(), self.manipulator())
            .refactor(class)
    }

    /// Shorten namespaced names in every doc comment of `class`.
    ///
    /// Uses a fresh import buffer, so the result lists this class only.
    pub fn import_doc_names(
        &self,
        class: &mut ClassLike,
        commander: &mut dyn UseImportCommander,
    ) -> Vec<String> {
        let mut manipulator = self.manipulator();
        manipulator.import_names(class, commander);
        for member in &mut class.members {
            match member {
                ClassMember::Property(property) => {
                    manipulator.import_names(property, commander);
                }
                ClassMember::Method(method) => {
                    manipulator.import_names(method, commander);
                }
            }
        }
        manipulator.imported_names().to_vec()
    }

    /// Fix `@var` tags, then shorten names when `import_names` is enabled.
    pub fn process_class(
        &self,
        class: &mut ClassLike,
        commander: &mut dyn UseImportCommander,
    ) -> Result<ClassReport> {
        let fixed_properties = self.fix_var_docs(class)?;
        let imported_names = if self.config.import_names {
            self.import_doc_names(class, commander)
        } else {
            Vec::new()
        };

        Ok(ClassReport {
            fixed_properties,
            imported_names,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsync_api::models::{ClassMethod, Expr, Stmt};

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.inference.strategies.clear();
        assert!(DocsyncEngine::builder(config).build().is_err());
    }

    #[test]
    fn test_default_collaborators_infer_literals() {
        let engine = DocsyncEngine::builder(EngineConfig::default()).build().unwrap();
        let class = ClassLike::new("App\\Counter")
            .with_property(Property::new("count").with_default(Expr::int(0)))
            .with_method(
                ClassMethod::new("bump").with_stmt(Stmt::assign_this("count", Expr::int(1))),
            );

        let types = engine
            .infer_property(class.get_property("count").unwrap(), &class)
            .unwrap();
        assert_eq!(types.names(), vec!["int"]);
    }
}
