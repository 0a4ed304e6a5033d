use crate::docblock::DocBlockManipulator;
use crate::inference::{FieldRef, InferContext, PropertyTypeInferer, TypeSet};
use docsync_api::Result;
use docsync_api::models::ClassLike;

/// Fixes `@var` annotations of properties from the types found in code.
///
/// ```text
/// /** @var string */                  /** @var string|null */
/// private $name;               →      private $name;
///
/// public function __construct(?string $name) { $this->name = $name; }
/// ```
pub struct FixVarDocTypePropertyRule<'a> {
    inferer: &'a PropertyTypeInferer,
    ctx: InferContext<'a>,
    manipulator: DocBlockManipulator<'a>,
}

impl<'a> FixVarDocTypePropertyRule<'a> {
    pub fn new(
        inferer: &'a PropertyTypeInferer,
        ctx: InferContext<'a>,
        manipulator: DocBlockManipulator<'a>,
    ) -> Self {
        Self {
            inferer,
            ctx,
            manipulator,
        }
    }

    pub fn manipulator(&self) -> &DocBlockManipulator<'a> {
        &self.manipulator
    }

    pub fn manipulator_mut(&mut self) -> &mut DocBlockManipulator<'a> {
        &mut self.manipulator
    }

    /// Number of properties whose doc comment changed.
    pub fn refactor(&self, class: &mut ClassLike) -> Result<usize> {
        // hard to resolve correctly
        if class.is_anonymous() {
            tracing::debug!("Skipping anonymous class");
            return Ok(0);
        }

        let inferred = self.infer_all(class)?;

        let mut changed = 0;
        for property in class.properties_mut() {
            let Some(types) = inferred.get(&property.name) else {
                continue;
            };
            if self.manipulator.change_var_tag(property, types) {
                changed += 1;
            }
        }

        if changed > 0 {
            tracing::info!("Fixed @var of {} properties in {}", changed, class_label(class));
        }
        Ok(changed)
    }

    fn infer_all(&self, class: &ClassLike) -> Result<indexmap::IndexMap<String, TypeSet>> {
        let mut inferred = indexmap::IndexMap::new();
        for property in class.properties() {
            let types = self
                .inferer
                .infer_property(&FieldRef::new(property, class), &self.ctx)?;
            if !types.is_empty() {
                inferred.insert(property.name.clone(), types);
            }
        }
        Ok(inferred)
    }
}

fn class_label(class: &ClassLike) -> &str {
    class.name.as_deref().unwrap_or("anonymous class")
}
