//! Shared fixtures for docsync-php integration tests.

use docsync_api::StaticType;
use docsync_api::models::{ClassLike, ClassMethod, Expr, NameScope, Param, Property, Stmt, TypeHint};
use docsync_api::oracle::{ClassRegistry, ExprScope, SubtypeOracle, TypeOracle};
use std::collections::{HashMap, HashSet};

/// A mock type oracle for testing.
///
/// Answers only what it was told; everything else is unknown.
#[derive(Default)]
pub struct MockTypeOracle {
    variables: HashMap<String, StaticType>,
    method_calls: HashMap<String, StaticType>,
    evaluate_new: bool,
}

#[allow(dead_code)]
impl MockTypeOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type of `$name` in any scope.
    pub fn with_var_type(mut self, name: &str, ty: StaticType) -> Self {
        self.variables.insert(name.trim_start_matches('$').to_string(), ty);
        self
    }

    /// Return type of `$x->name()` on any receiver.
    pub fn with_method_call_type(mut self, name: &str, ty: StaticType) -> Self {
        self.method_calls.insert(name.to_lowercase(), ty);
        self
    }

    /// Evaluate `new Foo` as `Foo`.
    pub fn with_new_objects(mut self) -> Self {
        self.evaluate_new = true;
        self
    }
}

impl TypeOracle for MockTypeOracle {
    fn evaluate(&self, expr: &Expr, _scope: &ExprScope<'_>) -> Option<StaticType> {
        match expr {
            Expr::Variable(name) => self.variables.get(name).cloned(),
            Expr::MethodCall { name, .. } => self.method_calls.get(&name.to_lowercase()).cloned(),
            Expr::New { class, .. } if self.evaluate_new => Some(StaticType::named(class)),
            Expr::ConstFetch(_) if expr.is_null_const() => Some(StaticType::null()),
            _ => None,
        }
    }
}

/// Class existence and subtype answers from a fixed parent table.
#[allow(dead_code)]
#[derive(Default)]
pub struct MockClasses {
    parents: HashMap<String, Vec<String>>,
    known: HashSet<String>,
}

#[allow(dead_code)]
impl MockClasses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(mut self, fqn: &str, parent: Option<&str>) -> Self {
        let fqn = normalize(fqn);
        self.known.insert(fqn.clone());
        if let Some(parent) = parent {
            self.known.insert(normalize(parent));
            self.parents.entry(fqn).or_default().push(normalize(parent));
        }
        self
    }
}

fn normalize(name: &str) -> String {
    name.trim_start_matches('\\').to_lowercase()
}

impl SubtypeOracle for MockClasses {
    fn is_subtype_of(&self, name: &str, ancestor: &str) -> bool {
        let ancestor = normalize(ancestor);
        let mut pending = vec![normalize(name)];
        while let Some(current) = pending.pop() {
            if current == ancestor {
                return true;
            }
            if let Some(parents) = self.parents.get(&current) {
                pending.extend(parents.iter().cloned());
            }
        }
        false
    }
}

impl ClassRegistry for MockClasses {
    fn class_exists(&self, fqn: &str) -> bool {
        self.known.contains(&normalize(fqn))
    }
}

/// `__construct` with typed parameters, each assigned to the same-named property.
#[allow(dead_code)]
pub fn constructor_assigning(params: Vec<(&str, TypeHint)>) -> ClassMethod {
    params
        .into_iter()
        .fold(ClassMethod::new("__construct"), |method, (name, hint)| {
            method
                .with_param(Param::typed(name, hint))
                .with_stmt(Stmt::assign_this(name, Expr::var(name)))
        })
}

/// A class in namespace `App` with one documented property.
#[allow(dead_code)]
pub fn class_with_property(property: &str, doc: &str, scope: NameScope) -> ClassLike {
    ClassLike::new("App\\Subject")
        .with_property(Property::new(property).with_doc(doc))
        .with_scope(scope)
}
