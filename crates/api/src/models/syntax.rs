//! Already-parsed, name-resolved source model.
//!
//! The surrounding framework builds these trees; the engine only reads them
//! and rewrites doc comments through [`Commented`]. Class names stored in
//! expressions and type hints are already resolved to fully qualified form.

use super::naming::NameScope;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `$name`; `$this` is `Variable("this")`.
    Variable(String),
    /// `$var->name`
    PropertyFetch { var: Box<Expr>, name: String },
    /// `Class::$name`
    StaticPropertyFetch { class: String, name: String },
    /// `$var[dim]`, or `$var[]` when `dim` is `None`
    ArrayDimFetch {
        var: Box<Expr>,
        dim: Option<Box<Expr>>,
    },
    Assign { var: Box<Expr>, expr: Box<Expr> },
    /// `null`, `true`, `false`, or a named constant.
    ConstFetch(String),
    Scalar(Scalar),
    Array(Vec<Expr>),
    New { class: String, args: Vec<Expr> },
    MethodCall {
        var: Box<Expr>,
        name: String,
        args: Vec<Expr>,
    },
    StaticCall {
        class: String,
        name: String,
        args: Vec<Expr>,
    },
    FuncCall { name: String, args: Vec<Expr> },
    Closure { params: Vec<Param>, body: Vec<Stmt> },
    Ternary {
        cond: Box<Expr>,
        then: Option<Box<Expr>>,
        otherwise: Box<Expr>,
    },
    /// Anything the engine has no use for.
    Unknown,
}

impl Expr {
    pub fn var(name: &str) -> Self {
        Expr::Variable(name.trim_start_matches('$').to_string())
    }

    pub fn this() -> Self {
        Expr::var("this")
    }

    /// `$this->name`
    pub fn this_prop(name: &str) -> Self {
        Expr::PropertyFetch {
            var: Box::new(Expr::this()),
            name: name.to_string(),
        }
    }

    /// `Class::$name`
    pub fn static_prop(class: &str, name: &str) -> Self {
        Expr::StaticPropertyFetch {
            class: class.to_string(),
            name: name.trim_start_matches('$').to_string(),
        }
    }

    /// `$var[]`
    pub fn append(var: Expr) -> Self {
        Expr::ArrayDimFetch {
            var: Box::new(var),
            dim: None,
        }
    }

    pub fn assign(var: Expr, expr: Expr) -> Self {
        Expr::Assign {
            var: Box::new(var),
            expr: Box::new(expr),
        }
    }

    pub fn null() -> Self {
        Expr::ConstFetch("null".to_string())
    }

    pub fn bool(value: bool) -> Self {
        Expr::ConstFetch(if value { "true" } else { "false" }.to_string())
    }

    pub fn int(value: i64) -> Self {
        Expr::Scalar(Scalar::Int(value))
    }

    pub fn float(value: f64) -> Self {
        Expr::Scalar(Scalar::Float(value))
    }

    pub fn string(value: &str) -> Self {
        Expr::Scalar(Scalar::String(value.to_string()))
    }

    pub fn array(items: Vec<Expr>) -> Self {
        Expr::Array(items)
    }

    pub fn new_object(class: &str) -> Self {
        Expr::New {
            class: class.trim_start_matches('\\').to_string(),
            args: vec![],
        }
    }

    /// Whether this is the `null` constant (case-insensitive).
    pub fn is_null_const(&self) -> bool {
        match self {
            Expr::ConstFetch(name) => name.trim_start_matches('\\').eq_ignore_ascii_case("null"),
            _ => false,
        }
    }

    /// Name of a bare variable read.
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Expr::Variable(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    Return(Option<Expr>),
    If {
        cond: Expr,
        then: Vec<Stmt>,
        otherwise: Vec<Stmt>,
    },
    Foreach {
        expr: Expr,
        value: String,
        body: Vec<Stmt>,
    },
    Block(Vec<Stmt>),
}

impl Stmt {
    /// `$this->property = <expr>;`
    pub fn assign_this(property: &str, expr: Expr) -> Self {
        Stmt::Expr(Expr::assign(Expr::this_prop(property), expr))
    }
}

/// A declared type as written on a parameter or property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeHint {
    /// Reserved type keyword: `int`, `string`, `array`, ...
    Identifier(String),
    /// Class-like name; `written` is the spelling in source, `resolved` the
    /// fully qualified name (no leading `\`).
    Name { resolved: String, written: String },
    /// `?T`
    Nullable(Box<TypeHint>),
    /// `A|B`
    Union(Vec<TypeHint>),
}

impl TypeHint {
    pub fn ident(name: &str) -> Self {
        TypeHint::Identifier(name.to_string())
    }

    /// A class name written by its short name.
    pub fn class(resolved: &str) -> Self {
        let resolved = resolved.trim_start_matches('\\');
        TypeHint::Name {
            resolved: resolved.to_string(),
            written: super::naming::short_name(resolved).to_string(),
        }
    }

    /// A class name written through an import alias.
    pub fn aliased(resolved: &str, written: &str) -> Self {
        TypeHint::Name {
            resolved: resolved.trim_start_matches('\\').to_string(),
            written: written.to_string(),
        }
    }

    pub fn nullable(inner: TypeHint) -> Self {
        TypeHint::Nullable(Box::new(inner))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Without the `$`.
    pub name: String,
    pub type_hint: Option<TypeHint>,
    pub default: Option<Expr>,
    pub variadic: bool,
}

impl Param {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim_start_matches('$').to_string(),
            type_hint: None,
            default: None,
            variadic: false,
        }
    }

    pub fn typed(name: &str, type_hint: TypeHint) -> Self {
        Self::new(name).with_type(type_hint)
    }

    pub fn with_type(mut self, type_hint: TypeHint) -> Self {
        self.type_hint = Some(type_hint);
        self
    }

    pub fn with_default(mut self, default: Expr) -> Self {
        self.default = Some(default);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Without the `$`.
    pub name: String,
    pub type_hint: Option<TypeHint>,
    pub default: Option<Expr>,
    pub is_static: bool,
    pub doc_comment: Option<String>,
    pub name_scope: Option<Arc<NameScope>>,
}

impl Property {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim_start_matches('$').to_string(),
            type_hint: None,
            default: None,
            is_static: false,
            doc_comment: None,
            name_scope: None,
        }
    }

    pub fn with_default(mut self, default: Expr) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_doc(mut self, doc: &str) -> Self {
        self.doc_comment = Some(doc.to_string());
        self
    }

    pub fn with_type(mut self, type_hint: TypeHint) -> Self {
        self.type_hint = Some(type_hint);
        self
    }

    pub fn with_scope(mut self, scope: Arc<NameScope>) -> Self {
        self.name_scope = Some(scope);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMethod {
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    pub doc_comment: Option<String>,
    pub name_scope: Option<Arc<NameScope>>,
}

impl ClassMethod {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            params: vec![],
            body: vec![],
            doc_comment: None,
            name_scope: None,
        }
    }

    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_stmt(mut self, stmt: Stmt) -> Self {
        self.body.push(stmt);
        self
    }

    pub fn with_doc(mut self, doc: &str) -> Self {
        self.doc_comment = Some(doc.to_string());
        self
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Trait,
    Interface,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Property(Property),
    Method(ClassMethod),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassLike {
    /// Fully qualified name; `None` for anonymous classes.
    pub name: Option<String>,
    pub kind: ClassKind,
    pub members: Vec<ClassMember>,
    pub doc_comment: Option<String>,
    pub name_scope: Option<Arc<NameScope>>,
}

impl ClassLike {
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.trim_start_matches('\\').to_string()),
            kind: ClassKind::Class,
            members: vec![],
            doc_comment: None,
            name_scope: None,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            name: None,
            kind: ClassKind::Class,
            members: vec![],
            doc_comment: None,
            name_scope: None,
        }
    }

    pub fn with_kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.members.push(ClassMember::Property(property));
        self
    }

    pub fn with_method(mut self, method: ClassMethod) -> Self {
        self.members.push(ClassMember::Method(method));
        self
    }

    /// Attach `scope` to the class and every member that has none yet.
    pub fn with_scope(mut self, scope: NameScope) -> Self {
        let scope = Arc::new(scope);
        for member in &mut self.members {
            match member {
                ClassMember::Property(p) if p.name_scope.is_none() => {
                    p.name_scope = Some(scope.clone())
                }
                ClassMember::Method(m) if m.name_scope.is_none() => {
                    m.name_scope = Some(scope.clone())
                }
                _ => {}
            }
        }
        self.name_scope = Some(scope);
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_none()
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.members.iter().filter_map(|m| match m {
            ClassMember::Property(p) => Some(p),
            _ => None,
        })
    }

    pub fn properties_mut(&mut self) -> impl Iterator<Item = &mut Property> {
        self.members.iter_mut().filter_map(|m| match m {
            ClassMember::Property(p) => Some(p),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &ClassMethod> {
        self.members.iter().filter_map(|m| match m {
            ClassMember::Method(m) => Some(m),
            _ => None,
        })
    }

    /// Method names are case-insensitive.
    pub fn get_method(&self, name: &str) -> Option<&ClassMethod> {
        self.methods().find(|m| m.name.eq_ignore_ascii_case(name))
    }

    pub fn get_property(&self, name: &str) -> Option<&Property> {
        self.properties().find(|p| p.name == name)
    }

    pub fn get_property_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.properties_mut().find(|p| p.name == name)
    }
}

/// A declaration that can carry a doc comment.
pub trait Commented {
    fn doc_comment(&self) -> Option<&str>;

    /// `None` removes the comment.
    fn set_doc_comment(&mut self, comment: Option<String>);

    fn name_scope(&self) -> Option<Arc<NameScope>>;

    /// Human readable identification, used in error messages and logs.
    fn node_label(&self) -> String;
}

impl Commented for Property {
    fn doc_comment(&self) -> Option<&str> {
        self.doc_comment.as_deref()
    }

    fn set_doc_comment(&mut self, comment: Option<String>) {
        self.doc_comment = comment;
    }

    fn name_scope(&self) -> Option<Arc<NameScope>> {
        self.name_scope.clone()
    }

    fn node_label(&self) -> String {
        format!("Property ${}", self.name)
    }
}

impl Commented for ClassMethod {
    fn doc_comment(&self) -> Option<&str> {
        self.doc_comment.as_deref()
    }

    fn set_doc_comment(&mut self, comment: Option<String>) {
        self.doc_comment = comment;
    }

    fn name_scope(&self) -> Option<Arc<NameScope>> {
        self.name_scope.clone()
    }

    fn node_label(&self) -> String {
        format!("ClassMethod {}()", self.name)
    }
}

impl Commented for ClassLike {
    fn doc_comment(&self) -> Option<&str> {
        self.doc_comment.as_deref()
    }

    fn set_doc_comment(&mut self, comment: Option<String>) {
        self.doc_comment = comment;
    }

    fn name_scope(&self) -> Option<Arc<NameScope>> {
        self.name_scope.clone()
    }

    fn node_label(&self) -> String {
        match &self.name {
            Some(name) => format!("Class {}", name),
            None => "anonymous class".to_string(),
        }
    }
}
