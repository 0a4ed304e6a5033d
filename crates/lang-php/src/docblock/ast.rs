//! Docblock tag tree.

use std::fmt;

/// Names resolved against the declaration's name scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeAttributes {
    /// Fully qualified name without leading `\`; `None` for reserved names.
    pub resolved_name: Option<String>,
    pub resolved_names: Vec<String>,
}

/// A bare type name as written, e.g. `int`, `Foo`, `\App\Foo`, `$this`.
///
/// Equality looks at the written name only; attributes are derived data.
#[derive(Debug, Clone, Eq)]
pub struct IdentifierTypeNode {
    pub name: String,
    pub attributes: TypeAttributes,
}

impl PartialEq for IdentifierTypeNode {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl IdentifierTypeNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: TypeAttributes::default(),
        }
    }

    /// `resolved_name`, else the first of `resolved_names`, else the written name.
    pub fn effective_name(&self) -> &str {
        self.attributes
            .resolved_name
            .as_deref()
            .or_else(|| self.attributes.resolved_names.first().map(String::as_str))
            .unwrap_or(self.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    Identifier(IdentifierTypeNode),
    /// `?T`
    Nullable(Box<TypeNode>),
    /// `T[]`
    Array(Box<TypeNode>),
    Union(Vec<TypeNode>),
    Intersection(Vec<TypeNode>),
    /// `Base<A, B>`
    Generic {
        base: IdentifierTypeNode,
        args: Vec<TypeNode>,
    },
}

impl TypeNode {
    pub fn identifier(name: impl Into<String>) -> Self {
        TypeNode::Identifier(IdentifierTypeNode::new(name))
    }

    pub fn for_each_identifier<F: FnMut(&IdentifierTypeNode)>(&self, f: &mut F) {
        match self {
            TypeNode::Identifier(ident) => f(ident),
            TypeNode::Nullable(inner) | TypeNode::Array(inner) => inner.for_each_identifier(f),
            TypeNode::Union(members) | TypeNode::Intersection(members) => {
                for member in members {
                    member.for_each_identifier(f);
                }
            }
            TypeNode::Generic { base, args } => {
                f(base);
                for arg in args {
                    arg.for_each_identifier(f);
                }
            }
        }
    }

    pub fn for_each_identifier_mut<F: FnMut(&mut IdentifierTypeNode)>(&mut self, f: &mut F) {
        match self {
            TypeNode::Identifier(ident) => f(ident),
            TypeNode::Nullable(inner) | TypeNode::Array(inner) => inner.for_each_identifier_mut(f),
            TypeNode::Union(members) | TypeNode::Intersection(members) => {
                for member in members {
                    member.for_each_identifier_mut(f);
                }
            }
            TypeNode::Generic { base, args } => {
                f(base);
                for arg in args {
                    arg.for_each_identifier_mut(f);
                }
            }
        }
    }

    /// Top-level alternatives: union members, with `?T` read as `T|null`.
    pub fn alternatives(&self) -> Vec<TypeNode> {
        match self {
            TypeNode::Union(members) => members.iter().flat_map(TypeNode::alternatives).collect(),
            TypeNode::Nullable(inner) => {
                let mut alternatives = inner.alternatives();
                alternatives.push(TypeNode::identifier("null"));
                alternatives
            }
            other => vec![other.clone()],
        }
    }

    /// Render with every identifier replaced by `name_of(identifier)`.
    pub fn render_with<F: Fn(&IdentifierTypeNode) -> String>(&self, name_of: &F) -> String {
        match self {
            TypeNode::Identifier(ident) => name_of(ident),
            TypeNode::Nullable(inner) => format!("?{}", inner.render_with(name_of)),
            TypeNode::Array(inner) => match inner.as_ref() {
                TypeNode::Union(_) | TypeNode::Intersection(_) | TypeNode::Nullable(_) => {
                    format!("({})[]", inner.render_with(name_of))
                }
                _ => format!("{}[]", inner.render_with(name_of)),
            },
            TypeNode::Union(members) => join_members(members, "|", name_of),
            TypeNode::Intersection(members) => join_members(members, "&", name_of),
            TypeNode::Generic { base, args } => {
                let args: Vec<String> = args.iter().map(|arg| arg.render_with(name_of)).collect();
                format!("{}<{}>", name_of(base), args.join(", "))
            }
        }
    }

    /// Rendered with resolved names, without leading `\`.
    pub fn render_resolved(&self) -> String {
        self.render_with(&|ident: &IdentifierTypeNode| {
            ident.effective_name().trim_start_matches('\\').to_string()
        })
    }
}

fn join_members<F: Fn(&IdentifierTypeNode) -> String>(
    members: &[TypeNode],
    separator: &str,
    name_of: &F,
) -> String {
    members
        .iter()
        .map(|member| match member {
            TypeNode::Union(_) | TypeNode::Intersection(_) => {
                format!("({})", member.render_with(name_of))
            }
            _ => member.render_with(name_of),
        })
        .collect::<Vec<_>>()
        .join(separator)
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(&|ident: &IdentifierTypeNode| ident.name.clone()))
    }
}

/// `type [variable] [description]` of `@var`, `@param`, `@return`, `@throws`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedTagValue {
    pub type_node: TypeNode,
    /// With the `$`, e.g. `$name`.
    pub variable: Option<String>,
    pub description: String,
}

impl TypedTagValue {
    pub fn new(type_node: TypeNode) -> Self {
        Self {
            type_node,
            variable: None,
            description: String::new(),
        }
    }
}

impl fmt::Display for TypedTagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_node)?;
        if let Some(variable) = &self.variable {
            write!(f, " {}", variable)?;
        }
        if !self.description.is_empty() {
            write!(f, " {}", self.description)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhpDocTagValue {
    Typed(TypedTagValue),
    /// Any other tag: the raw text after the name.
    Generic(String),
    /// A type-bearing tag whose type could not be parsed; kept verbatim.
    Invalid(String),
}

impl fmt::Display for PhpDocTagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhpDocTagValue::Typed(value) => value.fmt(f),
            PhpDocTagValue::Generic(raw) | PhpDocTagValue::Invalid(raw) => f.write_str(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhpDocTagNode {
    /// With the `@`.
    pub name: String,
    pub value: PhpDocTagValue,
}

impl PhpDocTagNode {
    pub fn new(name: &str, value: PhpDocTagValue) -> Self {
        Self {
            name: super::naming::normalize_tag_name(name),
            value,
        }
    }

    pub fn typed_value(&self) -> Option<&TypedTagValue> {
        match &self.value {
            PhpDocTagValue::Typed(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for PhpDocTagNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value.to_string();
        if value.is_empty() {
            f.write_str(&self.name)
        } else if value.starts_with('(') {
            // annotation arguments: `@ORM\Column(type="string")`
            write!(f, "{}{}", self.name, value)
        } else {
            write!(f, "{} {}", self.name, value)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhpDocChild {
    /// Free text; blank lines are empty text.
    Text(String),
    Tag(PhpDocTagNode),
}

impl PhpDocChild {
    pub fn is_blank(&self) -> bool {
        matches!(self, PhpDocChild::Text(text) if text.trim().is_empty())
    }

    pub fn as_tag(&self) -> Option<&PhpDocTagNode> {
        match self {
            PhpDocChild::Tag(tag) => Some(tag),
            PhpDocChild::Text(_) => None,
        }
    }
}

impl fmt::Display for PhpDocChild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhpDocChild::Text(text) => f.write_str(text),
            PhpDocChild::Tag(tag) => tag.fmt(f),
        }
    }
}

/// Where a parsed child came from, so it can be reprinted untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// Position among the originally parsed children.
    pub index: usize,
    /// The full source line, prefix included, without line ending.
    pub raw: String,
    pub snapshot: PhpDocChild,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhpDocChildNode {
    pub kind: PhpDocChild,
    pub origin: Option<Origin>,
}

impl PhpDocChildNode {
    /// A child that did not come from source.
    pub fn new(kind: PhpDocChild) -> Self {
        Self { kind, origin: None }
    }

    pub fn is_untouched(&self) -> bool {
        self.origin
            .as_ref()
            .is_some_and(|origin| origin.snapshot == self.kind)
    }
}

/// The `/**` ... `*/` wrapping of a docblock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocFrame {
    /// `/** content */` on one line.
    Inline,
    Block {
        /// First line, `/**` and whatever whitespace followed it.
        header: String,
        /// Line ending taken from the first line.
        eol: String,
        /// Whitespace in front of the closing `*/`.
        indent: String,
        /// Closing line as written, `None` when `*/` was glued to content.
        footer: Option<String>,
    },
}

impl Default for DocFrame {
    fn default() -> Self {
        DocFrame::Block {
            header: "/**".to_string(),
            eol: "\n".to_string(),
            indent: " ".to_string(),
            footer: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhpDocNode {
    pub children: Vec<PhpDocChildNode>,
    pub frame: DocFrame,
    /// Number of children the parser produced.
    pub parsed_children: usize,
}

impl PhpDocNode {
    pub fn tags(&self) -> impl Iterator<Item = &PhpDocTagNode> {
        self.children.iter().filter_map(|child| child.kind.as_tag())
    }

    pub fn tags_mut(&mut self) -> impl Iterator<Item = &mut PhpDocTagNode> {
        self.children.iter_mut().filter_map(|child| match &mut child.kind {
            PhpDocChild::Tag(tag) => Some(tag),
            PhpDocChild::Text(_) => None,
        })
    }

    pub fn typed_values_mut(&mut self) -> impl Iterator<Item = &mut TypedTagValue> {
        self.tags_mut().filter_map(|tag| match &mut tag.value {
            PhpDocTagValue::Typed(value) => Some(value),
            _ => None,
        })
    }

    pub fn push_tag(&mut self, tag: PhpDocTagNode) {
        self.children.push(PhpDocChildNode::new(PhpDocChild::Tag(tag)));
    }

    /// Insert after the last non-blank child.
    pub fn insert_after_content(&mut self, tag: PhpDocTagNode) {
        let position = self
            .children
            .iter()
            .rposition(|child| !child.kind.is_blank())
            .map_or(0, |index| index + 1);
        self.insert_tag(position, tag);
    }

    pub fn insert_tag(&mut self, position: usize, tag: PhpDocTagNode) {
        let position = position.min(self.children.len());
        self.children
            .insert(position, PhpDocChildNode::new(PhpDocChild::Tag(tag)));
    }

    /// Remove every tag named `name`; returns the position of the first one.
    pub fn remove_tags_by_name(&mut self, name: &str) -> Option<usize> {
        let first = self
            .children
            .iter()
            .position(|child| child.kind.as_tag().is_some_and(|tag| tag.name == name));
        self.children
            .retain(|child| !child.kind.as_tag().is_some_and(|tag| tag.name == name));
        first
    }

    /// Same children, in the same order, all untouched.
    pub fn is_unchanged(&self) -> bool {
        self.children.len() == self.parsed_children
            && self.children.iter().enumerate().all(|(position, child)| {
                child.is_untouched()
                    && child.origin.as_ref().is_some_and(|origin| origin.index == position)
            })
    }

    /// Whether nothing but blank lines is left.
    pub fn is_empty(&self) -> bool {
        self.children.iter().all(|child| child.kind.is_blank())
    }
}
