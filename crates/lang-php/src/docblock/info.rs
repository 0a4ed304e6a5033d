//! A parsed docblock of one declaration, and the type views read from it.

use super::ast::{PhpDocNode, PhpDocTagNode, TypedTagValue};
use super::decorator::decorate;
use super::naming::{annotation_class, normalize_tag_name};
use super::parser::parse;
use super::printer::print;
use docsync_api::models::{Commented, NameScope};
use std::sync::Arc;

/// Tag tree plus the text it was parsed from.
#[derive(Debug, Clone)]
pub struct PhpDocInfo {
    pub node: PhpDocNode,
    original: String,
    scope: Option<Arc<NameScope>>,
}

impl PhpDocInfo {
    pub fn parse(text: &str, scope: Option<Arc<NameScope>>) -> Self {
        let mut node = parse(text);
        decorate(&mut node, scope.as_deref());
        Self {
            node,
            original: text.to_string(),
            scope,
        }
    }

    /// `None` when the declaration has no doc comment.
    pub fn from_node<N: Commented + ?Sized>(node: &N) -> Option<Self> {
        let text = node.doc_comment()?;
        Some(Self::parse(text, node.name_scope()))
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn scope(&self) -> Option<&NameScope> {
        self.scope.as_deref()
    }

    /// Re-resolve identifier names after the tree was edited.
    pub fn redecorate(&mut self) {
        decorate(&mut self.node, self.scope.as_deref());
    }

    pub fn print(&self) -> String {
        print(&self.node, &self.original)
    }

    /// Matches `name` literally, or as an annotation class resolved through
    /// the name scope (`@DI\Inject` with `use JMS\DiExtraBundle\Annotation as DI`).
    pub fn has_tag(&self, name: &str) -> bool {
        !self.get_tags_by_name(name).is_empty()
    }

    pub fn get_tags_by_name(&self, name: &str) -> Vec<&PhpDocTagNode> {
        let normalized = normalize_tag_name(name);
        self.node
            .tags()
            .filter(|tag| tag.name == normalized || self.is_same_annotation(&tag.name, &normalized))
            .collect()
    }

    fn is_same_annotation(&self, tag_name: &str, wanted: &str) -> bool {
        let wanted = annotation_class(wanted);
        if !wanted.contains('\\') {
            return false;
        }
        let resolved = match &self.scope {
            Some(scope) => scope.resolve_class_name(annotation_class(tag_name)),
            None => annotation_class(tag_name).to_string(),
        };
        resolved.eq_ignore_ascii_case(wanted)
    }

    fn first_typed_value(&self, tag: &str) -> Option<&TypedTagValue> {
        self.node
            .tags()
            .filter(|t| t.name == tag)
            .find_map(PhpDocTagNode::typed_value)
    }

    pub fn var_tag_value(&self) -> Option<&TypedTagValue> {
        self.first_typed_value("@var")
    }

    pub fn return_tag_value(&self) -> Option<&TypedTagValue> {
        self.first_typed_value("@return")
    }

    pub fn param_tag_values(&self) -> Vec<&TypedTagValue> {
        self.node
            .tags()
            .filter(|t| t.name == "@param")
            .filter_map(PhpDocTagNode::typed_value)
            .collect()
    }

    /// Types of the `@var` tag as written.
    pub fn short_var_types(&self) -> Vec<String> {
        self.var_tag_value().map(short_types).unwrap_or_default()
    }

    /// Types of the `@var` tag, fully qualified, without leading `\`.
    pub fn var_types(&self) -> Vec<String> {
        self.var_tag_value().map(fqn_types).unwrap_or_default()
    }

    pub fn short_return_types(&self) -> Vec<String> {
        self.return_tag_value().map(short_types).unwrap_or_default()
    }

    pub fn return_types(&self) -> Vec<String> {
        self.return_tag_value().map(fqn_types).unwrap_or_default()
    }
}

fn short_types(value: &TypedTagValue) -> Vec<String> {
    value
        .type_node
        .alternatives()
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn fqn_types(value: &TypedTagValue) -> Vec<String> {
    value
        .type_node
        .alternatives()
        .iter()
        .map(|alternative| alternative.render_resolved())
        .collect()
}

/// Written and fully qualified types of one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    types: Vec<String>,
    fqn_types: Vec<String>,
}

impl TypeInfo {
    pub fn new(types: Vec<String>, fqn_types: Vec<String>) -> Self {
        Self { types, fqn_types }
    }

    pub fn from_tag_value(value: &TypedTagValue) -> Self {
        Self::new(short_types(value), fqn_types(value))
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn fqn_types(&self) -> &[String] {
        &self.fqn_types
    }

    pub fn is_nullable(&self) -> bool {
        self.types.iter().any(|ty| ty.eq_ignore_ascii_case("null"))
    }

    /// Every non-null type is array-like.
    pub fn is_iterable(&self) -> bool {
        let mut non_null = self
            .types
            .iter()
            .filter(|ty| !ty.eq_ignore_ascii_case("null"))
            .peekable();
        if non_null.peek().is_none() {
            return false;
        }
        non_null.all(|ty| is_iterable_type(ty))
    }
}

fn is_iterable_type(ty: &str) -> bool {
    let lower = ty.to_ascii_lowercase();
    let base = lower.split('<').next().unwrap_or(&lower);
    lower.ends_with("[]")
        || matches!(
            base,
            "array" | "iterable" | "list" | "non-empty-array" | "non-empty-list"
        )
}

/// `@param` types of one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamTypeInfo {
    /// Without the `$`.
    pub name: String,
    pub info: TypeInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_types_short_and_fqn() {
        let scope = Arc::new(NameScope::new(Some("App")).with_use("Psr\\Log\\LoggerInterface"));
        let info = PhpDocInfo::parse("/** @var LoggerInterface[]|?Cache */", Some(scope));
        assert_eq!(info.short_var_types(), vec!["LoggerInterface[]", "Cache", "null"]);
        assert_eq!(
            info.var_types(),
            vec!["Psr\\Log\\LoggerInterface[]", "App\\Cache", "null"]
        );
    }

    #[test]
    fn test_namespaced_annotation_resolves_through_alias() {
        let scope = Arc::new(
            NameScope::new(Some("App")).with_aliased_use("JMS\\DiExtraBundle\\Annotation", "DI"),
        );
        let info = PhpDocInfo::parse("/**\n * @DI\\Inject(\"logger\")\n */", Some(scope));
        assert!(info.has_tag("JMS\\DiExtraBundle\\Annotation\\Inject"));
        assert!(info.has_tag("@DI\\Inject"));
        assert!(!info.has_tag("Inject"));
    }

    #[test]
    fn test_type_info_flags() {
        let info = TypeInfo::new(vec!["int[]".into(), "null".into()], vec![]);
        assert!(info.is_nullable());
        assert!(info.is_iterable());

        let info = TypeInfo::new(vec!["array<int, Foo>".into()], vec![]);
        assert!(info.is_iterable());
        assert!(!info.is_nullable());

        let info = TypeInfo::new(vec!["Foo".into(), "int[]".into()], vec![]);
        assert!(!info.is_iterable());

        let info = TypeInfo::new(vec!["null".into()], vec![]);
        assert!(!info.is_iterable());
    }
}
