//! Attaches resolved names to the identifiers of a tag tree.

use super::ast::{IdentifierTypeNode, PhpDocNode, TypeAttributes};
use docsync_api::models::NameScope;
use docsync_api::models::naming::is_reserved_type;

/// Resolve every identifier of every typed tag through `scope`.
///
/// Reserved names get no resolved name; without a scope the written name is
/// taken as fully qualified.
pub fn decorate(node: &mut PhpDocNode, scope: Option<&NameScope>) {
    for value in node.typed_values_mut() {
        value
            .type_node
            .for_each_identifier_mut(&mut |ident| decorate_identifier(ident, scope));
    }
}

fn decorate_identifier(ident: &mut IdentifierTypeNode, scope: Option<&NameScope>) {
    if is_reserved_type(&ident.name) {
        ident.attributes = TypeAttributes::default();
        return;
    }

    let resolved = match scope {
        Some(scope) => scope.resolve_class_name(&ident.name),
        None => ident.name.trim_start_matches('\\').to_string(),
    };
    ident.attributes = TypeAttributes {
        resolved_name: Some(resolved.clone()),
        resolved_names: vec![resolved],
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docblock::parser::parse;

    fn resolved(source: &str, scope: Option<&NameScope>) -> Vec<Option<String>> {
        let mut node = parse(source);
        decorate(&mut node, scope);
        let mut names = Vec::new();
        for tag in node.tags() {
            if let Some(value) = tag.typed_value() {
                value.type_node.for_each_identifier(&mut |ident| {
                    names.push(ident.attributes.resolved_name.clone())
                });
            }
        }
        names
    }

    #[test]
    fn test_names_resolve_through_scope() {
        let scope = NameScope::new(Some("App")).with_use("Psr\\Log\\LoggerInterface");
        assert_eq!(
            resolved("/** @var LoggerInterface|User[]|null */", Some(&scope)),
            vec![
                Some("Psr\\Log\\LoggerInterface".to_string()),
                Some("App\\User".to_string()),
                None,
            ]
        );
    }

    #[test]
    fn test_without_scope_written_name_is_absolute() {
        assert_eq!(
            resolved("/** @return \\Foo\\Bar */", None),
            vec![Some("Foo\\Bar".to_string())]
        );
    }
}
