//! Queries and edits on the doc comment of a declaration.

use super::ast::{
    IdentifierTypeNode, PhpDocNode, PhpDocTagNode, PhpDocTagValue, TypeNode, TypedTagValue,
};
use super::info::{ParamTypeInfo, PhpDocInfo, TypeInfo};
use super::naming::normalize_tag_name;
use super::parser::is_type_bearing_tag;
use super::printer::render_new;
use super::type_parser::parse_type;
use crate::inference::{TypeName, TypeSet};
use docsync_api::models::naming::{NAMESPACE_SEPARATOR, is_reserved_type, short_name};
use docsync_api::models::{Commented, NameScope};
use docsync_api::oracle::{ClassRegistry, SubtypeOracle, UseImportCommander};
use docsync_api::{DocsyncError, Result};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

static TYPE_CHANGEABLE_TAGS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@(param|throws|return|var)\b").expect("Failed to compile type tag regex")
});

/// Reads and rewrites doc comments of declarations.
///
/// Every edit parses the comment, changes the tree and writes the text back
/// only when the printed result differs from the original.
///
/// Names imported by [`import_names`](Self::import_names) accumulate until
/// [`reset_imported_names`](Self::reset_imported_names) is called.
pub struct DocBlockManipulator<'a> {
    subtypes: &'a dyn SubtypeOracle,
    classes: &'a dyn ClassRegistry,
    imported_names: Vec<String>,
}

impl<'a> DocBlockManipulator<'a> {
    pub fn new(subtypes: &'a dyn SubtypeOracle, classes: &'a dyn ClassRegistry) -> Self {
        Self {
            subtypes,
            classes,
            imported_names: Vec::new(),
        }
    }

    // ---- Queries ----

    pub fn has_tag<N: Commented + ?Sized>(&self, node: &N, name: &str) -> bool {
        super::has_tag(node, name)
    }

    pub fn get_tags_by_name<N: Commented + ?Sized>(
        &self,
        node: &N,
        name: &str,
    ) -> Vec<PhpDocTagNode> {
        let Some(info) = PhpDocInfo::from_node(node) else {
            return Vec::new();
        };
        info.get_tags_by_name(name).into_iter().cloned().collect()
    }

    /// The first tag named `name`.
    pub fn get_tag_by_name<N: Commented + ?Sized>(
        &self,
        node: &N,
        name: &str,
    ) -> Result<PhpDocTagNode> {
        let missing = || DocsyncError::MissingTag {
            tag: name.to_string(),
            node: node.node_label(),
        };
        if !self.has_tag(node, name) {
            return Err(missing());
        }

        let info = self.create_php_doc_info_from_node(node)?;
        info.get_tags_by_name(name)
            .into_iter()
            .next()
            .cloned()
            .ok_or_else(missing)
    }

    /// Types of the `@var` tag; `None` without comment or `@var`.
    pub fn get_var_type_info<N: Commented + ?Sized>(&self, node: &N) -> Option<TypeInfo> {
        let info = PhpDocInfo::from_node(node)?;
        let types = info.short_var_types();
        if types.is_empty() {
            return None;
        }
        Some(TypeInfo::new(types, info.var_types()))
    }

    pub fn get_return_type_info<N: Commented + ?Sized>(&self, node: &N) -> Option<TypeInfo> {
        let info = PhpDocInfo::from_node(node)?;
        let types = info.short_return_types();
        if types.is_empty() {
            return None;
        }
        Some(TypeInfo::new(types, info.return_types()))
    }

    /// `@param` types keyed by parameter name (without `$`).
    pub fn get_param_type_infos<N: Commented + ?Sized>(
        &self,
        node: &N,
    ) -> IndexMap<String, ParamTypeInfo> {
        let Some(info) = PhpDocInfo::from_node(node) else {
            return IndexMap::new();
        };

        info.param_tag_values()
            .into_iter()
            .filter_map(|value| {
                let name = value.variable.as_deref()?.trim_start_matches(['&', '.', '$']);
                Some((
                    name.to_string(),
                    ParamTypeInfo {
                        name: name.to_string(),
                        info: TypeInfo::from_tag_value(value),
                    },
                ))
            })
            .collect()
    }

    /// For better performance: a textual check before any parsing.
    pub fn has_node_type_changeable_tags<N: Commented + ?Sized>(&self, node: &N) -> bool {
        node.doc_comment()
            .is_some_and(|text| TYPE_CHANGEABLE_TAGS.is_match(text))
    }

    // ---- Tag edits ----

    /// Append `tag`; creates the docblock when there is none.
    pub fn add_tag<N: Commented + ?Sized>(&self, node: &mut N, tag: PhpDocTagNode) -> bool {
        match PhpDocInfo::from_node(node) {
            Some(mut info) => {
                info.node.push_tag(tag);
                info.redecorate();
                self.update_node_with_php_doc_info(node, &info)
            }
            None => {
                node.set_doc_comment(Some(render_new(&[tag.to_string()])));
                true
            }
        }
    }

    pub fn remove_tag_from_node<N: Commented + ?Sized>(&self, node: &mut N, name: &str) -> bool {
        let Some(mut info) = PhpDocInfo::from_node(node) else {
            return false;
        };
        info.node.remove_tags_by_name(&normalize_tag_name(name));
        self.update_node_with_php_doc_info(node, &info)
    }

    /// Remove the `@param` tag of parameter `name` (with or without `$`),
    /// including one whose type could not be parsed.
    pub fn remove_param_tag_by_name<N: Commented + ?Sized>(
        &self,
        node: &mut N,
        name: &str,
    ) -> bool {
        let Some(mut info) = PhpDocInfo::from_node(node) else {
            return false;
        };

        let parameter = format!("${}", name.trim_start_matches('$'));
        info.node.children.retain(|child| {
            let Some(tag) = child.kind.as_tag() else {
                return true;
            };
            if tag.name != "@param" {
                return true;
            }
            match &tag.value {
                PhpDocTagValue::Typed(value) => {
                    value.variable.as_deref() != Some(parameter.as_str())
                }
                PhpDocTagValue::Invalid(raw) => {
                    raw.split_whitespace().next() != Some(parameter.as_str())
                }
                PhpDocTagValue::Generic(_) => true,
            }
        });
        self.update_node_with_php_doc_info(node, &info)
    }

    /// Rename every `old` tag to `new`, e.g. `@inject` -> `@required`.
    pub fn replace_annotation_in_node<N: Commented + ?Sized>(
        &self,
        node: &mut N,
        old: &str,
        new: &str,
    ) -> bool {
        let Some(mut info) = PhpDocInfo::from_node(node) else {
            return false;
        };

        let old = normalize_tag_name(old);
        let new = normalize_tag_name(new);
        for tag in info.node.tags_mut() {
            if tag.name == old {
                tag.name = new.clone();
            }
        }
        self.update_node_with_php_doc_info(node, &info)
    }

    // ---- Type edits ----

    /// Replace type `old` by `new` in every type-bearing tag.
    pub fn change_type<N: Commented + ?Sized>(&self, node: &mut N, old: &str, new: &str) -> bool {
        self.change_type_with(node, old, new, false)
    }

    /// Like [`change_type`](Self::change_type), also replacing subtypes of `old`.
    pub fn change_type_including_subtypes<N: Commented + ?Sized>(
        &self,
        node: &mut N,
        old: &str,
        new: &str,
    ) -> bool {
        self.change_type_with(node, old, new, true)
    }

    fn change_type_with<N: Commented + ?Sized>(
        &self,
        node: &mut N,
        old: &str,
        new: &str,
        include_subtypes: bool,
    ) -> bool {
        if !self.has_node_type_changeable_tags(node) {
            return false;
        }
        let Some(mut info) = PhpDocInfo::from_node(node) else {
            return false;
        };

        let scope = node.name_scope();
        self.replace_php_doc_type_by_another(
            &mut info.node,
            old,
            new,
            scope.as_deref(),
            include_subtypes,
        );
        self.update_node_with_php_doc_info(node, &info)
    }

    /// Walk the type of every type-bearing tag and swap matching identifiers.
    ///
    /// An identifier matches on its effective name (leading `\` ignored) or,
    /// with `include_subtypes`, when it names a subtype of `old`. Replacements
    /// containing a namespace separator are written absolute.
    pub fn replace_php_doc_type_by_another(
        &self,
        doc: &mut PhpDocNode,
        old: &str,
        new: &str,
        node_scope: Option<&NameScope>,
        include_subtypes: bool,
    ) {
        let old = old.trim_start_matches(NAMESPACE_SEPARATOR);
        let replacement = force_fqn_prefix(new);

        for tag in doc.tags_mut() {
            if !is_type_bearing_tag(&tag.name) {
                continue;
            }
            let PhpDocTagValue::Typed(value) = &mut tag.value else {
                continue;
            };

            value.type_node.for_each_identifier_mut(&mut |ident| {
                let effective = ident.effective_name().trim_start_matches(NAMESPACE_SEPARATOR);
                let matches = effective == old
                    || (include_subtypes
                        && !is_reserved_type(effective)
                        && self.subtypes.is_subtype_of(effective, old));
                if matches {
                    *ident = IdentifierTypeNode::new(replacement.clone());
                }
            });
        }

        super::decorator::decorate(doc, node_scope);
    }

    /// Set `@var` to `types`.
    ///
    /// Nothing happens when the current `@var` already lists the same fully
    /// qualified types in any order. Aliases compare as written. A new `@var` takes the
    /// place of the first removed one, or follows the last content line.
    pub fn change_var_tag<N: Commented + ?Sized>(&self, node: &mut N, types: &TypeSet) -> bool {
        if types.is_empty() || self.is_current_type_already_added(node, types) {
            return false;
        }

        let rendered = types
            .iter()
            .map(preslash_fully_qualified_names)
            .collect::<Vec<_>>()
            .join("|");
        self.set_type_specific_tag(node, "@var", &rendered)
    }

    /// Set `@return` to `type_string`, unless it already says the same.
    pub fn add_return_tag<N: Commented + ?Sized>(&self, node: &mut N, type_string: &str) -> bool {
        if let Some(current) = self.get_return_type_info(node) {
            // imported class vs FQN class
            if current.fqn_types() == [type_string.trim_start_matches(NAMESPACE_SEPARATOR)] {
                return false;
            }
        }

        let rendered = preslash_fully_qualified_names(&TypeName::new(type_string));
        self.set_type_specific_tag(node, "@return", &rendered)
    }

    fn set_type_specific_tag<N: Commented + ?Sized>(
        &self,
        node: &mut N,
        tag_name: &str,
        rendered: &str,
    ) -> bool {
        let value = match parse_type(rendered) {
            Ok(type_node) => TypedTagValue::new(type_node),
            Err(_) => TypedTagValue::new(TypeNode::identifier(rendered)),
        };
        let tag = PhpDocTagNode::new(tag_name, PhpDocTagValue::Typed(value));

        let Some(mut info) = PhpDocInfo::from_node(node) else {
            // there might be no docblock at all
            tracing::debug!("Creating docblock with {} on {}", tag, node.node_label());
            node.set_doc_comment(Some(render_new(&[tag.to_string()])));
            return true;
        };

        match info.node.remove_tags_by_name(tag_name) {
            Some(position) => info.node.insert_tag(position, tag),
            None => info.node.insert_after_content(tag),
        }
        info.redecorate();

        let changed = self.update_node_with_php_doc_info(node, &info);
        if changed {
            tracing::debug!("Changed {} of {} to {}", tag_name, node.node_label(), rendered);
        }
        changed
    }

    fn is_current_type_already_added<N: Commented + ?Sized>(
        &self,
        node: &N,
        types: &TypeSet,
    ) -> bool {
        let Some(current) = self.get_var_type_info(node) else {
            return false;
        };

        let mut wanted: Vec<&str> = types
            .iter()
            .map(|ty| ty.as_str().trim_start_matches(NAMESPACE_SEPARATOR))
            .collect();
        wanted.sort_unstable();

        // aliases compare as written, everything else fully qualified
        let mut existing: Vec<&str> = current
            .types()
            .iter()
            .zip(current.fqn_types())
            .map(|(written, fqn)| {
                let written = written.trim_start_matches(NAMESPACE_SEPARATOR);
                let is_alias = types
                    .iter()
                    .any(|ty| ty.is_alias() && ty.as_str() == written);
                if is_alias {
                    written
                } else {
                    fqn.trim_start_matches(NAMESPACE_SEPARATOR)
                }
            })
            .collect();
        existing.sort_unstable();

        existing == wanted
    }

    /// Rewrite `Prefix_Sub_Name` as `\Prefix\Sub\Name`, except `excluded` names.
    pub fn change_underscore_type<N: Commented + ?Sized>(
        &self,
        node: &mut N,
        namespace_prefix: &str,
        excluded: Option<&[String]>,
    ) -> bool {
        let Some(mut info) = PhpDocInfo::from_node(node) else {
            return false;
        };

        for value in info.node.typed_values_mut() {
            value.type_node.for_each_identifier_mut(&mut |ident| {
                let name = ident.name.trim_start_matches(NAMESPACE_SEPARATOR);
                if !name.starts_with(namespace_prefix) {
                    return;
                }
                if excluded.is_some_and(|excluded| excluded.iter().any(|e| e == name)) {
                    return;
                }
                *ident = IdentifierTypeNode::new(format!("\\{}", name.replace('_', "\\")));
            });
        }
        info.redecorate();
        self.update_node_with_php_doc_info(node, &info)
    }

    // ---- Imports ----

    /// Shorten namespaced names in the doc comment, requesting `use` imports
    /// through `commander`.
    ///
    /// Returns every name imported by this manipulator so far.
    pub fn import_names<N: Commented + ?Sized>(
        &mut self,
        node: &mut N,
        commander: &mut dyn UseImportCommander,
    ) -> Vec<String> {
        let Some(mut info) = PhpDocInfo::from_node(node) else {
            return Vec::new();
        };
        let scope = node.name_scope().map(|scope| (*scope).clone()).unwrap_or_default();

        let classes = self.classes;
        let imported_names = &mut self.imported_names;
        for value in info.node.typed_values_mut() {
            value.type_node.for_each_identifier_mut(&mut |ident| {
                // class without namespaced name
                let name = ident.name.trim_start_matches(NAMESPACE_SEPARATOR);
                if !name.contains(NAMESPACE_SEPARATOR) {
                    return;
                }

                let fqn = ident
                    .effective_name()
                    .trim_start_matches(NAMESPACE_SEPARATOR)
                    .to_string();
                let short = short_name(name).to_string();
                process_fqn_name_import(
                    ident,
                    &short,
                    &fqn,
                    &scope,
                    classes,
                    commander,
                    imported_names,
                );
            });
        }

        self.update_node_with_php_doc_info(node, &info);
        self.imported_names.clone()
    }

    pub fn imported_names(&self) -> &[String] {
        &self.imported_names
    }

    pub fn reset_imported_names(&mut self) {
        self.imported_names.clear();
    }

    // ---- Persistence ----

    /// Write the printed tree back when it differs from the current comment.
    ///
    /// A tree with no content left removes the comment.
    pub fn update_node_with_php_doc_info<N: Commented + ?Sized>(
        &self,
        node: &mut N,
        info: &PhpDocInfo,
    ) -> bool {
        let Some(current) = node.doc_comment() else {
            return false;
        };

        let printed = info.print();
        if printed.is_empty() {
            node.set_doc_comment(None);
            return true;
        }
        // no change, don't save it
        if printed == current {
            return false;
        }

        node.set_doc_comment(Some(printed));
        true
    }

    /// Parse the doc comment of a node that must have one.
    pub fn create_php_doc_info_from_node<N: Commented + ?Sized>(
        &self,
        node: &N,
    ) -> Result<PhpDocInfo> {
        PhpDocInfo::from_node(node).ok_or_else(|| {
            DocsyncError::contract(
                "create_php_doc_info_from_node",
                format!(
                    "{} must have a comment. Check `doc_comment().is_some()` before passing it",
                    node.node_label()
                ),
            )
        })
    }
}

fn process_fqn_name_import(
    ident: &mut IdentifierTypeNode,
    short: &str,
    fqn: &str,
    scope: &NameScope,
    classes: &dyn ClassRegistry,
    commander: &mut dyn UseImportCommander,
    imported_names: &mut Vec<String>,
) {
    // a class of the same namespace is usable by its short name already
    let same_namespace = match &scope.namespace {
        Some(namespace) => format!("{}{}{}", namespace, NAMESPACE_SEPARATOR, short),
        None => short.to_string(),
    };
    if classes.class_exists(&same_namespace) {
        if same_namespace.eq_ignore_ascii_case(fqn) {
            ident.name = short.to_string();
        }
        // different class with the same short name: shortening would collide
        return;
    }

    if commander.is_short_imported(scope, fqn) {
        if commander.is_import_shortable(scope, fqn) {
            ident.name = short.to_string();
        }
        return;
    }

    ident.name = short.to_string();
    commander.add_use_import(scope, fqn);
    tracing::debug!("Requested import of {}", fqn);
    if !imported_names.iter().any(|name| name == fqn) {
        imported_names.push(fqn.to_string());
    }
}

/// All class-type names are absolute by default; aliases stay as written.
fn preslash_fully_qualified_names(type_name: &TypeName) -> String {
    if type_name.is_alias() {
        return type_name.as_str().to_string();
    }

    let name = type_name.as_str();
    let join = if !name.contains('|') && name.contains('&') { '&' } else { '|' };
    name.split(join)
        .map(|single| {
            if is_reserved_type(single) {
                single.to_string()
            } else {
                format!("\\{}", single.trim_start_matches(NAMESPACE_SEPARATOR))
            }
        })
        .collect::<Vec<_>>()
        .join(&join.to_string())
}

fn force_fqn_prefix(new_type: &str) -> String {
    if new_type.contains(NAMESPACE_SEPARATOR) {
        return format!("\\{}", new_type.trim_start_matches(NAMESPACE_SEPARATOR));
    }
    new_type.to_string()
}
