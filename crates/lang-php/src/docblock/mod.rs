//! Docblock parsing, editing and format-preserving printing.

pub mod ast;
pub mod decorator;
pub mod info;
pub mod manipulator;
pub mod naming;
pub mod parser;
pub mod printer;
pub mod type_parser;

pub use ast::{
    IdentifierTypeNode, PhpDocChild, PhpDocNode, PhpDocTagNode, PhpDocTagValue, TypeNode,
    TypedTagValue,
};
pub use info::{ParamTypeInfo, PhpDocInfo, TypeInfo};
pub use manipulator::DocBlockManipulator;

use docsync_api::models::Commented;
use regex::Regex;

/// Whether the doc comment of `node` carries tag `name`.
///
/// A cheap textual match first; the parsed tree is only consulted for
/// namespaced annotations written through an import alias.
pub fn has_tag<N: Commented + ?Sized>(node: &N, name: &str) -> bool {
    let Some(text) = node.doc_comment() else {
        return false;
    };

    let bare = name.trim_start_matches('@');
    let pattern = format!(r"@\\?{}(?:[^\w\\-]|$)", regex::escape(bare));
    if Regex::new(&pattern).is_ok_and(|re| re.is_match(text)) {
        return true;
    }

    PhpDocInfo::parse(text, node.name_scope()).has_tag(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsync_api::models::{ClassMethod, NameScope};

    #[test]
    fn test_has_tag_textual_and_structural() {
        let method = ClassMethod::new("inject").with_doc("/**\n * @required\n */");
        assert!(has_tag(&method, "required"));
        assert!(has_tag(&method, "@required"));
        assert!(!has_tag(&method, "require"));

        let method = ClassMethod::new("inject").with_doc("/** @requiredness */");
        assert!(!has_tag(&method, "required"));

        assert!(!has_tag(&ClassMethod::new("bare"), "required"));
    }

    #[test]
    fn test_has_tag_through_alias() {
        let mut method = ClassMethod::new("setLogger").with_doc("/** @DI\\Inject */");
        method.name_scope = Some(std::sync::Arc::new(
            NameScope::new(None).with_aliased_use("JMS\\Annotation", "DI"),
        ));
        assert!(has_tag(&method, "JMS\\Annotation\\Inject"));
    }
}
