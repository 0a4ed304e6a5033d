//! Docblock text to tag tree.
//!
//! One child per content line. Every child keeps its source line so the
//! printer can reproduce it untouched.

use super::ast::{
    DocFrame, Origin, PhpDocChild, PhpDocChildNode, PhpDocNode, PhpDocTagNode, PhpDocTagValue,
    TypedTagValue,
};
use super::type_parser::parse_type_prefix;
use once_cell::sync::Lazy;
use regex::Regex;

static LINE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\*\s?").expect("Failed to compile docblock line prefix regex"));

static TAG_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@\\?[A-Za-z_][\w\\-]*").expect("Failed to compile docblock tag name regex")
});

const TYPED_TAGS: &[&str] = &["@var", "@param", "@return", "@throws"];

pub fn is_type_bearing_tag(name: &str) -> bool {
    TYPED_TAGS.iter().any(|tag| tag.eq_ignore_ascii_case(name))
}

/// Parse a doc comment.
///
/// Text that is not a `/** */` docblock becomes a single text child.
pub fn parse(text: &str) -> PhpDocNode {
    let trimmed = text.trim();
    if !trimmed.starts_with("/**") || !trimmed.ends_with("*/") || trimmed.len() < 5 {
        return single_text(text);
    }

    let lines: Vec<&str> = text
        .trim_end()
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    if lines.len() == 1 {
        return parse_inline(trimmed);
    }

    let eol = if text.contains("\r\n") { "\r\n" } else { "\n" };
    parse_block(&lines, eol)
}

fn single_text(text: &str) -> PhpDocNode {
    let mut builder = ChildrenBuilder::default();
    builder.push(PhpDocChild::Text(text.to_string()), text.to_string());
    builder.finish(DocFrame::Inline)
}

fn parse_inline(trimmed: &str) -> PhpDocNode {
    let content = trimmed["/**".len()..trimmed.len() - "*/".len()].trim();
    let mut builder = ChildrenBuilder::default();
    if !content.is_empty() {
        builder.push(parse_content(content), content.to_string());
    }
    builder.finish(DocFrame::Inline)
}

fn parse_block(lines: &[&str], eol: &str) -> PhpDocNode {
    let first = lines[0];
    let last = lines[lines.len() - 1];
    let middle = &lines[1..lines.len() - 1];

    let (indent, footer, glued) = match last.trim_end().strip_suffix("*/") {
        Some(before) if before.trim().is_empty() => {
            (before.to_string(), Some(last.trim_end().to_string()), None)
        }
        Some(before) => (
            leading_whitespace(before).to_string(),
            None,
            Some(before.trim_end()),
        ),
        None => (" ".to_string(), None, Some(last)),
    };

    let mut builder = ChildrenBuilder::default();

    let header_rest = first.trim_start().strip_prefix("/**").unwrap_or(first);
    let header = if header_rest.trim().is_empty() {
        first.trim_end().to_string()
    } else {
        // `/** Summary` continues on the next lines
        let content = header_rest.trim();
        builder.push(parse_content(content), format!("{}* {}", indent, content));
        "/**".to_string()
    };

    for line in middle.iter().copied().chain(glued) {
        builder.push(parse_content(strip_line_prefix(line)), line.trim_end().to_string());
    }

    builder.finish(DocFrame::Block {
        header,
        eol: eol.to_string(),
        indent,
        footer,
    })
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

fn strip_line_prefix(line: &str) -> &str {
    let content = match LINE_PREFIX.find(line) {
        Some(prefix) => &line[prefix.end()..],
        None => line.trim_start(),
    };
    content.trim_end()
}

/// A content line: a tag when it starts with `@name`, text otherwise.
pub fn parse_content(content: &str) -> PhpDocChild {
    let Some(name) = TAG_NAME.find(content) else {
        return PhpDocChild::Text(content.to_string());
    };

    let rest = &content[name.end()..];
    let value = if is_type_bearing_tag(name.as_str()) {
        parse_typed_value(rest)
    } else {
        PhpDocTagValue::Generic(rest.trim().to_string())
    };

    PhpDocChild::Tag(PhpDocTagNode {
        name: name.as_str().to_string(),
        value,
    })
}

/// `type [variable] [description]`; an unparseable type is kept verbatim.
pub fn parse_typed_value(rest: &str) -> PhpDocTagValue {
    let rest = rest.trim();
    let Ok((type_node, consumed)) = parse_type_prefix(rest) else {
        return PhpDocTagValue::Invalid(rest.to_string());
    };

    let tail = rest[consumed..].trim_start();
    let is_variable = ["$", "&$", "...$", "&...$"]
        .iter()
        .any(|prefix| tail.starts_with(prefix));

    let (variable, description) = if is_variable {
        match tail.split_once(char::is_whitespace) {
            Some((variable, description)) => (Some(variable.to_string()), description.trim()),
            None => (Some(tail.to_string()), ""),
        }
    } else {
        (None, tail)
    };

    PhpDocTagValue::Typed(TypedTagValue {
        type_node,
        variable,
        description: description.to_string(),
    })
}

#[derive(Default)]
struct ChildrenBuilder {
    children: Vec<PhpDocChildNode>,
}

impl ChildrenBuilder {
    fn push(&mut self, kind: PhpDocChild, raw: String) {
        let index = self.children.len();
        self.children.push(PhpDocChildNode {
            origin: Some(Origin {
                index,
                raw,
                snapshot: kind.clone(),
            }),
            kind,
        });
    }

    fn finish(self, frame: DocFrame) -> PhpDocNode {
        PhpDocNode {
            parsed_children: self.children.len(),
            children: self.children,
            frame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docblock::ast::TypeNode;

    fn kinds(node: &PhpDocNode) -> Vec<String> {
        node.children.iter().map(|c| c.kind.to_string()).collect()
    }

    #[test]
    fn test_block_lines_become_children() {
        let node =
            parse("/**\n     * Summary\n     *\n     * @var int|null $count how many\n     */");
        assert_eq!(kinds(&node), vec!["Summary", "", "@var int|null $count how many"]);

        let tag = node.children[2].kind.as_tag().unwrap();
        let value = tag.typed_value().unwrap();
        assert_eq!(value.variable.as_deref(), Some("$count"));
        assert_eq!(value.description, "how many");

        match &node.frame {
            DocFrame::Block { indent, footer, .. } => {
                assert_eq!(indent, "     ");
                assert_eq!(footer.as_deref(), Some("     */"));
            }
            DocFrame::Inline => panic!("Expected block frame"),
        }
    }

    #[test]
    fn test_inline_docblock() {
        let node = parse("/** @var \\App\\Foo */");
        assert_eq!(node.frame, DocFrame::Inline);
        let tag = node.children[0].kind.as_tag().unwrap();
        assert_eq!(
            tag.typed_value().unwrap().type_node,
            TypeNode::identifier("\\App\\Foo")
        );
    }

    #[test]
    fn test_namespaced_annotation_is_generic_tag() {
        let child = parse_content("@ORM\\Column(type=\"string\")");
        let tag = child.as_tag().unwrap();
        assert_eq!(tag.name, "@ORM\\Column");
        assert_eq!(tag.value, PhpDocTagValue::Generic("(type=\"string\")".to_string()));
        assert_eq!(tag.to_string(), "@ORM\\Column(type=\"string\")");
    }

    #[test]
    fn test_unparseable_type_is_invalid() {
        let child = parse_content("@param $name");
        let tag = child.as_tag().unwrap();
        assert_eq!(tag.value, PhpDocTagValue::Invalid("$name".to_string()));
    }

    #[test]
    fn test_glued_footer() {
        let node = parse("/**\n * @var int */");
        assert_eq!(kinds(&node), vec!["@var int"]);
        match &node.frame {
            DocFrame::Block { footer, indent, .. } => {
                assert!(footer.is_none());
                assert_eq!(indent, " ");
            }
            DocFrame::Inline => panic!("Expected block frame"),
        }
    }

    #[test]
    fn test_plain_comment_is_single_text() {
        let node = parse("// not a docblock");
        assert_eq!(kinds(&node), vec!["// not a docblock"]);
    }
}
