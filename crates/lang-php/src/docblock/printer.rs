//! Format-preserving docblock printer.

use super::ast::{DocFrame, PhpDocChildNode, PhpDocNode};

/// Print `node`, which was parsed from `original`.
///
/// An unchanged tree gives back `original` byte for byte. Otherwise untouched
/// lines are copied from source and only new or modified children are
/// rendered. A tree with nothing left but blank lines prints as `""`.
pub fn print(node: &PhpDocNode, original: &str) -> String {
    if node.is_unchanged() {
        return original.to_string();
    }
    if node.is_empty() {
        return String::new();
    }

    match &node.frame {
        DocFrame::Inline if node.children.len() == 1 => {
            format!("/** {} */", inline_content(&node.children[0]))
        }
        DocFrame::Inline => {
            // several children do not fit on one line
            let lines: Vec<String> = node
                .children
                .iter()
                .map(|child| prefixed(" * ", &inline_content(child)))
                .collect();
            assemble("/**", &lines, " */", "\n")
        }
        DocFrame::Block {
            header,
            eol,
            indent,
            footer,
        } => {
            let prefix = format!("{}* ", indent);
            let lines: Vec<String> = node
                .children
                .iter()
                .map(|child| match &child.origin {
                    Some(origin) if child.is_untouched() => origin.raw.clone(),
                    _ => prefixed(&prefix, &child.kind.to_string()),
                })
                .collect();
            let footer = footer.clone().unwrap_or_else(|| format!("{}*/", indent));
            assemble(header, &lines, &footer, eol)
        }
    }
}

fn inline_content(child: &PhpDocChildNode) -> String {
    match &child.origin {
        Some(origin) if child.is_untouched() => origin.raw.clone(),
        _ => child.kind.to_string(),
    }
}

fn prefixed(prefix: &str, content: &str) -> String {
    if content.is_empty() {
        return prefix.trim_end().to_string();
    }
    format!("{}{}", prefix, content)
}

fn assemble(header: &str, lines: &[String], footer: &str, eol: &str) -> String {
    let mut out = String::from(header);
    for line in lines {
        out.push_str(eol);
        out.push_str(line);
    }
    out.push_str(eol);
    out.push_str(footer);
    out
}

/// A brand new docblock around `content` lines.
pub fn render_new(content: &[String]) -> String {
    let lines: Vec<String> = content.iter().map(|line| prefixed(" * ", line)).collect();
    assemble("/**", &lines, " */", "\n")
}
