//! Tab indentation for element trees.

use super::element::Element;

/// Indent a tree in place with one tab per nesting level.
///
/// Only whitespace-only (or missing) text and tails are rewritten, so
/// meaningful character data survives and applying this twice gives the
/// same tree as applying it once. Every tail is a newline at the
/// element's own depth, so the closing tag of a parent sits one tab
/// deeper than its opening tag. A root with children gets a trailing
/// newline; a bare leaf root gets nothing.
pub fn indent(root: &mut Element) {
    indent_at(root, 0);
}

fn indent_at(elem: &mut Element, level: usize) {
    if elem.has_children() {
        if is_blank(&elem.text) {
            elem.text = Some(newline_indent(level + 1));
        }
        for child in &mut elem.children {
            indent_at(child, level + 1);
        }
    }

    if is_blank(&elem.tail) && (level > 0 || elem.has_children()) {
        elem.tail = Some(newline_indent(level));
    }
}

fn is_blank(text: &Option<String>) -> bool {
    text.as_deref().map_or(true, |t| t.trim().is_empty())
}

fn newline_indent(level: usize) -> String {
    let mut s = String::with_capacity(level + 1);
    s.push('\n');
    s.extend(std::iter::repeat('\t').take(level));
    s
}
