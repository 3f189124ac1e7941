//! Plain-text rendering of the preview view.
//!
//! One line per styled node, indented by depth. Elements are written as
//! `tag.class.class`, a container as `pre.class > code`, and text leaves as
//! quoted strings.
//!
//! ```text
//! h1.text-4xl.font-bold.mb-4
//!   "Title"
//! p.mb-4
//!   strong
//!     "Bold"
//!   " text"
//! ```

use std::fmt::Write;

use mdstyle_renderer::{Element, NodeKind, StyledNode};

/// Outline of a styled tree.
#[must_use]
pub fn outline(tree: &StyledNode) -> String {
    let mut output = String::new();
    // The document root only groups its children.
    if matches!(tree.kind, NodeKind::Document) {
        for child in &tree.children {
            write_node(&mut output, child, 0);
        }
    } else {
        write_node(&mut output, tree, 0);
    }
    output
}

fn write_node(output: &mut String, node: &StyledNode, depth: usize) {
    let label = match &node.kind {
        NodeKind::Text(text) | NodeKind::Html(text) => format!("{text:?}"),
        NodeKind::SoftBreak => "\"\\n\"".to_owned(),
        kind => element_label(node, kind.element()),
    };

    writeln!(output, "{:indent$}{label}", "", indent = depth * 2).unwrap();
    for child in &node.children {
        write_node(output, child, depth + 1);
    }
}

fn element_label(node: &StyledNode, element: Element) -> String {
    let mut label = String::new();
    if let Some(container) = node.rule.container {
        push_selector(&mut label, container.element, Some(container.class));
        label.push_str(" > ");
    }
    push_selector(&mut label, element, node.rule.class);

    if let NodeKind::Code {
        language: Some(language),
        ..
    } = &node.kind
    {
        write!(label, ".language-{language}").unwrap();
    }
    label
}

fn push_selector(label: &mut String, element: Element, class: Option<&str>) {
    label.push_str(element.tag().unwrap_or("#fragment"));
    for class in class.unwrap_or_default().split_whitespace() {
        label.push('.');
        label.push_str(class);
    }
}
