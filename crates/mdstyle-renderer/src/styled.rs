//! Styled node tree: the parsed tree with a [`StyleRule`] on every node.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::node::{Node, NodeKind};
use crate::style::{StyleRule, style_for};

/// A node annotated with its style decision. Same shape as the [`Node`] tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct StyledNode {
    pub kind: NodeKind,
    pub rule: StyleRule,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<StyledNode>,
}

impl StyledNode {
    /// Style a parsed tree, depth-first, preserving child order.
    #[must_use]
    pub fn from_node(node: Node) -> Self {
        let rule = style_for(node.kind.node_type(), node.kind.style_context());
        Self {
            kind: node.kind,
            rule,
            children: node.children.into_iter().map(Self::from_node).collect(),
        }
    }

    /// Leaf text in document order.
    #[must_use]
    pub fn leaf_text(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(text) = self.kind.text() {
            out.push(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Concatenated leaf text of this subtree.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.leaf_text().concat()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(StyledNode::node_count)
            .sum::<usize>()
    }

    /// Nodes of this subtree in depth-first pre-order.
    pub fn descendants(&self) -> impl Iterator<Item = &StyledNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

impl From<Node> for StyledNode {
    fn from(node: Node) -> Self {
        Self::from_node(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{CodeDisplay, NodeType};
    use crate::style::{ChildPolicy, StyleContext};
    use pretty_assertions::assert_eq;

    fn text(content: &str) -> Node {
        Node::new(NodeKind::Text(content.to_owned()))
    }

    #[test]
    fn test_rules_applied_recursively() {
        let tree = Node::with_children(
            NodeKind::Document,
            vec![Node::with_children(
                NodeKind::Paragraph,
                vec![Node::with_children(
                    NodeKind::Code {
                        display: CodeDisplay::Inline,
                        language: None,
                    },
                    vec![text("x")],
                )],
            )],
        );

        let styled = StyledNode::from_node(tree);
        assert!(styled.rule.is_identity());
        let paragraph = &styled.children[0];
        assert_eq!(
            paragraph.rule,
            style_for(NodeType::Paragraph, StyleContext::NONE)
        );
        let code = &paragraph.children[0];
        assert_eq!(code.rule.class, Some("bg-gray-100 rounded px-1"));
        assert_eq!(code.rule.children, ChildPolicy::Verbatim);
        assert!(code.children[0].rule.is_identity());
    }

    #[test]
    fn test_shape_and_text_preserved() {
        let tree = Node::with_children(
            NodeKind::Document,
            vec![
                Node::with_children(NodeKind::Heading { level: 2 }, vec![text("a")]),
                Node::with_children(
                    NodeKind::Table,
                    vec![Node::with_children(NodeKind::TableRow, vec![text("b")])],
                ),
                text("c"),
            ],
        );
        let expected_count = tree.node_count();
        let expected_text: Vec<String> =
            tree.leaf_text().into_iter().map(str::to_owned).collect();

        let styled = StyledNode::from(tree);
        assert_eq!(styled.node_count(), expected_count);
        assert_eq!(styled.leaf_text(), expected_text);
        assert_eq!(styled.plain_text(), "abc");
    }

    #[test]
    fn test_descendants_pre_order() {
        let tree = Node::with_children(
            NodeKind::Document,
            vec![
                Node::with_children(NodeKind::Strong, vec![text("1")]),
                text("2"),
            ],
        );
        let styled = StyledNode::from_node(tree);
        let kinds: Vec<_> = styled.descendants().map(|n| n.kind.node_type()).collect();
        assert_eq!(
            kinds,
            vec![
                NodeType::Document,
                NodeType::Strong,
                NodeType::Text,
                NodeType::Text
            ]
        );
    }
}
