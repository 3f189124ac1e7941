//! Node Style Registry.
//!
//! A single exhaustive table from [`NodeType`] to [`StyleRule`]. The registry
//! is total: [`style_for`] answers for every node type, falling back to
//! [`StyleRule::IDENTITY`] for types without an explicit entry.
//!
//! Classes are Tailwind CSS utilities, so the generated HTML renders styled
//! in any page that ships the Tailwind stylesheet.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::node::{CodeDisplay, NodeType};

const HEADING_CLASSES: [&str; 6] = [
    "text-4xl font-bold mb-4",
    "text-3xl font-bold mb-3",
    "text-2xl font-bold mb-2",
    "text-xl font-bold mb-2",
    "text-lg font-bold mb-1",
    "text-base font-bold mb-1",
];
const PARAGRAPH_CLASS: &str = "mb-4";
const UNORDERED_LIST_CLASS: &str = "list-disc list-inside mb-4";
const ORDERED_LIST_CLASS: &str = "list-decimal list-inside mb-4";
const LIST_ITEM_CLASS: &str = "mb-1";
const LINK_CLASS: &str = "text-blue-500 hover:underline";
const BLOCKQUOTE_CLASS: &str = "border-l-4 border-gray-300 pl-4 italic mb-4";
const INLINE_CODE_CLASS: &str = "bg-gray-100 rounded px-1";
const CODE_BLOCK_CLASS: &str = "bg-gray-100 rounded p-4 mb-4";

/// HTML element emitted for a node or a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "lowercase"))]
pub enum Element {
    /// No element of its own: text, breaks and the document root.
    Fragment,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    P,
    Ul,
    Ol,
    Li,
    A,
    Blockquote,
    Pre,
    Code,
    Em,
    Strong,
    Del,
    Sup,
    Hr,
    Br,
    Img,
    Input,
    Table,
    Thead,
    Tr,
    Th,
    Td,
    Div,
    Dl,
    Dt,
    Dd,
}

impl Element {
    /// Tag name, or `None` for [`Element::Fragment`].
    #[must_use]
    pub fn tag(self) -> Option<&'static str> {
        let tag = match self {
            Self::Fragment => return None,
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
            Self::P => "p",
            Self::Ul => "ul",
            Self::Ol => "ol",
            Self::Li => "li",
            Self::A => "a",
            Self::Blockquote => "blockquote",
            Self::Pre => "pre",
            Self::Code => "code",
            Self::Em => "em",
            Self::Strong => "strong",
            Self::Del => "del",
            Self::Sup => "sup",
            Self::Hr => "hr",
            Self::Br => "br",
            Self::Img => "img",
            Self::Input => "input",
            Self::Table => "table",
            Self::Thead => "thead",
            Self::Tr => "tr",
            Self::Th => "th",
            Self::Td => "td",
            Self::Div => "div",
            Self::Dl => "dl",
            Self::Dt => "dt",
            Self::Dd => "dd",
        };
        Some(tag)
    }

    /// Void elements have no closing tag and no content.
    #[must_use]
    pub fn is_void(self) -> bool {
        matches!(self, Self::Hr | Self::Br | Self::Img | Self::Input)
    }

    /// Heading element for a level in `1..=6`.
    #[must_use]
    pub fn heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            4 => Some(Self::H4),
            5 => Some(Self::H5),
            6 => Some(Self::H6),
            _ => None,
        }
    }
}

/// Extra element wrapped around a node's own element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Container {
    pub element: Element,
    pub class: &'static str,
}

/// How a node's children are emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "snake_case"))]
pub enum ChildPolicy {
    /// Children are styled and emitted in order.
    #[default]
    PassThrough,
    /// Children are literal text, emitted exactly as supplied.
    Verbatim,
}

/// Rendering decision for one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct StyleRule {
    /// Class attribute added to the node's own element.
    pub class: Option<&'static str>,
    /// Element wrapped around the node's own element.
    pub container: Option<Container>,
    pub children: ChildPolicy,
}

impl StyleRule {
    /// No class, no container, children passed through.
    pub const IDENTITY: Self = Self {
        class: None,
        container: None,
        children: ChildPolicy::PassThrough,
    };

    const fn styled(class: &'static str) -> Self {
        Self {
            class: Some(class),
            container: None,
            children: ChildPolicy::PassThrough,
        }
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for StyleRule {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Disambiguating context for a style lookup.
///
/// Only code nodes need one; every other node type is context-free.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StyleContext {
    pub code: Option<CodeDisplay>,
}

impl StyleContext {
    pub const NONE: Self = Self { code: None };

    #[must_use]
    pub const fn code(display: CodeDisplay) -> Self {
        Self {
            code: Some(display),
        }
    }
}

/// Explicit registry entry for a node type, if it has one.
///
/// A code node looked up without a display context is treated as a block.
#[must_use]
pub fn lookup(node_type: NodeType, context: StyleContext) -> Option<StyleRule> {
    let rule = match node_type {
        NodeType::Heading(level @ 1..=6) => {
            StyleRule::styled(HEADING_CLASSES[usize::from(level - 1)])
        }
        NodeType::Paragraph => StyleRule::styled(PARAGRAPH_CLASS),
        NodeType::UnorderedList => StyleRule::styled(UNORDERED_LIST_CLASS),
        NodeType::OrderedList => StyleRule::styled(ORDERED_LIST_CLASS),
        NodeType::ListItem => StyleRule::styled(LIST_ITEM_CLASS),
        NodeType::Link => StyleRule::styled(LINK_CLASS),
        NodeType::BlockQuote => StyleRule::styled(BLOCKQUOTE_CLASS),
        NodeType::Code => match context.code.unwrap_or(CodeDisplay::Block) {
            CodeDisplay::Inline => StyleRule {
                class: Some(INLINE_CODE_CLASS),
                container: None,
                children: ChildPolicy::Verbatim,
            },
            CodeDisplay::Block => StyleRule {
                class: None,
                container: Some(Container {
                    element: Element::Pre,
                    class: CODE_BLOCK_CLASS,
                }),
                children: ChildPolicy::Verbatim,
            },
        },
        NodeType::Heading(_)
        | NodeType::Document
        | NodeType::Emphasis
        | NodeType::Strong
        | NodeType::Strikethrough
        | NodeType::Text
        | NodeType::SoftBreak
        | NodeType::HardBreak
        | NodeType::ThematicBreak
        | NodeType::Image
        | NodeType::Html
        | NodeType::Table
        | NodeType::TableHead
        | NodeType::TableRow
        | NodeType::TableCell
        | NodeType::TaskListMarker
        | NodeType::FootnoteDefinition
        | NodeType::FootnoteReference
        | NodeType::DefinitionList
        | NodeType::DefinitionListTitle
        | NodeType::DefinitionListDefinition => return None,
    };
    Some(rule)
}

/// Style rule for a node type. Never fails.
#[must_use]
pub fn style_for(node_type: NodeType, context: StyleContext) -> StyleRule {
    lookup(node_type, context).unwrap_or_else(|| {
        tracing::trace!(?node_type, "No style rule, using identity");
        StyleRule::IDENTITY
    })
}
