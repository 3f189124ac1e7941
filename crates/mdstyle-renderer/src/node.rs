//! Markdown node tree.
//!
//! pulldown-cmark produces a flat stream of start/end events. [`TreeBuilder`]
//! folds that stream into an owned tree of [`Node`]s so styling can be a
//! plain depth-first walk.

use pulldown_cmark::{Alignment, Event, Tag, TagEnd};
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::style::{Element, StyleContext};
use crate::util::{cell_alignment, code_language, heading_level_to_num};

/// Whether a code node is an inline span or a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "snake_case"))]
pub enum CodeDisplay {
    Inline,
    Block,
}

/// Horizontal alignment of a table cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "snake_case"))]
pub enum CellAlignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl CellAlignment {
    /// CSS `text-align` value, if any.
    #[must_use]
    pub fn css(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Left => Some("left"),
            Self::Center => Some("center"),
            Self::Right => Some("right"),
        }
    }
}

/// Node type tag without payload. The domain of the style registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "snake_case"))]
pub enum NodeType {
    Document,
    Heading(u8),
    Paragraph,
    UnorderedList,
    OrderedList,
    ListItem,
    Link,
    BlockQuote,
    Code,
    Emphasis,
    Strong,
    Strikethrough,
    Text,
    SoftBreak,
    HardBreak,
    ThematicBreak,
    Image,
    Html,
    Table,
    TableHead,
    TableRow,
    TableCell,
    TaskListMarker,
    FootnoteDefinition,
    FootnoteReference,
    DefinitionList,
    DefinitionListTitle,
    DefinitionListDefinition,
}

/// Node type with its payload.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "snake_case"))]
pub enum NodeKind {
    Document,
    Heading {
        level: u8,
    },
    Paragraph,
    UnorderedList,
    OrderedList {
        start: u64,
    },
    ListItem,
    Link {
        href: String,
        title: String,
    },
    BlockQuote,
    Code {
        display: CodeDisplay,
        language: Option<String>,
    },
    Emphasis,
    Strong,
    Strikethrough,
    Text(String),
    SoftBreak,
    HardBreak,
    ThematicBreak,
    /// Alt text is carried by the children.
    Image {
        src: String,
        title: String,
    },
    /// Raw HTML from the source.
    Html(String),
    Table,
    TableHead,
    TableRow,
    TableCell {
        header: bool,
        alignment: CellAlignment,
    },
    TaskListMarker {
        checked: bool,
    },
    FootnoteDefinition {
        label: String,
    },
    FootnoteReference {
        label: String,
    },
    DefinitionList,
    DefinitionListTitle,
    DefinitionListDefinition,
}

impl NodeKind {
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Document => NodeType::Document,
            Self::Heading { level } => NodeType::Heading(*level),
            Self::Paragraph => NodeType::Paragraph,
            Self::UnorderedList => NodeType::UnorderedList,
            Self::OrderedList { .. } => NodeType::OrderedList,
            Self::ListItem => NodeType::ListItem,
            Self::Link { .. } => NodeType::Link,
            Self::BlockQuote => NodeType::BlockQuote,
            Self::Code { .. } => NodeType::Code,
            Self::Emphasis => NodeType::Emphasis,
            Self::Strong => NodeType::Strong,
            Self::Strikethrough => NodeType::Strikethrough,
            Self::Text(_) => NodeType::Text,
            Self::SoftBreak => NodeType::SoftBreak,
            Self::HardBreak => NodeType::HardBreak,
            Self::ThematicBreak => NodeType::ThematicBreak,
            Self::Image { .. } => NodeType::Image,
            Self::Html(_) => NodeType::Html,
            Self::Table => NodeType::Table,
            Self::TableHead => NodeType::TableHead,
            Self::TableRow => NodeType::TableRow,
            Self::TableCell { .. } => NodeType::TableCell,
            Self::TaskListMarker { .. } => NodeType::TaskListMarker,
            Self::FootnoteDefinition { .. } => NodeType::FootnoteDefinition,
            Self::FootnoteReference { .. } => NodeType::FootnoteReference,
            Self::DefinitionList => NodeType::DefinitionList,
            Self::DefinitionListTitle => NodeType::DefinitionListTitle,
            Self::DefinitionListDefinition => NodeType::DefinitionListDefinition,
        }
    }

    /// Context the style registry needs to disambiguate this node.
    #[must_use]
    pub fn style_context(&self) -> StyleContext {
        match self {
            Self::Code { display, .. } => StyleContext::code(*display),
            _ => StyleContext::NONE,
        }
    }

    /// The element this node renders as before any styling.
    #[must_use]
    pub fn element(&self) -> Element {
        match self {
            Self::Heading { level } => Element::heading(*level).unwrap_or(Element::Fragment),
            Self::Paragraph => Element::P,
            Self::UnorderedList => Element::Ul,
            Self::OrderedList { .. } => Element::Ol,
            Self::ListItem => Element::Li,
            Self::Link { .. } => Element::A,
            Self::BlockQuote => Element::Blockquote,
            Self::Code { .. } => Element::Code,
            Self::Emphasis => Element::Em,
            Self::Strong => Element::Strong,
            Self::Strikethrough => Element::Del,
            Self::FootnoteReference { .. } => Element::Sup,
            Self::HardBreak => Element::Br,
            Self::ThematicBreak => Element::Hr,
            Self::Image { .. } => Element::Img,
            Self::Table => Element::Table,
            Self::TableHead => Element::Thead,
            Self::TableRow => Element::Tr,
            Self::TableCell { header: true, .. } => Element::Th,
            Self::TableCell { header: false, .. } => Element::Td,
            Self::TaskListMarker { .. } => Element::Input,
            Self::FootnoteDefinition { .. } => Element::Div,
            Self::DefinitionList => Element::Dl,
            Self::DefinitionListTitle => Element::Dt,
            Self::DefinitionListDefinition => Element::Dd,
            Self::Document | Self::Text(_) | Self::SoftBreak | Self::Html(_) => {
                Element::Fragment
            }
        }
    }

    /// Block-level nodes are separated by a newline in serialized output.
    #[must_use]
    pub fn is_block(&self) -> bool {
        match self {
            Self::Code { display, .. } => *display == CodeDisplay::Block,
            Self::Heading { .. }
            | Self::Paragraph
            | Self::UnorderedList
            | Self::OrderedList { .. }
            | Self::ListItem
            | Self::BlockQuote
            | Self::ThematicBreak
            | Self::Table
            | Self::TableHead
            | Self::TableRow
            | Self::FootnoteDefinition { .. }
            | Self::DefinitionList
            | Self::DefinitionListTitle
            | Self::DefinitionListDefinition => true,
            _ => false,
        }
    }

    /// Literal text carried by a leaf, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) | Self::Html(text) => Some(text),
            _ => None,
        }
    }
}

/// A node in the parsed Markdown tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Node {
    pub kind: NodeKind,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<Node>,
}

impl Node {
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(kind: NodeKind, children: Vec<Node>) -> Self {
        Self { kind, children }
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

    /// Total number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }
}

/// Deepest element nesting kept in the tree.
///
/// Elements opened below this depth are flattened: their content is appended
/// to the deepest kept element. Every later pass over the tree recurses per
/// level, so this bounds their stack use.
pub const MAX_DEPTH: usize = 128;

/// An open element waiting for its end event.
struct Frame {
    kind: NodeKind,
    children: Vec<Node>,
}

/// Table bookkeeping needed to tag cells with header flag and alignment.
#[derive(Default)]
struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    cell_index: usize,
}

/// Folds pulldown-cmark events into a [`Node`] tree.
///
/// Tolerant of unbalanced streams: an end event with no open element is
/// ignored, and elements still open at [`finish`](Self::finish) are closed.
/// Nesting is capped at [`MAX_DEPTH`].
pub struct TreeBuilder {
    stack: Vec<Frame>,
    table: TableState,
    /// Elements opened past `MAX_DEPTH` and not yet closed.
    flattened: usize,
}

impl TreeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: vec![Frame {
                kind: NodeKind::Document,
                children: Vec::new(),
            }],
            table: TableState::default(),
            flattened: 0,
        }
    }

    /// Build a tree from a complete event stream.
    pub fn build<'a, I>(events: I) -> Node
    where
        I: IntoIterator<Item = Event<'a>>,
    {
        let mut builder = Self::new();
        for event in events {
            builder.push_event(event);
        }
        builder.finish()
    }

    pub fn push_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                self.open(NodeKind::Code {
                    display: CodeDisplay::Inline,
                    language: None,
                });
                self.text(&code);
                self.close();
            }
            Event::Html(html) | Event::InlineHtml(html) => self.html(&html),
            // Math parsing is never enabled; keep the source as written.
            Event::InlineMath(source) => self.text(&format!("${source}$")),
            Event::DisplayMath(source) => self.text(&format!("$${source}$$")),
            Event::SoftBreak => self.leaf(NodeKind::SoftBreak),
            Event::HardBreak => self.leaf(NodeKind::HardBreak),
            Event::Rule => self.leaf(NodeKind::ThematicBreak),
            Event::TaskListMarker(checked) => self.leaf(NodeKind::TaskListMarker { checked }),
            Event::FootnoteReference(label) => self.leaf(NodeKind::FootnoteReference {
                label: label.into_string(),
            }),
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        let kind = match tag {
            Tag::Paragraph => NodeKind::Paragraph,
            Tag::Heading { level, .. } => NodeKind::Heading {
                level: heading_level_to_num(level),
            },
            // GFM alerts (`> [!NOTE]`) are styled as plain blockquotes.
            Tag::BlockQuote(_) => NodeKind::BlockQuote,
            Tag::CodeBlock(kind) => NodeKind::Code {
                display: CodeDisplay::Block,
                language: code_language(&kind),
            },
            Tag::List(Some(start)) => NodeKind::OrderedList { start },
            Tag::List(None) => NodeKind::UnorderedList,
            Tag::Item => NodeKind::ListItem,
            Tag::FootnoteDefinition(label) => NodeKind::FootnoteDefinition {
                label: label.into_string(),
            },
            Tag::DefinitionList => NodeKind::DefinitionList,
            Tag::DefinitionListTitle => NodeKind::DefinitionListTitle,
            Tag::DefinitionListDefinition => NodeKind::DefinitionListDefinition,
            Tag::Table(alignments) => {
                self.table = TableState {
                    alignments,
                    ..TableState::default()
                };
                NodeKind::Table
            }
            Tag::TableHead => {
                self.table.in_head = true;
                self.table.cell_index = 0;
                NodeKind::TableHead
            }
            Tag::TableRow => {
                self.table.cell_index = 0;
                NodeKind::TableRow
            }
            Tag::TableCell => {
                let alignment = self
                    .table
                    .alignments
                    .get(self.table.cell_index)
                    .copied()
                    .map(cell_alignment)
                    .unwrap_or_default();
                self.table.cell_index += 1;
                NodeKind::TableCell {
                    header: self.table.in_head,
                    alignment,
                }
            }
            Tag::Emphasis => NodeKind::Emphasis,
            Tag::Strong => NodeKind::Strong,
            Tag::Strikethrough => NodeKind::Strikethrough,
            Tag::Link {
                dest_url, title, ..
            } => NodeKind::Link {
                href: dest_url.into_string(),
                title: title.into_string(),
            },
            Tag::Image {
                dest_url, title, ..
            } => NodeKind::Image {
                src: dest_url.into_string(),
                title: title.into_string(),
            },
            // Transparent: content lands in the enclosing node.
            Tag::HtmlBlock | Tag::MetadataBlock(_) | Tag::Superscript | Tag::Subscript => return,
        };
        self.open(kind);
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::HtmlBlock
            | TagEnd::MetadataBlock(_)
            | TagEnd::Superscript
            | TagEnd::Subscript => return,
            TagEnd::TableHead => self.table.in_head = false,
            _ => {}
        }
        self.close();
    }

    fn open(&mut self, kind: NodeKind) {
        // The stack also holds the document root.
        if self.stack.len() > MAX_DEPTH {
            if self.flattened == 0 {
                tracing::debug!(max_depth = MAX_DEPTH, "Flattening deeply nested elements");
            }
            self.flattened += 1;
            return;
        }
        self.stack.push(Frame {
            kind,
            children: Vec::new(),
        });
    }

    fn close(&mut self) {
        if self.flattened > 0 {
            self.flattened -= 1;
            return;
        }
        if self.stack.len() < 2 {
            tracing::trace!("Ignoring end event without an open element");
            return;
        }
        if let Some(frame) = self.stack.pop() {
            self.append(Node::with_children(frame.kind, frame.children));
        }
    }

    fn leaf(&mut self, kind: NodeKind) {
        self.append(Node::new(kind));
    }

    fn append(&mut self, node: Node) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        }
    }

    /// Append text, merging with a directly preceding text leaf.
    fn text(&mut self, text: &str) {
        if let Some(parent) = self.stack.last_mut()
            && let Some(Node {
                kind: NodeKind::Text(last),
                ..
            }) = parent.children.last_mut()
        {
            last.push_str(text);
            return;
        }
        self.leaf(NodeKind::Text(text.to_owned()));
    }

    /// Append raw HTML, merging consecutive chunks of one HTML block.
    fn html(&mut self, html: &str) {
        if let Some(parent) = self.stack.last_mut()
            && let Some(Node {
                kind: NodeKind::Html(last),
                ..
            }) = parent.children.last_mut()
        {
            last.push_str(html);
            return;
        }
        self.leaf(NodeKind::Html(html.to_owned()));
    }

    /// Close any elements still open and return the document root.
    #[must_use]
    pub fn finish(mut self) -> Node {
        while self.stack.len() > 1 {
            self.close();
        }
        match self.stack.pop() {
            Some(root) => Node::with_children(root.kind, root.children),
            None => Node::new(NodeKind::Document),
        }
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
