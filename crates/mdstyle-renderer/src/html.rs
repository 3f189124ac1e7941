//! HTML serializer for styled node trees.
//!
//! Produces literal HTML markup mirroring the styled tree: one element per
//! node (none for fragments), the rule's class on it, and the rule's
//! container around it. Block-level siblings are separated by a newline.

use std::borrow::Cow;
use std::fmt::Write;

use crate::node::NodeKind;
use crate::style::{ChildPolicy, Element};
use crate::styled::StyledNode;

/// Escape text for use in HTML content and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// URL schemes allowed in `href` and `src`.
const SAFE_SCHEMES: [&str; 7] = ["http", "https", "mailto", "tel", "irc", "ircs", "xmpp"];

/// Return `url` if it is relative or uses a safe scheme, otherwise `""`.
///
/// A colon after the first `/`, `?` or `#` belongs to the path, query or
/// fragment, so such URLs are relative.
#[must_use]
pub fn safe_url(url: &str) -> &str {
    let Some(colon) = url.find(':') else {
        return url;
    };
    let scheme = &url[..colon];
    if scheme.contains(['/', '?', '#'])
        || SAFE_SCHEMES
            .iter()
            .any(|safe| scheme.eq_ignore_ascii_case(safe))
    {
        url
    } else {
        ""
    }
}

/// Serializes a [`StyledNode`] tree to an HTML string.
pub struct HtmlSerializer {
    output: String,
}

impl HtmlSerializer {
    /// Serialize a whole tree.
    #[must_use]
    pub fn serialize(tree: &StyledNode) -> String {
        let mut serializer = Self {
            output: String::with_capacity(4096),
        };
        serializer.node(tree);
        serializer.output
    }

    fn node(&mut self, node: &StyledNode) {
        if let Some(container) = node.rule.container {
            self.open(container.element, Some(container.class), &[]);
        }

        match &node.kind {
            NodeKind::Text(text) | NodeKind::Html(text) => self.text(text),
            NodeKind::SoftBreak => self.output.push('\n'),
            NodeKind::Image { src, title } => {
                let alt = node.plain_text();
                let mut attrs = vec![("src", safe_url(src))];
                if !title.is_empty() {
                    attrs.push(("title", title.as_str()));
                }
                attrs.push(("alt", alt.as_str()));
                self.open(Element::Img, node.rule.class, &attrs);
            }
            NodeKind::TableHead => {
                self.open(Element::Thead, node.rule.class, &[]);
                self.open(Element::Tr, None, &[]);
                self.children(node);
                self.close(Element::Tr);
                self.close(Element::Thead);
            }
            NodeKind::Table => self.table(node),
            kind => self.element(node, kind.element()),
        }

        if let Some(container) = node.rule.container {
            self.close(container.element);
        }
    }

    fn element(&mut self, node: &StyledNode, element: Element) {
        let mut class = node.rule.class.map(Cow::Borrowed);
        let mut attrs: Vec<(&str, Cow<'_, str>)> = Vec::new();

        match &node.kind {
            NodeKind::Link { href, title } => {
                attrs.push(("href", Cow::Borrowed(safe_url(href))));
                if !title.is_empty() {
                    attrs.push(("title", Cow::Borrowed(title)));
                }
            }
            NodeKind::OrderedList { start } if *start != 1 => {
                attrs.push(("start", Cow::Owned(start.to_string())));
            }
            NodeKind::Code {
                language: Some(language),
                ..
            } => {
                let language_class = format!("language-{language}");
                class = Some(match class {
                    Some(rule_class) => Cow::Owned(format!("{rule_class} {language_class}")),
                    None => Cow::Owned(language_class),
                });
            }
            NodeKind::TableCell { alignment, .. } => {
                if let Some(align) = alignment.css() {
                    attrs.push(("style", Cow::Owned(format!("text-align: {align}"))));
                }
            }
            NodeKind::TaskListMarker { checked } => {
                attrs.push(("type", Cow::Borrowed("checkbox")));
                if *checked {
                    attrs.push(("checked", Cow::Borrowed("")));
                }
                attrs.push(("disabled", Cow::Borrowed("")));
            }
            NodeKind::FootnoteDefinition { label } => {
                attrs.push(("id", Cow::Owned(format!("fn-{label}"))));
            }
            _ => {}
        }

        let attrs: Vec<(&str, &str)> = attrs.iter().map(|(k, v)| (*k, v.as_ref())).collect();
        self.open(element, class.as_deref(), &attrs);
        if element.is_void() {
            return;
        }

        match &node.kind {
            NodeKind::FootnoteReference { label } => {
                write!(
                    self.output,
                    r##"<a href="#fn-{}">{}</a>"##,
                    escape_html(label),
                    escape_html(label)
                )
                .unwrap();
            }
            _ if node.rule.children == ChildPolicy::Verbatim => {
                for text in node.leaf_text() {
                    self.text(text);
                }
            }
            _ => self.children(node),
        }
        self.close(element);
    }

    /// Head row in `<thead>`, body rows wrapped in `<tbody>`.
    fn table(&mut self, node: &StyledNode) {
        self.open(Element::Table, node.rule.class, &[]);
        let (head, body): (Vec<_>, Vec<_>) = node
            .children
            .iter()
            .partition(|child| child.kind == NodeKind::TableHead);
        for child in head {
            self.node(child);
        }
        if !body.is_empty() {
            self.output.push_str("<tbody>");
            for child in body {
                self.node(child);
            }
            self.output.push_str("</tbody>");
        }
        self.close(Element::Table);
    }

    fn children(&mut self, node: &StyledNode) {
        let mut previous_block = false;
        for child in &node.children {
            let block = child.kind.is_block();
            if block && previous_block {
                self.output.push('\n');
            }
            previous_block = block;
            self.node(child);
        }
    }

    fn open(&mut self, element: Element, class: Option<&str>, attrs: &[(&str, &str)]) {
        let Some(tag) = element.tag() else {
            return;
        };
        self.output.push('<');
        self.output.push_str(tag);
        if let Some(class) = class {
            write!(self.output, r#" class="{}""#, escape_html(class)).unwrap();
        }
        for (name, value) in attrs {
            if value.is_empty() && matches!(*name, "checked" | "disabled") {
                write!(self.output, " {name}").unwrap();
            } else {
                write!(self.output, r#" {name}="{}""#, escape_html(value)).unwrap();
            }
        }
        self.output.push('>');
    }

    fn close(&mut self, element: Element) {
        if let Some(tag) = element.tag() {
            write!(self.output, "</{tag}>").unwrap();
        }
    }

    fn text(&mut self, text: &str) {
        self.output.push_str(&escape_html(text));
    }
}
