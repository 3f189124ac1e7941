//! Render pipeline: Markdown text to a styled tree and its HTML.

use pulldown_cmark::{Options, Parser};
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::html::HtmlSerializer;
use crate::node::{Node, NodeKind, TreeBuilder};
use crate::styled::StyledNode;

/// Output of one render pass.
///
/// Both artifacts always come from the same input text.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Rendition {
    /// Styled tree, for the preview.
    pub tree: StyledNode,
    /// Serialized tree, for the code view.
    pub html: String,
}

impl Rendition {
    /// Rendition of the empty document.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            tree: StyledNode::from_node(Node::new(NodeKind::Document)),
            html: String::new(),
        }
    }
}

impl Default for Rendition {
    fn default() -> Self {
        Self::empty()
    }
}

/// Markdown to styled HTML pipeline.
///
/// Stateless apart from parser options: `render` is a pure function of its
/// input, so the same text always yields an identical [`Rendition`].
#[derive(Clone, Copy, Debug)]
pub struct RenderPipeline {
    gfm: bool,
}

impl RenderPipeline {
    /// Create a new pipeline with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self { gfm: true }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    /// - Footnotes (`text[^1]` with `[^1]: note`)
    /// - Definition lists (`Term` followed by `: definition`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    #[must_use]
    pub fn gfm(&self) -> bool {
        self.gfm
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_DEFINITION_LIST
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Create a configured parser for the given markdown text.
    #[must_use]
    pub fn create_parser<'a>(&self, markdown: &'a str) -> Parser<'a> {
        Parser::new_ext(markdown, self.parser_options())
    }

    /// Parse markdown into an unstyled node tree.
    #[must_use]
    pub fn parse(&self, markdown: &str) -> Node {
        TreeBuilder::build(self.create_parser(markdown))
    }

    /// Parse, style and serialize markdown in one pass.
    #[must_use]
    pub fn render(&self, markdown: &str) -> Rendition {
        let tree = StyledNode::from_node(self.parse(markdown));
        let html = HtmlSerializer::serialize(&tree);
        tracing::debug!(
            input_bytes = markdown.len(),
            nodes = tree.node_count(),
            html_bytes = html.len(),
            "Rendered markdown"
        );
        Rendition { tree, html }
    }
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Render markdown with the default pipeline.
///
/// # Example
///
/// ```
/// let rendition = mdstyle_renderer::render("# Title");
/// assert_eq!(
///     rendition.html,
///     r#"<h1 class="text-4xl font-bold mb-4">Title</h1>"#
/// );
/// ```
#[must_use]
pub fn render(markdown: &str) -> Rendition {
    RenderPipeline::new().render(markdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{CodeDisplay, MAX_DEPTH, NodeType};
    use crate::style::ChildPolicy;
    use pretty_assertions::assert_eq;

    const SAMPLES: [&str; 8] = [
        "",
        "# Title",
        "**bold** and *italic*",
        "`inline`",
        "```js\nvar foo = 'bar';\n```",
        "> quote\n>\n> - a\n> - b",
        "| A | B |\n|---|---|\n| 1 | 2 |\n\n- [x] done\n\nnote[^1]\n\n[^1]: footnote",
        "*unclosed **mixed* emphasis ` and <b>html",
    ];

    fn types(tree: &StyledNode) -> Vec<NodeType> {
        tree.descendants().map(|n| n.kind.node_type()).collect()
    }

    #[test]
    fn test_heading_scenario() {
        let rendition = render("# Title");
        assert_eq!(rendition.tree.children.len(), 1);
        let heading = &rendition.tree.children[0];
        assert_eq!(heading.kind, NodeKind::Heading { level: 1 });
        assert_eq!(heading.rule.class, Some("text-4xl font-bold mb-4"));
        assert_eq!(heading.plain_text(), "Title");
        assert_eq!(
            rendition.html,
            r#"<h1 class="text-4xl font-bold mb-4">Title</h1>"#
        );
    }

    #[test]
    fn test_empty_input() {
        let rendition = render("");
        assert!(rendition.tree.children.is_empty());
        assert_eq!(rendition.html, "");
        assert_eq!(rendition, Rendition::empty());
    }

    #[test]
    fn test_emphasis_scenario() {
        let rendition = render("**bold** and *italic*");
        let paragraph = &rendition.tree.children[0];
        assert_eq!(paragraph.rule.class, Some("mb-4"));
        assert_eq!(
            types(paragraph),
            vec![
                NodeType::Paragraph,
                NodeType::Strong,
                NodeType::Text,
                NodeType::Text,
                NodeType::Emphasis,
                NodeType::Text,
            ]
        );
        assert_eq!(paragraph.children[0].plain_text(), "bold");
        assert_eq!(paragraph.children[2].plain_text(), "italic");
        assert_eq!(
            rendition.html,
            r#"<p class="mb-4"><strong>bold</strong> and <em>italic</em></p>"#
        );
    }

    #[test]
    fn test_inline_code_scenario() {
        let rendition = render("`inline`");
        let code = &rendition.tree.children[0].children[0];
        assert_eq!(
            code.kind,
            NodeKind::Code {
                display: CodeDisplay::Inline,
                language: None
            }
        );
        assert_eq!(code.rule.class, Some("bg-gray-100 rounded px-1"));
        assert_eq!(code.rule.container, None);
        assert_eq!(
            rendition.html,
            r#"<p class="mb-4"><code class="bg-gray-100 rounded px-1">inline</code></p>"#
        );
        assert!(!rendition.html.contains("<pre"));
    }

    #[test]
    fn test_fenced_code_scenario() {
        let markdown = "```js\nvar foo = 'bar';\nfunction baz(s) {\n   return foo + ':' + s;\n}\n```";
        let rendition = render(markdown);
        let code = &rendition.tree.children[0];
        assert_eq!(code.rule.class, None);
        assert!(code.rule.container.is_some());
        assert_eq!(code.rule.children, ChildPolicy::Verbatim);
        assert_eq!(
            rendition.html,
            "<pre class=\"bg-gray-100 rounded p-4 mb-4\"><code class=\"language-js\">var foo = &#39;bar&#39;;\nfunction baz(s) {\n   return foo + &#39;:&#39; + s;\n}\n</code></pre>"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let pipeline = RenderPipeline::new();
        for sample in SAMPLES {
            let first = pipeline.render(sample);
            let second = pipeline.render(sample);
            assert_eq!(first, second);
            assert_eq!(first.html.as_bytes(), second.html.as_bytes());
        }
    }

    #[test]
    fn test_styling_preserves_leaf_text() {
        let pipeline = RenderPipeline::new();
        for sample in SAMPLES {
            let parsed = pipeline.parse(sample);
            let rendition = pipeline.render(sample);
            assert_eq!(parsed.leaf_text(), rendition.tree.leaf_text(), "{sample:?}");
            assert_eq!(parsed.node_count(), rendition.tree.node_count());
        }
    }

    #[test]
    fn test_every_node_gets_a_rule() {
        let rendition = render(SAMPLES[6]);
        for node in rendition.tree.descendants() {
            let expected = crate::style::style_for(
                node.kind.node_type(),
                node.kind.style_context(),
            );
            assert_eq!(node.rule, expected);
        }
    }

    #[test]
    fn test_unstyled_constructs_keep_content() {
        let rendition = render(SAMPLES[6]);
        assert!(rendition.html.contains("<table>"));
        assert!(rendition.html.contains("<th>A</th>"));
        assert!(rendition.html.contains("<td>2</td>"));
        assert!(rendition.html.contains(r#"<input type="checkbox" checked disabled>"#));
        assert!(rendition.html.contains("done"));
        assert!(rendition.html.contains(r##"<sup><a href="#fn-1">1</a></sup>"##));
        assert!(rendition.html.contains(r#"<div id="fn-1">"#));
    }

    #[test]
    fn test_footnote_reference_and_definition() {
        let rendition = render("text[^1]\n\n[^1]: note");
        assert!(
            types(&rendition.tree).contains(&NodeType::FootnoteReference),
            "{:?}",
            rendition.html
        );
        assert!(
            rendition
                .html
                .starts_with(r##"<p class="mb-4">text<sup><a href="#fn-1">1</a></sup></p>"##)
        );
        assert!(rendition.html.contains(r#"<div id="fn-1">"#));
        assert!(rendition.html.contains("note"));
        assert!(!rendition.html.contains("href=\"note\""));
    }

    #[test]
    fn test_footnotes_gated_by_gfm() {
        let plain = RenderPipeline::new()
            .with_gfm(false)
            .render("text[^1]\n\n[^1]: note");
        assert!(!types(&plain.tree).contains(&NodeType::FootnoteReference));
        assert!(!plain.html.contains("<sup>"));
    }

    #[test]
    fn test_definition_list() {
        let rendition = render("Term\n: Definition");
        let list = &rendition.tree.children[0];
        assert_eq!(list.kind, NodeKind::DefinitionList);
        assert!(list.rule.is_identity());
        assert_eq!(
            types(list)
                .into_iter()
                .filter(|t| *t == NodeType::DefinitionListDefinition)
                .count(),
            1
        );
        assert_eq!(list.plain_text(), "TermDefinition");
        assert!(rendition.html.starts_with("<dl>"));
        assert!(rendition.html.contains("<dt>Term</dt>"));
        assert!(rendition.html.contains("<dd>"));
        assert!(rendition.html.ends_with("</dl>"));
    }

    #[test]
    fn test_dollar_signs_stay_literal() {
        let rendition = render("$x$ costs $5");
        assert_eq!(rendition.tree.plain_text(), "$x$ costs $5");
    }

    #[test]
    fn test_deeply_nested_input_renders() {
        let rendition = render(&(">".repeat(50_000) + " x"));
        assert_eq!(rendition.tree.plain_text(), "x");
        assert!(rendition.html.starts_with("<blockquote"));
        assert!(rendition.html.contains("x</blockquote>"));
        assert_eq!(rendition.html.matches("<blockquote").count(), MAX_DEPTH);
    }

    #[test]
    fn test_malformed_input_renders() {
        let rendition = render(SAMPLES[7]);
        assert!(rendition.html.starts_with(r#"<p class="mb-4">"#));
        assert!(rendition.html.contains("&lt;b&gt;html"));
    }

    #[test]
    fn test_list_and_blockquote_styles() {
        let rendition = render("> quote\n\n1. one\n2. two\n\n- x");
        assert!(
            rendition
                .html
                .contains(r#"<blockquote class="border-l-4 border-gray-300 pl-4 italic mb-4">"#)
        );
        assert!(
            rendition
                .html
                .contains(r#"<ol class="list-decimal list-inside mb-4"><li class="mb-1">one</li>"#)
        );
        assert!(
            rendition
                .html
                .contains(r#"<ul class="list-disc list-inside mb-4"><li class="mb-1">x</li></ul>"#)
        );
    }

    #[test]
    fn test_link_style() {
        let rendition = render("[Link](https://example.com)");
        assert_eq!(
            rendition.html,
            r#"<p class="mb-4"><a class="text-blue-500 hover:underline" href="https://example.com">Link</a></p>"#
        );
    }

    #[test]
    fn test_script_urls_are_blanked() {
        let rendition = render("[click](javascript:alert(1)) ![x](vbscript:run)");
        assert_eq!(
            rendition.html,
            r#"<p class="mb-4"><a class="text-blue-500 hover:underline" href="">click</a> <img src="" alt="x"></p>"#
        );
    }

    #[test]
    fn test_strikethrough_gated_by_gfm() {
        let gfm = RenderPipeline::new().render("~~gone~~");
        assert!(gfm.html.contains("<del>gone</del>"));

        let plain = RenderPipeline::new().with_gfm(false).render("~~gone~~");
        assert!(!plain.html.contains("<del>"));
    }

    #[test]
    fn test_parser_options() {
        let options = RenderPipeline::new().parser_options();
        assert!(options.contains(Options::ENABLE_TABLES));
        assert!(options.contains(Options::ENABLE_TASKLISTS));
        assert!(options.contains(Options::ENABLE_FOOTNOTES));
        assert!(!options.contains(Options::ENABLE_MATH));
        assert!(RenderPipeline::new().with_gfm(false).parser_options().is_empty());
    }
}
