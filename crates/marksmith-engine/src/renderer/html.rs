use crate::escape::{escape, escape_link};

use super::{Align, RenderMode, Renderer};

/// Renders to an HTML string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlRenderer {
    /// Escape raw HTML instead of passing it through.
    pub escape: bool,
    /// Self-close void elements (`<br />`, `<hr />`, `<img ... />`).
    pub use_xhtml: bool,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            escape: true,
            use_xhtml: false,
        }
    }
}

impl HtmlRenderer {
    pub fn new(escape: bool, use_xhtml: bool) -> Self {
        Self { escape, use_xhtml }
    }

    fn void_end(&self) -> &'static str {
        if self.use_xhtml { " />" } else { ">" }
    }

    fn title_attr(title: Option<&str>) -> String {
        title
            .map(|t| format!(" title=\"{}\"", escape(t, true, false)))
            .unwrap_or_default()
    }
}

impl Renderer for HtmlRenderer {
    type Output = String;
    type Document = String;

    fn mode(&self) -> RenderMode {
        RenderMode::Html
    }

    fn text(&self, text: &str) -> String {
        escape(text, false, true)
    }

    fn escape(&self, text: &str) -> String {
        escape(text, false, false)
    }

    fn email(&self, address: &str) -> String {
        let address = escape(address, true, false);
        format!("<a href=\"mailto:{address}\">{address}</a>")
    }

    fn link(&self, url: &str, children: Vec<String>, title: Option<&str>) -> String {
        format!(
            "<a href=\"{}\"{}>{}</a>",
            escape_link(url),
            Self::title_attr(title),
            children.concat()
        )
    }

    fn image(&self, src: &str, alt: &str, title: Option<&str>) -> String {
        format!(
            "<img src=\"{}\" alt=\"{}\"{}{}",
            escape_link(src),
            escape(alt, true, false),
            Self::title_attr(title),
            self.void_end()
        )
    }

    fn emphasis(&self, children: Vec<String>, level: u8) -> String {
        let text = children.concat();
        match level {
            1 => format!("<em>{text}</em>"),
            2 => format!("<strong>{text}</strong>"),
            _ => format!("<strong><em>{text}</em></strong>"),
        }
    }

    fn codespan(&self, code: &str) -> String {
        format!("<code>{}</code>", escape(code, false, false))
    }

    fn strikethrough(&self, children: Vec<String>) -> String {
        format!("<del>{}</del>", children.concat())
    }

    fn linebreak(&self) -> String {
        format!("<br{}\n", self.void_end())
    }

    fn inline_html(&self, html: &str) -> String {
        if self.escape {
            escape(html, false, false)
        } else {
            html.to_string()
        }
    }

    fn footnote_ref(&self, _key: &str, index: usize) -> String {
        format!(
            "<sup class=\"footnote-ref\" id=\"fnref-{index}\"><a href=\"#fn-{index}\">{index}</a></sup>"
        )
    }

    fn paragraph(&self, children: Vec<String>) -> String {
        format!("<p>{}</p>\n", children.concat())
    }

    fn block_text(&self, children: Vec<String>) -> String {
        children.concat()
    }

    fn heading(&self, children: Vec<String>, level: u8) -> String {
        format!("<h{level}>{}</h{level}>\n", children.concat())
    }

    fn block_code(&self, code: &str, lang: Option<&str>) -> String {
        let class = lang
            .map(|l| format!(" class=\"language-{}\"", escape(l, true, false)))
            .unwrap_or_default();
        format!("<pre><code{class}>{}</code></pre>\n", escape(code, false, false))
    }

    fn block_quote(&self, children: Vec<String>) -> String {
        format!("<blockquote>\n{}</blockquote>\n", children.concat())
    }

    fn block_html(&self, html: &str) -> String {
        if self.escape {
            format!("<p>{}</p>\n", escape(html, false, false))
        } else {
            format!("{html}\n")
        }
    }

    fn hrule(&self) -> String {
        format!("<hr{}\n", self.void_end())
    }

    fn newline(&self) -> String {
        String::new()
    }

    fn list(&self, items: Vec<String>, ordered: bool, start: Option<u64>) -> String {
        if !ordered {
            return format!("<ul>\n{}</ul>\n", items.concat());
        }
        let start = match start {
            Some(n) if n != 1 => format!(" start=\"{n}\""),
            _ => String::new(),
        };
        format!("<ol{start}>\n{}</ol>\n", items.concat())
    }

    fn list_item(&self, children: Vec<String>) -> String {
        format!("<li>{}</li>\n", children.concat())
    }

    fn table(&self, head: String, body: Vec<String>) -> String {
        let mut html = format!("<table>\n<thead>\n{head}</thead>\n");
        if !body.is_empty() {
            html.push_str(&format!("<tbody>\n{}</tbody>\n", body.concat()));
        }
        html.push_str("</table>\n");
        html
    }

    fn table_row(&self, cells: Vec<String>) -> String {
        format!("<tr>\n{}</tr>\n", cells.concat())
    }

    fn table_cell(&self, children: Vec<String>, align: Option<Align>, is_head: bool) -> String {
        let tag = if is_head { "th" } else { "td" };
        let style = align
            .map(|a| format!(" style=\"text-align:{}\"", a.as_str()))
            .unwrap_or_default();
        format!("<{tag}{style}>{}</{tag}>\n", children.concat())
    }

    fn footnote_item(&self, children: Vec<String>, _key: &str, index: usize) -> String {
        let back = format!("<a href=\"#fnref-{index}\" class=\"footnote\">&#8617;</a>");
        let body = children.concat();
        let body = body.trim_end();
        let body = match body.strip_suffix("</p>") {
            Some(open) => format!("{open}{back}</p>"),
            None => format!("{body}<p>{back}</p>"),
        };
        format!("<li id=\"fn-{index}\">{body}</li>\n")
    }

    fn footnotes(&self, items: Vec<String>) -> String {
        format!(
            "<section class=\"footnotes\">\n<ol>\n{}</ol>\n</section>\n",
            items.concat()
        )
    }

    fn document(&self, children: Vec<String>) -> String {
        children.concat()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1, "<em>x</em>")]
    #[case(2, "<strong>x</strong>")]
    #[case(3, "<strong><em>x</em></strong>")]
    fn emphasis_levels(#[case] level: u8, #[case] expected: &str) {
        let r = HtmlRenderer::default();
        assert_eq!(r.emphasis(vec!["x".into()], level), expected);
    }

    #[test]
    fn xhtml_void_elements() {
        let r = HtmlRenderer::new(true, true);
        assert_eq!(r.hrule(), "<hr />\n");
        assert_eq!(r.linebreak(), "<br />\n");
        assert_eq!(r.image("a.png", "A", None), r#"<img src="a.png" alt="A" />"#);
    }

    #[test]
    fn raw_html_is_escaped_by_default() {
        let r = HtmlRenderer::default();
        assert_eq!(r.inline_html("<b>"), "&lt;b&gt;");
        assert_eq!(r.block_html("<div>"), "<p>&lt;div&gt;</p>\n");
    }

    #[test]
    fn raw_html_passes_through_when_allowed() {
        let r = HtmlRenderer::new(false, false);
        assert_eq!(r.inline_html("<b>"), "<b>");
        assert_eq!(r.block_html("<div>"), "<div>\n");
    }

    #[test]
    fn blocked_link_scheme_has_empty_href() {
        let r = HtmlRenderer::default();
        assert_eq!(
            r.link("javascript:alert(1)", vec!["x".into()], None),
            r#"<a href="">x</a>"#
        );
    }

    #[test]
    fn link_title_is_quote_escaped() {
        let r = HtmlRenderer::default();
        assert_eq!(
            r.link("/u", vec!["x".into()], Some(r#"say "hi""#)),
            r#"<a href="/u" title="say &quot;hi&quot;">x</a>"#
        );
    }

    #[test]
    fn code_block_language_class() {
        let r = HtmlRenderer::default();
        assert_eq!(
            r.block_code("a < b\n", Some("rust")),
            "<pre><code class=\"language-rust\">a &lt; b\n</code></pre>\n"
        );
    }

    #[test]
    fn ordered_list_start_attribute() {
        let r = HtmlRenderer::default();
        assert_eq!(r.list(vec![], true, Some(1)), "<ol>\n</ol>\n");
        assert_eq!(r.list(vec![], true, Some(3)), "<ol start=\"3\">\n</ol>\n");
    }

    #[test]
    fn footnote_back_link_goes_inside_last_paragraph() {
        let r = HtmlRenderer::default();
        assert_eq!(
            r.footnote_item(vec!["<p>note</p>\n".into()], "a", 1),
            "<li id=\"fn-1\"><p>note<a href=\"#fnref-1\" class=\"footnote\">&#8617;</a></p></li>\n"
        );
    }

    #[test]
    fn aligned_cell_has_style() {
        let r = HtmlRenderer::default();
        assert_eq!(
            r.table_cell(vec!["x".into()], Some(Align::Center), false),
            "<td style=\"text-align:center\">x</td>\n"
        );
    }
}
