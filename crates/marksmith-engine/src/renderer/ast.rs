use serde::Serialize;

use super::{Align, RenderMode, Renderer};

/// One node of the syntax tree. Serializes with a `"type"` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Text {
        text: String,
    },
    Link {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        children: Vec<Node>,
    },
    Image {
        src: String,
        alt: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    Emphasis {
        level: u8,
        children: Vec<Node>,
    },
    Codespan {
        text: String,
    },
    Strikethrough {
        children: Vec<Node>,
    },
    Linebreak,
    InlineHtml {
        html: String,
    },
    FootnoteRef {
        key: String,
        index: usize,
    },
    Paragraph {
        children: Vec<Node>,
    },
    BlockText {
        children: Vec<Node>,
    },
    Heading {
        level: u8,
        children: Vec<Node>,
    },
    BlockCode {
        code: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
    },
    BlockQuote {
        children: Vec<Node>,
    },
    BlockHtml {
        html: String,
    },
    Hrule,
    Newline,
    List {
        ordered: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        start: Option<u64>,
        children: Vec<Node>,
    },
    ListItem {
        children: Vec<Node>,
    },
    Table {
        head: Box<Node>,
        body: Vec<Node>,
    },
    TableRow {
        children: Vec<Node>,
    },
    TableCell {
        #[serde(skip_serializing_if = "Option::is_none")]
        align: Option<Align>,
        is_head: bool,
        children: Vec<Node>,
    },
    FootnoteItem {
        key: String,
        index: usize,
        children: Vec<Node>,
    },
    Footnotes {
        children: Vec<Node>,
    },
}

/// Builds a [`Node`] tree. Text is kept unescaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AstRenderer;

impl Renderer for AstRenderer {
    type Output = Node;
    type Document = Vec<Node>;

    fn mode(&self) -> RenderMode {
        RenderMode::Tree
    }

    fn text(&self, text: &str) -> Node {
        Node::Text {
            text: text.to_string(),
        }
    }

    fn escape(&self, text: &str) -> Node {
        self.text(text)
    }

    fn email(&self, address: &str) -> Node {
        Node::Link {
            url: format!("mailto:{address}"),
            title: None,
            children: vec![self.text(address)],
        }
    }

    fn link(&self, url: &str, children: Vec<Node>, title: Option<&str>) -> Node {
        Node::Link {
            url: url.to_string(),
            title: title.map(str::to_string),
            children,
        }
    }

    fn image(&self, src: &str, alt: &str, title: Option<&str>) -> Node {
        Node::Image {
            src: src.to_string(),
            alt: alt.to_string(),
            title: title.map(str::to_string),
        }
    }

    fn emphasis(&self, children: Vec<Node>, level: u8) -> Node {
        Node::Emphasis { level, children }
    }

    fn codespan(&self, code: &str) -> Node {
        Node::Codespan {
            text: code.to_string(),
        }
    }

    fn strikethrough(&self, children: Vec<Node>) -> Node {
        Node::Strikethrough { children }
    }

    fn linebreak(&self) -> Node {
        Node::Linebreak
    }

    fn inline_html(&self, html: &str) -> Node {
        Node::InlineHtml {
            html: html.to_string(),
        }
    }

    fn footnote_ref(&self, key: &str, index: usize) -> Node {
        Node::FootnoteRef {
            key: key.to_string(),
            index,
        }
    }

    fn paragraph(&self, children: Vec<Node>) -> Node {
        Node::Paragraph { children }
    }

    fn block_text(&self, children: Vec<Node>) -> Node {
        Node::BlockText { children }
    }

    fn heading(&self, children: Vec<Node>, level: u8) -> Node {
        Node::Heading { level, children }
    }

    fn block_code(&self, code: &str, lang: Option<&str>) -> Node {
        Node::BlockCode {
            code: code.to_string(),
            lang: lang.map(str::to_string),
        }
    }

    fn block_quote(&self, children: Vec<Node>) -> Node {
        Node::BlockQuote { children }
    }

    fn block_html(&self, html: &str) -> Node {
        Node::BlockHtml {
            html: html.to_string(),
        }
    }

    fn hrule(&self) -> Node {
        Node::Hrule
    }

    fn newline(&self) -> Node {
        Node::Newline
    }

    fn list(&self, items: Vec<Node>, ordered: bool, start: Option<u64>) -> Node {
        Node::List {
            ordered,
            start,
            children: items,
        }
    }

    fn list_item(&self, children: Vec<Node>) -> Node {
        Node::ListItem { children }
    }

    fn table(&self, head: Node, body: Vec<Node>) -> Node {
        Node::Table {
            head: Box::new(head),
            body,
        }
    }

    fn table_row(&self, cells: Vec<Node>) -> Node {
        Node::TableRow { children: cells }
    }

    fn table_cell(&self, children: Vec<Node>, align: Option<Align>, is_head: bool) -> Node {
        Node::TableCell {
            align,
            is_head,
            children,
        }
    }

    fn footnote_item(&self, children: Vec<Node>, key: &str, index: usize) -> Node {
        Node::FootnoteItem {
            key: key.to_string(),
            index,
            children,
        }
    }

    fn footnotes(&self, items: Vec<Node>) -> Node {
        Node::Footnotes { children: items }
    }

    fn document(&self, children: Vec<Node>) -> Vec<Node> {
        children
    }
}
