//! Structural document tree built from CommonMark events.
//!
//! The tree is deliberately small: every block or inline element that can
//! contain other elements is a [`Node::Container`], explicit links keep their
//! destination, and leaf text is merged so that bracket notation split across
//! several parser events (`[`, `[`, `id`, `]`, `]`) reads as one string.

use pulldown_cmark::{Event, Options, Parser, Tag};

/// Kind of a container node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Paragraph,
    Heading(u8),
    BlockQuote,
    CodeBlock,
    List,
    Item,
    Emphasis,
    Strong,
    Strikethrough,
    Image,
    Table,
    /// YAML front matter.
    Metadata,
    Other,
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Container {
        kind: ContainerKind,
        children: Vec<Node>,
    },
    /// An explicit `[label](destination)` link.
    Link {
        destination: String,
        title: String,
        children: Vec<Node>,
    },
    Text(String),
    /// Inline code, fenced code or math. Never scanned for references.
    Code(String),
    Html(String),
    Break,
}

impl Node {
    /// Child nodes, empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Container { children, .. } | Node::Link { children, .. } => children,
            _ => &[],
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) | Node::Code(text) => out.push_str(text),
            Node::Break => out.push(' '),
            Node::Html(_) => {}
            Node::Container { children, .. } | Node::Link { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// A parsed note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub children: Vec<Node>,
}

/// Concatenated text of a node sequence, e.g. a link label.
pub fn plain_text(nodes: &[Node]) -> String {
    nodes.iter().map(Node::plain_text).collect()
}

enum Open {
    Root,
    Container(ContainerKind),
    Link { destination: String, title: String },
}

struct Frame {
    open: Open,
    children: Vec<Node>,
}

impl Frame {
    fn new(open: Open) -> Self {
        Self {
            open,
            children: Vec::new(),
        }
    }

    fn in_code(&self) -> bool {
        matches!(self.open, Open::Container(ContainerKind::CodeBlock))
    }

    fn into_node(self) -> Option<Node> {
        match self.open {
            Open::Root => None,
            Open::Container(kind) => Some(Node::Container {
                kind,
                children: self.children,
            }),
            Open::Link { destination, title } => Some(Node::Link {
                destination,
                title,
                children: self.children,
            }),
        }
    }
}

fn parser_options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TASKLISTS);
    opts.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_FOOTNOTES);
    opts
}

fn open_for(tag: Tag<'_>) -> Open {
    let kind = match tag {
        Tag::Link {
            dest_url, title, ..
        } => {
            return Open::Link {
                destination: dest_url.to_string(),
                title: title.to_string(),
            };
        }
        Tag::Paragraph => ContainerKind::Paragraph,
        Tag::Heading { level, .. } => ContainerKind::Heading(level as u8),
        Tag::BlockQuote(_) => ContainerKind::BlockQuote,
        Tag::CodeBlock(_) => ContainerKind::CodeBlock,
        Tag::List(_) => ContainerKind::List,
        Tag::Item => ContainerKind::Item,
        Tag::Emphasis => ContainerKind::Emphasis,
        Tag::Strong => ContainerKind::Strong,
        Tag::Strikethrough => ContainerKind::Strikethrough,
        Tag::Image { .. } => ContainerKind::Image,
        Tag::Table(_) => ContainerKind::Table,
        Tag::MetadataBlock(_) => ContainerKind::Metadata,
        _ => ContainerKind::Other,
    };
    Open::Container(kind)
}

fn push_merged(children: &mut Vec<Node>, node: Node) {
    if let Some(last) = children.last_mut() {
        match (last, &node) {
            (Node::Text(prev), Node::Text(text)) | (Node::Code(prev), Node::Code(text)) => {
                prev.push_str(text);
                return;
            }
            _ => {}
        }
    }
    children.push(node);
}

fn close_frame(stack: &mut Vec<Frame>) {
    if stack.len() < 2 {
        return;
    }
    let node = stack.pop().and_then(Frame::into_node);
    if let (Some(node), Some(parent)) = (node, stack.last_mut()) {
        parent.children.push(node);
    }
}

/// Parse note text into a [`Document`].
pub fn parse_document(content: &str) -> Document {
    let mut stack = vec![Frame::new(Open::Root)];

    for event in Parser::new_ext(content, parser_options()) {
        let leaf = match event {
            Event::Start(tag) => {
                stack.push(Frame::new(open_for(tag)));
                continue;
            }
            Event::End(_) => {
                close_frame(&mut stack);
                continue;
            }
            Event::Text(text) => {
                let in_code = stack.last().is_some_and(Frame::in_code);
                if in_code {
                    Node::Code(text.into_string())
                } else {
                    Node::Text(text.into_string())
                }
            }
            Event::Code(text) | Event::InlineMath(text) | Event::DisplayMath(text) => {
                Node::Code(text.into_string())
            }
            Event::Html(html) | Event::InlineHtml(html) => Node::Html(html.into_string()),
            Event::SoftBreak | Event::HardBreak | Event::Rule => Node::Break,
            _ => continue,
        };

        if let Some(frame) = stack.last_mut() {
            push_merged(&mut frame.children, leaf);
        }
    }

    // Unbalanced events never reach here from pulldown-cmark, but fold any
    // leftovers into their parents rather than dropping them.
    while stack.len() > 1 {
        close_frame(&mut stack);
    }

    Document {
        children: stack.pop().map(|f| f.children).unwrap_or_default(),
    }
}
