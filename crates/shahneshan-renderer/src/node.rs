//! Document tree produced by the scanner and consumed by the HTML renderer.
//!
//! Every construct is a variant of [`Node`] carrying exactly the attributes
//! that construct supports. Container variants hold an ordered list of
//! [`Content`] items: either child nodes or text fragments that were already
//! inline-formatted at scan time.

/// A single item in a node's content sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Content {
    /// A nested node.
    Node(Node),
    /// Inline-formatted HTML fragment, emitted verbatim by the renderer.
    Text(String),
}

impl From<Node> for Content {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Marker kind of a list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListKind {
    /// `- item` / `* item`
    Unordered,
    /// `1. item`, with any Unicode digits.
    Ordered,
}

impl ListKind {
    /// HTML tag name for the list.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Unordered => "ul",
            Self::Ordered => "ol",
        }
    }
}

/// Column alignment parsed from a table alignment row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Value of the HTML `align` attribute.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Alert callout kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlertKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AlertKind {
    /// Lowercase English name, used as CSS class and node type name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Tip => "tip",
            Self::Important => "important",
            Self::Warning => "warning",
            Self::Caution => "caution",
        }
    }

    /// Persian title shown at the top of the callout.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Note => "توجه",
            Self::Tip => "نکته",
            Self::Important => "مهم",
            Self::Warning => "هشدار",
            Self::Caution => "احتیاط",
        }
    }

    /// Parse the English name produced by [`name`](Self::name).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "note" => Some(Self::Note),
            "tip" => Some(Self::Tip),
            "important" => Some(Self::Important),
            "warning" => Some(Self::Warning),
            "caution" => Some(Self::Caution),
            _ => None,
        }
    }
}

/// Resolved kind of a `...keyword` custom block.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CustomKind {
    /// Poetry: each line is a row of ` -- ` separated stanza cells.
    Poetry,
    /// One of the alert callouts; the body is scanned as block markup.
    Alert(AlertKind),
    /// Unrecognized keyword, kept literally.
    Other(String),
}

impl CustomKind {
    /// Class name emitted on the wrapping `div`.
    #[must_use]
    pub fn class_name(&self) -> &str {
        match self {
            Self::Poetry => "poet",
            Self::Alert(kind) => kind.name(),
            Self::Other(keyword) => keyword,
        }
    }
}

/// A node of the document tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    Heading {
        /// 1 to 6.
        level: u8,
        /// Markup-free heading text used as the slug source.
        raw: Option<String>,
        content: Vec<Content>,
    },
    Paragraph {
        content: Vec<Content>,
    },
    Blockquote {
        content: Vec<Content>,
    },
    List {
        kind: ListKind,
        is_rtl: bool,
        content: Vec<Content>,
    },
    ListItem {
        is_rtl: bool,
        content: Vec<Content>,
    },
    TaskItem {
        checked: bool,
        is_rtl: bool,
        content: Vec<Content>,
    },
    CodeBlock {
        /// Empty when the fence has no info string.
        lang: String,
        /// Raw source lines, escaped only at render time.
        lines: Vec<String>,
    },
    CustomBlock {
        kind: CustomKind,
        content: Vec<Content>,
    },
    PoetRow {
        content: Vec<Content>,
    },
    PoetCell {
        content: Vec<Content>,
    },
    Alert {
        kind: AlertKind,
        content: Vec<Content>,
    },
    /// A raw line inside a custom block with an unrecognized keyword.
    ///
    /// The renderer has no markup for these and emits nothing.
    Nested {
        kind: String,
        line: String,
    },
    ThematicBreak,
    Table {
        content: Vec<Content>,
    },
    TableRow {
        content: Vec<Content>,
    },
    TableHeaderCell {
        align: Option<Alignment>,
        content: Vec<Content>,
    },
    TableCell {
        align: Option<Alignment>,
        content: Vec<Content>,
    },
    Image {
        src: String,
        alt: String,
    },
    /// Raw HTML passthrough.
    Html {
        html: String,
    },
    Footnotes {
        content: Vec<Content>,
    },
    Footnote {
        reference: String,
        content: Vec<Content>,
    },
}

impl Node {
    /// Build a paragraph holding one inline-formatted fragment.
    #[must_use]
    pub fn paragraph(html: impl Into<String>) -> Self {
        Self::Paragraph {
            content: vec![Content::Text(html.into())],
        }
    }

    /// Type name of the node as used in the document model (`header`, `ul`, `taskItem`, ...).
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Heading { .. } => "header",
            Self::Paragraph { .. } => "paragraph",
            Self::Blockquote { .. } => "blockquote",
            Self::List { kind, .. } => kind.tag(),
            Self::ListItem { .. } => "li",
            Self::TaskItem { .. } => "taskItem",
            Self::CodeBlock { .. } => "codeBlock",
            Self::CustomBlock { .. } => "persianBlock",
            Self::PoetRow { .. } => "poetRow",
            Self::PoetCell { .. } => "poetCell",
            Self::Alert { kind, .. } => kind.name(),
            Self::Nested { kind, .. } => kind,
            Self::ThematicBreak => "hr",
            Self::Table { .. } => "table",
            Self::TableRow { .. } => "tableRow",
            Self::TableHeaderCell { .. } => "tableHeaderCell",
            Self::TableCell { .. } => "tableCell",
            Self::Image { .. } => "image",
            Self::Html { .. } => "html",
            Self::Footnotes { .. } => "footnotes",
            Self::Footnote { .. } => "footnote",
        }
    }

    /// Content sequence of the node. Leaf nodes return an empty slice.
    #[must_use]
    pub fn content(&self) -> &[Content] {
        match self {
            Self::Heading { content, .. }
            | Self::Paragraph { content }
            | Self::Blockquote { content }
            | Self::List { content, .. }
            | Self::ListItem { content, .. }
            | Self::TaskItem { content, .. }
            | Self::CustomBlock { content, .. }
            | Self::PoetRow { content }
            | Self::PoetCell { content }
            | Self::Alert { content, .. }
            | Self::Table { content }
            | Self::TableRow { content }
            | Self::TableHeaderCell { content, .. }
            | Self::TableCell { content, .. }
            | Self::Footnotes { content }
            | Self::Footnote { content, .. } => content,
            Self::CodeBlock { .. }
            | Self::Nested { .. }
            | Self::ThematicBreak
            | Self::Image { .. }
            | Self::Html { .. } => &[],
        }
    }

    /// Mutable content sequence, or `None` for leaf nodes.
    pub fn content_mut(&mut self) -> Option<&mut Vec<Content>> {
        match self {
            Self::Heading { content, .. }
            | Self::Paragraph { content }
            | Self::Blockquote { content }
            | Self::List { content, .. }
            | Self::ListItem { content, .. }
            | Self::TaskItem { content, .. }
            | Self::CustomBlock { content, .. }
            | Self::PoetRow { content }
            | Self::PoetCell { content }
            | Self::Alert { content, .. }
            | Self::Table { content }
            | Self::TableRow { content }
            | Self::TableHeaderCell { content, .. }
            | Self::TableCell { content, .. }
            | Self::Footnotes { content }
            | Self::Footnote { content, .. } => Some(content),
            Self::CodeBlock { .. }
            | Self::Nested { .. }
            | Self::ThematicBreak
            | Self::Image { .. }
            | Self::Html { .. } => None,
        }
    }

    /// Append a child to a container node.
    ///
    /// Returns the index of the new child, or `None` if the node is a leaf.
    pub fn push(&mut self, child: impl Into<Content>) -> Option<usize> {
        let content = self.content_mut()?;
        content.push(child.into());
        Some(content.len() - 1)
    }

    /// Iterate over direct child nodes, skipping text fragments.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.content().iter().filter_map(|item| match item {
            Content::Node(node) => Some(node),
            Content::Text(_) => None,
        })
    }
}
