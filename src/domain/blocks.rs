//! Content blocks as delivered by the document service.
//!
//! Blocks are read-only values: produced once per page fetch, handed to the
//! renderer, then dropped. The kind set is closed; anything the renderer does
//! not understand is carried as [`BlockKind::Unsupported`] so callers can
//! decide what to do with it instead of failing the whole page.

use serde::{Deserialize, Serialize};

/// One node of a document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Stable opaque identifier assigned by the document service.
    pub id: String,
    pub kind: BlockKind,
}

impl ContentBlock {
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn paragraph(id: impl Into<String>, rich_text: Vec<RichTextSpan>) -> Self {
        Self::new(id, BlockKind::Paragraph { rich_text })
    }

    pub fn heading(
        id: impl Into<String>,
        level: HeadingLevel,
        rich_text: Vec<RichTextSpan>,
    ) -> Self {
        Self::new(id, BlockKind::Heading { level, rich_text })
    }

    pub fn code(
        id: impl Into<String>,
        language: impl Into<String>,
        rich_text: Vec<RichTextSpan>,
    ) -> Self {
        Self::new(
            id,
            BlockKind::Code {
                language: language.into(),
                rich_text,
            },
        )
    }

    pub fn image(id: impl Into<String>, source: ImageSource, caption: Vec<RichTextSpan>) -> Self {
        Self::new(id, BlockKind::Image { source, caption })
    }

    pub fn quote(id: impl Into<String>, rich_text: Vec<RichTextSpan>) -> Self {
        Self::new(id, BlockKind::Quote { rich_text })
    }

    pub fn numbered_item(id: impl Into<String>, rich_text: Vec<RichTextSpan>) -> Self {
        Self::new(id, BlockKind::NumberedListItem { rich_text })
    }

    pub fn bulleted_item(id: impl Into<String>, rich_text: Vec<RichTextSpan>) -> Self {
        Self::new(id, BlockKind::BulletedListItem { rich_text })
    }

    pub fn divider(id: impl Into<String>) -> Self {
        Self::new(id, BlockKind::Divider)
    }

    pub fn unsupported(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::new(id, BlockKind::Unsupported { kind: kind.into() })
    }

    /// The list container this block belongs in, if it is a list item.
    pub fn list_kind(&self) -> Option<ListKind> {
        match self.kind {
            BlockKind::NumberedListItem { .. } => Some(ListKind::Numbered),
            BlockKind::BulletedListItem { .. } => Some(ListKind::Bulleted),
            _ => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self.kind, BlockKind::Unsupported { .. })
    }

    /// Document-service type tag, e.g. `heading_2` or `bulleted_list_item`.
    pub fn type_name(&self) -> &str {
        match &self.kind {
            BlockKind::Paragraph { .. } => "paragraph",
            BlockKind::Heading { level, .. } => level.type_name(),
            BlockKind::Code { .. } => "code",
            BlockKind::Image { .. } => "image",
            BlockKind::Quote { .. } => "quote",
            BlockKind::NumberedListItem { .. } => "numbered_list_item",
            BlockKind::BulletedListItem { .. } => "bulleted_list_item",
            BlockKind::Divider => "divider",
            BlockKind::Unsupported { kind } => kind.as_str(),
        }
    }
}

/// Kind-specific payload of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    Paragraph {
        rich_text: Vec<RichTextSpan>,
    },
    Heading {
        level: HeadingLevel,
        rich_text: Vec<RichTextSpan>,
    },
    Code {
        language: String,
        rich_text: Vec<RichTextSpan>,
    },
    Image {
        source: ImageSource,
        caption: Vec<RichTextSpan>,
    },
    Quote {
        rich_text: Vec<RichTextSpan>,
    },
    NumberedListItem {
        rich_text: Vec<RichTextSpan>,
    },
    BulletedListItem {
        rich_text: Vec<RichTextSpan>,
    },
    Divider,
    /// A block type the renderer has no rule for. `kind` keeps the
    /// document-service type tag for diagnostics.
    Unsupported {
        kind: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
}

impl HeadingLevel {
    pub fn from_number(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    fn type_name(self) -> &'static str {
        match self {
            Self::One => "heading_1",
            Self::Two => "heading_2",
            Self::Three => "heading_3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Numbered,
    Bulleted,
}

/// Where an image's bytes live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageSource {
    /// Hosted elsewhere; used verbatim.
    External { url: String },
    /// Uploaded to the document service, which serves it from a hosted file URL.
    File { url: String },
}

impl ImageSource {
    pub fn url(&self) -> &str {
        match self {
            Self::External { url } | Self::File { url } => url.as_str(),
        }
    }
}

/// Smallest unit of inline text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextSpan {
    pub plain_text: String,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default)]
    pub href: Option<String>,
}

impl RichTextSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_link(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }
}

/// Independent style flags. Missing flags are inactive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
}

impl Annotations {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::default()
        }
    }

    pub fn code() -> Self {
        Self {
            code: true,
            ..Self::default()
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// Concatenate the plain text of every span, ignoring styling and links.
pub fn plain_text(spans: &[RichTextSpan]) -> String {
    spans.iter().map(|span| span.plain_text.as_str()).collect()
}
