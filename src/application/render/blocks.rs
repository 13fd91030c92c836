use tracing::debug;

use crate::domain::blocks::{
    BlockKind, ContentBlock, HeadingLevel, ImageSource, RichTextSpan, plain_text,
};

use super::options::RenderOptions;
use super::rich_text::format_rich_text;
use super::tree::{Element, RenderNode};

/// Map one block to its block-level markup.
///
/// List items come back as bare `<li>` entries; callers wrap them in the
/// container built by the grouping pass. Unsupported kinds produce nothing.
pub fn render_block(block: &ContentBlock, options: &RenderOptions) -> Option<RenderNode> {
    let node = match &block.kind {
        BlockKind::Paragraph { rich_text } => paragraph(rich_text),
        BlockKind::Heading { level, rich_text } => heading(*level, rich_text),
        BlockKind::Code {
            language,
            rich_text,
        } => code(language, rich_text),
        BlockKind::Image { source, caption } => image(source, caption, options),
        BlockKind::Quote { rich_text } => quote(rich_text),
        BlockKind::NumberedListItem { rich_text } | BlockKind::BulletedListItem { rich_text } => {
            list_item(rich_text)
        }
        BlockKind::Divider => divider(),
        BlockKind::Unsupported { kind } => {
            debug!(
                target = "application::render::blocks",
                block_id = %block.id,
                kind = %kind,
                "skipping unsupported block"
            );
            return None;
        }
    };
    Some(node.into())
}

fn paragraph(rich_text: &[RichTextSpan]) -> Element {
    Element::new("p")
        .class("block-paragraph")
        .child(format_rich_text(rich_text))
}

fn heading(level: HeadingLevel, rich_text: &[RichTextSpan]) -> Element {
    let (tag, class) = match level {
        HeadingLevel::One => ("h1", "block-heading block-heading-1"),
        HeadingLevel::Two => ("h2", "block-heading block-heading-2"),
        HeadingLevel::Three => ("h3", "block-heading block-heading-3"),
    };
    Element::new(tag)
        .class(class)
        .child(format_rich_text(rich_text))
}

/// Code keeps its text literal: span styling is dropped and the spans are
/// joined without separators.
fn code(language: &str, rich_text: &[RichTextSpan]) -> Element {
    let label = Element::new("span")
        .class("block-code-language")
        .child(RenderNode::text(language));
    let body = Element::new("pre")
        .class("block-code-body")
        .child(Element::new("code").child(RenderNode::text(plain_text(rich_text))));

    Element::new("div")
        .class("block-code")
        .child(label)
        .child(body)
}

/// A caption whose spans carry no text counts as no caption at all.
fn image(source: &ImageSource, caption: &[RichTextSpan], options: &RenderOptions) -> Element {
    let caption_text = plain_text(caption);
    let has_caption = !caption_text.is_empty();
    let alt = if has_caption {
        caption_text
    } else {
        options.default_image_alt.clone()
    };

    let img = Element::new("img")
        .attr("src", source.url())
        .attr("alt", alt)
        .attr("loading", "lazy")
        .class("block-image-media");

    let figure = Element::new("figure").class("block-image").child(img);
    if !has_caption {
        return figure;
    }

    figure.child(
        Element::new("figcaption")
            .class("block-image-caption")
            .child(format_rich_text(caption)),
    )
}

fn quote(rich_text: &[RichTextSpan]) -> Element {
    Element::new("blockquote")
        .class("block-quote")
        .child(format_rich_text(rich_text))
}

fn list_item(rich_text: &[RichTextSpan]) -> Element {
    Element::new("li")
        .class("block-list-item")
        .child(format_rich_text(rich_text))
}

fn divider() -> Element {
    Element::new("hr").class("block-divider")
}
