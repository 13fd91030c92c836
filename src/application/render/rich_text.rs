use crate::domain::blocks::RichTextSpan;

use super::tree::{Element, RenderNode};

pub(crate) const INLINE_CODE_CLASS: &str = "inline-code";
pub(crate) const UNDERLINE_CLASS: &str = "underline";
pub(crate) const LINK_CLASS: &str = "rich-text-link";

/// Format a run of spans into an inline fragment. Every span renders on its
/// own, in order; an empty run produces an empty fragment.
pub fn format_rich_text(spans: &[RichTextSpan]) -> RenderNode {
    RenderNode::fragment(spans.iter().map(format_span).collect())
}

/// Wrap one span's text in its style elements.
///
/// Nesting is fixed, innermost first: code, bold, italic, strikethrough,
/// underline, then the hyperlink around everything.
pub fn format_span(span: &RichTextSpan) -> RenderNode {
    let annotations = span.annotations;
    let mut node = RenderNode::text(span.plain_text.as_str());

    if annotations.code {
        node = Element::new("code").class(INLINE_CODE_CLASS).child(node).into();
    }
    if annotations.bold {
        node = Element::new("strong").child(node).into();
    }
    if annotations.italic {
        node = Element::new("em").child(node).into();
    }
    if annotations.strikethrough {
        node = Element::new("del").child(node).into();
    }
    if annotations.underline {
        node = Element::new("span").class(UNDERLINE_CLASS).child(node).into();
    }

    match span.href.as_deref() {
        Some(href) => Element::new("a")
            .attr("href", href)
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer")
            .class(LINK_CLASS)
            .child(node)
            .into(),
        None => node,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::blocks::Annotations;

    fn html(spans: &[RichTextSpan]) -> String {
        format_rich_text(spans).to_html()
    }

    #[test]
    fn empty_input_is_an_empty_fragment() {
        let node = format_rich_text(&[]);
        assert!(node.is_empty());
        assert_eq!(node.to_html(), "");
    }

    #[test]
    fn plain_span_is_bare_text() {
        assert_eq!(html(&[RichTextSpan::plain("hello")]), "hello");
    }

    #[test]
    fn duplicate_spans_are_kept() {
        let spans = vec![RichTextSpan::plain("ha"), RichTextSpan::plain("ha")];
        assert_eq!(html(&spans), "haha");
        assert_eq!(format_rich_text(&spans).text_content(), "haha");
    }

    #[test]
    fn bold_wraps_code() {
        let span = RichTextSpan::plain("x").with_annotations(Annotations {
            bold: true,
            code: true,
            ..Annotations::default()
        });
        assert_eq!(
            html(&[span]),
            "<strong><code class=\"inline-code\">x</code></strong>"
        );
    }

    #[test]
    fn all_flags_nest_in_fixed_order() {
        let span = RichTextSpan::plain("all")
            .with_annotations(Annotations {
                bold: true,
                italic: true,
                strikethrough: true,
                underline: true,
                code: true,
            })
            .with_link("https://example.com");
        insta::assert_snapshot!(
            html(&[span]),
            @r#"<a href="https://example.com" target="_blank" rel="noopener noreferrer" class="rich-text-link"><span class="underline"><del><em><strong><code class="inline-code">all</code></strong></em></del></span></a>"#
        );
    }

    #[test]
    fn italic_and_strikethrough_without_bold() {
        let span = RichTextSpan::plain("gone").with_annotations(Annotations {
            italic: true,
            strikethrough: true,
            ..Annotations::default()
        });
        assert_eq!(html(&[span]), "<del><em>gone</em></del>");
    }

    #[test]
    fn link_wraps_plain_text() {
        let span = RichTextSpan::plain("docs").with_link("https://docs.rs");
        assert_eq!(
            html(&[span]),
            "<a href=\"https://docs.rs\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"rich-text-link\">docs</a>"
        );
    }

    #[test]
    fn formatting_is_repeatable() {
        let span = RichTextSpan::plain("same")
            .with_annotations(Annotations::italic())
            .with_link("https://example.com");
        assert_eq!(format_span(&span), format_span(&span));
    }

    #[test]
    fn span_text_is_escaped() {
        let span = RichTextSpan::plain("<script>").with_annotations(Annotations::code());
        assert_eq!(
            html(&[span]),
            "<code class=\"inline-code\">&lt;script&gt;</code>"
        );
    }
}
