use serde::Deserialize;

use crate::domain::blocks::{Annotations, RichTextSpan};

#[derive(Debug, Deserialize)]
pub(super) struct RawRichText {
    #[serde(default)]
    plain_text: String,
    #[serde(default)]
    annotations: Annotations,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    text: Option<RawText>,
}

#[derive(Debug, Deserialize)]
struct RawText {
    #[serde(default)]
    link: Option<RawLink>,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    url: String,
}

impl RawRichText {
    /// Mentions and equations carry their own `href`, but only plain text
    /// items with an explicit link become hyperlinks.
    fn into_span(self) -> RichTextSpan {
        let href = match self.kind.as_deref() {
            Some("text") | None => self.text.and_then(|text| text.link).map(|link| link.url),
            Some(_) => None,
        };

        RichTextSpan {
            plain_text: self.plain_text,
            annotations: self.annotations,
            href,
        }
    }
}

pub(super) fn into_spans(raw: Vec<RawRichText>) -> Vec<RichTextSpan> {
    raw.into_iter().map(RawRichText::into_span).collect()
}
