use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::blocks::{BlockKind, ContentBlock, HeadingLevel, ImageSource, RichTextSpan};

use super::rich_text::{RawRichText, into_spans};
use super::{DecodeError, list_items};

const EXPECTED: &str = "an array of block objects or a block list with `results`";

#[derive(Debug, Deserialize)]
struct RawBlock {
    #[serde(default)]
    id: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawTextPayload {
    #[serde(default)]
    rich_text: Vec<RawRichText>,
}

#[derive(Debug, Deserialize)]
struct RawCodePayload {
    #[serde(default)]
    rich_text: Vec<RawRichText>,
    #[serde(default)]
    language: String,
}

#[derive(Debug, Deserialize)]
struct RawImagePayload {
    #[serde(flatten)]
    source: RawImageSource,
    #[serde(default)]
    caption: Vec<RawRichText>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawImageSource {
    External { external: RawFileUrl },
    File { file: RawFileUrl },
}

#[derive(Debug, Deserialize)]
struct RawFileUrl {
    url: String,
}

/// Decode a blocks dump into content blocks, in document order.
///
/// Block types without a rendering rule decode to
/// [`BlockKind::Unsupported`]; partial block objects (no `type`) are dropped.
pub fn decode_blocks(json: &str) -> Result<Vec<ContentBlock>, DecodeError> {
    let document: Value = serde_json::from_str(json)?;
    let items = list_items(document, EXPECTED)?;
    Ok(items.into_iter().filter_map(decode_block_value).collect())
}

/// Decode several block-children responses, as collected page by page from a
/// paginated listing, into one sequence.
pub fn decode_block_pages<'a>(
    pages: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<ContentBlock>, DecodeError> {
    let mut blocks = Vec::new();
    for page in pages {
        blocks.extend(decode_blocks(page)?);
    }
    Ok(blocks)
}

/// Decode a single block object. Returns `None` for partial objects.
pub fn decode_block_value(value: Value) -> Option<ContentBlock> {
    let raw: RawBlock = match serde_json::from_value(value) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(
                target = "infra::notion::blocks",
                error = %err,
                "skipping malformed block object"
            );
            return None;
        }
    };

    let Some(kind) = raw.kind else {
        debug!(
            target = "infra::notion::blocks",
            block_id = %raw.id,
            "skipping partial block object"
        );
        return None;
    };

    let mut fields = raw.fields;
    let payload = fields.remove(&kind).unwrap_or(Value::Null);

    match decode_kind(&kind, payload) {
        Ok(decoded) => Some(ContentBlock::new(raw.id, decoded)),
        Err(err) => {
            warn!(
                target = "infra::notion::blocks",
                block_id = %raw.id,
                kind = %kind,
                error = %err,
                "block payload did not match its type; treating as unsupported"
            );
            Some(ContentBlock::unsupported(raw.id, kind))
        }
    }
}

fn decode_kind(kind: &str, payload: Value) -> Result<BlockKind, serde_json::Error> {
    let decoded = match kind {
        "paragraph" => BlockKind::Paragraph {
            rich_text: text_payload(payload)?,
        },
        "heading_1" => heading(HeadingLevel::One, payload)?,
        "heading_2" => heading(HeadingLevel::Two, payload)?,
        "heading_3" => heading(HeadingLevel::Three, payload)?,
        "code" => {
            let RawCodePayload {
                rich_text,
                language,
            } = serde_json::from_value(payload)?;
            BlockKind::Code {
                language,
                rich_text: into_spans(rich_text),
            }
        }
        "image" => {
            let RawImagePayload { source, caption } = serde_json::from_value(payload)?;
            let source = match source {
                RawImageSource::External { external } => {
                    ImageSource::External { url: external.url }
                }
                RawImageSource::File { file } => ImageSource::File { url: file.url },
            };
            BlockKind::Image {
                source,
                caption: into_spans(caption),
            }
        }
        "quote" => BlockKind::Quote {
            rich_text: text_payload(payload)?,
        },
        "numbered_list_item" => BlockKind::NumberedListItem {
            rich_text: text_payload(payload)?,
        },
        "bulleted_list_item" => BlockKind::BulletedListItem {
            rich_text: text_payload(payload)?,
        },
        "divider" => BlockKind::Divider,
        other => BlockKind::Unsupported {
            kind: other.to_string(),
        },
    };
    Ok(decoded)
}

fn heading(level: HeadingLevel, payload: Value) -> Result<BlockKind, serde_json::Error> {
    Ok(BlockKind::Heading {
        level,
        rich_text: text_payload(payload)?,
    })
}

fn text_payload(payload: Value) -> Result<Vec<RichTextSpan>, serde_json::Error> {
    let RawTextPayload { rich_text } = serde_json::from_value(payload)?;
    Ok(into_spans(rich_text))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::blocks::Annotations;

    fn text(content: &str) -> Value {
        json!({
            "type": "text",
            "text": {"content": content, "link": null},
            "annotations": {"bold": false, "italic": false, "strikethrough": false,
                            "underline": false, "code": false, "color": "default"},
            "plain_text": content,
            "href": null
        })
    }

    #[test]
    fn decodes_supported_kinds() {
        let json = json!([
            {"object": "block", "id": "p", "type": "paragraph",
             "paragraph": {"rich_text": [text("Hello")], "color": "default"}},
            {"object": "block", "id": "h", "type": "heading_2",
             "heading_2": {"rich_text": [text("Intro")], "is_toggleable": false}},
            {"object": "block", "id": "c", "type": "code",
             "code": {"rich_text": [text("let x = 1;")], "language": "rust", "caption": []}},
            {"object": "block", "id": "q", "type": "quote",
             "quote": {"rich_text": [text("quoted")]}},
            {"object": "block", "id": "n", "type": "numbered_list_item",
             "numbered_list_item": {"rich_text": [text("one")]}},
            {"object": "block", "id": "b", "type": "bulleted_list_item",
             "bulleted_list_item": {"rich_text": [text("dot")]}},
            {"object": "block", "id": "d", "type": "divider", "divider": {}}
        ])
        .to_string();

        let blocks = decode_blocks(&json).expect("decodes");
        let types: Vec<_> = blocks.iter().map(ContentBlock::type_name).collect();
        assert_eq!(
            types,
            [
                "paragraph",
                "heading_2",
                "code",
                "quote",
                "numbered_list_item",
                "bulleted_list_item",
                "divider"
            ]
        );
        assert_eq!(
            blocks[2].kind,
            BlockKind::Code {
                language: "rust".into(),
                rich_text: vec![RichTextSpan::plain("let x = 1;")],
            }
        );
    }

    #[test]
    fn decodes_external_and_file_images() {
        let json = json!([
            {"id": "e", "type": "image",
             "image": {"type": "external", "external": {"url": "https://cdn.example.com/a.png"},
                       "caption": [text("A diagram")]}},
            {"id": "f", "type": "image",
             "image": {"type": "file",
                       "file": {"url": "https://files.example.com/b.png", "expiry_time": "2024-01-01T00:00:00.000Z"},
                       "caption": []}}
        ])
        .to_string();

        let blocks = decode_blocks(&json).expect("decodes");
        assert_eq!(
            blocks[0].kind,
            BlockKind::Image {
                source: ImageSource::External {
                    url: "https://cdn.example.com/a.png".into()
                },
                caption: vec![RichTextSpan::plain("A diagram")],
            }
        );
        assert_eq!(
            blocks[1].kind,
            BlockKind::Image {
                source: ImageSource::File {
                    url: "https://files.example.com/b.png".into()
                },
                caption: vec![],
            }
        );
    }

    #[test]
    fn unknown_types_are_kept_as_unsupported() {
        let json = json!([
            {"id": "t", "type": "table_of_contents", "table_of_contents": {"color": "gray"}}
        ])
        .to_string();

        let blocks = decode_blocks(&json).expect("decodes");
        assert_eq!(blocks, vec![ContentBlock::unsupported("t", "table_of_contents")]);
    }

    #[test]
    fn malformed_payload_degrades_to_unsupported() {
        let json = json!([
            {"id": "p", "type": "paragraph", "paragraph": {"rich_text": "not a list"}},
            {"id": "i", "type": "image", "image": {"type": "file_upload", "file_upload": {"id": "x"}}}
        ])
        .to_string();

        let blocks = decode_blocks(&json).expect("decodes");
        assert_eq!(
            blocks,
            vec![
                ContentBlock::unsupported("p", "paragraph"),
                ContentBlock::unsupported("i", "image"),
            ]
        );
    }

    #[test]
    fn partial_blocks_are_dropped() {
        let json = json!({
            "object": "list",
            "results": [
                {"object": "block", "id": "partial"},
                {"object": "block", "id": "d", "type": "divider", "divider": {}}
            ],
            "has_more": false,
            "next_cursor": null
        })
        .to_string();

        let blocks = decode_blocks(&json).expect("decodes");
        assert_eq!(blocks, vec![ContentBlock::divider("d")]);
    }

    #[test]
    fn annotations_survive_decoding() {
        let json = json!([{
            "id": "p", "type": "paragraph",
            "paragraph": {"rich_text": [{
                "type": "text", "text": {"content": "x"}, "plain_text": "x",
                "annotations": {"code": true, "bold": true}
            }]}
        }])
        .to_string();

        let blocks = decode_blocks(&json).expect("decodes");
        let BlockKind::Paragraph { rich_text } = &blocks[0].kind else {
            panic!("expected paragraph");
        };
        assert_eq!(
            rich_text[0].annotations,
            Annotations {
                bold: true,
                code: true,
                ..Annotations::default()
            }
        );
    }

    #[test]
    fn block_pages_concatenate_in_order() {
        let first = json!({"object": "list", "results": [
            {"id": "a", "type": "divider", "divider": {}}
        ], "has_more": true, "next_cursor": "a"})
        .to_string();
        let second = json!({"object": "list", "results": [
            {"id": "b", "type": "divider", "divider": {}}
        ], "has_more": false})
        .to_string();

        let blocks = decode_block_pages([first.as_str(), second.as_str()]).expect("decodes");
        assert_eq!(blocks, vec![ContentBlock::divider("a"), ContentBlock::divider("b")]);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(decode_blocks("{"), Err(DecodeError::Json(_))));
        assert!(matches!(decode_blocks("42"), Err(DecodeError::Shape { .. })));
    }
}
