use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::blocks::plain_text;
use crate::domain::posts::{Post, parse_date_prefix};

use super::rich_text::{RawRichText, into_spans};
use super::{DecodeError, list_items};

const EXPECTED: &str = "an array of page objects or a query response with `results`";

const TITLE: &str = "Title";
const CATEGORY: &str = "Category";
const TAGS: &str = "Tags";
const PUBLISHED: &str = "Published";
const STATUS: &str = "Status";

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    object: Option<String>,
    id: String,
    #[serde(default)]
    properties: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawTitle {
    title: Vec<RawRichText>,
}

#[derive(Debug, Deserialize)]
struct RawSelect {
    select: Option<RawOption>,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    status: Option<RawOption>,
}

#[derive(Debug, Deserialize)]
struct RawMultiSelect {
    multi_select: Vec<RawOption>,
}

#[derive(Debug, Deserialize)]
struct RawDateProperty {
    date: Option<RawDate>,
}

#[derive(Debug, Deserialize)]
struct RawDate {
    start: String,
}

#[derive(Debug, Deserialize)]
struct RawOption {
    name: String,
}

/// Decode a posts-database query dump into posts, in source order.
pub fn decode_posts(json: &str) -> Result<Vec<Post>, DecodeError> {
    let document: Value = serde_json::from_str(json)?;
    let items = list_items(document, EXPECTED)?;
    Ok(items.into_iter().filter_map(decode_page_value).collect())
}

/// Decode one page object. Returns `None` for anything that is not a page.
pub fn decode_page_value(value: Value) -> Option<Post> {
    let page: RawPage = match serde_json::from_value(value) {
        Ok(page) => page,
        Err(err) => {
            warn!(
                target = "infra::notion::pages",
                error = %err,
                "skipping malformed page object"
            );
            return None;
        }
    };

    if let Some(object) = page.object.as_deref().filter(|object| *object != "page") {
        debug!(
            target = "infra::notion::pages",
            object,
            id = %page.id,
            "skipping non-page result"
        );
        return None;
    }

    let properties = PageProperties {
        page_id: &page.id,
        properties: &page.properties,
    };

    Some(Post {
        title: properties.title(),
        category: properties.select(CATEGORY),
        tags: properties.multi_select(TAGS),
        published_at: properties.date(PUBLISHED),
        status: properties.status(STATUS).unwrap_or_default(),
        id: page.id.clone(),
    })
}

struct PageProperties<'a> {
    page_id: &'a str,
    properties: &'a Map<String, Value>,
}

impl PageProperties<'_> {
    /// `Title` when present, otherwise whichever property is the database's
    /// title column.
    fn title(&self) -> String {
        let value = self
            .typed(TITLE, "title")
            .or_else(|| {
                self.properties
                    .values()
                    .find(|value| property_type(value) == Some("title"))
            });

        value
            .and_then(|value| self.decode::<RawTitle>(TITLE, value))
            .map(|raw| plain_text(&into_spans(raw.title)))
            .unwrap_or_default()
    }

    fn select(&self, name: &str) -> Option<String> {
        let value = self.typed(name, "select")?;
        self.decode::<RawSelect>(name, value)?
            .select
            .map(|option| option.name)
    }

    fn multi_select(&self, name: &str) -> Vec<String> {
        self.typed(name, "multi_select")
            .and_then(|value| self.decode::<RawMultiSelect>(name, value))
            .map(|raw| raw.multi_select.into_iter().map(|option| option.name).collect())
            .unwrap_or_default()
    }

    /// Accepts either a plain select or a native status column.
    fn status(&self, name: &str) -> Option<String> {
        let value = self.properties.get(name)?;
        match property_type(value) {
            Some("status") => self.decode::<RawStatus>(name, value)?.status.map(|o| o.name),
            Some("select") => self.decode::<RawSelect>(name, value)?.select.map(|o| o.name),
            _ => None,
        }
    }

    fn date(&self, name: &str) -> Option<time::Date> {
        let value = self.typed(name, "date")?;
        let start = self.decode::<RawDateProperty>(name, value)?.date?.start;
        let parsed = parse_date_prefix(&start);
        if parsed.is_none() {
            warn!(
                target = "infra::notion::pages",
                page_id = %self.page_id,
                property = name,
                value = %start,
                "ignoring unparseable publish date"
            );
        }
        parsed
    }

    fn typed(&self, name: &str, kind: &str) -> Option<&Value> {
        self.properties
            .get(name)
            .filter(|value| property_type(value) == Some(kind))
    }

    fn decode<T: DeserializeOwned>(&self, name: &str, value: &Value) -> Option<T> {
        match T::deserialize(value) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                warn!(
                    target = "infra::notion::pages",
                    page_id = %self.page_id,
                    property = name,
                    error = %err,
                    "ignoring malformed page property"
                );
                None
            }
        }
    }
}

fn property_type(value: &Value) -> Option<&str> {
    value.get("type").and_then(Value::as_str)
}
