use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use time::{Date, format_description::FormatItem, macros::format_description};

pub const HUMAN_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");
pub const ISO_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// One row of the posts database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Document-service page identifier; also the URL segment of the post.
    pub id: String,
    pub title: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub published_at: Option<Date>,
    /// Free-form workflow label, e.g. `Published` or `Draft`.
    pub status: String,
}

impl Post {
    pub fn is_published(&self, published_status: &str) -> bool {
        self.status == published_status
    }

    pub fn published_label(&self) -> Option<String> {
        self.published_at.map(format_human_date)
    }
}

/// Category selection plus free-text search, as applied to the post list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub category: Option<String>,
    pub query: String,
}

impl PostFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            query: String::new(),
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn is_active(&self) -> bool {
        self.category.is_some() || !self.query.trim().is_empty()
    }

    /// Category must match exactly; the query matches case-insensitively
    /// against the title or any tag.
    pub fn matches(&self, post: &Post) -> bool {
        let matches_category = match &self.category {
            None => true,
            Some(category) => post.category.as_deref() == Some(category.as_str()),
        };
        matches_category && matches_query(post, &self.normalized_query())
    }

    fn normalized_query(&self) -> String {
        self.query.trim().to_lowercase()
    }
}

fn matches_query(post: &Post, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    post.title.to_lowercase().contains(query)
        || post
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(query))
}

pub fn filter_posts<'a>(posts: &'a [Post], filter: &PostFilter) -> Vec<&'a Post> {
    posts.iter().filter(|post| filter.matches(post)).collect()
}

/// Newest first. Undated posts go last; ties keep their input order.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| match (a.published_at, b.published_at) {
        (Some(left), Some(right)) => right.cmp(&left),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Distinct non-empty categories in ascending order.
pub fn categories(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .filter_map(|post| post.category.as_deref())
        .filter(|category| !category.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Adjacent posts in a newest-first list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostNeighbours<'a> {
    /// The newer post, shown as "previous".
    pub previous: Option<&'a Post>,
    /// The older post, shown as "next".
    pub next: Option<&'a Post>,
}

pub fn neighbours<'a>(posts: &'a [Post], id: &str) -> Option<PostNeighbours<'a>> {
    let index = posts.iter().position(|post| post.id == id)?;
    let previous = index.checked_sub(1).and_then(|prev| posts.get(prev));
    let next = posts.get(index + 1);
    Some(PostNeighbours { previous, next })
}

pub fn format_human_date(date: Date) -> String {
    date.format(HUMAN_DATE_FORMAT)
        .unwrap_or_else(|_| format_iso_date(date))
}

pub fn format_iso_date(date: Date) -> String {
    date.format(ISO_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Parse the calendar-date prefix of a date or date-time string.
pub fn parse_date_prefix(value: &str) -> Option<Date> {
    let prefix = value.get(..10)?;
    Date::parse(prefix, ISO_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn post(
        id: &str,
        title: &str,
        category: Option<&str>,
        tags: &[&str],
        day: Option<Date>,
    ) -> Post {
        Post {
            id: id.to_string(),
            title: title.to_string(),
            category: category.map(str::to_string),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            published_at: day,
            status: "Published".to_string(),
        }
    }

    fn sample() -> Vec<Post> {
        vec![
            post(
                "a",
                "Async Rust in practice",
                Some("Rust"),
                &["tokio", "async"],
                Some(date!(2024 - 03 - 01)),
            ),
            post(
                "b",
                "Notes on CSS grid",
                Some("Web"),
                &["css"],
                Some(date!(2024 - 02 - 10)),
            ),
            post(
                "c",
                "Borrowing explained",
                Some("Rust"),
                &["Ownership"],
                Some(date!(2024 - 01 - 05)),
            ),
            post("d", "Uncategorised thoughts", None, &[], None),
        ]
    }

    #[test]
    fn empty_filter_matches_everything() {
        let posts = sample();
        assert_eq!(filter_posts(&posts, &PostFilter::all()).len(), 4);
        assert!(!PostFilter::all().is_active());
    }

    #[test]
    fn whitespace_query_is_ignored() {
        let posts = sample();
        let filter = PostFilter::all().with_query("   ");
        assert_eq!(filter_posts(&posts, &filter).len(), 4);
        assert!(!filter.is_active());
    }

    #[test]
    fn query_matches_title_case_insensitively() {
        let posts = sample();
        let filter = PostFilter::all().with_query("  CSS ");
        let ids: Vec<_> = filter_posts(&posts, &filter)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, ["b"]);
    }

    #[test]
    fn query_matches_tags() {
        let posts = sample();
        let filter = PostFilter::all().with_query("ownership");
        let ids: Vec<_> = filter_posts(&posts, &filter)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, ["c"]);
    }

    #[test]
    fn category_and_query_must_both_match() {
        let posts = sample();
        let filter = PostFilter::category("Rust").with_query("async");
        let ids: Vec<_> = filter_posts(&posts, &filter)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, ["a"]);

        let filter = PostFilter::category("Web").with_query("async");
        assert!(filter_posts(&posts, &filter).is_empty());
    }

    #[test]
    fn category_match_is_exact() {
        let posts = sample();
        assert!(filter_posts(&posts, &PostFilter::category("rust")).is_empty());
    }

    #[test]
    fn categories_are_distinct_and_sorted() {
        assert_eq!(categories(&sample()), ["Rust", "Web"]);
        assert!(categories(&[]).is_empty());
    }

    #[test]
    fn sort_places_undated_posts_last() {
        let mut posts = sample();
        posts.reverse();
        sort_newest_first(&mut posts);
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);
    }

    #[test]
    fn neighbours_follow_newest_first_order() {
        let posts = sample();
        let first = neighbours(&posts, "a").expect("known post");
        assert_eq!(first.previous, None);
        assert_eq!(first.next.map(|p| p.id.as_str()), Some("b"));

        let middle = neighbours(&posts, "b").expect("known post");
        assert_eq!(middle.previous.map(|p| p.id.as_str()), Some("a"));
        assert_eq!(middle.next.map(|p| p.id.as_str()), Some("c"));

        let last = neighbours(&posts, "d").expect("known post");
        assert_eq!(last.next, None);

        assert!(neighbours(&posts, "missing").is_none());
    }

    #[test]
    fn human_date_uses_long_month() {
        assert_eq!(format_human_date(date!(2024 - 01 - 02)), "January 2, 2024");
    }

    #[test]
    fn iso_date_is_zero_padded() {
        assert_eq!(format_iso_date(date!(2024 - 01 - 02)), "2024-01-02");
        let early = Date::from_calendar_date(987, time::Month::November, 30).expect("valid date");
        assert_eq!(format_iso_date(early), "0987-11-30");
    }

    #[test]
    fn date_prefix_accepts_dates_and_datetimes() {
        assert_eq!(parse_date_prefix("2024-05-17"), Some(date!(2024 - 05 - 17)));
        assert_eq!(
            parse_date_prefix("2024-05-17T09:30:00.000+09:00"),
            Some(date!(2024 - 05 - 17))
        );
        assert_eq!(parse_date_prefix("2024-5-17"), None);
        assert_eq!(parse_date_prefix("not a date"), None);
    }
}
