use serde::Serialize;

use crate::domain::posts::{Post, PostNeighbours, format_iso_date};

/// One post as listed by the command-line tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCard {
    pub id: String,
    pub title: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    /// `YYYY-MM-DD`, for machines.
    pub published: Option<String>,
    /// `January 2, 2024`, for people.
    pub published_label: Option<String>,
    pub status: String,
}

impl From<&Post> for PostCard {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            category: post.category.clone(),
            tags: post.tags.clone(),
            published: post.published_at.map(format_iso_date),
            published_label: post.published_label(),
            status: post.status.clone(),
        }
    }
}

impl PostCard {
    /// Tab-separated `date  title  [category]  #tags  id` line.
    pub fn to_line(&self) -> String {
        let mut columns = vec![
            self.published.clone().unwrap_or_else(|| "undated".to_string()),
            self.title.clone(),
        ];
        if let Some(category) = &self.category {
            columns.push(format!("[{category}]"));
        }
        if !self.tags.is_empty() {
            columns.push(
                self.tags
                    .iter()
                    .map(|tag| format!("#{tag}"))
                    .collect::<Vec<_>>()
                    .join(" "),
            );
        }
        columns.push(self.id.clone());
        columns.join("\t")
    }
}

pub fn build_post_cards<'a>(posts: impl IntoIterator<Item = &'a Post>) -> Vec<PostCard> {
    posts.into_iter().map(PostCard::from).collect()
}

/// Previous and next links around one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationView {
    pub current: String,
    pub previous: Option<PostCard>,
    pub next: Option<PostCard>,
}

impl NavigationView {
    pub fn new(current: &str, neighbours: PostNeighbours<'_>) -> Self {
        Self {
            current: current.to_string(),
            previous: neighbours.previous.map(PostCard::from),
            next: neighbours.next.map(PostCard::from),
        }
    }

    pub fn to_lines(&self) -> Vec<String> {
        let describe = |card: &Option<PostCard>| {
            card.as_ref()
                .map(|card| format!("{} ({})", card.title, card.id))
                .unwrap_or_else(|| "-".to_string())
        };
        vec![
            format!("previous\t{}", describe(&self.previous)),
            format!("next\t{}", describe(&self.next)),
        ]
    }
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
