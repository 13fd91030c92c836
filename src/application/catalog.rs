use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::posts::{
    self, Post, PostFilter, PostNeighbours, filter_posts, sort_newest_first,
};

/// Which posts of the source dump the catalog keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility<'a> {
    /// Only posts whose status equals this label.
    Published(&'a str),
    /// Drafts included.
    All,
}

/// The post list as shown on the site: visible posts, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostCatalog {
    posts: Vec<Post>,
}

impl PostCatalog {
    pub fn new(posts: Vec<Post>, visibility: Visibility<'_>) -> Self {
        let total = posts.len();
        let mut posts: Vec<Post> = match visibility {
            Visibility::Published(label) => posts
                .into_iter()
                .filter(|post| post.is_published(label))
                .collect(),
            Visibility::All => posts,
        };
        sort_newest_first(&mut posts);

        debug!(
            target = "application::catalog",
            total,
            kept = posts.len(),
            "built post catalog"
        );
        Self { posts }
    }

    pub fn published(posts: Vec<Post>, published_status: &str) -> Self {
        Self::new(posts, Visibility::Published(published_status))
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn filter(&self, filter: &PostFilter) -> Vec<&Post> {
        filter_posts(&self.posts, filter)
    }

    pub fn categories(&self) -> Vec<String> {
        posts::categories(&self.posts)
    }

    /// Posts of exactly this category. An unknown category gives an empty
    /// list.
    pub fn posts_in_category(&self, category: &str) -> Vec<&Post> {
        self.filter(&PostFilter::category(category))
    }

    pub fn neighbours(&self, id: &str) -> Option<PostNeighbours<'_>> {
        posts::neighbours(&self.posts, id)
    }

    /// Like [`Self::neighbours`], with an unknown id reported as not found.
    pub fn navigate(&self, id: &str) -> Result<PostNeighbours<'_>, DomainError> {
        self.neighbours(id)
            .ok_or_else(|| DomainError::not_found("post", id))
    }
}
