use notion_blog::application::catalog::{PostCatalog, Visibility};
use notion_blog::domain::posts::{Post, PostFilter};
use notion_blog::infra::notion::decode_posts;
use pretty_assertions::assert_eq;
use time::macros::date;

fn source() -> Vec<Post> {
    decode_posts(include_str!("fixtures/pages.json")).expect("fixture decodes")
}

fn published() -> PostCatalog {
    PostCatalog::published(source(), "Published")
}

fn ids<'a>(posts: impl IntoIterator<Item = &'a Post>) -> Vec<&'a str> {
    posts.into_iter().map(|post| post.id.as_str()).collect()
}

#[test]
fn fixture_pages_decode_with_their_properties() {
    let posts = source();
    assert_eq!(posts.len(), 6);

    let async_post = posts
        .iter()
        .find(|post| post.id == "post-async")
        .expect("async post");
    assert_eq!(async_post.title, "Async Rust in practice");
    assert_eq!(async_post.category.as_deref(), Some("Rust"));
    assert_eq!(async_post.tags, ["tokio", "async"]);
    assert_eq!(async_post.published_at, Some(date!(2024 - 03 - 01)));
    assert_eq!(async_post.status, "Published");

    let broken = posts
        .iter()
        .find(|post| post.id == "post-bad-date")
        .expect("broken date post");
    assert_eq!(broken.published_at, None);
}

#[test]
fn published_posts_are_newest_first_with_undated_last() {
    assert_eq!(
        ids(published().posts()),
        [
            "post-async",
            "post-grid",
            "post-borrow",
            "post-undated",
            "post-bad-date"
        ]
    );
}

#[test]
fn drafts_appear_only_when_requested() {
    let catalog = PostCatalog::new(source(), Visibility::All);
    assert_eq!(catalog.posts().first().map(|p| p.id.as_str()), Some("post-draft"));
    assert!(published().get("post-draft").is_none());
}

#[test]
fn categories_are_sorted_and_distinct() {
    assert_eq!(published().categories(), ["Life", "Rust", "Web"]);
}

#[test]
fn search_matches_titles_and_tags() {
    let catalog = published();

    let by_tag = catalog.filter(&PostFilter::all().with_query("  OWNERSHIP "));
    assert_eq!(ids(by_tag), ["post-borrow"]);

    let by_title = catalog.filter(&PostFilter::all().with_query("css"));
    assert_eq!(ids(by_title), ["post-grid"]);

    let scoped = catalog.filter(&PostFilter::category("Web").with_query("async"));
    assert!(scoped.is_empty());
}

#[test]
fn category_listing_uses_exact_names() {
    let catalog = published();
    assert_eq!(ids(catalog.posts_in_category("Rust")), ["post-async", "post-borrow"]);
    assert!(catalog.posts_in_category("rust").is_empty());
}

#[test]
fn neighbours_walk_the_published_list() {
    let catalog = published();

    let first = catalog.neighbours("post-async").expect("known post");
    assert!(first.previous.is_none());
    assert_eq!(first.next.map(|p| p.id.as_str()), Some("post-grid"));

    let last = catalog.neighbours("post-bad-date").expect("known post");
    assert_eq!(last.previous.map(|p| p.id.as_str()), Some("post-undated"));
    assert!(last.next.is_none());

    assert!(catalog.neighbours("post-draft").is_none());
}
