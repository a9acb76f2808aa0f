use crate::post::{ContentType, Post, Sector};

/// Listing-page selection state. `None` stands for the "all" choice of the
/// sector chips and the content-type tabs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub sector: Option<Sector>,
    pub content_type: Option<ContentType>,
    pub query: String,
}

impl FilterSelection {
    pub fn is_unfiltered(&self) -> bool {
        self.sector.is_none() && self.content_type.is_none() && self.query.is_empty()
    }
}

/// Narrows the listing to posts matching every active predicate, keeping
/// the input order. The search query matches title or excerpt, both sides
/// lowercased. An empty result is a legitimate outcome, not an error.
pub fn filter_posts<'a>(posts: &'a [Post], selection: &FilterSelection) -> Vec<&'a Post> {
    let needle = selection.query.to_lowercase();

    posts
        .iter()
        .filter(|post| matches_sector(post, selection.sector))
        .filter(|post| matches_content_type(post, selection.content_type))
        .filter(|post| matches_query(post, &needle))
        .collect()
}

/// Picks the hero post: the first featured one in store order, ignoring
/// whatever filter selection is active.
pub fn first_featured(posts: &[Post]) -> Option<&Post> {
    posts.iter().find(|post| post.featured)
}

fn matches_sector(post: &Post, sector: Option<Sector>) -> bool {
    match sector {
        None => true,
        Some(sector) => post.sector == sector,
    }
}

fn matches_content_type(post: &Post, content_type: Option<ContentType>) -> bool {
    match content_type {
        None => true,
        Some(content_type) => post.content_type == content_type,
    }
}

fn matches_query(post: &Post, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    post.title.to_lowercase().contains(needle) || post.excerpt.to_lowercase().contains(needle)
}
