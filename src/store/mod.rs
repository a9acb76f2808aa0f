use std::io;

use crate::post::Post;

pub mod images;
pub mod json_file;
pub mod memory;

/// Source of truth for posts. Implementations are shared between request
/// handlers, so they take &self and guard their own interior state.
pub trait PostStore: Send + Sync {
    /// Every post, newest created_at first. Posts created in the same
    /// instant keep their insertion order.
    fn list_posts(&self) -> io::Result<Vec<Post>>;

    /// Looks a post up by id or slug, whichever matches first.
    fn find_post(&self, identifier: &str) -> io::Result<Option<Post>>;

    /// Appends a post and returns it as stored.
    fn insert_post(&self, post: Post) -> io::Result<Post>;

    /// Removes the post with the given id. Ok(false) when nothing matched.
    fn delete_post(&self, id: &str) -> io::Result<bool>;
}

fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts
}

/// The identities allowed into the admin editor. Emails are compared
/// case-insensitively and with surrounding whitespace ignored.
pub struct AdminDirectory {
    emails: Vec<String>,
}

impl AdminDirectory {
    pub fn new(emails: &[String]) -> AdminDirectory {
        let emails = emails
            .iter()
            .map(|email| email.trim().to_lowercase())
            .filter(|email| !email.is_empty())
            .collect();
        AdminDirectory { emails }
    }

    pub fn is_admin(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return false;
        }
        self.emails.contains(&email)
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}
