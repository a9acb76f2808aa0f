use std::io;
use std::sync::RwLock;

use crate::post::Post;
use crate::store::{newest_first, PostStore};

/// Volatile store used when no store path is configured. It starts from
/// whatever catalogue it is given and forgets every change on restart.
pub struct MemoryStore {
    posts: RwLock<Vec<Post>>,
}

impl MemoryStore {
    pub fn new(posts: Vec<Post>) -> MemoryStore {
        MemoryStore {
            posts: RwLock::new(posts),
        }
    }
}

impl PostStore for MemoryStore {
    fn list_posts(&self) -> io::Result<Vec<Post>> {
        let posts = self.posts.read().unwrap();
        Ok(newest_first(posts.clone()))
    }

    fn find_post(&self, identifier: &str) -> io::Result<Option<Post>> {
        let posts = self.posts.read().unwrap();
        Ok(posts.iter().find(|p| p.matches_identifier(identifier)).cloned())
    }

    fn insert_post(&self, post: Post) -> io::Result<Post> {
        let mut posts = self.posts.write().unwrap();
        posts.push(post.clone());
        Ok(post)
    }

    fn delete_post(&self, id: &str) -> io::Result<bool> {
        let mut posts = self.posts.write().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use crate::post::{ContentType, PostDraft, Sector};
    use crate::seed::starter_posts;

    use super::*;

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            excerpt: "excerpt".to_string(),
            content: "body".to_string(),
            sector: Sector::Finance,
            content_type: ContentType::Blog,
            author_name: "Admin User".to_string(),
            read_time: 5,
            image_url: "/placeholder.svg".to_string(),
            featured: false,
        }
    }

    #[test]
    fn test_list_is_newest_first() {
        let store = MemoryStore::new(starter_posts());
        let listed = store.list_posts().unwrap();
        let ids: Vec<&str> = listed.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5"]);

        let inserted = store.insert_post(Post::compose(draft("Fresh off the press"))).unwrap();
        let listed = store.list_posts().unwrap();
        assert_eq!(listed[0].id, inserted.id);
        assert_eq!(listed.len(), 6);
    }

    #[test]
    fn test_find_by_id_and_slug() {
        let store = MemoryStore::new(starter_posts());

        let by_id = store.find_post("4").unwrap().unwrap();
        assert_eq!(by_id.title, "AI-Powered Fraud Detection in Financial Services: A Case Study");

        let by_slug = store
            .find_post("blockchain-for-supply-chain-transparency-beyond-the-hype")
            .unwrap()
            .unwrap();
        assert_eq!(by_slug.id, "2");

        assert!(store.find_post("no-such-post").unwrap().is_none());
    }

    #[test]
    fn test_delete_reports_whether_anything_matched() {
        let store = MemoryStore::new(starter_posts());
        assert!(store.delete_post("3").unwrap());
        assert!(!store.delete_post("3").unwrap());
        assert!(store.find_post("3").unwrap().is_none());
        assert_eq!(store.list_posts().unwrap().len(), 4);
    }

    #[test]
    fn test_delete_matches_id_only() {
        // Slugs are for lookup, deletion wants the exact id
        let store = MemoryStore::new(starter_posts());
        assert!(!store
            .delete_post("medical-device-security-addressing-vulnerabilities-in-connected-healthcare")
            .unwrap());
        assert_eq!(store.list_posts().unwrap().len(), 5);
    }
}
