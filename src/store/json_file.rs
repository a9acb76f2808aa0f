use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::RwLock;
use std::{fs, io};

use serde::{Deserialize, Serialize};

use crate::post::Post;
use crate::seed::starter_posts;
use crate::store::{newest_first, PostStore};

#[derive(Serialize, Deserialize)]
struct StoreDocument {
    posts: Vec<Post>,
}

/// Durable store backed by a single JSON document. Every mutation rewrites
/// the whole file, which is fine at the scale of one editor and a few
/// hundred posts.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    posts: RwLock<Vec<Post>>,
}

impl JsonStore {
    /// Opens the document at `path`, seeding it with the starter catalogue
    /// when the file does not exist yet.
    pub fn open(path: PathBuf) -> io::Result<JsonStore> {
        let posts = if path.exists() {
            load_document(&path)?
        } else {
            let posts = starter_posts();
            save_document(&path, &posts)?;
            posts
        };

        Ok(JsonStore {
            path,
            posts: RwLock::new(posts),
        })
    }
}

impl PostStore for JsonStore {
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
        save_document(&self.path, &posts)?;
        Ok(post)
    }

    fn delete_post(&self, id: &str) -> io::Result<bool> {
        let mut posts = self.posts.write().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Ok(false);
        }
        save_document(&self.path, &posts)?;
        Ok(true)
    }
}

fn load_document(path: &PathBuf) -> io::Result<Vec<Post>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            return Err(io::Error::new(
                e.kind(),
                format!("Error opening store file {}: {}", path.display(), e),
            ))
        }
    };

    match serde_json::from_str::<StoreDocument>(&content) {
        Ok(document) => Ok(document.posts),
        Err(e) => Err(io::Error::new(
            ErrorKind::InvalidData,
            format!("Error parsing store file {}: {}", path.display(), e),
        )),
    }
}

fn save_document(path: &PathBuf, posts: &[Post]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let document = StoreDocument {
        posts: posts.to_vec(),
    };
    let content = serde_json::to_string_pretty(&document).map_err(|e| {
        io::Error::new(ErrorKind::InvalidData, format!("Error encoding store file: {}", e))
    })?;

    fs::write(path, content)
}
