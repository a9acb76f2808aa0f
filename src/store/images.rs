use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use uuid::Uuid;

/// Uploads larger than this are rejected before touching the disk.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "svg"];

/// Cover images uploaded from the admin editor, served back under
/// /uploads/. Files get a fresh uuid name so uploads never collide.
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: PathBuf) -> ImageStore {
        ImageStore { dir }
    }

    /// Stores the bytes and returns the public URL path of the new file.
    pub fn save(&self, original_name: &str, bytes: &[u8]) -> io::Result<String> {
        if bytes.is_empty() {
            return Err(io::Error::new(ErrorKind::InvalidInput, "Upload is empty"));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("Image exceeds the {} MB limit", MAX_IMAGE_BYTES / 1024 / 1024),
            ));
        }

        let extension = image_extension(original_name)?;
        let file_name = format!("{}.{}", Uuid::new_v4(), extension);

        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(&file_name), bytes)?;

        Ok(format!("/uploads/{}", file_name))
    }

    /// Path of a previously uploaded file, for serving.
    pub fn resolve(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

fn image_extension(original_name: &str) -> io::Result<String> {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(ext),
        Some(ext) => Err(io::Error::new(
            ErrorKind::InvalidInput,
            format!("Unsupported image type .{}", ext),
        )),
        None => Err(io::Error::new(
            ErrorKind::InvalidInput,
            format!("File name {} has no image extension", original_name),
        )),
    }
}
