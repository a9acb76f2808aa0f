use std::path::PathBuf;

use flate2::read::GzDecoder;
use tar::Archive;

pub fn decompress_files(output: &PathBuf) -> Result<(), std::io::Error> {
    let tar_gz = include_bytes!(concat!(env!("OUT_DIR"), "/res.tar.gz"));
    let tar = GzDecoder::new(tar_gz.as_ref());
    let mut archive = Archive::new(tar);
    archive.unpack(output)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_uncompress() {
        let out_path =
            std::env::temp_dir().join(format!("securesector-bootstrap-{}", Uuid::new_v4()));
        fs::create_dir_all(&out_path).unwrap();

        decompress_files(&out_path).unwrap();

        assert!(out_path.join("template").join("index.tpl").exists());
        assert!(out_path.join("public").join("placeholder.svg").exists());
        let _ = fs::remove_dir_all(&out_path);
    }
}
