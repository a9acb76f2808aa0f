use std::fs::File;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use flate2::write::GzEncoder;
use flate2::Compression;

fn archive_path(dir: &Path) -> PathBuf {
    let last = dir.file_name().unwrap().to_str().unwrap();
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    out_dir.join(format!("{}.tar.gz", last))
}

fn compress_dir(dir: &Path) -> io::Result<()> {
    let archive = archive_path(dir);
    let _ = fs::remove_file(&archive);

    let tar_gz = File::create(archive)?;
    let enc = GzEncoder::new(tar_gz, Compression::default());
    let mut tar = tar::Builder::new(enc);
    tar.append_dir_all(".", dir)?;
    Ok(())
}

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let res_dir = PathBuf::from(&manifest_dir).join("res");
    compress_dir(&res_dir).unwrap();
}
