use std::{
    io,
    path::{Component, Path, PathBuf},
};

use chrono::Utc;
use rand::Rng;
use tokio::fs;

/// Directory holding uploaded image files, addressed by generated file name.
#[derive(Clone, Debug)]
pub struct ImageDir {
    root: PathBuf,
}

impl ImageDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    /// `<field>-<unix millis>-<random>` followed by the extension of the
    /// client's original file name, if it had one.
    pub fn generate_name(field: &str, original: Option<&str>) -> String {
        let suffix = rand::thread_rng().gen_range(0..1_000_000_000u32);
        let ext = original
            .and_then(|name| Path::new(name).extension())
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        format!(
            "{}-{}-{}{}",
            field,
            Utc::now().timestamp_millis(),
            suffix,
            ext
        )
    }

    /// Location of `file_name` inside the directory. Names that are not a
    /// single plain path component resolve to nothing.
    pub fn path_of(&self, file_name: &str) -> Option<PathBuf> {
        if file_name.contains(['/', '\\']) {
            return None;
        }
        let mut components = Path::new(file_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Some(self.root.join(file_name)),
            _ => None,
        }
    }

    pub async fn create(&self, file_name: &str) -> io::Result<fs::File> {
        let path = self.path_of(file_name).ok_or_else(|| invalid_name(file_name))?;
        self.ensure().await?;
        fs::File::create(path).await
    }

    /// Path of an existing regular file named `file_name`.
    pub async fn existing(&self, file_name: &str) -> Option<PathBuf> {
        let path = self.path_of(file_name)?;
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Some(path),
            _ => None,
        }
    }

    pub async fn remove(&self, file_name: &str) -> io::Result<()> {
        let path = self.path_of(file_name).ok_or_else(|| invalid_name(file_name))?;
        fs::remove_file(path).await
    }
}

fn invalid_name(file_name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("invalid image file name: {:?}", file_name),
    )
}
