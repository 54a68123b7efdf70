use relative_path::RelativePathBuf;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Nothing to upload: file is empty")]
    Empty,
    #[error("Upload failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns uploaded bytes into a stable URL.
///
/// The engine never looks at the bytes; it only stores the returned URL as
/// the value of an image block.
pub trait MediaUploader {
    fn upload(&self, bytes: &[u8], file_name: &str) -> Result<String, UploadError>;
}

/// Stores media on disk under its SHA-256 digest, so the same bytes always
/// map to the same URL.
#[derive(Clone, Debug)]
pub struct FsMediaStore {
    root: PathBuf,
    url_prefix: String,
}

impl FsMediaStore {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        let url_prefix = url_prefix.into();
        Self {
            root: root.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Local file for a URL produced by this store, if it is one
    pub fn local_path(&self, url: &str) -> Option<PathBuf> {
        let name = url.strip_prefix(&self.url_prefix)?.strip_prefix('/')?;
        if name.is_empty() || name.contains('/') {
            return None;
        }
        Some(RelativePathBuf::from(name).to_path(&self.root))
    }
}

impl MediaUploader for FsMediaStore {
    fn upload(&self, bytes: &[u8], file_name: &str) -> Result<String, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::Empty);
        }

        let name = format!("{:x}.{}", Sha256::digest(bytes), extension_of(file_name));
        let path = RelativePathBuf::from(name.as_str()).to_path(&self.root);
        if stored_bytes_match(&path, bytes) {
            log::debug!("Media {name} already stored");
        } else {
            fs::create_dir_all(&self.root)?;
            write_atomically(&path, bytes)?;
            log::info!("Stored {} bytes of media as {name}", bytes.len());
        }

        Ok(format!("{}/{name}", self.url_prefix))
    }
}

/// An existing file is only reused when it holds exactly these bytes
fn stored_bytes_match(path: &Path, bytes: &[u8]) -> bool {
    match fs::read(path) {
        Ok(stored) if stored == bytes => true,
        Ok(stored) => {
            log::warn!(
                "Replacing damaged media file {} ({} of {} bytes)",
                path.display(),
                stored.len(),
                bytes.len()
            );
            false
        }
        Err(_) => false,
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("part");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}

/// Lower-cased alphanumeric extension of `file_name`, or "bin"
fn extension_of(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| {
            !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .unwrap_or_else(|| "bin".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_upload_returns_stable_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(dir.path(), "/media/");

        let first = store.upload(b"fake image data", "team.JPG").unwrap();
        let second = store.upload(b"fake image data", "renamed.jpg").unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with("/media/"));
        assert!(first.ends_with(".jpg"));
    }

    #[test]
    fn test_upload_writes_bytes_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(dir.path().join("media"), "/media");

        let url = store.upload(b"png bytes", "logo.png").unwrap();
        let path = store.local_path(&url).unwrap();

        assert_eq!(fs::read(path).unwrap(), b"png bytes");
    }

    #[test]
    fn test_truncated_file_is_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(dir.path(), "/media");
        let bytes = b"sixteen bytes!!!";
        let name = format!("{:x}.png", Sha256::digest(bytes));
        fs::write(dir.path().join(&name), &bytes[..7]).unwrap();

        let url = store.upload(bytes, "dojo.png").unwrap();

        assert_eq!(url, format!("/media/{name}"));
        assert_eq!(fs::read(store.local_path(&url).unwrap()).unwrap(), bytes);
        assert!(!dir.path().join(name).with_extension("part").exists());
    }

    #[test]
    fn test_different_bytes_get_different_urls() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(dir.path(), "/media");

        let a = store.upload(b"one", "a.png").unwrap();
        let b = store.upload(b"two", "a.png").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_upload_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(dir.path(), "/media");
        assert!(matches!(store.upload(b"", "a.png"), Err(UploadError::Empty)));
    }

    #[rstest]
    #[case("photo.jpeg", "jpeg")]
    #[case("PHOTO.PNG", "png")]
    #[case("archive.tar.gz", "gz")]
    #[case("no-extension", "bin")]
    #[case("weird.p/g", "bin")]
    #[case("trailing.", "bin")]
    fn test_extension_of(#[case] file_name: &str, #[case] expected: &str) {
        assert_eq!(extension_of(file_name), expected);
    }

    #[test]
    fn test_local_path_rejects_foreign_urls() {
        let store = FsMediaStore::new("/srv/media", "/media");
        assert!(store.local_path("https://example.com/a.jpg").is_none());
        assert!(store.local_path("/media/../etc/passwd").is_none());
        assert!(store.local_path("/media/abc.jpg").is_some());
    }
}
