// Session ids kept on disk between runs, one file per endpoint and user

use sha2::{Digest, Sha256};
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use url::Url;

#[derive(Debug, Clone)]
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    /// The file name is the hex SHA-256 of `user@url`, so credentials never
    /// appear in the path.
    pub fn new(dir: &Path, url: &Url, username: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(username);
        hasher.update("@");
        hasher.update(url.as_str());
        Self {
            path: dir.join(hex::encode(hasher.finalize())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored session id, or `None` when nothing has been stored yet.
    pub async fn load(&self) -> io::Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(s) => Ok(Some(s.trim().to_owned()).filter(|id| !id.is_empty())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Writes the session id, readable by the owner only on unix.
    pub async fn store(&self, session_id: &str) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options.open(&self.path).await?;
        file.write_all(session_id.as_bytes()).await?;
        Ok(())
    }
}
