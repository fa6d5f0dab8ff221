use async_trait::async_trait;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{
    modules::archive::domain::repositories::DurableStore,
    shared::errors::{AppError, AppResult},
};

const FILE_EXTENSION: &str = "json";
/// Longest encoded key used verbatim as a file stem; longer keys keep this
/// much as a readable prefix followed by their SHA-256.
const MAX_ENCODED_KEY_LEN: usize = 120;
const HASHED_PREFIX_LEN: usize = 64;

/// Durable store keeping one file per key under a directory.
///
/// Keys are percent-encoded into file names, so any key string is safe.
/// Long keys are shortened with a digest to stay under file name limits.
/// Writes go to a uniquely named temporary file that is then renamed over
/// the target, which keeps single-key updates atomic.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`
    pub async fn open(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            AppError::CacheError(format!(
                "Failed to create cache directory {}: {}",
                root.display(),
                e
            ))
        })?;
        log::debug!("FileStore: Opened at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", file_stem(key), FILE_EXTENSION))
    }

    fn temp_path_for(&self, key: &str) -> PathBuf {
        let suffix: u64 = rand::thread_rng().gen();
        self.root
            .join(format!(".{}.{:016x}.tmp", file_stem(key), suffix))
    }
}

/// Percent-encoded key, or a prefix of it plus the key's SHA-256 when too long
fn file_stem(key: &str) -> String {
    let encoded = urlencoding::encode(key);
    if encoded.len() <= MAX_ENCODED_KEY_LEN {
        return encoded.into_owned();
    }
    // percent-encoding is ASCII, so any byte offset is a char boundary
    format!(
        "{}~{:x}",
        &encoded[..HASHED_PREFIX_LEN],
        Sha256::digest(key.as_bytes())
    )
}

#[async_trait]
impl DurableStore for FileStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let temp = self.temp_path_for(key);
        if let Err(e) = tokio::fs::write(&temp, value).await {
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&temp, self.path_for(key)).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }
        Ok(())
    }
}
