use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::{RwLock, RwLockReadGuard};

use crate::error::{Result, StoreError};

/// An ordered collection mirrored to a single JSON array on disk.
///
/// Every mutation runs against a copy of the collection while the write lock is
/// held. The copy is written to disk in full and only replaces the in-memory
/// collection once the write succeeded, so a failed write leaves both sides as
/// they were.
#[derive(Debug)]
pub struct JsonCollection<T> {
    path: PathBuf,
    items: RwLock<Vec<T>>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Load the collection from `path`.
    ///
    /// A missing file is an empty collection when `create_missing` is set, and
    /// an error otherwise. The file is not created until the first mutation.
    pub async fn load(path: impl Into<PathBuf>, create_missing: bool) -> Result<Self> {
        let path = path.into();
        let items = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound && create_missing => {
                warn!("{} does not exist, starting empty", path.display());
                Vec::new()
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        Ok(Self::with_items(path, items))
    }

    pub fn with_items(path: impl Into<PathBuf>, items: Vec<T>) -> Self {
        Self {
            path: path.into(),
            items: RwLock::new(items),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.items.read().await
    }

    /// Apply `f` and persist the result.
    pub async fn update<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Vec<T>) -> R + Send,
        R: Send,
    {
        let mut items = self.items.write().await;
        let mut next = items.clone();
        let out = f(&mut next);

        write_json_pretty(&self.path, &next).await?;
        *items = next;
        Ok(out)
    }

    /// Like [`update`](Self::update), but `f` may fail, in which case nothing
    /// is written and the error is returned as is.
    pub async fn try_update<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R> + Send,
        R: Send,
    {
        let mut items = self.items.write().await;
        let mut next = items.clone();
        let out = f(&mut next)?;

        write_json_pretty(&self.path, &next).await?;
        *items = next;
        Ok(out)
    }

    /// Like [`update`](Self::update), but `f` may decline the change by
    /// returning `None`, in which case nothing is written.
    pub async fn update_if<R, F>(&self, f: F) -> Result<Option<R>>
    where
        F: FnOnce(&mut Vec<T>) -> Option<R> + Send,
        R: Send,
    {
        let mut items = self.items.write().await;
        let mut next = items.clone();
        let Some(out) = f(&mut next) else {
            return Ok(None);
        };

        write_json_pretty(&self.path, &next).await?;
        *items = next;
        Ok(Some(out))
    }
}

/// Overwrite `path` with the pretty-printed array, going through a sibling
/// temp file so readers never observe a half-written document.
pub async fn write_json_pretty<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(items).map_err(|source| StoreError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = tmp_path(path);
    tokio::fs::write(&tmp, &bytes)
        .await
        .map_err(|source| StoreError::Write {
            path: tmp.clone(),
            source,
        })?;

    if let Err(source) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(StoreError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    debug!("wrote {} records to {}", items.len(), path.display());
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
