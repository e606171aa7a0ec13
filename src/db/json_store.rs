//! Whole-document JSON persistence.
//!
//! Every core operation runs as one critical section over the shared file:
//! writers take the exclusive side of an async `RwLock` for their full
//! load → mutate → save cycle, readers take the shared side. Saves go through
//! a temp file and a rename, so the file on disk is always a complete
//! document.

use std::{
    future::Future,
    path::{Path, PathBuf},
    time::Duration,
};

use tokio::{
    fs,
    io::AsyncWriteExt,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::timeout,
};

use crate::db::id_generator::IdGenerator;
use crate::models::document_models::Document;
use crate::utils::error::{PollError, PollResult};

pub struct JsonStore {
    path: PathBuf,
    lock: RwLock<()>,
    lock_timeout: Duration,
    ids: IdGenerator,
}

impl JsonStore {
    /// Opens the store at `path`, creating an empty document if the file is
    /// missing. A file that exists but does not parse is an error.
    pub async fn open(path: impl Into<PathBuf>, lock_timeout: Duration) -> PollResult<Self> {
        let path = path.into();

        if fs::try_exists(&path).await? {
            tracing::debug!(path = %path.display(), "using existing store");
        } else {
            tracing::info!(path = %path.display(), "store missing, writing empty document");
            write_document(&path, &Document::default()).await?;
        }

        let document = read_document(&path).await?;
        let ids = IdGenerator::new();
        ids.observe(document.max_id());

        Ok(Self {
            path,
            lock: RwLock::new(()),
            lock_timeout,
            ids,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A consistent snapshot of the whole document.
    pub async fn load(&self) -> PollResult<Document> {
        let _guard = self.read_guard().await?;
        read_document(&self.path).await
    }

    /// Runs a read-only query against a snapshot. Never observes a
    /// half-finished transaction.
    pub async fn read<T, F>(&self, query: F) -> PollResult<T>
    where
        F: FnOnce(&Document) -> PollResult<T>,
    {
        let _guard = self.read_guard().await?;
        let document = read_document(&self.path).await?;
        query(&document)
    }

    /// Load, mutate and save under the exclusive lock. If `mutate` fails the
    /// document is not written.
    pub async fn transaction<T, F>(&self, mutate: F) -> PollResult<T>
    where
        F: FnOnce(&mut Document, &IdGenerator) -> PollResult<T>,
    {
        let _guard = self.write_guard().await?;
        let mut document = read_document(&self.path).await?;
        let output = mutate(&mut document, &self.ids)?;
        write_document(&self.path, &document).await?;
        Ok(output)
    }

    async fn read_guard(&self) -> PollResult<RwLockReadGuard<'_, ()>> {
        self.bounded(self.lock.read()).await
    }

    async fn write_guard(&self) -> PollResult<RwLockWriteGuard<'_, ()>> {
        self.bounded(self.lock.write()).await
    }

    async fn bounded<G>(&self, acquire: impl Future<Output = G>) -> PollResult<G> {
        timeout(self.lock_timeout, acquire).await.map_err(|_| {
            tracing::warn!(
                timeout_ms = self.lock_timeout.as_millis() as u64,
                "timed out waiting for store lock"
            );
            PollError::StorageUnavailable("store is busy".to_string())
        })
    }
}

async fn read_document(path: &Path) -> PollResult<Document> {
    let raw = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

async fn write_document(path: &Path, document: &Document) -> PollResult<()> {
    let body = serde_json::to_vec_pretty(document)
        .map_err(|e| PollError::StorageUnavailable(format!("failed to encode document: {}", e)))?;

    let tmp = temp_path(path);
    let mut file = fs::File::create(&tmp).await?;
    file.write_all(&body).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(&tmp, path).await?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
