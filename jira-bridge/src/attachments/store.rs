//! On-disk attachment store
//!
//! One directory per issue, one file per attachment, named by the record's
//! display name. Known limitations, kept deliberately:
//!
//! - Two records with the same display name on one issue collide; the last
//!   write wins.
//! - A write that fails midway can leave a truncated file, and a later
//!   existence check treats it as materialized.
//! - The existence check and the write are not atomic; concurrent callers
//!   materializing the same entry race, again last writer wins.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::JiraConfig;
use crate::error::{JiraBridgeError, Result};
use crate::jira::Attachment;

/// Source of attachment bytes, keyed by content locator URL
#[async_trait::async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Retrieve the raw bytes behind a content locator
    async fn fetch_content(&self, url: &str) -> Result<Vec<u8>>;
}

/// Outcome of materializing one attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAttachment {
    /// Local path of the entry
    pub path: PathBuf,
    /// Size on disk in bytes
    pub byte_count: u64,
}

/// One remote record annotated with its local cache state
#[derive(Debug, Clone)]
pub struct KnownAttachment {
    /// The remote record
    pub record: Attachment,
    /// Local path when materialized, `None` otherwise
    pub local_path: Option<PathBuf>,
    /// Whether a local copy exists
    pub exists_locally: bool,
}

/// Successful item in a batch download report
#[derive(Debug, Clone)]
pub struct DownloadedAttachment {
    /// Attachment id
    pub id: String,
    /// Display name
    pub filename: String,
    /// Size on disk in bytes
    pub size: u64,
    /// Media type from the record
    pub content_type: Option<String>,
    /// Where the bytes landed
    pub local_path: PathBuf,
}

/// Failed item in a batch download report
#[derive(Debug, Clone)]
pub struct DownloadFailure {
    /// Display name of the record that failed
    pub filename: String,
    /// Stringified cause
    pub error: String,
}

/// Aggregate result of a batch download; always returned, never an error
#[derive(Debug, Clone, Default)]
pub struct DownloadReport {
    /// Items that materialized (or were already present)
    pub succeeded: Vec<DownloadedAttachment>,
    /// Items that failed, isolated per record
    pub failed: Vec<DownloadFailure>,
}

/// Filesystem store for materialized attachments
pub struct AttachmentStore {
    /// Root directory holding one subdirectory per issue
    root: PathBuf,
}

impl AttachmentStore {
    /// Create a store rooted at `root`, creating the directory if needed
    pub fn new(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root).map_err(|e| {
            JiraBridgeError::Storage(format!(
                "failed to create attachment root {}: {e}",
                root.display()
            ))
        })?;
        Ok(Self { root })
    }

    /// Create a store at the configured attachment root
    pub fn from_config(config: &JiraConfig) -> Result<Self> {
        Self::new(config.attachments_dir.clone())
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one issue's attachments
    pub fn container_dir(&self, issue_key: &str) -> PathBuf {
        self.root.join(issue_key)
    }

    /// Pure path derivation, no side effects
    pub fn entry_path(&self, issue_key: &str, filename: &str) -> PathBuf {
        self.container_dir(issue_key).join(filename)
    }

    /// Derive the entry path, guaranteeing its parent directory exists
    pub fn resolve_path(&self, issue_key: &str, filename: &str) -> Result<PathBuf> {
        let dir = self.container_dir(issue_key);
        fs::create_dir_all(&dir).map_err(|e| {
            JiraBridgeError::Storage(format!(
                "failed to create attachment directory {}: {e}",
                dir.display()
            ))
        })?;
        Ok(dir.join(filename))
    }

    /// Whether a local copy of the entry exists
    pub fn exists(&self, issue_key: &str, filename: &str) -> bool {
        self.entry_path(issue_key, filename).exists()
    }

    /// Unconditional truncate-and-write of an entry; last writer wins
    pub fn write_bytes(&self, issue_key: &str, filename: &str, data: &[u8]) -> Result<PathBuf> {
        let path = self.resolve_path(issue_key, filename)?;
        fs::write(&path, data).map_err(|e| {
            JiraBridgeError::Storage(format!("failed to write {}: {e}", path.display()))
        })?;
        debug!(
            issue = issue_key,
            file = filename,
            size = data.len(),
            "stored attachment"
        );
        Ok(path)
    }

    /// Materialize one attachment, fetching only on a cache miss.
    ///
    /// A present entry is returned as-is with its on-disk size; repeat calls
    /// with identical inputs perform no network traffic.
    pub async fn fetch_and_store(
        &self,
        fetcher: &dyn ContentFetcher,
        issue_key: &str,
        filename: &str,
        url: &str,
    ) -> Result<StoredAttachment> {
        let path = self.resolve_path(issue_key, filename)?;

        if path.exists() {
            let byte_count = fs::metadata(&path)
                .map_err(|e| {
                    JiraBridgeError::Storage(format!("failed to stat {}: {e}", path.display()))
                })?
                .len();
            debug!(issue = issue_key, file = filename, "attachment cache hit");
            return Ok(StoredAttachment { path, byte_count });
        }

        debug!(issue = issue_key, file = filename, url = url, "attachment cache miss");
        let data = fetcher.fetch_content(url).await?;
        let byte_count = data.len() as u64;
        let path = self.write_bytes(issue_key, filename, &data)?;

        Ok(StoredAttachment { path, byte_count })
    }

    /// Annotate remote records with their local cache state; read-only
    pub fn list_known(&self, issue_key: &str, records: &[Attachment]) -> Vec<KnownAttachment> {
        records
            .iter()
            .map(|record| {
                let exists_locally = self.exists(issue_key, &record.filename);
                let local_path =
                    exists_locally.then(|| self.entry_path(issue_key, &record.filename));
                KnownAttachment {
                    record: record.clone(),
                    local_path,
                    exists_locally,
                }
            })
            .collect()
    }

    /// Materialize every record, isolating failures per item.
    ///
    /// One failing download never aborts the batch; the report always comes
    /// back, with an empty success list in the worst case.
    pub async fn download_all(
        &self,
        fetcher: &dyn ContentFetcher,
        issue_key: &str,
        records: &[Attachment],
    ) -> DownloadReport {
        let mut report = DownloadReport::default();

        for record in records {
            match self
                .fetch_and_store(fetcher, issue_key, &record.filename, &record.content)
                .await
            {
                Ok(stored) => report.succeeded.push(DownloadedAttachment {
                    id: record.id.clone(),
                    filename: record.filename.clone(),
                    size: stored.byte_count,
                    content_type: record.mime_type.clone(),
                    local_path: stored.path,
                }),
                Err(e) => {
                    warn!(
                        issue = issue_key,
                        file = %record.filename,
                        error = %e,
                        "attachment download failed"
                    );
                    report.failed.push(DownloadFailure {
                        filename: record.filename.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fetcher double that counts calls and fails for chosen URLs
    struct MockFetcher {
        calls: AtomicUsize,
        fail_urls: HashSet<String>,
    }

    impl MockFetcher {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_urls: HashSet::new(),
            }
        }

        fn failing_on(urls: &[&str]) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_urls: urls.iter().map(|u| u.to_string()).collect(),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl ContentFetcher for MockFetcher {
        async fn fetch_content(&self, url: &str) -> Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_urls.contains(url) {
                return Err(JiraBridgeError::RemoteApi {
                    status: 502,
                    body: format!("unreachable: {url}"),
                });
            }
            Ok(format!("bytes of {url}").into_bytes())
        }
    }

    fn record(id: &str, filename: &str, url: &str) -> Attachment {
        Attachment {
            id: id.to_string(),
            filename: filename.to_string(),
            size: 0,
            mime_type: Some("application/octet-stream".to_string()),
            created: None,
            content: url.to_string(),
        }
    }

    fn store() -> (tempfile::TempDir, AttachmentStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = AttachmentStore::new(dir.path().join("attachments")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_resolve_path_creates_parent() {
        let (_dir, store) = store();
        let path = store.resolve_path("X-1", "a.png").unwrap();
        assert!(path.parent().unwrap().is_dir());
        assert!(!path.exists());
    }

    #[test]
    fn test_entry_path_has_no_side_effects() {
        let (_dir, store) = store();
        let path = store.entry_path("X-9", "a.png");
        assert!(!path.parent().unwrap().exists());
    }

    #[tokio::test]
    async fn test_exists_flips_after_fetch() {
        let (_dir, store) = store();
        let fetcher = MockFetcher::new();

        assert!(!store.exists("X-1", "a.png"));
        store
            .fetch_and_store(&fetcher, "X-1", "a.png", "http://x/a")
            .await
            .unwrap();
        assert!(store.exists("X-1", "a.png"));
    }

    #[tokio::test]
    async fn test_fetch_and_store_is_idempotent() {
        let (_dir, store) = store();
        let fetcher = MockFetcher::new();

        let first = store
            .fetch_and_store(&fetcher, "X-1", "a.png", "http://x/a")
            .await
            .unwrap();
        let second = store
            .fetch_and_store(&fetcher, "X-1", "a.png", "http://x/a")
            .await
            .unwrap();

        assert_eq!(fetcher.call_count(), 1);
        assert_eq!(first, second);
        assert_eq!(first.byte_count, "bytes of http://x/a".len() as u64);
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates_and_leaves_no_entry() {
        let (_dir, store) = store();
        let fetcher = MockFetcher::failing_on(&["http://x/bad"]);

        let result = store
            .fetch_and_store(&fetcher, "X-1", "b.txt", "http://x/bad")
            .await;
        assert!(result.is_err());
        assert!(!store.exists("X-1", "b.txt"));
    }

    #[tokio::test]
    async fn test_download_all_isolates_failures() {
        let (_dir, store) = store();
        let fetcher = MockFetcher::failing_on(&["http://x/bad"]);
        let records = vec![
            record("1", "a.png", "http://x/a"),
            record("2", "b.txt", "http://x/bad"),
        ];

        let report = store.download_all(&fetcher, "X-1", &records).await;

        assert_eq!(report.succeeded.len() + report.failed.len(), records.len());
        assert_eq!(report.succeeded[0].filename, "a.png");
        assert_eq!(report.failed[0].filename, "b.txt");
        assert!(report.failed[0].error.contains("unreachable"));
    }

    #[tokio::test]
    async fn test_download_all_with_every_item_failing() {
        let (_dir, store) = store();
        let fetcher = MockFetcher::failing_on(&["http://x/a", "http://x/b"]);
        let records = vec![
            record("1", "a.png", "http://x/a"),
            record("2", "b.txt", "http://x/b"),
        ];

        let report = store.download_all(&fetcher, "X-1", &records).await;
        assert!(report.succeeded.is_empty());
        assert_eq!(report.failed.len(), 2);
    }

    #[test]
    fn test_write_bytes_last_writer_wins() {
        let (_dir, store) = store();

        store.write_bytes("X-1", "dup.bin", b"first").unwrap();
        let path = store.write_bytes("X-1", "dup.bin", b"second").unwrap();

        assert_eq!(fs::read(path).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_list_known_annotates_local_state() {
        let (_dir, store) = store();
        let fetcher = MockFetcher::new();
        let records = vec![
            record("1", "a.png", "http://x/a"),
            record("2", "b.txt", "http://x/b"),
        ];

        store
            .fetch_and_store(&fetcher, "X-1", "a.png", "http://x/a")
            .await
            .unwrap();

        let known = store.list_known("X-1", &records);
        assert_eq!(known.len(), 2);
        assert!(known[0].exists_locally);
        assert!(known[0].local_path.is_some());
        assert!(!known[1].exists_locally);
        assert!(known[1].local_path.is_none());
    }
}
