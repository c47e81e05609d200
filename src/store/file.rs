use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tempfile::NamedTempFile;

use super::{ConfigStore, ErrorFn, SnapshotFn, StoreError, Subscription};
use crate::config::STORE;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Document store backed by a single JSON file.
///
/// The file holds one object mapping each document path to its document.
/// Subscriptions are served by a watcher thread that re-reads the file every
/// poll interval and pushes the document whenever it differs from the last
/// one delivered, so several admin instances sharing a file see each other's
/// saves. Writes replace the whole file atomically; concurrent writers from
/// different processes are last-writer-wins.
pub struct JsonFileStore {
    path: PathBuf,
    poll_interval: Duration,
    // Serializes read-modify-write cycles from this process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            poll_interval: STORE.file_poll_interval,
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads one document. A missing file or key yields `None`.
    pub fn read_document(&self, doc_path: &str) -> Result<Option<Value>> {
        Ok(load_documents(&self.path)?.remove(doc_path))
    }

    fn write_document(&self, doc_path: &str, document: Value) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut documents = load_documents(&self.path)?;
        documents.insert(doc_path.to_string(), document);

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)
            .context(format!("Failed to create directory: {}", dir.display()))?;

        let body = serde_json::to_vec_pretty(&Value::Object(documents))
            .context("Failed to serialize store contents")?;
        // Each write gets its own temp file so writers in other processes never share one.
        let mut tmp = NamedTempFile::new_in(dir)
            .context(format!("Failed to create temp file in: {}", dir.display()))?;
        tmp.write_all(&body)
            .context(format!("Failed to write file: {}", tmp.path().display()))?;
        tmp.persist(&self.path)
            .map_err(|e| e.error)
            .context(format!("Failed to replace store file: {}", self.path.display()))?;
        Ok(())
    }
}

fn load_documents(path: &Path) -> Result<Map<String, Value>> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let raw = fs::read_to_string(path)
        .context(format!("Failed to open store file: {}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(&raw)
        .context(format!("Failed to parse store file: {}", path.display()))?
    {
        Value::Object(documents) => Ok(documents),
        _ => bail!("Store file {} is not a JSON object", path.display()),
    }
}

fn watch_document(
    store_path: PathBuf,
    doc_path: String,
    poll_interval: Duration,
    initial: Option<Value>,
    stop: Arc<AtomicBool>,
    on_snapshot: SnapshotFn,
    on_error: ErrorFn,
) {
    on_snapshot(initial.clone());
    let mut last = initial;

    loop {
        thread::sleep(poll_interval);
        if stop.load(Ordering::Acquire) {
            break;
        }

        match load_documents(&store_path) {
            Ok(mut documents) => {
                let current = documents.remove(&doc_path);
                if current != last {
                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_file_watcher {
                        log::info!("File store: {} changed in {}", doc_path, store_path.display());
                    }
                    on_snapshot(current.clone());
                    last = current;
                }
            }
            Err(e) => {
                log::error!("File store watcher for {} stopped: {:#}", doc_path, e);
                on_error(StoreError::Read(format!("{:#}", e)));
                break;
            }
        }
    }

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_file_watcher {
        log::info!("File store watcher for {} exited", doc_path);
    }
}

impl ConfigStore for JsonFileStore {
    fn subscribe(
        &self,
        path: &str,
        on_snapshot: SnapshotFn,
        on_error: ErrorFn,
    ) -> Result<Subscription, StoreError> {
        let initial = self
            .read_document(path)
            .map_err(|e| StoreError::Setup(format!("{:#}", e)))?;

        let stop = Arc::new(AtomicBool::new(false));
        let store_path = self.path.clone();
        let doc_path = path.to_string();
        let poll_interval = self.poll_interval;
        let thread_stop = Arc::clone(&stop);

        thread::Builder::new()
            .name(format!("store_watch_{}", path))
            .spawn(move || {
                watch_document(
                    store_path,
                    doc_path,
                    poll_interval,
                    initial,
                    thread_stop,
                    on_snapshot,
                    on_error,
                )
            })
            .map_err(|e| StoreError::Setup(format!("Failed to start file watcher: {}", e)))?;

        Ok(Subscription::new(move || {
            stop.store(true, Ordering::Release);
        }))
    }

    fn write(&self, path: &str, document: Value) -> Result<(), StoreError> {
        self.write_document(path, document)
            .map_err(|e| StoreError::Write(format!("{:#}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::mpsc;

    const WAIT: Duration = Duration::from_secs(5);

    fn fast_store(dir: &tempfile::TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("store.json"))
            .with_poll_interval(Duration::from_millis(20))
    }

    #[test]
    fn missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = fast_store(&dir);
        assert_eq!(store.read_document("appConfig").unwrap(), None);
    }

    #[test]
    fn writes_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let store = fast_store(&dir);
        store.write("appConfig", json!({ "appName": "DreamEarn" })).unwrap();
        store.write("other", json!(1)).unwrap();

        let reopened = fast_store(&dir);
        assert_eq!(
            reopened.read_document("appConfig").unwrap(),
            Some(json!({ "appName": "DreamEarn" }))
        );
        assert_eq!(reopened.read_document("other").unwrap(), Some(json!(1)));
    }

    #[test]
    fn watcher_pushes_initial_value_then_changes() {
        let dir = tempfile::tempdir().unwrap();
        let store = fast_store(&dir);
        let (tx, rx) = mpsc::channel();
        let sub = store
            .subscribe("appConfig", Box::new(move |doc| tx.send(doc).unwrap()), Box::new(|_| {}))
            .unwrap();
        assert_eq!(rx.recv_timeout(WAIT).unwrap(), None);

        // A second instance writing to the same file is picked up by the watcher.
        fast_store(&dir)
            .write("appConfig", json!({ "appName": "Remote" }))
            .unwrap();
        assert_eq!(rx.recv_timeout(WAIT).unwrap(), Some(json!({ "appName": "Remote" })));
        sub.unsubscribe();
    }

    #[test]
    fn concurrent_instances_write_without_errors() {
        let dir = tempfile::tempdir().unwrap();
        let writers: Vec<_> = (0..2)
            .map(|writer| {
                let store = fast_store(&dir);
                thread::spawn(move || {
                    (0..150)
                        .filter_map(|i| {
                            store.write("appConfig", json!({ "writer": writer, "seq": i })).err()
                        })
                        .count()
                })
            })
            .collect();
        let failures: usize = writers.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(failures, 0);

        let stored = fast_store(&dir).read_document("appConfig").unwrap().unwrap();
        assert_eq!(stored["seq"], json!(149));
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn malformed_file_fails_setup() {
        let dir = tempfile::tempdir().unwrap();
        let store = fast_store(&dir);
        fs::write(store.path(), "{ not json").unwrap();
        let result = store.subscribe("appConfig", Box::new(|_| {}), Box::new(|_| {}));
        assert!(matches!(result, Err(StoreError::Setup(_))));
        assert!(matches!(
            store.write("appConfig", json!({})),
            Err(StoreError::Write(_))
        ));
    }

    #[test]
    fn corruption_after_subscribe_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = fast_store(&dir);
        let (tx, rx) = mpsc::channel();
        let _sub = store
            .subscribe("appConfig", Box::new(|_| {}), Box::new(move |err| tx.send(err).unwrap()))
            .unwrap();
        fs::write(store.path(), "[1, 2]").unwrap();
        assert!(matches!(rx.recv_timeout(WAIT).unwrap(), StoreError::Read(_)));
    }
}
