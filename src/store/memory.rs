use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{ConfigStore, ErrorFn, SnapshotFn, StoreError, Subscription};

type SharedSnapshotFn = Arc<dyn Fn(Option<Value>) + Send + Sync>;
type SharedErrorFn = Arc<dyn Fn(StoreError) + Send + Sync>;

struct Subscriber {
    path: String,
    on_snapshot: SharedSnapshotFn,
    on_error: SharedErrorFn,
}

#[derive(Default)]
struct Inner {
    documents: HashMap<String, Value>,
    subscribers: HashMap<u64, Subscriber>,
    next_id: u64,
    write_failure: Option<String>,
    subscribe_failure: Option<String>,
    writes: usize,
}

/// In-process document store.
///
/// Writes are acknowledged immediately and pushed synchronously to every
/// subscriber of the same path. Deliveries are serialized, so the last
/// snapshot a subscriber sees is always the stored document. Callbacks must
/// not write back into the store. Failures can be injected to exercise the
/// panel's error paths.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
    // Held across update and notification; never taken while `inner` is held.
    delivery: Arc<Mutex<()>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, path: &str, document: Value) -> Self {
        self.lock().documents.insert(path.to_string(), document);
        self
    }

    pub fn document(&self, path: &str) -> Option<Value> {
        self.lock().documents.get(path).cloned()
    }

    /// Replaces (or deletes) a document as another client would, notifying subscribers.
    pub fn set_document(&self, path: &str, document: Option<Value>) {
        let _delivery = self.deliver();
        {
            let mut inner = self.lock();
            match &document {
                Some(doc) => inner.documents.insert(path.to_string(), doc.clone()),
                None => inner.documents.remove(path),
            };
        }
        self.notify(path, document);
    }

    /// Makes every following write fail with `message` until cleared with `None`.
    pub fn fail_writes_with(&self, message: Option<&str>) {
        self.lock().write_failure = message.map(str::to_string);
    }

    /// Makes every following subscribe call fail with `message` until cleared with `None`.
    pub fn fail_subscriptions_with(&self, message: Option<&str>) {
        self.lock().subscribe_failure = message.map(str::to_string);
    }

    /// Delivers a read failure to the subscribers of `path` and drops them.
    pub fn emit_error(&self, path: &str, message: &str) {
        let failed: Vec<SharedErrorFn> = {
            let mut inner = self.lock();
            let ids: Vec<u64> = inner
                .subscribers
                .iter()
                .filter(|(_, sub)| sub.path == path)
                .map(|(id, _)| *id)
                .collect();
            ids.into_iter()
                .filter_map(|id| inner.subscribers.remove(&id))
                .map(|sub| sub.on_error)
                .collect()
        };
        for on_error in failed {
            on_error(StoreError::Read(message.to_string()));
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn deliver(&self) -> MutexGuard<'_, ()> {
        self.delivery
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // Callbacks run after the data lock is released so they may read the store.
    fn notify(&self, path: &str, document: Option<Value>) {
        let listeners: Vec<SharedSnapshotFn> = self
            .lock()
            .subscribers
            .values()
            .filter(|sub| sub.path == path)
            .map(|sub| Arc::clone(&sub.on_snapshot))
            .collect();
        for on_snapshot in listeners {
            on_snapshot(document.clone());
        }
    }
}

impl ConfigStore for InMemoryStore {
    fn subscribe(
        &self,
        path: &str,
        on_snapshot: SnapshotFn,
        on_error: ErrorFn,
    ) -> Result<Subscription, StoreError> {
        let on_snapshot: SharedSnapshotFn = Arc::from(on_snapshot);
        let _delivery = self.deliver();
        let (id, current) = {
            let mut inner = self.lock();
            if let Some(msg) = inner.subscribe_failure.clone() {
                return Err(StoreError::Setup(msg));
            }
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.insert(
                id,
                Subscriber {
                    path: path.to_string(),
                    on_snapshot: Arc::clone(&on_snapshot),
                    on_error: Arc::from(on_error),
                },
            );
            (id, inner.documents.get(path).cloned())
        };

        on_snapshot(current);

        let inner = Arc::clone(&self.inner);
        Ok(Subscription::new(move || {
            inner
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .subscribers
                .remove(&id);
        }))
    }

    fn write(&self, path: &str, document: Value) -> Result<(), StoreError> {
        let _delivery = self.deliver();
        {
            let mut inner = self.lock();
            if let Some(msg) = inner.write_failure.clone() {
                return Err(StoreError::Write(msg));
            }
            inner.documents.insert(path.to_string(), document.clone());
            inner.writes += 1;
        }
        self.notify(path, Some(document));
        Ok(())
    }
}
