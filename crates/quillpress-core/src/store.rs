use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

type Records = BTreeMap<String, Map<String, Value>>;

/// A stored document: the assigned row id plus its flat field map. The row
/// id lives outside the field map and is surfaced to callers as the public
/// `id` field.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Document {
    /// String field accessor; absent or non-string fields read as empty.
    pub fn str_field(&self, name: &str) -> String {
        self.fields
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}

/// Root of a service's private document store. Collections live as one JSON
/// file each under the root directory; separate processes pointed at the
/// same root see each other's writes on their next call (eventual
/// visibility, last write wins).
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
    lease: Arc<Mutex<()>>,
    open_conns: Arc<AtomicUsize>,
}

impl DocumentStore {
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        fs::create_dir_all(root.as_ref())?;
        Ok(Self {
            root: root.as_ref().to_path_buf(),
            lease: Arc::new(Mutex::new(())),
            open_conns: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn collection(&self, name: &str) -> Collection {
        Collection {
            path: self.root.join(format!("{name}.json")),
            lease: self.lease.clone(),
            open_conns: self.open_conns.clone(),
        }
    }

    /// Number of currently held connections. Zero between calls; the
    /// release-on-all-paths guarantee is testable through this.
    pub fn open_connections(&self) -> usize {
        self.open_conns.load(Ordering::SeqCst)
    }
}

/// Handle to one named collection. Every operation connects fresh: it takes
/// the store lease, reads the backing file, operates, and releases both on
/// every exit path, success or failure.
#[derive(Debug, Clone)]
pub struct Collection {
    path: PathBuf,
    lease: Arc<Mutex<()>>,
    open_conns: Arc<AtomicUsize>,
}

impl Collection {
    /// `Document` under `key`, or `None`. Absence is not an error.
    pub fn get(&self, key: &str) -> StoreResult<Option<Document>> {
        let conn = self.connect()?;
        Ok(conn.records.get(key).map(|fields| Document {
            id: key.to_string(),
            fields: fields.clone(),
        }))
    }

    /// Stores the fields under a freshly assigned id and returns that id.
    pub fn insert(&self, fields: Map<String, Value>) -> StoreResult<String> {
        let mut conn = self.connect()?;
        let id = Uuid::new_v4().simple().to_string();
        conn.records.insert(id.clone(), fields);
        conn.persist()?;
        Ok(id)
    }

    /// Merges the supplied fields into the document under `key` and returns
    /// the post-update document, or `None` if the key does not exist.
    pub fn update(
        &self,
        key: &str,
        fields: Map<String, Value>,
    ) -> StoreResult<Option<Document>> {
        let mut conn = self.connect()?;
        let Some(existing) = conn.records.get_mut(key) else {
            return Ok(None);
        };
        for (name, value) in fields {
            existing.insert(name, value);
        }
        let updated = existing.clone();
        conn.persist()?;
        Ok(Some(Document {
            id: key.to_string(),
            fields: updated,
        }))
    }

    /// Removes the document under `key` and returns the pre-deletion
    /// snapshot, or `None` if the key does not exist.
    pub fn delete(&self, key: &str) -> StoreResult<Option<Document>> {
        let mut conn = self.connect()?;
        let Some(fields) = conn.records.remove(key) else {
            return Ok(None);
        };
        conn.persist()?;
        Ok(Some(Document {
            id: key.to_string(),
            fields,
        }))
    }

    /// All documents whose string field `field` equals `value`. One-shot
    /// materialization, unordered; empty when nothing matches.
    pub fn find_eq(&self, field: &str, value: &str) -> StoreResult<Vec<Document>> {
        let conn = self.connect()?;
        Ok(conn
            .records
            .iter()
            .filter(|(_, fields)| fields.get(field).and_then(Value::as_str) == Some(value))
            .map(|(id, fields)| Document {
                id: id.clone(),
                fields: fields.clone(),
            })
            .collect())
    }

    fn connect(&self) -> StoreResult<Conn<'_>> {
        let guard = self.lease.lock();
        self.open_conns.fetch_add(1, Ordering::SeqCst);
        // The guard must exist before the load so a decode failure still
        // releases the connection on drop.
        let mut conn = Conn {
            records: Records::new(),
            path: &self.path,
            open_conns: &self.open_conns,
            _lease: guard,
        };
        conn.load()?;
        Ok(conn)
    }
}

/// One connection-scoped resource: the exclusive store lease plus the loaded
/// backing file. Dropped on every exit path.
struct Conn<'a> {
    records: Records,
    path: &'a Path,
    open_conns: &'a AtomicUsize,
    _lease: MutexGuard<'a, ()>,
}

impl Conn<'_> {
    fn load(&mut self) -> StoreResult<()> {
        match fs::read(self.path) {
            Ok(bytes) => {
                self.records = serde_json::from_slice(&bytes)?;
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn persist(&self) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(&self.records)?;
        fs::write(self.path, bytes)?;
        Ok(())
    }
}

impl Drop for Conn<'_> {
    fn drop(&mut self) {
        self.open_conns.fetch_sub(1, Ordering::SeqCst);
    }
}
