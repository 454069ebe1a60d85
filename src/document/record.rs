//! Typed user records and the collection that holds them.
//!
//! A [`Collection`] is the in-memory list for one session. On disk it is
//! wrapped in a container named `usuarios`: a JSON object key or the XML
//! root element. Field names on disk are `id`, `nombre` and `edad`.
//!
//! # Example
//!
//! ```
//! use userstore::document::record::{Collection, Record};
//!
//! let mut users = Collection::default();
//! users.insert(Record::new(1, "Ana", 30));
//! assert_eq!(users.len(), 1);
//! assert_eq!(users.root(), "usuarios");
//! ```

use serde::{Deserialize, Serialize};

/// Name of the container key/element when none was read from a file.
pub const DEFAULT_ROOT: &str = "usuarios";

/// One user entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "edad")]
    pub age: i64,
}

impl Record {
    pub fn new(id: i64, name: impl Into<String>, age: i64) -> Self {
        Self {
            id,
            name: name.into(),
            age,
        }
    }
}

/// An ordered list of records plus the name of the container it lives in.
///
/// Order is insertion order. Ids are expected to be unique but nothing
/// enforces it; lookups by id act on the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Container name. Only the XML format carries it on disk.
    #[serde(skip, default = "default_root")]
    root: String,

    #[serde(rename = "usuarios", default)]
    records: Vec<Record>,
}

fn default_root() -> String {
    DEFAULT_ROOT.to_string()
}

impl Default for Collection {
    fn default() -> Self {
        Self {
            root: default_root(),
            records: Vec::new(),
        }
    }
}

impl Collection {
    /// Creates a collection with the default `usuarios` container.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            root: default_root(),
            records,
        }
    }

    /// Creates an empty collection whose container has the given name.
    pub fn with_root(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            records: Vec::new(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn set_root(&mut self, root: impl Into<String>) {
        self.root = root.into();
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<Record> {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the first record with the given id.
    pub fn find(&self, id: i64) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }
}
