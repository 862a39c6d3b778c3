//! Purpose: Define the form repository seam and an in-memory implementation.
//! Exports: `FormRecord`, `FormStore`, `MemoryStore`.
//! Role: Persistence boundary for callers; the codec itself never touches storage.
//! Invariants: Records hold sections in the encoded string form, as stored upstream.
//! Invariants: `save` assigns an id to records that have none and returns the stored copy.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::core::decode::decode_with;
use crate::core::encode::encode;
use crate::core::error::{Error, ErrorKind};
use crate::core::id::Id;
use crate::core::model::Document;
use crate::core::report::FailureReporter;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormRecord {
    pub id: String,
    pub name: String,
    pub sections: String,
}

impl FormRecord {
    /// A new, unsaved form holding the skeleton document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            sections: encode(&Document::skeleton()),
        }
    }

    pub fn document(&self, reporter: &dyn FailureReporter) -> Document {
        decode_with(&self.sections, reporter)
    }

    pub fn set_document(&mut self, document: &Document) {
        self.sections = encode(document);
    }
}

pub trait FormStore {
    fn get(&self, id: &str) -> Result<FormRecord, Error>;
    fn save(&self, record: FormRecord) -> Result<FormRecord, Error>;
    fn list(&self) -> Result<Vec<FormRecord>, Error>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, FormRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, FormRecord>>, Error> {
        self.records
            .lock()
            .map_err(|_| Error::new(ErrorKind::Internal).with_message("form store lock poisoned"))
    }
}

impl FormStore for MemoryStore {
    fn get(&self, id: &str) -> Result<FormRecord, Error> {
        self.lock()?.get(id).cloned().ok_or_else(|| {
            Error::new(ErrorKind::NotFound).with_message(format!("no form with id {id}"))
        })
    }

    fn save(&self, mut record: FormRecord) -> Result<FormRecord, Error> {
        if record.id.is_empty() {
            record.id = Id::generate().to_string();
        }
        self.lock()?.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn list(&self) -> Result<Vec<FormRecord>, Error> {
        Ok(self.lock()?.values().cloned().collect())
    }
}
