//! Track locators and the session-scoped store behind transient ones.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Identifier of a transient (in-memory) locator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransientId(u64);

impl TransientId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Where a track's audio comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Locator {
    /// A URL or path. Relative paths resolve against the configured base directory.
    Resource(String),
    /// Bytes of an uploaded file, kept in a `TransientStore` for the session.
    Transient(TransientId),
}

impl Locator {
    pub fn resource(s: impl Into<String>) -> Self {
        Self::Resource(s.into())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Resource(s) => f.write_str(s),
            Locator::Transient(id) => write!(f, "blob:cadenza/{}", id.0),
        }
    }
}

/// Holds uploaded file bytes so they can be played back by locator.
///
/// Entries live until the store is dropped; tracks are never removed so there
/// is nothing to revoke earlier.
#[derive(Debug, Default)]
pub struct TransientStore {
    next_id: u64,
    blobs: HashMap<TransientId, Arc<[u8]>>,
}

impl TransientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `data` and return a locator pointing at it.
    pub fn register(&mut self, data: Arc<[u8]>) -> Locator {
        let id = TransientId(self.next_id);
        self.next_id += 1;
        self.blobs.insert(id, data);
        Locator::Transient(id)
    }

    pub fn resolve(&self, id: TransientId) -> Option<Arc<[u8]>> {
        self.blobs.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

/// Shared handle to the transient store: the controller registers uploads,
/// the media element resolves them.
pub type TransientHandle = Arc<Mutex<TransientStore>>;

pub fn transient_handle() -> TransientHandle {
    Arc::new(Mutex::new(TransientStore::new()))
}
