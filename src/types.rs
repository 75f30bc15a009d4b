use crate::modules::view::ViewHub;
use crate::utils::config::Config;
use crate::utils::storage::{self, FileStore, KeyValueStore, MemoryStore};

/// Shared state handed to every service: the persistent store plus the view
/// hub the services publish into.
pub struct Context {
    pub store: Box<dyn KeyValueStore>,
    pub views: ViewHub,
}

impl Context {
    /// Context over a throwaway in-memory store.
    pub fn in_memory() -> Self {
        Self {
            store: Box::new(MemoryStore::new()),
            views: ViewHub::new(),
        }
    }
}

pub trait ToContext {
    fn to_context(self) -> Result<Context, storage::Error>;
}

impl ToContext for Config {
    fn to_context(self) -> Result<Context, storage::Error> {
        let store = FileStore::open(&self.store.path)?;
        Ok(Context {
            store: Box::new(store),
            views: ViewHub::new(),
        })
    }
}
