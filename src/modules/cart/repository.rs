use crate::modules::menu::repository::MenuItem;
use crate::utils::storage::{self, KeyValueStore};

pub const STORE_KEY: &str = "cart";

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

/// The cart is a plain list of menu-item snapshots; the same item added twice
/// appears twice.
pub fn list(store: &dyn KeyValueStore) -> Result<Vec<MenuItem>, Error> {
    storage::read_json(store, STORE_KEY)
        .map(|cart| cart.unwrap_or_default())
        .map_err(|err| {
            tracing::error!("Failed to read cart: {}", err);
            Error::UnexpectedError
        })
}

pub fn save(store: &mut dyn KeyValueStore, cart: &[MenuItem]) -> Result<(), Error> {
    storage::write_json(store, STORE_KEY, &cart).map_err(|err| {
        tracing::error!("Failed to persist cart: {}", err);
        Error::UnexpectedError
    })
}

pub fn clear(store: &mut dyn KeyValueStore) -> Result<(), Error> {
    save(store, &[])
}
