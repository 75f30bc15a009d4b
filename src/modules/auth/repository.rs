use serde::{Deserialize, Serialize};

use crate::modules::user::repository::{Role, User};
use crate::utils::storage::{self, KeyValueStore};

pub const STORE_KEY: &str = "currentUser";

/// Derived record of who is signed in on this profile. Recreated on sign-in,
/// removed on sign-out; never authoritative over the user list.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Session {
    pub username: String,
    pub role: Role,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

/// Missing or malformed session data reads as "not signed in" so a broken
/// store can never lock the user out of the login page.
pub fn current(store: &dyn KeyValueStore) -> Option<Session> {
    match store.get(STORE_KEY) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::warn!("Discarding malformed session record: {}", err);
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            tracing::warn!("Failed to read session record: {}", err);
            None
        }
    }
}

pub fn set(store: &mut dyn KeyValueStore, user: &User) -> Result<Session, Error> {
    let session = Session {
        username: user.username.clone(),
        role: user.role,
    };
    storage::write_json(store, STORE_KEY, &session).map_err(|err| {
        tracing::error!("Failed to persist session record: {}", err);
        Error::UnexpectedError
    })?;
    Ok(session)
}

pub fn clear(store: &mut dyn KeyValueStore) -> Result<(), Error> {
    store.remove(STORE_KEY).map_err(|err| {
        tracing::error!("Failed to clear session record: {}", err);
        Error::UnexpectedError
    })
}
