use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::utils::storage::{self, KeyValueStore};

pub const STORE_KEY: &str = "users";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "customer")]
    Customer,
    #[serde(rename = "restaurant")]
    Restaurant,
    #[serde(rename = "courier")]
    Courier,
    #[serde(rename = "admin")]
    Admin,
}

impl ToString for Role {
    fn to_string(&self) -> String {
        match self {
            Role::Customer => String::from("customer"),
            Role::Restaurant => String::from("restaurant"),
            Role::Courier => String::from("courier"),
            Role::Admin => String::from("admin"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "restaurant" => Ok(Role::Restaurant),
            "courier" => Ok(Role::Courier),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("'{}' is not a valid Role", s)),
        }
    }
}

// Passwords are stored and compared in plaintext on purpose: this is a mock
// application with no real authentication.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct User {
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub fn list(store: &dyn KeyValueStore) -> Result<Vec<User>, Error> {
    storage::read_json(store, STORE_KEY)
        .map(|users| users.unwrap_or_default())
        .map_err(|err| {
            tracing::error!("Failed to read user list: {}", err);
            Error::UnexpectedError
        })
}

pub fn find_by_username(
    store: &dyn KeyValueStore,
    username: &str,
) -> Result<Option<User>, Error> {
    Ok(list(store)?
        .into_iter()
        .find(|user| user.username == username))
}

pub fn find_by_credentials(
    store: &dyn KeyValueStore,
    username: &str,
    password: &str,
) -> Result<Option<User>, Error> {
    Ok(list(store)?
        .into_iter()
        .find(|user| user.username == username && user.password == password))
}

pub struct CreateUserPayload {
    pub username: String,
    pub password: String,
    pub role: Role,
}

pub fn create(store: &mut dyn KeyValueStore, payload: CreateUserPayload) -> Result<User, Error> {
    let mut users = list(store)?;
    let user = User {
        username: payload.username,
        password: payload.password,
        role: payload.role,
    };
    users.push(user.clone());
    storage::write_json(store, STORE_KEY, &users).map_err(|err| {
        tracing::error!("Failed to persist user list: {}", err);
        Error::UnexpectedError
    })?;
    Ok(user)
}
