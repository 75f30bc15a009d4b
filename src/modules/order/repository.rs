use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::modules::menu::repository::MenuItem;
use crate::utils::storage::{self, KeyValueStore};

pub const STORE_KEY: &str = "orders";
pub const ID_PREFIX: &str = "ORD-";

/// Lifecycle label on an order. The rename strings are the on-disk format and
/// must not change.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    #[serde(rename = "Pending restaurant")]
    Pending,
    #[serde(rename = "Accepted – preparing")]
    Accepted,
    #[serde(rename = "Rejected by restaurant")]
    Rejected,
    #[serde(rename = "On route to customer")]
    OnRoute,
    #[serde(rename = "Delivered")]
    Delivered,
}

impl ToString for OrderStatus {
    fn to_string(&self) -> String {
        match self {
            OrderStatus::Pending => String::from("Pending restaurant"),
            OrderStatus::Accepted => String::from("Accepted – preparing"),
            OrderStatus::Rejected => String::from("Rejected by restaurant"),
            OrderStatus::OnRoute => String::from("On route to customer"),
            OrderStatus::Delivered => String::from("Delivered"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending restaurant" => Ok(OrderStatus::Pending),
            "Accepted – preparing" => Ok(OrderStatus::Accepted),
            "Rejected by restaurant" => Ok(OrderStatus::Rejected),
            "On route to customer" => Ok(OrderStatus::OnRoute),
            "Delivered" => Ok(OrderStatus::Delivered),
            _ => Err(format!("'{}' is not a valid OrderStatus", s)),
        }
    }
}

impl OrderStatus {
    /// Presentation bucket rendered next to the status label, one per
    /// status.
    pub fn category(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Rejected => "rejected",
            OrderStatus::OnRoute => "onroute",
            OrderStatus::Delivered => "delivered",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Order {
    pub id: String,
    pub restaurant: String,
    /// Menu-item snapshots copied at placement; later catalog edits and
    /// deletes never touch them.
    pub items: Vec<MenuItem>,
    pub status: OrderStatus,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub fn list(store: &dyn KeyValueStore) -> Result<Vec<Order>, Error> {
    storage::read_json(store, STORE_KEY)
        .map(|orders| orders.unwrap_or_default())
        .map_err(|err| {
            tracing::error!("Failed to read order list: {}", err);
            Error::UnexpectedError
        })
}

pub fn save(store: &mut dyn KeyValueStore, orders: &[Order]) -> Result<(), Error> {
    storage::write_json(store, STORE_KEY, &orders).map_err(|err| {
        tracing::error!("Failed to persist order list: {}", err);
        Error::UnexpectedError
    })
}

/// Ids are sequential over the stored count, zero-padded to three digits.
/// Unique only under the single-writer assumption.
pub fn next_id(orders: &[Order]) -> String {
    format!("{}{:03}", ID_PREFIX, orders.len() + 1)
}

pub struct CreateOrderPayload {
    pub restaurant: String,
    pub items: Vec<MenuItem>,
}

pub fn create(store: &mut dyn KeyValueStore, payload: CreateOrderPayload) -> Result<Order, Error> {
    let mut orders = list(store)?;
    let order = Order {
        id: next_id(&orders),
        restaurant: payload.restaurant,
        items: payload.items,
        status: OrderStatus::Pending,
    };
    orders.push(order.clone());
    save(store, &orders)?;
    Ok(order)
}
