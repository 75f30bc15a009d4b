use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::utils::storage::{self, KeyValueStore};

pub const STORE_KEY: &str = "menu";

/// Restaurant label stamped onto every item this kitchen creates. Orders and
/// menu items copy it as free text, never as a reference.
pub const DEFAULT_RESTAURANT: &str = "CloudEats Kitchen";

pub const TAG_LOW_WASTE: &str = "lowWaste";
pub const TAG_STANDARD: &str = "standard";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub restaurant: String,
    pub price: Decimal,
    pub tags: Vec<String>,
    pub description: String,
    /// Opaque data-URL reference; `None` means no image.
    pub image: Option<String>,
}

impl MenuItem {
    pub fn is_low_waste(&self) -> bool {
        self.tags.iter().any(|tag| tag == TAG_LOW_WASTE)
    }
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

fn seed() -> Vec<MenuItem> {
    vec![
        MenuItem {
            id: String::from("m1"),
            name: String::from("Surplus Lunch Bowl"),
            restaurant: String::from(DEFAULT_RESTAURANT),
            price: Decimal::new(75, 1),
            tags: vec![String::from(TAG_LOW_WASTE)],
            description: String::from("Chef's surplus bowl."),
            image: None,
        },
        MenuItem {
            id: String::from("m2"),
            name: String::from("Family Rescue Feast"),
            restaurant: String::from(DEFAULT_RESTAURANT),
            price: Decimal::from(18),
            tags: vec![String::from(TAG_LOW_WASTE)],
            description: String::from("Family platter made from surplus."),
            image: None,
        },
        MenuItem {
            id: String::from("m3"),
            name: String::from("Classic Burger Combo"),
            restaurant: String::from(DEFAULT_RESTAURANT),
            price: Decimal::from(11),
            tags: vec![String::from(TAG_STANDARD)],
            description: String::from("Standard classic combo."),
            image: None,
        },
        MenuItem {
            id: String::from("m4"),
            name: String::from("Vegan Power Box"),
            restaurant: String::from(DEFAULT_RESTAURANT),
            price: Decimal::new(95, 1),
            tags: vec![String::from("vegan")],
            description: String::from("High-protein vegan box."),
            image: None,
        },
    ]
}

/// Lists the catalog, seeding the default items on first access.
pub fn list(store: &mut dyn KeyValueStore) -> Result<Vec<MenuItem>, Error> {
    match storage::read_json(store, STORE_KEY).map_err(|err| {
        tracing::error!("Failed to read menu: {}", err);
        Error::UnexpectedError
    })? {
        Some(menu) => Ok(menu),
        None => {
            let menu = seed();
            save(store, &menu)?;
            Ok(menu)
        }
    }
}

pub fn save(store: &mut dyn KeyValueStore, menu: &[MenuItem]) -> Result<(), Error> {
    storage::write_json(store, STORE_KEY, &menu).map_err(|err| {
        tracing::error!("Failed to persist menu: {}", err);
        Error::UnexpectedError
    })
}

pub fn find_by_id(store: &mut dyn KeyValueStore, id: &str) -> Result<Option<MenuItem>, Error> {
    Ok(list(store)?.into_iter().find(|item| item.id == id))
}

pub struct CreateMenuItemPayload {
    pub name: String,
    pub price: Decimal,
    pub tags: Vec<String>,
    pub description: String,
    pub image: Option<String>,
}

pub fn create(
    store: &mut dyn KeyValueStore,
    payload: CreateMenuItemPayload,
) -> Result<MenuItem, Error> {
    let mut menu = list(store)?;
    let item = MenuItem {
        id: format!("menu-{}", Ulid::new()),
        name: payload.name,
        restaurant: String::from(DEFAULT_RESTAURANT),
        price: payload.price,
        tags: payload.tags,
        description: payload.description,
        image: payload.image,
    };
    menu.push(item.clone());
    save(store, &menu)?;
    Ok(item)
}

pub struct UpdateMenuItemPayload {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub tags: Vec<String>,
    pub description: String,
    /// `None` keeps the stored image; clearing an image is not supported.
    pub image: Option<String>,
}

pub fn update(
    store: &mut dyn KeyValueStore,
    payload: UpdateMenuItemPayload,
) -> Result<Option<MenuItem>, Error> {
    let mut menu = list(store)?;
    let item = match menu.iter_mut().find(|item| item.id == payload.id) {
        Some(item) => item,
        None => return Ok(None),
    };

    item.name = payload.name;
    item.price = payload.price;
    item.tags = payload.tags;
    item.description = payload.description;
    if let Some(image) = payload.image {
        item.image = Some(image);
    }
    let updated = item.clone();

    save(store, &menu)?;
    Ok(Some(updated))
}

/// Removes the item; snapshots already copied into carts or orders keep it.
pub fn delete(store: &mut dyn KeyValueStore, id: &str) -> Result<Option<MenuItem>, Error> {
    let mut menu = list(store)?;
    let removed = match menu.iter().position(|item| item.id == id) {
        Some(position) => menu.remove(position),
        None => return Ok(None),
    };
    save(store, &menu)?;
    Ok(Some(removed))
}
