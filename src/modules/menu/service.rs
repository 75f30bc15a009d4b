use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use validator::{Validate, ValidationErrors};

use super::repository::{self, MenuItem, TAG_LOW_WASTE, TAG_STANDARD};
use crate::modules::view::ViewEvent;
use crate::types::Context;
use crate::utils::validation::validate_price;

/// The catalog form offers exactly one category per item, stored as its
/// single tag.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MealCategory {
    #[serde(rename = "lowWaste")]
    LowWaste,
    #[serde(rename = "standard")]
    Standard,
}

impl MealCategory {
    pub fn tags(self) -> Vec<String> {
        match self {
            MealCategory::LowWaste => vec![String::from(TAG_LOW_WASTE)],
            MealCategory::Standard => vec![String::from(TAG_STANDARD)],
        }
    }

    pub fn from_tags(tags: &[String]) -> Self {
        match tags.iter().any(|tag| tag == TAG_LOW_WASTE) {
            true => MealCategory::LowWaste,
            false => MealCategory::Standard,
        }
    }
}

impl FromStr for MealCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lowWaste" => Ok(MealCategory::LowWaste),
            "standard" => Ok(MealCategory::Standard),
            _ => Err(format!("'{}' is not a valid MealCategory", s)),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    FailedToValidate(ValidationErrors),
    MealNotFound,
    UnexpectedError,
}

#[derive(Deserialize, Validate)]
pub struct CreateMealPayload {
    #[validate(length(min = 1, code = "MISSING_MEAL_NAME", message = "Meal name is required"))]
    pub name: String,
    #[validate(custom(code = "NEGATIVE_MEAL_PRICE", function = "validate_price"))]
    pub price: Decimal,
    pub category: MealCategory,
    pub description: String,
    pub image: Option<String>,
}

pub fn create_meal(ctx: &mut Context, payload: CreateMealPayload) -> Result<MenuItem, Error> {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate meal payload: {errors}");
        Error::FailedToValidate(errors)
    })?;

    let item = repository::create(
        ctx.store.as_mut(),
        repository::CreateMenuItemPayload {
            name: payload.name,
            price: payload.price,
            tags: payload.category.tags(),
            description: payload.description,
            image: payload.image,
        },
    )
    .map_err(|_| Error::UnexpectedError)?;

    publish_menu(ctx)?;
    Ok(item)
}

#[derive(Deserialize, Validate)]
pub struct UpdateMealPayload {
    pub id: String,
    #[validate(length(min = 1, code = "MISSING_MEAL_NAME", message = "Meal name is required"))]
    pub name: String,
    #[validate(custom(code = "NEGATIVE_MEAL_PRICE", function = "validate_price"))]
    pub price: Decimal,
    pub category: MealCategory,
    pub description: String,
    /// `None` keeps the existing image.
    pub image: Option<String>,
}

pub fn update_meal(ctx: &mut Context, payload: UpdateMealPayload) -> Result<MenuItem, Error> {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate meal payload: {errors}");
        Error::FailedToValidate(errors)
    })?;

    let updated = repository::update(
        ctx.store.as_mut(),
        repository::UpdateMenuItemPayload {
            id: payload.id,
            name: payload.name,
            price: payload.price,
            tags: payload.category.tags(),
            description: payload.description,
            image: payload.image,
        },
    )
    .map_err(|_| Error::UnexpectedError)?
    .ok_or(Error::MealNotFound)?;

    publish_menu(ctx)?;
    Ok(updated)
}

pub fn delete_meal(ctx: &mut Context, id: &str) -> Result<MenuItem, Error> {
    let removed = repository::delete(ctx.store.as_mut(), id)
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::MealNotFound)?;

    publish_menu(ctx)?;
    Ok(removed)
}

#[derive(Default, Clone)]
pub struct BrowseFilter {
    /// Case-insensitive term matched against item name and restaurant.
    pub term: Option<String>,
    /// Tag an item must carry; `None` or "all" passes everything.
    pub tag: Option<String>,
}

pub fn browse(ctx: &mut Context, filter: &BrowseFilter) -> Result<Vec<MenuItem>, Error> {
    let menu = repository::list(ctx.store.as_mut()).map_err(|_| Error::UnexpectedError)?;
    let term = filter
        .term
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    Ok(menu
        .into_iter()
        .filter(|item| {
            let matches_term = item.name.to_lowercase().contains(&term)
                || item.restaurant.to_lowercase().contains(&term);
            let matches_tag = match filter.tag.as_deref() {
                None | Some("all") => true,
                Some(tag) => item.tags.iter().any(|candidate| candidate == tag),
            };
            matches_term && matches_tag
        })
        .collect())
}

pub fn list_menu(ctx: &mut Context) -> Result<Vec<MenuItem>, Error> {
    repository::list(ctx.store.as_mut()).map_err(|_| Error::UnexpectedError)
}

fn publish_menu(ctx: &mut Context) -> Result<(), Error> {
    let menu = repository::list(ctx.store.as_mut()).map_err(|_| Error::UnexpectedError)?;
    ctx.views.publish(&ViewEvent::MenuChanged(menu));
    Ok(())
}
