use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tabled::{Table, Tabled};

use super::MenuAction;
use crate::modules::menu::repository::MenuItem;
use crate::modules::menu::service::{
    self as menu_service, CreateMealPayload, MealCategory, UpdateMealPayload,
};
use crate::modules::order::repository::Order;
use crate::modules::order::service::{self as order_service, TransitionAction};
use crate::modules::user::repository::Role;
use crate::modules::{menu, order};
use crate::types::Context;

#[derive(Tabled)]
struct QueueRow {
    #[tabled(rename = "Order")]
    id: String,
    #[tabled(rename = "Items")]
    items: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Stage")]
    stage: &'static str,
}

impl From<&Order> for QueueRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            items: format!("{}x", order.items.len()),
            status: order.status.to_string(),
            stage: order.status.category(),
        }
    }
}

#[derive(Tabled)]
struct MenuRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Meal")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Image")]
    image: String,
}

impl From<&MenuItem> for MenuRow {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: format!("€{:.2}", item.price),
            tag: match item.is_low_waste() {
                true => String::from("Low waste"),
                false => String::from("Standard"),
            },
            image: match item.image.is_some() {
                true => String::from("yes"),
                false => String::from("-"),
            },
        }
    }
}

pub fn render(ctx: &mut Context) {
    let orders = match order_service::list_orders(ctx) {
        Ok(orders) => orders,
        Err(_) => return println!("Something went wrong. Try again."),
    };
    let queue = order_service::restaurant_view(&orders);
    if queue.is_empty() {
        println!("No active orders.");
    } else {
        let rows: Vec<QueueRow> = queue.iter().map(QueueRow::from).collect();
        println!("{}", Table::new(rows));
    }

    match menu_service::list_menu(ctx) {
        Ok(items) if items.is_empty() => println!("No menu items yet."),
        Ok(items) => {
            let rows: Vec<MenuRow> = items.iter().map(MenuRow::from).collect();
            println!("{}", Table::new(rows));
        }
        Err(_) => println!("Something went wrong. Try again."),
    }
}

pub fn accept(ctx: &mut Context, order_id: &str, role: Role) {
    transition(ctx, order_id, TransitionAction::Accept, role, "accepted");
}

pub fn reject(ctx: &mut Context, order_id: &str, role: Role) {
    transition(ctx, order_id, TransitionAction::Reject, role, "rejected");
}

fn transition(ctx: &mut Context, order_id: &str, action: TransitionAction, role: Role, verb: &str) {
    match order_service::apply_transition(ctx, order_id, action, role) {
        Ok(order) => {
            println!("Order {} {} ({}).", order.id, verb, order.status.to_string());
            render(ctx);
        }
        Err(order::service::Error::OrderNotFound) => println!("Order not found."),
        Err(order::service::Error::InvalidTransition) => {
            println!("That action is not valid for the order's current status.")
        }
        Err(order::service::Error::RoleNotAllowed) => {
            println!("Your role cannot perform that action.")
        }
        Err(_) => println!("Something went wrong. Try again."),
    }
}

pub fn menu(ctx: &mut Context, action: MenuAction) {
    match action {
        MenuAction::Add {
            name,
            price,
            category,
            description,
            image,
        } => {
            let price = match Decimal::from_str(price.trim()) {
                Ok(price) => price,
                Err(_) => return println!("Missing fields."),
            };
            let image = match image.as_deref().map(image_data_url) {
                Some(Ok(data_url)) => Some(data_url),
                Some(Err(err)) => return println!("Could not read image: {}", err),
                None => None,
            };
            match menu_service::create_meal(
                ctx,
                CreateMealPayload {
                    name: name.trim().to_string(),
                    price,
                    category,
                    description: description.trim().to_string(),
                    image,
                },
            ) {
                Ok(item) => println!("Added \"{}\" ({}).", item.name, item.id),
                Err(menu::service::Error::FailedToValidate(_)) => println!("Missing fields."),
                Err(_) => println!("Something went wrong. Try again."),
            }
        }
        MenuAction::Edit {
            id,
            name,
            price,
            category,
            description,
            image,
        } => {
            let existing = match menu::repository::find_by_id(ctx.store.as_mut(), &id) {
                Ok(Some(item)) => item,
                Ok(None) => return println!("Meal not found."),
                Err(_) => return println!("Something went wrong. Try again."),
            };
            let price = match price {
                Some(raw) => match Decimal::from_str(raw.trim()) {
                    Ok(price) => price,
                    Err(_) => return println!("Missing fields."),
                },
                None => existing.price,
            };
            // An omitted image keeps the stored one; supplying a file
            // replaces it. Clearing an image is not supported.
            let image = match image.as_deref().map(image_data_url) {
                Some(Ok(data_url)) => Some(data_url),
                Some(Err(err)) => return println!("Could not read image: {}", err),
                None => None,
            };
            match menu_service::update_meal(
                ctx,
                UpdateMealPayload {
                    id,
                    name: name.unwrap_or(existing.name).trim().to_string(),
                    price,
                    category: category.unwrap_or_else(|| MealCategory::from_tags(&existing.tags)),
                    description: description.unwrap_or(existing.description),
                    image,
                },
            ) {
                Ok(item) => println!("Saved changes to \"{}\".", item.name),
                Err(menu::service::Error::FailedToValidate(_)) => println!("Missing fields."),
                Err(menu::service::Error::MealNotFound) => println!("Meal not found."),
                Err(_) => println!("Something went wrong. Try again."),
            }
        }
        MenuAction::Remove { id, yes } => {
            let existing = match menu::repository::find_by_id(ctx.store.as_mut(), &id) {
                Ok(Some(item)) => item,
                Ok(None) => return println!("Meal not found."),
                Err(_) => return println!("Something went wrong. Try again."),
            };
            if !yes {
                return println!(
                    "Remove \"{}\"? Re-run with --yes to confirm.",
                    existing.name
                );
            }
            match menu_service::delete_meal(ctx, &id) {
                Ok(item) => println!("Removed \"{}\".", item.name),
                Err(menu::service::Error::MealNotFound) => println!("Meal not found."),
                Err(_) => println!("Something went wrong. Try again."),
            }
        }
    }
}

/// Stand-in for the browser's FileReader: embed the file as a data URL.
fn image_data_url(path: &Path) -> Result<String, std::io::Error> {
    let bytes = std::fs::read(path)?;
    let mime = match path.extension().and_then(|ext| ext.to_str()) {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    };
    Ok(format!("data:{};base64,{}", mime, BASE64_STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_files_become_typed_data_urls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meal.png");
        std::fs::write(&path, b"hi").unwrap();

        assert_eq!(
            image_data_url(&path).unwrap(),
            "data:image/png;base64,aGk="
        );
    }

    #[test]
    fn unknown_extensions_fall_back_to_octet_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meal.raw");
        std::fs::write(&path, b"hi").unwrap();

        assert_eq!(
            image_data_url(&path).unwrap(),
            "data:application/octet-stream;base64,aGk="
        );
    }

    #[test]
    fn missing_image_files_surface_the_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(image_data_url(&dir.path().join("missing.png")).is_err());
    }
}
