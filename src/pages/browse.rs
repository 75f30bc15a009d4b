use tabled::{Table, Tabled};

use crate::modules::menu::repository::MenuItem;
use crate::modules::menu::service::{self as menu_service, BrowseFilter};
use crate::modules::order::service::{self as order_service, Error as OrderError};
use crate::modules::cart;
use crate::types::Context;

#[derive(Tabled)]
struct MealRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Meal")]
    name: String,
    #[tabled(rename = "Restaurant")]
    restaurant: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&MenuItem> for MealRow {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            restaurant: item.restaurant.clone(),
            price: format!("€{:.2}", item.price),
            tag: match item.is_low_waste() {
                true => String::from("Low waste"),
                false => String::from("Standard"),
            },
            description: item.description.clone(),
        }
    }
}

pub fn render(ctx: &mut Context, search: Option<String>, filter: Option<String>) {
    let meals = match menu_service::browse(
        ctx,
        &BrowseFilter {
            term: search,
            tag: filter,
        },
    ) {
        Ok(meals) => meals,
        Err(_) => return println!("Something went wrong. Try again."),
    };

    if meals.is_empty() {
        println!("No meals match your search yet.");
    } else {
        let rows: Vec<MealRow> = meals.iter().map(MealRow::from).collect();
        println!("{}", Table::new(rows));
    }

    println!("{}", super::cart_pill(ctx));
    match cart::service::can_place_order(ctx) {
        Ok(true) => println!("Place order: enabled (browse place-order)"),
        Ok(false) => println!("Place order: disabled (cart is empty)"),
        Err(_) => (),
    }
}

pub fn add(ctx: &mut Context, meal_id: &str) {
    match cart::service::add_meal(ctx, meal_id) {
        Ok(count) => println!("Added to cart ({} item(s)).", count),
        Err(cart::service::Error::MealNotFound) => println!("Meal not found."),
        Err(cart::service::Error::UnexpectedError) => println!("Something went wrong. Try again."),
    }
}

pub fn place_order(ctx: &mut Context) {
    match order_service::place_order(ctx) {
        Ok(order) => {
            println!("Order {} placed!", order.id);
            println!("{}", super::cart_pill(ctx));
        }
        Err(OrderError::EmptyCart) => println!("Place order: disabled (cart is empty)"),
        Err(_) => println!("Something went wrong. Try again."),
    }
}
