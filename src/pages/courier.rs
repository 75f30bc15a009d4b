use tabled::{Table, Tabled};

use crate::modules::order;
use crate::modules::order::repository::Order;
use crate::modules::order::service::{self as order_service, TransitionAction};
use crate::modules::user::repository::Role;
use crate::types::Context;

#[derive(Tabled)]
struct DeliveryRow {
    #[tabled(rename = "Order")]
    id: String,
    #[tabled(rename = "Restaurant")]
    restaurant: String,
    #[tabled(rename = "Drop-off")]
    drop_off: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Stage")]
    stage: &'static str,
}

impl From<&Order> for DeliveryRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            restaurant: order.restaurant.clone(),
            drop_off: String::from("Customer address (mock)"),
            status: order.status.to_string(),
            stage: order.status.category(),
        }
    }
}

pub fn render(ctx: &mut Context) {
    let orders = match order_service::list_orders(ctx) {
        Ok(orders) => orders,
        Err(_) => return println!("Something went wrong. Try again."),
    };
    let eligible = order_service::courier_view(&orders);
    if eligible.is_empty() {
        return println!("No orders available.");
    }
    let rows: Vec<DeliveryRow> = eligible.iter().map(DeliveryRow::from).collect();
    println!("{}", Table::new(rows));
}

pub fn on_route(ctx: &mut Context, order_id: &str, role: Role) {
    transition(ctx, order_id, TransitionAction::MarkOnRoute, role);
}

pub fn delivered(ctx: &mut Context, order_id: &str, role: Role) {
    transition(ctx, order_id, TransitionAction::MarkDelivered, role);
}

fn transition(ctx: &mut Context, order_id: &str, action: TransitionAction, role: Role) {
    match order_service::apply_transition(ctx, order_id, action, role) {
        Ok(updated) => {
            println!("Order {} is now: {}.", updated.id, updated.status.to_string());
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
