use tabled::{Table, Tabled};

use crate::modules::order::repository::Order;
use crate::modules::order::service;
use crate::types::Context;

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "Order")]
    id: String,
    #[tabled(rename = "Restaurant")]
    restaurant: String,
    #[tabled(rename = "Items")]
    items: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Stage")]
    stage: &'static str,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            restaurant: order.restaurant.clone(),
            items: format!("{} item(s)", order.items.len()),
            status: order.status.to_string(),
            stage: order.status.category(),
        }
    }
}

pub fn render(ctx: &mut Context) {
    let orders = match service::list_orders(ctx) {
        Ok(orders) => orders,
        Err(_) => return println!("Something went wrong. Try again."),
    };
    let visible = service::customer_view(&orders);
    if visible.is_empty() {
        return println!("No orders yet.");
    }
    let rows: Vec<OrderRow> = visible.iter().map(OrderRow::from).collect();
    println!("{}", Table::new(rows));
}
