use tabled::{Table, Tabled};

use crate::modules::analytics::service;
use crate::types::Context;

#[derive(Tabled)]
struct MetricsRow {
    #[tabled(rename = "Total orders")]
    total_orders: usize,
    #[tabled(rename = "Low waste portions")]
    low_waste_items: usize,
    #[tabled(rename = "Delivered")]
    delivered_orders: usize,
    #[tabled(rename = "Avg items/order")]
    avg_items: String,
}

pub fn render(ctx: &mut Context) {
    let summary = match service::summary(ctx) {
        Ok(summary) => summary,
        Err(_) => return println!("Something went wrong. Try again."),
    };
    let row = MetricsRow {
        total_orders: summary.total_orders,
        low_waste_items: summary.low_waste_items,
        delivered_orders: summary.delivered_orders,
        avg_items: summary.avg_items_label(),
    };
    println!("{}", Table::new([row]));
}
