use crate::modules::order::{self, repository::Order, repository::OrderStatus};
use crate::types::Context;

#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub total_orders: usize,
    pub low_waste_items: usize,
    pub delivered_orders: usize,
    /// Average line items per order, rounded to one decimal; 0 with no
    /// orders.
    pub avg_items_per_order: f64,
}

impl Summary {
    /// One-decimal rendering, matching the dashboard ("2.0").
    pub fn avg_items_label(&self) -> String {
        format!("{:.1}", self.avg_items_per_order)
    }
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

/// Pure projection of the order list, recomputed on demand rather than
/// maintained incrementally.
pub fn summarize(orders: &[Order]) -> Summary {
    let total_orders = orders.len();
    let low_waste_items = orders
        .iter()
        .flat_map(|order| order.items.iter())
        .filter(|item| item.is_low_waste())
        .count();
    let delivered_orders = orders
        .iter()
        .filter(|order| order.status == OrderStatus::Delivered)
        .count();
    let total_items: usize = orders.iter().map(|order| order.items.len()).sum();
    let avg_items_per_order = match total_orders {
        0 => 0.0,
        count => ((total_items as f64 / count as f64) * 10.0).round() / 10.0,
    };

    Summary {
        total_orders,
        low_waste_items,
        delivered_orders,
        avg_items_per_order,
    }
}

pub fn summary(ctx: &Context) -> Result<Summary, Error> {
    let orders = order::repository::list(ctx.store.as_ref()).map_err(|_| Error::UnexpectedError)?;
    Ok(summarize(&orders))
}
