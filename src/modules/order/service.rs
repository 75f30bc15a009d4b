use super::repository::{self, Order, OrderStatus};
use crate::modules::cart;
use crate::modules::menu::repository::DEFAULT_RESTAURANT;
use crate::modules::user::repository::Role;
use crate::modules::view::ViewEvent;
use crate::types::Context;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    EmptyCart,
    OrderNotFound,
    InvalidTransition,
    RoleNotAllowed,
    UnexpectedError,
}

/// Turns the cart into a new pending order. The order's restaurant label is
/// copied from the first cart item; items from several restaurants merge
/// silently under that one label.
pub fn place_order(ctx: &mut Context) -> Result<Order, Error> {
    let items = cart::repository::list(ctx.store.as_ref()).map_err(|_| Error::UnexpectedError)?;
    if items.is_empty() {
        return Err(Error::EmptyCart);
    }

    let restaurant = items
        .first()
        .map(|item| item.restaurant.clone())
        .filter(|restaurant| !restaurant.is_empty())
        .unwrap_or_else(|| String::from(DEFAULT_RESTAURANT));

    let order = repository::create(
        ctx.store.as_mut(),
        repository::CreateOrderPayload { restaurant, items },
    )
    .map_err(|_| Error::UnexpectedError)?;

    cart::repository::clear(ctx.store.as_mut()).map_err(|_| Error::UnexpectedError)?;
    ctx.views.publish(&ViewEvent::CartChanged(0));
    publish_orders(ctx)?;

    Ok(order)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionAction {
    Accept,
    Reject,
    MarkOnRoute,
    MarkDelivered,
}

impl TransitionAction {
    pub fn target(self) -> OrderStatus {
        match self {
            TransitionAction::Accept => OrderStatus::Accepted,
            TransitionAction::Reject => OrderStatus::Rejected,
            TransitionAction::MarkOnRoute => OrderStatus::OnRoute,
            TransitionAction::MarkDelivered => OrderStatus::Delivered,
        }
    }

    /// Re-applying an action to an order already in its target state is a
    /// permitted no-op; everything else off the table is refused.
    fn allowed_from(self, status: OrderStatus) -> bool {
        match self {
            TransitionAction::Accept => {
                matches!(status, OrderStatus::Pending | OrderStatus::Accepted)
            }
            TransitionAction::Reject => {
                matches!(status, OrderStatus::Pending | OrderStatus::Rejected)
            }
            TransitionAction::MarkOnRoute => {
                matches!(status, OrderStatus::Accepted | OrderStatus::OnRoute)
            }
            TransitionAction::MarkDelivered => {
                matches!(status, OrderStatus::OnRoute | OrderStatus::Delivered)
            }
        }
    }

    /// Admin holds both the restaurant and courier pages, so it may drive
    /// either side of the lifecycle.
    fn allowed_for(self, role: Role) -> bool {
        match self {
            TransitionAction::Accept | TransitionAction::Reject => {
                matches!(role, Role::Restaurant | Role::Admin)
            }
            TransitionAction::MarkOnRoute | TransitionAction::MarkDelivered => {
                matches!(role, Role::Courier | Role::Admin)
            }
        }
    }
}

/// Applies a status transition: mutate in place, persist the full list,
/// notify the view hub.
pub fn apply_transition(
    ctx: &mut Context,
    order_id: &str,
    action: TransitionAction,
    role: Role,
) -> Result<Order, Error> {
    if !action.allowed_for(role) {
        return Err(Error::RoleNotAllowed);
    }

    let mut orders = repository::list(ctx.store.as_ref()).map_err(|_| Error::UnexpectedError)?;
    let order = orders
        .iter_mut()
        .find(|order| order.id == order_id)
        .ok_or(Error::OrderNotFound)?;

    if !action.allowed_from(order.status) {
        return Err(Error::InvalidTransition);
    }

    order.status = action.target();
    let updated = order.clone();

    repository::save(ctx.store.as_mut(), &orders).map_err(|_| Error::UnexpectedError)?;
    ctx.views.publish(&ViewEvent::OrdersChanged(orders));

    Ok(updated)
}

pub fn list_orders(ctx: &Context) -> Result<Vec<Order>, Error> {
    repository::list(ctx.store.as_ref()).map_err(|_| Error::UnexpectedError)
}

/// Customers see every order, whatever its status.
pub fn customer_view(orders: &[Order]) -> Vec<Order> {
    orders.to_vec()
}

/// The restaurant queue keeps rejected orders visible and only drops
/// delivered ones.
pub fn restaurant_view(orders: &[Order]) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| order.status != OrderStatus::Delivered)
        .cloned()
        .collect()
}

/// Couriers only see orders still moving: neither rejected nor delivered.
pub fn courier_view(orders: &[Order]) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| {
            !matches!(
                order.status,
                OrderStatus::Rejected | OrderStatus::Delivered
            )
        })
        .cloned()
        .collect()
}

fn publish_orders(ctx: &mut Context) -> Result<(), Error> {
    let orders = repository::list(ctx.store.as_ref()).map_err(|_| Error::UnexpectedError)?;
    ctx.views.publish(&ViewEvent::OrdersChanged(orders));
    Ok(())
}
