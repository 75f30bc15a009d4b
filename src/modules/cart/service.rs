use super::repository;
use crate::modules::menu;
use crate::modules::menu::repository::MenuItem;
use crate::modules::view::ViewEvent;
use crate::types::Context;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MealNotFound,
    UnexpectedError,
}

/// Appends a snapshot of the meal to the cart. No dedup and no quantity
/// aggregation; repeats are separate entries. Returns the new cart size.
pub fn add_meal(ctx: &mut Context, meal_id: &str) -> Result<usize, Error> {
    let meal = menu::repository::find_by_id(ctx.store.as_mut(), meal_id)
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::MealNotFound)?;

    let mut cart = repository::list(ctx.store.as_ref()).map_err(|_| Error::UnexpectedError)?;
    cart.push(meal);
    repository::save(ctx.store.as_mut(), &cart).map_err(|_| Error::UnexpectedError)?;

    let count = cart.len();
    ctx.views.publish(&ViewEvent::CartChanged(count));
    Ok(count)
}

pub fn contents(ctx: &Context) -> Result<Vec<MenuItem>, Error> {
    repository::list(ctx.store.as_ref()).map_err(|_| Error::UnexpectedError)
}

/// Order placement is enabled exactly when the cart is non-empty.
pub fn can_place_order(ctx: &Context) -> Result<bool, Error> {
    Ok(!contents(ctx)?.is_empty())
}
