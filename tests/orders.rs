use std::cell::RefCell;
use std::rc::Rc;

use cloudeats::modules::cart;
use cloudeats::modules::order::repository::OrderStatus;
use cloudeats::modules::order::service::{
    apply_transition, courier_view, customer_view, list_orders, place_order, restaurant_view,
    Error, TransitionAction,
};
use cloudeats::modules::user::repository::Role;
use cloudeats::modules::view::ViewEvent;
use cloudeats::types::Context;

fn fill_cart(ctx: &mut Context, meal_ids: &[&str]) {
    for meal_id in meal_ids {
        cart::service::add_meal(ctx, meal_id).unwrap();
    }
}

#[test]
fn placing_an_order_snapshots_the_cart_and_clears_it() {
    let mut ctx = Context::in_memory();
    fill_cart(&mut ctx, &["m1", "m1", "m3"]);

    let order = place_order(&mut ctx).unwrap();
    assert_eq!(order.id, "ORD-001");
    assert_eq!(order.items.len(), 3);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.restaurant, "CloudEats Kitchen");

    assert!(cart::service::contents(&ctx).unwrap().is_empty());
    assert_eq!(list_orders(&ctx).unwrap().len(), 1);
}

#[test]
fn order_ids_are_sequential_and_zero_padded() {
    let mut ctx = Context::in_memory();
    fill_cart(&mut ctx, &["m1"]);
    assert_eq!(place_order(&mut ctx).unwrap().id, "ORD-001");
    fill_cart(&mut ctx, &["m2"]);
    assert_eq!(place_order(&mut ctx).unwrap().id, "ORD-002");
}

#[test]
fn placing_with_an_empty_cart_is_refused() {
    let mut ctx = Context::in_memory();
    assert_eq!(place_order(&mut ctx).unwrap_err(), Error::EmptyCart);
    assert!(list_orders(&ctx).unwrap().is_empty());
}

#[test]
fn lifecycle_accept_then_deliver_is_visible_in_every_view() {
    let mut ctx = Context::in_memory();
    fill_cart(&mut ctx, &["m1"]);
    let order = place_order(&mut ctx).unwrap();

    let accepted =
        apply_transition(&mut ctx, &order.id, TransitionAction::Accept, Role::Restaurant).unwrap();
    assert_eq!(accepted.status, OrderStatus::Accepted);

    let on_route =
        apply_transition(&mut ctx, &order.id, TransitionAction::MarkOnRoute, Role::Courier)
            .unwrap();
    assert_eq!(on_route.status, OrderStatus::OnRoute);

    let delivered = apply_transition(
        &mut ctx,
        &order.id,
        TransitionAction::MarkDelivered,
        Role::Courier,
    )
    .unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);

    // Delivered orders leave the restaurant and courier views but stay in
    // the customer's history.
    let orders = list_orders(&ctx).unwrap();
    assert_eq!(customer_view(&orders).len(), 1);
    assert!(restaurant_view(&orders).is_empty());
    assert!(courier_view(&orders).is_empty());
}

#[test]
fn rejected_orders_stay_on_the_restaurant_page_but_not_the_courier_page() {
    let mut ctx = Context::in_memory();
    fill_cart(&mut ctx, &["m1"]);
    let order = place_order(&mut ctx).unwrap();
    apply_transition(&mut ctx, &order.id, TransitionAction::Reject, Role::Restaurant).unwrap();

    let orders = list_orders(&ctx).unwrap();
    assert_eq!(restaurant_view(&orders).len(), 1);
    assert!(courier_view(&orders).is_empty());
    assert_eq!(customer_view(&orders).len(), 1);
}

#[test]
fn transitions_off_the_lifecycle_table_are_refused() {
    let mut ctx = Context::in_memory();
    fill_cart(&mut ctx, &["m1"]);
    let order = place_order(&mut ctx).unwrap();

    // A courier cannot deliver an order the restaurant has not accepted.
    assert_eq!(
        apply_transition(&mut ctx, &order.id, TransitionAction::MarkDelivered, Role::Courier)
            .unwrap_err(),
        Error::InvalidTransition
    );

    apply_transition(&mut ctx, &order.id, TransitionAction::Reject, Role::Restaurant).unwrap();
    assert_eq!(
        apply_transition(&mut ctx, &order.id, TransitionAction::Accept, Role::Restaurant)
            .unwrap_err(),
        Error::InvalidTransition
    );

    let orders = list_orders(&ctx).unwrap();
    assert_eq!(orders[0].status, OrderStatus::Rejected);
}

#[test]
fn reapplying_a_transition_is_an_allowed_no_op() {
    let mut ctx = Context::in_memory();
    fill_cart(&mut ctx, &["m1"]);
    let order = place_order(&mut ctx).unwrap();

    apply_transition(&mut ctx, &order.id, TransitionAction::Accept, Role::Restaurant).unwrap();
    let again =
        apply_transition(&mut ctx, &order.id, TransitionAction::Accept, Role::Restaurant).unwrap();
    assert_eq!(again.status, OrderStatus::Accepted);
}

#[test]
fn roles_outside_the_action_owner_are_refused() {
    let mut ctx = Context::in_memory();
    fill_cart(&mut ctx, &["m1"]);
    let order = place_order(&mut ctx).unwrap();

    assert_eq!(
        apply_transition(&mut ctx, &order.id, TransitionAction::Accept, Role::Courier).unwrap_err(),
        Error::RoleNotAllowed
    );
    assert_eq!(
        apply_transition(&mut ctx, &order.id, TransitionAction::Accept, Role::Customer)
            .unwrap_err(),
        Error::RoleNotAllowed
    );

    // Admin holds both pages, so it may drive both sides.
    apply_transition(&mut ctx, &order.id, TransitionAction::Accept, Role::Admin).unwrap();
    apply_transition(&mut ctx, &order.id, TransitionAction::MarkOnRoute, Role::Admin).unwrap();
}

#[test]
fn unknown_order_ids_are_reported() {
    let mut ctx = Context::in_memory();
    assert_eq!(
        apply_transition(&mut ctx, "ORD-999", TransitionAction::Accept, Role::Restaurant)
            .unwrap_err(),
        Error::OrderNotFound
    );
}

#[test]
fn order_mutations_notify_view_subscribers() {
    let mut ctx = Context::in_memory();
    let observed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&observed);
    ctx.views.subscribe(move |event| {
        if let ViewEvent::OrdersChanged(orders) = event {
            sink.borrow_mut().push(orders.len());
        }
    });

    fill_cart(&mut ctx, &["m1"]);
    let order = place_order(&mut ctx).unwrap();
    apply_transition(&mut ctx, &order.id, TransitionAction::Accept, Role::Restaurant).unwrap();

    assert_eq!(*observed.borrow(), vec![1, 1]);
}

#[test]
fn order_snapshots_survive_menu_deletion() {
    use cloudeats::modules::menu;

    let mut ctx = Context::in_memory();
    fill_cart(&mut ctx, &["m1"]);
    let order = place_order(&mut ctx).unwrap();

    menu::service::delete_meal(&mut ctx, "m1").unwrap();
    assert!(menu::repository::find_by_id(ctx.store.as_mut(), "m1")
        .unwrap()
        .is_none());

    let orders = list_orders(&ctx).unwrap();
    assert_eq!(orders[0].id, order.id);
    assert_eq!(orders[0].items[0].id, "m1");
}
