use cloudeats::modules::analytics::service::summary;
use cloudeats::modules::cart;
use cloudeats::modules::order::service::{apply_transition, place_order, TransitionAction};
use cloudeats::modules::user::repository::Role;
use cloudeats::types::Context;

fn place(ctx: &mut Context, meal_ids: &[&str]) -> String {
    for meal_id in meal_ids {
        cart::service::add_meal(ctx, meal_id).unwrap();
    }
    place_order(ctx).unwrap().id
}

#[test]
fn no_orders_means_every_metric_is_zero() {
    let ctx = Context::in_memory();
    let summary = summary(&ctx).unwrap();
    assert_eq!(summary.total_orders, 0);
    assert_eq!(summary.low_waste_items, 0);
    assert_eq!(summary.delivered_orders, 0);
    assert_eq!(summary.avg_items_label(), "0.0");
}

#[test]
fn averages_over_two_orders_with_three_and_one_items() {
    let mut ctx = Context::in_memory();
    // m3 is the only standard-tagged seeded item.
    place(&mut ctx, &["m3", "m3", "m3"]);
    place(&mut ctx, &["m3"]);

    let summary = summary(&ctx).unwrap();
    assert_eq!(summary.total_orders, 2);
    assert_eq!(summary.low_waste_items, 0);
    assert_eq!(summary.avg_items_label(), "2.0");
}

#[test]
fn counts_low_waste_line_items_across_orders() {
    let mut ctx = Context::in_memory();
    // m1 and m2 carry the lowWaste tag, m3 does not.
    place(&mut ctx, &["m1", "m2", "m3"]);
    place(&mut ctx, &["m1"]);

    let summary = summary(&ctx).unwrap();
    assert_eq!(summary.low_waste_items, 3);
}

#[test]
fn delivered_count_follows_the_state_machine() {
    let mut ctx = Context::in_memory();
    let order_id = place(&mut ctx, &["m1"]);
    place(&mut ctx, &["m2"]);

    apply_transition(&mut ctx, &order_id, TransitionAction::Accept, Role::Restaurant).unwrap();
    apply_transition(&mut ctx, &order_id, TransitionAction::MarkOnRoute, Role::Courier).unwrap();
    apply_transition(&mut ctx, &order_id, TransitionAction::MarkDelivered, Role::Courier).unwrap();

    let summary = summary(&ctx).unwrap();
    assert_eq!(summary.total_orders, 2);
    assert_eq!(summary.delivered_orders, 1);
    assert_eq!(summary.avg_items_label(), "1.0");
}
