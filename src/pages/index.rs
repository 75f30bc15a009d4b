use itertools::Itertools;

use crate::modules::auth::gate;
use crate::modules::auth::repository::Session;
use crate::types::Context;

pub fn render(ctx: &mut Context, session: &Session) {
    println!(
        "CloudEats | {} ({})",
        session.username,
        session.role.to_string()
    );
    println!("{}", super::cart_pill(ctx));
    let nav = gate::visible_nav(session.role)
        .into_iter()
        .map(|page| page.target())
        .join("  ");
    println!("Navigation: {}", nav);
}
