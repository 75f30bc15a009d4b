mod analytics;
mod browse;
mod courier;
mod index;
mod login;
mod orders;
mod register;
mod restaurant;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::modules::auth::gate::{self, Outcome, Page};
use crate::modules::auth::repository::Session;
use crate::modules::auth::service::SignOutError;
use crate::modules::menu::service::MealCategory;
use crate::modules::user::repository::Role;
use crate::modules::{auth, cart};
use crate::types::Context;

#[derive(Parser)]
#[command(
    name = "cloudeats",
    about = "Role-gated mock food ordering over a local key-value store",
    version
)]
pub struct Cli {
    /// Store file path (overrides CLOUDEATS_STORE_PATH).
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

/// Every subcommand is a page navigation; the access gate runs before the
/// page does.
#[derive(Subcommand)]
pub enum Command {
    /// Sign in and open the role's landing page
    Login { username: String, password: String },
    /// Create an account, sign in, open the role's landing page
    Register {
        username: String,
        password: String,
        confirm: String,
        role: Role,
    },
    /// Sign out and return to the login page
    Logout,
    /// Landing page with the navigation visible to the current role
    Index,
    /// Meal catalog and cart
    Browse {
        /// Match against meal name or restaurant
        #[arg(long)]
        search: Option<String>,
        /// Only meals carrying this tag ("all" disables the filter)
        #[arg(long)]
        filter: Option<String>,
        #[command(subcommand)]
        action: Option<BrowseAction>,
    },
    /// Order history across all statuses
    Orders,
    /// Incoming order queue and menu management
    Restaurant {
        #[command(subcommand)]
        action: Option<RestaurantAction>,
    },
    /// Delivery queue
    Courier {
        #[command(subcommand)]
        action: Option<CourierAction>,
    },
    /// Rollup metrics over all orders
    Analytics,
}

#[derive(Subcommand)]
pub enum BrowseAction {
    /// Add a meal snapshot to the cart
    Add { meal_id: String },
    /// Turn the cart into a new pending order
    PlaceOrder,
}

#[derive(Subcommand)]
pub enum RestaurantAction {
    /// Accept a pending order
    Accept { order_id: String },
    /// Reject a pending order
    Reject { order_id: String },
    /// Menu management
    #[command(subcommand)]
    Menu(MenuAction),
}

#[derive(Subcommand)]
pub enum CourierAction {
    /// Mark an accepted order as on route
    OnRoute { order_id: String },
    /// Mark an on-route order as delivered
    Delivered { order_id: String },
}

#[derive(Subcommand)]
pub enum MenuAction {
    /// Add a meal to the menu
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        category: MealCategory,
        #[arg(long, default_value = "")]
        description: String,
        /// Image file to embed as a data URL
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Edit a meal; omitted flags keep the stored values
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        category: Option<MealCategory>,
        #[arg(long)]
        description: Option<String>,
        /// Replacement image; omit to keep the current one
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Remove a meal from the menu
    Remove {
        id: String,
        /// Confirm the irreversible removal
        #[arg(long)]
        yes: bool,
    },
}

fn target_for(command: &Command) -> &'static str {
    match command {
        Command::Login { .. } | Command::Logout => Page::Login.target(),
        Command::Register { .. } => Page::Register.target(),
        Command::Index => Page::Index.target(),
        Command::Browse { .. } => Page::Browse.target(),
        Command::Orders => Page::Orders.target(),
        Command::Restaurant { .. } => Page::Restaurant.target(),
        Command::Courier { .. } => Page::Courier.target(),
        Command::Analytics => Page::Analytics.target(),
    }
}

/// Navigates to the page behind a command: run the gate, then either the
/// requested page or the page the gate redirects to.
pub fn open(ctx: &mut Context, command: Command) {
    if let Command::Logout = command {
        match auth::service::sign_out(ctx) {
            Ok(()) => println!("Signed out. Opening {}.", Page::Login.target()),
            Err(SignOutError::UnexpectedError) => println!("Something went wrong. Try again."),
        }
        return;
    }

    let session = auth::repository::current(ctx.store.as_ref());
    match gate::gate(target_for(&command), session.as_ref()) {
        Outcome::Allow(_) => dispatch(ctx, command, session),
        Outcome::RedirectToLogin => {
            println!("Not signed in. Redirecting to {}.", Page::Login.target());
            login::render(ctx);
        }
        Outcome::Redirect(page) => {
            println!(
                "{} is not available to your role. Redirecting to {}.",
                target_for(&command),
                page.target()
            );
            render_page(ctx, page, session.as_ref());
        }
    }
}

fn dispatch(ctx: &mut Context, command: Command, session: Option<Session>) {
    match command {
        Command::Login { username, password } => login::run(ctx, username, password),
        Command::Register {
            username,
            password,
            confirm,
            role,
        } => register::run(ctx, username, password, confirm, role),
        Command::Logout => unreachable!("logout is handled before the gate"),
        Command::Index => match session {
            Some(session) => index::render(ctx, &session),
            None => login::render(ctx),
        },
        Command::Browse {
            search,
            filter,
            action,
        } => match action {
            None => browse::render(ctx, search, filter),
            Some(BrowseAction::Add { meal_id }) => browse::add(ctx, &meal_id),
            Some(BrowseAction::PlaceOrder) => browse::place_order(ctx),
        },
        Command::Orders => orders::render(ctx),
        Command::Restaurant { action } => {
            let role = match session {
                Some(session) => session.role,
                None => return login::render(ctx),
            };
            match action {
                None => restaurant::render(ctx),
                Some(RestaurantAction::Accept { order_id }) => {
                    restaurant::accept(ctx, &order_id, role)
                }
                Some(RestaurantAction::Reject { order_id }) => {
                    restaurant::reject(ctx, &order_id, role)
                }
                Some(RestaurantAction::Menu(action)) => restaurant::menu(ctx, action),
            }
        }
        Command::Courier { action } => {
            let role = match session {
                Some(session) => session.role,
                None => return login::render(ctx),
            };
            match action {
                None => courier::render(ctx),
                Some(CourierAction::OnRoute { order_id }) => courier::on_route(ctx, &order_id, role),
                Some(CourierAction::Delivered { order_id }) => {
                    courier::delivered(ctx, &order_id, role)
                }
            }
        }
        Command::Analytics => analytics::render(ctx),
    }
}

fn render_page(ctx: &mut Context, page: Page, session: Option<&Session>) {
    match page {
        Page::Index => match session {
            Some(session) => index::render(ctx, session),
            None => login::render(ctx),
        },
        Page::Browse => browse::render(ctx, None, None),
        Page::Orders => orders::render(ctx),
        Page::Restaurant => restaurant::render(ctx),
        Page::Courier => courier::render(ctx),
        Page::Analytics => analytics::render(ctx),
        Page::Login => login::render(ctx),
        Page::Register => register::render(),
    }
}

/// Header cart pill: item count shown on every page that has one.
fn cart_pill(ctx: &Context) -> String {
    match cart::service::contents(ctx) {
        Ok(items) => format!("Cart: {} item(s)", items.len()),
        Err(_) => String::from("Cart: unavailable"),
    }
}
