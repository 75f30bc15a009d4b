use clap::Parser;
use tracing_subscriber::prelude::*;

use cloudeats::modules::analytics;
use cloudeats::modules::view::ViewEvent;
use cloudeats::pages::{self, Cli};
use cloudeats::types::ToContext;
use cloudeats::utils::config;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let mut config = config::get_config();
    if let Some(path) = cli.store.clone() {
        config.store.path = path;
    }

    let mut ctx = match config.to_context() {
        Ok(ctx) => ctx,
        Err(err) => {
            tracing::error!("Failed to open store: {}", err);
            std::process::exit(1);
        }
    };

    // Read-side projection recomputed after every order mutation.
    ctx.views.subscribe(|event| {
        if let ViewEvent::OrdersChanged(orders) = event {
            let summary = analytics::service::summarize(orders);
            tracing::debug!(
                total_orders = summary.total_orders,
                delivered_orders = summary.delivered_orders,
                "Analytics recomputed"
            );
        }
    });

    pages::open(&mut ctx, cli.command);
}
