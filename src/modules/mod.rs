pub mod analytics;
pub mod auth;
pub mod cart;
pub mod menu;
pub mod order;
pub mod user;
pub mod view;
