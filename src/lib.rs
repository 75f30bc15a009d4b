pub mod modules;
pub mod pages;
pub mod types;
pub mod utils;
