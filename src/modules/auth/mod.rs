pub mod gate;
pub mod repository;
pub mod service;
