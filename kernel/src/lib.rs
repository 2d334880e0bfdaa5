pub mod availability;
pub mod model;
pub mod repository;
