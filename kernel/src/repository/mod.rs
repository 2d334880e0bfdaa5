pub mod health;
pub mod meeting;
pub mod person;
pub mod schedule;
