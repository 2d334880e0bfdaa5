pub mod meeting;
pub mod person;
pub mod schedule;
