pub mod id;
pub mod list;
pub mod meeting;
pub mod person;
pub mod role;
pub mod schedule;
