//! Route handlers organized by functionality.

pub mod assignments;
pub mod auth;
pub mod chat;
pub mod courses;
pub mod health;
pub mod schedules;
