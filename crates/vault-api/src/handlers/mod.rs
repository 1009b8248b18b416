//! Request handlers grouped by resource.

pub mod auth;
pub mod cron;
pub mod health;
pub mod notification;
pub mod share;
pub mod warranty;
