//! Wellness Coach: local, single-user wellness coaching service.

pub mod accounts;
pub mod coach;
pub mod config;
pub mod error;
pub mod journal;
pub mod onboarding;
pub mod plans;
pub mod routes;
pub mod store;
pub mod workout;
