//! API route handlers

pub mod election;
pub mod health;
pub mod voting;
