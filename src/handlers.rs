// src/handlers.rs

pub mod auth;
pub mod dashboard;
pub mod expenses;
pub mod payments;
pub mod reports;
pub mod residents;
pub mod rooms;
