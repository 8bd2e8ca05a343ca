// src/services.rs

pub mod auth;
pub mod billing_period;
pub mod dashboard_service;
pub mod document_service;
pub mod expense_service;
pub mod occupancy;
pub mod payment_service;
pub mod resident_service;
pub mod room_service;
pub mod storage;
