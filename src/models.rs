pub mod auth;
pub mod dashboard;
pub mod expense;
pub mod payment;
pub mod resident;
pub mod room;
