pub mod admin_repo;
pub use admin_repo::AdminRepository;
pub mod room_repo;
pub use room_repo::RoomRepository;
pub mod resident_repo;
pub use resident_repo::ResidentRepository;
pub mod payment_repo;
pub use payment_repo::PaymentRepository;
pub mod expense_repo;
pub use expense_repo::ExpenseRepository;
