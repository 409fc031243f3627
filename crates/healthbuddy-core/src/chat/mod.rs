//! Chat orchestration: the session history store seam and the
//! controller that owns the submit cycle.

pub mod controller;
pub mod repository;

pub use controller::ChatController;
pub use repository::ChatRepository;
