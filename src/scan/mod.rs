pub mod commands;
pub mod controller;
pub mod error;
pub mod id;
pub mod state;

pub use controller::ScanController;
pub use error::ScanError;
pub use id::allocate_id;
pub use state::{LifecycleState, ScanView, RECALL_NOT_FOUND};
