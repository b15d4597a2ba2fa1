pub mod config;
pub mod controller;
pub mod models;

pub use config::CaptureConfig;
pub use controller::CaptureSession;
pub use models::{FinalizeRejected, SessionStats, Subject};
