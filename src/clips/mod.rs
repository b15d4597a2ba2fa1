pub mod board;
pub mod manager;
pub mod models;
pub mod watch;

pub use board::ClipBoard;
pub use manager::ClipManager;
pub use models::{format_timestamp, Clip, ClipMeta, ClipState, Confidence, PendingClip};
pub use watch::{ActiveClip, EndWatch, PollOutcome};
