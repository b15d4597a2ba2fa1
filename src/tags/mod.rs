pub mod rules;
pub mod summary;

pub use rules::{derive_tags, generate_tags, Tag};
pub use summary::generate_summary;
