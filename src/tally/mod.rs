pub mod category;
pub mod counts;

pub use category::{ActionCategory, ActionGroup, CATEGORY_COUNT};
pub use counts::{ActionCounts, TallySection};
