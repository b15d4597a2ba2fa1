use serde::{Deserialize, Serialize};

/// Vocabulary used for tags, summaries, default clip labels and category labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Locale {
    #[default]
    English,
    Portuguese,
}

impl Locale {
    pub fn default_clip_label(&self) -> &'static str {
        match self {
            Locale::English => "Clip",
            Locale::Portuguese => "Lance",
        }
    }
}
