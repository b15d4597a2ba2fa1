use crate::{
    locale::Locale,
    tally::{ActionCategory, ActionCounts, ActionGroup},
};

use ActionCategory::*;

/// Minimum passing actions for the passing tag.
const PASSING_TAG_MIN: u32 = 3;
/// Minimum defensive actions (won or lost) for the defense tag.
const DEFENSE_TAG_MIN: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Passing,
    Vision,
    Goal,
    Assist,
    Finishing,
    Crossing,
    Defense,
    Aerial,
    Pressing,
    Scout,
}

impl Tag {
    pub fn text(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::English => match self {
                Tag::Passing => "Passing",
                Tag::Vision => "Vision",
                Tag::Goal => "Goal",
                Tag::Assist => "Assist",
                Tag::Finishing => "Finishing",
                Tag::Crossing => "Crossing",
                Tag::Defense => "Defense",
                Tag::Aerial => "Aerial",
                Tag::Pressing => "Pressing",
                Tag::Scout => "Scout",
            },
            Locale::Portuguese => match self {
                Tag::Passing => "Passe",
                Tag::Vision => "Visão de jogo",
                Tag::Goal => "Gol",
                Tag::Assist => "Assistência",
                Tag::Finishing => "Finalização",
                Tag::Crossing => "Cruzamento",
                Tag::Defense => "Defesa",
                Tag::Aerial => "Aéreo",
                Tag::Pressing => "Pressão",
                Tag::Scout => "Scout",
            },
        }
    }
}

fn any(counts: &ActionCounts, categories: &[ActionCategory]) -> bool {
    categories.iter().any(|c| counts.get(*c) > 0)
}

/// Evaluate every rule in order. Each rule emits at most one tag; when none
/// match the result is the single fallback tag.
pub fn derive_tags(counts: &ActionCounts) -> Vec<Tag> {
    let rules: [(Tag, bool); 9] = [
        (
            Tag::Passing,
            counts.group_total(ActionGroup::Passing) >= PASSING_TAG_MIN,
        ),
        (Tag::Vision, any(counts, &[KeyPass, LineBreakingPass])),
        (Tag::Goal, any(counts, &[Goal])),
        (Tag::Assist, any(counts, &[Assist])),
        (Tag::Finishing, any(counts, &[ShotOnTarget, ShotOffTarget])),
        (Tag::Crossing, any(counts, &[Cross])),
        (
            Tag::Defense,
            counts.group_total(ActionGroup::Defense) >= DEFENSE_TAG_MIN,
        ),
        (Tag::Aerial, any(counts, &[AerialWon, AerialLost])),
        (Tag::Pressing, any(counts, &[CounterPress])),
    ];

    let tags: Vec<Tag> = rules
        .into_iter()
        .filter_map(|(tag, matched)| matched.then_some(tag))
        .collect();

    if tags.is_empty() {
        vec![Tag::Scout]
    } else {
        tags
    }
}

pub fn generate_tags(counts: &ActionCounts, locale: Locale) -> Vec<String> {
    derive_tags(counts)
        .into_iter()
        .map(|tag| tag.text(locale).to_string())
        .collect()
}
