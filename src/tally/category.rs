use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::CaptureError, locale::Locale};

/// Conceptual grouping of the action categories, matching the three panels of
/// the capture UI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ActionGroup {
    Passing,
    Offense,
    Defense,
}

impl ActionGroup {
    pub const ALL: [ActionGroup; 3] = [ActionGroup::Passing, ActionGroup::Offense, ActionGroup::Defense];

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (ActionGroup::Passing, Locale::English) => "Passing",
            (ActionGroup::Offense, Locale::English) => "Offense",
            (ActionGroup::Defense, Locale::English) => "Defense",
            (ActionGroup::Passing, Locale::Portuguese) => "Passes",
            (ActionGroup::Offense, Locale::Portuguese) => "Ofensivo",
            (ActionGroup::Defense, Locale::Portuguese) => "Defensivo",
        }
    }
}

/// The 17 in-game actions an analyst can tally. The set is closed: counts are
/// stored positionally, so adding a variant means updating `ALL` and
/// `CATEGORY_COUNT` together.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ActionCategory {
    // passing
    BadPass,
    BackPass,
    BadDefensivePass,
    GoodOffensivePass,
    KeyPass,
    LineBreakingPass,
    // offense
    Cross,
    Assist,
    ShotOnTarget,
    ShotOffTarget,
    Goal,
    // defense
    Tackle,
    Interception,
    BallRecovery,
    CounterPress,
    AerialWon,
    AerialLost,
}

pub const CATEGORY_COUNT: usize = 17;

impl ActionCategory {
    /// Display order, grouped passing → offense → defense.
    pub const ALL: [ActionCategory; CATEGORY_COUNT] = [
        ActionCategory::BadPass,
        ActionCategory::BackPass,
        ActionCategory::BadDefensivePass,
        ActionCategory::GoodOffensivePass,
        ActionCategory::KeyPass,
        ActionCategory::LineBreakingPass,
        ActionCategory::Cross,
        ActionCategory::Assist,
        ActionCategory::ShotOnTarget,
        ActionCategory::ShotOffTarget,
        ActionCategory::Goal,
        ActionCategory::Tackle,
        ActionCategory::Interception,
        ActionCategory::BallRecovery,
        ActionCategory::CounterPress,
        ActionCategory::AerialWon,
        ActionCategory::AerialLost,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn group(&self) -> ActionGroup {
        use ActionCategory::*;
        match self {
            BadPass | BackPass | BadDefensivePass | GoodOffensivePass | KeyPass
            | LineBreakingPass => ActionGroup::Passing,
            Cross | Assist | ShotOnTarget | ShotOffTarget | Goal => ActionGroup::Offense,
            Tackle | Interception | BallRecovery | CounterPress | AerialWon | AerialLost => {
                ActionGroup::Defense
            }
        }
    }

    /// Stable camelCase key, identical to the serialized form.
    pub fn key(&self) -> &'static str {
        use ActionCategory::*;
        match self {
            BadPass => "badPass",
            BackPass => "backPass",
            BadDefensivePass => "badDefensivePass",
            GoodOffensivePass => "goodOffensivePass",
            KeyPass => "keyPass",
            LineBreakingPass => "lineBreakingPass",
            Cross => "cross",
            Assist => "assist",
            ShotOnTarget => "shotOnTarget",
            ShotOffTarget => "shotOffTarget",
            Goal => "goal",
            Tackle => "tackle",
            Interception => "interception",
            BallRecovery => "ballRecovery",
            CounterPress => "counterPress",
            AerialWon => "aerialWon",
            AerialLost => "aerialLost",
        }
    }

    /// Key used by the legacy Portuguese capture UI and stored scouts.
    pub fn legacy_key(&self) -> &'static str {
        use ActionCategory::*;
        match self {
            BadPass => "passeErrado",
            BackPass => "passeParaTras",
            BadDefensivePass => "passeErradoDefensivo",
            GoodOffensivePass => "passeCertoOfensivo",
            KeyPass => "passeDecisivo",
            LineBreakingPass => "passeEntreLinhas",
            Cross => "cruzamento",
            Assist => "assistencia",
            ShotOnTarget => "finalizacaoNoAlvo",
            ShotOffTarget => "finalizacaoFora",
            Goal => "gol",
            Tackle => "desarme",
            Interception => "interceptacao",
            BallRecovery => "recuperacaoPosse",
            CounterPress => "pressaoPosPerda",
            AerialWon => "aereoGanho",
            AerialLost => "aereoPerdido",
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        use ActionCategory::*;
        match locale {
            Locale::English => match self {
                BadPass => "Bad pass",
                BackPass => "Back pass",
                BadDefensivePass => "Bad pass (defensive)",
                GoodOffensivePass => "Good pass (offensive)",
                KeyPass => "Key pass",
                LineBreakingPass => "Line-breaking pass",
                Cross => "Cross",
                Assist => "Assist",
                ShotOnTarget => "Shot on target",
                ShotOffTarget => "Shot off target",
                Goal => "Goal",
                Tackle => "Tackle",
                Interception => "Interception",
                BallRecovery => "Ball recovery",
                CounterPress => "Counter-press",
                AerialWon => "Aerial won",
                AerialLost => "Aerial lost",
            },
            Locale::Portuguese => match self {
                BadPass => "Passe errado",
                BackPass => "Passe para trás",
                BadDefensivePass => "Passe errado (defensivo)",
                GoodOffensivePass => "Passe certo (ofensivo)",
                KeyPass => "Passe decisivo",
                LineBreakingPass => "Passe entre linhas",
                Cross => "Cruzamento",
                Assist => "Assistência",
                ShotOnTarget => "Finalização no alvo",
                ShotOffTarget => "Finalização fora",
                Goal => "Gol",
                Tackle => "Desarme",
                Interception => "Interceptação",
                BallRecovery => "Recuperação de posse",
                CounterPress => "Pressão pós-perda",
                AerialWon => "Aéreo ganho",
                AerialLost => "Aéreo perdido",
            },
        }
    }
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ActionCategory {
    type Err = CaptureError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        ActionCategory::ALL
            .into_iter()
            .find(|c| c.key() == trimmed || c.legacy_key() == trimmed)
            .ok_or_else(|| CaptureError::UnknownCategory(trimmed.to_string()))
    }
}
