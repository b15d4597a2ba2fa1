use crate::{
    locale::Locale,
    metrics::{BAD_PASSES, GOOD_PASSES},
    tally::{ActionCategory, ActionCounts},
};

use ActionCategory::*;

/// Defensive successes named in the summary. Pressing and aerials are left to
/// the tags.
const SUMMARY_DEFENSE: [ActionCategory; 3] = [Tackle, Interception, BallRecovery];

/// Build the one-sentence narrative for a report.
///
/// Parts appear in a fixed priority order: pass balance, goals, assists,
/// shots on target, defensive successes. Zero-valued parts are skipped; when
/// every part is zero a fixed low-activity sentence names the subject.
pub fn generate_summary(counts: &ActionCounts, subject_name: &str, locale: Locale) -> String {
    let mut parts: Vec<String> = Vec::new();

    let good = counts.sum_of(&GOOD_PASSES);
    let bad = counts.sum_of(&BAD_PASSES);
    if good > 0 || bad > 0 {
        parts.push(match locale {
            Locale::English => format!("{good} positive passes and {bad} errors"),
            Locale::Portuguese => format!("{good} passes positivos e {bad} erros"),
        });
    }

    let goals = counts.get(Goal);
    if goals > 0 {
        parts.push(match locale {
            Locale::English => format!("{goals} goal(s)"),
            Locale::Portuguese => format!("{goals} gol(s)"),
        });
    }

    let assists = counts.get(Assist);
    if assists > 0 {
        parts.push(match locale {
            Locale::English => format!("{assists} assist(s)"),
            Locale::Portuguese => format!("{assists} assistência(s)"),
        });
    }

    let on_target = counts.get(ShotOnTarget);
    if on_target > 0 {
        parts.push(match locale {
            Locale::English => format!("{on_target} shot(s) on target"),
            Locale::Portuguese => format!("{on_target} finalização(ões) no alvo"),
        });
    }

    let defense = counts.sum_of(&SUMMARY_DEFENSE);
    if defense > 0 {
        parts.push(match locale {
            Locale::English => format!("{defense} successful defensive actions"),
            Locale::Portuguese => format!("{defense} ações defensivas positivas"),
        });
    }

    if parts.is_empty() {
        return match locale {
            Locale::English => {
                format!("Scouting completed for {subject_name}. Few actions recorded.")
            }
            Locale::Portuguese => {
                format!("Scout realizado para {subject_name}. Poucas ações registradas.")
            }
        };
    }

    format!("{subject_name}: {}.", parts.join(", "))
}
