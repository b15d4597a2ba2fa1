use serde::{Deserialize, Serialize};

use super::category::{ActionCategory, ActionGroup, CATEGORY_COUNT};

/// Current tally of every action category for one capture session.
///
/// Stored positionally so all 17 categories are always present. Values are
/// unsigned and `decrement` saturates at zero, so a count can never go
/// negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "CountsRecord", into = "CountsRecord")]
pub struct ActionCounts {
    values: [u32; CATEGORY_COUNT],
}

/// One row group of the "numbers only" tally sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TallySection {
    pub group: ActionGroup,
    pub rows: Vec<(ActionCategory, u32)>,
}

impl ActionCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: ActionCategory) -> u32 {
        self.values[category.index()]
    }

    pub fn increment(&mut self, category: ActionCategory) {
        let slot = &mut self.values[category.index()];
        *slot = slot.saturating_add(1);
    }

    pub fn decrement(&mut self, category: ActionCategory) {
        let slot = &mut self.values[category.index()];
        *slot = slot.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.values = [0; CATEGORY_COUNT];
    }

    /// Sum of all 17 categories; the activity-volume signal for intensity.
    pub fn total(&self) -> u32 {
        self.values.iter().fold(0u32, |acc, v| acc.saturating_add(*v))
    }

    pub fn sum_of(&self, categories: &[ActionCategory]) -> u32 {
        categories
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(self.get(*c)))
    }

    pub fn group_total(&self, group: ActionGroup) -> u32 {
        self.iter()
            .filter(|(category, _)| category.group() == group)
            .fold(0u32, |acc, (_, v)| acc.saturating_add(v))
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|v| *v == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActionCategory, u32)> + '_ {
        ActionCategory::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    pub fn sections(&self) -> Vec<TallySection> {
        ActionGroup::ALL
            .iter()
            .map(|group| TallySection {
                group: *group,
                rows: self.iter().filter(|(c, _)| c.group() == *group).collect(),
            })
            .collect()
    }
}

/// Named wire form of [`ActionCounts`]. Accepts the legacy Portuguese keys
/// through aliases; absent keys read as zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
struct CountsRecord {
    #[serde(alias = "passeErrado")]
    bad_pass: u32,
    #[serde(alias = "passeParaTras")]
    back_pass: u32,
    #[serde(alias = "passeErradoDefensivo")]
    bad_defensive_pass: u32,
    #[serde(alias = "passeCertoOfensivo")]
    good_offensive_pass: u32,
    #[serde(alias = "passeDecisivo")]
    key_pass: u32,
    #[serde(alias = "passeEntreLinhas")]
    line_breaking_pass: u32,
    #[serde(alias = "cruzamento")]
    cross: u32,
    #[serde(alias = "assistencia")]
    assist: u32,
    #[serde(alias = "finalizacaoNoAlvo")]
    shot_on_target: u32,
    #[serde(alias = "finalizacaoFora")]
    shot_off_target: u32,
    #[serde(alias = "gol")]
    goal: u32,
    #[serde(alias = "desarme")]
    tackle: u32,
    #[serde(alias = "interceptacao")]
    interception: u32,
    #[serde(alias = "recuperacaoPosse")]
    ball_recovery: u32,
    #[serde(alias = "pressaoPosPerda")]
    counter_press: u32,
    #[serde(alias = "aereoGanho")]
    aerial_won: u32,
    #[serde(alias = "aereoPerdido")]
    aerial_lost: u32,
}

impl From<CountsRecord> for ActionCounts {
    fn from(r: CountsRecord) -> Self {
        Self {
            values: [
                r.bad_pass,
                r.back_pass,
                r.bad_defensive_pass,
                r.good_offensive_pass,
                r.key_pass,
                r.line_breaking_pass,
                r.cross,
                r.assist,
                r.shot_on_target,
                r.shot_off_target,
                r.goal,
                r.tackle,
                r.interception,
                r.ball_recovery,
                r.counter_press,
                r.aerial_won,
                r.aerial_lost,
            ],
        }
    }
}

impl From<ActionCounts> for CountsRecord {
    fn from(counts: ActionCounts) -> Self {
        use ActionCategory::*;
        Self {
            bad_pass: counts.get(BadPass),
            back_pass: counts.get(BackPass),
            bad_defensive_pass: counts.get(BadDefensivePass),
            good_offensive_pass: counts.get(GoodOffensivePass),
            key_pass: counts.get(KeyPass),
            line_breaking_pass: counts.get(LineBreakingPass),
            cross: counts.get(Cross),
            assist: counts.get(Assist),
            shot_on_target: counts.get(ShotOnTarget),
            shot_off_target: counts.get(ShotOffTarget),
            goal: counts.get(Goal),
            tackle: counts.get(Tackle),
            interception: counts.get(Interception),
            ball_recovery: counts.get(BallRecovery),
            counter_press: counts.get(CounterPress),
            aerial_won: counts.get(AerialWon),
            aerial_lost: counts.get(AerialLost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ActionCategory::*;

    #[test]
    fn starts_all_zero() {
        let counts = ActionCounts::new();
        assert!(counts.is_empty());
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.iter().count(), 17);
    }

    #[test]
    fn decrement_at_zero_is_a_noop() {
        let mut counts = ActionCounts::new();
        counts.increment(Goal);
        let before = counts;
        counts.decrement(Tackle);
        assert_eq!(counts, before);
    }

    #[test]
    fn mixed_sequences_never_go_negative() {
        let mut counts = ActionCounts::new();
        let script = [
            (KeyPass, true),
            (KeyPass, false),
            (KeyPass, false),
            (KeyPass, false),
            (AerialLost, false),
            (AerialLost, true),
            (KeyPass, true),
        ];
        for (category, up) in script {
            if up {
                counts.increment(category);
            } else {
                counts.decrement(category);
            }
        }
        assert_eq!(counts.get(KeyPass), 1);
        assert_eq!(counts.get(AerialLost), 1);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn reset_clears_everything() {
        let mut counts = ActionCounts::new();
        for category in ActionCategory::ALL {
            counts.increment(category);
        }
        assert_eq!(counts.total(), 17);
        counts.reset();
        assert!(counts.is_empty());
    }

    #[test]
    fn group_totals_partition_the_total() {
        let mut counts = ActionCounts::new();
        counts.increment(BackPass);
        counts.increment(Goal);
        counts.increment(Goal);
        counts.increment(AerialWon);
        assert_eq!(counts.group_total(ActionGroup::Passing), 1);
        assert_eq!(counts.group_total(ActionGroup::Offense), 2);
        assert_eq!(counts.group_total(ActionGroup::Defense), 1);
    }

    #[test]
    fn sections_follow_display_order() {
        let mut counts = ActionCounts::new();
        counts.increment(Cross);
        let sections = counts.sections();
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].rows.len(), 6);
        assert_eq!(sections[1].rows[0], (Cross, 1));
        assert_eq!(sections[2].rows.last(), Some(&(AerialLost, 0)));
    }

    #[test]
    fn serializes_as_named_object() {
        let mut counts = ActionCounts::new();
        counts.increment(ShotOnTarget);
        let json = serde_json::to_value(counts).unwrap();
        assert_eq!(json["shotOnTarget"], 1);
        assert_eq!(json["goal"], 0);
        assert_eq!(json.as_object().unwrap().len(), 17);
    }

    #[test]
    fn reads_legacy_keys_and_defaults_missing() {
        let counts: ActionCounts =
            serde_json::from_str(r#"{"gol": 2, "passeCertoOfensivo": 3}"#).unwrap();
        assert_eq!(counts.get(Goal), 2);
        assert_eq!(counts.get(GoodOffensivePass), 3);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn rejects_unknown_keys() {
        let parsed = serde_json::from_str::<ActionCounts>(r#"{"dribble": 1}"#);
        assert!(parsed.is_err());
    }
}
