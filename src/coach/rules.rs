//! Keyword rules mapping a message to a reply topic.

use regex::Regex;

use crate::error::CoachError;

/// Reply categories, in matching priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Fitness,
    Nutrition,
    Mood,
    Progress,
    Goals,
}

/// One keyword rule.
#[derive(Debug)]
pub struct ResponderRule {
    pub name: &'static str,
    pub topic: Topic,
    pattern: Regex,
}

/// Ordered first-match-wins classifier over the lowercased input.
///
/// Rule order is the priority order: a message mentioning both meals
/// and workouts gets the fitness reply because fitness is checked
/// first.
#[derive(Debug)]
pub struct RulesEngine {
    rules: Vec<ResponderRule>,
}

const RULES: &[(&str, Topic, &str)] = &[
    ("fitness", Topic::Fitness, r"workout|exercise|fitness"),
    ("nutrition", Topic::Nutrition, r"nutrition|food|eat|meal"),
    ("mood", Topic::Mood, r"mood|feel|sad|anxious|stress"),
    ("progress", Topic::Progress, r"progress|track|pattern"),
    ("goals", Topic::Goals, r"goal|plan|help"),
];

impl RulesEngine {
    pub fn new() -> Result<Self, CoachError> {
        let mut rules = Vec::with_capacity(RULES.len());
        for &(name, topic, pattern) in RULES {
            let pattern =
                Regex::new(pattern).map_err(|source| CoachError::Rule { name, source })?;
            rules.push(ResponderRule {
                name,
                topic,
                pattern,
            });
        }
        Ok(Self { rules })
    }

    /// First matching topic, or None when no rule fires.
    pub fn classify(&self, input: &str) -> Option<Topic> {
        let lowered = input.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(&lowered))
            .map(|rule| rule.topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> RulesEngine {
        RulesEngine::new().unwrap()
    }

    #[test]
    fn each_topic_has_a_trigger() {
        let e = engine();
        assert_eq!(e.classify("suggest a workout"), Some(Topic::Fitness));
        assert_eq!(e.classify("what should I eat"), Some(Topic::Nutrition));
        assert_eq!(e.classify("I feel stressed"), Some(Topic::Mood));
        assert_eq!(e.classify("show my progress"), Some(Topic::Progress));
        assert_eq!(e.classify("I need a plan"), Some(Topic::Goals));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(engine().classify("WORKOUT time"), Some(Topic::Fitness));
    }

    #[test]
    fn earlier_rules_win() {
        // Mentions both meals and workouts; fitness is checked first.
        assert_eq!(
            engine().classify("meal ideas after my workout"),
            Some(Topic::Fitness)
        );
        // "help" also matches goals, but mood wins.
        assert_eq!(
            engine().classify("help, I feel low"),
            Some(Topic::Mood)
        );
    }

    #[test]
    fn unmatched_input_has_no_topic() {
        assert_eq!(engine().classify("hello there"), None);
        assert_eq!(engine().classify(""), None);
    }

    #[test]
    fn rules_carry_names_for_diagnostics() {
        let e = engine();
        assert_eq!(e.rules[0].name, "fitness");
        assert_eq!(e.rules.len(), 5);
    }
}
