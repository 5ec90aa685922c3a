//! Reply templates, one per topic.
//!
//! Templates are markdown with profile and journal fields interpolated.
//! `respond` is total: an unclassified message gets the default reply.

use crate::coach::rules::Topic;
use crate::journal::JournalSummary;
use crate::onboarding::UserProfile;

/// Greeting appended to a fresh transcript.
pub fn welcome(display_name: &str) -> String {
    format!(
        "Hi {display_name}! I'm your wellness coach, here for fitness, \
         mental health, and nutrition guidance tailored to your profile.\n\n\
         I can help you with:\n\
         - **Fitness & Exercise** - workout plans, form tips, adaptive exercises\n\
         - **Mental Health** - stress management, mood support, coping strategies\n\
         - **Nutrition** - meal planning, dietary advice, healthy eating habits\n\
         - **Wellness Goals** - sustainable habits and progress tracking\n\n\
         What would you like to explore today?"
    )
}

/// Build the coach reply for a message already classified into `topic`.
pub fn respond(topic: Option<Topic>, profile: &UserProfile, summary: &JournalSummary) -> String {
    match topic {
        Some(Topic::Fitness) => fitness(profile),
        Some(Topic::Nutrition) => nutrition(profile),
        Some(Topic::Mood) => mood(profile, summary),
        Some(Topic::Progress) => progress(summary),
        Some(Topic::Goals) => goals(profile),
        None => default_reply(),
    }
}

fn fitness(profile: &UserProfile) -> String {
    let mut out = format!(
        "## Personalized Fitness Guidance\n\n\
         **Your fitness level:** {}\n\n\
         ### Recommended workout structure\n\
         1. **Warm-up** (5-10 minutes): light movement to prepare your body\n\
         2. **Main activity** (15-30 minutes): adapted to your fitness level\n\
         3. **Cool-down** (5-10 minutes): stretching and relaxation\n\n\
         ### This week's focus\n\
         - Start with 3 sessions of 20-30 minutes each\n\
         - Focus on movements that feel good for your body\n\
         - Listen to your body and rest when needed",
        profile.fitness_level
    );
    if profile.has_physical_limitations() {
        out.push_str(&format!(
            "\n\n### Adaptive modifications\n\
             All exercises will be modified for: {}\n\
             - Chair-based alternatives available\n\
             - Low-impact options prioritized\n\
             - Gentle progression approach",
            profile.physical_limitations.join(", ")
        ));
    }
    out.push_str(
        "\n\n**What type of exercise interests you most?** \
         (strength training, cardio, yoga, walking, ...)",
    );
    out
}

fn nutrition(profile: &UserProfile) -> String {
    let goals = if profile.goals.is_empty() {
        "General wellness".to_string()
    } else {
        profile.goals.join(", ")
    };
    let mut out = format!(
        "## Personalized Nutrition Guidance\n\n\
         **Goals:** {goals}\n\n\
         ### Key principles\n\
         1. **Balanced macronutrients**: protein, healthy fats, and complex carbs\n\
         2. **Consistent timing**: regular meals to stabilize energy\n\
         3. **Hydration**: 8-10 glasses of water daily\n\
         4. **Mindful eating**: pay attention to hunger and fullness cues\n\n\
         ### Foods that support mental health\n\
         - **Omega-3 rich**: salmon, walnuts, chia seeds\n\
         - **Antioxidants**: berries, dark leafy greens\n\
         - **Probiotics**: yogurt, kefir, fermented foods\n\
         - **Complex carbs**: quinoa, oats, sweet potatoes"
    );
    if profile.has_dietary_restrictions() {
        out.push_str(&format!(
            "\n\n### Dietary considerations\n\
             I'll make sure all recommendations work with: {}",
            profile.dietary_restrictions.join(", ")
        ));
    }
    out.push_str(
        "\n\n**What specific nutrition goals would you like to focus on?** \
         (energy, weight management, meal prep, ...)",
    );
    out
}

fn mood(profile: &UserProfile, summary: &JournalSummary) -> String {
    let mut out = String::from(
        "## Mental Health & Emotional Wellness\n\n\
         Mental health is a journey, and I'm here to support you with \
         evidence-based strategies.\n\n\
         ### Your current patterns",
    );
    if summary.entry_count > 0 {
        out.push_str(&format!(
            "\n- **Recent mood average**: {:.1}/10\n\
             - **Energy levels**: {:.1}/10\n\
             - **Anxiety levels**: {:.1}/10",
            summary.avg_mood, summary.avg_energy, summary.avg_anxiety
        ));
    }
    out.push_str(
        "\n\n### Effective coping strategies\n\
         1. **Breathing techniques**: 4-7-8 breathing for immediate calm\n\
         2. **Grounding exercises**: the 5-4-3-2-1 sensory technique\n\
         3. **Movement**: even 5 minutes can shift your mental state\n\
         4. **Mindfulness**: present-moment awareness practices\n\n\
         ### Building resilience\n\
         - **Sleep hygiene**: 7-9 hours of quality sleep\n\
         - **Social connection**: regular contact with supportive people\n\
         - **Routine**: consistent daily structure\n\
         - **Self-compassion**: treating yourself with kindness",
    );
    if !profile.mental_health_challenges.is_empty() {
        out.push_str(&format!(
            "\n\n### Personalized support\n\
             I understand you're working with: {}\n\
             All strategies will be adapted to support your specific needs.",
            profile.mental_health_challenges.join(", ")
        ));
    }
    out.push_str("\n\n**What aspect of mental wellness would you like to focus on today?**");
    out
}

fn progress(summary: &JournalSummary) -> String {
    let mut out = format!(
        "## Progress Tracking & Insights\n\n\
         ### Your tracking history\n\
         - **Total mood entries**: {}\n\
         - **Current streak**: {} days\n\
         - **Average mood**: {:.1}/10",
        summary.entry_count, summary.streak_days, summary.avg_mood
    );
    if summary.entry_count >= 7 {
        out.push_str(&format!(
            "\n\n### Patterns I notice\n\
             - **Energy trends**: {}\n\
             - **Consistency**: {}",
            if summary.avg_energy > 6.0 {
                "generally good energy levels"
            } else {
                "room for energy improvement"
            },
            if summary.entry_count >= 14 {
                "excellent tracking habits!"
            } else {
                "building good tracking habits"
            }
        ));
    }
    out.push_str(
        "\n\n### Recommendations\n\
         1. **Continue tracking** - you're building valuable self-awareness\n\
         2. **Look for patterns** - what activities correlate with better moods?\n\
         3. **Celebrate progress** - acknowledge your commitment to wellness\n\n\
         **What specific patterns would you like me to help you identify?**",
    );
    out
}

fn goals(profile: &UserProfile) -> String {
    let mut out = String::from("## Goal Setting & Achievement\n\n### Your current goals");
    if profile.goals.is_empty() {
        out.push_str("\n- Let's identify your wellness priorities together");
    } else {
        for goal in &profile.goals {
            out.push_str(&format!("\n- {goal}"));
        }
    }
    out.push_str(
        "\n\n### SMART goal framework\n\
         1. **Specific**: clear, well-defined objectives\n\
         2. **Measurable**: track progress with concrete metrics\n\
         3. **Achievable**: realistic given your current situation\n\
         4. **Relevant**: aligned with your values and lifestyle\n\
         5. **Time-bound**: set deadlines for accountability\n\n\
         ### Building sustainable habits\n\
         - **Start small**: 1% improvements compound over time\n\
         - **Stack habits**: link new behaviors to existing routines\n\
         - **Track progress**: use your mood tracking as a foundation\n\
         - **Celebrate wins**: acknowledge every step forward\n\n\
         **What's the most important wellness goal you'd like to focus on right now?**",
    );
    out
}

fn default_reply() -> String {
    String::from(
        "## Welcome to Your Wellness Journey\n\n\
         I provide personalized guidance across all aspects of wellness.\n\n\
         ### How I can help\n\
         - **Fitness & Exercise**: custom workout plans, form guidance, adaptive exercises\n\
         - **Nutrition**: meal planning, dietary advice, healthy eating strategies\n\
         - **Mental Health**: stress management, mood support, coping techniques\n\
         - **Progress Tracking**: pattern analysis, goal setting, habit building\n\n\
         Simply tell me what's on your mind or what you'd like to work on.\n\n\
         **What would you like to explore today?**",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::JournalSummary;
    use crate::onboarding::FitnessLevel;
    use crate::onboarding::model::{NO_LIMITATIONS, NO_RESTRICTIONS};
    use chrono::NaiveDate;

    fn profile() -> UserProfile {
        UserProfile {
            age: 40,
            height_cm: 175.0,
            weight_kg: 70.0,
            physical_medical_issues: vec![],
            mental_health_challenges: vec![],
            allergies: vec![],
            physical_limitations: vec![NO_LIMITATIONS.into()],
            dietary_restrictions: vec![NO_RESTRICTIONS.into()],
            fitness_level: FitnessLevel::Beginner,
            goals: vec!["flexibility".into()],
            preferred_exercise_types: vec!["Walking/Light cardio".into()],
        }
    }

    fn empty_summary() -> JournalSummary {
        JournalSummary::compute(&[], NaiveDate::from_ymd_opt(2025, 6, 30).unwrap())
    }

    #[test]
    fn fitness_reply_names_the_level_and_skips_sentinel_limitations() {
        let reply = respond(Some(Topic::Fitness), &profile(), &empty_summary());
        assert!(reply.contains("beginner"));
        assert!(!reply.contains("Adaptive modifications"));

        let mut limited = profile();
        limited.physical_limitations = vec!["arthritis".into()];
        let reply = respond(Some(Topic::Fitness), &limited, &empty_summary());
        assert!(reply.contains("arthritis"));
    }

    #[test]
    fn mood_reply_omits_averages_for_an_empty_journal() {
        let reply = respond(Some(Topic::Mood), &profile(), &empty_summary());
        assert!(!reply.contains("Recent mood average"));

        let mut summary = empty_summary();
        summary.entry_count = 3;
        summary.avg_mood = 6.5;
        let reply = respond(Some(Topic::Mood), &profile(), &summary);
        assert!(reply.contains("6.5/10"));
    }

    #[test]
    fn goals_reply_lists_profile_goals() {
        let reply = respond(Some(Topic::Goals), &profile(), &empty_summary());
        assert!(reply.contains("- flexibility"));
    }

    #[test]
    fn unclassified_messages_get_the_default_reply() {
        let reply = respond(None, &profile(), &empty_summary());
        assert!(reply.contains("Welcome to Your Wellness Journey"));
    }

    #[test]
    fn welcome_greets_by_name() {
        assert!(welcome("Alice").starts_with("Hi Alice!"));
    }
}
