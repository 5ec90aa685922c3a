//! Workout plan generation.

use crate::onboarding::{FitnessLevel, UserProfile};
use crate::plans::model::{Exercise, WorkoutPlan};

/// Build a workout plan for the profile.
///
/// The gentle branch is taken when the profile reports any real
/// physical limitation or a beginner fitness level; it swaps in
/// lower-impact exercise variants and the softer plan title.
pub fn generate_workout_plan(profile: &UserProfile) -> WorkoutPlan {
    let low_impact =
        profile.has_physical_limitations() || profile.fitness_level == FitnessLevel::Beginner;
    let mobility_limited = profile
        .physical_limitations
        .iter()
        .any(|l| l.eq_ignore_ascii_case("mobility"));
    let prefers_walking = profile
        .preferred_exercise_types
        .iter()
        .any(|t| t == "Walking/Light cardio");

    let title = if low_impact {
        "Gentle Wellness Routine"
    } else {
        "Balanced Fitness Plan"
    };

    let exercises = vec![
        Exercise {
            name: "Mindful Breathing".to_string(),
            duration_secs: 300,
            description: "Deep breathing exercises to center yourself and reduce anxiety."
                .to_string(),
            instructions: vec![
                "Sit comfortably with your back straight".to_string(),
                "Place one hand on your chest, one on your belly".to_string(),
                "Breathe in slowly through your nose for 4 counts".to_string(),
                "Hold your breath for 4 counts".to_string(),
                "Exhale slowly through your mouth for 6 counts".to_string(),
                "Repeat this cycle".to_string(),
            ],
            adaptations: vec![
                "Can be done seated".to_string(),
                "Use guided audio if helpful".to_string(),
            ],
            rest_after_secs: 60,
        },
        Exercise {
            name: if low_impact {
                "Chair Yoga Stretches".to_string()
            } else {
                "Dynamic Warm-up".to_string()
            },
            duration_secs: 600,
            description: if low_impact {
                "Gentle stretches to improve flexibility and reduce stiffness.".to_string()
            } else {
                "Light movements to prepare your body for exercise.".to_string()
            },
            instructions: vec![
                "Start with gentle neck rolls".to_string(),
                "Shoulder blade squeezes".to_string(),
                "Seated spinal twists".to_string(),
                "Ankle circles and calf raises".to_string(),
                "Gentle arm circles".to_string(),
                "Deep breathing between movements".to_string(),
            ],
            adaptations: if mobility_limited {
                vec!["All movements can be adapted for seated position".to_string()]
            } else {
                vec![]
            },
            rest_after_secs: 120,
        },
        Exercise {
            name: if prefers_walking {
                "Gentle Movement".to_string()
            } else {
                "Low-Impact Activity".to_string()
            },
            duration_secs: 900,
            description: "Cardiovascular activity adapted to your comfort level.".to_string(),
            instructions: vec![
                "March in place or walk slowly".to_string(),
                "Gentle arm movements".to_string(),
                "Focus on steady breathing".to_string(),
                "Listen to your body".to_string(),
                "Take breaks as needed".to_string(),
                "Stay hydrated".to_string(),
            ],
            adaptations: vec![
                "Stop if you feel discomfort".to_string(),
                "Pace yourself based on energy levels".to_string(),
            ],
            rest_after_secs: 120,
        },
        Exercise {
            name: "Relaxation & Cool Down".to_string(),
            duration_secs: 300,
            description: "Gentle stretches and meditation to end your session peacefully."
                .to_string(),
            instructions: vec![
                "Gentle stretching of major muscle groups".to_string(),
                "Focus on areas that feel tense".to_string(),
                "Practice gratitude for your body".to_string(),
                "Deep breathing exercises".to_string(),
                "Mindful relaxation".to_string(),
                "Set positive intentions".to_string(),
            ],
            adaptations: vec![
                "Focus on areas that feel tense".to_string(),
                "Practice gratitude".to_string(),
            ],
            rest_after_secs: 0,
        },
    ];

    WorkoutPlan {
        title: title.to_string(),
        total_duration_mins: 30,
        exercises,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::model::{NO_LIMITATIONS, NO_RESTRICTIONS};

    fn profile(level: FitnessLevel, limitations: Vec<&str>) -> UserProfile {
        UserProfile {
            age: 40,
            height_cm: 175.0,
            weight_kg: 70.0,
            physical_medical_issues: vec![],
            mental_health_challenges: vec![],
            allergies: vec![],
            physical_limitations: if limitations.is_empty() {
                vec![NO_LIMITATIONS.into()]
            } else {
                limitations.into_iter().map(String::from).collect()
            },
            dietary_restrictions: vec![NO_RESTRICTIONS.into()],
            fitness_level: level,
            goals: vec!["general".into()],
            preferred_exercise_types: vec!["Walking/Light cardio".into()],
        }
    }

    #[test]
    fn beginner_gets_the_gentle_routine() {
        let plan = generate_workout_plan(&profile(FitnessLevel::Beginner, vec![]));
        assert_eq!(plan.title, "Gentle Wellness Routine");
        assert_eq!(plan.exercises[1].name, "Chair Yoga Stretches");
    }

    #[test]
    fn limitations_force_gentle_even_when_advanced() {
        let plan = generate_workout_plan(&profile(FitnessLevel::Advanced, vec!["mobility"]));
        assert_eq!(plan.title, "Gentle Wellness Routine");
        assert_eq!(
            plan.exercises[1].adaptations,
            vec!["All movements can be adapted for seated position".to_string()]
        );
    }

    #[test]
    fn unrestricted_advanced_gets_the_balanced_plan() {
        let plan = generate_workout_plan(&profile(FitnessLevel::Advanced, vec![]));
        assert_eq!(plan.title, "Balanced Fitness Plan");
        assert_eq!(plan.exercises[1].name, "Dynamic Warm-up");
        assert!(plan.exercises[1].adaptations.is_empty());
    }

    #[test]
    fn same_profile_same_plan() {
        let p = profile(FitnessLevel::Intermediate, vec!["arthritis"]);
        assert_eq!(generate_workout_plan(&p), generate_workout_plan(&p));
    }

    #[test]
    fn four_exercises_with_expected_durations() {
        let plan = generate_workout_plan(&profile(FitnessLevel::Beginner, vec![]));
        let durations: Vec<u32> = plan.exercises.iter().map(|e| e.duration_secs).collect();
        assert_eq!(durations, vec![300, 600, 900, 300]);
        assert_eq!(plan.exercises.last().unwrap().rest_after_secs, 0);
    }
}
