//! Nutrition plan generation.

use crate::onboarding::UserProfile;
use crate::plans::model::{MacroSplit, Meal, MealBoost, NutritionPlan};

/// Daily calorie target, shifted down when weight management is a goal.
const BASE_CALORIES: u32 = 1800;
const WEIGHT_GOAL_CALORIES: u32 = 1600;

/// Build the daily meal plan for the profile.
///
/// Weight-management goals shift the calorie target down and the macro
/// split toward protein; physical limitations add preparation
/// adaptations. Everything else is fixed content.
pub fn generate_nutrition_plan(profile: &UserProfile) -> NutritionPlan {
    let weight_goal = profile.wants_weight_management();

    let calories = |lean: u32, full: u32| if weight_goal { lean } else { full };

    let meals = vec![
        Meal {
            name: "Energizing Breakfast".to_string(),
            time: "7:00 AM".to_string(),
            calories: calories(320, 400),
            description:
                "Overnight oats with berries, nuts, and Greek yogurt for sustained energy."
                    .to_string(),
            ingredients: vec![
                "1/2 cup rolled oats".to_string(),
                "1/2 cup Greek yogurt".to_string(),
                "1/4 cup mixed berries".to_string(),
                "1 tbsp almond butter".to_string(),
                "1 tsp chia seeds".to_string(),
                "1 tsp honey".to_string(),
            ],
            benefits: vec![
                "High in omega-3s for brain health".to_string(),
                "Protein for sustained energy".to_string(),
                "Antioxidants for mood support".to_string(),
            ],
            prep_time: "5 minutes (night before)".to_string(),
            difficulty: "Easy".to_string(),
            boost: Some(MealBoost::Mood),
        },
        Meal {
            name: "Mid-Morning Boost".to_string(),
            time: "10:00 AM".to_string(),
            calories: calories(150, 200),
            description: "Apple slices with almond butter and green tea for focus and energy."
                .to_string(),
            ingredients: vec![
                "1 medium apple, sliced".to_string(),
                "1 tbsp almond butter".to_string(),
                "1 cup green tea".to_string(),
            ],
            benefits: vec![
                "Natural sugars for quick energy".to_string(),
                "Healthy fats for brain function".to_string(),
                "L-theanine for calm focus".to_string(),
            ],
            prep_time: "2 minutes".to_string(),
            difficulty: "Easy".to_string(),
            boost: Some(MealBoost::Energy),
        },
        Meal {
            name: "Balanced Power Lunch".to_string(),
            time: "12:30 PM".to_string(),
            calories: calories(400, 500),
            description: "Quinoa bowl with roasted vegetables, lean protein, and avocado."
                .to_string(),
            ingredients: vec![
                "3/4 cup cooked quinoa".to_string(),
                "3 oz grilled chicken or tofu".to_string(),
                "1/2 avocado".to_string(),
                "1 cup roasted vegetables (bell peppers, broccoli, carrots)".to_string(),
                "2 tbsp tahini dressing".to_string(),
                "Mixed greens".to_string(),
            ],
            benefits: vec![
                "Complete proteins for neurotransmitter production".to_string(),
                "Complex carbs for stable mood".to_string(),
                "Healthy fats for brain health".to_string(),
            ],
            prep_time: "15 minutes".to_string(),
            difficulty: "Medium".to_string(),
            boost: Some(MealBoost::Mood),
        },
        Meal {
            name: "Afternoon Mood Lift".to_string(),
            time: "3:00 PM".to_string(),
            calories: calories(120, 150),
            description: "Dark chocolate and nuts with herbal tea for stress relief.".to_string(),
            ingredients: vec![
                "1 oz dark chocolate (70% cacao)".to_string(),
                "10 almonds".to_string(),
                "1 cup chamomile or peppermint tea".to_string(),
            ],
            benefits: vec![
                "Dark chocolate boosts serotonin".to_string(),
                "Magnesium for stress relief".to_string(),
                "Herbal tea for relaxation".to_string(),
            ],
            prep_time: "1 minute".to_string(),
            difficulty: "Easy".to_string(),
            boost: Some(MealBoost::StressRelief),
        },
        Meal {
            name: "Nourishing Dinner".to_string(),
            time: "6:30 PM".to_string(),
            calories: calories(450, 550),
            description: "Grilled salmon with roasted sweet potato and steamed vegetables."
                .to_string(),
            ingredients: vec![
                "4 oz grilled salmon".to_string(),
                "1 medium roasted sweet potato".to_string(),
                "1 cup steamed broccoli".to_string(),
                "1 tbsp olive oil".to_string(),
                "Lemon and herbs for seasoning".to_string(),
            ],
            benefits: vec![
                "Omega-3s for brain health".to_string(),
                "Complex carbs for serotonin production".to_string(),
                "B-vitamins for energy metabolism".to_string(),
            ],
            prep_time: "25 minutes".to_string(),
            difficulty: "Medium".to_string(),
            boost: Some(MealBoost::Mood),
        },
    ];

    NutritionPlan {
        title: "Personalized Mood-Boosting Meal Plan".to_string(),
        subtitle: "Designed for your mental health and energy goals".to_string(),
        total_calories: if weight_goal {
            WEIGHT_GOAL_CALORIES
        } else {
            BASE_CALORIES
        },
        macros: MacroSplit {
            protein: if weight_goal { 35 } else { 30 },
            carbs: 40,
            fat: if weight_goal { 25 } else { 30 },
        },
        meals,
        tips: vec![
            "Stay hydrated with 8-10 glasses of water daily".to_string(),
            "Eat meals at consistent times to regulate mood".to_string(),
            "Include a source of protein with each meal".to_string(),
            "Choose colorful fruits and vegetables for antioxidants".to_string(),
        ],
        adaptations: if profile.has_physical_limitations() {
            vec![
                "Pre-cut vegetables available for easier preparation".to_string(),
                "One-pot meals to reduce cooking complexity".to_string(),
                "Meal prep options for busy days".to_string(),
            ]
        } else {
            vec![]
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::FitnessLevel;
    use crate::onboarding::model::{NO_LIMITATIONS, NO_RESTRICTIONS};

    fn profile(goals: Vec<&str>, limitations: Vec<&str>) -> UserProfile {
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
            fitness_level: FitnessLevel::Beginner,
            goals: goals.into_iter().map(String::from).collect(),
            preferred_exercise_types: vec!["Walking/Light cardio".into()],
        }
    }

    #[test]
    fn weight_goal_shifts_calories_down() {
        let lean = generate_nutrition_plan(&profile(vec!["weight"], vec![]));
        assert_eq!(lean.total_calories, 1600);
        assert_eq!(lean.macros.protein, 35);
        assert_eq!(lean.meals[0].calories, 320);

        let full = generate_nutrition_plan(&profile(vec!["general"], vec![]));
        assert_eq!(full.total_calories, 1800);
        assert_eq!(full.macros.protein, 30);
        assert_eq!(full.meals[0].calories, 400);
    }

    #[test]
    fn macros_sum_to_one_hundred() {
        for goals in [vec!["weight"], vec!["general"]] {
            let plan = generate_nutrition_plan(&profile(goals, vec![]));
            let m = plan.macros;
            assert_eq!(m.protein + m.carbs + m.fat, 100);
        }
    }

    #[test]
    fn limitations_add_prep_adaptations() {
        let adapted = generate_nutrition_plan(&profile(vec!["general"], vec!["mobility"]));
        assert_eq!(adapted.adaptations.len(), 3);

        let plain = generate_nutrition_plan(&profile(vec!["general"], vec![]));
        assert!(plain.adaptations.is_empty());
    }

    #[test]
    fn same_profile_same_plan() {
        let p = profile(vec!["weight"], vec!["arthritis"]);
        assert_eq!(generate_nutrition_plan(&p), generate_nutrition_plan(&p));
    }

    #[test]
    fn five_meals_spanning_the_day() {
        let plan = generate_nutrition_plan(&profile(vec!["general"], vec![]));
        assert_eq!(plan.meals.len(), 5);
        assert_eq!(plan.meals[0].time, "7:00 AM");
        assert_eq!(plan.meals[4].time, "6:30 PM");
    }
}
