use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::models::common::{deserialize_lenient_f64, deserialize_or_default};

/// Meals come back from the stored JSON as the client wrote them; odd field
/// kinds fall back to defaults instead of rejecting the plan.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Meal {
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub calories: f64,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub protein: f64,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub carbs: f64,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub fat: f64,
    #[serde(default, deserialize_with = "deserialize_or_default", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload stored in the `description` column of a `diet_plan` record.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DietPlan {
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub goal: String,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub total_calories: f64,
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub meals: Vec<Meal>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DietGoal {
    WeightLoss,
    Maintenance,
    MuscleGain,
}

impl DietGoal {
    pub const ALL: [DietGoal; 3] = [DietGoal::WeightLoss, DietGoal::Maintenance, DietGoal::MuscleGain];

    pub fn as_str(&self) -> &'static str {
        match self {
            DietGoal::WeightLoss => "weight_loss",
            DietGoal::Maintenance => "maintenance",
            DietGoal::MuscleGain => "muscle_gain",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DietGoal::WeightLoss => "Weight Loss",
            DietGoal::Maintenance => "Maintenance",
            DietGoal::MuscleGain => "Muscle Gain",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DietGoal::WeightLoss => "Reduced calories to promote gradual weight loss",
            DietGoal::Maintenance => "Balanced calories to maintain current weight",
            DietGoal::MuscleGain => "Increased calories and protein to support muscle growth",
        }
    }

    pub fn calorie_modifier(&self) -> i32 {
        match self {
            DietGoal::WeightLoss => -500,
            DietGoal::Maintenance => 0,
            DietGoal::MuscleGain => 500,
        }
    }

    /// Starter meals offered when the goal is picked.
    pub fn meal_template(&self) -> Vec<Meal> {
        let rows: &[(&str, &str, f64, f64, f64, f64, &str)] = match self {
            DietGoal::WeightLoss => &[
                ("wl-1", "Breakfast: Greek Yogurt Bowl", 300.0, 25.0, 30.0, 10.0, "Greek yogurt with berries and a sprinkle of granola"),
                ("wl-2", "Lunch: Grilled Chicken Salad", 400.0, 35.0, 20.0, 15.0, "Mixed greens with grilled chicken, vegetables, and light dressing"),
                ("wl-3", "Dinner: Baked Salmon & Vegetables", 450.0, 30.0, 25.0, 20.0, "Baked salmon fillet with steamed vegetables and quinoa"),
                ("wl-4", "Snack: Apple with Almond Butter", 200.0, 5.0, 20.0, 10.0, "Apple slices with 1 tablespoon of almond butter"),
            ],
            DietGoal::Maintenance => &[
                ("m-1", "Breakfast: Avocado Toast", 450.0, 15.0, 45.0, 20.0, "Whole grain toast with avocado, eggs, and tomato"),
                ("m-2", "Lunch: Grain Bowl", 550.0, 25.0, 65.0, 18.0, "Quinoa with roasted vegetables, chicken, and tahini sauce"),
                ("m-3", "Dinner: Turkey Chili", 500.0, 35.0, 50.0, 15.0, "Lean turkey chili with beans, vegetables, and brown rice"),
                ("m-4", "Snack: Smoothie", 300.0, 15.0, 40.0, 5.0, "Protein smoothie with banana, berries, and spinach"),
            ],
            DietGoal::MuscleGain => &[
                ("mg-1", "Breakfast: Protein Oatmeal", 600.0, 40.0, 70.0, 15.0, "Oatmeal with protein powder, banana, and peanut butter"),
                ("mg-2", "Lunch: Steak & Sweet Potato", 700.0, 45.0, 65.0, 20.0, "Grilled steak with sweet potato and steamed broccoli"),
                ("mg-3", "Dinner: Chicken Pasta", 750.0, 50.0, 80.0, 20.0, "Whole wheat pasta with chicken, vegetables, and olive oil"),
                ("mg-4", "Snack: Protein Shake with Nuts", 350.0, 30.0, 15.0, 15.0, "Protein shake with a handful of mixed nuts"),
            ],
        };

        rows.iter()
            .map(|(id, name, calories, protein, carbs, fat, description)| Meal {
                id: id.to_string(),
                name: name.to_string(),
                calories: *calories,
                protein: *protein,
                carbs: *carbs,
                fat: *fat,
                description: Some(description.to_string()),
            })
            .collect()
    }
}

impl FromStr for DietGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DietGoal::ALL
            .into_iter()
            .find(|goal| goal.as_str() == s)
            .ok_or_else(|| format!("unknown diet goal: {}", s))
    }
}

#[derive(Debug, Serialize)]
pub struct DietGoalInfo {
    pub value: DietGoal,
    pub label: &'static str,
    pub description: &'static str,
    pub calorie_modifier: i32,
}

impl From<DietGoal> for DietGoalInfo {
    fn from(goal: DietGoal) -> Self {
        Self {
            value: goal,
            label: goal.label(),
            description: goal.description(),
            calorie_modifier: goal.calorie_modifier(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateDietPlanRequest {
    pub name: String,
    #[serde(default)]
    pub goal: Option<DietGoal>,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

#[derive(Debug, Deserialize)]
pub struct CalorieTargetQuery {
    #[serde(default)]
    pub goal: Option<String>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Default)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// A saved plan as returned to clients: the stored payload plus freshly summed meal totals.
#[derive(Debug, Serialize)]
pub struct SavedDietPlan {
    pub id: Uuid,
    pub record_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub plan: DietPlan,
    pub totals: NutritionTotals,
}

#[derive(Debug, Serialize)]
pub struct CalorieTarget {
    pub bmr: i64,
    pub goal: Option<DietGoal>,
    pub calorie_target: i64,
}
