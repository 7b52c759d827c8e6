use crate::error::AppError;
use crate::models::diet::DietGoal;
use crate::models::tools::{
    ActivityLevel, BmiCategory, BmiResult, CalorieRequest, CalorieResult, Gender, HeightUnit,
    WaterIntakeResult, WeightUnit,
};

pub const DEFAULT_BMR: i64 = 2000;
/// The planner has no age on file and assumes a 30 year old.
const PLANNER_ASSUMED_AGE: f64 = 30.0;

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn require_positive(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::Validation(format!("{} must be a positive number", field)));
    }
    Ok(())
}

pub fn weight_in_kg(weight: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Kg => weight,
        WeightUnit::Lbs => weight * 0.453592,
    }
}

pub fn height_in_m(height: f64, unit: HeightUnit) -> f64 {
    match unit {
        HeightUnit::M => height,
        HeightUnit::Cm => height / 100.0,
        HeightUnit::Ft => height * 0.3048,
    }
}

pub fn bmi_category(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::NormalWeight
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

pub fn calc_bmi(
    weight: f64,
    weight_unit: WeightUnit,
    height: f64,
    height_unit: HeightUnit,
) -> Result<BmiResult, AppError> {
    let weight_kg = weight_in_kg(weight, weight_unit);
    let height_m = height_in_m(height, height_unit);
    require_positive(weight_kg, "weight")?;
    require_positive(height_m, "height")?;

    let bmi = weight_kg / (height_m * height_m);
    Ok(BmiResult {
        bmi: round_to_tenth(bmi),
        category: bmi_category(bmi),
    })
}

pub fn activity_multiplier(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::Light => 1.375,
        ActivityLevel::Moderate => 1.55,
        ActivityLevel::Active => 1.725,
        ActivityLevel::VeryActive => 1.9,
    }
}

/// Mifflin-St Jeor basal metabolic rate. Weight in kg, height in cm.
pub fn mifflin_st_jeor_bmr(weight: f64, height: f64, age: f64, gender: Gender) -> f64 {
    let base = 10.0 * weight + 6.25 * height - 5.0 * age;
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

pub fn calc_daily_calories(request: &CalorieRequest) -> Result<CalorieResult, AppError> {
    require_positive(request.age as f64, "age")?;
    require_positive(request.weight, "weight")?;
    require_positive(request.height, "height")?;

    let bmr = mifflin_st_jeor_bmr(request.weight, request.height, request.age as f64, request.gender);
    let calories = bmr * activity_multiplier(request.activity_level);
    Ok(CalorieResult {
        bmr: round_to_tenth(bmr),
        daily_calories: calories.round() as i64,
    })
}

pub fn water_activity_factor(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.0,
        ActivityLevel::Light => 1.1,
        ActivityLevel::Moderate => 1.2,
        ActivityLevel::Active => 1.3,
        ActivityLevel::VeryActive => 1.4,
    }
}

/// 30 ml per kg of body weight, scaled by activity, in litres.
pub fn calc_water_intake(weight: f64, level: ActivityLevel) -> Result<WaterIntakeResult, AppError> {
    require_positive(weight, "weight")?;
    let millilitres = weight * 30.0 * water_activity_factor(level);
    Ok(WaterIntakeResult {
        litres: round_to_tenth(millilitres / 1000.0),
    })
}

/// BMR estimate the diet planner uses from the latest height and weight on file.
pub fn estimate_planner_bmr(weight_kg: Option<f64>, height_cm: Option<f64>) -> i64 {
    match (weight_kg, height_cm) {
        (Some(weight), Some(height)) if weight != 0.0 && height != 0.0 => {
            mifflin_st_jeor_bmr(weight, height, PLANNER_ASSUMED_AGE, Gender::Male).round() as i64
        }
        _ => DEFAULT_BMR,
    }
}

pub fn calorie_target(bmr: i64, goal: Option<DietGoal>) -> i64 {
    match goal {
        Some(goal) => bmr + goal.calorie_modifier() as i64,
        None => bmr,
    }
}
