use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    M,
    #[default]
    Cm,
    Ft,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    VeryActive,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    Overweight,
    Obese,
}

#[derive(Debug, Deserialize)]
pub struct BmiRequest {
    pub weight: f64,
    pub height: f64,
    #[serde(default)]
    pub weight_unit: WeightUnit,
    #[serde(default)]
    pub height_unit: HeightUnit,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
}

#[derive(Debug, Deserialize)]
pub struct CalorieRequest {
    pub age: i32,
    /// Kilograms.
    pub weight: f64,
    /// Centimetres.
    pub height: f64,
    pub gender: Gender,
    #[serde(default)]
    pub activity_level: ActivityLevel,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CalorieResult {
    pub bmr: f64,
    pub daily_calories: i64,
}

#[derive(Debug, Deserialize)]
pub struct WaterIntakeRequest {
    /// Kilograms.
    pub weight: f64,
    #[serde(default)]
    pub activity_level: ActivityLevel,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct WaterIntakeResult {
    pub litres: f64,
}
