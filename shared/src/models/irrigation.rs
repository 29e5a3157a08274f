//! Irrigation scheduling models

use serde::{Deserialize, Serialize};

fn default_soil_moisture() -> f64 {
    0.3
}

fn default_field_capacity() -> f64 {
    0.4
}

fn default_wilting_point() -> f64 {
    0.15
}

fn default_crop_stage() -> String {
    "vegetative".to_string()
}

fn default_temperature() -> f64 {
    25.0
}

fn default_humidity() -> f64 {
    60.0
}

/// Current field conditions (volumetric moisture fractions)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldState {
    #[serde(default = "default_soil_moisture")]
    pub soil_moisture: f64,
    #[serde(default = "default_field_capacity")]
    pub field_capacity: f64,
    #[serde(default = "default_wilting_point")]
    pub wilting_point: f64,
    #[serde(default = "default_crop_stage")]
    pub crop_stage: String,
    /// Daily forecasts, nearest day first
    #[serde(default)]
    pub weather_forecast: Option<Vec<DailyForecast>>,
}

impl Default for FieldState {
    fn default() -> Self {
        Self {
            soil_moisture: default_soil_moisture(),
            field_capacity: default_field_capacity(),
            wilting_point: default_wilting_point(),
            crop_stage: default_crop_stage(),
            weather_forecast: None,
        }
    }
}

/// One day of forecast weather
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyForecast {
    /// mm
    #[serde(default)]
    pub precipitation: f64,
    /// °C
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// %
    #[serde(default = "default_humidity")]
    pub humidity: f64,
}

impl Default for DailyForecast {
    fn default() -> Self {
        Self {
            precipitation: 0.0,
            temperature: default_temperature(),
            humidity: default_humidity(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IrrigationUrgency {
    Critical,
    High,
    Moderate,
    Low,
}

impl IrrigationUrgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationUrgency::Critical => "critical",
            IrrigationUrgency::High => "high",
            IrrigationUrgency::Moderate => "moderate",
            IrrigationUrgency::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IrrigationTiming {
    #[serde(rename = "immediate")]
    Immediate,
    #[serde(rename = "within_24h")]
    Within24Hours,
    #[serde(rename = "within_3_days")]
    Within3Days,
    #[serde(rename = "monitor")]
    Monitor,
    #[serde(rename = "delay_for_rain")]
    DelayForRain,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentConditions {
    pub soil_moisture: f64,
    pub available_water_percent: f64,
    pub crop_stage: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherFactors {
    pub expected_rainfall_7d: f64,
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub evapotranspiration_factor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptimizationInfo {
    pub base_requirement: f64,
    pub adjusted_requirement: f64,
    pub method: String,
}

/// Irrigation recommendation for a field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IrrigationResult {
    pub irrigation_needed: bool,
    /// mm
    pub recommended_amount: f64,
    pub urgency: IrrigationUrgency,
    pub timing: IrrigationTiming,
    /// Fraction of plant-available water remaining, 0 when the soil is at wilting point
    pub water_stress_level: f64,
    pub current_conditions: CurrentConditions,
    pub weather_factors: WeatherFactors,
    pub efficiency_tips: Vec<String>,
    pub optimization_info: OptimizationInfo,
}
