//! Irrigation scheduling from a simple water balance

use crate::error::InferenceResult;
use crate::inference::rounding::round_dp;
use crate::models::{
    CurrentConditions, FieldState, IrrigationResult, IrrigationTiming, IrrigationUrgency,
    OptimizationInfo, WeatherFactors,
};
use crate::reference::stage_water_requirement;
use crate::validation::ensure_finite;

const OPERATION: &str = "Irrigation optimization";

/// Forecast days considered for rainfall and averages
pub const FORECAST_HORIZON_DAYS: usize = 7;

const DEFAULT_AVG_TEMPERATURE: f64 = 25.0;
const DEFAULT_AVG_HUMIDITY: f64 = 60.0;

/// Rain covering more than this share of the planned amount postpones irrigation
const RAIN_DELAY_RATIO: f64 = 0.8;

const TIP_OFF_PEAK: &str = "Apply during early morning or evening to reduce evaporation";
const TIP_MULCH: &str = "Consider mulching to retain soil moisture";
const TIP_WAIT_FOR_RAIN: &str = "Delay irrigation until after expected rainfall";

/// Aggregated forecast over the planning horizon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastSummary {
    /// mm, summed over the horizon
    pub expected_rainfall: f64,
    pub avg_temperature: f64,
    pub avg_humidity: f64,
}

impl ForecastSummary {
    pub fn from_field(field: &FieldState) -> Self {
        let days = match field.weather_forecast.as_deref() {
            Some(days) if !days.is_empty() => days,
            _ => {
                return Self {
                    expected_rainfall: 0.0,
                    avg_temperature: DEFAULT_AVG_TEMPERATURE,
                    avg_humidity: DEFAULT_AVG_HUMIDITY,
                }
            }
        };

        let horizon = &days[..days.len().min(FORECAST_HORIZON_DAYS)];
        let count = horizon.len() as f64;

        Self {
            expected_rainfall: horizon.iter().map(|d| d.precipitation).sum(),
            avg_temperature: horizon.iter().map(|d| d.temperature).sum::<f64>() / count,
            avg_humidity: horizon.iter().map(|d| d.humidity).sum::<f64>() / count,
        }
    }

    /// Multiplier on crop water demand from temperature and humidity
    pub fn evapotranspiration_factor(&self) -> f64 {
        let mut factor = 1.0;

        if self.avg_temperature > 30.0 {
            factor += 0.2;
        } else if self.avg_temperature < 15.0 {
            factor -= 0.2;
        }

        if self.avg_humidity > 80.0 {
            factor -= 0.1;
        } else if self.avg_humidity < 40.0 {
            factor += 0.1;
        }

        factor
    }
}

/// Share of plant-available water left in the root zone
pub fn water_stress_level(field: &FieldState) -> f64 {
    let available_water = (field.soil_moisture - field.wilting_point).max(0.0);
    let max_available = field.field_capacity - field.wilting_point;
    if max_available > 0.0 {
        available_water / max_available
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Schedule {
    urgency: IrrigationUrgency,
    amount: f64,
    timing: IrrigationTiming,
}

fn base_schedule(stress_level: f64, field: &FieldState, adjusted_requirement: f64) -> Schedule {
    let deficit = field.field_capacity - field.soil_moisture;

    if stress_level < 0.3 {
        Schedule {
            urgency: IrrigationUrgency::Critical,
            amount: deficit * 1000.0,
            timing: IrrigationTiming::Immediate,
        }
    } else if stress_level < 0.5 {
        Schedule {
            urgency: IrrigationUrgency::High,
            amount: deficit * 800.0,
            timing: IrrigationTiming::Within24Hours,
        }
    } else if stress_level < 0.7 {
        Schedule {
            urgency: IrrigationUrgency::Moderate,
            amount: adjusted_requirement * 600.0,
            timing: IrrigationTiming::Within3Days,
        }
    } else {
        Schedule {
            urgency: IrrigationUrgency::Low,
            amount: 0.0,
            timing: IrrigationTiming::Monitor,
        }
    }
}

fn apply_rainfall(schedule: Schedule, expected_rainfall: f64) -> Schedule {
    if expected_rainfall > schedule.amount * RAIN_DELAY_RATIO {
        Schedule {
            urgency: IrrigationUrgency::Low,
            amount: 0.0,
            timing: IrrigationTiming::DelayForRain,
        }
    } else if expected_rainfall > 0.0 {
        Schedule {
            amount: (schedule.amount - expected_rainfall).max(0.0),
            ..schedule
        }
    } else {
        schedule
    }
}

fn efficiency_tips(urgency: IrrigationUrgency, forecast: &ForecastSummary) -> Vec<String> {
    let mut tips = Vec::new();
    if matches!(urgency, IrrigationUrgency::Critical | IrrigationUrgency::High) {
        tips.push(TIP_OFF_PEAK.to_string());
    }
    if forecast.avg_temperature > 30.0 {
        tips.push(TIP_MULCH.to_string());
    }
    if forecast.expected_rainfall > 10.0 {
        tips.push(TIP_WAIT_FOR_RAIN.to_string());
    }
    tips
}

/// Recommend how much to irrigate, and how soon, for the given field state
pub fn optimize_irrigation(field: &FieldState) -> InferenceResult<IrrigationResult> {
    let stress_level = ensure_finite(OPERATION, "water stress level", water_stress_level(field))?;
    let base_requirement = stage_water_requirement(&field.crop_stage);

    let forecast = ForecastSummary::from_field(field);
    ensure_finite(OPERATION, "expected rainfall", forecast.expected_rainfall)?;
    ensure_finite(OPERATION, "average temperature", forecast.avg_temperature)?;
    ensure_finite(OPERATION, "average humidity", forecast.avg_humidity)?;

    let et_factor = forecast.evapotranspiration_factor();
    let adjusted_requirement = base_requirement * et_factor;

    let schedule = apply_rainfall(
        base_schedule(stress_level, field, adjusted_requirement),
        forecast.expected_rainfall,
    );
    let amount = ensure_finite(OPERATION, "recommended amount", schedule.amount)?;

    Ok(IrrigationResult {
        irrigation_needed: amount > 0.0,
        recommended_amount: round_dp(amount, 1),
        urgency: schedule.urgency,
        timing: schedule.timing,
        water_stress_level: round_dp(stress_level, 2),
        current_conditions: CurrentConditions {
            soil_moisture: field.soil_moisture,
            available_water_percent: round_dp(stress_level * 100.0, 1),
            crop_stage: field.crop_stage.clone(),
        },
        weather_factors: WeatherFactors {
            expected_rainfall_7d: round_dp(forecast.expected_rainfall, 1),
            avg_temperature: round_dp(forecast.avg_temperature, 1),
            avg_humidity: round_dp(forecast.avg_humidity, 1),
            evapotranspiration_factor: round_dp(et_factor, 2),
        },
        efficiency_tips: efficiency_tips(schedule.urgency, &forecast),
        optimization_info: OptimizationInfo {
            base_requirement,
            adjusted_requirement: round_dp(adjusted_requirement, 2),
            method: "water_balance_model".to_string(),
        },
    })
}
