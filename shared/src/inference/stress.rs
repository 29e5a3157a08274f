//! Vegetation stress analysis over NDVI time series

use crate::error::{InferenceError, InferenceResult};
use crate::inference::recommendations::stress_recommendations;
use crate::inference::rounding::round_dp;
use crate::models::{
    AnomalyType, NdviAnomaly, NdviStatistics, SatelliteObservation, StressAnalysisInfo,
    StressLevel, StressResult, TrendDirection, TrendSignificance, TrendSummary,
};
use crate::validation::ensure_finite;

const OPERATION: &str = "Stress pattern analysis";

/// Minimum number of usable observations
pub const MIN_OBSERVATIONS: usize = 3;

/// Observations further than this many standard deviations from the mean are anomalies
const ANOMALY_STD_MULTIPLIER: f64 = 2.0;

/// Summary statistics of a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub mean: f64,
    /// Population standard deviation
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl SeriesStats {
    /// Returns `None` for an empty series
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            mean,
            std: variance.sqrt(),
            min,
            max,
        })
    }

    /// std / mean, or 0 when the mean is not positive
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean > 0.0 {
            self.std / self.mean
        } else {
            0.0
        }
    }
}

/// Least-squares slope of `values` against their index positions
///
/// Positions are 0..n-1 regardless of the spacing of the observation dates.
pub fn linear_trend_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = values.iter().sum::<f64>() / n as f64;

    let (covariance, x_variance) = values.iter().enumerate().fold(
        (0.0, 0.0),
        |(cov, var), (i, y)| {
            let dx = i as f64 - x_mean;
            (cov + dx * (y - y_mean), var + dx * dx)
        },
    );
    covariance / x_variance
}

/// Heuristic confidence from series variability
pub fn stress_confidence(coefficient_of_variation: f64) -> f64 {
    0.95_f64.min(0.7 + (1.0 - coefficient_of_variation) * 0.25)
}

/// Classify vegetation stress, trend and anomalies from satellite observations
///
/// Observations are used in the order given; entries missing either a date or
/// an NDVI value are skipped.
pub fn analyze_stress_patterns(observations: &[SatelliteObservation]) -> InferenceResult<StressResult> {
    if observations.is_empty() {
        return Err(InferenceError::invalid_input("No satellite data provided"));
    }

    let (ndvi_values, dates): (Vec<f64>, Vec<&str>) = observations
        .iter()
        .filter_map(|obs| match (obs.ndvi, obs.date.as_deref()) {
            (Some(ndvi), Some(date)) => Some((ndvi, date)),
            _ => None,
        })
        .unzip();

    if ndvi_values.len() < MIN_OBSERVATIONS {
        return Err(InferenceError::InsufficientData {
            required: MIN_OBSERVATIONS,
            found: ndvi_values.len(),
        });
    }

    let stats = SeriesStats::from_values(&ndvi_values).ok_or_else(|| {
        InferenceError::computation(OPERATION, "no NDVI values to summarize")
    })?;
    ensure_finite(OPERATION, "mean NDVI", stats.mean)?;
    ensure_finite(OPERATION, "NDVI standard deviation", stats.std)?;

    let slope = ensure_finite(OPERATION, "trend slope", linear_trend_slope(&ndvi_values))?;

    let stress_level = StressLevel::from_mean_ndvi(stats.mean);
    let direction = TrendDirection::from_slope(slope);

    let threshold = ANOMALY_STD_MULTIPLIER * stats.std;
    let anomalies: Vec<NdviAnomaly> = ndvi_values
        .iter()
        .zip(&dates)
        .filter_map(|(&ndvi, &date)| {
            let deviation = (ndvi - stats.mean).abs();
            (deviation > threshold).then(|| NdviAnomaly {
                date: date.to_string(),
                ndvi,
                deviation,
                anomaly_type: if ndvi < stats.mean {
                    AnomalyType::Low
                } else {
                    AnomalyType::High
                },
            })
        })
        .collect();

    let coefficient_of_variation = stats.coefficient_of_variation();
    let recommendations = stress_recommendations(stress_level, direction, anomalies.len());

    let date_range = format!("{} to {}", dates[0], dates[dates.len() - 1]);

    Ok(StressResult {
        stress_level,
        confidence: stress_confidence(coefficient_of_variation),
        statistics: NdviStatistics {
            mean_ndvi: round_dp(stats.mean, 3),
            std_ndvi: round_dp(stats.std, 3),
            min_ndvi: round_dp(stats.min, 3),
            max_ndvi: round_dp(stats.max, 3),
            coefficient_of_variation: round_dp(coefficient_of_variation, 3),
        },
        trend: TrendSummary {
            direction,
            slope: round_dp(slope, 4),
            significance: TrendSignificance::from_slope(slope),
        },
        anomalies,
        recommendations,
        analysis_info: StressAnalysisInfo {
            observations: ndvi_values.len(),
            date_range,
            method: "statistical_analysis".to_string(),
        },
    })
}
