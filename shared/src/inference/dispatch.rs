//! Action dispatch at the inference boundary

use serde::Serialize;

use crate::error::InferenceResult;
use crate::inference::{analyze_stress_patterns, optimize_irrigation, predict_yield};
use crate::models::{Action, InferenceRequest, IrrigationResult, PredictionResult, StressResult};
use crate::validation::{AnalyzeStressInput, OptimizeIrrigationInput, PredictYieldInput};

/// Result record of whichever action ran
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum InferenceOutcome {
    Yield(PredictionResult),
    Stress(StressResult),
    Irrigation(IrrigationResult),
}

impl InferenceOutcome {
    pub fn action(&self) -> Action {
        match self {
            InferenceOutcome::Yield(_) => Action::PredictYield,
            InferenceOutcome::Stress(_) => Action::AnalyzeStress,
            InferenceOutcome::Irrigation(_) => Action::OptimizeIrrigation,
        }
    }
}

/// Route a request to its engine
///
/// The action is resolved before any payload is inspected, so an unknown
/// action never reaches a computation.
pub fn run_inference(request: &InferenceRequest) -> InferenceResult<InferenceOutcome> {
    let action: Action = request.action.parse()?;

    match action {
        Action::PredictYield => {
            let input = PredictYieldInput::from_request(request)?;
            predict_yield(&input.features, &input.crop_type).map(InferenceOutcome::Yield)
        }
        Action::AnalyzeStress => {
            let input = AnalyzeStressInput::from_request(request)?;
            analyze_stress_patterns(&input.satellite_data).map(InferenceOutcome::Stress)
        }
        Action::OptimizeIrrigation => {
            let input = OptimizeIrrigationInput::from_request(request)?;
            let field = input.field_state()?;
            optimize_irrigation(&field).map(InferenceOutcome::Irrigation)
        }
    }
}
