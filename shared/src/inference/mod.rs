//! Inference engines
//!
//! Three independent, pure scoring functions over the constant tables in
//! [`crate::reference`]. None of them keeps state between calls, so they can
//! be invoked concurrently without coordination.

pub mod dispatch;
pub mod irrigation;
pub mod recommendations;
pub mod rounding;
pub mod stress;
pub mod yield_prediction;

pub use dispatch::{run_inference, InferenceOutcome};
pub use irrigation::optimize_irrigation;
pub use recommendations::stress_recommendations;
pub use stress::analyze_stress_patterns;
pub use yield_prediction::predict_yield;
