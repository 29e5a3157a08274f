//! Domain models for the Agro Inference Platform

mod irrigation;
mod request;
mod stress;
mod yield_prediction;

pub use irrigation::*;
pub use request::*;
pub use stress::*;
pub use yield_prediction::*;
