//! HTTP handlers for the Agro Inference Platform

mod health;
mod inference;

pub use health::*;
pub use inference::*;
