//! Shared types and inference engines for the Agro Inference Platform
//!
//! This crate contains the deterministic scoring core used by the HTTP
//! backend and the browser (via WASM): yield prediction, vegetation stress
//! analysis and irrigation optimization over fixed reference tables.

pub mod error;
pub mod inference;
pub mod models;
pub mod reference;
pub mod types;
pub mod validation;

pub use error::*;
pub use inference::*;
pub use models::*;
pub use types::*;
pub use validation::*;
