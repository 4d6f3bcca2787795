//! quadrix-core: equation generation, answer verification, and scoring.
//!
//! This crate defines the data model, the store capability trait, and the
//! pure generate / verify / aggregate pipeline that the rest of quadrix
//! builds on.

pub mod engine;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod report;
pub mod statistics;
pub mod traits;
pub mod verifier;

pub use error::{QuizError, StoreError};
