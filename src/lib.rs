//! Raise Engine library crate.
//!
//! This crate exposes the salary-increase calculator and its API
//! components as reusable modules.  External applications may depend
//! on the `raise_engine` crate and call [`engine::Calculator`]
//! directly or embed the API via `api::build_router`.

pub mod api;
pub mod chart;
pub mod config;
pub mod engine;
pub mod error;
pub mod form;
pub mod models;
pub mod rates;
pub mod summary;
pub mod validation;

pub use engine::Calculator;
pub use error::{CalcError, Field};
pub use models::{CalculationInput, CalculationMode, CalculationResult, Profile, SalaryPeriod};
