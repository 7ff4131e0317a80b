//! `crtcheck-recon` — re-grades a scored CRT item table against its answer key.
//!
//! Pure engine crate: reads the two inputs, returns discrepancies and
//! renders reports into any writer. No CLI dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod key;
pub mod matcher;
pub mod model;
pub mod report;
pub mod responses;

pub use config::CheckConfig;
pub use engine::{load_inputs, run, CheckInput};
pub use error::CheckError;
pub use model::{CheckResult, Discrepancy, DiscrepancyReason, ResponseRow};
