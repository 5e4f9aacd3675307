//! Applicant scoring and loan-cost estimation for the Eska lending marketplace.
//!
//! The [`underwriting`] module holds the two calculation engines and the HTTP
//! router that exposes them; [`config`] and [`telemetry`] carry the service
//! plumbing shared with the API binary.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod underwriting;
