//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] - hosted generative models
//! - [`mode::ConsoleMode`] - the study / interview behavioral profile
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod mode;
pub mod model;
