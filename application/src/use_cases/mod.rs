//! Use cases (application services)

pub mod session_controller;
