//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod attachment_reader;
pub mod conversation_logger;
pub mod llm_gateway;
