//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - ABI selector extraction, decoding and normalization using alloy-dyn-abi
//! - The reqwest-backed signature directory client

pub mod abi;
pub mod registry;
