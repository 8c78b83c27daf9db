//! Domain models for transaction insights
//!
//! Plain data shared by the pipeline stages, independent of the ABI library
//! and the HTTP client behind them.

pub mod insight;
