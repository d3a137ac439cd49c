//! Cross-component custody scenarios.

pub mod fee_treasury;
pub mod release_flows;
