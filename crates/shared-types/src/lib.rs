//! # Shared Types Crate
//!
//! This crate contains the primitive types shared across the custody core:
//! account addresses, amounts, timestamps, and token identifiers.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate primitives are defined here.
//! - **Ledger-native amounts**: Ether-scale values use `U256` (wei units),
//!   never floating point.

pub mod entities;

pub use entities::*;
