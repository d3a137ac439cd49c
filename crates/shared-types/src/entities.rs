//! # Core Shared Primitives
//!
//! Account, amount, and time primitives used by every crate in the
//! workspace.
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `ZERO_ADDRESS`
//! - **Value**: `U256` (wei-scale amounts), `TokenId`
//! - **Time**: `Timestamp` (seconds on the ledger clock)

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

/// A 20-byte Ethereum-style account address.
///
/// All account and token-contract identifiers use [u8; 20].
pub type Address = [u8; 20];

/// The null/unset address sentinel.
///
/// Role fields (`emergency_address`, `beneficiary_address`) default to this
/// value until the owner sets them. No real account may hold it.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Timestamp in seconds on the ledger clock.
pub type Timestamp = u64;

/// Identifier of a single ERC721 token within its contract.
pub type TokenId = u64;

/// Wei per ether. All amounts in the workspace are wei-scale.
pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// Short hex form of an address for log and error text, e.g. `0xab04..91ff`.
pub fn short_hex(address: &Address) -> String {
    format!(
        "0x{}..{}",
        hex::encode(&address[..2]),
        hex::encode(&address[18..])
    )
}
