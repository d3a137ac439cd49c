//! Core domain entities for the custody registry.
//!
//! Defines the per-account `Listing` record, its read-only snapshot, and the
//! registry configuration.

// Re-export from shared-types for convenience
pub use shared_types::{Address, Timestamp, TokenId, U256, ZERO_ADDRESS};

use super::errors::GuardianError;
use serde::{Deserialize, Serialize};

/// Per-account custody record.
///
/// One listing exists per owner account, created lazily on first
/// interaction. It is never deleted; after a release it persists at zero
/// state and can be re-funded.
///
/// INVARIANT-1: token address vectors contain no duplicates.
/// INVARIANT-2: `eth_deposit` never goes negative (withdrawals are capped).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Registered ERC20 token contract addresses (insertion order, no duplicates).
    pub erc20_tokens: Vec<Address>,
    /// Registered ERC721 contract addresses (insertion order, no duplicates).
    pub erc721_tokens: Vec<Address>,
    /// Custodied ether deposit in wei.
    pub eth_deposit: U256,
    /// Account the owner can redirect all assets to at will.
    /// `ZERO_ADDRESS` until set.
    pub emergency_address: Address,
    /// Account entitled to claim all assets after the inactivity window.
    /// `ZERO_ADDRESS` until set.
    pub beneficiary_address: Address,
    /// Ledger time of the last owner-initiated mutation.
    pub last_activity_time: Timestamp,
}

impl Default for Listing {
    fn default() -> Self {
        Self {
            erc20_tokens: Vec::new(),
            erc721_tokens: Vec::new(),
            eth_deposit: U256::zero(),
            emergency_address: ZERO_ADDRESS,
            beneficiary_address: ZERO_ADDRESS,
            last_activity_time: 0,
        }
    }
}

impl Listing {
    /// Creates a fresh listing stamped with the current ledger time.
    pub fn new(now: Timestamp) -> Self {
        Self {
            last_activity_time: now,
            ..Default::default()
        }
    }

    /// Number of registered ERC20 addresses. Always equals
    /// `erc20_tokens.len()`.
    pub fn erc20_count(&self) -> usize {
        self.erc20_tokens.len()
    }

    /// Number of registered ERC721 addresses. Always equals
    /// `erc721_tokens.len()`.
    pub fn erc721_count(&self) -> usize {
        self.erc721_tokens.len()
    }

    /// Returns true if the listing holds no deposit and no registered assets.
    pub fn is_empty(&self) -> bool {
        self.eth_deposit.is_zero()
            && self.erc20_tokens.is_empty()
            && self.erc721_tokens.is_empty()
    }

    /// Registers an ERC20 address.
    ///
    /// # Errors
    /// Returns `DuplicateAsset` if the address is already registered.
    pub fn register_erc20(&mut self, token: Address) -> Result<(), GuardianError> {
        if self.erc20_tokens.contains(&token) {
            return Err(GuardianError::DuplicateAsset { token });
        }
        self.erc20_tokens.push(token);
        Ok(())
    }

    /// Registers an ERC721 address.
    ///
    /// # Errors
    /// Returns `DuplicateAsset` if the address is already registered.
    pub fn register_erc721(&mut self, token: Address) -> Result<(), GuardianError> {
        if self.erc721_tokens.contains(&token) {
            return Err(GuardianError::DuplicateAsset { token });
        }
        self.erc721_tokens.push(token);
        Ok(())
    }

    /// Credits the ether deposit.
    ///
    /// # Errors
    /// Returns `AmountOverflow` if the deposit would exceed U256::MAX.
    pub fn credit(&mut self, amount: U256) -> Result<(), GuardianError> {
        self.eth_deposit = self
            .eth_deposit
            .checked_add(amount)
            .ok_or(GuardianError::AmountOverflow)?;
        Ok(())
    }

    /// Debits the ether deposit.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if `amount` exceeds the deposit.
    pub fn debit(&mut self, amount: U256) -> Result<(), GuardianError> {
        if amount > self.eth_deposit {
            return Err(GuardianError::InsufficientBalance {
                requested: amount,
                available: self.eth_deposit,
            });
        }
        self.eth_deposit -= amount;
        Ok(())
    }

    /// Builds a read-only snapshot of this listing.
    pub fn snapshot(&self) -> ListingSnapshot {
        ListingSnapshot {
            erc20_tokens: self.erc20_tokens.clone(),
            erc721_tokens: self.erc721_tokens.clone(),
            erc20_count: self.erc20_count(),
            erc721_count: self.erc721_count(),
            eth_deposit: self.eth_deposit,
            emergency_address: self.emergency_address,
            beneficiary_address: self.beneficiary_address,
            last_activity_time: self.last_activity_time,
        }
    }
}

/// Read-only view of a listing, returned by the `address_to_listing` view.
///
/// Unknown accounts yield the default snapshot (all zero), matching the
/// mapping semantics of a ledger host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSnapshot {
    pub erc20_tokens: Vec<Address>,
    pub erc721_tokens: Vec<Address>,
    pub erc20_count: usize,
    pub erc721_count: usize,
    pub eth_deposit: U256,
    pub emergency_address: Address,
    pub beneficiary_address: Address,
    pub last_activity_time: Timestamp,
}

/// Registry configuration, fixed at initialization.
#[derive(Clone, Debug)]
pub struct GuardianConfig {
    /// Fee required per asset-address registration, in wei.
    pub registration_fee: U256,
    /// Inactivity window after which a beneficiary may claim, in seconds.
    pub timeout_window_secs: u64,
}

impl Default for GuardianConfig {
    fn default() -> Self {
        Self {
            // 0.01 ether
            registration_fee: U256::from(10_000_000_000_000_000u64),
            // ~6 months
            timeout_window_secs: 15_552_000,
        }
    }
}

impl GuardianConfig {
    /// Creates a config with a short inactivity window for testing.
    pub fn for_testing() -> Self {
        Self {
            registration_fee: U256::from(100u64),
            timeout_window_secs: 300, // 5 minutes
        }
    }
}
