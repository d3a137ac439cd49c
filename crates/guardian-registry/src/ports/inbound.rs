//! Inbound port: the public custody API.

use crate::domain::{GuardianError, ListingSnapshot};
use shared_types::{Address, U256};

/// Primary API for custody operations.
///
/// Every operation takes the calling account explicitly (the analog of the
/// ledger host's transaction sender). Payable operations take the payment
/// that accompanied the call. All mutating operations are atomic: a guard
/// or transfer failure leaves no partial state behind.
pub trait CustodyApi: Send + Sync {
    // === Asset registration (fee-gated) ===

    /// Registers an ERC20 token address under the caller's listing.
    fn add_erc20(
        &self,
        caller: Address,
        token: Address,
        payment: U256,
    ) -> Result<(), GuardianError>;

    /// Registers an ERC721 contract address under the caller's listing.
    fn add_erc721(
        &self,
        caller: Address,
        token: Address,
        payment: U256,
    ) -> Result<(), GuardianError>;

    // === Ether custody ===

    /// Credits the caller's ether deposit.
    fn deposit_ether(&self, caller: Address, amount: U256) -> Result<(), GuardianError>;

    /// Debits the caller's ether deposit, capped at the current balance.
    fn withdraw_ether(&self, caller: Address, amount: U256) -> Result<(), GuardianError>;

    // === Role designation ===

    /// Names the account the owner can redirect all assets to.
    fn set_emergency_address(&self, caller: Address, addr: Address) -> Result<(), GuardianError>;

    /// Names the account entitled to claim after the inactivity window.
    fn set_beneficiary_address(&self, caller: Address, addr: Address)
        -> Result<(), GuardianError>;

    // === Release protocol ===

    /// Owner-only manual release: moves every registered asset from the
    /// owner's wallet to the emergency contact, then zeroes the listing's
    /// token sets. Callable at any time, no expiry check.
    fn transfer_all_tokens(
        &self,
        caller: Address,
        owner_account: Address,
    ) -> Result<(), GuardianError>;

    /// Beneficiary claim after expiry: drains all registered assets and the
    /// full ether deposit of `owner_account`'s listing to the beneficiary.
    /// Returns the ether amount released.
    fn withdraw(&self, caller: Address, owner_account: Address) -> Result<U256, GuardianError>;

    /// Administrator-only: drains the accumulated registration fees.
    /// Returns the amount paid out.
    fn owner_withdraw(&self, caller: Address) -> Result<U256, GuardianError>;

    // === Read views (no side effects) ===

    /// Snapshot of any account's listing; default for unknown accounts.
    fn address_to_listing(&self, account: Address) -> ListingSnapshot;

    /// Sum of all custodied ether deposits.
    fn total_eth_deposits(&self) -> U256;

    /// Registration fees collected and not yet withdrawn.
    fn accumulated_fees(&self) -> U256;
}
