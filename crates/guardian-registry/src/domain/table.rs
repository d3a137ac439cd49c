//! Listing table: the owned account → `Listing` map plus global counters.
//!
//! This is the only code that mutates listing state. All methods are pure
//! and synchronous; the ledger clock is passed in as `now`. The service
//! layer serializes access and orchestrates external transfer effects.
//!
//! ## Invariants Enforced
//!
//! - INVARIANT-1: `total_eth_deposits` equals the sum of every listing's
//!   `eth_deposit` (checked in `credit_deposit`/`debit_deposit`/staging).
//! - INVARIANT-2: token vectors stay duplicate-free (checked in the
//!   registration methods).
//! - INVARIANT-3: every owner-initiated mutation refreshes
//!   `last_activity_time`; staging a beneficiary release does not.

use super::entities::{Listing, ListingSnapshot};
use super::errors::GuardianError;
use shared_types::{Address, Timestamp, U256};
use std::collections::HashMap;

/// Listing data pulled out of the table ahead of a release operation.
///
/// The listing itself is zeroed at staging time, before any external
/// transfer is issued, so a re-entrant call observes an already-released
/// listing. On transfer failure the staged data is restored unchanged.
#[derive(Clone, Debug)]
pub struct StagedRelease {
    pub erc20_tokens: Vec<Address>,
    pub erc721_tokens: Vec<Address>,
    pub eth_deposit: U256,
}

impl StagedRelease {
    /// Returns true if there is nothing to move.
    pub fn is_empty(&self) -> bool {
        self.erc20_tokens.is_empty() && self.erc721_tokens.is_empty() && self.eth_deposit.is_zero()
    }
}

/// The per-account listing table and global deposit counter.
#[derive(Debug, Default)]
pub struct ListingTable {
    /// All listings indexed by owner account.
    listings: HashMap<Address, Listing>,
    /// Sum of every listing's `eth_deposit`.
    total_eth_deposits: U256,
}

impl ListingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all custodied ether deposits.
    pub fn total_eth_deposits(&self) -> U256 {
        self.total_eth_deposits
    }

    /// Borrow a listing if the account has ever interacted.
    pub fn listing(&self, account: Address) -> Option<&Listing> {
        self.listings.get(&account)
    }

    /// Read view: snapshot for any account, default for unknown ones.
    pub fn snapshot(&self, account: Address) -> ListingSnapshot {
        self.listings
            .get(&account)
            .map(Listing::snapshot)
            .unwrap_or_default()
    }

    /// Recomputed sum over all listings; used by invariant audits in tests.
    pub fn sum_of_deposits(&self) -> U256 {
        self.listings
            .values()
            .fold(U256::zero(), |acc, l| acc + l.eth_deposit)
    }

    fn listing_mut(&mut self, account: Address, now: Timestamp) -> &mut Listing {
        self.listings
            .entry(account)
            .or_insert_with(|| Listing::new(now))
    }

    /// Registers an ERC20 address under `account`'s listing.
    pub fn register_erc20(
        &mut self,
        account: Address,
        token: Address,
        now: Timestamp,
    ) -> Result<(), GuardianError> {
        let listing = self.listing_mut(account, now);
        listing.register_erc20(token)?;
        listing.last_activity_time = now;
        Ok(())
    }

    /// Registers an ERC721 address under `account`'s listing.
    pub fn register_erc721(
        &mut self,
        account: Address,
        token: Address,
        now: Timestamp,
    ) -> Result<(), GuardianError> {
        let listing = self.listing_mut(account, now);
        listing.register_erc721(token)?;
        listing.last_activity_time = now;
        Ok(())
    }

    /// Credits `account`'s ether deposit and the global total.
    pub fn credit_deposit(
        &mut self,
        account: Address,
        amount: U256,
        now: Timestamp,
    ) -> Result<(), GuardianError> {
        // Check the global counter first so a failure leaves the listing
        // untouched as well.
        let new_total = self
            .total_eth_deposits
            .checked_add(amount)
            .ok_or(GuardianError::AmountOverflow)?;
        let listing = self.listing_mut(account, now);
        listing.credit(amount)?;
        listing.last_activity_time = now;
        self.total_eth_deposits = new_total;
        Ok(())
    }

    /// Debits `account`'s ether deposit and the global total.
    pub fn debit_deposit(
        &mut self,
        account: Address,
        amount: U256,
        now: Timestamp,
    ) -> Result<(), GuardianError> {
        let listing = self
            .listings
            .get_mut(&account)
            .ok_or(GuardianError::InsufficientBalance {
                requested: amount,
                available: U256::zero(),
            })?;
        listing.debit(amount)?;
        listing.last_activity_time = now;
        self.total_eth_deposits -= amount;
        Ok(())
    }

    /// Marks an owner action on `account`'s listing, refreshing
    /// `last_activity_time` without other changes.
    pub fn touch(&mut self, account: Address, now: Timestamp) {
        self.listing_mut(account, now).last_activity_time = now;
    }

    /// Overwrites the emergency contact of `account`'s listing.
    pub fn set_emergency_address(&mut self, account: Address, addr: Address, now: Timestamp) {
        let listing = self.listing_mut(account, now);
        listing.emergency_address = addr;
        listing.last_activity_time = now;
    }

    /// Overwrites the beneficiary of `account`'s listing.
    pub fn set_beneficiary_address(&mut self, account: Address, addr: Address, now: Timestamp) {
        let listing = self.listing_mut(account, now);
        listing.beneficiary_address = addr;
        listing.last_activity_time = now;
    }

    /// Zeroes the listing's asset sets (and deposit, if requested) and
    /// returns the staged data for the transfer engine.
    ///
    /// `last_activity_time` and role addresses are left untouched: a
    /// release is not an owner action, and role designations persist for
    /// re-funding.
    pub fn stage_release(&mut self, account: Address, include_deposit: bool) -> StagedRelease {
        let listing = match self.listings.get_mut(&account) {
            Some(listing) => listing,
            None => {
                return StagedRelease {
                    erc20_tokens: Vec::new(),
                    erc721_tokens: Vec::new(),
                    eth_deposit: U256::zero(),
                }
            }
        };

        let eth_deposit = if include_deposit {
            std::mem::take(&mut listing.eth_deposit)
        } else {
            U256::zero()
        };
        let staged = StagedRelease {
            erc20_tokens: std::mem::take(&mut listing.erc20_tokens),
            erc721_tokens: std::mem::take(&mut listing.erc721_tokens),
            eth_deposit,
        };
        self.total_eth_deposits -= staged.eth_deposit;
        staged
    }

    /// Puts staged release data back after a failed transfer, restoring the
    /// listing and the global counter exactly as they were.
    pub fn restore_release(&mut self, account: Address, now: Timestamp, staged: StagedRelease) {
        let listing = self.listing_mut(account, now);
        listing.erc20_tokens = staged.erc20_tokens;
        listing.erc721_tokens = staged.erc721_tokens;
        listing.eth_deposit += staged.eth_deposit;
        self.total_eth_deposits += staged.eth_deposit;
    }
}
