//! Registry service: the single entry point for all custody operations.
//!
//! ## Serialization Discipline
//!
//! The reference execution model is a single serial ledger where every
//! operation is atomic. Outside a ledger host that guarantee is reproduced
//! explicitly: the listing table and the fee treasury sit behind one mutex
//! that is held for the whole operation, external transfer calls included.
//! Two operations for the same account, or any two operations touching the
//! global counters, can never interleave their read-modify-write sequences.
//!
//! ## Release Safety
//!
//! Release operations zero the listing (stage) before issuing any external
//! transfer, so no call path can observe or double-spend an
//! in-flight release. On transfer failure the staged data is restored and
//! the operation fails with no net state change.

use crate::domain::{
    expiry, require_administrator, require_role, FeeTreasury, GuardianConfig, GuardianError,
    ListingSnapshot, ListingTable, Role,
};
use crate::ports::{CustodyApi, LedgerClock, TokenGateway};
use crate::service::AssetTransferEngine;
use parking_lot::Mutex;
use shared_types::{short_hex, Address, U256, ZERO_ADDRESS};
use std::sync::Arc;
use tracing::{info, warn};

/// Everything the serialization discipline protects as one unit.
struct LedgerState {
    table: ListingTable,
    treasury: FeeTreasury,
}

/// The custody registry.
///
/// Owns the listing table and fee treasury, enforces guards first, stages
/// state mutations, then invokes transfer effects, committing only if all
/// succeed.
pub struct RegistryService {
    /// Deploying/owning account; sole claimant of accumulated fees.
    administrator: Address,
    /// The registry's own account identity: the spender/operator that
    /// asset holders pre-approve on their token contracts.
    custodian: Address,
    config: GuardianConfig,
    tokens: Arc<dyn TokenGateway>,
    clock: Arc<dyn LedgerClock>,
    state: Mutex<LedgerState>,
}

impl RegistryService {
    pub fn new(
        administrator: Address,
        custodian: Address,
        config: GuardianConfig,
        tokens: Arc<dyn TokenGateway>,
        clock: Arc<dyn LedgerClock>,
    ) -> Self {
        let treasury = FeeTreasury::new(config.registration_fee);
        Self {
            administrator,
            custodian,
            config,
            tokens,
            clock,
            state: Mutex::new(LedgerState {
                table: ListingTable::new(),
                treasury,
            }),
        }
    }

    /// The fixed per-registration fee.
    pub fn registration_fee(&self) -> U256 {
        self.config.registration_fee
    }

    /// The configured inactivity window in seconds.
    pub fn timeout_window_secs(&self) -> u64 {
        self.config.timeout_window_secs
    }
}

impl CustodyApi for RegistryService {
    fn add_erc20(
        &self,
        caller: Address,
        token: Address,
        payment: U256,
    ) -> Result<(), GuardianError> {
        let now = self.clock.now();
        let mut state = self.state.lock();
        // Both fee guards run before the table mutates; a rejected duplicate
        // costs the caller nothing, and an unretainable payment registers
        // nothing.
        state.treasury.check_fee(payment)?;
        state.table.register_erc20(caller, token, now)?;
        state.treasury.accumulate(payment)?;
        info!(
            caller = %short_hex(&caller),
            token = %short_hex(&token),
            "ERC20 address registered"
        );
        Ok(())
    }

    fn add_erc721(
        &self,
        caller: Address,
        token: Address,
        payment: U256,
    ) -> Result<(), GuardianError> {
        let now = self.clock.now();
        let mut state = self.state.lock();
        state.treasury.check_fee(payment)?;
        state.table.register_erc721(caller, token, now)?;
        state.treasury.accumulate(payment)?;
        info!(
            caller = %short_hex(&caller),
            token = %short_hex(&token),
            "ERC721 address registered"
        );
        Ok(())
    }

    fn deposit_ether(&self, caller: Address, amount: U256) -> Result<(), GuardianError> {
        let now = self.clock.now();
        let mut state = self.state.lock();
        state.table.credit_deposit(caller, amount, now)?;
        info!(
            caller = %short_hex(&caller),
            amount = %amount,
            total = %state.table.total_eth_deposits(),
            "ether deposited"
        );
        Ok(())
    }

    fn withdraw_ether(&self, caller: Address, amount: U256) -> Result<(), GuardianError> {
        let now = self.clock.now();
        let mut state = self.state.lock();
        state.table.debit_deposit(caller, amount, now)?;
        info!(
            caller = %short_hex(&caller),
            amount = %amount,
            total = %state.table.total_eth_deposits(),
            "ether withdrawn"
        );
        Ok(())
    }

    fn set_emergency_address(&self, caller: Address, addr: Address) -> Result<(), GuardianError> {
        let now = self.clock.now();
        let mut state = self.state.lock();
        state.table.set_emergency_address(caller, addr, now);
        info!(
            caller = %short_hex(&caller),
            emergency = %short_hex(&addr),
            "emergency address set"
        );
        Ok(())
    }

    fn set_beneficiary_address(&self, caller: Address, addr: Address) -> Result<(), GuardianError> {
        let now = self.clock.now();
        let mut state = self.state.lock();
        state.table.set_beneficiary_address(caller, addr, now);
        info!(
            caller = %short_hex(&caller),
            beneficiary = %short_hex(&addr),
            "beneficiary address set"
        );
        Ok(())
    }

    fn transfer_all_tokens(
        &self,
        caller: Address,
        owner_account: Address,
    ) -> Result<(), GuardianError> {
        let now = self.clock.now();
        let mut state = self.state.lock();

        let listing = state
            .table
            .listing(owner_account)
            .cloned()
            .unwrap_or_default();
        require_role(
            caller,
            Role::Owner,
            owner_account,
            &listing,
            self.administrator,
        )?;
        if listing.emergency_address == ZERO_ADDRESS {
            return Err(GuardianError::EmergencyAddressUnset);
        }

        // Stage: token sets leave the listing before any external call.
        let staged = state.table.stage_release(owner_account, false);
        let engine = AssetTransferEngine::new(self.tokens.as_ref(), self.custodian);
        if let Err(err) = engine.transfer_all(
            &staged.erc20_tokens,
            &staged.erc721_tokens,
            owner_account,
            listing.emergency_address,
        ) {
            warn!(
                owner = %short_hex(&owner_account),
                error = %err,
                "manual release aborted, listing restored"
            );
            state.table.restore_release(owner_account, now, staged);
            return Err(err);
        }

        // Owner action: refresh the activity clock.
        state.table.touch(owner_account, now);
        info!(
            owner = %short_hex(&owner_account),
            emergency = %short_hex(&listing.emergency_address),
            erc20_count = staged.erc20_tokens.len(),
            erc721_count = staged.erc721_tokens.len(),
            "all tokens transferred to emergency contact"
        );
        Ok(())
    }

    fn withdraw(&self, caller: Address, owner_account: Address) -> Result<U256, GuardianError> {
        let now = self.clock.now();
        let mut state = self.state.lock();

        let listing = state
            .table
            .listing(owner_account)
            .cloned()
            .unwrap_or_default();
        // Wrong callers always see Unauthorized, expired or not.
        require_role(
            caller,
            Role::Beneficiary,
            owner_account,
            &listing,
            self.administrator,
        )?;
        if !expiry::is_expired(
            listing.last_activity_time,
            now,
            self.config.timeout_window_secs,
        ) {
            return Err(GuardianError::NotYetExpired {
                remaining_secs: expiry::remaining(
                    listing.last_activity_time,
                    now,
                    self.config.timeout_window_secs,
                ),
            });
        }

        // Stage: assets and deposit leave the listing before any external
        // call; a beneficiary claim is not owner activity, so the activity
        // clock is left alone.
        let staged = state.table.stage_release(owner_account, true);
        let engine = AssetTransferEngine::new(self.tokens.as_ref(), self.custodian);
        if let Err(err) = engine.transfer_all(
            &staged.erc20_tokens,
            &staged.erc721_tokens,
            owner_account,
            listing.beneficiary_address,
        ) {
            warn!(
                owner = %short_hex(&owner_account),
                beneficiary = %short_hex(&caller),
                error = %err,
                "beneficiary claim aborted, listing restored"
            );
            state.table.restore_release(owner_account, now, staged);
            return Err(err);
        }

        info!(
            owner = %short_hex(&owner_account),
            beneficiary = %short_hex(&caller),
            eth_released = %staged.eth_deposit,
            erc20_count = staged.erc20_tokens.len(),
            erc721_count = staged.erc721_tokens.len(),
            "listing claimed by beneficiary"
        );
        Ok(staged.eth_deposit)
    }

    fn owner_withdraw(&self, caller: Address) -> Result<U256, GuardianError> {
        let mut state = self.state.lock();
        require_administrator(caller, self.administrator)?;
        let amount = state.treasury.drain();
        info!(
            administrator = %short_hex(&caller),
            amount = %amount,
            "accumulated fees withdrawn"
        );
        Ok(amount)
    }

    fn address_to_listing(&self, account: Address) -> ListingSnapshot {
        self.state.lock().table.snapshot(account)
    }

    fn total_eth_deposits(&self) -> U256 {
        self.state.lock().table.total_eth_deposits()
    }

    fn accumulated_fees(&self) -> U256 {
        self.state.lock().treasury.accumulated()
    }
}
