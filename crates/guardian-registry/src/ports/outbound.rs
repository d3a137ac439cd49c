//! Outbound ports: token collaborator interfaces and the ledger clock.
//!
//! The registry only consumes the standard transfer/approval capabilities
//! of token contracts; the implementations themselves are external
//! collaborators.

use crate::domain::TokenError;
use shared_types::{Address, Timestamp, TokenId, U256};
use std::sync::Arc;

/// ERC20-like token contract capabilities consumed by the registry.
pub trait Erc20Token: Send + Sync {
    fn balance_of(&self, account: Address) -> Result<U256, TokenError>;

    /// Remaining amount `spender` may move on behalf of `owner`.
    fn allowance(&self, owner: Address, spender: Address) -> Result<U256, TokenError>;

    /// Moves `amount` from `from` to `to`, spending `spender`'s allowance.
    fn transfer_from(
        &self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), TokenError>;
}

/// ERC721-like contract capabilities consumed by the registry.
pub trait Erc721Token: Send + Sync {
    fn balance_of(&self, account: Address) -> Result<u64, TokenError>;

    /// Every token id currently owned by `account`.
    fn tokens_of_owner(&self, account: Address) -> Result<Vec<TokenId>, TokenError>;

    fn is_approved_for_all(&self, owner: Address, operator: Address) -> Result<bool, TokenError>;

    /// Moves one token from `from` to `to` under `operator`'s approval.
    fn transfer_from(
        &self,
        operator: Address,
        from: Address,
        to: Address,
        token_id: TokenId,
    ) -> Result<(), TokenError>;
}

/// Resolves registered token contract addresses to client handles.
pub trait TokenGateway: Send + Sync {
    fn erc20(&self, token: Address) -> Option<Arc<dyn Erc20Token>>;
    fn erc721(&self, token: Address) -> Option<Arc<dyn Erc721Token>>;
}

/// The monotonically advancing ledger clock.
///
/// Expiry compares against this clock, never wall time directly; tests
/// drive it manually.
pub trait LedgerClock: Send + Sync {
    fn now(&self) -> Timestamp;
}
