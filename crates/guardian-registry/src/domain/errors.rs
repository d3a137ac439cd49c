//! Custody registry error types.

use super::access::Role;
use shared_types::{Address, TokenId, U256};
use thiserror::Error;

/// Registry error type.
///
/// Every guard or validation failure aborts the triggering operation with
/// no partial state mutation. No error is retried internally.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GuardianError {
    #[error("Unauthorized: caller {caller:?} lacks role {required:?}")]
    Unauthorized { caller: Address, required: Role },

    #[error("Insufficient fee: paid {paid}, required {required}")]
    InsufficientFee { paid: U256, required: U256 },

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: U256, available: U256 },

    #[error("Inactivity window not yet elapsed: {remaining_secs}s remaining")]
    NotYetExpired { remaining_secs: u64 },

    #[error("Asset already registered: {token:?}")]
    DuplicateAsset { token: Address },

    #[error("Asset transfer failed for {token:?}: {reason}")]
    TransferFailed { token: Address, reason: String },

    #[error("Amount overflow")]
    AmountOverflow,

    #[error("No emergency address set for this listing")]
    EmergencyAddressUnset,
}

/// Error surfaced by the ERC20/ERC721 collaborator interfaces.
///
/// The registry never interprets these beyond wrapping them into
/// `GuardianError::TransferFailed` for the token that rejected the call.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: U256, available: U256 },

    #[error("insufficient allowance: requested {requested}, approved {approved}")]
    InsufficientAllowance { requested: U256, approved: U256 },

    #[error("operator {operator:?} not approved for all")]
    OperatorNotApproved { operator: Address },

    #[error("token {token_id} not owned by source account")]
    NotTokenOwner { token_id: TokenId },

    #[error("unknown token contract")]
    UnknownContract,
}
