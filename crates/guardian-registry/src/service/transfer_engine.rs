//! Asset transfer engine: all-or-nothing multi-asset movement.
//!
//! A release operation moves every registered ERC20 balance and every
//! ERC721 holding from a source wallet to a destination in one unit. The
//! engine preflights the whole batch first (contract resolvable, allowance
//! covers the full balance, operator approval granted) and only then
//! executes, so a conforming token contract cannot reject mid-sequence.
//! The first failure aborts the batch; the caller restores the staged
//! listing state.

use crate::domain::{GuardianError, TokenError};
use crate::ports::{Erc20Token, Erc721Token, TokenGateway};
use shared_types::{Address, TokenId, U256};
use std::sync::Arc;
use tracing::debug;

/// One preflighted ERC20 movement.
struct Erc20Move {
    token: Address,
    client: Arc<dyn Erc20Token>,
    amount: U256,
}

/// One preflighted ERC721 movement (every token the source owns).
struct Erc721Move {
    token: Address,
    client: Arc<dyn Erc721Token>,
    token_ids: Vec<TokenId>,
}

/// Executes multi-asset transfers on behalf of a listing.
///
/// `custodian` is the registry's own account identity, the spender/operator
/// the source must have pre-approved (an external precondition; the engine
/// verifies it during preflight but cannot grant it).
pub struct AssetTransferEngine<'a> {
    gateway: &'a dyn TokenGateway,
    custodian: Address,
}

impl<'a> AssetTransferEngine<'a> {
    pub fn new(gateway: &'a dyn TokenGateway, custodian: Address) -> Self {
        Self { gateway, custodian }
    }

    /// Moves the source's full balance of every listed ERC20 and every
    /// holding of every listed ERC721 to `dest`.
    ///
    /// Zero balances and empty holdings are skipped. Any rejection surfaces
    /// as `TransferFailed` naming the offending token; nothing is executed
    /// until the whole batch has passed preflight.
    pub fn transfer_all(
        &self,
        erc20_tokens: &[Address],
        erc721_tokens: &[Address],
        source: Address,
        dest: Address,
    ) -> Result<(), GuardianError> {
        let (erc20_moves, erc721_moves) = self.preflight(erc20_tokens, erc721_tokens, source)?;

        for mv in &erc20_moves {
            mv.client
                .transfer_from(self.custodian, source, dest, mv.amount)
                .map_err(|e| reject(mv.token, e))?;
            debug!(
                token = %shared_types::short_hex(&mv.token),
                amount = %mv.amount,
                "ERC20 balance moved"
            );
        }

        for mv in &erc721_moves {
            for &token_id in &mv.token_ids {
                mv.client
                    .transfer_from(self.custodian, source, dest, token_id)
                    .map_err(|e| reject(mv.token, e))?;
            }
            debug!(
                token = %shared_types::short_hex(&mv.token),
                count = mv.token_ids.len(),
                "ERC721 holdings moved"
            );
        }

        Ok(())
    }

    /// Validates the whole batch before any transfer executes.
    fn preflight(
        &self,
        erc20_tokens: &[Address],
        erc721_tokens: &[Address],
        source: Address,
    ) -> Result<(Vec<Erc20Move>, Vec<Erc721Move>), GuardianError> {
        let mut erc20_moves = Vec::with_capacity(erc20_tokens.len());
        for &token in erc20_tokens {
            let client = self
                .gateway
                .erc20(token)
                .ok_or_else(|| reject(token, TokenError::UnknownContract))?;
            let amount = client.balance_of(source).map_err(|e| reject(token, e))?;
            if amount.is_zero() {
                continue;
            }
            let approved = client
                .allowance(source, self.custodian)
                .map_err(|e| reject(token, e))?;
            if approved < amount {
                return Err(reject(
                    token,
                    TokenError::InsufficientAllowance {
                        requested: amount,
                        approved,
                    },
                ));
            }
            erc20_moves.push(Erc20Move {
                token,
                client,
                amount,
            });
        }

        let mut erc721_moves = Vec::with_capacity(erc721_tokens.len());
        for &token in erc721_tokens {
            let client = self
                .gateway
                .erc721(token)
                .ok_or_else(|| reject(token, TokenError::UnknownContract))?;
            let token_ids = client.tokens_of_owner(source).map_err(|e| reject(token, e))?;
            if token_ids.is_empty() {
                continue;
            }
            let approved = client
                .is_approved_for_all(source, self.custodian)
                .map_err(|e| reject(token, e))?;
            if !approved {
                return Err(reject(
                    token,
                    TokenError::OperatorNotApproved {
                        operator: self.custodian,
                    },
                ));
            }
            erc721_moves.push(Erc721Move {
                token,
                client,
                token_ids,
            });
        }

        Ok((erc20_moves, erc721_moves))
    }
}

fn reject(token: Address, err: TokenError) -> GuardianError {
    GuardianError::TransferFailed {
        token,
        reason: err.to_string(),
    }
}
