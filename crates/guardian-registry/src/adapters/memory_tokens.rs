//! In-memory token adapters implementing the outbound token ports.
//!
//! These model the standard ERC20/ERC721 transfer and approval semantics
//! the registry consumes: allowance-gated `transfer_from` for ERC20 and
//! operator-approval-gated `transfer_from` for ERC721. `U256::MAX`
//! allowance is treated as unlimited and never decremented, matching
//! common token implementations.

use crate::domain::TokenError;
use crate::ports::{Erc20Token, Erc721Token, TokenGateway};
use parking_lot::RwLock;
use shared_types::{Address, TokenId, U256};
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory ERC20 token.
#[derive(Default)]
pub struct InMemoryErc20 {
    balances: RwLock<HashMap<Address, U256>>,
    /// (owner, spender) → approved amount.
    allowances: RwLock<HashMap<(Address, Address), U256>>,
}

impl InMemoryErc20 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits freshly minted tokens to `account`.
    pub fn mint(&self, account: Address, amount: U256) {
        let mut balances = self.balances.write();
        let balance = balances.entry(account).or_insert_with(U256::zero);
        *balance += amount;
    }

    /// Sets `spender`'s allowance over `owner`'s balance.
    pub fn approve(&self, owner: Address, spender: Address, amount: U256) {
        self.allowances.write().insert((owner, spender), amount);
    }
}

impl Erc20Token for InMemoryErc20 {
    fn balance_of(&self, account: Address) -> Result<U256, TokenError> {
        Ok(self
            .balances
            .read()
            .get(&account)
            .copied()
            .unwrap_or_default())
    }

    fn allowance(&self, owner: Address, spender: Address) -> Result<U256, TokenError> {
        Ok(self
            .allowances
            .read()
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default())
    }

    fn transfer_from(
        &self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), TokenError> {
        let mut allowances = self.allowances.write();
        let mut balances = self.balances.write();

        let approved = allowances.get(&(from, spender)).copied().unwrap_or_default();
        if approved < amount {
            return Err(TokenError::InsufficientAllowance {
                requested: amount,
                approved,
            });
        }

        let available = balances.get(&from).copied().unwrap_or_default();
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                requested: amount,
                available,
            });
        }

        // U256::MAX allowance is unlimited
        if approved != U256::MAX {
            allowances.insert((from, spender), approved - amount);
        }
        balances.insert(from, available - amount);
        let dest = balances.entry(to).or_insert_with(U256::zero);
        *dest += amount;
        Ok(())
    }
}

/// In-memory ERC721 contract.
#[derive(Default)]
pub struct InMemoryErc721 {
    /// token id → current owner.
    owners: RwLock<HashMap<TokenId, Address>>,
    /// (owner, operator) → approved-for-all flag.
    operators: RwLock<HashMap<(Address, Address), bool>>,
    next_id: RwLock<TokenId>,
}

impl InMemoryErc721 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints `count` fresh tokens to `account`, returning their ids.
    pub fn mint(&self, account: Address, count: u64) -> Vec<TokenId> {
        let mut owners = self.owners.write();
        let mut next_id = self.next_id.write();
        let mut minted = Vec::with_capacity(count as usize);
        for _ in 0..count {
            owners.insert(*next_id, account);
            minted.push(*next_id);
            *next_id += 1;
        }
        minted
    }

    /// Grants or revokes `operator`'s approval over all of `owner`'s tokens.
    pub fn set_approval_for_all(&self, owner: Address, operator: Address, approved: bool) {
        self.operators.write().insert((owner, operator), approved);
    }
}

impl Erc721Token for InMemoryErc721 {
    fn balance_of(&self, account: Address) -> Result<u64, TokenError> {
        Ok(self
            .owners
            .read()
            .values()
            .filter(|&&owner| owner == account)
            .count() as u64)
    }

    fn tokens_of_owner(&self, account: Address) -> Result<Vec<TokenId>, TokenError> {
        let mut tokens: Vec<TokenId> = self
            .owners
            .read()
            .iter()
            .filter(|(_, &owner)| owner == account)
            .map(|(&id, _)| id)
            .collect();
        tokens.sort_unstable();
        Ok(tokens)
    }

    fn is_approved_for_all(&self, owner: Address, operator: Address) -> Result<bool, TokenError> {
        Ok(self
            .operators
            .read()
            .get(&(owner, operator))
            .copied()
            .unwrap_or(false))
    }

    fn transfer_from(
        &self,
        operator: Address,
        from: Address,
        to: Address,
        token_id: TokenId,
    ) -> Result<(), TokenError> {
        let approved = operator == from || self.is_approved_for_all(from, operator)?;
        if !approved {
            return Err(TokenError::OperatorNotApproved { operator });
        }

        let mut owners = self.owners.write();
        match owners.get(&token_id) {
            Some(&owner) if owner == from => {
                owners.insert(token_id, to);
                Ok(())
            }
            _ => Err(TokenError::NotTokenOwner { token_id }),
        }
    }
}

/// In-memory token directory mapping contract addresses to clients.
#[derive(Default)]
pub struct InMemoryTokenGateway {
    erc20s: RwLock<HashMap<Address, Arc<dyn Erc20Token>>>,
    erc721s: RwLock<HashMap<Address, Arc<dyn Erc721Token>>>,
}

impl InMemoryTokenGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_erc20(&self, token: Address, client: Arc<dyn Erc20Token>) {
        self.erc20s.write().insert(token, client);
    }

    pub fn register_erc721(&self, token: Address, client: Arc<dyn Erc721Token>) {
        self.erc721s.write().insert(token, client);
    }
}

impl TokenGateway for InMemoryTokenGateway {
    fn erc20(&self, token: Address) -> Option<Arc<dyn Erc20Token>> {
        self.erc20s.read().get(&token).cloned()
    }

    fn erc721(&self, token: Address) -> Option<Arc<dyn Erc721Token>> {
        self.erc721s.read().get(&token).cloned()
    }
}
