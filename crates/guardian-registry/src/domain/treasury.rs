//! Fee treasury: registration fee validation and accumulation.
//!
//! Payments at or above the fixed registration fee are accepted and
//! retained in full (no refund of the excess). The accumulated total is
//! released only through the administrator's withdrawal.

use super::errors::GuardianError;
use shared_types::U256;

/// Collects registration fees until the administrator drains them.
#[derive(Clone, Debug)]
pub struct FeeTreasury {
    /// Fixed fee required per asset-address registration.
    registration_fee: U256,
    /// Fees collected and not yet withdrawn.
    accumulated: U256,
}

impl FeeTreasury {
    pub fn new(registration_fee: U256) -> Self {
        Self {
            registration_fee,
            accumulated: U256::zero(),
        }
    }

    /// The fixed per-registration fee.
    pub fn registration_fee(&self) -> U256 {
        self.registration_fee
    }

    /// Fees collected so far.
    pub fn accumulated(&self) -> U256 {
        self.accumulated
    }

    /// Validates that `payment` covers the registration fee and can be
    /// retained without overflowing the accumulated total.
    ///
    /// Callers run this guard before any mutation so a later
    /// `accumulate` of the same payment cannot fail.
    ///
    /// # Errors
    /// Returns `InsufficientFee` on underpayment, `AmountOverflow` if
    /// retaining the payment would overflow.
    pub fn check_fee(&self, payment: U256) -> Result<(), GuardianError> {
        if payment < self.registration_fee {
            return Err(GuardianError::InsufficientFee {
                paid: payment,
                required: self.registration_fee,
            });
        }
        if self.accumulated.checked_add(payment).is_none() {
            return Err(GuardianError::AmountOverflow);
        }
        Ok(())
    }

    /// Retains a validated payment, excess included.
    ///
    /// # Errors
    /// Returns `AmountOverflow` if the accumulated total would overflow.
    pub fn accumulate(&mut self, payment: U256) -> Result<(), GuardianError> {
        self.accumulated = self
            .accumulated
            .checked_add(payment)
            .ok_or(GuardianError::AmountOverflow)?;
        Ok(())
    }

    /// Zeroes the accumulated total and returns what was collected.
    pub fn drain(&mut self) -> U256 {
        std::mem::take(&mut self.accumulated)
    }
}
