//! Access guard: stateless caller-role evaluation.
//!
//! Each public operation names the role it requires and the guard is
//! evaluated before any mutation. Denial always surfaces as
//! `GuardianError::Unauthorized` with no state change.

use super::entities::Listing;
use super::errors::GuardianError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, ZERO_ADDRESS};

/// Roles recognized by the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// The account that owns a listing.
    Owner,
    /// The account named by `beneficiary_address` of a listing.
    Beneficiary,
    /// The account named by `emergency_address` of a listing.
    EmergencyContact,
    /// The deploying/owning account of the registry itself.
    Administrator,
}

/// Evaluates whether `caller` holds `required` for the given listing.
///
/// Role fields still at `ZERO_ADDRESS` never authorize anyone; an unset
/// beneficiary denies every claim attempt.
pub fn require_role(
    caller: Address,
    required: Role,
    owner: Address,
    listing: &Listing,
    administrator: Address,
) -> Result<(), GuardianError> {
    let authorized = match required {
        Role::Owner => caller == owner,
        Role::Beneficiary => {
            listing.beneficiary_address != ZERO_ADDRESS && caller == listing.beneficiary_address
        }
        Role::EmergencyContact => {
            listing.emergency_address != ZERO_ADDRESS && caller == listing.emergency_address
        }
        Role::Administrator => caller == administrator,
    };

    if authorized {
        Ok(())
    } else {
        Err(GuardianError::Unauthorized { caller, required })
    }
}

/// Administrator check for operations that are not scoped to a listing.
pub fn require_administrator(caller: Address, administrator: Address) -> Result<(), GuardianError> {
    if caller == administrator {
        Ok(())
    } else {
        Err(GuardianError::Unauthorized {
            caller,
            required: Role::Administrator,
        })
    }
}
