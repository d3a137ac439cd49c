//! Release protocol scenarios: manual transfer to the emergency contact
//! and the dead-man-switch beneficiary claim.

#[cfg(test)]
mod tests {
    use crate::harness::{
        one_ether, TestBed, BENEFICIARY, EMERGENCY, NFT_ADDR, OWNER, STRANGER, TOKEN_ADDR,
    };
    use guardian_registry::domain::{GuardianError, Role};
    use guardian_registry::ports::{CustodyApi, Erc20Token, Erc721Token};
    use shared_types::U256;

    fn token_amount() -> U256 {
        U256::from(1_000u64) * one_ether()
    }

    /// Owner registers assets and names an emergency contact, then
    /// redirects everything manually. No expiry involved.
    #[test]
    fn test_manual_transfer_to_emergency_contact() {
        let bed = TestBed::new();
        bed.fund_owner(token_amount(), 3);

        bed.service
            .add_erc20(OWNER, TOKEN_ADDR, bed.fee())
            .unwrap();
        bed.service.add_erc721(OWNER, NFT_ADDR, bed.fee()).unwrap();
        bed.service.set_emergency_address(OWNER, EMERGENCY).unwrap();
        assert_eq!(
            bed.service.address_to_listing(OWNER).emergency_address,
            EMERGENCY
        );

        // A non-owner cannot trigger the release
        let err = bed.service.transfer_all_tokens(STRANGER, OWNER).unwrap_err();
        assert_eq!(
            err,
            GuardianError::Unauthorized {
                caller: STRANGER,
                required: Role::Owner,
            }
        );

        bed.service.transfer_all_tokens(OWNER, OWNER).unwrap();

        // Every asset moved to the emergency contact
        assert_eq!(bed.token.balance_of(EMERGENCY).unwrap(), token_amount());
        assert!(bed.token.balance_of(OWNER).unwrap().is_zero());
        assert_eq!(bed.nft.balance_of(EMERGENCY).unwrap(), 3);
        assert_eq!(bed.nft.balance_of(OWNER).unwrap(), 0);

        // Listing asset sets emptied
        let snapshot = bed.service.address_to_listing(OWNER);
        assert_eq!(snapshot.erc20_count, 0);
        assert_eq!(snapshot.erc721_count, 0);
        bed.audit_totals(&[OWNER]);
    }

    #[test]
    fn test_manual_transfer_without_emergency_contact_rejected() {
        let bed = TestBed::new();
        bed.fund_owner(token_amount(), 1);
        bed.service
            .add_erc20(OWNER, TOKEN_ADDR, bed.fee())
            .unwrap();

        let err = bed.service.transfer_all_tokens(OWNER, OWNER).unwrap_err();
        assert_eq!(err, GuardianError::EmergencyAddressUnset);

        // Nothing moved, listing intact
        assert_eq!(bed.token.balance_of(OWNER).unwrap(), token_amount());
        assert_eq!(bed.service.address_to_listing(OWNER).erc20_count, 1);
    }

    /// The full dead-man-switch flow: claim fails before expiry, strangers
    /// stay locked out after expiry, the beneficiary drains everything.
    #[test]
    fn test_beneficiary_claim_after_inactivity_window() {
        let bed = TestBed::new();
        bed.fund_owner(token_amount(), 3);

        bed.service.deposit_ether(OWNER, one_ether()).unwrap();
        bed.service
            .add_erc20(OWNER, TOKEN_ADDR, bed.fee())
            .unwrap();
        bed.service.add_erc721(OWNER, NFT_ADDR, bed.fee()).unwrap();
        bed.service
            .set_beneficiary_address(OWNER, BENEFICIARY)
            .unwrap();
        assert_eq!(
            bed.service.address_to_listing(OWNER).beneficiary_address,
            BENEFICIARY
        );
        bed.audit_totals(&[OWNER]);

        // Before the window elapses the claim is premature
        bed.clock.advance(bed.window() - 1);
        let err = bed.service.withdraw(BENEFICIARY, OWNER).unwrap_err();
        assert_eq!(err, GuardianError::NotYetExpired { remaining_secs: 1 });

        // Past the window a stranger is still unauthorized
        bed.clock.advance(2);
        let err = bed.service.withdraw(STRANGER, OWNER).unwrap_err();
        assert_eq!(
            err,
            GuardianError::Unauthorized {
                caller: STRANGER,
                required: Role::Beneficiary,
            }
        );

        // The designated beneficiary drains everything
        let released = bed.service.withdraw(BENEFICIARY, OWNER).unwrap();
        assert_eq!(released, one_ether());
        assert_eq!(bed.token.balance_of(BENEFICIARY).unwrap(), token_amount());
        assert_eq!(bed.nft.balance_of(BENEFICIARY).unwrap(), 3);

        let snapshot = bed.service.address_to_listing(OWNER);
        assert!(snapshot.eth_deposit.is_zero());
        assert_eq!(snapshot.erc20_count, 0);
        assert_eq!(snapshot.erc721_count, 0);
        assert!(bed.service.total_eth_deposits().is_zero());
        bed.audit_totals(&[OWNER]);
    }

    #[test]
    fn test_claim_cannot_be_replayed() {
        let bed = TestBed::new();
        bed.fund_owner(token_amount(), 1);

        bed.service.deposit_ether(OWNER, one_ether()).unwrap();
        bed.service
            .set_beneficiary_address(OWNER, BENEFICIARY)
            .unwrap();

        bed.clock.advance(bed.window());
        let released = bed.service.withdraw(BENEFICIARY, OWNER).unwrap();
        assert_eq!(released, one_ether());

        // The listing is already drained; a second claim releases nothing
        let released_again = bed.service.withdraw(BENEFICIARY, OWNER).unwrap();
        assert!(released_again.is_zero());
        assert!(bed.service.total_eth_deposits().is_zero());
    }

    #[test]
    fn test_released_listing_can_be_refunded_and_reclaimed() {
        let bed = TestBed::new();
        bed.fund_owner(token_amount(), 0);

        bed.service.deposit_ether(OWNER, one_ether()).unwrap();
        bed.service
            .set_beneficiary_address(OWNER, BENEFICIARY)
            .unwrap();
        bed.clock.advance(bed.window());
        bed.service.withdraw(BENEFICIARY, OWNER).unwrap();

        // Owner re-funds; the beneficiary designation persisted
        bed.service.deposit_ether(OWNER, one_ether()).unwrap();
        let snapshot = bed.service.address_to_listing(OWNER);
        assert_eq!(snapshot.beneficiary_address, BENEFICIARY);
        assert_eq!(snapshot.eth_deposit, one_ether());

        // Fresh deposit reset the inactivity clock
        let err = bed.service.withdraw(BENEFICIARY, OWNER).unwrap_err();
        assert!(matches!(err, GuardianError::NotYetExpired { .. }));

        bed.clock.advance(bed.window());
        let released = bed.service.withdraw(BENEFICIARY, OWNER).unwrap();
        assert_eq!(released, one_ether());
        bed.audit_totals(&[OWNER]);
    }

    #[test]
    fn test_failed_token_transfer_aborts_whole_claim() {
        let bed = TestBed::new();
        // Funded but the custodian never received ERC20 approval
        bed.token.mint(OWNER, token_amount());

        bed.service.deposit_ether(OWNER, one_ether()).unwrap();
        bed.service
            .add_erc20(OWNER, TOKEN_ADDR, bed.fee())
            .unwrap();
        bed.service
            .set_beneficiary_address(OWNER, BENEFICIARY)
            .unwrap();

        bed.clock.advance(bed.window());
        let err = bed.service.withdraw(BENEFICIARY, OWNER).unwrap_err();
        assert!(matches!(err, GuardianError::TransferFailed { .. }));

        // No partial movement: ether, assets, and totals all intact
        assert_eq!(bed.token.balance_of(OWNER).unwrap(), token_amount());
        assert!(bed.token.balance_of(BENEFICIARY).unwrap().is_zero());
        let snapshot = bed.service.address_to_listing(OWNER);
        assert_eq!(snapshot.eth_deposit, one_ether());
        assert_eq!(snapshot.erc20_count, 1);
        assert_eq!(bed.service.total_eth_deposits(), one_ether());
        bed.audit_totals(&[OWNER]);
    }

    #[test]
    fn test_manual_transfer_leaves_deposit_in_place() {
        let bed = TestBed::new();
        bed.fund_owner(token_amount(), 1);

        bed.service.deposit_ether(OWNER, one_ether()).unwrap();
        bed.service
            .add_erc20(OWNER, TOKEN_ADDR, bed.fee())
            .unwrap();
        bed.service.set_emergency_address(OWNER, EMERGENCY).unwrap();

        bed.service.transfer_all_tokens(OWNER, OWNER).unwrap();

        // Manual release moves tokens only; the ether deposit stays custodied
        let snapshot = bed.service.address_to_listing(OWNER);
        assert_eq!(snapshot.eth_deposit, one_ether());
        assert_eq!(bed.service.total_eth_deposits(), one_ether());
        bed.audit_totals(&[OWNER]);
    }
}
