//! Registration fees and the administrator's treasury withdrawal.

#[cfg(test)]
mod tests {
    use crate::harness::{TestBed, ADMIN, NFT_ADDR, OWNER, STRANGER, TOKEN_ADDR};
    use guardian_registry::domain::{GuardianError, Role};
    use guardian_registry::ports::CustodyApi;
    use shared_types::U256;

    #[test]
    fn test_register_one_of_each_then_admin_collects_twice_the_fee() {
        let bed = TestBed::new();
        let fee = bed.fee();

        bed.service.add_erc20(OWNER, TOKEN_ADDR, fee).unwrap();
        bed.service.add_erc721(OWNER, NFT_ADDR, fee).unwrap();

        let snapshot = bed.service.address_to_listing(OWNER);
        assert_eq!(snapshot.erc20_count, 1);
        assert_eq!(snapshot.erc721_count, 1);
        bed.audit_totals(&[OWNER]);

        // A non-administrator cannot collect
        let err = bed.service.owner_withdraw(STRANGER).unwrap_err();
        assert_eq!(
            err,
            GuardianError::Unauthorized {
                caller: STRANGER,
                required: Role::Administrator,
            }
        );

        let collected = bed.service.owner_withdraw(ADMIN).unwrap();
        assert_eq!(collected, fee * U256::from(2u64));
        assert!(bed.service.accumulated_fees().is_zero());

        // Nothing left for a second collection
        assert!(bed.service.owner_withdraw(ADMIN).unwrap().is_zero());
    }

    #[test]
    fn test_underpaid_registration_rejected_without_charge() {
        let bed = TestBed::new();
        let fee = bed.fee();

        let err = bed
            .service
            .add_erc20(OWNER, TOKEN_ADDR, fee - U256::from(1u64))
            .unwrap_err();
        assert_eq!(
            err,
            GuardianError::InsufficientFee {
                paid: fee - U256::from(1u64),
                required: fee,
            }
        );
        assert_eq!(bed.service.address_to_listing(OWNER).erc20_count, 0);
        assert!(bed.service.accumulated_fees().is_zero());
    }

    #[test]
    fn test_fees_do_not_mix_with_deposits() {
        let bed = TestBed::new();
        let fee = bed.fee();

        bed.service.deposit_ether(OWNER, U256::from(1_000u64)).unwrap();
        bed.service.add_erc20(OWNER, TOKEN_ADDR, fee).unwrap();

        // Registration fees live in the treasury, not in the deposit ledger
        assert_eq!(bed.service.total_eth_deposits(), U256::from(1_000u64));
        assert_eq!(bed.service.accumulated_fees(), fee);

        bed.service.owner_withdraw(ADMIN).unwrap();
        assert_eq!(bed.service.total_eth_deposits(), U256::from(1_000u64));
        bed.audit_totals(&[OWNER]);
    }

    #[test]
    fn test_each_account_pays_for_its_own_registrations() {
        let bed = TestBed::new();
        let fee = bed.fee();

        bed.service.add_erc20(OWNER, TOKEN_ADDR, fee).unwrap();
        bed.service.add_erc20(STRANGER, TOKEN_ADDR, fee).unwrap();

        // Same token address under two different listings is fine
        assert_eq!(bed.service.address_to_listing(OWNER).erc20_count, 1);
        assert_eq!(bed.service.address_to_listing(STRANGER).erc20_count, 1);
        assert_eq!(bed.service.accumulated_fees(), fee * U256::from(2u64));
    }

    #[test]
    fn test_registration_refreshes_activity_time() {
        let bed = TestBed::new();
        bed.service.add_erc20(OWNER, TOKEN_ADDR, bed.fee()).unwrap();
        let first = bed.service.address_to_listing(OWNER).last_activity_time;

        bed.clock.advance(17);
        bed.service.add_erc721(OWNER, NFT_ADDR, bed.fee()).unwrap();
        assert_eq!(
            bed.service.address_to_listing(OWNER).last_activity_time,
            first + 17
        );
    }
}
