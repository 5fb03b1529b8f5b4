//! Reserve and affordability checks.

use crate::error::WalletError;
use crate::gateway::{AccountInfo, ServerReserves};

/// Total drops the account must hold to cover its reserve plus the fee.
///
/// `adds_owner_object` accounts for the reserve increase a new trust line
/// causes when it lands on the ledger.
pub fn required_drops(
    reserves: &ServerReserves,
    owner_count: u32,
    adds_owner_object: bool,
    fee_drops: u64,
) -> u64 {
    let owned = owner_count as u64 + u64::from(adds_owner_object);
    reserves
        .base_drops
        .saturating_add(reserves.owner_increment_drops.saturating_mul(owned))
        .saturating_add(fee_drops)
}

/// Hard stop before submission: the spendable balance must cover the
/// reserve requirement and the network fee.
pub fn check_affordable(
    info: &AccountInfo,
    reserves: &ServerReserves,
    fee_drops: &str,
    adds_owner_object: bool,
) -> Result<(), WalletError> {
    let fee: u64 = fee_drops
        .parse()
        .map_err(|_| WalletError::Other(format!("invalid fee value: {fee_drops:?}")))?;
    let needed = required_drops(reserves, info.owner_count, adds_owner_object, fee);
    if info.balance_drops < needed {
        return Err(WalletError::Unaffordable {
            needed,
            available: info.balance_drops,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reserves() -> ServerReserves {
        ServerReserves {
            base_drops: 10_000_000,
            owner_increment_drops: 2_000_000,
        }
    }

    fn info(balance: u64, owner_count: u32) -> AccountInfo {
        AccountInfo {
            sequence: 1,
            balance_drops: balance,
            owner_count,
            flags: 0,
        }
    }

    #[test]
    fn requirement_includes_owner_objects_and_fee() {
        assert_eq!(required_drops(&reserves(), 3, false, 12), 16_000_012);
        assert_eq!(required_drops(&reserves(), 3, true, 12), 18_000_012);
    }

    #[test]
    fn affordable_passes() {
        assert!(check_affordable(&info(20_000_000, 2), &reserves(), "12", false).is_ok());
    }

    #[test]
    fn unaffordable_is_a_hard_stop() {
        let err = check_affordable(&info(12_000_000, 2), &reserves(), "12", true).unwrap_err();
        match err {
            WalletError::Unaffordable { needed, available } => {
                assert_eq!(needed, 16_000_012);
                assert_eq!(available, 12_000_000);
            }
            other => panic!("expected Unaffordable, got {other:?}"),
        }
    }

    #[test]
    fn garbage_fee_is_rejected() {
        assert!(check_affordable(&info(1, 0), &reserves(), "a lot", false).is_err());
    }
}
