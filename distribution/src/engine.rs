//! The distribution engine: floor-division shares + remainder absorption.

use crate::error::DistributionError;
use crate::rewards::RewardLedger;
use std::collections::HashMap;
use weir_ports::AssetPort;
use weir_staking::StakingLedger;
use weir_types::{Address, AssetId};

/// Per-asset result of one distribution call, consumed by the facade for
/// event emission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetDistribution {
    pub asset: AssetId,
    /// The full custody balance swept, equal to the sum of credited shares.
    pub amount: u64,
}

/// Distribute the pool's entire custody balance of each listed asset
/// pro-rata across the active stakers.
///
/// Shares are `balance * stake / total_staked` with `u128` intermediates
/// (floor division). The staker in the LAST registry slot receives
/// `balance - Σ other shares` instead, which absorbs the rounding remainder
/// and makes conservation exact. Which staker is "last" depends on current
/// registry slot order, which swap-removal reorders — the remainder-absorber
/// is an artifact of registry history, not a fixed identity.
///
/// Assets are processed in the given order; a duplicate entry is processed
/// again against the same custody balance. The call is atomic: every balance
/// is read and every credit staged before the reward ledger is touched, so
/// any error leaves it unchanged.
pub fn distribute(
    assets: &[AssetId],
    ledger: &StakingLedger,
    rewards: &mut RewardLedger,
    bank: &dyn AssetPort,
    custodian: &Address,
) -> Result<Vec<AssetDistribution>, DistributionError> {
    let total_staked = ledger.total_staked();
    if total_staked == 0 {
        return Err(DistributionError::NoStakers);
    }
    let stakers = ledger.active_stakers();
    debug_assert!(!stakers.is_empty(), "nonzero total implies active stakers");
    let (last, rest) = stakers.split_last().ok_or(DistributionError::NoStakers)?;

    let mut staged: HashMap<(Address, AssetId), u64> = HashMap::new();
    let mut swept = Vec::with_capacity(assets.len());

    for asset in assets {
        let balance = bank.balance_of(asset, custodian);
        if balance == 0 {
            return Err(DistributionError::NoFeesToDistribute {
                asset: asset.clone(),
            });
        }

        // Floor shares for everyone but the last slot. The sum of floors
        // over a strict subset of the stake cannot exceed `balance`.
        let mut distributed: u64 = 0;
        for staker in rest {
            let amount = ledger.staked_amount(staker);
            let share = (balance as u128 * amount as u128 / total_staked as u128) as u64;
            distributed += share;
            if share > 0 {
                stage(&mut staged, staker, asset, share)?;
            }
        }

        // Whatever remains goes to the last slot — conservation is exact.
        let remainder = balance - distributed;
        if remainder > 0 {
            stage(&mut staged, last, asset, remainder)?;
        }
        swept.push(AssetDistribution {
            asset: asset.clone(),
            amount: balance,
        });
    }

    // Validate every credit against the live ledger before applying any.
    for ((participant, asset), amount) in &staged {
        rewards
            .unclaimed(participant, asset)
            .checked_add(*amount)
            .ok_or(DistributionError::Overflow)?;
    }
    for ((participant, asset), amount) in staged {
        rewards.credit(&participant, &asset, amount)?;
    }
    Ok(swept)
}

fn stage(
    staged: &mut HashMap<(Address, AssetId), u64>,
    participant: &Address,
    asset: &AssetId,
    share: u64,
) -> Result<(), DistributionError> {
    let entry = staged
        .entry((participant.clone(), asset.clone()))
        .or_insert(0);
    *entry = entry
        .checked_add(share)
        .ok_or(DistributionError::Overflow)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use weir_types::Timestamp;

    fn addr(n: u8) -> Address {
        Address::new(format!("staker_{n}"))
    }

    fn asset(s: &str) -> AssetId {
        AssetId::new(s)
    }

    /// Minimal in-crate asset port: fixed custody balances per asset.
    struct FixedBank {
        balances: HashMap<AssetId, u64>,
    }

    impl FixedBank {
        fn new(entries: &[(&str, u64)]) -> Self {
            Self {
                balances: entries
                    .iter()
                    .map(|(a, b)| (AssetId::new(*a), *b))
                    .collect(),
            }
        }
    }

    impl AssetPort for FixedBank {
        fn balance_of(&self, asset: &AssetId, _holder: &Address) -> u64 {
            self.balances.get(asset).copied().unwrap_or(0)
        }

        fn transfer(&mut self, _asset: &AssetId, _to: &Address, _amount: u64) -> bool {
            unreachable!("distribution never transfers")
        }
    }

    fn ledger_with(stakes: &[(u8, u64)]) -> StakingLedger {
        let mut l = StakingLedger::new(0);
        for (n, amount) in stakes {
            l.stake(&addr(*n), *amount, Timestamp::EPOCH).unwrap();
        }
        l
    }

    fn pool() -> Address {
        Address::new("pool")
    }

    #[test]
    fn two_stakers_split_with_remainder_to_last() {
        // Alice 2, Bob 3, 1_000_000 of X: Alice floor(1e6*2/5) = 400_000,
        // Bob (last slot) takes the rest = 600_000.
        let l = ledger_with(&[(1, 2), (2, 3)]);
        let bank = FixedBank::new(&[("x", 1_000_000)]);
        let mut rewards = RewardLedger::new();

        let swept = distribute(&[asset("x")], &l, &mut rewards, &bank, &pool()).unwrap();
        assert_eq!(swept.len(), 1);
        assert_eq!(swept[0].amount, 1_000_000);
        assert_eq!(rewards.unclaimed(&addr(1), &asset("x")), 400_000);
        assert_eq!(rewards.unclaimed(&addr(2), &asset("x")), 600_000);
    }

    #[test]
    fn sole_staker_receives_max_balance_without_overflow() {
        // 1-unit stake, u64::MAX swept: the sole staker is also "last" and
        // absorbs everything.
        let l = ledger_with(&[(1, 1)]);
        let bank = FixedBank::new(&[("x", u64::MAX)]);
        let mut rewards = RewardLedger::new();

        distribute(&[asset("x")], &l, &mut rewards, &bank, &pool()).unwrap();
        assert_eq!(rewards.unclaimed(&addr(1), &asset("x")), u64::MAX);
    }

    #[test]
    fn conservation_with_awkward_amounts() {
        let l = ledger_with(&[(1, 7), (2, 11), (3, 13)]);
        let bank = FixedBank::new(&[("x", 1000)]);
        let mut rewards = RewardLedger::new();

        distribute(&[asset("x")], &l, &mut rewards, &bank, &pool()).unwrap();
        let sum: u64 = (1u8..=3).map(|n| rewards.unclaimed(&addr(n), &asset("x"))).sum();
        assert_eq!(sum, 1000);
        // Non-last stakers get exact floors.
        assert_eq!(rewards.unclaimed(&addr(1), &asset("x")), 1000 * 7 / 31);
        assert_eq!(rewards.unclaimed(&addr(2), &asset("x")), 1000 * 11 / 31);
    }

    #[test]
    fn zero_floor_share_is_skipped_but_counted() {
        // Staker 1's floor share is 0 (3 * 1 / 1_000_001 floors to 0); the
        // last staker absorbs the full balance.
        let l = ledger_with(&[(1, 1), (2, 1_000_000)]);
        let bank = FixedBank::new(&[("x", 3)]);
        let mut rewards = RewardLedger::new();

        distribute(&[asset("x")], &l, &mut rewards, &bank, &pool()).unwrap();
        assert_eq!(rewards.unclaimed(&addr(1), &asset("x")), 0);
        assert_eq!(rewards.unclaimed(&addr(2), &asset("x")), 3);
    }

    #[test]
    fn no_stakers_rejected() {
        let l = StakingLedger::new(0);
        let bank = FixedBank::new(&[("x", 100)]);
        let mut rewards = RewardLedger::new();
        assert_eq!(
            distribute(&[asset("x")], &l, &mut rewards, &bank, &pool()),
            Err(DistributionError::NoStakers)
        );
    }

    #[test]
    fn zero_balance_asset_aborts_whole_call() {
        let l = ledger_with(&[(1, 5)]);
        let bank = FixedBank::new(&[("x", 100), ("y", 0)]);
        let mut rewards = RewardLedger::new();

        let result = distribute(&[asset("x"), asset("y")], &l, &mut rewards, &bank, &pool());
        assert_eq!(
            result,
            Err(DistributionError::NoFeesToDistribute { asset: asset("y") })
        );
        // Atomic: the successful first asset was not applied either.
        assert_eq!(rewards.unclaimed(&addr(1), &asset("x")), 0);
    }

    #[test]
    fn multiple_assets_processed_in_order() {
        let l = ledger_with(&[(1, 1), (2, 1)]);
        let bank = FixedBank::new(&[("x", 10), ("y", 5)]);
        let mut rewards = RewardLedger::new();

        let swept =
            distribute(&[asset("x"), asset("y")], &l, &mut rewards, &bank, &pool()).unwrap();
        assert_eq!(
            swept,
            vec![
                AssetDistribution { asset: asset("x"), amount: 10 },
                AssetDistribution { asset: asset("y"), amount: 5 },
            ]
        );
        assert_eq!(rewards.unclaimed(&addr(1), &asset("y")), 2);
        assert_eq!(rewards.unclaimed(&addr(2), &asset("y")), 3);
    }

    #[test]
    fn remainder_absorber_follows_registry_reorder() {
        // [A, B, C]; removing A swap-moves C into slot 0, so B occupies the
        // last slot and absorbs the remainder afterward.
        let mut l = ledger_with(&[(1, 10), (2, 10), (3, 10)]);
        l.withdraw(&addr(1), 10, Timestamp::EPOCH).unwrap();
        assert_eq!(l.active_stakers(), &[addr(3), addr(2)]);

        let bank = FixedBank::new(&[("x", 21)]);
        let mut rewards = RewardLedger::new();
        distribute(&[asset("x")], &l, &mut rewards, &bank, &pool()).unwrap();
        assert_eq!(rewards.unclaimed(&addr(3), &asset("x")), 10);
        assert_eq!(rewards.unclaimed(&addr(2), &asset("x")), 11);
    }

    #[test]
    fn credit_overflow_aborts_without_partial_apply() {
        let l = ledger_with(&[(1, 1), (2, 1)]);
        let bank = FixedBank::new(&[("x", 100)]);
        let mut rewards = RewardLedger::new();
        rewards.credit(&addr(2), &asset("x"), u64::MAX).unwrap();

        let result = distribute(&[asset("x")], &l, &mut rewards, &bank, &pool());
        assert_eq!(result, Err(DistributionError::Overflow));
        assert_eq!(rewards.unclaimed(&addr(1), &asset("x")), 0);
        assert_eq!(rewards.unclaimed(&addr(2), &asset("x")), u64::MAX);
    }
}
