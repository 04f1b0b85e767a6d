//! End-to-end scenarios against nullable collaborators.

use std::cell::Cell;
use std::rc::Rc;

use weir_nullables::{NullAssetBank, NullClock, NullCurrency, NullPositionManager};
use weir_pool::{FeePool, PoolError, ReentrancyGuard};
use weir_ports::{AssetPort, CurrencyPort};
use weir_types::{Address, AssetId, PoolEvent, PoolParams, PositionId, Timestamp};

const WEEK: u64 = 7 * 24 * 3600;

type TestPool = FeePool<NullCurrency, NullAssetBank, NullPositionManager>;

fn owner() -> Address {
    Address::new("owner")
}

fn pool_addr() -> Address {
    Address::new("pool")
}

fn alice() -> Address {
    Address::new("alice")
}

fn bob() -> Address {
    Address::new("bob")
}

fn carol() -> Address {
    Address::new("carol")
}

fn usdc() -> AssetId {
    AssetId::new("usdc")
}

fn weth() -> AssetId {
    AssetId::new("weth")
}

fn new_pool() -> TestPool {
    FeePool::new(
        owner(),
        pool_addr(),
        PoolParams::default(),
        NullCurrency::new(),
        NullAssetBank::new(pool_addr()),
        NullPositionManager::new(),
    )
}

#[test]
fn alice_and_bob_split_one_million() {
    let clock = NullClock::new(0);
    let mut pool = new_pool();
    pool.stake(&alice(), 2, clock.now()).unwrap();
    pool.stake(&bob(), 3, clock.now()).unwrap();

    pool.assets_mut().mint(&usdc(), &pool_addr(), 1_000_000);
    pool.distribute(&owner(), &[usdc()]).unwrap();

    // Alice gets the floor share, Bob (last registry slot) the remainder.
    assert_eq!(pool.unclaimed(&alice(), &usdc()), 400_000);
    assert_eq!(pool.unclaimed(&bob(), &usdc()), 600_000);
}

#[test]
fn sole_staker_absorbs_max_width_sweep() {
    let clock = NullClock::new(0);
    let mut pool = new_pool();
    pool.stake(&alice(), 1, clock.now()).unwrap();

    pool.assets_mut().mint(&usdc(), &pool_addr(), u64::MAX);
    pool.distribute(&owner(), &[usdc()]).unwrap();
    assert_eq!(pool.unclaimed(&alice(), &usdc()), u64::MAX);
}

#[test]
fn lock_boundary_is_exact() {
    let clock = NullClock::new(1_000);
    let mut pool = new_pool();
    pool.stake(&alice(), 100, clock.now()).unwrap();

    clock.advance(WEEK - 1);
    assert!(matches!(
        pool.withdraw(&alice(), 100, clock.now()),
        Err(PoolError::Staking(
            weir_staking::StakingError::LockNotElapsed { .. }
        ))
    ));

    clock.advance(1);
    pool.withdraw(&alice(), 100, clock.now()).unwrap();
    assert_eq!(pool.currency_mut().received_by(&alice()), 100);
    assert_eq!(pool.total_staked(), 0);
}

#[test]
fn top_up_resets_lock_for_whole_balance() {
    let clock = NullClock::new(0);
    let mut pool = new_pool();
    pool.stake(&alice(), 100, clock.now()).unwrap();

    clock.advance(WEEK);
    // Unlocked now — but a 1-unit top-up relocks everything.
    assert!(pool.is_unlocked(&alice(), clock.now()));
    pool.stake(&alice(), 1, clock.now()).unwrap();
    assert!(!pool.is_unlocked(&alice(), clock.now()));
    assert!(pool.withdraw(&alice(), 100, clock.now()).is_err());

    clock.advance(WEEK);
    pool.withdraw(&alice(), 101, clock.now()).unwrap();
}

#[test]
fn swap_remove_reindexes_registry() {
    let clock = NullClock::new(0);
    let mut pool = new_pool();
    pool.stake(&alice(), 10, clock.now()).unwrap();
    pool.stake(&bob(), 10, clock.now()).unwrap();
    pool.stake(&carol(), 10, clock.now()).unwrap();

    clock.advance(WEEK);
    pool.withdraw(&bob(), 10, clock.now()).unwrap();

    // [A, B, C] minus B: C moved into the vacated slot 1.
    assert_eq!(pool.active_stakers(), &[alice(), carol()]);
    assert!(pool
        .events()
        .contains(&PoolEvent::StakerRemoved {
            participant: bob(),
            index: 1
        }));
}

#[test]
fn failed_currency_transfer_rolls_withdrawal_back() {
    let clock = NullClock::new(0);
    let mut pool = new_pool();
    pool.stake(&alice(), 100, clock.now()).unwrap();
    clock.advance(WEEK);

    pool.currency_mut().fail_next_transfer();
    let event_count = pool.events().len();
    assert_eq!(
        pool.withdraw(&alice(), 100, clock.now()),
        Err(PoolError::TransferFailed)
    );

    // Full rollback: stake active again, totals restored, no new events,
    // nothing paid out, and a later attempt succeeds.
    assert_eq!(pool.staked_amount(&alice()), 100);
    assert_eq!(pool.total_staked(), 100);
    assert_eq!(pool.events().len(), event_count);
    assert_eq!(pool.currency_mut().received_by(&alice()), 0);
    pool.withdraw(&alice(), 100, clock.now()).unwrap();
}

#[test]
fn distribute_requires_owner_and_stakers() {
    let clock = NullClock::new(0);
    let mut pool = new_pool();
    assert_eq!(
        pool.distribute(&alice(), &[usdc()]),
        Err(PoolError::Unauthorized)
    );
    assert_eq!(
        pool.distribute(&owner(), &[usdc()]),
        Err(PoolError::Distribution(
            weir_distribution::DistributionError::NoStakers
        ))
    );
    pool.stake(&alice(), 1, clock.now()).unwrap();
    assert_eq!(
        pool.distribute(&owner(), &[usdc()]),
        Err(PoolError::Distribution(
            weir_distribution::DistributionError::NoFeesToDistribute { asset: usdc() }
        ))
    );
}

#[test]
fn claim_settles_and_zeroes_per_asset() {
    let clock = NullClock::new(0);
    let mut pool = new_pool();
    pool.stake(&alice(), 1, clock.now()).unwrap();
    pool.assets_mut().mint(&usdc(), &pool_addr(), 500);
    pool.assets_mut().mint(&weth(), &pool_addr(), 70);
    pool.distribute(&owner(), &[usdc(), weth()]).unwrap();

    pool.drain_events();
    pool.claim(&alice(), &[usdc(), weth()]).unwrap();

    assert_eq!(pool.unclaimed(&alice(), &usdc()), 0);
    assert_eq!(pool.unclaimed(&alice(), &weth()), 0);
    // The external balances actually moved out of pool custody.
    let bank = pool.assets_mut();
    assert_eq!(bank.balance_of(&usdc(), &alice()), 500);
    assert_eq!(bank.balance_of(&weth(), &alice()), 70);
    assert_eq!(bank.balance_of(&usdc(), &pool_addr()), 0);
}

#[test]
fn claim_emits_once_per_nonzero_asset() {
    let clock = NullClock::new(0);
    let mut pool = new_pool();
    pool.stake(&alice(), 1, clock.now()).unwrap();
    pool.assets_mut().mint(&usdc(), &pool_addr(), 500);
    pool.distribute(&owner(), &[usdc()]).unwrap();

    pool.drain_events();
    // weth has no balance — claim succeeds on the usdc side only.
    pool.claim(&alice(), &[usdc(), weth()]).unwrap();
    assert_eq!(
        pool.events(),
        &[PoolEvent::RewardsClaimed {
            participant: alice(),
            asset: usdc(),
            amount: 500
        }]
    );
}

#[test]
fn empty_claim_rejected() {
    let clock = NullClock::new(0);
    let mut pool = new_pool();
    pool.stake(&alice(), 1, clock.now()).unwrap();
    assert_eq!(
        pool.claim(&alice(), &[usdc(), weth()]),
        Err(PoolError::NothingToClaim)
    );
}

#[test]
fn failed_reward_transfer_restores_that_asset() {
    let clock = NullClock::new(0);
    let mut pool = new_pool();
    pool.stake(&alice(), 1, clock.now()).unwrap();
    pool.assets_mut().mint(&usdc(), &pool_addr(), 500);
    pool.distribute(&owner(), &[usdc()]).unwrap();

    pool.assets_mut().fail_transfers_of(&usdc());
    assert_eq!(
        pool.claim(&alice(), &[usdc()]),
        Err(PoolError::TransferFailed)
    );
    // Balance not zeroed-and-lost.
    assert_eq!(pool.unclaimed(&alice(), &usdc()), 500);

    pool.assets_mut().clear_failures();
    pool.claim(&alice(), &[usdc()]).unwrap();
    assert_eq!(pool.unclaimed(&alice(), &usdc()), 0);
}

#[test]
fn multi_asset_claim_keeps_settled_assets_on_later_failure() {
    let clock = NullClock::new(0);
    let mut pool = new_pool();
    pool.stake(&alice(), 1, clock.now()).unwrap();
    pool.assets_mut().mint(&usdc(), &pool_addr(), 500);
    pool.assets_mut().mint(&weth(), &pool_addr(), 70);
    pool.distribute(&owner(), &[usdc(), weth()]).unwrap();

    pool.drain_events();
    pool.assets_mut().fail_transfers_of(&weth());
    assert_eq!(
        pool.claim(&alice(), &[usdc(), weth()]),
        Err(PoolError::TransferFailed)
    );

    // usdc settled before the failure: balance moved, entry zeroed, event
    // recorded. weth restored un-lost, no event for it.
    assert_eq!(pool.unclaimed(&alice(), &usdc()), 0);
    assert_eq!(pool.unclaimed(&alice(), &weth()), 70);
    assert_eq!(pool.assets_mut().balance_of(&usdc(), &alice()), 500);
    assert_eq!(pool.assets_mut().balance_of(&weth(), &alice()), 0);
    assert_eq!(
        pool.events(),
        &[PoolEvent::RewardsClaimed {
            participant: alice(),
            asset: usdc(),
            amount: 500
        }]
    );

    // The failing asset remains claimable once the fault clears.
    pool.assets_mut().clear_failures();
    pool.claim(&alice(), &[weth()]).unwrap();
    assert_eq!(pool.assets_mut().balance_of(&weth(), &alice()), 70);
}

#[test]
fn position_lifecycle_and_double_unregister() {
    let mut pool = new_pool();
    let position = PositionId::new(42);

    // Withdrawing before any registration fails.
    assert_eq!(
        pool.withdraw_position(&owner(), position),
        Err(PoolError::Position(
            weir_positions::PositionError::PositionNotRegistered(position)
        ))
    );

    pool.manager_mut().create(position, &owner());
    pool.deposit_position(&owner(), position).unwrap();
    assert!(pool.is_position_registered(position));

    pool.manager_mut().accrue(position, 1_000, 250);
    let (a0, a1) = pool.collect_fees(&owner(), position).unwrap();
    assert_eq!((a0, a1), (1_000, 250));
    assert!(pool.events().contains(&PoolEvent::FeesCollected {
        position,
        amount0: 1_000,
        amount1: 250
    }));

    pool.withdraw_position(&owner(), position).unwrap();
    assert!(!pool.is_position_registered(position));
    // And once withdrawn, withdrawing again fails the same way.
    assert_eq!(
        pool.withdraw_position(&owner(), position),
        Err(PoolError::Position(
            weir_positions::PositionError::PositionNotRegistered(position)
        ))
    );
}

#[test]
fn position_operations_are_owner_gated() {
    let mut pool = new_pool();
    let position = PositionId::new(1);
    for result in [
        pool.register_position(&alice(), position),
        pool.deposit_position(&alice(), position),
        pool.withdraw_position(&alice(), position),
        pool.collect_fees(&alice(), position).map(|_| ()),
    ] {
        assert_eq!(result, Err(PoolError::Unauthorized));
    }
}

#[test]
fn never_staked_identity_is_unlocked() {
    // Preserved quirk: no stake record means nothing is locked, so the
    // query answers true even though the identity never staked.
    let pool = new_pool();
    assert!(pool.is_unlocked(&carol(), Timestamp::EPOCH));
    assert_eq!(pool.staked_amount(&carol()), 0);
}

/// A currency port that tries to re-enter the pool's guarded section from
/// inside the transfer callback.
struct ReentrantCurrency {
    guard: Option<Rc<ReentrancyGuard>>,
    saw_rejection: Rc<Cell<bool>>,
}

impl CurrencyPort for ReentrantCurrency {
    fn transfer(&mut self, _to: &Address, _amount: u64) -> bool {
        if let Some(guard) = &self.guard {
            if guard.try_enter().is_err() {
                self.saw_rejection.set(true);
            }
        }
        true
    }
}

#[test]
fn reentrant_transfer_callback_is_rejected() {
    let clock = NullClock::new(0);
    let saw_rejection = Rc::new(Cell::new(false));
    let mut pool = FeePool::new(
        owner(),
        pool_addr(),
        PoolParams::default(),
        ReentrantCurrency {
            guard: None,
            saw_rejection: Rc::clone(&saw_rejection),
        },
        NullAssetBank::new(pool_addr()),
        NullPositionManager::new(),
    );
    let guard = pool.guard_handle();
    pool.currency_mut().guard = Some(guard);

    pool.stake(&alice(), 100, clock.now()).unwrap();
    clock.advance(WEEK);
    pool.withdraw(&alice(), 100, clock.now()).unwrap();

    assert!(
        saw_rejection.get(),
        "nested acquisition during the transfer must be rejected"
    );
    // The guard released normally once the withdraw completed.
    assert!(!pool.guard_handle().is_held());
}

#[test]
fn events_record_full_history_in_order() {
    let clock = NullClock::new(0);
    let mut pool = new_pool();
    pool.stake(&alice(), 2, clock.now()).unwrap();
    pool.stake(&bob(), 3, clock.now()).unwrap();
    pool.assets_mut().mint(&usdc(), &pool_addr(), 5);
    pool.distribute(&owner(), &[usdc()]).unwrap();

    assert_eq!(
        pool.drain_events(),
        vec![
            PoolEvent::StakerAdded { participant: alice(), index: 0 },
            PoolEvent::Staked { participant: alice(), amount: 2 },
            PoolEvent::StakerAdded { participant: bob(), index: 1 },
            PoolEvent::Staked { participant: bob(), amount: 3 },
            PoolEvent::FeesDistributed { asset: usdc(), amount: 5 },
        ]
    );
    assert!(pool.events().is_empty());
}
