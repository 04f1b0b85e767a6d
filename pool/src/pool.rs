//! The `FeePool` facade.

use crate::error::PoolError;
use crate::guard::ReentrancyGuard;
use std::rc::Rc;
use weir_distribution::{distribute, RewardLedger};
use weir_ports::{AssetPort, CurrencyPort, PositionManager};
use weir_positions::PositionBook;
use weir_staking::{StakingLedger, WithdrawOutcome};
use weir_types::{Address, AssetId, PoolEvent, PoolParams, PositionId, Timestamp};

/// The pooled-staking ledger and fee distributor.
///
/// Generic over its collaborator ports so tests and the demo daemon can
/// inject the nullable implementations. All mutating operations hold the
/// re-entrancy guard for their full duration and either complete with full
/// effect or fail with none (the per-asset claim semantics are the one
/// documented exception — see `claim`).
pub struct FeePool<C, A, M> {
    owner: Address,
    address: Address,
    ledger: StakingLedger,
    rewards: RewardLedger,
    positions: PositionBook,
    currency: C,
    assets: A,
    manager: M,
    guard: Rc<ReentrancyGuard>,
    events: Vec<PoolEvent>,
}

impl<C, A, M> FeePool<C, A, M>
where
    C: CurrencyPort,
    A: AssetPort,
    M: PositionManager,
{
    /// `owner` gates the privileged operations; `address` is the pool's own
    /// identity in the external asset and position systems.
    pub fn new(
        owner: Address,
        address: Address,
        params: PoolParams,
        currency: C,
        assets: A,
        manager: M,
    ) -> Self {
        Self {
            owner,
            address,
            ledger: StakingLedger::new(params.min_stake_period_secs),
            rewards: RewardLedger::new(),
            positions: PositionBook::new(),
            currency,
            assets,
            manager,
            guard: ReentrancyGuard::new(),
            events: Vec::new(),
        }
    }

    // ── Staking ──────────────────────────────────────────────────────────

    /// Lock `amount` of the staking currency for `participant`.
    ///
    /// The inbound currency movement happens on the collaborator's side
    /// before this is called; the pool accepts deposits unconditionally.
    pub fn stake(
        &mut self,
        participant: &Address,
        amount: u64,
        now: Timestamp,
    ) -> Result<(), PoolError> {
        let _scope = self.guard.try_enter()?;
        let added_slot = self.ledger.stake(participant, amount, now)?;
        if let Some(index) = added_slot {
            self.events.push(PoolEvent::StakerAdded {
                participant: participant.clone(),
                index,
            });
        }
        self.events.push(PoolEvent::Staked {
            participant: participant.clone(),
            amount,
        });
        tracing::info!(%participant, amount, total = self.ledger.total_staked(), "staked");
        Ok(())
    }

    /// Withdraw `amount` back to `participant`.
    ///
    /// Accounting settles first, then the external transfer runs under the
    /// guard; a failed transfer rolls the accounting back completely.
    pub fn withdraw(
        &mut self,
        participant: &Address,
        amount: u64,
        now: Timestamp,
    ) -> Result<(), PoolError> {
        let _scope = self.guard.try_enter()?;
        let WithdrawOutcome { vacated_slot } = self.ledger.withdraw(participant, amount, now)?;

        if !self.currency.transfer(participant, amount) {
            tracing::warn!(%participant, amount, "currency transfer failed, rolling back withdrawal");
            self.ledger.revert_withdrawal(participant, amount)?;
            return Err(PoolError::TransferFailed);
        }

        if let Some(index) = vacated_slot {
            self.events.push(PoolEvent::StakerRemoved {
                participant: participant.clone(),
                index,
            });
        }
        self.events.push(PoolEvent::Withdrawn {
            participant: participant.clone(),
            amount,
        });
        tracing::info!(%participant, amount, total = self.ledger.total_staked(), "withdrawn");
        Ok(())
    }

    // ── Distribution & claims ────────────────────────────────────────────

    /// Distribute the pool's full custody balance of each listed asset
    /// pro-rata across active stakers. Owner-only.
    pub fn distribute(&mut self, caller: &Address, assets: &[AssetId]) -> Result<(), PoolError> {
        self.ensure_owner(caller)?;
        let _scope = self.guard.try_enter()?;
        let swept = distribute(
            assets,
            &self.ledger,
            &mut self.rewards,
            &self.assets,
            &self.address,
        )?;
        for dist in swept {
            tracing::info!(asset = %dist.asset, amount = dist.amount, "fees distributed");
            self.events.push(PoolEvent::FeesDistributed {
                asset: dist.asset,
                amount: dist.amount,
            });
        }
        Ok(())
    }

    /// Settle `participant`'s unclaimed rewards for the listed assets.
    ///
    /// Zero-then-transfer is atomic per asset: a failed transfer restores
    /// that asset's balance and aborts the remaining assets. Assets already
    /// settled stay settled — their external transfers have happened and
    /// their events are recorded.
    pub fn claim(&mut self, participant: &Address, assets: &[AssetId]) -> Result<(), PoolError> {
        let _scope = self.guard.try_enter()?;

        let mut total: u64 = 0;
        for asset in assets {
            total = total.saturating_add(self.rewards.unclaimed(participant, asset));
        }
        if total == 0 {
            return Err(PoolError::NothingToClaim);
        }

        for asset in assets {
            let amount = self.rewards.take(participant, asset);
            if amount == 0 {
                continue;
            }
            if !self.assets.transfer(asset, participant, amount) {
                tracing::warn!(%participant, %asset, amount, "reward transfer failed, restoring balance");
                self.rewards.restore(participant, asset, amount);
                return Err(PoolError::TransferFailed);
            }
            self.events.push(PoolEvent::RewardsClaimed {
                participant: participant.clone(),
                asset: asset.clone(),
                amount,
            });
            tracing::info!(%participant, %asset, amount, "rewards claimed");
        }
        Ok(())
    }

    // ── Position custody ─────────────────────────────────────────────────

    /// Record a position already in pool custody. Owner-only.
    pub fn register_position(
        &mut self,
        caller: &Address,
        position: PositionId,
    ) -> Result<(), PoolError> {
        self.ensure_owner(caller)?;
        let _scope = self.guard.try_enter()?;
        self.positions.register(position)?;
        tracing::info!(%position, "position registered");
        Ok(())
    }

    /// Pull a position from the owner into pool custody and register it.
    /// Owner-only.
    pub fn deposit_position(
        &mut self,
        caller: &Address,
        position: PositionId,
    ) -> Result<(), PoolError> {
        self.ensure_owner(caller)?;
        let _scope = self.guard.try_enter()?;
        self.positions
            .deposit(position, &mut self.manager, &self.owner, &self.address)?;
        tracing::info!(%position, "position deposited");
        Ok(())
    }

    /// Unregister a position and hand custody back to the owner. Owner-only.
    pub fn withdraw_position(
        &mut self,
        caller: &Address,
        position: PositionId,
    ) -> Result<(), PoolError> {
        self.ensure_owner(caller)?;
        let _scope = self.guard.try_enter()?;
        self.positions
            .withdraw(position, &mut self.manager, &self.address, &self.owner)?;
        tracing::info!(%position, "position withdrawn");
        Ok(())
    }

    /// Sweep a position's accrued fee income into pool custody. Owner-only.
    ///
    /// Returns the two collected amounts.
    pub fn collect_fees(
        &mut self,
        caller: &Address,
        position: PositionId,
    ) -> Result<(u64, u64), PoolError> {
        self.ensure_owner(caller)?;
        let _scope = self.guard.try_enter()?;
        let (amount0, amount1) = self
            .positions
            .collect(position, &mut self.manager, &self.address)?;
        self.events.push(PoolEvent::FeesCollected {
            position,
            amount0,
            amount1,
        });
        tracing::info!(%position, amount0, amount1, "fees collected");
        Ok((amount0, amount1))
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn total_staked(&self) -> u64 {
        self.ledger.total_staked()
    }

    pub fn staked_amount(&self, participant: &Address) -> u64 {
        self.ledger.staked_amount(participant)
    }

    pub fn calculate_share(&self, participant: &Address) -> u128 {
        self.ledger.calculate_share(participant)
    }

    pub fn is_unlocked(&self, participant: &Address, now: Timestamp) -> bool {
        self.ledger.is_unlocked(participant, now)
    }

    pub fn unclaimed(&self, participant: &Address, asset: &AssetId) -> u64 {
        self.rewards.unclaimed(participant, asset)
    }

    pub fn active_stakers(&self) -> &[Address] {
        self.ledger.active_stakers()
    }

    pub fn is_position_registered(&self, position: PositionId) -> bool {
        self.positions.is_registered(position)
    }

    /// Events recorded so far, oldest first.
    pub fn events(&self) -> &[PoolEvent] {
        &self.events
    }

    /// Drain the event log.
    pub fn drain_events(&mut self) -> Vec<PoolEvent> {
        std::mem::take(&mut self.events)
    }

    /// Handle to the re-entrancy guard, for collaborators that need to be
    /// rejected observably (adversarial test doubles).
    pub fn guard_handle(&self) -> Rc<ReentrancyGuard> {
        Rc::clone(&self.guard)
    }

    pub fn ledger(&self) -> &StakingLedger {
        &self.ledger
    }

    // Port accessors for scripting nullable collaborators in tests.

    pub fn currency_mut(&mut self) -> &mut C {
        &mut self.currency
    }

    pub fn assets_mut(&mut self) -> &mut A {
        &mut self.assets
    }

    pub fn manager_mut(&mut self) -> &mut M {
        &mut self.manager
    }

    fn ensure_owner(&self, caller: &Address) -> Result<(), PoolError> {
        if caller != &self.owner {
            return Err(PoolError::Unauthorized);
        }
        Ok(())
    }
}
