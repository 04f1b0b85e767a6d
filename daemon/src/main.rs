//! WEIR demo daemon — exercises the pool end to end against nullable
//! collaborators: stake, accrue, collect, distribute, claim.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use weir_nullables::{NullAssetBank, NullClock, NullCurrency, NullPositionManager};
use weir_pool::FeePool;
use weir_types::{Address, AssetId, PoolParams, PositionId};

#[derive(Parser)]
#[command(name = "weir-daemon", about = "WEIR fee pool demo runner")]
struct Cli {
    /// Number of simulated stakers.
    #[arg(long, default_value_t = 3, env = "WEIR_STAKERS")]
    stakers: u8,

    /// Stake amount of staker N is `base_stake * (N + 1)`.
    #[arg(long, default_value_t = 100, env = "WEIR_BASE_STAKE")]
    base_stake: u64,

    /// Fee income accrued on the demo position before collection.
    #[arg(long, default_value_t = 1_000_000, env = "WEIR_ACCRUED_FEES")]
    accrued_fees: u64,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "WEIR_LOG_LEVEL")]
    log_level: String,

    /// Path to a TOML file with `PoolParams`. CLI defaults apply otherwise.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_params(path: Option<&PathBuf>) -> anyhow::Result<PoolParams> {
    let Some(path) = path else {
        return Ok(PoolParams::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let params: PoolParams =
        toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))?;
    tracing::info!("loaded pool params from {}", path.display());
    Ok(params)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    weir_utils::init_tracing(&cli.log_level);

    let params = load_params(cli.config.as_ref())?;
    let lock_secs = params.min_stake_period_secs;

    let owner = Address::new("owner");
    let pool_addr = Address::new("pool");
    let asset0 = AssetId::new("asset0");
    let asset1 = AssetId::new("asset1");
    let position = PositionId::new(1);

    let clock = NullClock::new(0);
    let mut manager = NullPositionManager::new();
    manager.create(position, &owner);

    let mut pool = FeePool::new(
        owner.clone(),
        pool_addr.clone(),
        params,
        NullCurrency::new(),
        NullAssetBank::new(pool_addr.clone()),
        manager,
    );

    // Stakers lock proportional amounts.
    let stakers: Vec<Address> = (0..cli.stakers)
        .map(|n| Address::new(format!("staker_{n}")))
        .collect();
    for (n, staker) in stakers.iter().enumerate() {
        let amount = cli.base_stake * (n as u64 + 1);
        pool.stake(staker, amount, clock.now())?;
    }
    tracing::info!(total = pool.total_staked(), "all stakes locked");

    // The external position accrues fees; the operator sweeps them.
    pool.deposit_position(&owner, position)?;
    pool.manager_mut()
        .accrue(position, cli.accrued_fees, cli.accrued_fees / 4);
    let (amount0, amount1) = pool.collect_fees(&owner, position)?;
    // Collected income lands in the pool's asset custody.
    pool.assets_mut().mint(&asset0, &pool_addr, amount0);
    pool.assets_mut().mint(&asset1, &pool_addr, amount1);

    // Sweep only the assets that actually collected income.
    let mut swept_assets = Vec::new();
    if amount0 > 0 {
        swept_assets.push(asset0.clone());
    }
    if amount1 > 0 {
        swept_assets.push(asset1.clone());
    }
    pool.distribute(&owner, &swept_assets)?;
    for staker in &stakers {
        tracing::info!(
            %staker,
            asset0 = pool.unclaimed(staker, &asset0),
            asset1 = pool.unclaimed(staker, &asset1),
            share = pool.calculate_share(staker),
            "rewards credited"
        );
    }

    // Claims settle immediately; withdrawals wait out the lock. A staker
    // whose floor share rounded to zero has nothing to claim — skip them.
    for staker in &stakers {
        match pool.claim(staker, &[asset0.clone(), asset1.clone()]) {
            Ok(()) => {}
            Err(weir_pool::PoolError::NothingToClaim) => {
                tracing::info!(%staker, "nothing to claim");
            }
            Err(e) => return Err(e.into()),
        }
    }
    tracing::info!(
        "waiting out the {} lock period",
        weir_utils::format_duration(lock_secs)
    );
    clock.advance(lock_secs);
    for (n, staker) in stakers.iter().enumerate() {
        pool.withdraw(staker, cli.base_stake * (n as u64 + 1), clock.now())?;
    }

    tracing::info!(
        events = pool.events().len(),
        total = pool.total_staked(),
        "scenario complete"
    );
    for event in pool.drain_events() {
        tracing::debug!(?event, "event");
    }
    Ok(())
}
