//! Abstract collaborator traits for the WEIR pool.
//!
//! Every external subsystem the pool talks to (the staking-currency custody,
//! the reward-asset tokens, the external position manager) implements these
//! traits. The accounting core depends only on the traits, so it is fully
//! testable against the deterministic implementations in `weir-nullables`.

pub mod asset;
pub mod currency;
pub mod position;

pub use asset::AssetPort;
pub use currency::CurrencyPort;
pub use position::PositionManager;
