// ============================================================
// TIME CONSTANTS (in seconds)
// ============================================================

/// 1 hour in seconds
pub const ONE_HOUR: i64 = 60 * 60;

/// 1 day in seconds
pub const ONE_DAY: i64 = 24 * ONE_HOUR;

/// 7 days in seconds
pub const SEVEN_DAYS: i64 = 7 * ONE_DAY;

/// 30 days in seconds
pub const THIRTY_DAYS: i64 = 30 * ONE_DAY;

/// Bids close this long before the external voting period ends
#[cfg(not(any(feature = "localnet", feature = "devnet")))]
pub const BID_CUTOFF_BUFFER: i64 = ONE_HOUR;

/// Bids close this long before the external voting period ends
#[cfg(any(feature = "localnet", feature = "devnet"))]
pub const BID_CUTOFF_BUFFER: i64 = 60;

/// Upper bound for the post-vote withdrawal delay
pub const MAX_WITHDRAWAL_DELAY: i64 = SEVEN_DAYS;

/// Default withdrawal delay applied after each pool vote (1 day)
pub const DEFAULT_WITHDRAWAL_DELAY: i64 = ONE_DAY;

/// Owner may sweep leftover bribe tokens this long after the emission ends
pub const BRIBE_GRACE_PERIOD: i64 = THIRTY_DAYS;

// ============================================================
// BASIS POINTS
// ============================================================

/// BPS denominator (100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Default protocol cut of every winning bid (16% = 1600 bps)
pub const DEFAULT_FEE_CUT_BPS: u16 = 1600;

/// Maximum protocol cut of a winning bid (50% = 5000 bps)
pub const MAX_FEE_CUT_BPS: u16 = 5000;

// ============================================================
// REWARD ACCOUNTING
// ============================================================

/// Fixed-point scale of every reward-per-share accumulator (1e18)
pub const REWARD_PRECISION: u128 = 1_000_000_000_000_000_000;

/// Maximum bribe emission rate in base units per second
pub const MAX_BRIBE_REWARD_PER_SECOND: u64 = 1_000_000_000_000;

/// Maximum total bribe emission over a configured [start, end] window
pub const MAX_BRIBE_EMISSION: u128 = 1_000_000_000 * 1_000_000_000;

// ============================================================
// PDA SEEDS
// ============================================================

pub const POOL_SEED: &[u8] = b"auction_pool";
pub const POSITION_SEED: &[u8] = b"position";
pub const PROPOSAL_BID_SEED: &[u8] = b"proposal_bid";
pub const PRIMARY_VAULT_SEED: &[u8] = b"primary_vault";
pub const SECONDARY_VAULT_SEED: &[u8] = b"secondary_vault";
pub const BID_VAULT_SEED: &[u8] = b"bid_vault";
pub const BRIBE_VAULT_SEED: &[u8] = b"bribe_vault";
pub const YIELD_VAULT_SEED: &[u8] = b"yield_vault";
