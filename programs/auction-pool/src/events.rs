use anchor_lang::prelude::*;
use crate::state::AssetKind;

// ============================================================
// POOL LIFECYCLE EVENTS
// ============================================================

#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub fee_recipient: Pubkey,
    pub governance_program: Pubkey,
    pub withdrawal_delay: i64,
    pub fee_cut_bps: u16,
}

#[event]
pub struct PoolPaused {
    pub actor: Pubkey,
}

#[event]
pub struct PoolUnpaused {
    pub actor: Pubkey,
}

// ============================================================
// DEPOSIT EVENTS
// ============================================================

#[event]
pub struct Deposited {
    pub asset: Pubkey,
    pub asset_kind: AssetKind,
    pub user: Pubkey,
    pub amount: u64,
    pub time: i64,
}

#[event]
pub struct Withdrawn {
    pub asset: Pubkey,
    pub asset_kind: AssetKind,
    pub user: Pubkey,
    pub amount: u64,
    pub time: i64,
}

// ============================================================
// AUCTION EVENTS
// ============================================================

#[event]
pub struct HighestBidIncreased {
    pub proposal_id: u64,
    /// `Pubkey::default()` when there was no previous bidder
    pub prev_bidder: Pubkey,
    pub new_bidder: Pubkey,
    pub amount: u64,
}

#[event]
pub struct ProposalVoted {
    pub proposal_id: u64,
    pub bidder: Pubkey,
    pub support: bool,
    pub winning_bid: u64,
    pub distributed: u64,
    pub fee: u64,
    pub time: i64,
}

#[event]
pub struct BidRefunded {
    pub proposal_id: u64,
    pub bidder: Pubkey,
    pub amount: u64,
}

#[event]
pub struct ProposalBlocked {
    pub proposal_id: u64,
    pub time: i64,
}

#[event]
pub struct ProposalUnblocked {
    pub proposal_id: u64,
    pub time: i64,
}

// ============================================================
// REWARD EVENTS
// ============================================================

#[event]
pub struct RewardClaimed {
    pub user: Pubkey,
    pub bid_amount: u64,
    pub yield_amount: u64,
    pub bribe_amount: u64,
    pub time: i64,
}

#[event]
pub struct FeesWithdrawn {
    pub pool: Pubkey,
    pub amount: u64,
    pub time: i64,
}

#[event]
pub struct RemainingBribeRewardWithdrawn {
    pub amount: u64,
}

// ============================================================
// CONFIGURATION EVENTS
// ============================================================

#[event]
pub struct DelayPeriodUpdated {
    pub withdrawal_delay: i64,
    pub time: i64,
}

#[event]
pub struct BribeRewardStartTimestampSet {
    pub start_timestamp: i64,
    pub reward_per_second: u64,
}

#[event]
pub struct BribeRewardEndTimestampSet {
    pub end_timestamp: i64,
}

#[event]
pub struct BribeRewardPerSecondSet {
    pub reward_per_second: u64,
}

#[event]
pub struct FeeRecipientUpdated {
    pub pool: Pubkey,
    pub recipient: Pubkey,
}
