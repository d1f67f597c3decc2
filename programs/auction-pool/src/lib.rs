use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod governance;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;
use state::{AssetKind, RewardAmounts};

declare_id!("9Kogi4RdM242MR3Ua49ByRrtpNswCMGVa9yxWu1wheWQ");

#[program]
pub mod auction_pool {
    use super::*;

    // ============ Pool Initialization ============

    /// Create a pool, its vaults and its configuration
    pub fn initialize_pool(ctx: Context<InitializePool>, params: InitializePoolParams) -> Result<()> {
        instructions::initialize_pool::handler(ctx, params)
    }

    // ============ Collateral ============

    /// Deposit primary or secondary collateral for `beneficiary`
    pub fn deposit(
        ctx: Context<Deposit>,
        asset: AssetKind,
        beneficiary: Pubkey,
        amount: u64,
    ) -> Result<()> {
        instructions::deposit::handler(ctx, asset, beneficiary, amount)
    }

    /// Withdraw the signer's collateral to `recipient`
    pub fn withdraw(
        ctx: Context<Withdraw>,
        asset: AssetKind,
        recipient: Pubkey,
        amount: u64,
    ) -> Result<()> {
        instructions::withdraw::handler(ctx, asset, recipient, amount)
    }

    // ============ Vote Auction ============

    /// Bid for the pool's vote on a proposal
    pub fn bid(ctx: Context<Bid>, proposal_id: u64, amount: u64, support: bool) -> Result<()> {
        instructions::bid::handler(ctx, proposal_id, amount, support)
    }

    /// Vote with the winning bidder's direction (owner, after cutoff)
    pub fn vote<'info>(
        ctx: Context<'_, '_, '_, 'info, Vote<'info>>,
        proposal_id: u64,
    ) -> Result<()> {
        instructions::vote::handler(ctx, proposal_id)
    }

    /// Refund the highest bid of a proposal that is no longer active
    pub fn refund(ctx: Context<Refund>, proposal_id: u64) -> Result<()> {
        instructions::refund::handler(ctx, proposal_id)
    }

    /// Stop bidding on a proposal and refund its highest bidder
    pub fn block_proposal_id(ctx: Context<BlockProposal>, proposal_id: u64) -> Result<()> {
        instructions::proposal_admin::block_proposal_handler(ctx, proposal_id)
    }

    /// Re-open bidding on a blocked, still active proposal
    pub fn unblock_proposal_id(ctx: Context<UnblockProposal>, proposal_id: u64) -> Result<()> {
        instructions::proposal_admin::unblock_proposal_handler(ctx, proposal_id)
    }

    /// Deposit / withdraw / bid steps in one atomic batch
    pub fn multicall(ctx: Context<Multicall>, proposal_id: u64, calls: Vec<PoolCall>) -> Result<()> {
        instructions::multicall::handler(ctx, proposal_id, calls)
    }

    // ============ Rewards ============

    /// Claim bid, yield and bribe rewards
    pub fn claim_reward<'info>(
        ctx: Context<'_, '_, '_, 'info, ClaimReward<'info>>,
        beneficiary: Pubkey,
        forwarder: Option<Pubkey>,
        data: Vec<u8>,
    ) -> Result<()> {
        instructions::claim_reward::handler(ctx, beneficiary, forwarder, data)
    }

    /// Fee recipient collects the protocol cut of winning bids
    pub fn withdraw_fees(ctx: Context<WithdrawFees>) -> Result<()> {
        instructions::withdraw_fees::handler(ctx)
    }

    /// Claimable rewards of `user` (return data)
    pub fn reward_balance_of(ctx: Context<RewardBalanceOf>, user: Pubkey) -> Result<RewardAmounts> {
        instructions::views::reward_balance_of_handler(ctx, user)
    }

    /// Net-of-fee value of all open highest bids (return data)
    pub fn pending_reward_to_be_distributed(ctx: Context<PoolView>) -> Result<u64> {
        instructions::views::pending_reward_to_be_distributed_handler(ctx)
    }

    // ============ Admin Functions ============

    pub fn pause(ctx: Context<UpdatePool>) -> Result<()> {
        instructions::admin::pause_handler(ctx)
    }

    pub fn unpause(ctx: Context<UpdatePool>) -> Result<()> {
        instructions::admin::unpause_handler(ctx)
    }

    /// Set the post-vote withdrawal delay (1s to 7 days)
    pub fn set_delay_period(ctx: Context<UpdatePool>, period: i64) -> Result<()> {
        instructions::admin::set_delay_period_handler(ctx, period)
    }

    pub fn set_fee_recipient(ctx: Context<UpdatePool>, recipient: Pubkey) -> Result<()> {
        instructions::admin::set_fee_recipient_handler(ctx, recipient)
    }

    /// Schedule the bribe emission start and rate
    pub fn set_start_timestamp(
        ctx: Context<UpdateBribeSchedule>,
        start_timestamp: i64,
        reward_per_second: u64,
    ) -> Result<()> {
        instructions::admin::set_start_timestamp_handler(ctx, start_timestamp, reward_per_second)
    }

    pub fn set_end_timestamp(ctx: Context<UpdateBribeSchedule>, end_timestamp: i64) -> Result<()> {
        instructions::admin::set_end_timestamp_handler(ctx, end_timestamp)
    }

    pub fn set_reward_per_second(ctx: Context<UpdateBribeSchedule>, reward_per_second: u64) -> Result<()> {
        instructions::admin::set_reward_per_second_handler(ctx, reward_per_second)
    }

    /// Sweep unearned bribe tokens after the grace period
    pub fn withdraw_remaining_bribe_reward(ctx: Context<WithdrawRemainingBribeReward>) -> Result<()> {
        instructions::admin::withdraw_remaining_bribe_reward_handler(ctx)
    }
}
