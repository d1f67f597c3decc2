use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;
use crate::state::*;
use crate::constants::*;

/// Read-only pool queries, answered through return data
#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct RewardBalanceOf<'info> {
    #[account(
        seeds = [POOL_SEED, pool.owner.as_ref()],
        bump = pool.bump
    )]
    pub pool: Box<Account<'info, AuctionPool>>,

    /// None for a user who never deposited or bid
    #[account(
        seeds = [POSITION_SEED, pool.key().as_ref(), user.as_ref()],
        bump = position.bump
    )]
    pub position: Option<Box<Account<'info, UserPosition>>>,

    #[account(
        seeds = [YIELD_VAULT_SEED, pool.key().as_ref()],
        bump = pool.yield_vault_bump
    )]
    pub yield_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        seeds = [BRIBE_VAULT_SEED, pool.key().as_ref()],
        bump = pool.bribe_vault_bump
    )]
    pub bribe_vault: Box<InterfaceAccount<'info, TokenAccount>>,
}

/// Claimable (bid, yield, bribe) for `user` right now
pub fn reward_balance_of_handler(ctx: Context<RewardBalanceOf>, _user: Pubkey) -> Result<RewardAmounts> {
    let now = Clock::get()?.unix_timestamp;
    let balances = VaultBalances {
        yield_vault: ctx.accounts.yield_vault.amount,
        bribe_vault: ctx.accounts.bribe_vault.amount,
    };

    let position = ctx.accounts.position.as_deref().map(|position| &**position);
    ctx.accounts.pool.reward_balance_of(position, now, balances)
}

#[derive(Accounts)]
pub struct PoolView<'info> {
    #[account(
        seeds = [POOL_SEED, pool.owner.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, AuctionPool>,
}

/// Net-of-fee value of all open highest bids
pub fn pending_reward_to_be_distributed_handler(ctx: Context<PoolView>) -> Result<u64> {
    Ok(ctx.accounts.pool.pending_bid_reward)
}
