use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::PoolError;
use crate::events::{
    BribeRewardEndTimestampSet, BribeRewardPerSecondSet, BribeRewardStartTimestampSet,
    DelayPeriodUpdated, FeeRecipientUpdated, PoolPaused, PoolUnpaused,
    RemainingBribeRewardWithdrawn,
};
use crate::utils::VaultLeg;

/// Owner-only pool settings
#[derive(Accounts)]
pub struct UpdatePool<'info> {
    #[account(
        address = pool.owner @ PoolError::Unauthorized
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED, pool.owner.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, AuctionPool>,
}

pub fn pause_handler(ctx: Context<UpdatePool>) -> Result<()> {
    ctx.accounts.pool.pause()?;

    msg!("Pool paused by {}", ctx.accounts.owner.key());
    emit!(PoolPaused {
        actor: ctx.accounts.owner.key(),
    });

    Ok(())
}

pub fn unpause_handler(ctx: Context<UpdatePool>) -> Result<()> {
    ctx.accounts.pool.unpause()?;

    msg!("Pool unpaused by {}", ctx.accounts.owner.key());
    emit!(PoolUnpaused {
        actor: ctx.accounts.owner.key(),
    });

    Ok(())
}

pub fn set_delay_period_handler(ctx: Context<UpdatePool>, period: i64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.pool.set_delay_period(period)?;

    msg!("Withdrawal delay set to {}s", period);
    emit!(DelayPeriodUpdated {
        withdrawal_delay: period,
        time: now,
    });

    Ok(())
}

pub fn set_fee_recipient_handler(ctx: Context<UpdatePool>, recipient: Pubkey) -> Result<()> {
    ctx.accounts.pool.set_fee_recipient(recipient)?;

    msg!("Fee recipient set to {}", recipient);
    emit!(FeeRecipientUpdated {
        pool: ctx.accounts.pool.key(),
        recipient,
    });

    Ok(())
}

// ============================================================
// BRIBE SCHEDULE
// ============================================================

/// Owner-only bribe schedule changes
/// Accrues the running emission before applying the change
#[derive(Accounts)]
pub struct UpdateBribeSchedule<'info> {
    #[account(
        address = pool.owner @ PoolError::Unauthorized
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED, pool.owner.as_ref()],
        bump = pool.bump
    )]
    pub pool: Box<Account<'info, AuctionPool>>,

    #[account(
        seeds = [BRIBE_VAULT_SEED, pool.key().as_ref()],
        bump = pool.bribe_vault_bump
    )]
    pub bribe_vault: Box<InterfaceAccount<'info, TokenAccount>>,
}

pub fn set_start_timestamp_handler(
    ctx: Context<UpdateBribeSchedule>,
    start_timestamp: i64,
    reward_per_second: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let balance = ctx.accounts.bribe_vault.amount;
    ctx.accounts
        .pool
        .set_bribe_start(start_timestamp, reward_per_second, now, balance)?;

    msg!("Bribe emission starts at {} with {}/s", start_timestamp, reward_per_second);
    emit!(BribeRewardStartTimestampSet {
        start_timestamp,
        reward_per_second,
    });

    Ok(())
}

pub fn set_end_timestamp_handler(ctx: Context<UpdateBribeSchedule>, end_timestamp: i64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let balance = ctx.accounts.bribe_vault.amount;
    ctx.accounts.pool.set_bribe_end(end_timestamp, now, balance)?;

    msg!("Bribe emission ends at {}", end_timestamp);
    emit!(BribeRewardEndTimestampSet { end_timestamp });

    Ok(())
}

pub fn set_reward_per_second_handler(
    ctx: Context<UpdateBribeSchedule>,
    reward_per_second: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let balance = ctx.accounts.bribe_vault.amount;
    ctx.accounts.pool.set_bribe_rate(reward_per_second, now, balance)?;

    msg!("Bribe emission rate set to {}/s", reward_per_second);
    emit!(BribeRewardPerSecondSet { reward_per_second });

    Ok(())
}

/// Sweep bribe tokens nobody earned, after the emission and grace period
#[derive(Accounts)]
pub struct WithdrawRemainingBribeReward<'info> {
    #[account(
        address = pool.owner @ PoolError::Unauthorized
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED, pool.owner.as_ref()],
        bump = pool.bump
    )]
    pub pool: Box<Account<'info, AuctionPool>>,

    #[account(address = pool.bribe_mint @ PoolError::InvalidTokenAccount)]
    pub bribe_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [BRIBE_VAULT_SEED, pool.key().as_ref()],
        bump = pool.bribe_vault_bump
    )]
    pub bribe_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = bribe_mint,
        token::authority = owner,
        token::token_program = token_program
    )]
    pub destination: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn withdraw_remaining_bribe_reward_handler(
    ctx: Context<WithdrawRemainingBribeReward>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;

    let pool = &mut accounts.pool;
    let amount = pool.sweep_remaining_bribe(now, accounts.bribe_vault.amount)?;

    msg!("Sweeping {} unclaimed bribe tokens (reserved {})", amount, pool.bribe_reserved);

    VaultLeg::new(&accounts.token_program, &accounts.bribe_mint, &accounts.bribe_vault)
        .pay(pool, &accounts.destination, amount)?;

    emit!(RemainingBribeRewardWithdrawn { amount });

    Ok(())
}
