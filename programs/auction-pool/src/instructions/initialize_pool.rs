use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::PoolError;
use crate::events::PoolInitialized;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializePoolParams {
    pub fee_recipient: Pubkey,
    pub governance_program: Pubkey,
    /// Defaults to one day
    pub withdrawal_delay: Option<i64>,
    /// Defaults to 1600 (16%)
    pub fee_cut_bps: Option<u16>,
    pub bribe_reward_per_second: u64,
    /// 0 = no emission scheduled yet
    pub bribe_start_timestamp: i64,
    /// 0 = open-ended
    pub bribe_end_timestamp: i64,
}

/// Create a pool and its five vaults
/// The signer becomes the pool owner
#[derive(Accounts)]
pub struct InitializePool<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = AuctionPool::LEN,
        seeds = [POOL_SEED, owner.key().as_ref()],
        bump
    )]
    pub pool: Box<Account<'info, AuctionPool>>,

    #[account(mint::token_program = token_program)]
    pub primary_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mint::token_program = token_program)]
    pub secondary_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mint::token_program = token_program)]
    pub bid_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mint::token_program = token_program)]
    pub bribe_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mint::token_program = token_program)]
    pub yield_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        payer = owner,
        seeds = [PRIMARY_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = primary_mint,
        token::authority = pool,
        token::token_program = token_program
    )]
    pub primary_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init,
        payer = owner,
        seeds = [SECONDARY_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = secondary_mint,
        token::authority = pool,
        token::token_program = token_program
    )]
    pub secondary_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init,
        payer = owner,
        seeds = [BID_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = bid_mint,
        token::authority = pool,
        token::token_program = token_program
    )]
    pub bid_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init,
        payer = owner,
        seeds = [BRIBE_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = bribe_mint,
        token::authority = pool,
        token::token_program = token_program
    )]
    pub bribe_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init,
        payer = owner,
        seeds = [YIELD_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = yield_mint,
        token::authority = pool,
        token::token_program = token_program
    )]
    pub yield_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializePool>, params: InitializePoolParams) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let withdrawal_delay = params.withdrawal_delay.unwrap_or_else(default_withdrawal_delay);
    let fee_cut_bps = params.fee_cut_bps.unwrap_or_else(default_fee_cut_bps);
    let bribe_config = BribeRewardConfig {
        reward_per_second: params.bribe_reward_per_second,
        start_timestamp: params.bribe_start_timestamp,
        end_timestamp: params.bribe_end_timestamp,
    };

    AuctionPool::validate_params(
        &params.governance_program,
        &params.fee_recipient,
        withdrawal_delay,
        fee_cut_bps,
        &bribe_config,
    )?;
    if bribe_config.start_timestamp != 0 {
        require!(bribe_config.start_timestamp >= now, PoolError::InvalidStartTimestamp);
    }
    if bribe_config.end_timestamp != 0 {
        require!(bribe_config.end_timestamp >= now, PoolError::InvalidEndTimestamp);
    }

    let pool_key = ctx.accounts.pool.key();
    let pool = &mut ctx.accounts.pool;

    pool.owner = ctx.accounts.owner.key();
    pool.fee_recipient = params.fee_recipient;
    pool.governance_program = params.governance_program;

    pool.primary_mint = ctx.accounts.primary_mint.key();
    pool.secondary_mint = ctx.accounts.secondary_mint.key();
    pool.bid_mint = ctx.accounts.bid_mint.key();
    pool.bribe_mint = ctx.accounts.bribe_mint.key();
    pool.yield_mint = ctx.accounts.yield_mint.key();

    pool.withdrawal_delay = withdrawal_delay;
    pool.fee_cut_bps = fee_cut_bps;
    pool.bribe_config = bribe_config;
    pool.bribe_last_accrued_at = now;
    pool.paused = false;

    pool.bump = ctx.bumps.pool;
    pool.primary_vault_bump = ctx.bumps.primary_vault;
    pool.secondary_vault_bump = ctx.bumps.secondary_vault;
    pool.bid_vault_bump = ctx.bumps.bid_vault;
    pool.bribe_vault_bump = ctx.bumps.bribe_vault;
    pool.yield_vault_bump = ctx.bumps.yield_vault;

    msg!("Auction pool initialized: {}", pool_key);
    msg!("Owner: {}", pool.owner);
    msg!("Governance program: {}", pool.governance_program);
    msg!("Withdrawal delay: {}s, fee cut: {} bps", withdrawal_delay, fee_cut_bps);

    emit!(PoolInitialized {
        pool: pool_key,
        owner: pool.owner,
        fee_recipient: pool.fee_recipient,
        governance_program: pool.governance_program,
        withdrawal_delay,
        fee_cut_bps,
    });

    Ok(())
}
