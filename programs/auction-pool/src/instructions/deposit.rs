use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::PoolError;
use crate::events::Deposited;
use crate::utils::VaultLeg;

/// Deposit primary or secondary collateral on behalf of `beneficiary`
/// The signer pays; the beneficiary's position is credited
#[derive(Accounts)]
#[instruction(asset: AssetKind, beneficiary: Pubkey)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub depositor: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED, pool.owner.as_ref()],
        bump = pool.bump
    )]
    pub pool: Box<Account<'info, AuctionPool>>,

    #[account(
        init_if_needed,
        payer = depositor,
        space = UserPosition::LEN,
        seeds = [POSITION_SEED, pool.key().as_ref(), beneficiary.as_ref()],
        bump
    )]
    pub position: Box<Account<'info, UserPosition>>,

    #[account(address = pool.mint_for(asset) @ PoolError::InvalidTokenAccount)]
    pub asset_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = asset_mint,
        token::authority = depositor,
        token::token_program = token_program
    )]
    pub depositor_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [asset.vault_seed(), pool.key().as_ref()],
        bump = pool.vault_bump_for(asset)
    )]
    pub asset_vault: Box<InterfaceAccount<'info, TokenAccount>>,

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

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<Deposit>,
    asset: AssetKind,
    beneficiary: Pubkey,
    amount: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let balances = VaultBalances {
        yield_vault: ctx.accounts.yield_vault.amount,
        bribe_vault: ctx.accounts.bribe_vault.amount,
    };

    let pool_key = ctx.accounts.pool.key();
    ctx.accounts
        .position
        .ensure_initialized(pool_key, beneficiary, ctx.bumps.position);

    let leg = VaultLeg::new(
        &ctx.accounts.token_program,
        &ctx.accounts.asset_mint,
        &ctx.accounts.asset_vault,
    );

    apply_deposit(
        &mut ctx.accounts.pool,
        &mut ctx.accounts.position,
        leg,
        &ctx.accounts.depositor_token_account,
        &ctx.accounts.depositor,
        asset,
        amount,
        now,
        balances,
    )
}

/// Ledger update, then token pull. Shared with multicall.
#[allow(clippy::too_many_arguments)]
pub(crate) fn apply_deposit<'info>(
    pool: &mut Account<'info, AuctionPool>,
    position: &mut Account<'info, UserPosition>,
    leg: VaultLeg<'_, 'info>,
    source: &InterfaceAccount<'info, TokenAccount>,
    depositor: &Signer<'info>,
    asset: AssetKind,
    amount: u64,
    now: i64,
    balances: VaultBalances,
) -> Result<()> {
    require_keys_eq!(position.pool, pool.key(), PoolError::InvalidPosition);

    pool.record_deposit(position, asset, amount, now, balances)?;

    msg!(
        "Deposit: {} {:?} for {}, pool totals {} / {}",
        amount,
        asset,
        position.owner,
        pool.total_primary,
        pool.total_secondary
    );

    leg.deposit(source, depositor, amount)?;

    emit!(Deposited {
        asset: leg.mint.key(),
        asset_kind: asset,
        user: position.owner,
        amount,
        time: now,
    });

    Ok(())
}
