use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::PoolError;
use crate::events::Withdrawn;
use crate::utils::VaultLeg;

/// Withdraw the signer's collateral to `recipient`
/// Not gated by pause
#[derive(Accounts)]
#[instruction(asset: AssetKind, recipient: Pubkey)]
pub struct Withdraw<'info> {
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED, pool.owner.as_ref()],
        bump = pool.bump
    )]
    pub pool: Box<Account<'info, AuctionPool>>,

    #[account(
        mut,
        seeds = [POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = position.bump
    )]
    pub position: Box<Account<'info, UserPosition>>,

    #[account(address = pool.mint_for(asset) @ PoolError::InvalidTokenAccount)]
    pub asset_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = asset_mint,
        token::authority = recipient,
        token::token_program = token_program
    )]
    pub recipient_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

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
}

pub fn handler(
    ctx: Context<Withdraw>,
    asset: AssetKind,
    _recipient: Pubkey,
    amount: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let balances = VaultBalances {
        yield_vault: ctx.accounts.yield_vault.amount,
        bribe_vault: ctx.accounts.bribe_vault.amount,
    };

    let leg = VaultLeg::new(
        &ctx.accounts.token_program,
        &ctx.accounts.asset_mint,
        &ctx.accounts.asset_vault,
    );

    apply_withdraw(
        &mut ctx.accounts.pool,
        &mut ctx.accounts.position,
        leg,
        &ctx.accounts.recipient_token_account,
        asset,
        amount,
        now,
        balances,
    )
}

/// Ledger update, then token payout. Shared with multicall.
#[allow(clippy::too_many_arguments)]
pub(crate) fn apply_withdraw<'info>(
    pool: &mut Account<'info, AuctionPool>,
    position: &mut Account<'info, UserPosition>,
    leg: VaultLeg<'_, 'info>,
    destination: &InterfaceAccount<'info, TokenAccount>,
    asset: AssetKind,
    amount: u64,
    now: i64,
    balances: VaultBalances,
) -> Result<()> {
    pool.record_withdraw(position, asset, amount, now, balances)?;

    msg!(
        "Withdraw: {} {:?} for {}, pool totals {} / {}",
        amount,
        asset,
        position.owner,
        pool.total_primary,
        pool.total_secondary
    );

    leg.pay(pool, destination, amount)?;

    emit!(Withdrawn {
        asset: leg.mint.key(),
        asset_kind: asset,
        user: position.owner,
        amount,
        time: now,
    });

    Ok(())
}
