use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::PoolError;
use crate::events::FeesWithdrawn;
use crate::utils::VaultLeg;

/// Pay the accumulated protocol fee to the fee recipient
/// Only callable by the fee recipient
#[derive(Accounts)]
pub struct WithdrawFees<'info> {
    #[account(
        address = pool.fee_recipient @ PoolError::Unauthorized
    )]
    pub fee_recipient: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED, pool.owner.as_ref()],
        bump = pool.bump
    )]
    pub pool: Box<Account<'info, AuctionPool>>,

    #[account(address = pool.bid_mint @ PoolError::InvalidTokenAccount)]
    pub bid_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [BID_VAULT_SEED, pool.key().as_ref()],
        bump = pool.bid_vault_bump
    )]
    pub bid_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = bid_mint,
        token::authority = fee_recipient,
        token::token_program = token_program
    )]
    pub destination: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler(ctx: Context<WithdrawFees>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let pool_key = ctx.accounts.pool.key();
    let accounts = &mut *ctx.accounts;

    let pool = &mut accounts.pool;
    let amount = pool.take_fees();

    msg!("Withdrawing {} in fees to {}", amount, accounts.fee_recipient.key());

    VaultLeg::new(&accounts.token_program, &accounts.bid_mint, &accounts.bid_vault)
        .pay(pool, &accounts.destination, amount)?;

    emit!(FeesWithdrawn {
        pool: pool_key,
        amount,
        time: now,
    });

    Ok(())
}
