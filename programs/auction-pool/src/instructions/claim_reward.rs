use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    instruction::{AccountMeta, Instruction},
    program::invoke,
};
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::PoolError;
use crate::events::RewardClaimed;
use crate::utils::{check_destination, VaultLeg};

/// Claim the signer's bid, yield and bribe rewards for `beneficiary`
///
/// Bid and yield rewards go to the beneficiary's token accounts. The bribe
/// reward goes to `bribe_destination`: the beneficiary's own account, or,
/// with a forwarder, whatever account the forwarder expects. In that case
/// `remaining_accounts[0]` is the forwarder program and the rest are passed
/// to it along with `data`.
#[derive(Accounts)]
#[instruction(beneficiary: Pubkey)]
pub struct ClaimReward<'info> {
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

    #[account(address = pool.bid_mint @ PoolError::InvalidTokenAccount)]
    pub bid_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(address = pool.yield_mint @ PoolError::InvalidTokenAccount)]
    pub yield_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(address = pool.bribe_mint @ PoolError::InvalidTokenAccount)]
    pub bribe_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [BID_VAULT_SEED, pool.key().as_ref()],
        bump = pool.bid_vault_bump
    )]
    pub bid_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [YIELD_VAULT_SEED, pool.key().as_ref()],
        bump = pool.yield_vault_bump
    )]
    pub yield_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [BRIBE_VAULT_SEED, pool.key().as_ref()],
        bump = pool.bribe_vault_bump
    )]
    pub bribe_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = bid_mint,
        token::authority = beneficiary,
        token::token_program = token_program
    )]
    pub bid_destination: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = yield_mint,
        token::authority = beneficiary,
        token::token_program = token_program
    )]
    pub yield_destination: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = bribe_mint,
        token::token_program = token_program
    )]
    pub bribe_destination: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, ClaimReward<'info>>,
    beneficiary: Pubkey,
    forwarder: Option<Pubkey>,
    data: Vec<u8>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let balances = VaultBalances {
        yield_vault: ctx.accounts.yield_vault.amount,
        bribe_vault: ctx.accounts.bribe_vault.amount,
    };

    let forwarder_program = match forwarder {
        Some(forwarder) => {
            let program = ctx
                .remaining_accounts
                .first()
                .ok_or(PoolError::InvalidForwarder)?;
            require_keys_eq!(program.key(), forwarder, PoolError::InvalidForwarder);
            require!(program.executable, PoolError::InvalidForwarder);
            Some(program)
        }
        None => {
            check_destination(
                &ctx.accounts.bribe_destination,
                &ctx.accounts.pool.bribe_mint,
                &beneficiary,
            )?;
            None
        }
    };

    let accounts = &mut *ctx.accounts;
    let pool = &mut accounts.pool;
    let rewards = pool.take_rewards(&mut accounts.position, now, balances)?;

    msg!(
        "Claim for {}: bid {}, yield {}, bribe {}",
        accounts.user.key(),
        rewards.bid_fee,
        rewards.secondary_yield,
        rewards.bribe
    );

    VaultLeg::new(&accounts.token_program, &accounts.bid_mint, &accounts.bid_vault)
        .pay(pool, &accounts.bid_destination, rewards.bid_fee)?;
    VaultLeg::new(&accounts.token_program, &accounts.yield_mint, &accounts.yield_vault)
        .pay(pool, &accounts.yield_destination, rewards.secondary_yield)?;
    VaultLeg::new(&accounts.token_program, &accounts.bribe_mint, &accounts.bribe_vault)
        .pay(pool, &accounts.bribe_destination, rewards.bribe)?;

    if let Some(program) = forwarder_program {
        let forwarded = &ctx.remaining_accounts[1..];
        let ix = Instruction {
            program_id: program.key(),
            accounts: forwarded
                .iter()
                .map(|account| AccountMeta {
                    pubkey: account.key(),
                    is_signer: account.is_signer,
                    is_writable: account.is_writable,
                })
                .collect(),
            data,
        };

        let mut account_infos = forwarded.to_vec();
        account_infos.push(program.clone());

        msg!("Forwarding bribe reward through {}", program.key());
        invoke(&ix, &account_infos)?;
    }

    emit!(RewardClaimed {
        user: accounts.user.key(),
        bid_amount: rewards.bid_fee,
        yield_amount: rewards.secondary_yield,
        bribe_amount: rewards.bribe,
        time: now,
    });

    Ok(())
}
