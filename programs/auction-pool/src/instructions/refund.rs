use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::PoolError;
use crate::events::BidRefunded;
use crate::governance::GovernanceProposal;
use crate::utils::{check_destination, VaultLeg};

/// Return the highest bid of a proposal that is no longer active
/// Callable by anyone; pays only the recorded bidder
#[derive(Accounts)]
#[instruction(proposal_id: u64)]
pub struct Refund<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED, pool.owner.as_ref()],
        bump = pool.bump
    )]
    pub pool: Box<Account<'info, AuctionPool>>,

    /// None when nobody ever bid on the proposal
    #[account(
        mut,
        seeds = [PROPOSAL_BID_SEED, pool.key().as_ref(), &proposal_id.to_le_bytes()],
        bump
    )]
    pub proposal_bid: Option<Box<Account<'info, ProposalBid>>>,

    /// CHECK: owner, discriminator and id verified by GovernanceProposal::load
    pub proposal: UncheckedAccount<'info>,

    #[account(address = pool.bid_mint @ PoolError::InvalidTokenAccount)]
    pub bid_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [BID_VAULT_SEED, pool.key().as_ref()],
        bump = pool.bid_vault_bump
    )]
    pub bid_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub bidder_position: Option<Box<Account<'info, UserPosition>>>,

    #[account(mut)]
    pub bidder_token_account: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler(ctx: Context<Refund>, proposal_id: u64) -> Result<()> {
    let accounts = &mut *ctx.accounts;

    let Some(proposal_bid) = accounts.proposal_bid.as_deref_mut() else {
        msg!("Refund: no bid recorded for proposal {}", proposal_id);
        return Ok(());
    };

    let governance_proposal = GovernanceProposal::load(
        &accounts.proposal.to_account_info(),
        &accounts.pool.governance_program,
        proposal_id,
    )?;

    let Some(payout) = proposal_bid.refund(governance_proposal.proposal_state())? else {
        msg!("Refund: proposal {} has no open bid", proposal_id);
        return Ok(());
    };

    let pool = &mut accounts.pool;
    pool.release_bid(payout.amount)?;

    let position = accounts
        .bidder_position
        .as_deref_mut()
        .ok_or(PoolError::InvalidPosition)?;
    require_keys_eq!(position.pool, pool.key(), PoolError::InvalidPosition);
    require_keys_eq!(position.owner, payout.bidder, PoolError::InvalidPosition);
    position.close_bid()?;

    let destination = accounts
        .bidder_token_account
        .as_deref()
        .ok_or(PoolError::InvalidTokenAccount)?;
    check_destination(destination, &pool.bid_mint, &payout.bidder)?;

    msg!("Refund: {} to {} on proposal {}", payout.amount, payout.bidder, proposal_id);

    let leg = VaultLeg::new(&accounts.token_program, &accounts.bid_mint, &accounts.bid_vault);
    leg.pay(pool, destination, payout.amount)?;

    emit!(BidRefunded {
        proposal_id,
        bidder: payout.bidder,
        amount: payout.amount,
    });

    Ok(())
}
