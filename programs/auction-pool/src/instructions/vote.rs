use anchor_lang::prelude::*;
use crate::state::*;
use crate::constants::*;
use crate::errors::PoolError;
use crate::events::ProposalVoted;
use crate::governance::{self, GovernanceProposal};

/// Cast the pool's vote with the winning bidder's direction
/// Only callable by the pool owner, after the bid cutoff
#[derive(Accounts)]
#[instruction(proposal_id: u64)]
pub struct Vote<'info> {
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
        mut,
        seeds = [PROPOSAL_BID_SEED, pool.key().as_ref(), &proposal_id.to_le_bytes()],
        bump = proposal_bid.bump
    )]
    pub proposal_bid: Box<Account<'info, ProposalBid>>,

    /// CHECK: owner, discriminator and id verified by GovernanceProposal::load;
    /// writable for the governance program's vote bookkeeping
    #[account(mut)]
    pub proposal: UncheckedAccount<'info>,

    /// Winning bidder's position; its open bid is closed by the vote
    #[account(mut)]
    pub bidder_position: Option<Box<Account<'info, UserPosition>>>,

    /// CHECK: pinned to the pool's governance program
    #[account(
        executable,
        address = pool.governance_program @ PoolError::InvalidGovernance
    )]
    pub governance_program: UncheckedAccount<'info>,
}

pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, Vote<'info>>,
    proposal_id: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let governance_proposal = GovernanceProposal::load(
        &ctx.accounts.proposal.to_account_info(),
        &ctx.accounts.pool.governance_program,
        proposal_id,
    )?;

    let pool_key = ctx.accounts.pool.key();
    let proposal_bid = &mut ctx.accounts.proposal_bid;
    let winner = proposal_bid.finalize_vote(now, governance_proposal.bid_window())?;
    let support = proposal_bid.support;

    let pool = &mut ctx.accounts.pool;
    let settlement = pool.settle_vote(winner.amount, now)?;

    let position = ctx
        .accounts
        .bidder_position
        .as_deref_mut()
        .ok_or(PoolError::InvalidPosition)?;
    require_keys_eq!(position.pool, pool_key, PoolError::InvalidPosition);
    require_keys_eq!(position.owner, winner.bidder, PoolError::InvalidPosition);
    position.close_bid()?;

    msg!(
        "Vote on proposal {}: support={}, winning bid {} ({} to depositors, {} fee)",
        proposal_id,
        support,
        winner.amount,
        settlement.distributed,
        settlement.fee
    );

    let owner = ctx.accounts.pool.owner;
    let bump = ctx.accounts.pool.bump;
    let seeds: &[&[u8]] = &[POOL_SEED, owner.as_ref(), &[bump]];

    governance::cast_vote(
        &ctx.accounts.governance_program.to_account_info(),
        &ctx.accounts.pool.to_account_info(),
        &ctx.accounts.proposal.to_account_info(),
        ctx.remaining_accounts,
        proposal_id,
        support,
        &[seeds],
    )?;

    emit!(ProposalVoted {
        proposal_id,
        bidder: winner.bidder,
        support,
        winning_bid: winner.amount,
        distributed: settlement.distributed,
        fee: settlement.fee,
        time: now,
    });

    Ok(())
}
