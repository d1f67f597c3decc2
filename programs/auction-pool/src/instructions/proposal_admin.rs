use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::PoolError;
use crate::events::{ProposalBlocked, ProposalUnblocked};
use crate::governance::GovernanceProposal;
use crate::utils::{check_destination, VaultLeg};

/// Stop bidding on a proposal and refund its highest bidder
/// Only callable by the pool owner
#[derive(Accounts)]
#[instruction(proposal_id: u64)]
pub struct BlockProposal<'info> {
    #[account(
        mut,
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
        init_if_needed,
        payer = owner,
        space = ProposalBid::LEN,
        seeds = [PROPOSAL_BID_SEED, pool.key().as_ref(), &proposal_id.to_le_bytes()],
        bump
    )]
    pub proposal_bid: Box<Account<'info, ProposalBid>>,

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
    pub system_program: Program<'info, System>,
}

pub fn block_proposal_handler(ctx: Context<BlockProposal>, proposal_id: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let pool_key = ctx.accounts.pool.key();
    let accounts = &mut *ctx.accounts;

    let proposal_bid = &mut accounts.proposal_bid;
    proposal_bid.ensure_initialized(pool_key, proposal_id, ctx.bumps.proposal_bid);
    let payout = proposal_bid.block()?;

    msg!("Proposal {} blocked", proposal_id);

    if let Some(payout) = payout {
        let pool = &mut accounts.pool;
        pool.release_bid(payout.amount)?;

        let position = accounts
            .bidder_position
            .as_deref_mut()
            .ok_or(PoolError::InvalidPosition)?;
        require_keys_eq!(position.pool, pool_key, PoolError::InvalidPosition);
        require_keys_eq!(position.owner, payout.bidder, PoolError::InvalidPosition);
        position.close_bid()?;

        let destination = accounts
            .bidder_token_account
            .as_deref()
            .ok_or(PoolError::InvalidTokenAccount)?;
        check_destination(destination, &pool.bid_mint, &payout.bidder)?;

        msg!("Refunding {} to {}", payout.amount, payout.bidder);

        let leg = VaultLeg::new(&accounts.token_program, &accounts.bid_mint, &accounts.bid_vault);
        leg.pay(pool, destination, payout.amount)?;
    }

    emit!(ProposalBlocked {
        proposal_id,
        time: now,
    });

    Ok(())
}

/// Re-open bidding on a blocked proposal that is still active
/// Only callable by the pool owner
#[derive(Accounts)]
#[instruction(proposal_id: u64)]
pub struct UnblockProposal<'info> {
    #[account(
        address = pool.owner @ PoolError::Unauthorized
    )]
    pub owner: Signer<'info>,

    #[account(
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

    /// CHECK: owner, discriminator and id verified by GovernanceProposal::load
    pub proposal: UncheckedAccount<'info>,
}

pub fn unblock_proposal_handler(ctx: Context<UnblockProposal>, proposal_id: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let governance_proposal = GovernanceProposal::load(
        &ctx.accounts.proposal.to_account_info(),
        &ctx.accounts.pool.governance_program,
        proposal_id,
    )?;
    ctx.accounts
        .proposal_bid
        .unblock(governance_proposal.proposal_state())?;

    msg!("Proposal {} unblocked", proposal_id);

    emit!(ProposalUnblocked {
        proposal_id,
        time: now,
    });

    Ok(())
}
