use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::PoolError;
use crate::events::HighestBidIncreased;
use crate::governance::GovernanceProposal;
use crate::utils::{check_destination, VaultLeg};

/// Bid for the pool's vote on `proposal_id`
///
/// When the bid displaces someone else, their position and bid-asset token
/// account must be supplied so the refund and open-bid count can be settled.
#[derive(Accounts)]
#[instruction(proposal_id: u64)]
pub struct Bid<'info> {
    #[account(mut)]
    pub bidder: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED, pool.owner.as_ref()],
        bump = pool.bump
    )]
    pub pool: Box<Account<'info, AuctionPool>>,

    #[account(
        init_if_needed,
        payer = bidder,
        space = ProposalBid::LEN,
        seeds = [PROPOSAL_BID_SEED, pool.key().as_ref(), &proposal_id.to_le_bytes()],
        bump
    )]
    pub proposal_bid: Box<Account<'info, ProposalBid>>,

    /// CHECK: owner, discriminator and id verified by GovernanceProposal::load
    pub proposal: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = bidder,
        space = UserPosition::LEN,
        seeds = [POSITION_SEED, pool.key().as_ref(), bidder.key().as_ref()],
        bump
    )]
    pub bidder_position: Box<Account<'info, UserPosition>>,

    #[account(address = pool.bid_mint @ PoolError::InvalidTokenAccount)]
    pub bid_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = bid_mint,
        token::authority = bidder,
        token::token_program = token_program
    )]
    pub bidder_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [BID_VAULT_SEED, pool.key().as_ref()],
        bump = pool.bid_vault_bump
    )]
    pub bid_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub previous_bidder_position: Option<Box<Account<'info, UserPosition>>>,

    #[account(mut)]
    pub previous_bidder_token_account: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Bid>, proposal_id: u64, amount: u64, support: bool) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let pool_key = ctx.accounts.pool.key();
    let bidder_key = ctx.accounts.bidder.key();
    ctx.accounts
        .proposal_bid
        .ensure_initialized(pool_key, proposal_id, ctx.bumps.proposal_bid);
    ctx.accounts
        .bidder_position
        .ensure_initialized(pool_key, bidder_key, ctx.bumps.bidder_position);

    let accounts = &mut *ctx.accounts;
    let leg = VaultLeg::new(&accounts.token_program, &accounts.bid_mint, &accounts.bid_vault);

    apply_bid(
        BidContext {
            pool: &mut accounts.pool,
            proposal_bid: &mut accounts.proposal_bid,
            proposal: &accounts.proposal.to_account_info(),
            bidder: &accounts.bidder,
            bidder_position: &mut accounts.bidder_position,
            bidder_token_account: &accounts.bidder_token_account,
            previous_bidder_position: accounts.previous_bidder_position.as_deref_mut(),
            previous_bidder_token_account: accounts.previous_bidder_token_account.as_deref(),
            leg,
        },
        proposal_id,
        amount,
        support,
        now,
    )
}

/// Accounts a bid touches, borrowed from whichever instruction carries them
pub(crate) struct BidContext<'a, 'info> {
    pub pool: &'a mut Account<'info, AuctionPool>,
    pub proposal_bid: &'a mut Account<'info, ProposalBid>,
    pub proposal: &'a AccountInfo<'info>,
    pub bidder: &'a Signer<'info>,
    pub bidder_position: &'a mut Account<'info, UserPosition>,
    pub bidder_token_account: &'a InterfaceAccount<'info, TokenAccount>,
    pub previous_bidder_position: Option<&'a mut Account<'info, UserPosition>>,
    pub previous_bidder_token_account: Option<&'a InterfaceAccount<'info, TokenAccount>>,
    pub leg: VaultLeg<'a, 'info>,
}

pub(crate) fn apply_bid(
    accounts: BidContext<'_, '_>,
    proposal_id: u64,
    amount: u64,
    support: bool,
    now: i64,
) -> Result<()> {
    let BidContext {
        pool,
        proposal_bid,
        proposal,
        bidder,
        bidder_position,
        bidder_token_account,
        previous_bidder_position,
        previous_bidder_token_account,
        leg,
    } = accounts;

    require!(!pool.paused, PoolError::Paused);
    require_keys_eq!(proposal_bid.pool, pool.key(), PoolError::InvalidProposal);
    require_keys_eq!(bidder_position.pool, pool.key(), PoolError::InvalidPosition);
    require_keys_eq!(bidder_position.owner, bidder.key(), PoolError::InvalidPosition);

    let governance = GovernanceProposal::load(proposal, &pool.governance_program, proposal_id)?;
    let outcome = proposal_bid.place_bid(bidder.key(), amount, support, now, governance.bid_window())?;

    pool.record_highest_bid(outcome.previous_highest, outcome.new_highest)?;
    if !outcome.top_up {
        bidder_position.open_bid()?;
    }

    // Displaced bidder: release their open bid now, refund after the pull
    let refund = match outcome.displaced {
        Some(displaced) => {
            let position = previous_bidder_position.ok_or(PoolError::InvalidPreviousBidder)?;
            require_keys_eq!(position.pool, pool.key(), PoolError::InvalidPreviousBidder);
            require_keys_eq!(position.owner, displaced.bidder, PoolError::InvalidPreviousBidder);
            position.close_bid()?;

            let destination =
                previous_bidder_token_account.ok_or(PoolError::InvalidPreviousBidder)?;
            check_destination(destination, &pool.bid_mint, &displaced.bidder)
                .map_err(|_| error!(PoolError::InvalidPreviousBidder))?;
            Some((displaced, destination))
        }
        None => None,
    };

    msg!(
        "Bid on proposal {}: {} now highest at {} (pending reward {})",
        proposal_id,
        bidder.key(),
        outcome.new_highest,
        pool.pending_bid_reward
    );

    leg.deposit(bidder_token_account, bidder, amount)?;
    if let Some((displaced, destination)) = refund {
        msg!("Refunding {} to outbid bidder {}", displaced.amount, displaced.bidder);
        leg.pay(pool, destination, displaced.amount)?;
    }

    emit!(HighestBidIncreased {
        proposal_id,
        prev_bidder: outcome.previous_bidder,
        new_bidder: bidder.key(),
        amount: outcome.new_highest,
    });

    Ok(())
}
