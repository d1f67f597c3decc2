use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::PoolError;
use crate::utils::VaultLeg;
use super::bid::{apply_bid, BidContext};
use super::deposit::apply_deposit;
use super::withdraw::apply_withdraw;

/// One step of a multicall batch, acting for the signer
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum PoolCall {
    Deposit { asset: AssetKind, amount: u64 },
    Withdraw { asset: AssetKind, amount: u64 },
    Bid { amount: u64, support: bool },
}

impl PoolCall {
    pub fn is_bid(&self) -> bool {
        matches!(self, PoolCall::Bid { .. })
    }
}

/// Run deposit / withdraw / bid steps in order inside one instruction
///
/// The first failing step aborts the whole batch. User token accounts are
/// only required for the assets the batch actually moves, and the auction
/// record and proposal only when it contains a bid.
#[derive(Accounts)]
#[instruction(proposal_id: u64)]
pub struct Multicall<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED, pool.owner.as_ref()],
        bump = pool.bump
    )]
    pub pool: Box<Account<'info, AuctionPool>>,

    #[account(
        init_if_needed,
        payer = user,
        space = UserPosition::LEN,
        seeds = [POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub position: Box<Account<'info, UserPosition>>,

    #[account(
        init_if_needed,
        payer = user,
        space = ProposalBid::LEN,
        seeds = [PROPOSAL_BID_SEED, pool.key().as_ref(), &proposal_id.to_le_bytes()],
        bump
    )]
    pub proposal_bid: Option<Box<Account<'info, ProposalBid>>>,

    /// CHECK: owner, discriminator and id verified by GovernanceProposal::load
    pub proposal: Option<UncheckedAccount<'info>>,

    #[account(address = pool.primary_mint @ PoolError::InvalidTokenAccount)]
    pub primary_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(address = pool.secondary_mint @ PoolError::InvalidTokenAccount)]
    pub secondary_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(address = pool.bid_mint @ PoolError::InvalidTokenAccount)]
    pub bid_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [PRIMARY_VAULT_SEED, pool.key().as_ref()],
        bump = pool.primary_vault_bump
    )]
    pub primary_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [SECONDARY_VAULT_SEED, pool.key().as_ref()],
        bump = pool.secondary_vault_bump
    )]
    pub secondary_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [BID_VAULT_SEED, pool.key().as_ref()],
        bump = pool.bid_vault_bump
    )]
    pub bid_vault: Box<InterfaceAccount<'info, TokenAccount>>,

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

    #[account(
        mut,
        token::mint = primary_mint,
        token::authority = user,
        token::token_program = token_program
    )]
    pub user_primary_account: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    #[account(
        mut,
        token::mint = secondary_mint,
        token::authority = user,
        token::token_program = token_program
    )]
    pub user_secondary_account: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    #[account(
        mut,
        token::mint = bid_mint,
        token::authority = user,
        token::token_program = token_program
    )]
    pub user_bid_account: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    #[account(mut)]
    pub previous_bidder_position: Option<Box<Account<'info, UserPosition>>>,

    #[account(mut)]
    pub previous_bidder_token_account: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Multicall>, proposal_id: u64, calls: Vec<PoolCall>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let balances = VaultBalances {
        yield_vault: ctx.accounts.yield_vault.amount,
        bribe_vault: ctx.accounts.bribe_vault.amount,
    };

    let pool_key = ctx.accounts.pool.key();
    let user_key = ctx.accounts.user.key();
    ctx.accounts
        .position
        .ensure_initialized(pool_key, user_key, ctx.bumps.position);
    if let Some(proposal_bid) = ctx.accounts.proposal_bid.as_deref_mut() {
        if proposal_bid.pool == Pubkey::default() {
            let (_, bump) = Pubkey::find_program_address(
                &[PROPOSAL_BID_SEED, pool_key.as_ref(), &proposal_id.to_le_bytes()],
                &crate::ID,
            );
            proposal_bid.ensure_initialized(pool_key, proposal_id, bump);
        }
    }

    let accounts = &mut *ctx.accounts;
    let proposal = accounts.proposal.as_ref().map(|proposal| proposal.to_account_info());
    if calls.iter().any(PoolCall::is_bid) {
        require!(
            accounts.proposal_bid.is_some() && proposal.is_some(),
            PoolError::InvalidProposal
        );
    }

    msg!("Multicall: {} calls for {}", calls.len(), user_key);

    for call in calls {
        match call {
            PoolCall::Deposit { asset, amount } => {
                let (mint, vault, source) = match asset {
                    AssetKind::Primary => (
                        &accounts.primary_mint,
                        &accounts.primary_vault,
                        accounts.user_primary_account.as_deref(),
                    ),
                    AssetKind::Secondary => (
                        &accounts.secondary_mint,
                        &accounts.secondary_vault,
                        accounts.user_secondary_account.as_deref(),
                    ),
                };
                let source = source.ok_or(PoolError::InvalidTokenAccount)?;

                apply_deposit(
                    &mut accounts.pool,
                    &mut accounts.position,
                    VaultLeg::new(&accounts.token_program, mint, vault),
                    source,
                    &accounts.user,
                    asset,
                    amount,
                    now,
                    balances,
                )?;
            }
            PoolCall::Withdraw { asset, amount } => {
                let (mint, vault, destination) = match asset {
                    AssetKind::Primary => (
                        &accounts.primary_mint,
                        &accounts.primary_vault,
                        accounts.user_primary_account.as_deref(),
                    ),
                    AssetKind::Secondary => (
                        &accounts.secondary_mint,
                        &accounts.secondary_vault,
                        accounts.user_secondary_account.as_deref(),
                    ),
                };
                let destination = destination.ok_or(PoolError::InvalidTokenAccount)?;

                apply_withdraw(
                    &mut accounts.pool,
                    &mut accounts.position,
                    VaultLeg::new(&accounts.token_program, mint, vault),
                    destination,
                    asset,
                    amount,
                    now,
                    balances,
                )?;
            }
            PoolCall::Bid { amount, support } => {
                let source = accounts
                    .user_bid_account
                    .as_deref()
                    .ok_or(PoolError::InvalidTokenAccount)?;

                let proposal_bid = accounts
                    .proposal_bid
                    .as_deref_mut()
                    .ok_or(PoolError::InvalidProposal)?;
                let proposal = proposal.as_ref().ok_or(PoolError::InvalidProposal)?;

                apply_bid(
                    BidContext {
                        pool: &mut accounts.pool,
                        proposal_bid,
                        proposal,
                        bidder: &accounts.user,
                        bidder_position: &mut accounts.position,
                        bidder_token_account: source,
                        previous_bidder_position: accounts.previous_bidder_position.as_deref_mut(),
                        previous_bidder_token_account: accounts
                            .previous_bidder_token_account
                            .as_deref(),
                        leg: VaultLeg::new(&accounts.token_program, &accounts.bid_mint, &accounts.bid_vault),
                    },
                    proposal_id,
                    amount,
                    support,
                    now,
                )?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_bid_steps_need_an_auction_record() {
        let transfers = [
            PoolCall::Deposit { asset: AssetKind::Primary, amount: 5 },
            PoolCall::Withdraw { asset: AssetKind::Secondary, amount: 2 },
        ];
        assert!(!transfers.iter().any(PoolCall::is_bid));

        let with_bid = [
            PoolCall::Deposit { asset: AssetKind::Primary, amount: 5 },
            PoolCall::Bid { amount: 10, support: true },
        ];
        assert!(with_bid.iter().any(PoolCall::is_bid));
    }
}
