use anchor_lang::prelude::*;
use crate::errors::PoolError;
use crate::governance::{BidWindow, ProposalState};

/// Lifecycle of the auction for one proposal
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum AuctionStatus {
    /// Accepting bids (with or without a current highest bidder)
    #[default]
    Open,
    /// Owner blocked bidding; reversible by unblock
    Blocked,
    /// Pool voted with the winning bidder's direction
    Voted,
    /// Highest bid returned after the proposal left the active state
    Refunded,
}

/// Tokens owed back to a bidder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BidPayout {
    pub bidder: Pubkey,
    pub amount: u64,
}

/// What a successful bid changed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BidOutcome {
    /// Displaced highest bidder and their full refund; None on a top-up or first bid
    pub displaced: Option<BidPayout>,
    /// Highest bidder before this one (`Pubkey::default()` on the first bid);
    /// the bidder themselves on a top-up
    pub previous_bidder: Pubkey,
    /// Highest bid before this one (0 if none)
    pub previous_highest: u64,
    /// Highest bid after this one
    pub new_highest: u64,
    /// Bidder already held the highest bid and added to it
    pub top_up: bool,
}

/// Auction record for one external proposal
/// One ProposalBid per proposal id per pool
#[account]
#[derive(Default)]
pub struct ProposalBid {
    /// The pool running this auction
    pub pool: Pubkey,

    /// External governance proposal id
    pub proposal_id: u64,

    /// Current highest bid in bid-asset base units
    pub highest_bid: u64,

    /// Current highest bidder (`Pubkey::default()` = none)
    pub highest_bidder: Pubkey,

    /// Vote direction the highest bidder is paying for
    pub support: bool,

    /// Sum of every amount ever bid on this proposal
    pub total_bid: u64,

    pub status: AuctionStatus,

    /// PDA bump seed
    pub bump: u8,
}

impl ProposalBid {
    pub const LEN: usize = 8  // discriminator
        + 32  // pool
        + 8   // proposal_id
        + 8   // highest_bid
        + 32  // highest_bidder
        + 1   // support
        + 8   // total_bid
        + 1   // status
        + 1   // bump
        + 32; // padding

    pub fn ensure_initialized(&mut self, pool: Pubkey, proposal_id: u64, bump: u8) {
        if self.pool == Pubkey::default() {
            self.pool = pool;
            self.proposal_id = proposal_id;
            self.bump = bump;
        }
    }

    pub fn has_bid(&self) -> bool {
        self.highest_bidder != Pubkey::default()
    }

    pub fn place_bid(
        &mut self,
        bidder: Pubkey,
        amount: u64,
        support: bool,
        now: i64,
        window: BidWindow,
    ) -> Result<BidOutcome> {
        match self.status {
            AuctionStatus::Blocked => return err!(PoolError::ProposalBlocked),
            AuctionStatus::Voted | AuctionStatus::Refunded => {
                return err!(PoolError::InvalidProposalState)
            }
            AuctionStatus::Open => {}
        }
        require!(window.state == ProposalState::Active, PoolError::InvalidProposalState);
        require!(now < window.cutoff, PoolError::BidEnded);
        require!(amount > 0, PoolError::InvalidAmount);

        let top_up = self.has_bid() && self.highest_bidder == bidder;
        let new_highest = if top_up {
            self.highest_bid
                .checked_add(amount)
                .ok_or(PoolError::Overflow)?
        } else {
            amount
        };
        require!(new_highest > self.highest_bid, PoolError::LowBid);

        let previous_highest = self.highest_bid;
        let previous_bidder = self.highest_bidder;
        let displaced = if top_up { None } else { self.clear_highest() };

        self.highest_bid = new_highest;
        self.highest_bidder = bidder;
        self.support = support;
        self.total_bid = self.total_bid.checked_add(amount).ok_or(PoolError::Overflow)?;

        Ok(BidOutcome {
            displaced,
            previous_bidder,
            previous_highest,
            new_highest,
            top_up,
        })
    }

    /// Stop bidding and hand back the current highest bid
    pub fn block(&mut self) -> Result<Option<BidPayout>> {
        match self.status {
            AuctionStatus::Blocked => return err!(PoolError::ProposalInactive),
            AuctionStatus::Voted => return err!(PoolError::AlreadyVoted),
            AuctionStatus::Refunded => return err!(PoolError::InvalidProposalState),
            AuctionStatus::Open => {}
        }

        self.status = AuctionStatus::Blocked;
        Ok(self.clear_highest())
    }

    pub fn unblock(&mut self, state: ProposalState) -> Result<()> {
        require!(self.status == AuctionStatus::Blocked, PoolError::ProposalActive);
        require!(state == ProposalState::Active, PoolError::InvalidProposalState);
        self.status = AuctionStatus::Open;
        Ok(())
    }

    /// Close the auction in favour of the highest bidder. The bid stays
    /// recorded; its tokens become pool reward.
    pub fn finalize_vote(&mut self, now: i64, window: BidWindow) -> Result<BidPayout> {
        match self.status {
            AuctionStatus::Blocked => return err!(PoolError::ProposalBlocked),
            AuctionStatus::Voted => return err!(PoolError::AlreadyVoted),
            AuctionStatus::Refunded => return err!(PoolError::InvalidProposalState),
            AuctionStatus::Open => {}
        }
        require!(window.state == ProposalState::Active, PoolError::InvalidProposalState);
        require!(now >= window.cutoff, PoolError::BidActive);
        require!(self.has_bid(), PoolError::NoBid);

        self.status = AuctionStatus::Voted;
        Ok(BidPayout {
            bidder: self.highest_bidder,
            amount: self.highest_bid,
        })
    }

    /// Return the highest bid once the proposal is no longer active and the
    /// pool never voted. Nothing to refund is not an error.
    pub fn refund(&mut self, state: ProposalState) -> Result<Option<BidPayout>> {
        require!(state != ProposalState::Active, PoolError::ProposalActive);
        require!(self.status != AuctionStatus::Voted, PoolError::AlreadyVoted);

        let payout = self.clear_highest();
        if payout.is_some() {
            self.status = AuctionStatus::Refunded;
        }
        Ok(payout)
    }

    fn clear_highest(&mut self) -> Option<BidPayout> {
        if !self.has_bid() {
            return None;
        }

        let payout = BidPayout {
            bidder: self.highest_bidder,
            amount: self.highest_bid,
        };
        self.highest_bidder = Pubkey::default();
        self.highest_bid = 0;
        self.support = false;
        Some(payout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUTOFF: i64 = 10_000;

    fn open() -> BidWindow {
        BidWindow { state: ProposalState::Active, cutoff: CUTOFF }
    }

    fn code(err: Error) -> u32 {
        match err {
            Error::AnchorError(e) => e.error_code_number,
            Error::ProgramError(_) => u32::MAX,
        }
    }

    fn expect(err: PoolError) -> u32 {
        err as u32 + anchor_lang::error::ERROR_CODE_OFFSET
    }

    #[test]
    fn top_up_accumulates_and_keeps_bidder() {
        let alice = Pubkey::new_unique();
        let mut bid = ProposalBid::default();

        let first = bid.place_bid(alice, 1_000, true, 1, open()).unwrap();
        assert_eq!(first.displaced, None);
        assert_eq!(first.previous_bidder, Pubkey::default());
        assert!(!first.top_up);

        let second = bid.place_bid(alice, 2_000, true, 2, open()).unwrap();
        assert!(second.top_up);
        assert_eq!(second.displaced, None);
        assert_eq!(second.previous_bidder, alice);
        assert_eq!(second.previous_highest, 1_000);
        assert_eq!(second.new_highest, 3_000);
        assert_eq!(bid.highest_bid, 3_000);
        assert_eq!(bid.total_bid, 3_000);
    }

    #[test]
    fn outbid_refunds_previous_bidder() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let mut bid = ProposalBid::default();

        bid.place_bid(alice, 1_000, true, 1, open()).unwrap();
        let err = bid.place_bid(bob, 1_000, false, 2, open()).unwrap_err();
        assert_eq!(code(err), expect(PoolError::LowBid));

        let outcome = bid.place_bid(bob, 1_001, false, 3, open()).unwrap();
        assert_eq!(outcome.displaced, Some(BidPayout { bidder: alice, amount: 1_000 }));
        assert_eq!(outcome.previous_bidder, alice);
        assert_eq!(bid.highest_bidder, bob);
        assert!(!bid.support);
    }

    #[test]
    fn bidding_closes_at_cutoff() {
        let mut bid = ProposalBid::default();
        let err = bid
            .place_bid(Pubkey::new_unique(), 5, true, CUTOFF, open())
            .unwrap_err();
        assert_eq!(code(err), expect(PoolError::BidEnded));

        let cancelled = BidWindow { state: ProposalState::Cancelled, cutoff: CUTOFF };
        let err = bid
            .place_bid(Pubkey::new_unique(), 5, true, 1, cancelled)
            .unwrap_err();
        assert_eq!(code(err), expect(PoolError::InvalidProposalState));

        let err = bid.place_bid(Pubkey::new_unique(), 0, true, 1, open()).unwrap_err();
        assert_eq!(code(err), expect(PoolError::InvalidAmount));
    }

    #[test]
    fn block_twice_and_unblock_rules() {
        let alice = Pubkey::new_unique();
        let mut bid = ProposalBid::default();
        bid.place_bid(alice, 700, true, 1, open()).unwrap();

        assert_eq!(bid.block().unwrap(), Some(BidPayout { bidder: alice, amount: 700 }));
        assert!(!bid.has_bid());
        assert_eq!(code(bid.block().unwrap_err()), expect(PoolError::ProposalInactive));

        let err = bid.place_bid(alice, 800, true, 2, open()).unwrap_err();
        assert_eq!(code(err), expect(PoolError::ProposalBlocked));

        let err = bid.unblock(ProposalState::Other).unwrap_err();
        assert_eq!(code(err), expect(PoolError::InvalidProposalState));
        bid.unblock(ProposalState::Active).unwrap();
        assert_eq!(code(bid.unblock(ProposalState::Active).unwrap_err()), expect(PoolError::ProposalActive));

        bid.place_bid(alice, 800, true, 3, open()).unwrap();
    }

    #[test]
    fn vote_needs_closed_window_and_bid() {
        let mut bid = ProposalBid::default();
        let err = bid.finalize_vote(CUTOFF, open()).unwrap_err();
        assert_eq!(code(err), expect(PoolError::NoBid));

        let alice = Pubkey::new_unique();
        bid.place_bid(alice, 50, false, 1, open()).unwrap();
        let err = bid.finalize_vote(CUTOFF - 1, open()).unwrap_err();
        assert_eq!(code(err), expect(PoolError::BidActive));

        let payout = bid.finalize_vote(CUTOFF, open()).unwrap();
        assert_eq!(payout, BidPayout { bidder: alice, amount: 50 });
        assert_eq!(bid.status, AuctionStatus::Voted);
        assert_eq!(code(bid.finalize_vote(CUTOFF, open()).unwrap_err()), expect(PoolError::AlreadyVoted));
        assert_eq!(code(bid.block().unwrap_err()), expect(PoolError::AlreadyVoted));
        assert_eq!(
            code(bid.refund(ProposalState::Other).unwrap_err()),
            expect(PoolError::AlreadyVoted)
        );
    }

    #[test]
    fn refund_without_bid_is_silent() {
        let mut bid = ProposalBid::default();
        assert_eq!(bid.refund(ProposalState::Cancelled).unwrap(), None);
        assert_eq!(bid.status, AuctionStatus::Open);
    }

    #[test]
    fn refund_after_cancel_pays_bidder_once() {
        let alice = Pubkey::new_unique();
        let mut bid = ProposalBid::default();
        bid.place_bid(alice, 900, true, 1, open()).unwrap();

        let err = bid.refund(ProposalState::Active).unwrap_err();
        assert_eq!(code(err), expect(PoolError::ProposalActive));

        assert_eq!(
            bid.refund(ProposalState::Cancelled).unwrap(),
            Some(BidPayout { bidder: alice, amount: 900 })
        );
        assert_eq!(bid.status, AuctionStatus::Refunded);
        assert_eq!(bid.refund(ProposalState::Cancelled).unwrap(), None);
    }
}
