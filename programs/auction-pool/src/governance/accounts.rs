//! Governance Proposal Account Layout
//!
//! | Offset | Field | Type |
//! |--------|-------|------|
//! | 0 | discriminator | [u8; 8] |
//! | 8 | proposal_id | u64 |
//! | 16 | state | u8 |
//! | 17 | start_time | i64 |
//! | 25 | voting_end_time | i64 |

use anchor_lang::prelude::*;
use crate::constants::BID_CUTOFF_BUFFER;
use crate::errors::PoolError;

/// Discriminator for governance accounts (8 bytes)
pub const GOVERNANCE_ACCOUNT_DISCRIMINATOR_LEN: usize = 8;

/// Pool-side view of an external proposal's state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProposalState {
    Active,
    Cancelled,
    /// Pending, defeated, succeeded, queued, expired or executed
    Other,
}

impl From<u8> for ProposalState {
    fn from(raw: u8) -> Self {
        match raw {
            proposal_state::ACTIVE => ProposalState::Active,
            proposal_state::CANCELED => ProposalState::Cancelled,
            _ => ProposalState::Other,
        }
    }
}

/// Raw state values written by the governance program
pub mod proposal_state {
    pub const PENDING: u8 = 0;
    pub const CANCELED: u8 = 1;
    pub const ACTIVE: u8 = 2;
    pub const DEFEATED: u8 = 3;
    pub const SUCCEEDED: u8 = 4;
    pub const QUEUED: u8 = 5;
    pub const EXPIRED: u8 = 6;
    pub const EXECUTED: u8 = 7;
}

/// What the auction needs to know about a proposal at a given moment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BidWindow {
    pub state: ProposalState,
    /// Bids are accepted strictly before this timestamp; votes at or after it
    pub cutoff: i64,
}

/// Proposal account owned by the governance program
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GovernanceProposal {
    pub proposal_id: u64,
    pub state: u8,
    pub start_time: i64,
    pub voting_end_time: i64,
}

impl GovernanceProposal {
    pub const LEN: usize = GOVERNANCE_ACCOUNT_DISCRIMINATOR_LEN
        + 8  // proposal_id
        + 1  // state
        + 8  // start_time
        + 8; // voting_end_time

    /// sha256("account:Proposal")[..8]
    pub const DISCRIMINATOR: [u8; 8] = [26, 94, 189, 187, 116, 136, 53, 33];

    /// Decode raw account data, discriminator included
    pub fn try_deserialize(data: &[u8]) -> Result<Self> {
        require!(data.len() >= Self::LEN, PoolError::InvalidProposal);
        require!(
            data[..GOVERNANCE_ACCOUNT_DISCRIMINATOR_LEN] == Self::DISCRIMINATOR,
            PoolError::InvalidProposal
        );

        let data = &data[GOVERNANCE_ACCOUNT_DISCRIMINATOR_LEN..];
        Ok(Self {
            proposal_id: u64::from_le_bytes(read_array(data, 0)?),
            state: data[8],
            start_time: i64::from_le_bytes(read_array(data, 9)?),
            voting_end_time: i64::from_le_bytes(read_array(data, 17)?),
        })
    }

    /// Load a proposal account, checking owner and id
    pub fn load(
        account: &AccountInfo,
        governance_program: &Pubkey,
        proposal_id: u64,
    ) -> Result<Self> {
        require_keys_eq!(*account.owner, *governance_program, PoolError::InvalidProposal);

        let data = account.try_borrow_data()?;
        let proposal = Self::try_deserialize(&data)?;
        require!(proposal.proposal_id == proposal_id, PoolError::InvalidProposal);

        Ok(proposal)
    }

    pub fn proposal_state(&self) -> ProposalState {
        ProposalState::from(self.state)
    }

    pub fn bid_cutoff(&self) -> i64 {
        self.voting_end_time.saturating_sub(BID_CUTOFF_BUFFER)
    }

    pub fn bid_window(&self) -> BidWindow {
        BidWindow {
            state: self.proposal_state(),
            cutoff: self.bid_cutoff(),
        }
    }
}

fn read_array(data: &[u8], offset: usize) -> Result<[u8; 8]> {
    data.get(offset..offset + 8)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| error!(PoolError::InvalidProposal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(proposal: &GovernanceProposal) -> Vec<u8> {
        let mut data = GovernanceProposal::DISCRIMINATOR.to_vec();
        data.extend_from_slice(&proposal.proposal_id.to_le_bytes());
        data.push(proposal.state);
        data.extend_from_slice(&proposal.start_time.to_le_bytes());
        data.extend_from_slice(&proposal.voting_end_time.to_le_bytes());
        data
    }

    #[test]
    fn decodes_layout() {
        let proposal = GovernanceProposal {
            proposal_id: 42,
            state: proposal_state::ACTIVE,
            start_time: 1_000,
            voting_end_time: 90_000,
        };
        let decoded = GovernanceProposal::try_deserialize(&encode(&proposal)).unwrap();
        assert_eq!(decoded, proposal);
        assert_eq!(decoded.bid_window(), BidWindow {
            state: ProposalState::Active,
            cutoff: 90_000 - BID_CUTOFF_BUFFER,
        });
    }

    #[test]
    fn rejects_short_or_foreign_data() {
        let proposal = GovernanceProposal {
            proposal_id: 1,
            state: proposal_state::PENDING,
            start_time: 0,
            voting_end_time: 0,
        };
        let data = encode(&proposal);
        assert!(GovernanceProposal::try_deserialize(&data[..data.len() - 1]).is_err());

        let mut foreign = data.clone();
        foreign[0] ^= 0xff;
        assert!(GovernanceProposal::try_deserialize(&foreign).is_err());
    }

    #[test]
    fn state_mapping() {
        assert_eq!(ProposalState::from(proposal_state::ACTIVE), ProposalState::Active);
        assert_eq!(ProposalState::from(proposal_state::CANCELED), ProposalState::Cancelled);
        for raw in [
            proposal_state::PENDING,
            proposal_state::DEFEATED,
            proposal_state::SUCCEEDED,
            proposal_state::QUEUED,
            proposal_state::EXPIRED,
            proposal_state::EXECUTED,
            42,
        ] {
            assert_eq!(ProposalState::from(raw), ProposalState::Other);
        }
    }
}
