//! Governance Instruction Data
//!
//! Discriminators are the first 8 bytes of `sha256("global:<instruction_name>")`.

use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::AccountMeta;

// ============================================================
// INSTRUCTION DISCRIMINATORS
// ============================================================

pub mod discriminators {
    /// cast_vote
    pub const CAST_VOTE: [u8; 8] = [20, 212, 15, 189, 69, 180, 69, 151];
}

// ============================================================
// CAST VOTE
// ============================================================

/// Instruction data for cast_vote
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CastVoteArgs {
    pub proposal_id: u64,
    /// true = for, false = against
    pub support: bool,
}

impl CastVoteArgs {
    pub fn data(&self) -> Result<Vec<u8>> {
        let mut data = discriminators::CAST_VOTE.to_vec();
        self.serialize(&mut data)
            .map_err(|_| error!(ErrorCode::InstructionDidNotSerialize))?;
        Ok(data)
    }
}

// ============================================================
// ACCOUNT META HELPERS
// ============================================================

pub fn writable(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new(pubkey, false)
}

pub fn readonly_signer(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new_readonly(pubkey, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cast_vote_data_layout() {
        let data = CastVoteArgs { proposal_id: 7, support: true }.data().unwrap();
        assert_eq!(&data[..8], &discriminators::CAST_VOTE);
        assert_eq!(&data[8..16], &7u64.to_le_bytes());
        assert_eq!(data[16], 1);
        assert_eq!(data.len(), 17);
    }
}
