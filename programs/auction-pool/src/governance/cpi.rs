//! Governance CPI Helpers

use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    instruction::{AccountMeta, Instruction},
    program::invoke_signed,
};
use super::instructions::*;

/// Cast the pool's vote on `proposal_id`
///
/// The pool PDA signs as voter. `remaining_accounts` are forwarded in order
/// after the voter and proposal, for whatever vote-record accounts the
/// governance program expects.
pub fn cast_vote<'info>(
    governance_program: &AccountInfo<'info>,
    voter: &AccountInfo<'info>,
    proposal: &AccountInfo<'info>,
    remaining_accounts: &[AccountInfo<'info>],
    proposal_id: u64,
    support: bool,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let data = CastVoteArgs { proposal_id, support }.data()?;

    let mut account_metas = vec![
        readonly_signer(voter.key()),
        writable(proposal.key()),
    ];
    account_metas.extend(remaining_accounts.iter().map(|account| AccountMeta {
        pubkey: account.key(),
        is_signer: account.is_signer,
        is_writable: account.is_writable,
    }));

    let ix = Instruction {
        program_id: governance_program.key(),
        accounts: account_metas,
        data,
    };

    let mut account_infos = vec![voter.clone(), proposal.clone()];
    account_infos.extend(remaining_accounts.iter().cloned());
    account_infos.push(governance_program.clone());

    msg!("Casting vote on proposal {}: support={}", proposal_id, support);
    invoke_signed(&ix, &account_infos, signer_seeds)?;

    Ok(())
}
