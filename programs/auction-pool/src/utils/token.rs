use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};
use crate::constants::POOL_SEED;
use crate::state::AuctionPool;

/// One pool vault together with what it takes to move its tokens
#[derive(Clone, Copy)]
pub struct VaultLeg<'a, 'info> {
    pub token_program: &'a Interface<'info, TokenInterface>,
    pub mint: &'a InterfaceAccount<'info, Mint>,
    pub vault: &'a InterfaceAccount<'info, TokenAccount>,
}

impl<'a, 'info> VaultLeg<'a, 'info> {
    pub fn new(
        token_program: &'a Interface<'info, TokenInterface>,
        mint: &'a InterfaceAccount<'info, Mint>,
        vault: &'a InterfaceAccount<'info, TokenAccount>,
    ) -> Self {
        Self { token_program, mint, vault }
    }

    /// Pull `amount` from a user's token account into the vault
    pub fn deposit(
        &self,
        from: &InterfaceAccount<'info, TokenAccount>,
        authority: &Signer<'info>,
        amount: u64,
    ) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }

        token_interface::transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: from.to_account_info(),
                    mint: self.mint.to_account_info(),
                    to: self.vault.to_account_info(),
                    authority: authority.to_account_info(),
                },
            ),
            amount,
            self.mint.decimals,
        )
    }

    /// Pay `amount` out of the vault, signed by the pool PDA
    pub fn pay(
        &self,
        pool: &Account<'info, AuctionPool>,
        to: &InterfaceAccount<'info, TokenAccount>,
        amount: u64,
    ) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }

        let owner = pool.owner;
        let seeds: &[&[u8]] = &[POOL_SEED, owner.as_ref(), &[pool.bump]];

        token_interface::transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.vault.to_account_info(),
                    mint: self.mint.to_account_info(),
                    to: to.to_account_info(),
                    authority: pool.to_account_info(),
                },
                &[seeds],
            ),
            amount,
            self.mint.decimals,
        )
    }
}

/// Destination token account must hold `mint` and belong to `owner`
pub fn check_destination(
    account: &InterfaceAccount<TokenAccount>,
    mint: &Pubkey,
    owner: &Pubkey,
) -> Result<()> {
    require_keys_eq!(account.mint, *mint, crate::errors::PoolError::InvalidTokenAccount);
    require_keys_eq!(account.owner, *owner, crate::errors::PoolError::InvalidTokenAccount);
    Ok(())
}
