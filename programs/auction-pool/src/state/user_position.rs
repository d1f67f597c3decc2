use anchor_lang::prelude::*;
use crate::errors::PoolError;
use super::pool_state::AssetKind;
use super::reward_index::RewardCheckpoint;

/// A depositor's receipt balances and reward snapshots
/// One UserPosition per user per pool
#[account]
#[derive(Default)]
pub struct UserPosition {
    /// The pool this position belongs to
    pub pool: Pubkey,

    /// The depositor's wallet address
    pub owner: Pubkey,

    /// Primary collateral held for this user (receipt balance)
    pub primary_deposit: u64,

    /// Secondary collateral held for this user (receipt balance)
    pub secondary_deposit: u64,

    pub bid_checkpoint: RewardCheckpoint,
    pub yield_checkpoint: RewardCheckpoint,
    pub bribe_checkpoint: RewardCheckpoint,

    /// Open proposals on which this user is the current highest bidder
    pub open_bid_count: u32,

    /// When the combined deposit last went from zero to non-zero
    pub deposit_started_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl UserPosition {
    pub const LEN: usize = 8  // discriminator
        + 32  // pool
        + 32  // owner
        + 8   // primary_deposit
        + 8   // secondary_deposit
        + RewardCheckpoint::LEN * 3
        + 4   // open_bid_count
        + 8   // deposit_started_at
        + 1   // bump
        + 32; // padding

    /// `init_if_needed` hands back a zeroed account the first time
    pub fn ensure_initialized(&mut self, pool: Pubkey, owner: Pubkey, bump: u8) {
        if self.owner == Pubkey::default() {
            self.pool = pool;
            self.owner = owner;
            self.bump = bump;
        }
    }

    pub fn deposit_of(&self, kind: AssetKind) -> u64 {
        match kind {
            AssetKind::Primary => self.primary_deposit,
            AssetKind::Secondary => self.secondary_deposit,
        }
    }

    /// Share used by the bid and bribe streams
    pub fn combined_deposit(&self) -> Result<u64> {
        self.primary_deposit
            .checked_add(self.secondary_deposit)
            .ok_or_else(|| PoolError::Overflow.into())
    }

    pub fn credit(&mut self, kind: AssetKind, amount: u64, now: i64) -> Result<()> {
        if self.combined_deposit()? == 0 {
            self.deposit_started_at = now;
        }

        let balance = match kind {
            AssetKind::Primary => &mut self.primary_deposit,
            AssetKind::Secondary => &mut self.secondary_deposit,
        };
        *balance = balance.checked_add(amount).ok_or(PoolError::Overflow)?;
        Ok(())
    }

    pub fn debit(&mut self, kind: AssetKind, amount: u64) -> Result<()> {
        let balance = match kind {
            AssetKind::Primary => &mut self.primary_deposit,
            AssetKind::Secondary => &mut self.secondary_deposit,
        };
        *balance = balance.checked_sub(amount).ok_or(PoolError::InvalidBalance)?;
        Ok(())
    }

    pub fn open_bid(&mut self) -> Result<()> {
        self.open_bid_count = self
            .open_bid_count
            .checked_add(1)
            .ok_or(PoolError::Overflow)?;
        Ok(())
    }

    pub fn close_bid(&mut self) -> Result<()> {
        self.open_bid_count = self
            .open_bid_count
            .checked_sub(1)
            .ok_or(PoolError::Underflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stake_clock_starts_on_first_deposit_only() {
        let mut position = UserPosition::default();
        position.credit(AssetKind::Primary, 10, 100).unwrap();
        position.credit(AssetKind::Secondary, 5, 200).unwrap();
        assert_eq!(position.deposit_started_at, 100);
        assert_eq!(position.combined_deposit().unwrap(), 15);

        position.debit(AssetKind::Primary, 10).unwrap();
        position.debit(AssetKind::Secondary, 5).unwrap();
        position.credit(AssetKind::Primary, 1, 300).unwrap();
        assert_eq!(position.deposit_started_at, 300);
    }

    #[test]
    fn debit_past_balance_fails() {
        let mut position = UserPosition::default();
        position.credit(AssetKind::Secondary, 3, 1).unwrap();
        assert!(position.debit(AssetKind::Secondary, 4).is_err());
        assert!(position.debit(AssetKind::Primary, 1).is_err());
    }

    #[test]
    fn ensure_initialized_keeps_existing_owner() {
        let pool = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut position = UserPosition::default();
        position.ensure_initialized(pool, owner, 254);
        position.ensure_initialized(Pubkey::new_unique(), Pubkey::new_unique(), 1);
        assert_eq!(position.owner, owner);
        assert_eq!(position.pool, pool);
        assert_eq!(position.bump, 254);
    }

    #[test]
    fn close_bid_never_wraps() {
        let mut position = UserPosition::default();
        assert!(position.close_bid().is_err());
        position.open_bid().unwrap();
        position.close_bid().unwrap();
        assert_eq!(position.open_bid_count, 0);
    }
}
