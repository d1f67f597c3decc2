use anchor_lang::prelude::*;
use crate::constants::REWARD_PRECISION;
use crate::errors::PoolError;

/// Global "reward per unit of share" accumulator for one reward stream.
///
/// Scaled by `REWARD_PRECISION`. Only ever grows; a holder's pending reward is
/// `(reward_per_share - paid) * share / REWARD_PRECISION`, computed lazily.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct RewardStream {
    pub reward_per_share: u128,
}

impl RewardStream {
    pub const LEN: usize = 16;

    /// Spread `amount` over `total_share` units. Truncates toward zero.
    /// Returns the accumulator increment, zero when nothing moved.
    pub fn distribute(&mut self, amount: u64, total_share: u64) -> Result<u128> {
        if amount == 0 || total_share == 0 {
            return Ok(0);
        }

        let delta = (amount as u128)
            .checked_mul(REWARD_PRECISION)
            .ok_or(PoolError::Overflow)?
            .checked_div(total_share as u128)
            .ok_or(PoolError::DivisionByZero)?;

        self.reward_per_share = self
            .reward_per_share
            .checked_add(delta)
            .ok_or(PoolError::Overflow)?;

        Ok(delta)
    }

    /// Settled carry plus what `share` earned since the checkpoint
    pub fn pending(&self, checkpoint: &RewardCheckpoint, share: u64) -> Result<u64> {
        let growth = self
            .reward_per_share
            .checked_sub(checkpoint.reward_per_share_paid)
            .ok_or(PoolError::Underflow)?;

        let earned = growth
            .checked_mul(share as u128)
            .ok_or(PoolError::Overflow)?
            .checked_div(REWARD_PRECISION)
            .ok_or(PoolError::DivisionByZero)?;
        let earned = u64::try_from(earned).map_err(|_| PoolError::Overflow)?;

        checkpoint
            .accrued
            .checked_add(earned)
            .ok_or_else(|| PoolError::Overflow.into())
    }

    /// Fold pending reward into the carry and move the snapshot to now.
    /// Must run before `share` changes.
    pub fn settle(&self, checkpoint: &mut RewardCheckpoint, share: u64) -> Result<()> {
        checkpoint.accrued = self.pending(checkpoint, share)?;
        checkpoint.reward_per_share_paid = self.reward_per_share;
        Ok(())
    }
}

/// Per-user snapshot of one stream
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct RewardCheckpoint {
    /// Stream accumulator at the user's last share change or claim
    pub reward_per_share_paid: u128,
    /// Reward settled but not yet claimed
    pub accrued: u64,
}

impl RewardCheckpoint {
    pub const LEN: usize = 16 + 8;

    /// Hand out the settled carry, leaving zero behind
    pub fn take(&mut self) -> u64 {
        std::mem::take(&mut self.accrued)
    }
}

/// Amounts owed to a user across the three streams
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct RewardAmounts {
    /// Share of winning bids, in the bid asset
    pub bid_fee: u64,
    /// Share of the secondary collateral's yield, in the yield token
    pub secondary_yield: u64,
    /// Share of the time-based bribe emission, in the bribe token
    pub bribe: u64,
}

impl RewardAmounts {
    pub fn is_empty(&self) -> bool {
        self.bid_fee == 0 && self.secondary_yield == 0 && self.bribe == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distribute_is_noop_without_share() {
        let mut stream = RewardStream::default();
        assert_eq!(stream.distribute(1_000, 0).unwrap(), 0);
        assert_eq!(stream.reward_per_share, 0);
    }

    #[test]
    fn settle_then_take_resets_pending() {
        let mut stream = RewardStream::default();
        let mut checkpoint = RewardCheckpoint::default();

        stream.distribute(900, 300).unwrap();
        assert_eq!(stream.pending(&checkpoint, 100).unwrap(), 300);

        stream.settle(&mut checkpoint, 100).unwrap();
        assert_eq!(checkpoint.accrued, 300);
        assert_eq!(checkpoint.take(), 300);
        assert_eq!(stream.pending(&checkpoint, 100).unwrap(), 0);
    }

    #[test]
    fn settle_preserves_reward_earned_under_old_share() {
        let mut stream = RewardStream::default();
        let mut checkpoint = RewardCheckpoint::default();

        stream.distribute(1_000, 1_000).unwrap();
        stream.settle(&mut checkpoint, 500).unwrap();
        // share doubles after the checkpoint; only later growth uses it
        stream.distribute(1_000, 1_000).unwrap();

        assert_eq!(stream.pending(&checkpoint, 1_000).unwrap(), 500 + 1_000);
    }

    #[test]
    fn truncation_under_distributes() {
        let mut stream = RewardStream::default();
        stream.distribute(10, 3).unwrap();

        let one = RewardCheckpoint::default();
        let per_holder = stream.pending(&one, 1).unwrap();
        assert_eq!(per_holder, 3);
        // three holders of one unit receive 9 of 10; one unit of dust stays behind
        assert!(per_holder * 3 <= 10);
        assert!(10 - per_holder * 3 <= 3 - 1);
    }

    #[test]
    fn pending_rejects_snapshot_ahead_of_stream() {
        let stream = RewardStream::default();
        let checkpoint = RewardCheckpoint { reward_per_share_paid: 1, accrued: 0 };
        assert!(stream.pending(&checkpoint, 1).is_err());
    }
}
