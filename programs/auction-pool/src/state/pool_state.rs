use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::PoolError;
use super::reward_index::{RewardAmounts, RewardStream};
use super::user_position::UserPosition;

/// Which collateral a deposit or withdrawal moves
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum AssetKind {
    /// Governance token; earns bid and bribe rewards
    #[default]
    Primary,
    /// Yield-bearing token; earns bid, bribe and yield rewards
    Secondary,
}

impl AssetKind {
    pub fn vault_seed(&self) -> &'static [u8] {
        match self {
            AssetKind::Primary => PRIMARY_VAULT_SEED,
            AssetKind::Secondary => SECONDARY_VAULT_SEED,
        }
    }
}

/// Time-based bribe emission schedule
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct BribeRewardConfig {
    /// Bribe tokens emitted per second across all depositors
    pub reward_per_second: u64,
    /// Emission start (0 = not scheduled)
    pub start_timestamp: i64,
    /// Emission end (0 = open-ended)
    pub end_timestamp: i64,
}

impl BribeRewardConfig {
    pub const LEN: usize = 8 + 8 + 8;

    /// Rate bound, and total emission bound once the window is closed.
    /// An open-ended schedule is bounded only by the bribe vault balance,
    /// which `accrue_bribe` clamps to; setting an end re-runs this check.
    pub fn validate_rate(&self) -> Result<()> {
        require!(
            self.reward_per_second <= MAX_BRIBE_REWARD_PER_SECOND,
            PoolError::RewardRateTooHigh
        );

        if self.start_timestamp > 0 && self.end_timestamp > self.start_timestamp {
            let window = self
                .end_timestamp
                .checked_sub(self.start_timestamp)
                .ok_or(PoolError::Underflow)? as u128;
            let total = window
                .checked_mul(self.reward_per_second as u128)
                .ok_or(PoolError::Overflow)?;
            require!(total <= MAX_BRIBE_EMISSION, PoolError::RewardRateTooHigh);
        }

        Ok(())
    }

    /// The `[from, to)` slice of the schedule not yet accrued, if any
    pub fn accrual_window(&self, last_accrued_at: i64, now: i64) -> Option<(i64, i64)> {
        if self.start_timestamp == 0 {
            return None;
        }

        let from = last_accrued_at.max(self.start_timestamp);
        let to = if self.end_timestamp == 0 {
            now
        } else {
            now.min(self.end_timestamp)
        };

        (to > from).then_some((from, to))
    }
}

/// Token balances the accrual step needs to observe
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct VaultBalances {
    pub yield_vault: u64,
    pub bribe_vault: u64,
}

/// Net-of-fee split of a winning bid
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct VoteSettlement {
    pub distributed: u64,
    pub fee: u64,
}

/// Pool configuration and global ledger
/// One PDA per pool, authority over all five vaults
#[account]
#[derive(Default)]
pub struct AuctionPool {
    /// Pool admin - votes, blocks proposals, tunes settings
    pub owner: Pubkey,

    /// Receives the protocol cut of winning bids
    pub fee_recipient: Pubkey,

    /// Program that owns proposal accounts and accepts `cast_vote`
    pub governance_program: Pubkey,

    // ============================================================
    // ASSETS
    // ============================================================

    pub primary_mint: Pubkey,
    pub secondary_mint: Pubkey,
    pub bid_mint: Pubkey,
    pub bribe_mint: Pubkey,
    pub yield_mint: Pubkey,

    // ============================================================
    // CONFIGURATION
    // ============================================================

    /// Seconds a pre-vote stake stays locked after each vote
    pub withdrawal_delay: i64,

    /// Protocol cut of every winning bid in basis points
    /// Default: 1600 (16%)
    pub fee_cut_bps: u16,

    pub bribe_config: BribeRewardConfig,

    /// Blocks deposit, bid and claim
    pub paused: bool,

    // ============================================================
    // DEPOSIT TOTALS
    // ============================================================

    pub total_primary: u64,
    pub total_secondary: u64,

    // ============================================================
    // REWARD STREAMS
    // ============================================================

    /// Winning bids net of fee, over primary + secondary
    pub bid_stream: RewardStream,

    /// Secondary collateral yield, over secondary only
    pub yield_stream: RewardStream,

    /// Time-based bribe emission, over primary + secondary
    pub bribe_stream: RewardStream,

    /// Bid reward finalised while nobody was staked
    pub undistributed_bid_reward: u64,

    /// Net-of-fee value of every open highest bid
    pub pending_bid_reward: u64,

    /// Protocol fee held in the bid vault for the fee recipient
    pub fees_received: u64,

    /// Yield vault balance already fed into the yield stream
    pub yield_accounted: u64,

    /// Bribe tokens accrued to depositors and not yet claimed
    pub bribe_reserved: u64,

    pub bribe_last_accrued_at: i64,

    /// Start of the current withdrawal delay (0 = never voted)
    pub last_vote_at: i64,

    // ============================================================
    // BUMPS
    // ============================================================

    pub bump: u8,
    pub primary_vault_bump: u8,
    pub secondary_vault_bump: u8,
    pub bid_vault_bump: u8,
    pub bribe_vault_bump: u8,
    pub yield_vault_bump: u8,
}

impl AuctionPool {
    pub const LEN: usize = 8  // discriminator
        + 32  // owner
        + 32  // fee_recipient
        + 32  // governance_program
        + 32 * 5  // mints
        + 8   // withdrawal_delay
        + 2   // fee_cut_bps
        + BribeRewardConfig::LEN
        + 1   // paused
        + 8   // total_primary
        + 8   // total_secondary
        + RewardStream::LEN * 3
        + 8   // undistributed_bid_reward
        + 8   // pending_bid_reward
        + 8   // fees_received
        + 8   // yield_accounted
        + 8   // bribe_reserved
        + 8   // bribe_last_accrued_at
        + 8   // last_vote_at
        + 6   // bumps
        + 64; // padding

    /// Constructor checks shared by `initialize_pool`
    pub fn validate_params(
        governance_program: &Pubkey,
        fee_recipient: &Pubkey,
        withdrawal_delay: i64,
        fee_cut_bps: u16,
        bribe_config: &BribeRewardConfig,
    ) -> Result<()> {
        require!(*governance_program != Pubkey::default(), PoolError::InvalidGovernance);
        require!(*fee_recipient != Pubkey::default(), PoolError::InvalidRecipient);
        Self::validate_delay(withdrawal_delay)?;
        require!(fee_cut_bps <= MAX_FEE_CUT_BPS, PoolError::FeeTooHigh);
        if bribe_config.start_timestamp > 0 && bribe_config.end_timestamp > 0 {
            require!(
                bribe_config.start_timestamp < bribe_config.end_timestamp,
                PoolError::HighTimestamp
            );
        }
        bribe_config.validate_rate()
    }

    fn validate_delay(period: i64) -> Result<()> {
        require!(period > 0, PoolError::InvalidPeriod);
        require!(period <= MAX_WITHDRAWAL_DELAY, PoolError::ExceedsMaxDelay);
        Ok(())
    }

    pub fn mint_for(&self, kind: AssetKind) -> Pubkey {
        match kind {
            AssetKind::Primary => self.primary_mint,
            AssetKind::Secondary => self.secondary_mint,
        }
    }

    pub fn vault_bump_for(&self, kind: AssetKind) -> u8 {
        match kind {
            AssetKind::Primary => self.primary_vault_bump,
            AssetKind::Secondary => self.secondary_vault_bump,
        }
    }

    /// Share over which bid and bribe rewards are spread
    pub fn combined_share(&self) -> Result<u64> {
        self.total_primary
            .checked_add(self.total_secondary)
            .ok_or_else(|| PoolError::Overflow.into())
    }

    // ============================================================
    // FEE SPLIT
    // ============================================================

    pub fn fee_for(&self, amount: u64) -> Result<u64> {
        let fee = (amount as u128)
            .checked_mul(self.fee_cut_bps as u128)
            .ok_or(PoolError::Overflow)?
            .checked_div(BPS_DENOMINATOR as u128)
            .ok_or(PoolError::DivisionByZero)?;
        Ok(fee as u64)
    }

    /// Portion of a bid that ends up with depositors
    pub fn net_of_fee(&self, amount: u64) -> Result<u64> {
        amount
            .checked_sub(self.fee_for(amount)?)
            .ok_or_else(|| PoolError::Underflow.into())
    }

    // ============================================================
    // ACCRUAL
    // ============================================================

    /// Feed finalised bid reward into the bid stream, flushing anything held
    /// back while the pool was empty. Returns the amount distributed.
    pub fn accrue_bid_reward(&mut self, amount: u64) -> Result<u64> {
        let total = self
            .undistributed_bid_reward
            .checked_add(amount)
            .ok_or(PoolError::Overflow)?;

        let share = self.combined_share()?;
        if share == 0 {
            self.undistributed_bid_reward = total;
            return Ok(0);
        }

        self.bid_stream.distribute(total, share)?;
        self.undistributed_bid_reward = 0;
        Ok(total)
    }

    /// Recognise yield that landed in the yield vault since last time
    pub fn accrue_yield(&mut self, yield_vault_balance: u64) -> Result<u64> {
        let delta = yield_vault_balance.saturating_sub(self.yield_accounted);
        if delta == 0 || self.total_secondary == 0 {
            return Ok(0);
        }

        self.yield_stream.distribute(delta, self.total_secondary)?;
        self.yield_accounted = yield_vault_balance;
        Ok(delta)
    }

    /// Emit bribe reward for the elapsed part of the schedule, capped by
    /// what the vault holds beyond already-reserved reward
    pub fn accrue_bribe(&mut self, now: i64, bribe_vault_balance: u64) -> Result<u64> {
        let Some((from, to)) = self
            .bribe_config
            .accrual_window(self.bribe_last_accrued_at, now)
        else {
            return Ok(0);
        };
        self.bribe_last_accrued_at = to;

        let share = self.combined_share()?;
        if share == 0 {
            return Ok(0);
        }

        let elapsed = to.checked_sub(from).ok_or(PoolError::Underflow)? as u128;
        let emitted = elapsed
            .checked_mul(self.bribe_config.reward_per_second as u128)
            .ok_or(PoolError::Overflow)?;
        let available = bribe_vault_balance.saturating_sub(self.bribe_reserved);
        let reward = emitted.min(available as u128) as u64;
        if reward == 0 {
            return Ok(0);
        }

        self.bribe_stream.distribute(reward, share)?;
        self.bribe_reserved = self
            .bribe_reserved
            .checked_add(reward)
            .ok_or(PoolError::Overflow)?;
        Ok(reward)
    }

    pub fn accrue_all(&mut self, now: i64, balances: VaultBalances) -> Result<()> {
        self.accrue_bid_reward(0)?;
        self.accrue_yield(balances.yield_vault)?;
        self.accrue_bribe(now, balances.bribe_vault)?;
        Ok(())
    }

    /// Settle every stream for one user at the current accumulators
    pub fn checkpoint(&self, position: &mut UserPosition) -> Result<()> {
        let combined = position.combined_deposit()?;
        self.bid_stream.settle(&mut position.bid_checkpoint, combined)?;
        self.yield_stream
            .settle(&mut position.yield_checkpoint, position.secondary_deposit)?;
        self.bribe_stream.settle(&mut position.bribe_checkpoint, combined)?;
        Ok(())
    }

    /// Bribe schedule changes take effect from `now`, never retroactively
    pub fn restart_bribe_clock(&mut self, now: i64) {
        self.bribe_last_accrued_at = self.bribe_last_accrued_at.max(now);
    }

    // ============================================================
    // LEDGER
    // ============================================================

    pub fn record_deposit(
        &mut self,
        position: &mut UserPosition,
        kind: AssetKind,
        amount: u64,
        now: i64,
        balances: VaultBalances,
    ) -> Result<()> {
        require!(!self.paused, PoolError::Paused);
        require!(amount > 0, PoolError::InvalidAmount);

        self.accrue_all(now, balances)?;
        self.checkpoint(position)?;

        position.credit(kind, amount, now)?;
        match kind {
            AssetKind::Primary => {
                self.total_primary = self
                    .total_primary
                    .checked_add(amount)
                    .ok_or(PoolError::Overflow)?;
            }
            AssetKind::Secondary => {
                self.total_secondary = self
                    .total_secondary
                    .checked_add(amount)
                    .ok_or(PoolError::Overflow)?;
            }
        }
        Ok(())
    }

    pub fn record_withdraw(
        &mut self,
        position: &mut UserPosition,
        kind: AssetKind,
        amount: u64,
        now: i64,
        balances: VaultBalances,
    ) -> Result<()> {
        require!(amount > 0, PoolError::InvalidAmount);
        require!(amount <= position.deposit_of(kind), PoolError::InvalidBalance);
        require!(position.open_bid_count == 0, PoolError::ActiveBid);
        require!(
            !self.withdrawal_locked(position, now)?,
            PoolError::ActiveDelayPeriod
        );

        self.accrue_all(now, balances)?;
        self.checkpoint(position)?;

        position.debit(kind, amount)?;
        match kind {
            AssetKind::Primary => {
                self.total_primary = self
                    .total_primary
                    .checked_sub(amount)
                    .ok_or(PoolError::LedgerDesync)?;
            }
            AssetKind::Secondary => {
                self.total_secondary = self
                    .total_secondary
                    .checked_sub(amount)
                    .ok_or(PoolError::LedgerDesync)?;
            }
        }
        Ok(())
    }

    /// Stake that existed at the last vote stays put until the delay passes
    pub fn withdrawal_locked(&self, position: &UserPosition, now: i64) -> Result<bool> {
        if self.last_vote_at == 0 || position.deposit_started_at > self.last_vote_at {
            return Ok(false);
        }

        let unlock_at = self
            .last_vote_at
            .checked_add(self.withdrawal_delay)
            .ok_or(PoolError::Overflow)?;
        Ok(now < unlock_at)
    }

    pub fn pause(&mut self) -> Result<()> {
        require!(!self.paused, PoolError::AlreadyPaused);
        self.paused = true;
        Ok(())
    }

    pub fn unpause(&mut self) -> Result<()> {
        require!(self.paused, PoolError::NotPaused);
        self.paused = false;
        Ok(())
    }

    pub fn set_fee_recipient(&mut self, recipient: Pubkey) -> Result<()> {
        require!(recipient != Pubkey::default(), PoolError::InvalidRecipient);
        self.fee_recipient = recipient;
        Ok(())
    }

    pub fn set_delay_period(&mut self, period: i64) -> Result<()> {
        require!(period > 0, PoolError::InvalidPeriod);
        require!(period != self.withdrawal_delay, PoolError::SamePeriod);
        Self::validate_delay(period)?;
        self.withdrawal_delay = period;
        Ok(())
    }

    // ============================================================
    // REWARDS
    // ============================================================

    /// What `position` could claim at `now`, without touching state
    pub fn claimable(
        &self,
        position: &UserPosition,
        now: i64,
        balances: VaultBalances,
    ) -> Result<RewardAmounts> {
        let mut pool = self.clone();
        let mut position = position.clone();
        pool.accrue_all(now, balances)?;
        pool.checkpoint(&mut position)?;

        Ok(RewardAmounts {
            bid_fee: position.bid_checkpoint.accrued,
            secondary_yield: position.yield_checkpoint.accrued,
            bribe: position.bribe_checkpoint.accrued,
        })
    }

    /// `claimable` for a user who may never have opened a position
    pub fn reward_balance_of(
        &self,
        position: Option<&UserPosition>,
        now: i64,
        balances: VaultBalances,
    ) -> Result<RewardAmounts> {
        match position {
            Some(position) => self.claimable(position, now, balances),
            None => Ok(RewardAmounts::default()),
        }
    }

    /// Settle and zero a user's carries, releasing the reserved balances
    pub fn take_rewards(
        &mut self,
        position: &mut UserPosition,
        now: i64,
        balances: VaultBalances,
    ) -> Result<RewardAmounts> {
        require!(!self.paused, PoolError::Paused);

        self.accrue_all(now, balances)?;
        self.checkpoint(position)?;

        // A swept bribe vault leaves nothing reserved to pay out
        let amounts = RewardAmounts {
            bid_fee: position.bid_checkpoint.take(),
            secondary_yield: position.yield_checkpoint.take(),
            bribe: position.bribe_checkpoint.take().min(self.bribe_reserved),
        };

        self.yield_accounted = self
            .yield_accounted
            .checked_sub(amounts.secondary_yield)
            .ok_or(PoolError::Underflow)?;
        self.bribe_reserved = self
            .bribe_reserved
            .checked_sub(amounts.bribe)
            .ok_or(PoolError::Underflow)?;

        Ok(amounts)
    }

    // ============================================================
    // BRIBE SCHEDULE
    // ============================================================

    pub fn set_bribe_start(
        &mut self,
        start_timestamp: i64,
        reward_per_second: u64,
        now: i64,
        bribe_vault_balance: u64,
    ) -> Result<()> {
        self.accrue_bribe(now, bribe_vault_balance)?;

        require!(start_timestamp >= now, PoolError::InvalidStartTimestamp);
        if self.bribe_config.end_timestamp != 0 {
            require!(
                start_timestamp < self.bribe_config.end_timestamp,
                PoolError::HighTimestamp
            );
        }

        let config = BribeRewardConfig {
            reward_per_second,
            start_timestamp,
            ..self.bribe_config
        };
        config.validate_rate()?;

        self.bribe_config = config;
        self.restart_bribe_clock(now);
        Ok(())
    }

    pub fn set_bribe_end(
        &mut self,
        end_timestamp: i64,
        now: i64,
        bribe_vault_balance: u64,
    ) -> Result<()> {
        self.accrue_bribe(now, bribe_vault_balance)?;

        require!(
            end_timestamp >= now && end_timestamp > self.bribe_config.start_timestamp,
            PoolError::InvalidEndTimestamp
        );

        let config = BribeRewardConfig {
            end_timestamp,
            ..self.bribe_config
        };
        config.validate_rate()?;

        self.bribe_config = config;
        self.restart_bribe_clock(now);
        Ok(())
    }

    pub fn set_bribe_rate(
        &mut self,
        reward_per_second: u64,
        now: i64,
        bribe_vault_balance: u64,
    ) -> Result<()> {
        self.accrue_bribe(now, bribe_vault_balance)?;

        let config = BribeRewardConfig {
            reward_per_second,
            ..self.bribe_config
        };
        config.validate_rate()?;

        self.bribe_config = config;
        self.restart_bribe_clock(now);
        Ok(())
    }

    /// The whole bribe vault goes back to the owner once the emission is
    /// over and the claim grace period has passed
    pub fn sweep_remaining_bribe(&mut self, now: i64, bribe_vault_balance: u64) -> Result<u64> {
        let end = self.bribe_config.end_timestamp;
        require!(end != 0, PoolError::InvalidEndTimestamp);

        let unlock_at = end
            .checked_add(BRIBE_GRACE_PERIOD)
            .ok_or(PoolError::Overflow)?;
        require!(now >= unlock_at, PoolError::GracePeriod);

        self.accrue_bribe(now, bribe_vault_balance)?;

        // Unclaimed accruals are forfeited with the sweep
        self.bribe_reserved = 0;
        Ok(bribe_vault_balance)
    }

    // ============================================================
    // AUCTION BOOKKEEPING
    // ============================================================

    /// Track the net value of a proposal's highest bid moving from
    /// `previous` to `current`
    pub fn record_highest_bid(&mut self, previous: u64, current: u64) -> Result<()> {
        let released = self.net_of_fee(previous)?;
        let added = self.net_of_fee(current)?;
        self.pending_bid_reward = self
            .pending_bid_reward
            .checked_sub(released)
            .ok_or(PoolError::Underflow)?
            .checked_add(added)
            .ok_or(PoolError::Overflow)?;
        Ok(())
    }

    /// A bid left the auction without a vote (block or refund)
    pub fn release_bid(&mut self, amount: u64) -> Result<()> {
        self.record_highest_bid(amount, 0)
    }

    /// Split the winning bid: fee to the recipient's balance, the rest to
    /// depositors staked right now. Starts the withdrawal delay.
    pub fn settle_vote(&mut self, winning_bid: u64, now: i64) -> Result<VoteSettlement> {
        let fee = self.fee_for(winning_bid)?;
        let distributed = winning_bid.checked_sub(fee).ok_or(PoolError::Underflow)?;

        self.pending_bid_reward = self
            .pending_bid_reward
            .checked_sub(distributed)
            .ok_or(PoolError::Underflow)?;
        self.fees_received = self
            .fees_received
            .checked_add(fee)
            .ok_or(PoolError::Overflow)?;
        self.accrue_bid_reward(distributed)?;
        self.last_vote_at = now;

        Ok(VoteSettlement { distributed, fee })
    }

    pub fn take_fees(&mut self) -> u64 {
        std::mem::take(&mut self.fees_received)
    }
}

pub fn default_withdrawal_delay() -> i64 {
    DEFAULT_WITHDRAWAL_DELAY
}

pub fn default_fee_cut_bps() -> u16 {
    DEFAULT_FEE_CUT_BPS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> AuctionPool {
        AuctionPool {
            owner: Pubkey::new_unique(),
            withdrawal_delay: default_withdrawal_delay(),
            fee_cut_bps: default_fee_cut_bps(),
            ..Default::default()
        }
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
    fn fee_split_is_sixteen_percent_by_default() {
        let pool = pool();
        assert_eq!(pool.fee_for(2_000).unwrap(), 320);
        assert_eq!(pool.net_of_fee(2_000).unwrap(), 1_680);
    }

    #[test]
    fn bid_reward_waits_for_first_depositor() {
        let mut pool = pool();
        assert_eq!(pool.accrue_bid_reward(500).unwrap(), 0);
        assert_eq!(pool.undistributed_bid_reward, 500);

        pool.total_primary = 100;
        assert_eq!(pool.accrue_bid_reward(0).unwrap(), 500);
        assert_eq!(pool.undistributed_bid_reward, 0);
        assert_eq!(pool.bid_stream.reward_per_share, 5 * REWARD_PRECISION);
    }

    #[test]
    fn yield_without_secondary_share_stays_unrecognised() {
        let mut pool = pool();
        pool.total_primary = 10;
        assert_eq!(pool.accrue_yield(700).unwrap(), 0);
        assert_eq!(pool.yield_accounted, 0);

        pool.total_secondary = 7;
        assert_eq!(pool.accrue_yield(700).unwrap(), 700);
        assert_eq!(pool.yield_accounted, 700);
    }

    #[test]
    fn bribe_window_respects_schedule_and_balance() {
        let mut pool = pool();
        pool.total_primary = 1;
        pool.bribe_config = BribeRewardConfig {
            reward_per_second: 10,
            start_timestamp: 100,
            end_timestamp: 200,
        };

        assert_eq!(pool.accrue_bribe(50, 10_000).unwrap(), 0);
        assert_eq!(pool.accrue_bribe(150, 10_000).unwrap(), 500);
        // only 300 unreserved tokens left for the remaining 500 of emission
        assert_eq!(pool.accrue_bribe(500, 800).unwrap(), 300);
        assert_eq!(pool.bribe_last_accrued_at, 200);
        assert_eq!(pool.accrue_bribe(900, 10_000).unwrap(), 0);
    }

    #[test]
    fn bribe_window_skipped_while_empty() {
        let mut pool = pool();
        pool.bribe_config = BribeRewardConfig {
            reward_per_second: 1,
            start_timestamp: 10,
            end_timestamp: 0,
        };
        assert_eq!(pool.accrue_bribe(60, 1_000).unwrap(), 0);
        assert_eq!(pool.bribe_last_accrued_at, 60);
        assert_eq!(pool.bribe_reserved, 0);
    }

    #[test]
    fn delay_period_validation() {
        let mut pool = pool();
        assert_eq!(code(pool.set_delay_period(0).unwrap_err()), expect(PoolError::InvalidPeriod));
        assert_eq!(
            code(pool.set_delay_period(ONE_DAY).unwrap_err()),
            expect(PoolError::SamePeriod)
        );
        assert_eq!(
            code(pool.set_delay_period(SEVEN_DAYS + 1).unwrap_err()),
            expect(PoolError::ExceedsMaxDelay)
        );
        pool.set_delay_period(SEVEN_DAYS).unwrap();
        assert_eq!(pool.withdrawal_delay, SEVEN_DAYS);
    }

    #[test]
    fn constructor_rejects_bad_params() {
        let gov = Pubkey::new_unique();
        let recipient = Pubkey::new_unique();
        let bribe = BribeRewardConfig::default();

        let err = AuctionPool::validate_params(&Pubkey::default(), &recipient, ONE_DAY, 1600, &bribe)
            .unwrap_err();
        assert_eq!(code(err), expect(PoolError::InvalidGovernance));

        let err = AuctionPool::validate_params(&gov, &Pubkey::default(), ONE_DAY, 1600, &bribe)
            .unwrap_err();
        assert_eq!(code(err), expect(PoolError::InvalidRecipient));

        let err = AuctionPool::validate_params(&gov, &recipient, 0, 1600, &bribe).unwrap_err();
        assert_eq!(code(err), expect(PoolError::InvalidPeriod));

        let err = AuctionPool::validate_params(&gov, &recipient, SEVEN_DAYS + 1, 1600, &bribe)
            .unwrap_err();
        assert_eq!(code(err), expect(PoolError::ExceedsMaxDelay));

        let err = AuctionPool::validate_params(&gov, &recipient, ONE_DAY, MAX_FEE_CUT_BPS + 1, &bribe)
            .unwrap_err();
        assert_eq!(code(err), expect(PoolError::FeeTooHigh));

        AuctionPool::validate_params(&gov, &recipient, ONE_DAY, 1600, &bribe).unwrap();
    }

    #[test]
    fn pause_toggles_once() {
        let mut pool = pool();
        pool.pause().unwrap();
        assert_eq!(code(pool.pause().unwrap_err()), expect(PoolError::AlreadyPaused));
        pool.unpause().unwrap();
        assert_eq!(code(pool.unpause().unwrap_err()), expect(PoolError::NotPaused));
    }

    #[test]
    fn fee_recipient_cannot_be_cleared() {
        let mut pool = pool();
        let err = pool.set_fee_recipient(Pubkey::default()).unwrap_err();
        assert_eq!(code(err), expect(PoolError::InvalidRecipient));

        let recipient = Pubkey::new_unique();
        pool.set_fee_recipient(recipient).unwrap();
        assert_eq!(pool.fee_recipient, recipient);
    }

    #[test]
    fn bribe_schedule_setters_validate_timestamps() {
        let mut pool = pool();
        let now = 1_000;

        let err = pool.set_bribe_start(now - 1, 1, now, 0).unwrap_err();
        assert_eq!(code(err), expect(PoolError::InvalidStartTimestamp));

        pool.set_bribe_start(now + 10, 1, now, 0).unwrap();
        let err = pool.set_bribe_end(now + 10, now, 0).unwrap_err();
        assert_eq!(code(err), expect(PoolError::InvalidEndTimestamp));
        let err = pool.set_bribe_end(now - 1, now, 0).unwrap_err();
        assert_eq!(code(err), expect(PoolError::InvalidEndTimestamp));

        pool.set_bribe_end(now + 100, now, 0).unwrap();
        let err = pool.set_bribe_start(now + 100, 1, now, 0).unwrap_err();
        assert_eq!(code(err), expect(PoolError::HighTimestamp));

        let err = pool
            .set_bribe_rate(MAX_BRIBE_REWARD_PER_SECOND + 1, now, 0)
            .unwrap_err();
        assert_eq!(code(err), expect(PoolError::RewardRateTooHigh));
    }

    #[test]
    fn rate_change_is_not_retroactive() {
        let mut pool = pool();
        pool.total_primary = 1;
        pool.set_bribe_start(100, 0, 100, 0).unwrap();

        // nothing emitted at rate 0 over [100, 200)
        pool.set_bribe_rate(5, 200, 10_000).unwrap();
        assert_eq!(pool.bribe_reserved, 0);

        assert_eq!(pool.accrue_bribe(210, 10_000).unwrap(), 50);
    }

    #[test]
    fn sweep_waits_for_grace_period() {
        let mut pool = pool();
        let err = pool.sweep_remaining_bribe(10, 100).unwrap_err();
        assert_eq!(code(err), expect(PoolError::InvalidEndTimestamp));

        pool.bribe_config = BribeRewardConfig {
            reward_per_second: 1,
            start_timestamp: 100,
            end_timestamp: 200,
        };
        let err = pool
            .sweep_remaining_bribe(200 + BRIBE_GRACE_PERIOD - 1, 100)
            .unwrap_err();
        assert_eq!(code(err), expect(PoolError::GracePeriod));

        // nobody staked: the whole balance is unreserved
        assert_eq!(pool.sweep_remaining_bribe(200 + BRIBE_GRACE_PERIOD, 100).unwrap(), 100);
    }

    #[test]
    fn emission_cap_applies_to_closed_window() {
        let config = BribeRewardConfig {
            reward_per_second: MAX_BRIBE_REWARD_PER_SECOND,
            start_timestamp: 1,
            end_timestamp: 1 + 2_000_000,
        };
        assert!(config.validate_rate().is_err());

        let open_ended = BribeRewardConfig { end_timestamp: 0, ..config };
        open_ended.validate_rate().unwrap();
    }

    #[test]
    fn reward_balance_of_unknown_user_is_zero() {
        let mut pool = pool();
        pool.total_secondary = 5;
        let vaults = VaultBalances { yield_vault: 500, bribe_vault: 0 };

        assert_eq!(pool.reward_balance_of(None, 10, vaults).unwrap(), RewardAmounts::default());

        let holder = UserPosition {
            secondary_deposit: 5,
            ..Default::default()
        };
        let rewards = pool.reward_balance_of(Some(&holder), 10, vaults).unwrap();
        assert_eq!(rewards.secondary_yield, 500);
    }

    #[test]
    fn closing_open_ended_schedule_rechecks_emission_cap() {
        let mut pool = pool();
        let now = 1_000;
        pool.set_bribe_start(now + 10, MAX_BRIBE_REWARD_PER_SECOND, now, 0).unwrap();

        let err = pool.set_bribe_end(now + 10 + 2_000_000, now, 0).unwrap_err();
        assert_eq!(code(err), expect(PoolError::RewardRateTooHigh));
        assert_eq!(pool.bribe_config.end_timestamp, 0);

        pool.set_bribe_end(now + 10 + 1_000_000, now, 0).unwrap();
        assert_eq!(pool.bribe_config.end_timestamp, now + 10 + 1_000_000);
    }

    #[test]
    fn sweep_takes_whole_vault_and_caps_later_claims() {
        let mut pool = pool();
        let mut position = UserPosition {
            primary_deposit: 10,
            ..Default::default()
        };
        pool.total_primary = 10;
        pool.bribe_config = BribeRewardConfig {
            reward_per_second: 1,
            start_timestamp: 100,
            end_timestamp: 200,
        };
        pool.bribe_last_accrued_at = 100;

        let now = 200 + BRIBE_GRACE_PERIOD;
        assert_eq!(pool.sweep_remaining_bribe(now, 1_000).unwrap(), 1_000);
        assert_eq!(pool.bribe_reserved, 0);

        // accrued before the sweep, but the tokens are gone
        let vaults = VaultBalances { yield_vault: 0, bribe_vault: 0 };
        let rewards = pool.take_rewards(&mut position, now + 1, vaults).unwrap();
        assert_eq!(rewards.bribe, 0);
        assert_eq!(position.bribe_checkpoint.accrued, 0);
    }
}
